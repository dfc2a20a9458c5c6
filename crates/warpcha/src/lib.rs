//! # Warpcha
//!
//! Distorted text CAPTCHA generation. A [`CaptchaGenerator`] turns a
//! validated [`GeneratorConfig`] and a font into independent
//! `(image, answer)` pairs.
//!
//! ## Pipeline
//! ```text
//! answer → canvas → glyphs → lines/arcs → dot noise → perspective warp
//! ```
//!
//! ```no_run
//! use warpcha::{CaptchaGenerator, GeneratorConfig, TrueTypeFont};
//!
//! # fn main() -> warpcha::Result<()> {
//! let font = TrueTypeFont::from_path("assets/fonts/DejaVuSans.ttf")?;
//! let generator = CaptchaGenerator::new(GeneratorConfig::default(), font);
//! let captcha = generator.get_captcha()?;
//! assert_eq!(captcha.answer().len(), 5);
//! # Ok(())
//! # }
//! ```

pub mod captcha;

pub use captcha::{Captcha, CaptchaGenerator, TextExtent, TrueTypeFont, Typeface};
pub use warpcha_common::{
    BackgroundMode, CaptchaOptions, GeneratorConfig, Result, WarpchaError, constants,
};
