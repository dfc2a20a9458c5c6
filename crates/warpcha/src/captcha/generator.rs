//! The CAPTCHA generation pipeline.

use rand::Rng;
use warpcha_common::{GeneratorConfig, Result};

use super::answer::{generate_string, letters};
use super::canvas::create_canvas;
use super::glyphs::{TrueTypeFont, Typeface, draw_text};
use super::overlay::{draw_decorations, draw_noise};
use super::warp::apply_warp;
use super::Captcha;

/// CAPTCHA generator: one validated configuration plus one font.
///
/// Generation only borrows the generator, so a single instance can serve
/// concurrent callers; every call allocates and returns its own canvas.
pub struct CaptchaGenerator<T: Typeface = TrueTypeFont> {
    config: GeneratorConfig,
    typeface: T,
    alphabet: Vec<char>,
}

impl<T: Typeface> CaptchaGenerator<T> {
    pub fn new(config: GeneratorConfig, typeface: T) -> Self {
        Self {
            config,
            typeface,
            alphabet: letters(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn typeface(&self) -> &T {
        &self.typeface
    }

    /// Generate a CAPTCHA using the thread-local random generator
    pub fn get_captcha(&self) -> Result<Captcha> {
        self.generate_with(&mut rand::rng())
    }

    /// Generate a CAPTCHA drawing all randomness from `rng`.
    ///
    /// Stages run in a fixed order: answer, background, glyphs,
    /// lines/arcs, dot noise, warp.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Captcha> {
        let config = &self.config;

        let answer = generate_string(rng, config.answer_length(), &self.alphabet)?;

        let mut canvas = create_canvas(rng, config.width(), config.height(), config.background());
        let font_size = draw_text(&mut canvas, &self.typeface, &answer, rng);
        draw_decorations(&mut canvas, config.line_count(), rng);
        draw_noise(&mut canvas, config.dot_density(), rng);
        apply_warp(&mut canvas, config.warp_enabled(), rng);

        tracing::debug!(
            width = config.width(),
            height = config.height(),
            answer_len = answer.len(),
            font_size = ?font_size,
            lines = config.line_count(),
            warped = config.warp_enabled(),
            "Generated CAPTCHA"
        );

        Ok(Captcha::new(canvas, answer))
    }
}
