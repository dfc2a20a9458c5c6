//! CAPTCHA generation.
//!
//! Each stage lives in its own module and works on an explicitly passed
//! canvas and random generator; [`CaptchaGenerator`] runs them in order.

mod answer;
mod canvas;
mod generator;
mod glyphs;
mod overlay;
mod warp;

pub use answer::{generate_string, letters};
pub use canvas::{create_canvas, random_color};
pub use generator::CaptchaGenerator;
pub use glyphs::{TextExtent, TrueTypeFont, Typeface, draw_text, fit_font_size};
pub use overlay::{Decoration, draw_decorations, draw_noise, plan_decorations};
pub use warp::{WarpCoefficients, apply_warp, warp_canvas};

use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, RgbImage};
use warpcha_common::{Result, WarpchaError};

/// A generated CAPTCHA: the rendered image and the text it shows
#[derive(Debug, Clone)]
pub struct Captcha {
    image: RgbImage,
    answer: String,
}

impl Captcha {
    pub(crate) fn new(image: RgbImage, answer: String) -> Self {
        Self { image, answer }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// The expected answer (case-sensitive)
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn into_parts(self) -> (RgbImage, String) {
        (self.image, self.answer)
    }

    /// Encode the image as PNG
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| WarpchaError::Encode(e.to_string()))?;
        Ok(bytes)
    }

    /// Encode the image as a `data:image/png;base64,...` URL
    pub fn to_data_url(&self) -> Result<String> {
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(self.to_png()?)))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::{Rgb, RgbImage};

    use super::{TextExtent, TrueTypeFont, Typeface};

    const DEJAVU_SANS: &[u8] =
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/fonts/DejaVuSans.ttf"));

    pub(crate) fn bundled_font() -> TrueTypeFont {
        TrueTypeFont::from_bytes(DEJAVU_SANS.to_vec()).expect("bundled font parses")
    }

    /// Monospaced stand-in: every character is a solid `size / 2` × `size` block
    pub(crate) struct BlockFont;

    impl Typeface for BlockFont {
        fn measure(&self, size: u32, text: &str) -> TextExtent {
            TextExtent {
                width: size / 2 * text.chars().count() as u32,
                height: size,
            }
        }

        fn draw(
            &self,
            canvas: &mut RgbImage,
            origin: (f32, f32),
            size: u32,
            text: &str,
            color: Rgb<u8>,
        ) {
            let extent = self.measure(size, text);
            let (x0, y0) = (origin.0.floor() as i64, origin.1.floor() as i64);
            let (width, height) = canvas.dimensions();
            for dy in 0..i64::from(extent.height) {
                for dx in 0..i64::from(extent.width) {
                    let (x, y) = (x0 + dx, y0 + dy);
                    if x >= 0 && y >= 0 && x < i64::from(width) && y < i64::from(height) {
                        canvas.put_pixel(x as u32, y as u32, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn sample() -> Captcha {
        Captcha::new(RgbImage::from_pixel(12, 8, Rgb([10, 20, 30])), "AbCde".to_string())
    }

    #[test]
    fn test_into_parts() {
        let (image, answer) = sample().into_parts();
        assert_eq!(image.dimensions(), (12, 8));
        assert_eq!(answer, "AbCde");
    }

    #[test]
    fn test_png_encoding() {
        let png = sample().to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(&decoded, sample().image());
    }

    #[test]
    fn test_data_url() {
        let url = sample().to_data_url().unwrap();
        let payload = url.strip_prefix("data:image/png;base64,").unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), sample().to_png().unwrap());
    }
}
