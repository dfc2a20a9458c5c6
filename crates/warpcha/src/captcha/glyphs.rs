//! Text layout and glyph rendering.
//!
//! The pipeline only needs two things from a font: the pixel extent of a
//! string at a given size, and a way to paint that string onto a canvas.
//! [`Typeface`] captures exactly that; [`TrueTypeFont`] implements it on
//! top of `rusttype`.

use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::pixelops::weighted_sum;
use rand::Rng;
use rusttype::{Font, Scale, point};
use warpcha_common::constants::{JITTER_X_RATIO, JITTER_Y_RATIO, MIN_FONT_SIZE, TEXT_WIDTH_RATIO};
use warpcha_common::{Result, WarpchaError};

use super::canvas::random_color;

/// Rendered size of a string, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

/// Glyph metrics and rasterization for one font
pub trait Typeface {
    /// Extent of `text` laid out on a single line at `size` pixels
    fn measure(&self, size: u32, text: &str) -> TextExtent;

    /// Paint `text` with its line box's top-left corner at `origin`.
    /// Pixels falling outside the canvas are dropped.
    fn draw(
        &self,
        canvas: &mut RgbImage,
        origin: (f32, f32),
        size: u32,
        text: &str,
        color: Rgb<u8>,
    );
}

impl<T: Typeface + ?Sized> Typeface for &T {
    fn measure(&self, size: u32, text: &str) -> TextExtent {
        (**self).measure(size, text)
    }

    fn draw(
        &self,
        canvas: &mut RgbImage,
        origin: (f32, f32),
        size: u32,
        text: &str,
        color: Rgb<u8>,
    ) {
        (**self).draw(canvas, origin, size, text, color)
    }
}

/// A TrueType/OpenType font loaded into memory
pub struct TrueTypeFont {
    font: Font<'static>,
}

impl TrueTypeFont {
    /// Parse font data already in memory
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| WarpchaError::Font("not a valid TrueType/OpenType font".to_string()))?;
        Ok(Self { font })
    }

    /// Read and parse a font file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| WarpchaError::Font(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(data)
    }

    pub fn glyph_count(&self) -> usize {
        self.font.glyph_count()
    }
}

impl Typeface for TrueTypeFont {
    fn measure(&self, size: u32, text: &str) -> TextExtent {
        let scale = Scale::uniform(size as f32);
        let v_metrics = self.font.v_metrics(scale);

        let width = self
            .font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .fold(0.0_f32, f32::max);

        TextExtent {
            width: width.ceil() as u32,
            height: (v_metrics.ascent - v_metrics.descent).ceil() as u32,
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
        let scale = Scale::uniform(size as f32);
        let v_metrics = self.font.v_metrics(scale);
        let (width, height) = canvas.dimensions();

        let baseline = point(origin.0, origin.1 + v_metrics.ascent);
        for glyph in self.font.layout(text, scale, baseline) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let alpha = coverage.clamp(0.0, 1.0);
                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                *pixel = weighted_sum(*pixel, color, 1.0 - alpha, alpha);
            });
        }
    }
}

/// Smallest font size at which `text` spans at least 70% of `canvas_width`.
///
/// Probes sizes 1, 2, 4, ... until one fits, then bisects between the last
/// size that was too small and the first one that fit. Assumes the
/// measured width never shrinks as the size grows. A typeface that never
/// reaches the target yields the largest probed size.
pub fn fit_font_size<T: Typeface + ?Sized>(typeface: &T, text: &str, canvas_width: u32) -> u32 {
    let target = f64::from(canvas_width) * TEXT_WIDTH_RATIO;
    let fits = |size: u32| f64::from(typeface.measure(size, text).width) >= target;

    let mut too_small = MIN_FONT_SIZE - 1;
    let mut large_enough = MIN_FONT_SIZE;
    while !fits(large_enough) {
        too_small = large_enough;
        large_enough = match large_enough.checked_mul(2) {
            Some(next) => next,
            None => return too_small,
        };
    }

    while large_enough - too_small > 1 {
        let mid = too_small + (large_enough - too_small) / 2;
        if fits(mid) {
            large_enough = mid;
        } else {
            too_small = mid;
        }
    }
    large_enough
}

/// Draw `text` centred on the canvas, one character at a time, each with
/// a random offset and a random color.
///
/// Characters advance by the width of the first character. Returns the
/// font size used, or `None` (drawing nothing) for empty text.
pub fn draw_text<T, R>(
    canvas: &mut RgbImage,
    typeface: &T,
    text: &str,
    rng: &mut R,
) -> Option<u32>
where
    T: Typeface + ?Sized,
    R: Rng + ?Sized,
{
    let first = text.chars().next()?;
    let (width, height) = canvas.dimensions();

    let size = fit_font_size(typeface, text, width);
    let extent = typeface.measure(size, text);
    let x = (width as f32 - extent.width as f32) / 2.0;
    let y = (height as f32 - extent.height as f32) / 2.0;

    let mut buf = [0u8; 4];
    let x_gap = typeface.measure(size, first.encode_utf8(&mut buf)).width as f32;

    tracing::trace!(size, x, y, x_gap, "Laid out answer text");

    for (i, ch) in text.chars().enumerate() {
        let origin = (
            x + i as f32 * x_gap + jitter(rng, x.abs() * JITTER_X_RATIO),
            y + jitter(rng, y.abs() * JITTER_Y_RATIO),
        );
        let color = random_color(rng);
        typeface.draw(canvas, origin, size, ch.encode_utf8(&mut buf), color);
    }

    Some(size)
}

/// Uniform offset in `[-span, span]`; zero when there is no room to move
fn jitter<R: Rng + ?Sized>(rng: &mut R, span: f32) -> f32 {
    if span > 0.0 {
        rng.random_range(-span..=span)
    } else {
        0.0
    }
}
