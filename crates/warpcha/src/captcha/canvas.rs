//! Canvas allocation and random colors.

use image::{Rgb, RgbImage};
use rand::Rng;
use warpcha_common::BackgroundMode;
use warpcha_common::constants::WHITE;

/// Draw a color with three independent uniform channels
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb<u8> {
    Rgb([rng.random(), rng.random(), rng.random()])
}

/// Allocate a `width`×`height` canvas filled with a single background color.
///
/// `Random` draws one color for the whole canvas; `Fixed` is white and
/// leaves `rng` untouched.
pub fn create_canvas<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    background: BackgroundMode,
) -> RgbImage {
    let color = match background {
        BackgroundMode::Random => random_color(rng),
        BackgroundMode::Fixed => Rgb(WHITE),
    };
    RgbImage::from_pixel(width, height, color)
}
