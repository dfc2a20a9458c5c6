//! Perspective distortion of the finished canvas.

use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, warp_with};
use rand::Rng;
use warpcha_common::constants::WARP_FILL;

/// Fixed horizontal keystone term
const KEYSTONE_X: f32 = 0.001;

/// Eight projective coefficients `[a, b, c, d, e, f, g, h]` mapping an
/// output pixel `(x, y)` back to the source pixel
/// `((a x + b y + c) / (g x + h y + 1), (d x + e y + f) / (g x + h y + 1))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpCoefficients(pub [f32; 8]);

impl WarpCoefficients {
    /// A slight keystone: small scale-down on both axes, a sub-pixel
    /// vertical shift, and perspective terms on x and y.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let a = 1.0 - rng.random_range(1..=2u8) as f32 / 1000.0;
        let e = 1.0 - rng.random_range(1..=10u8) as f32 / 1000.0;
        let f = rng.random_range(1..=2u8) as f32 / 2000.0;
        let h = rng.random_range(1..=2u8) as f32 / 3000.0;
        Self([a, 0.0, 0.0, 0.0, e, f, KEYSTONE_X, h])
    }

    /// Source coordinates for output pixel `(x, y)`
    pub fn map(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f, g, h] = self.0;
        let w = g * x + h * y + 1.0;
        ((a * x + b * y + c) / w, (d * x + e * y + f) / w)
    }
}

/// Resample the canvas through a freshly drawn [`WarpCoefficients`].
///
/// Dimensions are preserved; samples falling outside the source are
/// black. Disabled warps leave both the canvas and `rng` untouched.
pub fn apply_warp<R: Rng + ?Sized>(canvas: &mut RgbImage, enabled: bool, rng: &mut R) {
    if !enabled {
        return;
    }
    let coefficients = WarpCoefficients::random(rng);
    tracing::trace!(?coefficients, "Warping canvas");
    *canvas = warp_canvas(canvas, &coefficients);
}

/// Resample `canvas` through `coefficients` into a new image of the same size
pub fn warp_canvas(canvas: &RgbImage, coefficients: &WarpCoefficients) -> RgbImage {
    let coefficients = *coefficients;
    warp_with(
        canvas,
        move |x, y| coefficients.map(x, y),
        Interpolation::Nearest,
        Rgb(WARP_FILL),
    )
}
