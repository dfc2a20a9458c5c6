//! Decorative strokes and dot noise drawn over the text.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use rand::Rng;
use warpcha_common::constants::STROKE_WIDTH_RANGE;

use super::canvas::random_color;

/// One decorative stroke over the text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoration {
    Line {
        start: (f32, f32),
        end: (f32, f32),
        width: u32,
        color: Rgb<u8>,
    },
    /// Arc of the ellipse inscribed in the box spanned by the two corners
    Arc {
        corner_a: (f32, f32),
        corner_b: (f32, f32),
        start_deg: f32,
        end_deg: f32,
        width: u32,
        color: Rgb<u8>,
    },
}

impl Decoration {
    pub fn width(&self) -> u32 {
        match *self {
            Self::Line { width, .. } | Self::Arc { width, .. } => width,
        }
    }

    fn draw(&self, canvas: &mut RgbImage) {
        match *self {
            Self::Line {
                start,
                end,
                width,
                color,
            } => draw_stroke(canvas, start, end, width, color),
            Self::Arc {
                corner_a,
                corner_b,
                start_deg,
                end_deg,
                width,
                color,
            } => draw_arc(canvas, corner_a, corner_b, start_deg, end_deg, width, color),
        }
    }
}

/// Draw `line_count` pairs of (straight line, elliptical arc), each with its
/// own random endpoints, color and stroke width.
pub fn draw_decorations<R: Rng + ?Sized>(canvas: &mut RgbImage, line_count: u32, rng: &mut R) {
    for decoration in plan_decorations(canvas.dimensions(), line_count, rng) {
        decoration.draw(canvas);
    }
}

/// The strokes [`draw_decorations`] paints on a `width` x `height` canvas:
/// a line then an arc, `line_count` times.
pub fn plan_decorations<R: Rng + ?Sized>(
    (width, height): (u32, u32),
    line_count: u32,
    rng: &mut R,
) -> Vec<Decoration> {
    let mut decorations = Vec::with_capacity(line_count as usize * 2);
    for _ in 0..line_count {
        decorations.push(Decoration::Line {
            start: random_point(width, height, rng),
            end: random_point(width, height, rng),
            color: random_color(rng),
            width: rng.random_range(STROKE_WIDTH_RANGE),
        });
        decorations.push(Decoration::Arc {
            corner_a: random_point(width, height, rng),
            corner_b: random_point(width, height, rng),
            start_deg: rng.random_range(0.0..360.0),
            end_deg: rng.random_range(0.0..360.0),
            color: random_color(rng),
            width: rng.random_range(STROKE_WIDTH_RANGE),
        });
    }
    decorations
}

/// Overwrite individual pixels with random colors.
///
/// Each pixel is hit with probability `density / 10`, capped at 1.
/// Densities of zero or below leave the canvas alone.
pub fn draw_noise<R: Rng + ?Sized>(canvas: &mut RgbImage, density: f64, rng: &mut R) {
    if density <= 0.0 {
        return;
    }
    let threshold = density * 10.0;
    for pixel in canvas.pixels_mut() {
        if f64::from(rng.random_range(0u8..100)) < threshold {
            *pixel = random_color(rng);
        }
    }
}

fn random_point<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> (f32, f32) {
    (
        rng.random_range(0..width) as f32,
        rng.random_range(0..height) as f32,
    )
}

/// A `width`-pixel stroke, built from parallel one-pixel segments offset
/// along the segment normal.
fn draw_stroke(
    canvas: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    width: u32,
    color: Rgb<u8>,
) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = (dx * dx + dy * dy).sqrt();
    let normal = if length > 0.0 {
        (-dy / length, dx / length)
    } else {
        (0.0, 0.0)
    };

    let center = (width.max(1) - 1) as f32 / 2.0;
    for k in 0..width.max(1) {
        let offset = k as f32 - center;
        let (ox, oy) = (normal.0 * offset, normal.1 * offset);
        draw_line_segment_mut(
            canvas,
            (start.0 + ox, start.1 + oy),
            (end.0 + ox, end.1 + oy),
            color,
        );
    }
}

/// Arc of the ellipse inscribed in the box spanned by `corner_a` and
/// `corner_b`. Angles are in degrees, clockwise from 3 o'clock; an end
/// angle below the start wraps through 360.
fn draw_arc(
    canvas: &mut RgbImage,
    corner_a: (f32, f32),
    corner_b: (f32, f32),
    start_deg: f32,
    end_deg: f32,
    width: u32,
    color: Rgb<u8>,
) {
    let sweep = arc_sweep(start_deg, end_deg);
    if sweep <= 0.0 {
        return;
    }

    let (x0, x1) = (corner_a.0.min(corner_b.0), corner_a.0.max(corner_b.0));
    let (y0, y1) = (corner_a.1.min(corner_b.1), corner_a.1.max(corner_b.1));
    let center = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    let radii = ((x1 - x0) / 2.0, (y1 - y0) / 2.0);

    let point_at = |deg: f32| {
        let rad = deg.to_radians();
        (center.0 + radii.0 * rad.cos(), center.1 + radii.1 * rad.sin())
    };

    // One segment per degree of sweep
    let steps = sweep.ceil().max(1.0) as u32;
    let mut prev = point_at(start_deg);
    for step in 1..=steps {
        let next = point_at(start_deg + sweep * step as f32 / steps as f32);
        draw_stroke(canvas, prev, next, width, color);
        prev = next;
    }
}

/// Clockwise sweep from `start_deg` to `end_deg`, in `[0, 360)`
fn arc_sweep(start_deg: f32, end_deg: f32) -> f32 {
    (end_deg - start_deg).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use warpcha_common::constants::WHITE;

    fn white(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(WHITE))
    }

    fn changed_pixels(a: &RgbImage, b: &RgbImage) -> usize {
        a.pixels().zip(b.pixels()).filter(|(p, q)| p != q).count()
    }

    #[test]
    fn test_zero_lines_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut canvas = white(50, 40);
        draw_decorations(&mut canvas, 0, &mut rng);
        assert_eq!(canvas, white(50, 40));
    }

    #[test]
    fn test_decorations_draw_something() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut canvas = white(80, 60);
        draw_decorations(&mut canvas, 4, &mut rng);
        assert!(changed_pixels(&canvas, &white(80, 60)) > 0);
        assert_eq!(canvas.dimensions(), (80, 60));
    }

    #[test]
    fn test_decorations_on_single_pixel_canvas() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut canvas = white(1, 1);
        draw_decorations(&mut canvas, 5, &mut rng);
        assert_eq!(canvas.dimensions(), (1, 1));
    }

    #[test]
    fn test_decorations_alternate_line_then_arc() {
        let mut rng = StdRng::seed_from_u64(14);
        let decorations = plan_decorations((80, 60), 25, &mut rng);
        assert_eq!(decorations.len(), 50);

        for pair in decorations.chunks(2) {
            assert!(matches!(pair[0], Decoration::Line { .. }), "{:?}", pair[0]);
            assert!(matches!(pair[1], Decoration::Arc { .. }), "{:?}", pair[1]);
        }
        for decoration in &decorations {
            match *decoration {
                Decoration::Line { start, end, .. } => {
                    for (x, y) in [start, end] {
                        assert!((0.0..80.0).contains(&x) && (0.0..60.0).contains(&y));
                    }
                }
                Decoration::Arc { start_deg, end_deg, .. } => {
                    assert!((0.0..360.0).contains(&start_deg));
                    assert!((0.0..360.0).contains(&end_deg));
                }
            }
        }
    }

    #[test]
    fn test_decoration_widths_cover_stroke_range() {
        let mut rng = StdRng::seed_from_u64(15);
        let widths: Vec<u32> = plan_decorations((50, 50), 100, &mut rng)
            .iter()
            .map(Decoration::width)
            .collect();

        assert!(widths.iter().all(|w| STROKE_WIDTH_RANGE.contains(w)), "{:?}", widths);
        for width in STROKE_WIDTH_RANGE {
            assert!(widths.contains(&width), "width {} never drawn", width);
        }
    }

    #[test]
    fn test_decorations_render_their_plan() {
        let mut planned = white(80, 60);
        for decoration in plan_decorations((80, 60), 3, &mut StdRng::seed_from_u64(16)) {
            decoration.draw(&mut planned);
        }

        let mut drawn = white(80, 60);
        draw_decorations(&mut drawn, 3, &mut StdRng::seed_from_u64(16));
        assert_eq!(drawn, planned);
    }

    #[test]
    fn test_stroke_width_widens_line() {
        let black = Rgb([0, 0, 0]);
        let mut thin = white(30, 30);
        draw_stroke(&mut thin, (2.0, 15.0), (27.0, 15.0), 1, black);
        let mut thick = white(30, 30);
        draw_stroke(&mut thick, (2.0, 15.0), (27.0, 15.0), 3, black);

        let thin_count = changed_pixels(&thin, &white(30, 30));
        let thick_count = changed_pixels(&thick, &white(30, 30));
        assert!((25..=26).contains(&thin_count), "thin stroke {}", thin_count);
        assert_eq!(thick_count, 3 * thin_count);
        for y in 14..=16 {
            assert_eq!(*thick.get_pixel(10, y), black);
        }
    }

    #[test]
    fn test_arc_sweep_wraps() {
        assert_eq!(arc_sweep(0.0, 90.0), 90.0);
        assert_eq!(arc_sweep(270.0, 90.0), 180.0);
        assert_eq!(arc_sweep(45.0, 45.0), 0.0);
    }

    #[test]
    fn test_arc_equal_angles_draws_nothing() {
        let mut canvas = white(40, 40);
        draw_arc(&mut canvas, (5.0, 5.0), (35.0, 35.0), 120.0, 120.0, 2, Rgb([0, 0, 0]));
        assert_eq!(canvas, white(40, 40));
    }

    #[test]
    fn test_quarter_arc_stays_in_its_quadrant() {
        let black = Rgb([0, 0, 0]);
        let mut canvas = white(41, 41);
        // 0..90 degrees clockwise on screen: from 3 o'clock down to 6 o'clock
        draw_arc(&mut canvas, (40.0, 40.0), (0.0, 0.0), 0.0, 90.0, 1, black);

        assert_eq!(*canvas.get_pixel(40, 20), black);
        for (x, y, p) in canvas.enumerate_pixels() {
            if *p == black {
                assert!(x >= 19 && y >= 19, "arc pixel at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_noise_zero_density_is_noop() {
        let mut rng = StdRng::seed_from_u64(21);
        for density in [0.0, -2.5] {
            let mut canvas = white(30, 30);
            draw_noise(&mut canvas, density, &mut rng);
            assert_eq!(canvas, white(30, 30));
        }
    }

    #[test]
    fn test_noise_large_density_colors_every_pixel() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut canvas = white(20, 20);
        draw_noise(&mut canvas, 15.0, &mut rng);
        // A redrawn pixel can only match white by chance (1 in 2^24)
        assert!(changed_pixels(&canvas, &white(20, 20)) >= 399);
    }

    #[test]
    fn test_noise_density_controls_coverage() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut canvas = white(100, 100);
        draw_noise(&mut canvas, 3.0, &mut rng);
        // Expected 30% of 10_000 pixels
        let changed = changed_pixels(&canvas, &white(100, 100));
        assert!((2_500..3_500).contains(&changed), "changed {}", changed);
    }
}
