//! Shared constants for Warpcha components.

/// Characters an answer is drawn from: `A-Z` followed by `a-z`
pub const ANSWER_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Default canvas width in pixels
pub const DEFAULT_WIDTH: u32 = 200;

/// Default canvas height in pixels
pub const DEFAULT_HEIGHT: u32 = 150;

/// Default number of answer characters
pub const DEFAULT_CHAR_LENGTH: usize = 5;

/// Default number of line/arc pairs
pub const DEFAULT_LINES: u32 = 3;

/// Default dot noise density
pub const DEFAULT_DOT_DENSITY: f64 = 0.3;

/// Fraction of the canvas width the full answer string must cover
pub const TEXT_WIDTH_RATIO: f64 = 0.7;

/// Horizontal glyph jitter, as a fraction of the left margin
pub const JITTER_X_RATIO: f32 = 0.1;

/// Vertical glyph jitter, as a fraction of the top margin
pub const JITTER_Y_RATIO: f32 = 0.3;

/// Smallest font size considered when fitting the answer to the canvas
pub const MIN_FONT_SIZE: u32 = 1;

/// Inclusive range of stroke widths for decorative lines and arcs
pub const STROKE_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 1..=3;

/// Fixed (non-random) background color
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Color used for warp samples that fall outside the source canvas
pub const WARP_FILL: [u8; 3] = [0, 0, 0];
