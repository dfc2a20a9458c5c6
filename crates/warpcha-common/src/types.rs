//! Core types shared across Warpcha components.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHAR_LENGTH, DEFAULT_DOT_DENSITY, DEFAULT_HEIGHT, DEFAULT_LINES, DEFAULT_WIDTH,
};
use crate::error::{Result, WarpchaError};

/// How the canvas background is filled before anything is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// One random color, applied to every pixel
    Random,
    /// Plain white
    Fixed,
}

impl BackgroundMode {
    pub fn from_random(random: bool) -> Self {
        if random { Self::Random } else { Self::Fixed }
    }
}

/// Raw generator options, as read from a configuration file.
///
/// Numeric fields are signed so that out-of-range values reach
/// validation instead of failing inside the deserializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptchaOptions {
    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: i64,

    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: i64,

    /// Number of answer characters
    #[serde(default = "default_char_length")]
    pub char_length: i64,

    /// Number of decorative line/arc pairs
    #[serde(default = "default_lines")]
    pub lines: i64,

    /// Dot noise density (0 disables, 10 or more colors every pixel)
    #[serde(default = "default_draw_dots")]
    pub draw_dots: f64,

    /// Apply the perspective warp
    #[serde(default = "default_true")]
    pub twist: bool,

    /// Random background color instead of white
    #[serde(default = "default_true")]
    pub random_bg_color: bool,
}

impl Default for CaptchaOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            char_length: default_char_length(),
            lines: default_lines(),
            draw_dots: default_draw_dots(),
            twist: true,
            random_bg_color: true,
        }
    }
}

// Default value functions
fn default_width() -> i64 { DEFAULT_WIDTH as i64 }
fn default_height() -> i64 { DEFAULT_HEIGHT as i64 }
fn default_char_length() -> i64 { DEFAULT_CHAR_LENGTH as i64 }
fn default_lines() -> i64 { DEFAULT_LINES as i64 }
fn default_draw_dots() -> f64 { DEFAULT_DOT_DENSITY }
fn default_true() -> bool { true }

/// Validated, immutable generator configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    width: u32,
    height: u32,
    answer_length: usize,
    line_count: u32,
    dot_density: f64,
    warp_enabled: bool,
    background: BackgroundMode,
}

impl GeneratorConfig {
    /// Create a configuration, rejecting empty canvases, canvases whose RGB
    /// buffer would not fit in memory, empty answers and non-finite densities
    pub fn new(
        width: u32,
        height: u32,
        answer_length: usize,
        line_count: u32,
        dot_density: f64,
        warp_enabled: bool,
        background: BackgroundMode,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(WarpchaError::InvalidConfiguration(format!(
                "canvas size must be positive, got {}x{}",
                width, height
            )));
        }
        if rgb_buffer_len(width, height).is_none() {
            return Err(WarpchaError::InvalidConfiguration(format!(
                "canvas size {}x{} is too large",
                width, height
            )));
        }
        if answer_length == 0 {
            return Err(WarpchaError::InvalidConfiguration(
                "char_length must be at least 1".to_string(),
            ));
        }
        if !dot_density.is_finite() {
            return Err(WarpchaError::InvalidConfiguration(format!(
                "draw_dots must be a finite number, got {}",
                dot_density
            )));
        }

        Ok(Self {
            width,
            height,
            answer_length,
            line_count,
            dot_density,
            warp_enabled,
            background,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Canvas dimensions as `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn answer_length(&self) -> usize {
        self.answer_length
    }

    pub fn line_count(&self) -> u32 {
        self.line_count
    }

    pub fn dot_density(&self) -> f64 {
        self.dot_density
    }

    pub fn warp_enabled(&self) -> bool {
        self.warp_enabled
    }

    pub fn background(&self) -> BackgroundMode {
        self.background
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            answer_length: DEFAULT_CHAR_LENGTH,
            line_count: DEFAULT_LINES,
            dot_density: DEFAULT_DOT_DENSITY,
            warp_enabled: true,
            background: BackgroundMode::Random,
        }
    }
}

impl TryFrom<CaptchaOptions> for GeneratorConfig {
    type Error = WarpchaError;

    fn try_from(opts: CaptchaOptions) -> Result<Self> {
        let width = positive_u32("width", opts.width)?;
        let height = positive_u32("height", opts.height)?;

        if opts.char_length <= 0 {
            return Err(WarpchaError::InvalidConfiguration(format!(
                "char_length must be at least 1, got {}",
                opts.char_length
            )));
        }
        let answer_length = usize::try_from(opts.char_length).map_err(|_| {
            WarpchaError::InvalidConfiguration(format!(
                "char_length {} is too large",
                opts.char_length
            ))
        })?;

        if opts.lines < 0 {
            return Err(WarpchaError::InvalidConfiguration(format!(
                "lines must be >= 0, got {}",
                opts.lines
            )));
        }
        let line_count = u32::try_from(opts.lines).map_err(|_| {
            WarpchaError::InvalidConfiguration(format!("lines {} is too large", opts.lines))
        })?;

        Self::new(
            width,
            height,
            answer_length,
            line_count,
            opts.draw_dots,
            opts.twist,
            BackgroundMode::from_random(opts.random_bg_color),
        )
    }
}

/// Byte length of an RGB8 canvas, or `None` if it overflows `usize`
fn rgb_buffer_len(width: u32, height: u32) -> Option<usize> {
    let width = usize::try_from(width).ok()?;
    let height = usize::try_from(height).ok()?;
    width.checked_mul(height)?.checked_mul(3)
}

fn positive_u32(field: &str, value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(WarpchaError::InvalidConfiguration(format!(
            "{} must be positive, got {}",
            field, value
        )));
    }
    u32::try_from(value).map_err(|_| {
        WarpchaError::InvalidConfiguration(format!("{} {} is too large", field, value))
    })
}
