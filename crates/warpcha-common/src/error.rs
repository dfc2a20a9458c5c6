//! Common error types for Warpcha components.

use thiserror::Error;

/// Result alias used by the Warpcha library crates
pub type Result<T> = std::result::Result<T, WarpchaError>;

/// Errors raised while configuring or running a CAPTCHA generator
#[derive(Debug, Error)]
pub enum WarpchaError {
    /// Rejected generator configuration (dimensions, lengths, counts)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Answer string requested with an unusable length
    #[error("Invalid answer length: {0} (must be at least 1)")]
    InvalidLength(usize),

    /// Font data could not be read or parsed
    #[error("Font error: {0}")]
    Font(String),

    /// Image encoding failed
    #[error("Encode error: {0}")]
    Encode(String),
}

impl WarpchaError {
    /// Returns true if the error was caused by invalid caller input
    /// rather than by a collaborator (font, encoder)
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_) | Self::InvalidLength(_))
    }
}
