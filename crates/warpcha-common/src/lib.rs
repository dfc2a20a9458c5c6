//! # Warpcha Common
//!
//! Shared types, errors, and constants used across Warpcha components.
//!
//! ## Modules
//! - `types` - Generator options and the validated `GeneratorConfig`
//! - `error` - Common error types
//! - `constants` - Defaults and pipeline constants

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Result, WarpchaError};
pub use types::*;
