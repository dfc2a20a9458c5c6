//! Configuration management for the Warpcha CLI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use warpcha::CaptchaOptions;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Number of captchas to generate
    #[serde(default = "default_count")]
    pub count: usize,

    /// Directory the PNG files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Path to font file for CAPTCHA text
    #[serde(default = "default_font_path")]
    pub font_path: PathBuf,

    /// Generator options
    #[serde(default)]
    pub captcha: CaptchaOptions,
}

// Default value functions
fn default_count() -> usize { 4 }
fn default_output_dir() -> PathBuf { PathBuf::from("captchas") }
fn default_font_path() -> PathBuf { PathBuf::from("assets/fonts/DejaVuSans.ttf") }

impl AppConfig {
    /// Load configuration from file, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            // Use defaults if config file doesn't exist
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(count) = args.count {
            config.count = count;
        }
        if let Some(ref output) = args.output {
            config.output_dir = output.clone();
        }
        if let Some(ref font) = args.font {
            config.font_path = font.clone();
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            output_dir: default_output_dir(),
            font_path: default_font_path(),
            captcha: CaptchaOptions::default(),
        }
    }
}
