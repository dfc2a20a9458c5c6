//! # Warpcha CLI
//!
//! Generates a batch of CAPTCHA images, writes them as PNG files and
//! prints one `path<TAB>answer` line per image.
//!
//! ## Usage
//! ```bash
//! # Four captchas with the settings from config/warpcha.toml
//! warpcha
//!
//! # Ten reproducible captchas into ./out
//! warpcha --count 10 --output out --seed 42
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use warpcha::{CaptchaGenerator, GeneratorConfig, TrueTypeFont, Typeface};

mod config;

use config::AppConfig;

/// Warpcha - distorted text CAPTCHA generator
#[derive(Parser, Debug)]
#[command(name = "warpcha")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/warpcha.toml")]
    config: String,

    /// Number of captchas to generate (overrides config)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Font file (overrides config)
    #[arg(long, env = "WARPCHA_FONT")]
    font: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    info!("🧩 Starting Warpcha v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load(&args.config, &args)?;
    let generator_config = GeneratorConfig::try_from(config.captcha.clone())
        .context("Invalid captcha configuration")?;
    let font = TrueTypeFont::from_path(&config.font_path)
        .with_context(|| format!("Failed to load font {}", config.font_path.display()))?;
    info!(
        font = %config.font_path.display(),
        glyphs = font.glyph_count(),
        "📋 Configuration loaded"
    );

    let generator = CaptchaGenerator::new(generator_config, font);
    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    };

    let started = Instant::now();
    let written = write_batch(&generator, &mut *rng, config.count, &config.output_dir)?;
    for (path, answer) in &written {
        println!("{}\t{}", path.display(), answer);
    }

    info!(
        count = written.len(),
        output = %config.output_dir.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "✅ Generated CAPTCHAs"
    );
    Ok(())
}

/// Generate `count` captchas into `output_dir` as `<index>.png`
fn write_batch<T, R>(
    generator: &CaptchaGenerator<T>,
    rng: &mut R,
    count: usize,
    output_dir: &Path,
) -> Result<Vec<(PathBuf, String)>>
where
    T: Typeface,
    R: Rng + ?Sized,
{
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut written = Vec::with_capacity(count);
    for index in 0..count {
        let (image, answer) = generator.generate_with(rng)?.into_parts();
        let path = output_dir.join(format!("{}.png", index));
        image
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Wrote CAPTCHA");
        written.push((path, answer));
    }
    Ok(written)
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Keep stdout for the path/answer listing
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
