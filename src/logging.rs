//! tracing-subscriber setup.

use crate::config::{LogFormat, LoggingConfig};
use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Log file used in simulation mode when none is configured, so log lines
/// do not scribble over the terminal matrix.
pub const SIMULATION_LOG_FILE: &str = "magic8ball-sim.log";

/// `RUST_LOG` wins over the configured level.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

pub fn init(config: &LoggingConfig, fallback_file: Option<&Path>) -> Result<()> {
    let filter = env_filter(&config.level);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match config.file.as_deref().or(fallback_file) {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
            match config.format {
                LogFormat::Pretty => builder.try_init(),
                LogFormat::Json => builder.json().try_init(),
            }
        }
        None => {
            let ansi = config.colored && atty::is(atty::Stream::Stderr);
            let builder = builder.with_ansi(ansi).with_writer(io::stderr);
            match config.format {
                LogFormat::Pretty => builder.try_init(),
                LogFormat::Json => builder.json().try_init(),
            }
        }
    };

    result.map_err(|e| anyhow!("Failed to initialise logging: {}", e))
}
