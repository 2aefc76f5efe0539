//! Command-line interface argument parsing.
//!
//! This module defines the CLI structure and parsing logic using gumdrop.

use gumdrop::Options;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where sensor readings come from and where answers go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Sense HAT over I2C and the LED matrix framebuffer (default)
    #[default]
    Hardware,
    /// Keyboard shakes, LED matrix drawn in the terminal
    Simulate,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hardware" => Ok(RunMode::Hardware),
            "simulate" | "sim" => Ok(RunMode::Simulate),
            other => Err(format!(
                "unknown mode '{}', expected 'hardware' or 'simulate'",
                other
            )),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Hardware => write!(f, "hardware"),
            RunMode::Simulate => write!(f, "simulate"),
        }
    }
}

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert LogLevel to an EnvFilter directive
    pub fn to_filter_string(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// magic8ball: ask a question, shake the Sense HAT, read the answer
#[derive(Debug, Options)]
pub struct Cli {
    #[options(help = "print help message")]
    pub help: bool,

    #[options(short = "V", help = "print version and exit")]
    pub version: bool,

    #[options(help = "path to configuration file (default: magic8ball.toml)", meta = "PATH")]
    pub config: Option<PathBuf>,

    #[options(help = "run mode: hardware or simulate", meta = "MODE", default = "hardware")]
    pub mode: RunMode,

    #[options(help = "log level: trace, debug, info, warn, error", meta = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[options(help = "seconds per scrolled column (overrides config file)", meta = "SECONDS")]
    pub scroll_speed: Option<f64>,

    #[options(no_short, help = "seed the response picker for repeatable answers", meta = "N")]
    pub seed: Option<u64>,

    #[options(no_short, help = "print the effective configuration as TOML and exit")]
    pub dump_config: bool,
}

impl Cli {
    /// Parse command-line arguments, exiting on error or `--help`
    pub fn parse_args() -> Self {
        Self::parse_args_default_or_exit()
    }

    /// Parse an explicit argument list (without the program name)
    pub fn parse_from(args: &[&str]) -> Result<Self, gumdrop::Error> {
        Self::parse_args_default(args)
    }
}
