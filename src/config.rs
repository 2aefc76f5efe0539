//! Application configuration management.
//!
//! Configuration is layered with the `config` crate: built-in defaults, then
//! an optional TOML file, then `MAGIC8BALL_`-prefixed environment variables
//! (`MAGIC8BALL_RESPONDER__SCROLL_SPEED=0.05`). CLI overrides are applied on
//! top, and the result is validated once before anything touches hardware.

use crate::cli::Cli;
use crate::error::{ConfigError, Result};
use crate::gesture::AxisThresholds;
use crate::palette::{ColorPalette, TextColors};
use crate::sensors::i2c::{hts221, lsm9ds1};
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "magic8ball.toml";
pub const ENV_PREFIX: &str = "MAGIC8BALL";

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub responder: ResponderConfig,
    pub hardware: HardwareConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

/// Shake detection and message display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// Seconds per scrolled column
    pub scroll_speed: f64,
    pub thresholds: AxisThresholds,
    /// Palette name of the answer text color
    pub foreground: String,
    /// Palette name of the answer background color
    pub background: String,
    /// Stop after this many failed iterations in a row; 0 never stops
    pub max_consecutive_failures: u32,
    pub failure_backoff_ms: u64,
}

/// Sense HAT wiring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    pub i2c_bus: String,
    pub imu_address: u8,
    pub humidity_address: u8,
    pub accel_range_g: u8,
    /// LED matrix device; found through sysfs when unset
    pub framebuffer: Option<PathBuf>,
}

/// Simulation mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub temperature_celsius: f64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub colored: bool,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            scroll_speed: 0.03,
            thresholds: AxisThresholds::default(),
            foreground: "white".to_string(),
            background: "black".to_string(),
            max_consecutive_failures: 0,
            failure_backoff_ms: 100,
        }
    }
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            i2c_bus: "/dev/i2c-1".to_string(),
            imu_address: lsm9ds1::DEFAULT_ADDRESS,
            humidity_address: hts221::DEFAULT_ADDRESS,
            accel_range_g: 8,
            framebuffer: None,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            temperature_celsius: 21.5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            colored: true,
            file: None,
        }
    }
}

/// Responder settings after validation, with colors resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponderSettings {
    pub scroll_speed: f64,
    pub thresholds: AxisThresholds,
    pub colors: TextColors,
    pub max_consecutive_failures: u32,
    pub failure_backoff: Duration,
}

impl Default for ResponderSettings {
    fn default() -> Self {
        let config = ResponderConfig::default();
        Self {
            scroll_speed: config.scroll_speed,
            thresholds: config.thresholds,
            colors: TextColors::default(),
            max_consecutive_failures: config.max_consecutive_failures,
            failure_backoff: Duration::from_millis(config.failure_backoff_ms),
        }
    }
}

impl ResponderConfig {
    pub fn settings(&self) -> Result<ResponderSettings> {
        let palette = ColorPalette::default();
        let color = |field: &str, name: &str| {
            palette.get(name).ok_or_else(|| ConfigError::InvalidValue {
                field: field.to_string(),
                message: format!(
                    "unknown color '{}', expected one of: {}",
                    name,
                    palette.names().collect::<Vec<_>>().join(", ")
                ),
            })
        };

        Ok(ResponderSettings {
            scroll_speed: self.scroll_speed,
            thresholds: self.thresholds,
            colors: TextColors::new(
                color("responder.foreground", &self.foreground)?,
                color("responder.background", &self.background)?,
            ),
            max_consecutive_failures: self.max_consecutive_failures,
            failure_backoff: Duration::from_millis(self.failure_backoff_ms),
        })
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

impl AppConfig {
    /// Load from `path` (or the default path) plus the environment.
    ///
    /// An explicitly given file must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`AppConfig::load`], reading variables from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let config = Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .map_err(ConfigError::from)?;

        let config: AppConfig = config.try_deserialize().map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let responder = &self.responder;
        if !responder.scroll_speed.is_finite() || responder.scroll_speed <= 0.0 {
            return Err(invalid("responder.scroll_speed", "must be a positive number").into());
        }

        for (axis, threshold) in responder.thresholds.as_array() {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(invalid(
                    &format!("responder.thresholds.{}", axis),
                    "must be a positive number",
                )
                .into());
            }
        }

        responder.settings()?;

        if self.hardware.i2c_bus.is_empty() {
            return Err(invalid("hardware.i2c_bus", "cannot be empty").into());
        }

        if lsm9ds1::AccelRange::from_g(self.hardware.accel_range_g).is_none() {
            return Err(invalid("hardware.accel_range_g", "must be 2, 4, 8 or 16").into());
        }

        if !self.simulation.temperature_celsius.is_finite() {
            return Err(invalid("simulation.temperature_celsius", "must be a number").into());
        }

        if !matches!(
            self.logging.level.to_ascii_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(invalid(
                "logging.level",
                "must be one of trace, debug, info, warn, error",
            )
            .into());
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(speed) = cli.scroll_speed {
            self.responder.scroll_speed = speed;
        }

        if let Some(level) = cli.log_level {
            self.logging.level = level.to_filter_string().to_string();
        }
    }

    /// The configuration as a TOML document.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::palette::{RED, WHITE};
    use std::fs;
    use tempfile::TempDir;

    fn no_env() -> Option<Map<String, String>> {
        Some(Map::new())
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.responder.scroll_speed, 0.03);
        assert_eq!(config.responder.thresholds, AxisThresholds::default());
        assert_eq!(config.hardware.i2c_bus, "/dev/i2c-1");
        assert_eq!(config.hardware.imu_address, 0x6A);
        assert_eq!(config.hardware.humidity_address, 0x5F);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let config = AppConfig::load_with_env(None, no_env()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            AppConfig::load_with_env(Some(&path), no_env()),
            Err(AppError::Config(ConfigError::LoadError(_)))
        ));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("magic8ball.toml");
        fs::write(
            &path,
            r#"
[responder]
scroll_speed = 0.06
foreground = "red"

[responder.thresholds]
z = 3.5

[hardware]
imu_address = 0x6B
framebuffer = "/dev/fb1"
"#,
        )
        .unwrap();

        let config = AppConfig::load_with_env(Some(&path), no_env()).unwrap();
        assert_eq!(config.responder.scroll_speed, 0.06);
        assert_eq!(config.responder.thresholds.x, 2.0);
        assert_eq!(config.responder.thresholds.z, 3.5);
        assert_eq!(config.hardware.imu_address, 0x6B);
        assert_eq!(config.hardware.framebuffer, Some(PathBuf::from("/dev/fb1")));
        assert_eq!(config.hardware.i2c_bus, "/dev/i2c-1");

        let settings = config.responder.settings().unwrap();
        assert_eq!(settings.colors.foreground, RED);
        assert_eq!(settings.colors.background.r, 0);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("magic8ball.toml");
        fs::write(&path, "[responder]\nscroll_speed = 0.06\n").unwrap();

        let mut env = Map::new();
        env.insert(
            "MAGIC8BALL_RESPONDER__SCROLL_SPEED".to_string(),
            "0.1".to_string(),
        );
        let config = AppConfig::load_with_env(Some(&path), Some(env)).unwrap();
        assert_eq!(config.responder.scroll_speed, 0.1);
    }

    #[test]
    fn test_validate_scroll_speed() {
        let mut config = AppConfig::default();
        config.responder.scroll_speed = 0.0;
        assert!(config.validate().is_err());
        config.responder.scroll_speed = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_thresholds() {
        let mut config = AppConfig::default();
        config.responder.thresholds.y = -1.0;
        match config.validate() {
            Err(AppError::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, "responder.thresholds.y")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_unknown_color() {
        let mut config = AppConfig::default();
        config.responder.background = "chartreuse".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accel_range() {
        let mut config = AppConfig::default();
        config.hardware.accel_range_g = 6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_settings_match_default_config() {
        let settings = AppConfig::default().responder.settings().unwrap();
        assert_eq!(settings, ResponderSettings::default());
        assert_eq!(settings.colors.foreground, WHITE);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(&["--scroll-speed", "0.08", "--log-level", "debug"]).unwrap();
        let mut config = AppConfig::default();
        config.apply_cli_overrides(&cli);
        assert_eq!(config.responder.scroll_speed, 0.08);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_toml_dump_round_trips() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("scroll_speed = 0.03"));
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
