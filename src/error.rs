//! Custom error types for the magic8ball application.
//!
//! This module defines domain-specific error types using thiserror,
//! providing clear error messages and proper error context propagation.

use thiserror::Error;

/// Errors related to sensor operations
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("I2C communication failed: {0}")]
    I2cError(String),

    #[error("Sensor initialization failed: {0}")]
    InitializationError(String),

    #[error("{device} not found: WHO_AM_I returned 0x{found:02X}, expected 0x{expected:02X}")]
    UnexpectedDevice {
        device: &'static str,
        expected: u8,
        found: u8,
    },

    #[error("Sensor calibration failed: {0}")]
    CalibrationError(String),

    #[error("Sensor read failed: {0}")]
    ReadError(String),
}

/// Errors related to the LED matrix
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("LED matrix framebuffer not found: {0}")]
    NotFound(String),

    #[error("Invalid scroll speed: {0}")]
    InvalidScrollSpeed(f64),

    #[error("Display write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors related to the responder run loop
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Giving up after {0} consecutive failed iterations")]
    TooManyFailures(u32),

    #[error("Signal handling error: {0}")]
    SignalError(String),
}

/// Application-level errors that can wrap other error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Sensor error: {0}")]
    Sensor(#[from] SensorError),

    #[error("Display error: {0}")]
    Display(#[from] DisplayError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;
