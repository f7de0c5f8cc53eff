//! Error types for tankgauge-widgets.

use tankgauge_core::ColorParseError;
use tankgauge_yaml::ParseError;
use thiserror::Error;

/// Errors reported by gauge construction and gauge operations.
#[derive(Debug, Error)]
pub enum GaugeError {
    /// Invalid configuration; nothing was built.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid argument passed to an operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Colour string could not be parsed.
    #[error("Invalid color: {0}")]
    Color(#[from] ColorParseError),

    /// Manifest could not be parsed.
    #[error("Manifest error: {0}")]
    Manifest(#[from] ParseError),

    /// The gauge was destroyed.
    #[error("Gauge has been destroyed")]
    Destroyed,
}

impl GaugeError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result alias for gauge operations.
pub type Result<T> = std::result::Result<T, GaugeError>;
