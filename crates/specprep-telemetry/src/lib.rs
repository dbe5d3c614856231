//! Logging setup for specprep.
//!
//! # Usage
//!
//! ```ignore
//! use specprep_telemetry::{LogFormat, TelemetryConfig};
//!
//! let config = TelemetryConfig::new()
//!     .with_log_level("debug")
//!     .with_log_format(LogFormat::Json);
//!
//! specprep_telemetry::init(&config)?;
//! ```

pub mod config;
pub mod logging;

pub use config::{LogFormat, TelemetryConfig};
pub use logging::events;

use thiserror::Error;

/// Telemetry errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Unknown log format name.
    #[error("unknown log format '{0}' (expected 'json' or 'pretty')")]
    InvalidFormat(String),
}

/// Install the global subscriber.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    logging::init_logging(config)
}

/// Parse a log format name, rejecting unknown values.
pub fn parse_log_format(s: &str) -> Result<LogFormat, TelemetryError> {
    LogFormat::parse(s).ok_or_else(|| TelemetryError::InvalidFormat(s.to_string()))
}
