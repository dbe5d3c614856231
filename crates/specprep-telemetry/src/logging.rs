//! Structured logging to stderr.
//!
//! stdout is left untouched so the tool can be used in shell pipelines.

use crate::{LogFormat, TelemetryConfig, TelemetryError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging subsystem.
///
/// Sets up tracing-subscriber with either JSON or pretty format,
/// respecting the configured log level.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    // RUST_LOG wins over the configured level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => init_json_logging(filter),
        LogFormat::Pretty => init_pretty_logging(filter),
    }
}

fn init_json_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let json_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .flatten_event(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(json_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

fn init_pretty_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(pretty_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

/// Standard log event names.
pub mod events {
    /// Spec download is starting.
    pub const FETCH_STARTED: &str = "fetch_started";

    /// Local copy replaced by a fresh download.
    pub const FETCH_REFRESHED: &str = "fetch_refreshed";

    /// Download failed; the local copy was left in place.
    pub const FETCH_KEPT: &str = "fetch_kept";

    /// One edit has been applied.
    pub const EDIT_APPLIED: &str = "edit_applied";

    /// Edited spec written to disk.
    pub const SPEC_WRITTEN: &str = "spec_written";
}

/// Helper macros for structured logging with standard fields.
///
/// These wrap the tracing macros to ensure consistent field naming.
#[macro_export]
macro_rules! log_fetch_started {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::FETCH_STARTED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_fetch_refreshed {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::FETCH_REFRESHED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_fetch_kept {
    ($($field:tt)*) => {
        tracing::warn!(
            event = $crate::logging::events::FETCH_KEPT,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_edit_applied {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::EDIT_APPLIED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_spec_written {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::SPEC_WRITTEN,
            $($field)*
        )
    };
}
