use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a transform run.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input spec could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input spec is not valid YAML.
    #[error("failed to parse spec: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// The edited spec could not be serialized.
    #[error("failed to encode spec: {0}")]
    Encode(#[source] serde_yaml::Error),

    /// The edited spec could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An expected key or sequence index is absent.
    #[error("missing expected path: {path}")]
    MissingPath { path: String },

    /// A node exists but has the wrong kind.
    #[error("expected {expected} at {path}")]
    Shape { path: String, expected: &'static str },

    /// An edit failed; wraps the underlying cause.
    #[error("edit '{edit}' failed: {source}")]
    Edit {
        edit: &'static str,
        #[source]
        source: Box<TransformError>,
    },
}

/// Errors from the best-effort download step.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent.
    #[error("download request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("download failed with status: {0}")]
    Status(reqwest::StatusCode),

    /// The response body could not be read in full.
    #[error("download body error: {0}")]
    Body(#[source] reqwest::Error),

    /// The downloaded bytes could not be persisted.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
