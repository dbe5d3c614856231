//! Best-effort download of the upstream spec.
//!
//! A failed download is not fatal: a copy from an earlier run may still be on
//! disk, and loading it will fail loudly if it is not.

use std::path::{Path, PathBuf};

use reqwest::blocking::Client;

use crate::error::FetchError;

/// Upstream location of the Typesense OpenAPI spec.
pub const DEFAULT_SPEC_URL: &str =
    "https://raw.githubusercontent.com/typesense/typesense-api-spec/master/openapi.yml";

/// A completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Result of [`refresh_spec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The local copy was replaced with the downloaded bytes.
    Refreshed(FetchReport),
    /// The download failed and whatever was on disk was left alone.
    Kept { reason: String },
}

impl FetchOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, FetchOutcome::Refreshed(_))
    }
}

/// Download `url` and write the body verbatim to `dest`.
///
/// The whole body is read before `dest` is opened, so a failed transfer
/// never truncates an existing file.
pub fn fetch_spec(client: &Client, url: &str, dest: &Path) -> Result<FetchReport, FetchError> {
    specprep_telemetry::log_fetch_started!(url = %url, dest = %dest.display());

    let response = client.get(url).send().map_err(FetchError::Request)?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }
    let body = response.bytes().map_err(FetchError::Body)?;

    let write_err = |source: std::io::Error| FetchError::Write {
        path: dest.to_path_buf(),
        source,
    };
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(dest, &body).map_err(write_err)?;

    Ok(FetchReport {
        path: dest.to_path_buf(),
        bytes: body.len(),
    })
}

/// Like [`fetch_spec`], but logs and swallows any failure.
pub fn refresh_spec(client: &Client, url: &str, dest: &Path) -> FetchOutcome {
    match fetch_spec(client, url, dest) {
        Ok(report) => {
            specprep_telemetry::log_fetch_refreshed!(
                path = %report.path.display(),
                bytes = report.bytes
            );
            FetchOutcome::Refreshed(report)
        }
        Err(e) => {
            specprep_telemetry::log_fetch_kept!(
                url = %url,
                dest = %dest.display(),
                error = %e
            );
            FetchOutcome::Kept {
                reason: e.to_string(),
            }
        }
    }
}
