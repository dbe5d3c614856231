//! specprep library.
//!
//! Exposes the run driver for testing. The main entry point is the
//! `specprep` binary.

pub mod settings;

pub use settings::{Settings, DEFAULT_INPUT, DEFAULT_OUTPUT};

use specprep_core::{
    refresh_spec, transform_file, FetchOutcome, Pipeline, TransformError, TransformReport,
};

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// `None` when the download was skipped.
    pub fetch: Option<FetchOutcome>,
    pub report: TransformReport,
}

/// Refresh the local spec (best effort), then transform it.
pub fn run(settings: &Settings) -> Result<RunSummary, TransformError> {
    let fetch = if settings.offline {
        tracing::info!(input = %settings.input.display(), "offline, using local spec");
        None
    } else {
        Some(refresh(settings))
    };

    let pipeline = Pipeline::typesense();
    let report = transform_file(&settings.input, &settings.output, &pipeline)?;

    Ok(RunSummary { fetch, report })
}

fn refresh(settings: &Settings) -> FetchOutcome {
    match reqwest::blocking::Client::builder().build() {
        Ok(client) => refresh_spec(&client, &settings.url, &settings.input),
        Err(e) => {
            specprep_telemetry::log_fetch_kept!(url = %settings.url, error = %e);
            FetchOutcome::Kept {
                reason: format!("failed to build HTTP client: {}", e),
            }
        }
    }
}
