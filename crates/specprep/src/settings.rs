//! Run settings resolved from the command line.

use std::path::PathBuf;

use specprep_core::DEFAULT_SPEC_URL;

/// Where the downloaded spec is cached.
pub const DEFAULT_INPUT: &str = "./typesense/api/generator/openapi.yml";

/// Where the edited spec is written for the generator.
pub const DEFAULT_OUTPUT: &str = "./typesense/api/generator/generator.yml";

/// Inputs to a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Upstream spec URL.
    pub url: String,
    /// Downloaded spec, also the transform input.
    pub input: PathBuf,
    /// Edited spec.
    pub output: PathBuf,
    /// Skip the download and use whatever is at `input`.
    pub offline: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: DEFAULT_SPEC_URL.to_string(),
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            offline: false,
        }
    }
}
