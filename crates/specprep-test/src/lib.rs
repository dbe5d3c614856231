//! Test harnesses for the `specprep` binary.
//!
//! Provides `SpecServer`, a one-shot HTTP responder standing in for the
//! upstream spec host, and the shared fixture location.

#[cfg(test)]
pub mod cli;
pub mod server;

use std::path::PathBuf;

pub use server::SpecServer;

/// Absolute path to the shared test fixtures directory.
pub fn fixtures() -> PathBuf {
    // CARGO_MANIFEST_DIR = .../crates/specprep-test
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates/")
        .parent()
        .expect("workspace root")
        .join("tests/fixtures")
}
