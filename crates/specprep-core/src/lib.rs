//! Prepares the Typesense OpenAPI spec for client code generation.
//!
//! Downloads the upstream spec, flattens the object-style query parameters
//! of the document search/import/export/delete operations into individual
//! `in: query` parameters, strips `additionalProperties` from the search hit
//! document schema, and writes the result for the generator.

pub mod document;
pub mod edits;
pub mod error;
pub mod fetch;
pub mod pipeline;

pub use document::{Document, NodePath, Segment};
pub use edits::{PropertyPolicy, StripAdditionalProperties, UnwrapParameters};
pub use error::{FetchError, Result, TransformError};
pub use fetch::{fetch_spec, refresh_spec, FetchOutcome, FetchReport, DEFAULT_SPEC_URL};
pub use pipeline::{transform_file, Edit, Pipeline, TransformReport};
