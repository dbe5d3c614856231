//! Structural edits applied to the Typesense spec.

mod strip;
mod unwrap;

pub use strip::StripAdditionalProperties;
pub use unwrap::{PropertyPolicy, UnwrapParameters};
