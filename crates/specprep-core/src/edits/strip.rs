use crate::document::{Document, Segment};
use crate::error::Result;
use crate::pipeline::Edit;

/// Drop `additionalProperties` from one schema so the generator emits a
/// concrete type instead of an open map.
#[derive(Debug, Clone)]
pub struct StripAdditionalProperties {
    name: &'static str,
    schema: &'static str,
    property: &'static str,
}

impl StripAdditionalProperties {
    pub fn new(name: &'static str, schema: &'static str, property: &'static str) -> Self {
        Self {
            name,
            schema,
            property,
        }
    }

    /// `components.schemas.SearchResultHit.properties.document`.
    pub fn search_result_hit() -> Self {
        Self::new("search-result-hit", "SearchResultHit", "document")
    }
}

impl Edit for StripAdditionalProperties {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, doc: &mut Document) -> Result<()> {
        let target = doc.mapping_mut(&[
            Segment::Key("components"),
            Segment::Key("schemas"),
            Segment::Key(self.schema),
            Segment::Key("properties"),
            Segment::Key(self.property),
        ])?;
        let removed = target.shift_remove("additionalProperties").is_some();
        tracing::debug!(
            edit = self.name,
            schema = self.schema,
            property = self.property,
            removed,
            "stripped additionalProperties"
        );
        Ok(())
    }
}
