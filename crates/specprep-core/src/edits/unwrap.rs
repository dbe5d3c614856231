//! Flattening of object-style query parameters.
//!
//! Several Typesense operations describe their query string as a single
//! parameter whose `schema.properties` enumerates the real parameters. The
//! client generator cannot expand that into separate arguments, so each
//! property is lifted into its own `in: query` parameter and the wrapper is
//! dropped.

use serde_yaml::{Mapping, Value};

use crate::document::{entry, expect_mapping, expect_str, Document, NodePath, Segment};
use crate::error::Result;
use crate::pipeline::Edit;

/// Rules for turning one wrapped property into a parameter schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropertyPolicy {
    /// Keep `items` alongside `type: array`.
    pub array_items: bool,
    /// Copy `enum` when the property has one.
    pub enums: bool,
    /// Copy `oneOf` verbatim instead of reading `type`.
    pub one_of: bool,
    /// Parameter names that get `required: true`.
    pub required: &'static [&'static str],
}

/// Replace the wrapped parameter of one operation by flat query parameters.
#[derive(Debug, Clone)]
pub struct UnwrapParameters {
    name: &'static str,
    path: &'static str,
    method: &'static str,
    index: usize,
    policy: PropertyPolicy,
}

impl UnwrapParameters {
    pub fn new(
        name: &'static str,
        path: &'static str,
        method: &'static str,
        index: usize,
        policy: PropertyPolicy,
    ) -> Self {
        Self {
            name,
            path,
            method,
            index,
            policy,
        }
    }

    /// `GET /collections/{collectionName}/documents/search`.
    pub fn search() -> Self {
        Self::new(
            "search",
            "/collections/{collectionName}/documents/search",
            "get",
            1,
            PropertyPolicy {
                array_items: true,
                one_of: true,
                required: &["q", "query_by"],
                ..PropertyPolicy::default()
            },
        )
    }

    /// `POST /collections/{collectionName}/documents/import`.
    pub fn documents_import() -> Self {
        Self::new(
            "documents-import",
            "/collections/{collectionName}/documents/import",
            "post",
            1,
            PropertyPolicy {
                enums: true,
                ..PropertyPolicy::default()
            },
        )
    }

    /// `GET /collections/{collectionName}/documents/export`.
    pub fn documents_export() -> Self {
        Self::new(
            "documents-export",
            "/collections/{collectionName}/documents/export",
            "get",
            1,
            PropertyPolicy {
                array_items: true,
                ..PropertyPolicy::default()
            },
        )
    }

    /// `DELETE /collections/{collectionName}/documents`.
    pub fn documents_delete() -> Self {
        Self::new(
            "documents-delete",
            "/collections/{collectionName}/documents",
            "delete",
            1,
            PropertyPolicy::default(),
        )
    }

    fn parameters_path(&self) -> [Segment<'static>; 4] {
        [
            Segment::Key("paths"),
            Segment::Key(self.path),
            Segment::Key(self.method),
            Segment::Key("parameters"),
        ]
    }

    /// Build the flat parameter for one wrapped property.
    fn descriptor(&self, name: &str, property: &Value, path: &NodePath) -> Result<Value> {
        let property = expect_mapping(property, path)?;
        let mut schema = Mapping::new();

        match property.get("oneOf") {
            Some(one_of) if self.policy.one_of => {
                schema.insert("oneOf".into(), one_of.clone());
            }
            _ => {
                let ty = expect_str(entry(property, "type", path)?, &path.key("type"))?;
                schema.insert("type".into(), ty.into());
                if self.policy.array_items && ty == "array" {
                    if let Some(items) = property.get("items") {
                        schema.insert("items".into(), items.clone());
                    }
                }
            }
        }

        if self.policy.enums {
            if let Some(values) = property.get("enum") {
                schema.insert("enum".into(), values.clone());
            }
        }

        let mut param = Mapping::new();
        param.insert("name".into(), name.into());
        param.insert("in".into(), "query".into());
        if self.policy.required.contains(&name) {
            param.insert("required".into(), true.into());
        }
        param.insert("schema".into(), schema.into());
        Ok(param.into())
    }
}

impl Edit for UnwrapParameters {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, doc: &mut Document) -> Result<()> {
        let params_path = self.parameters_path();
        let mut wrapped = params_path.to_vec();
        wrapped.extend([
            Segment::Index(self.index),
            Segment::Key("schema"),
            Segment::Key("properties"),
        ]);

        let properties = doc.mapping(&wrapped)?;
        let properties_path = NodePath::from_segments(&wrapped);

        let mut flattened = Vec::with_capacity(properties.len());
        for (key, property) in properties {
            let name = expect_str(key, &properties_path)?;
            let descriptor = self.descriptor(name, property, &properties_path.key(name))?;
            flattened.push(descriptor);
        }

        let parameters = doc.sequence_mut(&params_path)?;
        parameters.extend(flattened);
        parameters.remove(self.index);

        tracing::debug!(
            edit = self.name,
            path = self.path,
            method = self.method,
            parameters = parameters.len(),
            "unwrapped query parameters"
        );
        Ok(())
    }
}
