//! Order-preserving YAML node tree with typed accessors.
//!
//! The document is kept as a [`serde_yaml::Value`]. Mappings are
//! [`serde_yaml::Mapping`], which preserves key insertion order, so the
//! declaration order of the source file survives parsing, editing and
//! encoding. Accessors walk a list of [`Segment`]s and report a
//! [`TransformError`] naming the failing path instead of panicking.

use std::fmt;
use std::path::Path;

use serde_yaml::{Mapping, Sequence, Value};

use crate::error::{Result, TransformError};

/// One step of a path into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Mapping key.
    Key(&'a str),
    /// Sequence index.
    Index(usize),
}

/// Human-readable location of a node, used in diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(String);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Build the path obtained by following `segments` from the root.
    pub fn from_segments(segments: &[Segment<'_>]) -> Self {
        segments
            .iter()
            .fold(Self::root(), |path, segment| path.join(segment))
    }

    /// Extend this path by one segment.
    pub fn join(&self, segment: &Segment<'_>) -> Self {
        let mut out = self.0.clone();
        match segment {
            Segment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            Segment::Index(index) => {
                out.push_str(&format!("[{}]", index));
            }
        }
        Self(out)
    }

    pub fn key(&self, key: &str) -> Self {
        self.join(&Segment::Key(key))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("document root")
        } else {
            f.write_str(&self.0)
        }
    }
}

fn missing(path: &NodePath) -> TransformError {
    TransformError::MissingPath {
        path: path.to_string(),
    }
}

fn shape(path: &NodePath, expected: &'static str) -> TransformError {
    TransformError::Shape {
        path: path.to_string(),
        expected,
    }
}

/// Borrow `value` as a mapping.
pub fn expect_mapping<'a>(value: &'a Value, path: &NodePath) -> Result<&'a Mapping> {
    value.as_mapping().ok_or_else(|| shape(path, "a mapping"))
}

/// Borrow `value` as a string scalar.
pub fn expect_str<'a>(value: &'a Value, path: &NodePath) -> Result<&'a str> {
    value.as_str().ok_or_else(|| shape(path, "a string"))
}

/// Look up `key` in `map`, failing with [`TransformError::MissingPath`].
pub fn entry<'a>(map: &'a Mapping, key: &str, path: &NodePath) -> Result<&'a Value> {
    map.get(key).ok_or_else(|| missing(&path.key(key)))
}

fn walk<'a>(mut node: &'a Value, segments: &[Segment<'_>]) -> Result<&'a Value> {
    let mut path = NodePath::root();
    for segment in segments {
        let next = path.join(segment);
        node = match segment {
            Segment::Key(key) => node
                .as_mapping()
                .ok_or_else(|| shape(&path, "a mapping"))?
                .get(*key)
                .ok_or_else(|| missing(&next))?,
            Segment::Index(index) => node
                .as_sequence()
                .ok_or_else(|| shape(&path, "a sequence"))?
                .get(*index)
                .ok_or_else(|| missing(&next))?,
        };
        path = next;
    }
    Ok(node)
}

fn walk_mut<'a>(mut node: &'a mut Value, segments: &[Segment<'_>]) -> Result<&'a mut Value> {
    let mut path = NodePath::root();
    for segment in segments {
        let next = path.join(segment);
        node = match segment {
            Segment::Key(key) => node
                .as_mapping_mut()
                .ok_or_else(|| shape(&path, "a mapping"))?
                .get_mut(*key)
                .ok_or_else(|| missing(&next))?,
            Segment::Index(index) => node
                .as_sequence_mut()
                .ok_or_else(|| shape(&path, "a sequence"))?
                .get_mut(*index)
                .ok_or_else(|| missing(&next))?,
        };
        path = next;
    }
    Ok(node)
}

/// A parsed spec document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse a document from YAML (or JSON) text. The root must be a mapping.
    pub fn parse(text: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(text).map_err(TransformError::Parse)?;
        if !root.is_mapping() {
            return Err(shape(&NodePath::root(), "a mapping"));
        }
        Ok(Self { root })
    }

    /// Read and parse a document from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| TransformError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Encode the document as YAML with 2-space indentation.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.root).map_err(TransformError::Encode)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Node at `segments`.
    pub fn get(&self, segments: &[Segment<'_>]) -> Result<&Value> {
        walk(&self.root, segments)
    }

    /// Mapping at `segments`.
    pub fn mapping(&self, segments: &[Segment<'_>]) -> Result<&Mapping> {
        let node = walk(&self.root, segments)?;
        expect_mapping(node, &NodePath::from_segments(segments))
    }

    /// Mutable mapping at `segments`.
    pub fn mapping_mut(&mut self, segments: &[Segment<'_>]) -> Result<&mut Mapping> {
        let node = walk_mut(&mut self.root, segments)?;
        node.as_mapping_mut()
            .ok_or_else(|| shape(&NodePath::from_segments(segments), "a mapping"))
    }

    /// Mutable sequence at `segments`.
    pub fn sequence_mut(&mut self, segments: &[Segment<'_>]) -> Result<&mut Sequence> {
        let node = walk_mut(&mut self.root, segments)?;
        node.as_sequence_mut()
            .ok_or_else(|| shape(&NodePath::from_segments(segments), "a sequence"))
    }
}
