//! Ordered edit pipeline and the load/edit/encode/write driver.

use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::edits::{StripAdditionalProperties, UnwrapParameters};
use crate::error::{Result, TransformError};

/// A single in-place rewrite of the document.
pub trait Edit {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Apply the edit, failing if an expected path is absent.
    fn apply(&self, doc: &mut Document) -> Result<()>;
}

/// An ordered list of edits.
#[derive(Default)]
pub struct Pipeline {
    edits: Vec<Box<dyn Edit>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The edits the Typesense spec needs before client generation.
    pub fn typesense() -> Self {
        Self::new()
            .with(UnwrapParameters::search())
            .with(UnwrapParameters::documents_import())
            .with(UnwrapParameters::documents_export())
            .with(UnwrapParameters::documents_delete())
            .with(StripAdditionalProperties::search_result_hit())
    }

    /// Append an edit.
    pub fn with(mut self, edit: impl Edit + 'static) -> Self {
        self.edits.push(Box::new(edit));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.edits.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Run every edit in order, stopping at the first failure.
    pub fn apply(&self, mut doc: Document) -> Result<Document> {
        for edit in &self.edits {
            edit.apply(&mut doc).map_err(|e| TransformError::Edit {
                edit: edit.name(),
                source: Box::new(e),
            })?;
            specprep_telemetry::log_edit_applied!(edit = edit.name());
        }
        Ok(doc)
    }
}

/// Summary of a successful transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
    pub output: PathBuf,
    pub edits: usize,
    pub bytes: usize,
}

/// Load `input`, apply `pipeline`, and write the result to `output`.
///
/// `output` is only created once every edit has succeeded and the document
/// has been encoded.
pub fn transform_file(input: &Path, output: &Path, pipeline: &Pipeline) -> Result<TransformReport> {
    let doc = Document::from_file(input)?;
    tracing::info!(input = %input.display(), "loaded spec");

    let doc = pipeline.apply(doc)?;
    let yaml = doc.to_yaml()?;

    write_output(output, &yaml)?;
    specprep_telemetry::log_spec_written!(output = %output.display(), bytes = yaml.len());

    Ok(TransformReport {
        output: output.to_path_buf(),
        edits: pipeline.len(),
        bytes: yaml.len(),
    })
}

fn write_output(output: &Path, yaml: &str) -> Result<()> {
    let write_err = |source: std::io::Error| TransformError::Write {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(output, yaml).map_err(write_err)
}
