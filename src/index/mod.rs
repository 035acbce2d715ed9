//! Project index builder + wire format (C3)
//!
//! Walks a project root, extracts every schema and exported-function
//! signature, and assembles a serializable index used for cross-file
//! lookups during interpretation.

pub mod linearize;
pub mod walk;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Code, Diagnostic};
use crate::schema;
use crate::source::parse_source;
use crate::source::span::Span;

/// Bumped whenever the wire format's shape changes. A mismatch on load is
/// informational, never a hard failure — cross-file resolution just
/// degrades to `Unknown` for that run.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectIndex {
    pub version: u32,
    pub files: BTreeMap<String, FileEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileEntry {
    /// Linearized column list per schema declared in this file, keyed by
    /// schema name.
    pub schemas: BTreeMap<String, Vec<String>>,
    /// Exported function signatures: function name -> schema name of its
    /// recognized `Frame[Schema]`/`Annotated[FrameType, Schema]` return.
    pub functions: BTreeMap<String, String>,
}

impl ProjectIndex {
    pub fn new() -> Self {
        Self {
            version: CURRENT_VERSION,
            files: BTreeMap::new(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Parse a previously-built index. A version mismatch does not fail —
    /// callers should treat the returned index as usable but degraded, and
    /// surface `diagnostics::Code::Internal` once per run if desired.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn version_matches(&self) -> bool {
        self.version == CURRENT_VERSION
    }

    /// Look up a schema's linearized columns by `relative_path::schema_name`.
    pub fn lookup_schema(&self, rel_path: &str, schema_name: &str) -> Option<&[String]> {
        self.files
            .get(rel_path)?
            .schemas
            .get(schema_name)
            .map(Vec::as_slice)
    }

    /// Look up an exported function's declared return schema.
    pub fn lookup_function_schema(&self, rel_path: &str, function_name: &str) -> Option<&str> {
        self.files
            .get(rel_path)?
            .functions
            .get(function_name)
            .map(String::as_str)
    }
}

impl Default for ProjectIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a project index by walking `root` for `*.py` files, extracting
/// schemas from each, and linearizing inheritance. Returns the index plus
/// any diagnostics raised along the way (parse failures, schema conflicts).
pub fn build(root: &Path) -> (ProjectIndex, Vec<Diagnostic>) {
    let mut index = ProjectIndex::new();
    let mut diagnostics = Vec::new();

    let files = walk::discover_python_files(root);
    let mut per_file_schemas = Vec::new();

    for rel_path in &files {
        let abs_path = root.join(rel_path);
        let source = match std::fs::read_to_string(&abs_path) {
            Ok(s) => s,
            Err(e) => {
                diagnostics.push(Diagnostic::new(
                    abs_path.clone(),
                    Span::START,
                    Code::Internal,
                    format!("could not read file: {e}"),
                ));
                continue;
            }
        };

        let outcome = parse_source(&source);
        if let Some(err) = &outcome.error {
            diagnostics.push(Diagnostic::new(
                abs_path.clone(),
                Span::START,
                Code::Internal,
                format!("parse error: {err}"),
            ));
        }

        let extracted = schema::extract(&outcome.module);
        for conflict in &extracted.reserved_conflicts {
            diagnostics.push(Diagnostic::new(
                abs_path.clone(),
                conflict.span,
                Code::ReservedMethodName,
                format!(
                    "column '{}' on schema '{}' collides with a frame method name",
                    conflict.column_name, conflict.schema_name
                ),
            ));
        }

        let functions = walk::exported_function_schemas(&outcome.module, &extracted.schemas);
        per_file_schemas.push((rel_path.clone(), abs_path.clone(), extracted.schemas, functions));
    }

    for (rel_path, abs_path, schemas, functions) in &per_file_schemas {
        let (linearized, conflicts) = linearize::linearize_file_schemas(schemas);
        for conflict in conflicts {
            diagnostics.push(Diagnostic::new(
                abs_path.clone(),
                conflict.span,
                Code::SchemaConflict,
                conflict.message,
            ));
        }
        index.files.insert(
            rel_path.clone(),
            FileEntry {
                schemas: linearized,
                functions: functions.clone(),
            },
        );
    }

    (index, diagnostics)
}
