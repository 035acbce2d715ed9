//! Orchestration: the two public entry points named in spec §6, consumed
//! directly by `main.rs` and (feature `python`) by `pyffi`.

use std::path::Path;

use thiserror::Error;

use crate::config::Config;
use crate::diagnostics::{sort_diagnostics, Code, Diagnostic, Severity};
use crate::index::{self, ProjectIndex};
use crate::interpreter;
use crate::schema;
use crate::source::parse_source;
use crate::source::span::Span;
use crate::suppress::parse_suppressions;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("path does not exist: {0}")]
    RootNotFound(String),
}

/// Run C1+C5 on a single file. `index_bytes`, if present and `config`
/// enables index use, is deserialized for cross-file resolution; a decode
/// failure or version mismatch degrades to no index plus one informational
/// diagnostic — it never fails the whole call (spec §4.3).
pub fn check_file(path: &Path, index_bytes: Option<&[u8]>, config: &Config) -> Vec<Diagnostic> {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            return vec![Diagnostic::new(
                path.to_path_buf(),
                Span::START,
                Code::Internal,
                format!("could not read file: {e}"),
            )];
        }
    };

    let outcome = parse_source(&source);
    let mut diagnostics = Vec::new();
    if let Some(err) = &outcome.error {
        diagnostics.push(Diagnostic::new(
            path.to_path_buf(),
            Span::START,
            Code::Internal,
            format!("parse error: {err}"),
        ));
    }

    let extracted = schema::extract(&outcome.module);
    for conflict in &extracted.reserved_conflicts {
        diagnostics.push(Diagnostic::new(
            path.to_path_buf(),
            conflict.span,
            Code::ReservedMethodName,
            format!(
                "column '{}' on schema '{}' collides with a frame method name",
                conflict.column_name, conflict.schema_name
            ),
        ));
    }

    let index = if config.analysis.use_index {
        decode_index(index_bytes, path, &mut diagnostics)
    } else {
        None
    };

    let rel_path = to_forward_slash(path);
    diagnostics.extend(interpreter::check_module(
        path,
        &rel_path,
        &outcome.module,
        &extracted.schemas,
        index.as_ref(),
        config,
    ));

    let suppressions = parse_suppressions(&source);
    diagnostics.retain(|d| !suppressions.is_suppressed(d.line, d.code.as_str()));

    if config.analysis.no_warnings {
        diagnostics.retain(|d| d.severity != Severity::Warning);
    }
    if !config.rules.disabled.is_empty() {
        diagnostics.retain(|d| !config.rules.disabled.iter().any(|c| c.as_str() == d.code.as_str()));
    }

    sort_diagnostics(&mut diagnostics);
    diagnostics
}

fn decode_index(bytes: Option<&[u8]>, path: &Path, diagnostics: &mut Vec<Diagnostic>) -> Option<ProjectIndex> {
    let bytes = bytes?;
    match ProjectIndex::from_bytes(bytes) {
        Ok(idx) if idx.version_matches() => Some(idx),
        Ok(_) => {
            diagnostics.push(Diagnostic::new(
                path.to_path_buf(),
                Span::START,
                Code::Internal,
                "project index version mismatch; cross-file resolution disabled for this run".to_string(),
            ));
            None
        }
        Err(e) => {
            diagnostics.push(Diagnostic::new(
                path.to_path_buf(),
                Span::START,
                Code::Internal,
                format!("could not decode project index: {e}"),
            ));
            None
        }
    }
}

/// Run C1+C2+C3 over `root` and return the opaque, versioned index buffer.
pub fn build_project_index(root: &Path, _config: &Config) -> Result<Vec<u8>, PipelineError> {
    if !root.exists() {
        return Err(PipelineError::RootNotFound(root.display().to_string()));
    }
    let (idx, _build_diagnostics) = index::build(root);
    idx.to_bytes()
        .map_err(|_| PipelineError::RootNotFound(root.display().to_string()))
}

fn to_forward_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn check_file_reports_internal_on_missing_file() {
        let config = Config::default();
        let diags = check_file(Path::new("/nonexistent/does-not-exist.py"), None, &config);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, Code::Internal);
    }

    #[test]
    fn check_file_flags_unknown_column() {
        let mut file = tempfile::NamedTempFile::with_suffix(".py").unwrap();
        writeln!(file, "df = pd.read_csv(\"x.csv\", usecols=[\"a\"])\n_ = df[\"z\"]").unwrap();
        let config = Config::default();
        let diags = check_file(file.path(), None, &config);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, Code::UnknownColumn);
    }

    #[test]
    fn build_project_index_fails_on_missing_root() {
        let config = Config::default();
        let err = build_project_index(Path::new("/nonexistent/root"), &config);
        assert!(err.is_err());
    }
}
