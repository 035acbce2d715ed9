//! Diagnostic formatter (C7)
//!
//! Every diagnostic carries an absolute file path, a 1-based `(line, col)`,
//! a severity, a stable code, a message, and an optional suggestion.
//! Ordering is a total order on `(path, line, col, code)`.

pub mod format;
pub mod suggest;

use std::cmp::Ordering;
use std::path::PathBuf;

use serde::Serialize;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::source::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Stable diagnostic code. `Internal` is not named in the wire format's
/// user-facing code list but is emitted the same way — one diagnostic,
/// never an exception escaping the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum Code {
    #[strum(serialize = "unknown-column")]
    UnknownColumn,
    #[strum(serialize = "dropped-unknown-column")]
    DroppedUnknownColumn,
    #[strum(serialize = "untracked-dataframe")]
    UntrackedDataframe,
    #[strum(serialize = "reserved-method-name")]
    ReservedMethodName,
    #[strum(serialize = "schema-conflict")]
    SchemaConflict,
    #[strum(serialize = "internal")]
    Internal,
}

impl Code {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// The code's fixed severity. Every code in this analyzer has exactly
    /// one severity — none are configurable per spec §7.
    pub fn severity(&self) -> Severity {
        match self {
            Code::UnknownColumn | Code::ReservedMethodName | Code::SchemaConflict => {
                Severity::Error
            }
            Code::DroppedUnknownColumn | Code::UntrackedDataframe => Severity::Warning,
            Code::Internal => Severity::Warning,
        }
    }
}

impl Serialize for Code {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    #[serde(serialize_with = "serialize_path_forward_slash")]
    pub file: PathBuf,
    pub line: usize,
    pub col: usize,
    pub severity: Severity,
    pub code: Code,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

fn serialize_path_forward_slash<S: serde::Serializer>(
    path: &PathBuf,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_str(&path.to_string_lossy().replace('\\', "/"))
}

impl Diagnostic {
    pub fn new(file: PathBuf, span: Span, code: Code, message: String) -> Self {
        Self {
            file,
            line: span.start_line,
            col: span.start_col,
            severity: code.severity(),
            code,
            message,
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }

    /// Sort key for the total order on `(path, line, col, code)` required
    /// by §4.7 / §8 property 6.
    fn sort_key(&self) -> (&str, usize, usize, &'static str) {
        (
            self.file.to_str().unwrap_or(""),
            self.line,
            self.col,
            self.code.as_str(),
        )
    }
}

/// Sort diagnostics into the stable total order the spec requires.
pub fn sort_diagnostics(diags: &mut [Diagnostic]) {
    diags.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()).then(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(file: &str, line: usize, col: usize, code: Code) -> Diagnostic {
        Diagnostic::new(PathBuf::from(file), Span { start_line: line, start_col: col, end_line: line, end_col: col }, code, "msg".to_string())
    }

    #[test]
    fn sorts_by_path_then_line_then_col_then_code() {
        let mut diags = vec![
            diag("b.py", 1, 1, Code::UnknownColumn),
            diag("a.py", 2, 1, Code::UnknownColumn),
            diag("a.py", 1, 5, Code::UnknownColumn),
            diag("a.py", 1, 1, Code::ReservedMethodName),
            diag("a.py", 1, 1, Code::DroppedUnknownColumn),
        ];
        sort_diagnostics(&mut diags);
        let order: Vec<(&str, usize, usize, &str)> = diags
            .iter()
            .map(|d| (d.file.to_str().unwrap(), d.line, d.col, d.code.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a.py", 1, 1, "dropped-unknown-column"),
                ("a.py", 1, 1, "reserved-method-name"),
                ("a.py", 1, 5, "unknown-column"),
                ("a.py", 2, 1, "unknown-column"),
                ("b.py", 1, 1, "unknown-column"),
            ]
        );
    }

    #[test]
    fn code_severity_matches_spec() {
        assert_eq!(Code::UnknownColumn.severity(), Severity::Error);
        assert_eq!(Code::ReservedMethodName.severity(), Severity::Error);
        assert_eq!(Code::SchemaConflict.severity(), Severity::Error);
        assert_eq!(Code::DroppedUnknownColumn.severity(), Severity::Warning);
        assert_eq!(Code::UntrackedDataframe.severity(), Severity::Warning);
    }
}
