//! Diagnostic renderers: `text`, `json`, `github`.
//!
//! `json` is the wire format `check_file` returns to the Python caller
//! (spec §6); `text` and `github` back the standalone CLI.

use crate::diagnostics::{Diagnostic, Severity};

pub fn text(diags: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diags {
        let sev = match d.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        out.push_str(&format!(
            "{}:{}:{}: {}: {} [{}]\n",
            d.file.display(),
            d.line,
            d.col,
            sev,
            d.message,
            d.code
        ));
        if let Some(s) = &d.suggestion {
            out.push_str(&format!("  suggestion: {s}\n"));
        }
    }
    out
}

pub fn json(diags: &[Diagnostic]) -> Result<String, serde_json::Error> {
    serde_json::to_string(diags)
}

/// GitHub Actions workflow-command annotations, one per diagnostic.
pub fn github(diags: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diags {
        let level = match d.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        let file = d.file.to_string_lossy().replace('\\', "/");
        let message = d.message.replace('%', "%25").replace('\n', "%0A").replace('\r', "%0D");
        out.push_str(&format!(
            "::{} file={},line={},col={}::{} [{}]\n",
            level, file, d.line, d.col, message, d.code
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Code;
    use crate::source::span::Span;
    use std::path::PathBuf;

    fn sample() -> Vec<Diagnostic> {
        vec![Diagnostic::new(
            PathBuf::from("a.py"),
            Span { start_line: 3, start_col: 5, end_line: 3, end_col: 5 },
            Code::UnknownColumn,
            "unknown column 'foo'".to_string(),
        )
        .with_suggestion(Some("bar".to_string()))]
    }

    #[test]
    fn text_includes_code_and_suggestion() {
        let out = text(&sample());
        assert!(out.contains("a.py:3:5"));
        assert!(out.contains("[unknown-column]"));
        assert!(out.contains("suggestion: bar"));
    }

    #[test]
    fn json_round_trips_through_serde() {
        let out = json(&sample()).unwrap();
        assert!(out.contains("\"code\":\"unknown-column\""));
        assert!(out.contains("\"suggestion\":\"bar\""));
    }

    #[test]
    fn github_emits_workflow_command() {
        let out = github(&sample());
        assert!(out.starts_with("::error file=a.py,line=3,col=5::"));
    }
}
