//! Documentation generator for `docs/rules.md`.
//!
//! Feature-gated behind `--features docgen`. Reads code metadata from
//! [`Code`] and per-code content from `docs/examples/`, renders them
//! through a minijinja template, and exposes an insta snapshot test that
//! fails when the generated output drifts.

use std::path::Path;

use minijinja::Environment;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::diagnostics::{Code, Severity};

/// Error type for documentation generation.
#[derive(Debug, thiserror::Error)]
pub enum DocgenError {
    /// Template rendering failed.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    /// I/O error reading example files or templates.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level context passed to the template.
#[derive(Debug, Serialize)]
pub struct DocsContext {
    /// Total number of codes (for the intro line).
    pub code_count: usize,
    /// Codes grouped by severity, in display order (errors, then warnings).
    pub groups: Vec<SeverityGroup>,
    /// Flat list of all codes (for the quick-reference table).
    pub all_codes: Vec<CodeEntry>,
}

/// All codes sharing one severity.
#[derive(Debug, Serialize)]
pub struct SeverityGroup {
    /// Heading text (e.g. "Errors").
    pub heading: String,
    /// Codes in this group.
    pub codes: Vec<CodeEntry>,
}

/// A single diagnostic code entry.
#[derive(Debug, Serialize)]
pub struct CodeEntry {
    /// Wire code (e.g. "unknown-column").
    pub id: String,
    /// Anchor for Jekyll — identical to `id`, codes are already kebab-case.
    pub anchor: String,
    /// Title-case severity (e.g. "Error").
    pub severity: String,
    /// Full body content (markdown with examples inline).
    pub body: String,
}

const GROUP_HEADINGS: &[(Severity, &str)] = &[
    (Severity::Error, "Errors"),
    (Severity::Warning, "Warnings"),
];

/// Build the template context from every [`Code`] variant and the example
/// files on disk.
///
/// `examples_dir` should point to `docs/examples/` relative to the project
/// root.
pub fn build_context(examples_dir: &Path) -> Result<DocsContext, DocgenError> {
    let mut all_codes = Vec::new();

    for code in Code::iter() {
        let id = code.as_str().to_string();
        let anchor = id.clone();

        let body_path = examples_dir.join(format!("{anchor}_body.md"));
        let body = std::fs::read_to_string(&body_path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "missing body file for {id} — create {path}\n(original error: {e})",
                    path = body_path.display(),
                ),
            )
        })?;

        all_codes.push(CodeEntry {
            id,
            anchor,
            severity: title_case(code.severity()).to_string(),
            body: body.trim_end().to_string(),
        });
    }

    let mut groups = Vec::new();
    for (severity, heading) in GROUP_HEADINGS {
        let codes: Vec<CodeEntry> = all_codes
            .iter()
            .filter(|c| c.severity == title_case(*severity))
            .map(|c| CodeEntry {
                id: c.id.clone(),
                anchor: c.anchor.clone(),
                severity: c.severity.clone(),
                body: c.body.clone(),
            })
            .collect();

        if !codes.is_empty() {
            groups.push(SeverityGroup { heading: heading.to_string(), codes });
        }
    }

    Ok(DocsContext { code_count: all_codes.len(), groups, all_codes })
}

fn title_case(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "Error",
        Severity::Warning => "Warning",
    }
}

/// Render the docs context through the template.
pub fn render(context: &DocsContext, template_path: &Path) -> Result<String, DocgenError> {
    let template_source = std::fs::read_to_string(template_path)?;

    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template("rules.md.j2", &template_source)?;

    let tmpl = env.get_template("rules.md.j2")?;
    let rendered = tmpl.render(context)?;

    Ok(rendered)
}
