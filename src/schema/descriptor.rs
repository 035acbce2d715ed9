//! Schema descriptor: the extracted shape of one `BaseSchema` subclass.

use crate::source::span::Span;

/// A single `Column`/`ColumnSet` declaration, reduced to what the checker
/// needs: the physical column name and (if literal) its declared type.
///
/// These are file-local extraction results, not part of the serialized
/// project index — the index only needs the linearized column list (see
/// `index::ProjectIndex`), so no `Serialize`/`Deserialize` here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDecl {
    pub physical_name: String,
    /// The `type=` keyword argument's literal spelling (e.g. `"int"`,
    /// `"str"`), if it was a plain name/attribute expression. `None` when
    /// the type could not be read as a literal — treated as `Unknown`,
    /// never a hard failure, per the extractor's tolerance rule.
    pub declared_type: Option<String>,
}

/// `{name, columns, parents, aliases, allow_extra}` from §3, plus the span
/// of the class declaration (diagnostics for reserved-name conflicts
/// anchor here).
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    pub name: String,
    /// Base class names as written in the source — same-file transitive
    /// parents are linearized by the extractor; cross-file parents are
    /// resolved later, during project-index linearization.
    pub parents: Vec<String>,
    pub own_columns: Vec<ColumnDecl>,
    pub allow_extra_columns: bool,
    pub span: Span,
}

impl SchemaDescriptor {
    /// Own column names only, in declaration order. Linearization across
    /// parents is performed by the index builder (C3), not here — a
    /// single-file descriptor cannot see cross-file parents.
    pub fn own_column_names(&self) -> Vec<String> {
        self.own_columns
            .iter()
            .map(|c| c.physical_name.clone())
            .collect()
    }
}
