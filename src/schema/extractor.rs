//! Schema extractor (C2)
//!
//! Walks class declarations whose base resolves to the schema base-name
//! and builds one [`SchemaDescriptor`] per class. Unresolved or computed
//! values degrade to `Unknown`/absent rather than being rejected — this
//! extractor never fails a file.

use crate::recognizers;
use crate::schema::descriptor::{ColumnDecl, SchemaDescriptor};
use crate::source::ir::{Expr, Module, Stmt};
use crate::source::span::{Located, Span};

/// The base class name that marks a class as a frame schema.
pub const SCHEMA_BASE_NAME: &str = "BaseSchema";

/// A reserved-name conflict found while extracting schema columns: the
/// schema, the offending physical column name, and the site to anchor a
/// `reserved-method-name` diagnostic on.
pub struct ReservedNameConflict {
    pub schema_name: String,
    pub column_name: String,
    pub span: Span,
}

pub struct ExtractResult {
    pub schemas: Vec<SchemaDescriptor>,
    pub reserved_conflicts: Vec<ReservedNameConflict>,
}

/// Extract every schema descriptor declared at module or class scope in
/// `module`. Same-file classes inheriting from an already-extracted
/// schema are recognized transitively by iterating to a fixed point;
/// classes inheriting from an unresolved (likely cross-file) name still
/// produce a descriptor — their parent is just left unresolved for the
/// index builder to linearize later.
pub fn extract(module: &Module) -> ExtractResult {
    let class_defs = collect_class_defs(&module.body);
    let known_names: std::collections::HashSet<&str> =
        class_defs.iter().map(|c| c.0.as_str()).collect();

    let mut schemas = Vec::new();
    let mut reserved_conflicts = Vec::new();

    for (name, bases, body, span) in &class_defs {
        let base_names: Vec<String> = bases
            .iter()
            .filter_map(|b| b.as_dotted_path())
            .map(|p| p.join("."))
            .collect();

        let is_schema = base_names.iter().any(|b| {
            b == SCHEMA_BASE_NAME || known_names.contains(b.as_str())
        });
        if !is_schema {
            continue;
        }

        let (own_columns, allow_extra_columns) = extract_columns(body);

        for col in &own_columns {
            if recognizers::is_reserved_method_name(&col.physical_name) {
                reserved_conflicts.push(ReservedNameConflict {
                    schema_name: name.clone(),
                    column_name: col.physical_name.clone(),
                    span: *span,
                });
            }
        }

        schemas.push(SchemaDescriptor {
            name: name.clone(),
            parents: base_names,
            own_columns,
            allow_extra_columns,
            span: *span,
        });
    }

    ExtractResult {
        schemas,
        reserved_conflicts,
    }
}

type ClassDefInfo<'a> = (String, &'a [Expr], &'a [Located<Stmt>], Span);

fn collect_class_defs(body: &[Located<Stmt>]) -> Vec<ClassDefInfo<'_>> {
    let mut out = Vec::new();
    for stmt in body {
        if let Stmt::ClassDef { name, bases, body } = &stmt.node {
            out.push((name.clone(), bases.as_slice(), body.as_slice(), stmt.span));
        }
    }
    out
}

/// Walk class-body assignments of the form `name = Column(...)` or
/// `name = ColumnSet(...)`, returning own columns and the class's
/// `allow_extra_columns` flag (default `true`).
fn extract_columns(body: &[Located<Stmt>]) -> (Vec<ColumnDecl>, bool) {
    let mut columns = Vec::new();
    let mut allow_extra_columns = true;

    for stmt in body {
        let Stmt::Assign { targets, value } = &stmt.node else {
            continue;
        };
        let [Expr::Name(attr_name)] = targets.as_slice() else {
            continue;
        };

        if attr_name == "allow_extra_columns" {
            if let Expr::Bool(b) = value {
                allow_extra_columns = *b;
            }
            continue;
        }

        let Expr::Call { func, keywords, .. } = value else {
            continue;
        };
        let Some(callee) = func.as_dotted_path() else {
            continue;
        };
        let callee_name = *callee.last().unwrap();

        match callee_name {
            "Column" => {
                if let Some(decl) = column_decl(attr_name, keywords) {
                    columns.push(decl);
                }
            }
            "ColumnSet" => {
                columns.extend(column_set_decls(keywords));
            }
            _ => {}
        }
    }

    (columns, allow_extra_columns)
}

fn keyword_value<'a>(keywords: &'a [crate::source::ir::Keyword], name: &str) -> Option<&'a Expr> {
    keywords
        .iter()
        .find(|k| k.name.as_deref() == Some(name))
        .map(|k| &k.value)
}

/// `literal_type_name` reads `type=` as its plain spelling when it is a
/// bare name or attribute chain (`int`, `str`, `pd.Timestamp`); anything
/// else (a computed expression) degrades to `None` — never rejected.
fn literal_type_name(keywords: &[crate::source::ir::Keyword]) -> Option<String> {
    keyword_value(keywords, "type")
        .and_then(Expr::as_dotted_path)
        .map(|p| p.join("."))
}

fn column_decl(attr_name: &str, keywords: &[crate::source::ir::Keyword]) -> Option<ColumnDecl> {
    let physical_name = keyword_value(keywords, "alias")
        .and_then(Expr::as_str_literal)
        .map(str::to_string)
        .unwrap_or_else(|| attr_name.to_string());

    Some(ColumnDecl {
        physical_name,
        declared_type: literal_type_name(keywords),
    })
}

/// `ColumnSet(members=[...])` contributes one column per literal member.
/// `ColumnSet(members="pattern", regex=True)` cannot be statically
/// enumerated and contributes nothing — the analyzer never claims
/// knowledge of a regex-matched column set.
fn column_set_decls(keywords: &[crate::source::ir::Keyword]) -> Vec<ColumnDecl> {
    let is_regex = matches!(keyword_value(keywords, "regex"), Some(Expr::Bool(true)));
    if is_regex {
        return vec![];
    }

    let declared_type = literal_type_name(keywords);
    let Some(members) = keyword_value(keywords, "members") else {
        return vec![];
    };

    match members.as_str_list() {
        Some(names) => names
            .into_iter()
            .map(|n| ColumnDecl {
                physical_name: n.to_string(),
                declared_type: declared_type.clone(),
            })
            .collect(),
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_source;

    #[test]
    fn extracts_simple_schema() {
        let src = r#"
class UserData(BaseSchema):
    user_id = Column(type=int)
    email = Column(type=str)
"#;
        let module = parse_source(src).module;
        let result = extract(&module);
        assert_eq!(result.schemas.len(), 1);
        let s = &result.schemas[0];
        assert_eq!(s.name, "UserData");
        assert_eq!(s.own_column_names(), vec!["user_id", "email"]);
    }

    #[test]
    fn alias_overrides_physical_name() {
        let src = r#"
class S(BaseSchema):
    data = Column(type=str, alias="raw_data")
"#;
        let module = parse_source(src).module;
        let result = extract(&module);
        assert_eq!(result.schemas[0].own_column_names(), vec!["raw_data"]);
    }

    #[test]
    fn column_set_with_literal_members_expands() {
        let src = r#"
class S(BaseSchema):
    metrics = ColumnSet(type=float, members=["a", "b"])
"#;
        let module = parse_source(src).module;
        let result = extract(&module);
        assert_eq!(result.schemas[0].own_column_names(), vec!["a", "b"]);
    }

    #[test]
    fn column_set_with_regex_contributes_nothing() {
        let src = r#"
class S(BaseSchema):
    metrics = ColumnSet(type=float, members="metric_.*", regex=True)
"#;
        let module = parse_source(src).module;
        let result = extract(&module);
        assert!(result.schemas[0].own_column_names().is_empty());
    }

    #[test]
    fn reserved_method_name_is_flagged() {
        let src = r#"
class S(BaseSchema):
    mean = Column(type=float)
"#;
        let module = parse_source(src).module;
        let result = extract(&module);
        assert_eq!(result.reserved_conflicts.len(), 1);
        assert_eq!(result.reserved_conflicts[0].column_name, "mean");
    }

    #[test]
    fn non_schema_class_is_ignored() {
        let src = r#"
class Plain:
    user_id = Column(type=int)
"#;
        let module = parse_source(src).module;
        let result = extract(&module);
        assert!(result.schemas.is_empty());
    }

    #[test]
    fn allow_extra_columns_defaults_true_and_reads_override() {
        let src = r#"
class S(BaseSchema):
    allow_extra_columns = False
    a = Column(type=int)
"#;
        let module = parse_source(src).module;
        let result = extract(&module);
        assert!(!result.schemas[0].allow_extra_columns);
    }
}
