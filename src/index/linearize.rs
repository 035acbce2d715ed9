//! Left-to-right parent linearization of same-file schema inheritance.
//!
//! For each schema: compute columns by linearizing parents left-to-right
//! (a parent's own linearization, recursively), then append own columns;
//! on duplicate physical name, the later declaration wins. Two parents
//! that independently declare the same physical column with different
//! declared types is a `schema-conflict`, raised here since it can only be
//! seen once both parents are linearized together.

use std::collections::BTreeMap;

use crate::schema::{ColumnDecl, SchemaDescriptor};
use crate::source::span::Span;

pub struct Conflict {
    pub message: String,
    pub span: Span,
}

/// Linearize every schema declared in one file. Cross-file parents (names
/// not found among `schemas`) are silently skipped here — they contribute
/// no columns to this pass; a complete cross-file linearization is out of
/// scope for the index builder, which only needs per-file declarations to
/// resolve same-file lookups and schema-literal subscripts.
pub fn linearize_file_schemas(
    schemas: &[SchemaDescriptor],
) -> (BTreeMap<String, Vec<String>>, Vec<Conflict>) {
    let by_name: BTreeMap<&str, &SchemaDescriptor> =
        schemas.iter().map(|s| (s.name.as_str(), s)).collect();

    let mut conflicts = Vec::new();
    let mut memo: BTreeMap<String, Vec<ColumnDecl>> = BTreeMap::new();
    let mut result = BTreeMap::new();

    for schema in schemas {
        let decls = linearize_one(schema, &by_name, &mut memo, &mut conflicts, &mut Vec::new());
        result.insert(
            schema.name.clone(),
            decls.iter().map(|c| c.physical_name.clone()).collect(),
        );
    }

    (result, conflicts)
}

fn linearize_one<'a>(
    schema: &'a SchemaDescriptor,
    by_name: &BTreeMap<&str, &'a SchemaDescriptor>,
    memo: &mut BTreeMap<String, Vec<ColumnDecl>>,
    conflicts: &mut Vec<Conflict>,
    visiting: &mut Vec<String>,
) -> Vec<ColumnDecl> {
    if let Some(cached) = memo.get(&schema.name) {
        return cached.clone();
    }
    if visiting.contains(&schema.name) {
        // Inheritance cycle: treat as no inherited columns rather than
        // recursing forever. A cycle among schema declarations is not a
        // shape this analyzer can occur in practice, but must not hang.
        return schema.own_columns.clone();
    }
    visiting.push(schema.name.clone());

    let mut merged: BTreeMap<String, ColumnDecl> = BTreeMap::new();
    let mut order: Vec<String> = Vec::new();

    for parent_name in &schema.parents {
        let Some(parent) = by_name.get(parent_name.as_str()) else {
            continue;
        };
        let parent_cols = linearize_one(parent, by_name, memo, conflicts, visiting);
        for col in parent_cols {
            if let Some(existing) = merged.get(&col.physical_name) {
                if existing.declared_type.is_some()
                    && col.declared_type.is_some()
                    && existing.declared_type != col.declared_type
                {
                    conflicts.push(Conflict {
                        message: format!(
                            "schema '{}' inherits column '{}' with conflicting types from multiple parents",
                            schema.name, col.physical_name
                        ),
                        span: schema.span,
                    });
                }
            } else {
                order.push(col.physical_name.clone());
            }
            merged.insert(col.physical_name.clone(), col);
        }
    }

    for col in &schema.own_columns {
        if !merged.contains_key(&col.physical_name) {
            order.push(col.physical_name.clone());
        }
        merged.insert(col.physical_name.clone(), col.clone());
    }

    let result: Vec<ColumnDecl> = order
        .into_iter()
        .map(|name| merged.get(&name).cloned().unwrap())
        .collect();

    visiting.pop();
    memo.insert(schema.name.clone(), result.clone());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::span::Span;

    fn col(name: &str, ty: Option<&str>) -> ColumnDecl {
        ColumnDecl {
            physical_name: name.to_string(),
            declared_type: ty.map(str::to_string),
        }
    }

    fn schema(name: &str, parents: &[&str], own: Vec<ColumnDecl>) -> SchemaDescriptor {
        SchemaDescriptor {
            name: name.to_string(),
            parents: parents.iter().map(|s| s.to_string()).collect(),
            own_columns: own,
            allow_extra_columns: true,
            span: Span::START,
        }
    }

    #[test]
    fn single_parent_columns_come_before_own() {
        let parent = schema("P", &[], vec![col("a", Some("int"))]);
        let child = schema("C", &["P"], vec![col("b", Some("str"))]);
        let (result, conflicts) = linearize_file_schemas(&[parent, child]);
        assert!(conflicts.is_empty());
        assert_eq!(result["C"], vec!["a", "b"]);
    }

    #[test]
    fn later_declaration_wins_on_name_collision() {
        let p1 = schema("P1", &[], vec![col("a", Some("int"))]);
        let p2 = schema("P2", &[], vec![col("a", Some("int"))]);
        let child = schema("C", &["P1", "P2"], vec![col("a", Some("str"))]);
        let (result, _) = linearize_file_schemas(&[p1, p2, child]);
        assert_eq!(result["C"], vec!["a"]);
    }

    #[test]
    fn conflicting_parent_types_flagged() {
        let p1 = schema("P1", &[], vec![col("a", Some("int"))]);
        let p2 = schema("P2", &[], vec![col("a", Some("str"))]);
        let child = schema("C", &["P1", "P2"], vec![]);
        let (_, conflicts) = linearize_file_schemas(&[p1, p2, child]);
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn transitive_same_file_parent_is_linearized() {
        let grandparent = schema("GP", &[], vec![col("a", None)]);
        let parent = schema("P", &["GP"], vec![col("b", None)]);
        let child = schema("C", &["P"], vec![col("c", None)]);
        let (result, _) = linearize_file_schemas(&[grandparent, parent, child]);
        assert_eq!(result["C"], vec!["a", "b", "c"]);
    }
}
