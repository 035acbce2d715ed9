//! Loader-call and method-call recognizers
//!
//! Compile-time tables only — extending the registry is a table edit, not
//! new interpreter code. Two dialects are recognized: dialect A (row-major
//! subscript, e.g. pandas-style `read_csv(usecols=...)`) and dialect B
//! (expression-based, e.g. polars-style `read_csv(columns=...)`).

/// One entry in the loader registry: a recognized call path and the
/// keyword arguments that may carry column information.
pub struct LoaderEntry {
    /// Dotted call path suffix to match against, e.g. `["read_csv"]`.
    /// Matched against the tail of a resolved dotted call expression so
    /// that both `pd.read_csv(...)` and `pandas.read_csv(...)` match.
    pub path: &'static [&'static str],
    /// Keyword argument names that carry column information, tried in
    /// order; the first one present wins.
    pub column_kwargs: &'static [&'static str],
}

/// `{dialect_A.read_csv: [usecols, dtype], dialect_A.read_parquet: [columns],
///   dialect_B.read_csv: [columns, schema], dialect_B.read_parquet: [columns]}`
///
/// `read_csv` is matched regardless of dialect (`match_loader` keys on the
/// tail of the call path only), so its `column_kwargs` carries both
/// dialects' keyword names rather than splitting into two entries — the
/// first one present on a given call wins.
pub const LOADER_REGISTRY: &[LoaderEntry] = &[
    LoaderEntry {
        path: &["read_csv"],
        column_kwargs: &["usecols", "dtype", "columns", "schema"],
    },
    LoaderEntry {
        path: &["read_parquet"],
        column_kwargs: &["columns"],
    },
];

/// Look up a dotted call path's tail against the loader registry.
pub fn match_loader(path: &[&str]) -> Option<&'static LoaderEntry> {
    let tail = path.last()?;
    LOADER_REGISTRY.iter().find(|e| e.path.last() == Some(tail))
}

/// The effect a recognized method has on the fact of its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodEffect {
    /// `narrow(fact, cols)` — `select`, or a keyword/positional list arg.
    Narrow,
    /// `drop(fact, cols)`, with a warning on any name absent from the
    /// current fact.
    Drop,
    /// `rename(fact, mapping)`.
    Rename,
    /// `extend(fact, cols)` from assigned keyword names.
    Extend,
    /// Identity — row-preserving operations.
    PassThrough,
    /// Identity on the left (receiver) operand only — `merge`/`join`.
    LeftPassThrough,
}

pub struct MethodEntry {
    pub name: &'static str,
    pub effect: MethodEffect,
}

/// Method-effect table (§4.5), both dialects.
pub const METHOD_EFFECTS: &[MethodEntry] = &[
    MethodEntry {
        name: "rename",
        effect: MethodEffect::Rename,
    },
    MethodEntry {
        name: "drop",
        effect: MethodEffect::Drop,
    },
    MethodEntry {
        name: "assign",
        effect: MethodEffect::Extend,
    },
    MethodEntry {
        name: "select",
        effect: MethodEffect::Narrow,
    },
    MethodEntry {
        name: "filter",
        effect: MethodEffect::PassThrough,
    },
    MethodEntry {
        name: "query",
        effect: MethodEffect::PassThrough,
    },
    MethodEntry {
        name: "head",
        effect: MethodEffect::PassThrough,
    },
    MethodEntry {
        name: "tail",
        effect: MethodEffect::PassThrough,
    },
    MethodEntry {
        name: "sort_values",
        effect: MethodEffect::PassThrough,
    },
    MethodEntry {
        name: "dropna",
        effect: MethodEffect::PassThrough,
    },
    MethodEntry {
        name: "fillna",
        effect: MethodEffect::PassThrough,
    },
    MethodEntry {
        name: "ffill",
        effect: MethodEffect::PassThrough,
    },
    MethodEntry {
        name: "bfill",
        effect: MethodEffect::PassThrough,
    },
    MethodEntry {
        name: "reset_index",
        effect: MethodEffect::PassThrough,
    },
    MethodEntry {
        name: "merge",
        effect: MethodEffect::LeftPassThrough,
    },
    MethodEntry {
        name: "join",
        effect: MethodEffect::LeftPassThrough,
    },
];

pub fn method_effect(name: &str) -> Option<MethodEffect> {
    METHOD_EFFECTS
        .iter()
        .find(|m| m.name == name)
        .map(|m| m.effect)
}

/// Method names reserved by either dialect. A schema column whose physical
/// name collides with one of these conflicts with frame method access
/// (`df.mean` would shadow the `mean` column's attribute-style lookup).
pub const RESERVED_METHOD_NAMES: &[&str] = &[
    "mean",
    "sum",
    "filter",
    "select",
    "drop",
    "rename",
    "assign",
    "merge",
    "join",
    "query",
    "head",
    "tail",
    "sort_values",
    "dropna",
    "fillna",
    "ffill",
    "bfill",
    "reset_index",
];

pub fn is_reserved_method_name(name: &str) -> bool {
    RESERVED_METHOD_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_read_csv_regardless_of_alias() {
        assert!(match_loader(&["pd", "read_csv"]).is_some());
        assert!(match_loader(&["pandas", "read_csv"]).is_some());
        assert!(match_loader(&["pl", "read_csv"]).is_some());
    }

    #[test]
    fn unknown_call_path_is_not_a_loader() {
        assert!(match_loader(&["pd", "concat"]).is_none());
    }

    #[test]
    fn read_csv_column_kwargs_cover_both_dialects() {
        let entry = match_loader(&["pd", "read_csv"]).unwrap();
        assert!(entry.column_kwargs.contains(&"usecols"));
        assert!(entry.column_kwargs.contains(&"dtype"));
        assert!(entry.column_kwargs.contains(&"columns"));
        assert!(entry.column_kwargs.contains(&"schema"));
    }

    #[test]
    fn drop_and_rename_effects_are_distinct() {
        assert_eq!(method_effect("drop"), Some(MethodEffect::Drop));
        assert_eq!(method_effect("rename"), Some(MethodEffect::Rename));
        assert_eq!(method_effect("nonexistent"), None);
    }

    #[test]
    fn reserved_names_cover_common_aggregate_and_verb_methods() {
        assert!(is_reserved_method_name("mean"));
        assert!(is_reserved_method_name("drop"));
        assert!(!is_reserved_method_name("user_id"));
    }
}
