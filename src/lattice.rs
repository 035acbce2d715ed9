//! Column-set lattice
//!
//! A minimal meet-semilattice with `Unknown` as top and `Error` as bottom.
//! `Csf` (column set fact) is the per-variable belief the interpreter
//! attaches to a binding. The only operations performed on it are `narrow`,
//! `drop`, `rename`, `extend`, and `members` — no join across control flow
//! is required since the interpreter is linear over statements.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Where an `Inferred` column list came from, for diagnostics and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    /// A loader call's `usecols=`/`columns=`/`schema=` keyword argument.
    Loader,
    /// A subscript with a list literal of strings.
    Subscript,
    /// A method call that narrows, drops, renames, or extends the set.
    MethodCall,
}

/// Column set fact. One of four variants — no partial/mixed state exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Csf {
    /// A named schema with a known ordered column list.
    Schema { name: String, columns: Vec<String> },
    /// An unnamed, concrete ordered set of columns derived from a literal.
    Inferred { columns: Vec<String>, origin: Origin },
    /// Column set not known at lint time. Further operations produce no
    /// diagnostics and propagate `Unknown`.
    Unknown,
    /// A prior operation invalidated the fact. No diagnostics chain off it.
    Error,
}

impl Csf {
    pub fn schema(name: impl Into<String>, columns: Vec<String>) -> Self {
        Csf::Schema {
            name: name.into(),
            columns,
        }
    }

    pub fn inferred(columns: Vec<String>, origin: Origin) -> Self {
        Csf::Inferred { columns, origin }
    }

    /// Enumerate known column names, or `None` for `Unknown`/`Error`.
    ///
    /// Order is retained for deterministic output; duplicates are not
    /// collapsed here (a schema or literal may legitimately repeat a name).
    pub fn members(&self) -> Option<&[String]> {
        match self {
            Csf::Schema { columns, .. } => Some(columns),
            Csf::Inferred { columns, .. } => Some(columns),
            Csf::Unknown | Csf::Error => None,
        }
    }

    /// Whether `name` is a known column of this fact. `Unknown`/`Error`
    /// never report membership either way — callers must check `members`
    /// first and treat `None` specially.
    pub fn contains(&self, name: &str) -> bool {
        self.members()
            .is_some_and(|cols| cols.iter().any(|c| c == name))
    }

    /// Restrict to a column subset.
    ///
    /// `Schema` becomes `Inferred` of the subset; `Inferred` becomes
    /// `Inferred` of the intersection with `cols`, preserving `cols`' order;
    /// `Unknown` stays `Unknown`; `Error` stays `Error`.
    pub fn narrow(&self, cols: &[String]) -> Csf {
        match self {
            Csf::Schema { .. } | Csf::Inferred { .. } => {
                let known = self.members().unwrap_or(&[]);
                let kept: Vec<String> = cols
                    .iter()
                    .filter(|c| known.iter().any(|k| &k == c))
                    .cloned()
                    .collect();
                Csf::inferred(kept, Origin::Subscript)
            }
            Csf::Unknown => Csf::Unknown,
            Csf::Error => Csf::Error,
        }
    }

    /// Remove named columns.
    pub fn drop(&self, cols: &[String]) -> Csf {
        match self {
            Csf::Schema { columns, .. } | Csf::Inferred { columns, .. } => {
                let remaining: Vec<String> = columns
                    .iter()
                    .filter(|c| !cols.iter().any(|d| &d == c))
                    .cloned()
                    .collect();
                Csf::inferred(remaining, Origin::MethodCall)
            }
            Csf::Unknown => Csf::Unknown,
            Csf::Error => Csf::Error,
        }
    }

    /// Substitute names according to `mapping` (old name → new name).
    /// Names not present in `mapping` pass through unchanged.
    pub fn rename(&self, mapping: &[(String, String)]) -> Csf {
        match self {
            Csf::Schema { columns, .. } | Csf::Inferred { columns, .. } => {
                let renamed: Vec<String> = columns
                    .iter()
                    .map(|c| {
                        mapping
                            .iter()
                            .find(|(old, _)| old == c)
                            .map(|(_, new)| new.clone())
                            .unwrap_or_else(|| c.clone())
                    })
                    .collect();
                Csf::inferred(renamed, Origin::MethodCall)
            }
            Csf::Unknown => Csf::Unknown,
            Csf::Error => Csf::Error,
        }
    }

    /// Add new columns. `Unknown` stays `Unknown`.
    pub fn extend(&self, cols: &[String]) -> Csf {
        match self {
            Csf::Schema { columns, .. } | Csf::Inferred { columns, .. } => {
                let mut merged = columns.clone();
                for c in cols {
                    if !merged.iter().any(|m| m == c) {
                        merged.push(c.clone());
                    }
                }
                Csf::inferred(merged, Origin::MethodCall)
            }
            Csf::Unknown => Csf::Unknown,
            Csf::Error => Csf::Error,
        }
    }

    /// Pass-through: used for row-filters, row-preserving method chains,
    /// and the left operand of `merge`/`join`. Not a lattice operation in
    /// its own right — it is the identity, kept here for call-site clarity.
    pub fn pass_through(&self) -> Csf {
        self.clone()
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Csf::Unknown)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Csf::Error)
    }
}

/// Set-equality helper for the property tests below: `Inferred`/`Schema`
/// compare by member set, ignoring order and duplicates.
pub fn member_set(fact: &Csf) -> Option<BTreeSet<&str>> {
    fact.members().map(|m| m.iter().map(String::as_str).collect())
}
