//! Python source parsing and AST view
//!
//! Wraps `rustpython-parser` (the full grammar) and lowers its tree into a
//! narrow internal IR carrying only the shapes the checker needs.

pub mod ir;
pub(crate) mod parse;
pub mod span;

pub use ir::{Expr, ImportAlias, Keyword, Module, Param, Stmt};
pub use parse::{ParseOutcome, parse_source};
pub use span::{LineIndex, Located, Span};
