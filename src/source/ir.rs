//! Intermediate Representation (IR) for Python source files
//!
//! The IR layer decouples the interpreter from `rustpython-parser`'s full
//! grammar. It keeps only the node shapes the checker needs — assignment
//! targets, subscripts, attribute/call chains, literal lists and dicts,
//! and type annotations — matching the surface described in the parser
//! component's scope: module/function/class scopes, assignment targets,
//! subscript expressions, attribute accesses, calls with positional and
//! keyword arguments, list/dict literals, and annotations.

use crate::source::span::Located;

/// A parsed module: a flat sequence of top-level statements.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub body: Vec<Located<Stmt>>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Assign {
        targets: Vec<Expr>,
        value: Expr,
    },
    AnnAssign {
        target: Expr,
        annotation: Expr,
        value: Option<Expr>,
    },
    FunctionDef {
        name: String,
        params: Vec<Param>,
        returns: Option<Expr>,
        body: Vec<Located<Stmt>>,
    },
    ClassDef {
        name: String,
        bases: Vec<Expr>,
        body: Vec<Located<Stmt>>,
    },
    Import {
        names: Vec<ImportAlias>,
    },
    ImportFrom {
        module: Option<String>,
        level: usize,
        names: Vec<ImportAlias>,
    },
    If {
        test: Expr,
        body: Vec<Located<Stmt>>,
        orelse: Vec<Located<Stmt>>,
    },
    Return {
        value: Option<Expr>,
    },
    Expr {
        value: Expr,
    },
    /// A statement shape that parsed but has no IR mapping (e.g. `for`,
    /// `with`, `try`). Not an error — just not relevant to column-set
    /// tracking; the interpreter skips over it.
    Other,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ImportAlias {
    pub name: String,
    pub asname: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Name(String),
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    Subscript {
        value: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<Keyword>,
    },
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Dict(Vec<(Option<Expr>, Expr)>),
    Str(String),
    Bool(bool),
    /// Any other constant (int, float, None, bytes, ...). The literal text
    /// is not retained — the checker never needs to read it.
    OtherConstant,
    /// A comparison expression (`==`, `in`, `<`, ...) — recognized as a
    /// boolean row-filter mask when its left-hand side matches the frame
    /// under subscript.
    Compare {
        left: Box<Expr>,
    },
    BoolOp {
        values: Vec<Expr>,
    },
    UnaryOp {
        operand: Box<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Anything the IR does not model explicitly (lambdas, comprehensions,
    /// f-strings, ...). Evaluates to `Csf::Unknown` / not-a-string-literal.
    Other,
}

impl Expr {
    /// The literal string value, if this expression is a string constant.
    pub fn as_str_literal(&self) -> Option<&str> {
        match self {
            Expr::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The flat list of string literals, if this expression is a list (or
    /// tuple) literal of only string constants. A list containing any
    /// non-string element returns `None` — the interpreter treats it as
    /// opaque rather than silently skipping elements.
    pub fn as_str_list(&self) -> Option<Vec<&str>> {
        let items = match self {
            Expr::List(items) | Expr::Tuple(items) => items,
            _ => return None,
        };
        items.iter().map(Expr::as_str_literal).collect()
    }

    /// The flat name path of a dotted attribute chain, e.g. `pd.read_csv`
    /// becomes `["pd", "read_csv"]`. Returns `None` if any segment along
    /// the chain is not a plain name/attribute access.
    pub fn as_dotted_path(&self) -> Option<Vec<&str>> {
        match self {
            Expr::Name(n) => Some(vec![n.as_str()]),
            Expr::Attribute { value, attr } => {
                let mut path = value.as_dotted_path()?;
                path.push(attr.as_str());
                Some(path)
            }
            _ => None,
        }
    }

    /// `true` if this expression syntactically looks like a boolean mask:
    /// a comparison, boolean combinator, or unary `not`. Conservative per
    /// design — list/string literals are never mistaken for a mask.
    pub fn looks_boolean(&self) -> bool {
        matches!(self, Expr::Compare { .. } | Expr::BoolOp { .. } | Expr::UnaryOp { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Keyword {
    /// `None` for `**kwargs` expansion.
    pub name: Option<String>,
    pub value: Expr,
}
