//! Lowers a `rustpython-parser` AST into [`crate::source::ir`].
//!
//! All direct use of the `rustpython_parser` crate lives in this module —
//! the rest of the checker only ever sees [`Module`]/[`Stmt`]/[`Expr`].
//! Keeping the adapter this narrow means a future parser-crate upgrade
//! touches one file.

use rustpython_parser::ast::{self, Mod};
use rustpython_parser::{Mode, parse};

use crate::source::ir::{Expr, ImportAlias, Keyword, Module, Param, Stmt};
use crate::source::span::{LineIndex, Located, Span};

/// Result of parsing one source file.
pub struct ParseOutcome {
    pub module: Module,
    /// Set when the file failed to parse. The module is still returned
    /// (empty), matching the parser's tolerance requirement: a syntax
    /// error produces an empty AST and a single diagnostic rather than
    /// aborting the run.
    pub error: Option<String>,
}

pub fn parse_source(source: &str) -> ParseOutcome {
    let line_index = LineIndex::new(source);
    match parse(source, Mode::Module, "<module>") {
        Ok(Mod::Module(m)) => ParseOutcome {
            module: Module {
                body: lower_stmts(&m.body, &line_index),
            },
            error: None,
        },
        Ok(_) => ParseOutcome {
            module: Module::default(),
            error: Some("unexpected top-level parse mode".to_string()),
        },
        Err(e) => ParseOutcome {
            module: Module::default(),
            error: Some(e.to_string()),
        },
    }
}

fn span_of(range: ast::text_size::TextRange, idx: &LineIndex) -> Span {
    idx.span(range.start().to_usize(), range.end().to_usize())
}

fn lower_stmts(stmts: &[ast::Stmt], idx: &LineIndex) -> Vec<Located<Stmt>> {
    stmts.iter().map(|s| lower_stmt(s, idx)).collect()
}

fn lower_stmt(stmt: &ast::Stmt, idx: &LineIndex) -> Located<Stmt> {
    let span = span_of(stmt.range(), idx);
    let node = match stmt {
        ast::Stmt::Assign(a) => Stmt::Assign {
            targets: a.targets.iter().map(|t| lower_expr(t, idx)).collect(),
            value: lower_expr(&a.value, idx),
        },
        ast::Stmt::AnnAssign(a) => Stmt::AnnAssign {
            target: lower_expr(&a.target, idx),
            annotation: lower_expr(&a.annotation, idx),
            value: a.value.as_ref().map(|v| lower_expr(v, idx)),
        },
        ast::Stmt::FunctionDef(f) => Stmt::FunctionDef {
            name: f.name.to_string(),
            params: lower_params(&f.args),
            returns: f.returns.as_ref().map(|r| lower_expr(r, idx)),
            body: lower_stmts(&f.body, idx),
        },
        ast::Stmt::AsyncFunctionDef(f) => Stmt::FunctionDef {
            name: f.name.to_string(),
            params: lower_params(&f.args),
            returns: f.returns.as_ref().map(|r| lower_expr(r, idx)),
            body: lower_stmts(&f.body, idx),
        },
        ast::Stmt::ClassDef(c) => Stmt::ClassDef {
            name: c.name.to_string(),
            bases: c.bases.iter().map(|b| lower_expr(b, idx)).collect(),
            body: lower_stmts(&c.body, idx),
        },
        ast::Stmt::Import(i) => Stmt::Import {
            names: i
                .names
                .iter()
                .map(|alias| ImportAlias {
                    name: alias.name.to_string(),
                    asname: alias.asname.as_ref().map(|s| s.to_string()),
                })
                .collect(),
        },
        ast::Stmt::ImportFrom(i) => Stmt::ImportFrom {
            module: i.module.as_ref().map(|m| m.to_string()),
            level: i.level.map(|l| l.to_usize()).unwrap_or(0),
            names: i
                .names
                .iter()
                .map(|alias| ImportAlias {
                    name: alias.name.to_string(),
                    asname: alias.asname.as_ref().map(|s| s.to_string()),
                })
                .collect(),
        },
        ast::Stmt::If(s) => Stmt::If {
            test: lower_expr(&s.test, idx),
            body: lower_stmts(&s.body, idx),
            orelse: lower_stmts(&s.orelse, idx),
        },
        ast::Stmt::Return(r) => Stmt::Return {
            value: r.value.as_ref().map(|v| lower_expr(v, idx)),
        },
        ast::Stmt::Expr(e) => Stmt::Expr {
            value: lower_expr(&e.value, idx),
        },
        _ => Stmt::Other,
    };
    Located { node, span }
}

fn lower_params(args: &ast::Arguments) -> Vec<Param> {
    args.args
        .iter()
        .map(|a| Param {
            name: a.def.arg.to_string(),
        })
        .collect()
}

fn lower_expr(expr: &ast::Expr, idx: &LineIndex) -> Expr {
    match expr {
        ast::Expr::Name(n) => Expr::Name(n.id.to_string()),
        ast::Expr::Attribute(a) => Expr::Attribute {
            value: Box::new(lower_expr(&a.value, idx)),
            attr: a.attr.to_string(),
        },
        ast::Expr::Subscript(s) => Expr::Subscript {
            value: Box::new(lower_expr(&s.value, idx)),
            index: Box::new(lower_expr(&s.slice, idx)),
        },
        ast::Expr::Call(c) => Expr::Call {
            func: Box::new(lower_expr(&c.func, idx)),
            args: c.args.iter().map(|a| lower_expr(a, idx)).collect(),
            keywords: c
                .keywords
                .iter()
                .map(|k| Keyword {
                    name: k.arg.as_ref().map(|a| a.to_string()),
                    value: lower_expr(&k.value, idx),
                })
                .collect(),
        },
        ast::Expr::List(l) => Expr::List(l.elts.iter().map(|e| lower_expr(e, idx)).collect()),
        ast::Expr::Tuple(t) => Expr::Tuple(t.elts.iter().map(|e| lower_expr(e, idx)).collect()),
        ast::Expr::Dict(d) => Expr::Dict(
            d.keys
                .iter()
                .zip(d.values.iter())
                .map(|(k, v)| (k.as_ref().map(|k| lower_expr(k, idx)), lower_expr(v, idx)))
                .collect(),
        ),
        ast::Expr::Constant(c) => match &c.value {
            ast::Constant::Str(s) => Expr::Str(s.to_string()),
            ast::Constant::Bool(b) => Expr::Bool(*b),
            _ => Expr::OtherConstant,
        },
        ast::Expr::Compare(c) => Expr::Compare {
            left: Box::new(lower_expr(&c.left, idx)),
        },
        ast::Expr::BoolOp(b) => Expr::BoolOp {
            values: b.values.iter().map(|v| lower_expr(v, idx)).collect(),
        },
        ast::Expr::UnaryOp(u) => Expr::UnaryOp {
            operand: Box::new(lower_expr(&u.operand, idx)),
        },
        ast::Expr::BinOp(b) => Expr::BinOp {
            left: Box::new(lower_expr(&b.left, idx)),
            right: Box::new(lower_expr(&b.right, idx)),
        },
        _ => Expr::Other,
    }
}
