//! Abstract interpreter (C5) — the hard part.
//!
//! Single-pass, scope-structured traversal over one file's IR, maintaining
//! a stack of binding scopes and emitting diagnostics as it evaluates
//! expressions against the column-set lattice.

pub mod expr;
pub mod imports;
pub mod scope;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::diagnostics::suggest::suggest;
use crate::diagnostics::{Code, Diagnostic};
use crate::index::ProjectIndex;
use crate::lattice::{Csf, Origin};
use crate::recognizers::{self, MethodEffect};
use crate::schema::SchemaDescriptor;
use crate::source::ir::{Expr, Module, Stmt};
use crate::source::span::Span;

use scope::ScopeStack;

pub struct Interpreter<'a> {
    file: PathBuf,
    rel_path: String,
    scopes: ScopeStack,
    schema_table: BTreeMap<String, Vec<String>>,
    import_table: BTreeMap<String, (String, String)>,
    index: Option<&'a ProjectIndex>,
    config: &'a Config,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        file: PathBuf,
        rel_path: String,
        schemas: &[SchemaDescriptor],
        index: Option<&'a ProjectIndex>,
        config: &'a Config,
    ) -> Self {
        let (schema_table, conflicts) = crate::index::linearize::linearize_file_schemas(schemas);
        let diagnostics = conflicts
            .into_iter()
            .map(|c| Diagnostic::new(file.clone(), c.span, Code::SchemaConflict, c.message))
            .collect();
        Self {
            file,
            rel_path,
            scopes: ScopeStack::new(),
            schema_table,
            import_table: BTreeMap::new(),
            index,
            config,
            diagnostics,
        }
    }

    pub fn run(mut self, module: &Module) -> Vec<Diagnostic> {
        self.import_table = imports::build_import_table(module, &self.rel_path);
        self.exec_block(&module.body);
        self.diagnostics
    }

    fn exec_block(&mut self, body: &[crate::source::span::Located<Stmt>]) {
        for located in body {
            self.exec_stmt(&located.node, located.span);
        }
    }

    fn exec_stmt(&mut self, stmt: &Stmt, span: Span) {
        match stmt {
            Stmt::Assign { targets, value } => {
                let fact = self.eval_expr(value, span);
                for target in targets {
                    if let Expr::Name(name) = target {
                        self.scopes.bind(name, fact.clone(), span);
                    }
                }
            }
            Stmt::AnnAssign { target, annotation, value } => {
                let fact = match self.schema_from_annotation(annotation) {
                    Some(csf) => csf,
                    None => match value {
                        Some(v) => self.eval_expr(v, span),
                        None => Csf::Unknown,
                    },
                };
                if let Expr::Name(name) = target {
                    self.scopes.bind(name, fact, span);
                }
            }
            Stmt::FunctionDef { params, body, .. } => {
                // Params always bind Unknown: a function's own return
                // annotation is the project index's concern (C3/C5 lookup),
                // not something this per-file pass resolves for its own
                // parameters.
                self.scopes.push();
                for param in params {
                    self.scopes.bind(&param.name, Csf::Unknown, span);
                }
                self.exec_block(body);
                self.scopes.pop();
            }
            Stmt::ClassDef { .. } => {
                // Class bodies are only relevant to schema extraction (C2);
                // not entered as a binding scope here.
            }
            Stmt::If { test: _, body, orelse } => {
                // Branches are sequential, not merged (spec §4.5 / Non-goals).
                self.exec_block(body);
                self.exec_block(orelse);
            }
            Stmt::Expr { value } => {
                self.eval_expr(value, span);
            }
            Stmt::Return { value } => {
                if let Some(v) = value {
                    self.eval_expr(v, span);
                }
            }
            Stmt::Import { .. } | Stmt::ImportFrom { .. } | Stmt::Other => {}
        }
    }

    /// Recognize `Frame[Schema]` / `Annotated[FrameType, Schema]` annotations
    /// against the in-file schema table only — cross-file schema literal
    /// annotations are not a case the spec names for this rule (only for
    /// function return types, which is an index concern, not this one).
    fn schema_from_annotation(&self, annotation: &Expr) -> Option<Csf> {
        let Expr::Subscript { value, index } = annotation else {
            return None;
        };
        let container = value.as_dotted_path()?;
        let name = *container.last()?;
        let schema_name = match name {
            "Frame" => match index.as_ref() {
                Expr::Name(n) => n.as_str(),
                _ => return None,
            },
            "Annotated" => {
                let Expr::Tuple(items) = index.as_ref() else {
                    return None;
                };
                match items.get(1)? {
                    Expr::Name(n) => n.as_str(),
                    _ => return None,
                }
            }
            _ => return None,
        };
        self.schema_table
            .get(schema_name)
            .map(|cols| Csf::schema(schema_name, cols.clone()))
    }

    fn eval_expr(&mut self, expr: &Expr, span: Span) -> Csf {
        match expr {
            Expr::Name(n) => self.scopes.lookup(n).cloned().unwrap_or(Csf::Unknown),
            Expr::Subscript { value, index } => {
                let base = self.eval_expr(value, span);
                self.eval_subscript(&base, index, span)
            }
            Expr::Call { func, args, keywords } => self.eval_call(func, args, keywords, span),
            Expr::Attribute { value, .. } => {
                // A bare attribute access (not a call) is not a frame
                // operation the analyzer models; evaluate the base for its
                // side effects (none today) and surface `Unknown`.
                self.eval_expr(value, span);
                Csf::Unknown
            }
            _ => Csf::Unknown,
        }
    }

    fn eval_subscript(&mut self, base: &Csf, index: &Expr, span: Span) -> Csf {
        if base.is_unknown() || base.is_error() {
            return base.clone();
        }

        if let Some(key) = index.as_str_literal() {
            return self.check_single_column(base, key, span);
        }

        if let Some(keys) = index.as_str_list() {
            let names: Vec<String> = keys.iter().map(|s| s.to_string()).collect();
            if let Some(members) = base.members() {
                for name in &names {
                    if !members.iter().any(|m| m == name) {
                        self.emit_unknown_column(base, name, span);
                    }
                }
            }
            return base.narrow(&names);
        }

        if index.looks_boolean() {
            return base.pass_through();
        }

        Csf::Unknown
    }

    fn check_single_column(&mut self, base: &Csf, name: &str, span: Span) -> Csf {
        let Some(members) = base.members() else {
            return Csf::Unknown;
        };
        if members.iter().any(|m| m == name) {
            Csf::Unknown
        } else {
            self.emit_unknown_column(base, name, span);
            Csf::Error
        }
    }

    fn emit_unknown_column(&mut self, base: &Csf, name: &str, span: Span) {
        let suggestion = base
            .members()
            .and_then(|m| suggest(name, &m.to_vec()))
            .map(str::to_string);
        self.diagnostics.push(
            Diagnostic::new(
                self.file.clone(),
                span,
                Code::UnknownColumn,
                format!("unknown column '{name}'"),
            )
            .with_suggestion(suggestion),
        );
    }

    fn eval_call(&mut self, func: &Expr, args: &[Expr], keywords: &[crate::source::ir::Keyword], span: Span) -> Csf {
        if let Some(path) = func.as_dotted_path() {
            if let Some(entry) = recognizers::match_loader(&path) {
                return self.eval_loader_call(entry, keywords, span);
            }
        }

        if let Expr::Attribute { value, attr } = func {
            let base = self.eval_expr(value, span);
            if let Some(effect) = recognizers::method_effect(attr) {
                return self.eval_method_call(&base, effect, args, keywords, span);
            }
            return Csf::Unknown;
        }

        if let Expr::Name(n) = func {
            if let Some(csf) = self.eval_cross_file_call(n) {
                return csf;
            }
        }

        Csf::Unknown
    }

    fn eval_loader_call(
        &mut self,
        entry: &recognizers::LoaderEntry,
        keywords: &[crate::source::ir::Keyword],
        span: Span,
    ) -> Csf {
        for kwarg in entry.column_kwargs {
            if let Some(value) = expr::first_keyword(keywords, &[kwarg]) {
                if let Some(names) = value.as_str_list() {
                    let cols = names.into_iter().map(str::to_string).collect();
                    return Csf::inferred(cols, Origin::Loader);
                }
                if let Expr::Dict(pairs) = value {
                    let cols: Option<Vec<String>> = pairs
                        .iter()
                        .map(|(k, _)| k.as_ref().and_then(Expr::as_str_literal).map(str::to_string))
                        .collect();
                    if let Some(cols) = cols {
                        return Csf::inferred(cols, Origin::Loader);
                    }
                }
            }
        }

        if self.config.analysis.strict_ingest {
            self.diagnostics.push(Diagnostic::new(
                self.file.clone(),
                span,
                Code::UntrackedDataframe,
                "loader call has no recognizable column-bearing argument".to_string(),
            ));
        }
        Csf::Unknown
    }

    fn eval_method_call(
        &mut self,
        base: &Csf,
        effect: MethodEffect,
        args: &[Expr],
        keywords: &[crate::source::ir::Keyword],
        span: Span,
    ) -> Csf {
        match effect {
            MethodEffect::Narrow => {
                let names = expr::str_list_arg(args, keywords, &["columns"])
                    .map(|v| v.into_iter().map(str::to_string).collect())
                    .unwrap_or_default();
                base.narrow(&names)
            }
            MethodEffect::Drop => {
                let names: Vec<String> = expr::str_list_arg(args, keywords, &["columns"])
                    .map(|v| v.into_iter().map(str::to_string).collect())
                    .unwrap_or_default();
                if let Some(members) = base.members() {
                    for name in &names {
                        if !members.iter().any(|m| m == name) {
                            self.diagnostics.push(Diagnostic::new(
                                self.file.clone(),
                                span,
                                Code::DroppedUnknownColumn,
                                format!("drop references unknown column '{name}'"),
                            ));
                        }
                    }
                }
                base.drop(&names)
            }
            MethodEffect::Rename => {
                let mapping = expr::first_keyword(keywords, &["columns"])
                    .map(expr::dict_rename_mapping)
                    .unwrap_or_default();
                base.rename(&mapping)
            }
            MethodEffect::Extend => {
                let names = expr::keyword_names(keywords);
                base.extend(&names)
            }
            MethodEffect::PassThrough | MethodEffect::LeftPassThrough => base.pass_through(),
        }
    }

    fn eval_cross_file_call(&self, name: &str) -> Option<Csf> {
        if !self.config.analysis.use_index {
            return Some(Csf::Unknown);
        }
        let (path, symbol) = self.import_table.get(name)?;
        let index = self.index?;
        let schema_name = index
            .lookup_function_schema(path, symbol)
            .or_else(|| index.lookup_function_schema(&package_init_variant(path), symbol))?;
        let columns = index
            .lookup_schema(path, schema_name)
            .or_else(|| index.lookup_schema(&package_init_variant(path), schema_name))?;
        Some(Csf::schema(schema_name, columns.to_vec()))
    }
}

/// `pkg/mod.py` → `pkg/mod/__init__.py`, the package-style fallback when a
/// direct module-file lookup misses.
fn package_init_variant(path: &str) -> String {
    match path.strip_suffix(".py") {
        Some(stem) => format!("{stem}/__init__.py"),
        None => path.to_string(),
    }
}

pub fn check_module(
    file: &Path,
    rel_path: &str,
    module: &Module,
    schemas: &[SchemaDescriptor],
    index: Option<&ProjectIndex>,
    config: &Config,
) -> Vec<Diagnostic> {
    let interp = Interpreter::new(file.to_path_buf(), rel_path.to_string(), schemas, index, config);
    interp.run(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use crate::source::parse_source;
    use std::path::PathBuf;

    fn run(src: &str) -> Vec<Diagnostic> {
        let outcome = parse_source(src);
        let extracted = schema::extract(&outcome.module);
        let config = Config::default();
        check_module(&PathBuf::from("f.py"), "f.py", &outcome.module, &extracted.schemas, None, &config)
    }

    #[test]
    fn s1_unknown_column_after_narrow_subscript() {
        let diags = run(
            "df = pd.read_csv(\"x.csv\", usecols=[\"a\", \"b\"])\n_ = df[\"c\"]\n",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, Code::UnknownColumn);
    }

    #[test]
    fn s2_untracked_dataframe_warning_when_strict() {
        let outcome = parse_source("df = pd.read_csv(\"x.csv\")\n");
        let extracted = schema::extract(&outcome.module);
        let mut config = Config::default();
        config.analysis.strict_ingest = true;
        let diags = check_module(&PathBuf::from("f.py"), "f.py", &outcome.module, &extracted.schemas, None, &config);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, Code::UntrackedDataframe);
    }

    #[test]
    fn s3_schema_annotation_then_narrow_then_miss() {
        let diags = run(
            r#"
class S(BaseSchema):
    foo = Column(type=str)
    bar = Column(type=str)
    baz = Column(type=str)

df: Frame[S] = loader()
a = df[["foo", "bar"]]
_ = a["baz"]
"#,
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, Code::UnknownColumn);
    }

    #[test]
    fn s4_rename_then_access_old_name_is_unknown() {
        let diags = run(
            r#"
df = pd.read_csv("x.csv", usecols=["foo"])
df.rename(columns={"foo": "qux"})
df2 = pd.read_csv("x.csv", usecols=["foo"])
_ = df2["foo"]
"#,
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn s5_drop_unknown_column_warns() {
        let diags = run(
            r#"
df = pd.read_csv("x.csv", usecols=["a"])
df.drop(columns=["nonexistent"])
"#,
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, Code::DroppedUnknownColumn);
    }

    #[test]
    fn file_with_no_frames_has_no_diagnostics() {
        let diags = run("x = 1\ny = x + 1\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn boolean_subscript_passes_through() {
        let diags = run(
            r#"
df = pd.read_csv("x.csv", usecols=["a"])
b = df[df["a"] == 1]
_ = b["a"]
"#,
        );
        assert!(diags.is_empty());
    }
}
