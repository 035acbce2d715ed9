//! Directory walker and exported-function-signature recognition.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::schema::SchemaDescriptor;
use crate::source::ir::{Expr, Module, Stmt};

/// Recursively enumerate `*.py` files under `root`, returning paths
/// relative to `root` with forward-slash separators for a stable,
/// platform-independent wire format.
pub fn discover_python_files(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("py") {
            continue;
        }
        if let Ok(rel) = path.strip_prefix(root) {
            out.push(to_forward_slash(rel));
        }
    }
    out.sort();
    out
}

fn to_forward_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Find module-level functions whose return annotation recognizably names
/// a schema declared in the same file: either `Frame[Schema]` (single-arg
/// subscript) or `Annotated[FrameType, Schema]` (two-arg subscript whose
/// second argument is the schema name). Anything else is simply not
/// recorded — absence means "not indexed", not `Unknown`.
pub fn exported_function_schemas(
    module: &Module,
    schemas: &[SchemaDescriptor],
) -> std::collections::BTreeMap<String, String> {
    let known: std::collections::HashSet<&str> =
        schemas.iter().map(|s| s.name.as_str()).collect();
    let mut out = std::collections::BTreeMap::new();

    for located in &module.body {
        if let Stmt::FunctionDef { name, returns, .. } = &located.node {
            if let Some(schema_name) = returns
                .as_ref()
                .and_then(|r| recognized_schema_return(r, &known))
            {
                out.insert(name.clone(), schema_name.to_string());
            }
        }
    }
    out
}

fn recognized_schema_return<'a>(expr: &'a Expr, known: &std::collections::HashSet<&str>) -> Option<&'a str> {
    let Expr::Subscript { value, index } = expr else {
        return None;
    };
    let container = value.as_dotted_path()?;
    let container_name = *container.last()?;

    match container_name {
        "Frame" => {
            let name = single_name(index)?;
            known.contains(name).then_some(name)
        }
        "Annotated" => {
            let Expr::Tuple(items) = index.as_ref() else {
                return None;
            };
            let schema_name = items.get(1).and_then(single_name)?;
            known.contains(schema_name).then_some(schema_name)
        }
        _ => None,
    }
}

fn single_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Name(n) => Some(n.as_str()),
        _ => None,
    }
}

#[allow(dead_code)]
pub fn is_python_file(path: &PathBuf) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("py")
}
