//! Relative-path resolution of `from ... import ...` statements, mirroring
//! the host language's package-relative import rules closely enough to
//! drive project-index lookups (spec §4.3 "Lookup").

use std::collections::BTreeMap;

use crate::source::ir::{Module, Stmt};

/// Maps a locally-bound name to the file (relative path, forward-slash)
/// and symbol it was imported from. Plain `import x` is not tracked —
/// only `from module import name [as alias]`, which is the only import
/// shape that can name a specific function.
pub fn build_import_table(module: &Module, current_rel_path: &str) -> BTreeMap<String, (String, String)> {
    let mut table = BTreeMap::new();
    for located in &module.body {
        if let Stmt::ImportFrom { module: mod_name, level, names } = &located.node {
            let base = resolve_module_path(current_rel_path, *level, mod_name.as_deref());
            for alias in names {
                let local = alias.asname.clone().unwrap_or_else(|| alias.name.clone());
                table.insert(local, (format!("{base}.py"), alias.name.clone()));
            }
        }
    }
    table
}

/// Resolve `from <module> import ...` (with `level` leading dots) to a
/// path (without `.py` extension) relative to the project root, given the
/// importing file's own relative path.
///
/// `level == 0` is an absolute import: the dotted module name is the path,
/// independent of the importing file's location. `level >= 1` is relative:
/// `level == 1` means "this package" (the current directory), and each
/// extra level climbs one more directory, matching `from .. import x` etc.
fn resolve_module_path(current_rel_path: &str, level: usize, module: Option<&str>) -> String {
    if level == 0 {
        return module.map(|m| m.split('.').collect::<Vec<_>>().join("/")).unwrap_or_default();
    }

    let mut dir: Vec<&str> = current_rel_path.split('/').collect();
    dir.pop(); // drop the file name, keep containing directory
    for _ in 1..level {
        dir.pop();
    }

    let mut parts: Vec<&str> = dir;
    if let Some(m) = module {
        parts.extend(m.split('.'));
    }
    parts.join("/")
}
