//! Python extension module bindings (feature `python`).
//!
//! This is the actual `typedframes._rust_checker` extension that the
//! `typedframes` Python package's CLI (`original_source`'s `cli.py`) shells
//! out to. It exposes exactly the two entry points spec §6 names, wrapping
//! [`crate::pipeline`] with PyO3 conversions — no analysis logic lives here.

use pyo3::exceptions::{PyFileNotFoundError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::config::Config;
use crate::diagnostics::format::json;
use crate::pipeline;

/// `typedframes._rust_checker.check_file(path, index_bytes=None) -> str`
///
/// Runs C1+C5 on a single file and returns the diagnostics as a JSON array
/// string — `[{line, col, code, message, severity, suggestion?}, ...]`,
/// exactly the shape spec §6 describes for `check_file`.
#[pyfunction]
#[pyo3(signature = (path, index_bytes=None))]
fn check_file(path: &str, index_bytes: Option<&[u8]>) -> PyResult<String> {
    let config = Config::default();
    let diagnostics = pipeline::check_file(std::path::Path::new(path), index_bytes, &config);
    json(&diagnostics)
        .map_err(|e| PyValueError::new_err(format!("could not serialize diagnostics: {e}")))
}

/// `typedframes._rust_checker.build_project_index(root) -> bytes`
///
/// Runs C1+C2+C3 over `root` and returns the opaque, versioned index
/// buffer. The buffer is only ever round-tripped through
/// [`crate::index::ProjectIndex`] on the Rust side — the Python caller
/// treats it as an opaque blob passed back into `check_file`.
#[pyfunction]
fn build_project_index(py: Python<'_>, root: &str) -> PyResult<Py<PyBytes>> {
    let config = Config::default();
    let bytes = pipeline::build_project_index(std::path::Path::new(root), &config)
        .map_err(|e| PyFileNotFoundError::new_err(e.to_string()))?;
    Ok(PyBytes::new(py, &bytes).into())
}

/// The `typedframes._rust_checker` extension module.
#[pymodule]
fn _rust_checker(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(check_file, m)?)?;
    m.add_function(wrap_pyfunction!(build_project_index, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
