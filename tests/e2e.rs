//! End-to-end tests that invoke the compiled `typedframes-checker` binary
//! as a subprocess, mirroring the teacher's `tests/e2e.rs`: exit codes,
//! output formats, config loading, and `--explain`.

use std::path::PathBuf;
use std::process::{Command, Output};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_typedframes-checker"))
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("failed to execute typedframes-checker binary")
}

fn write_file(dir: &std::path::Path, rel: &str, contents: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

#[test]
fn test_exit_0_clean_file() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_file(
        tmp.path(),
        "clean.py",
        "df = pd.read_csv(\"x.csv\", usecols=[\"a\"])\n_ = df[\"a\"]\n",
    );

    let output = run(&["check", &file.to_string_lossy().to_string(), "--strict"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "clean file should exit 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_exit_0_without_strict_even_with_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_file(
        tmp.path(),
        "bad.py",
        "df = pd.read_csv(\"x.csv\", usecols=[\"total\"])\n_ = df[\"totla\"]\n",
    );

    let output = run(&["check", &file.to_string_lossy().to_string()]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "without --strict, findings must not change the exit code. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_exit_1_strict_with_unknown_column() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_file(
        tmp.path(),
        "bad.py",
        "df = pd.read_csv(\"x.csv\", usecols=[\"total\"])\n_ = df[\"totla\"]\n",
    );

    let output = run(&["check", &file.to_string_lossy().to_string(), "--strict"]);
    assert_eq!(
        output.status.code(),
        Some(1),
        "--strict should exit 1 when an error-severity finding exists. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("unknown-column"), "stdout: {stdout}");
}

#[test]
fn test_exit_2_nonexistent_path() {
    let output = run(&["check", "/does/not/exist.py"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_exit_2_bad_config() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_file(tmp.path(), "clean.py", "df = pd.read_csv(\"x.csv\")\n");
    let config_path = write_file(tmp.path(), "typedframes-checker.toml", "not valid toml [[[");

    let output = run(&[
        "check",
        &file.to_string_lossy().to_string(),
        "--config",
        &config_path.to_string_lossy().to_string(),
    ]);
    assert_eq!(output.status.code(), Some(2));
}

// ---------------------------------------------------------------------------
// Output formats
// ---------------------------------------------------------------------------

#[test]
fn test_format_json_is_parseable() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_file(
        tmp.path(),
        "bad.py",
        "df = pd.read_csv(\"x.csv\", usecols=[\"total\"])\n_ = df[\"totla\"]\n",
    );

    let output = run(&["check", &file.to_string_lossy().to_string(), "--format", "json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert!(parsed.is_array());
}

#[test]
fn test_format_github_uses_workflow_command_syntax() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_file(
        tmp.path(),
        "bad.py",
        "df = pd.read_csv(\"x.csv\", usecols=[\"total\"])\n_ = df[\"totla\"]\n",
    );

    let output = run(&["check", &file.to_string_lossy().to_string(), "--format", "github"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("::error"), "stdout: {stdout}");
}

// ---------------------------------------------------------------------------
// --explain
// ---------------------------------------------------------------------------

#[test]
fn test_explain_known_code() {
    let output = run(&["check", ".", "--explain", "unknown-column"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("unknown-column"), "stdout: {stdout}");
}

#[test]
fn test_explain_unknown_code() {
    let output = run(&["check", ".", "--explain", "not-a-real-code"]);
    assert_eq!(output.status.code(), Some(2));
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

#[test]
fn test_strict_ingest_flag_enables_untracked_dataframe() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_file(tmp.path(), "untracked.py", "df = pd.read_sql(query, conn)\n");

    let without = run(&["check", &file.to_string_lossy().to_string(), "--format", "json"]);
    let without_stdout = String::from_utf8_lossy(&without.stdout);
    assert!(
        !without_stdout.contains("untracked-dataframe"),
        "stdout: {without_stdout}"
    );

    let with = run(&[
        "check",
        &file.to_string_lossy().to_string(),
        "--format",
        "json",
        "--strict-ingest",
    ]);
    let with_stdout = String::from_utf8_lossy(&with.stdout);
    assert!(with_stdout.contains("untracked-dataframe"), "stdout: {with_stdout}");
}

#[test]
fn test_no_warnings_flag_drops_warning_severity_findings() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_file(tmp.path(), "untracked.py", "df = pd.read_sql(query, conn)\n");

    let output = run(&[
        "check",
        &file.to_string_lossy().to_string(),
        "--format",
        "json",
        "--strict-ingest",
        "--no-warnings",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("untracked-dataframe"), "stdout: {stdout}");
}

#[test]
fn test_no_index_flag_disables_cross_file_resolution() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(
        tmp.path(),
        "loaders.py",
        r#"
class OrdersSchema(BaseSchema):
    id = Column(type=int)
    total = Column(type=float)

def load_orders() -> Frame[OrdersSchema]:
    return pd.read_csv("orders.csv", usecols=["id", "total"])
"#,
    );
    let dir = write_file(
        tmp.path(),
        "pipeline.py",
        r#"
from loaders import load_orders

df = load_orders()
_ = df["totla"]
"#,
    )
    .parent()
    .unwrap()
    .to_path_buf();

    let with_index = run(&[
        "check",
        &dir.to_string_lossy().to_string(),
        "--format",
        "json",
    ]);
    let with_index_stdout = String::from_utf8_lossy(&with_index.stdout);
    assert!(with_index_stdout.contains("unknown-column"), "stdout: {with_index_stdout}");

    let no_index = run(&[
        "check",
        &dir.to_string_lossy().to_string(),
        "--format",
        "json",
        "--no-index",
    ]);
    let no_index_stdout = String::from_utf8_lossy(&no_index.stdout);
    assert!(
        !no_index_stdout.contains("unknown-column"),
        "stdout: {no_index_stdout}"
    );
}

#[test]
fn test_directory_mode_checks_every_python_file() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "a.py", "df = pd.read_csv(\"x.csv\", usecols=[\"x\"])\n_ = df[\"zz\"]\n");
    write_file(tmp.path(), "b.py", "df = pd.read_csv(\"x.csv\", usecols=[\"y\"])\n_ = df[\"yy\"]\n");

    let output = run(&["check", &tmp.path().to_string_lossy().to_string(), "--format", "json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert_eq!(parsed.as_array().unwrap().len(), 2, "stdout: {stdout}");
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

#[test]
fn test_config_file_sets_strict_ingest() {
    let tmp = tempfile::tempdir().unwrap();
    let file = write_file(tmp.path(), "untracked.py", "df = pd.read_sql(query, conn)\n");
    let config_path = write_file(
        tmp.path(),
        "typedframes-checker.toml",
        "[analysis]\nstrict_ingest = true\n",
    );

    let output = run(&[
        "check",
        &file.to_string_lossy().to_string(),
        "--config",
        &config_path.to_string_lossy().to_string(),
        "--format",
        "json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("untracked-dataframe"), "stdout: {stdout}");
}

#[test]
fn test_version_flag() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("typedframes-checker"), "stdout: {stdout}");
}
