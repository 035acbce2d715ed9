//! `typedframes-checker` — standalone CLI front-end.
//!
//! The analyzer's real home is the Python `typedframes` package, which
//! calls into this crate's core through the `python` feature's PyO3
//! bindings. This binary exists for CI and local debugging without a
//! Python interpreter on hand.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use typedframes_checker::config::{Config, OutputFormat as ConfigOutputFormat};
use typedframes_checker::diagnostics::format::{github, json, text};
use typedframes_checker::diagnostics::{sort_diagnostics, Code, Diagnostic, Severity};
use typedframes_checker::index::walk::discover_python_files;
use typedframes_checker::pipeline::{build_project_index, check_file};

#[derive(Parser)]
#[command(name = "typedframes-checker", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a file or directory for column-access violations.
    Check(CheckArgs),
}

#[derive(Parser)]
struct CheckArgs {
    path: PathBuf,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = CliFormat::Text)]
    format: CliFormat,

    /// Exit 1 (instead of 0) when hard errors are found.
    #[arg(long)]
    strict: bool,

    /// Skip cross-file resolution; imported symbols resolve to `Unknown`.
    #[arg(long)]
    no_index: bool,

    /// Drop all warning-severity diagnostics before printing.
    #[arg(long)]
    no_warnings: bool,

    /// Emit `untracked-dataframe` for loader calls with no recognizable
    /// column-bearing argument.
    #[arg(long)]
    strict_ingest: bool,

    /// Print the explanation for a diagnostic code and exit.
    #[arg(long)]
    explain: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliFormat {
    Text,
    Json,
    Github,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Check(args) => run_check(args),
    }
}

fn run_check(args: CheckArgs) -> ExitCode {
    if let Some(code) = &args.explain {
        return explain(code);
    }

    if !args.path.exists() {
        eprintln!("error: path does not exist: {}", args.path.display());
        return ExitCode::from(2);
    }

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(2);
            }
        },
        None => Config::default(),
    };
    if args.no_index {
        config.analysis.use_index = false;
    }
    if args.no_warnings {
        config.analysis.no_warnings = true;
    }
    if args.strict_ingest {
        config.analysis.strict_ingest = true;
    }

    let diagnostics = if args.path.is_dir() {
        check_directory(&args.path, &config)
    } else {
        check_file(&args.path, None, &config)
    };

    print_diagnostics(&diagnostics, args.format);

    let has_errors = diagnostics.iter().any(|d| d.severity == Severity::Error);
    if has_errors && args.strict {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn check_directory(root: &Path, config: &Config) -> Vec<Diagnostic> {
    let index_bytes = if config.analysis.use_index {
        build_project_index(root, config).ok()
    } else {
        None
    };

    let mut all = Vec::new();
    for rel_path in discover_python_files(root) {
        let abs_path = root.join(&rel_path);
        all.extend(check_file(&abs_path, index_bytes.as_deref(), config));
    }
    sort_diagnostics(&mut all);
    all
}

fn print_diagnostics(diagnostics: &[Diagnostic], format: CliFormat) {
    match format {
        CliFormat::Text => print!("{}", text(diagnostics)),
        CliFormat::Json => match json(diagnostics) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("error: could not serialize diagnostics: {e}"),
        },
        CliFormat::Github => print!("{}", github(diagnostics)),
    }
}

fn explain(code: &str) -> ExitCode {
    let Ok(code) = code.parse::<Code>() else {
        eprintln!("error: unknown diagnostic code '{code}'");
        return ExitCode::from(2);
    };
    println!("{}", explanation(code));
    ExitCode::SUCCESS
}

fn explanation(code: Code) -> &'static str {
    match code {
        Code::UnknownColumn => {
            "unknown-column: a string or list subscript named a column absent from the frame's \
             known column set. Check for a typo, or verify the loader/schema actually exposes it."
        }
        Code::DroppedUnknownColumn => {
            "dropped-unknown-column: a drop() call named a column absent from the current column \
             set. The drop is a no-op for that name; this is a warning, not an error."
        }
        Code::UntrackedDataframe => {
            "untracked-dataframe: a loader call produced no recognizable column-bearing argument, \
             so its result's column set is Unknown. Only reported when strict_ingest is enabled."
        }
        Code::ReservedMethodName => {
            "reserved-method-name: a schema column's physical name collides with a frame method \
             name, which would shadow attribute-style column access."
        }
        Code::SchemaConflict => {
            "schema-conflict: two parent schemas declare the same physical column with \
             incompatible declared types."
        }
        Code::Internal => {
            "internal: the file could not be read or parsed; it is treated as empty for this run."
        }
    }
}

#[allow(dead_code)]
fn format_from_config(format: ConfigOutputFormat) -> CliFormat {
    match format {
        ConfigOutputFormat::Text => CliFormat::Text,
        ConfigOutputFormat::Json => CliFormat::Json,
        ConfigOutputFormat::Github => CliFormat::Github,
    }
}
