use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use namedreturns::config::{Config, FLAG_REPORT_ERROR_IN_DEFER, FLAG_REPORT_ERROR_IN_DEFER_DOC};
use namedreturns::diagnostics::{render_diagnostic, AnalysisError, Diagnostic};
use namedreturns::line_index::LineIndex;
use namedreturns::unit::CompilationUnit;

#[derive(Parser)]
#[command(name = "namedreturns", version, about = namedreturns::DOC)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check compilation units exported by the Go front end as JSON
    Check {
        /// Unit files (.json)
        #[arg(required = true)]
        units: Vec<PathBuf>,
        /// Report named error if it is assigned inside defer
        #[arg(long = FLAG_REPORT_ERROR_IN_DEFER)]
        report_error_in_defer: bool,
        /// Config file (defaults to the nearest namedreturns.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the analyzer name, documentation and flags
    Doc,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// path:line:col: message [kind]
    Text,
    /// Source snippets on stderr where the unit carries its source
    Pretty,
    /// JSON array of per-unit results
    Json,
}

#[derive(Serialize)]
struct UnitReport<'a> {
    path: &'a std::path::Path,
    diagnostics: &'a [Diagnostic],
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            units,
            report_error_in_defer,
            config,
            format,
        } => match check(&units, report_error_in_defer, config, format) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::from(2)
            }
        },
        Commands::Doc => {
            println!("{}: {}", namedreturns::NAME, namedreturns::DOC);
            println!();
            println!("Flags:");
            println!("  -{FLAG_REPORT_ERROR_IN_DEFER}");
            println!("        {FLAG_REPORT_ERROR_IN_DEFER_DOC} (default false)");
            ExitCode::SUCCESS
        }
    }
}

fn resolve_config(explicit: Option<PathBuf>, report_error_in_defer: bool) -> Result<Config, AnalysisError> {
    let mut config = match explicit {
        Some(path) => Config::load(&path)?,
        None => {
            let cwd = std::env::current_dir().map_err(|e| AnalysisError::io(".", e))?;
            Config::discover(&cwd)?
        }
    };
    if report_error_in_defer {
        config.apply_flag(FLAG_REPORT_ERROR_IN_DEFER, "true")?;
    }
    Ok(config)
}

fn check(
    paths: &[PathBuf],
    report_error_in_defer: bool,
    config: Option<PathBuf>,
    format: Format,
) -> Result<ExitCode, AnalysisError> {
    let config = resolve_config(config, report_error_in_defer)?;

    let mut failed = false;
    let mut units = Vec::new();
    for path in paths {
        match CompilationUnit::load(path) {
            Ok(unit) => units.push(unit),
            Err(e) => {
                eprintln!("error: {e}");
                failed = true;
            }
        }
    }

    let results = namedreturns::run_all(&units, &config);

    let mut found = false;
    let mut reports = Vec::new();
    for (unit, result) in units.iter().zip(&results) {
        let diagnostics = match result {
            Ok(diagnostics) => diagnostics,
            Err(e) => {
                eprintln!("error: {e}");
                failed = true;
                continue;
            }
        };
        found |= !diagnostics.is_empty();
        match format {
            Format::Text => print_text(unit, diagnostics),
            Format::Pretty => print_pretty(unit, diagnostics),
            Format::Json => reports.push(UnitReport { path: &unit.path, diagnostics }),
        }
    }

    if format == Format::Json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to encode report: {e}");
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::from(2)
    } else if found {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn print_text(unit: &CompilationUnit, diagnostics: &[Diagnostic]) {
    let index = unit.source.as_deref().map(LineIndex::new);
    for diag in diagnostics {
        match &index {
            Some(index) => {
                let pos = index.position(diag.span.start);
                println!("{}:{}:{}: {diag}", unit.path.display(), pos.line, pos.column);
            }
            None => println!("{}:@{}: {diag}", unit.path.display(), diag.span.start),
        }
    }
}

fn print_pretty(unit: &CompilationUnit, diagnostics: &[Diagnostic]) {
    let Some(source) = unit.source.as_deref() else {
        print_text(unit, diagnostics);
        return;
    };
    let filename = unit.path.display().to_string();
    for diag in diagnostics {
        render_diagnostic(source, &filename, diag);
    }
}
