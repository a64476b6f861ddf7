#![allow(dead_code)]

use std::process::Command;

use namedreturns::builder::UnitBuilder;
use namedreturns::config::Config;
use namedreturns::diagnostics::{Diagnostic, DiagnosticKind};

pub fn namedreturns_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_namedreturns"))
}

/// Analyze the built unit with default configuration.
pub fn analyze(b: UnitBuilder) -> Vec<Diagnostic> {
    namedreturns::run(&b.finish(), &Config::default()).unwrap()
}

/// Analyze with `report-error-in-defer` enabled.
pub fn analyze_reporting_defer(b: UnitBuilder) -> Vec<Diagnostic> {
    let config = Config { report_error_in_defer: true };
    namedreturns::run(&b.finish(), &config).unwrap()
}

pub fn kinds(diags: &[Diagnostic]) -> Vec<DiagnosticKind> {
    diags.iter().map(|d| d.kind).collect()
}

pub fn messages(diags: &[Diagnostic]) -> Vec<String> {
    diags.iter().map(|d| d.msg.clone()).collect()
}

pub fn count(diags: &[Diagnostic], kind: DiagnosticKind) -> usize {
    diags.iter().filter(|d| d.kind == kind).count()
}

pub fn mismatch(name: &str) -> String {
    format!("named return variable \"{name}\" is declared but not used in return statement")
}
