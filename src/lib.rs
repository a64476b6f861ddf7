pub mod span;
pub mod ast;
pub mod types;
pub mod diagnostics;
pub mod visit;
pub mod pretty;
pub mod config;
pub mod unit;
pub mod builder;
pub mod line_index;
pub mod analyzer;

use std::path::Path;

use config::Config;
use diagnostics::{AnalysisError, Diagnostic};
use unit::CompilationUnit;

pub use analyzer::{run, run_all, DOC, NAME};

/// Load a JSON compilation unit from disk and analyze it.
pub fn check_unit_file(path: &Path, config: &Config) -> Result<Vec<Diagnostic>, AnalysisError> {
    let unit = CompilationUnit::load(path)?;
    analyzer::run(&unit, config)
}
