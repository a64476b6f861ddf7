use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostics::AnalysisError;

/// Name of the single analyzer flag, as exposed to lint aggregators.
pub const FLAG_REPORT_ERROR_IN_DEFER: &str = "report-error-in-defer";

/// Help text for [`FLAG_REPORT_ERROR_IN_DEFER`].
pub const FLAG_REPORT_ERROR_IN_DEFER_DOC: &str = "report named error if it is assigned inside defer";

/// Config file looked up from the working directory upwards.
pub const CONFIG_FILE_NAME: &str = "namedreturns.toml";

/// Run configuration, read once and threaded explicitly into the analyzer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// When set, named `error` results assigned inside a deferred closure are
    /// checked like any other named result.
    #[serde(default)]
    pub report_error_in_defer: bool,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, AnalysisError> {
        toml::from_str(text).map_err(|e| AnalysisError::config(format!("invalid {CONFIG_FILE_NAME}: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Load the nearest config file above `start_dir`, or defaults if there is none.
    pub fn discover(start_dir: &Path) -> Result<Self, AnalysisError> {
        match find_config_walk(start_dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using config file");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Set a flag by its external name, the way a lint aggregator passes
    /// `-name=value` pairs through.
    pub fn apply_flag(&mut self, name: &str, value: &str) -> Result<(), AnalysisError> {
        match name {
            FLAG_REPORT_ERROR_IN_DEFER => {
                self.report_error_in_defer = parse_bool(value).ok_or_else(|| {
                    AnalysisError::config(format!("invalid boolean value {value:?} for flag -{name}"))
                })?;
                Ok(())
            }
            other => Err(AnalysisError::config(format!("flag provided but not defined: -{other}"))),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

fn find_config_walk(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        // Stop at the repository root (.git file or dir)
        if dir.join(".git").exists() {
            return None;
        }
        if !dir.pop() {
            return None;
        }
    }
}
