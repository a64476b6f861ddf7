use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ast::File;
use crate::diagnostics::AnalysisError;
use crate::types::TypeInfo;

/// One Go file as produced by the external front end: syntax tree plus the
/// type checker's tables. Either part may be missing when the front end
/// failed; the analyzer refuses such units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub path: PathBuf,
    /// Original source, used only for rendering positions.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub syntax: Option<File>,
    #[serde(default)]
    pub types: Option<TypeInfo>,
}

impl CompilationUnit {
    pub fn new(path: impl Into<PathBuf>, syntax: File, types: TypeInfo) -> Self {
        Self {
            path: path.into(),
            source: None,
            syntax: Some(syntax),
            types: Some(types),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn from_json(path: &Path, json: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(json).map_err(|e| AnalysisError::decode(path, e))
    }

    /// Read a unit from a JSON file written by the front end.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let json = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        Self::from_json(path, &json)
    }
}
