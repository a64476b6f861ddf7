use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::span::Span;

/// Run-level failure: the unit could not be analyzed at all.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no syntax tree available for {}", path.display())]
    MissingSyntax { path: PathBuf },

    #[error("no type information available for {}", path.display())]
    MissingTypeInfo { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config error: {msg}")]
    Config { msg: String },
}

impl AnalysisError {
    pub fn missing_syntax(path: impl Into<PathBuf>) -> Self {
        Self::MissingSyntax { path: path.into() }
    }

    pub fn missing_type_info(path: impl Into<PathBuf>) -> Self {
        Self::MissingTypeInfo { path: path.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn decode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Decode { path: path.into(), source }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config { msg: msg.into() }
    }
}

/// Convention violated by a function's return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    UnnamedReturn,
    PlaceholderReturnName,
    ReturnMismatch,
    ShadowedReturn,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::UnnamedReturn => "unnamed-return",
            DiagnosticKind::PlaceholderReturnName => "placeholder-return-name",
            DiagnosticKind::ReturnMismatch => "return-mismatch",
            DiagnosticKind::ShadowedReturn => "shadowed-return",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The construct that re-declares a named return variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowKind {
    LocalDeclaration,
    RangeVariable,
    ForLoopVariable,
}

impl ShadowKind {
    fn describe(self) -> &'static str {
        match self {
            ShadowKind::LocalDeclaration => "local variable declaration",
            ShadowKind::RangeVariable => "range loop variable",
            ShadowKind::ForLoopVariable => "for loop variable",
        }
    }
}

/// A positioned finding. Message text is a stable contract: downstream
/// suppression matching relies on its prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub msg: String,
}

impl Diagnostic {
    pub fn unnamed_return(type_str: &str, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::UnnamedReturn,
            span,
            msg: format!("unnamed return with type {type_str:?} found - named returns are required"),
        }
    }

    pub fn placeholder_return_name(type_str: &str, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::PlaceholderReturnName,
            span,
            msg: format!("underscore as a return variable name is unacceptable for type {type_str:?}"),
        }
    }

    pub fn return_mismatch(name: &str, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::ReturnMismatch,
            span,
            msg: format!("named return variable {name:?} is declared but not used in return statement"),
        }
    }

    pub fn shadowed_return(name: &str, by: ShadowKind, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::ShadowedReturn,
            span,
            msg: format!("named return variable {name:?} is shadowed by {}", by.describe()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.msg, self.kind)
    }
}

/// Collects diagnostics for one compilation unit.
#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diag: Diagnostic) {
        tracing::trace!(kind = %diag.kind, start = diag.span.start, "{}", diag.msg);
        self.diagnostics.push(diag);
    }

    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.report(diag);
        }
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics in source order. Findings at the same offset keep the
    /// order they were reported in.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|d| d.span.start);
        self.diagnostics
    }
}

/// Render a diagnostic with ariadne for terminal output.
pub fn render_diagnostic(source: &str, filename: &str, diag: &Diagnostic) {
    use ariadne::{Label, Report, ReportKind, Source};

    let start = diag.span.start.min(source.len());
    let end = diag.span.end.clamp(start, source.len());
    let result = Report::build(ReportKind::Warning, (), start)
        .with_message(format!("{filename}: {}", diag.kind))
        .with_label(Label::new(start..end).with_message(&diag.msg))
        .finish()
        .eprint(Source::from(source.to_string()));
    if let Err(err) = result {
        tracing::warn!("failed to render diagnostic: {err}");
    }
}
