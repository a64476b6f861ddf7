//! The named-returns analysis pass.
//!
//! For every function declaration and function literal in a file (pre-order),
//! the pass classifies the declared results, drops `error` results that are
//! only assigned from a deferred closure, then checks return statements and
//! shadowing for the remaining named results.

pub mod defer;
pub mod shadow;
pub mod signature;
pub mod usage;

use crate::ast::*;
use crate::config::Config;
use crate::diagnostics::{AnalysisError, Diagnostic, Reporter};
use crate::span::{Span, Spanned};
use crate::types::TypeResolver;
use crate::unit::CompilationUnit;
use crate::visit::{walk_func_decl, walk_func_lit, Visitor};

pub const NAME: &str = "namedreturns";
pub const DOC: &str = "Reports functions that don't use named returns";

/// A function declaration or function literal, reduced to what the checks read.
#[derive(Debug, Clone, Copy)]
pub enum FunctionUnit<'a> {
    Decl { func: &'a FuncDecl, span: Span },
    Lit { lit: &'a FuncLit, span: Span },
}

impl<'a> FunctionUnit<'a> {
    pub fn results(&self) -> Option<&'a FieldList> {
        match self {
            FunctionUnit::Decl { func, .. } => func.ty.results.as_ref(),
            FunctionUnit::Lit { lit, .. } => lit.ty.results.as_ref(),
        }
    }

    pub fn body(&self) -> Option<&'a Spanned<Block>> {
        match self {
            FunctionUnit::Decl { func, .. } => func.body.as_ref(),
            FunctionUnit::Lit { lit, .. } => Some(&lit.body),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            FunctionUnit::Decl { span, .. } | FunctionUnit::Lit { span, .. } => *span,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            FunctionUnit::Decl { func, .. } => &func.name.node.name,
            FunctionUnit::Lit { .. } => "func literal",
        }
    }
}

/// A named result variable of the function under analysis.
#[derive(Debug, Clone, Copy)]
pub struct NamedReturn<'a> {
    pub ident: &'a Spanned<Ident>,
    pub ty: &'a Spanned<TypeExpr>,
    /// Set by the defer-exemption check; exempt variables are not tracked.
    pub exempt: bool,
}

impl<'a> NamedReturn<'a> {
    pub fn name(&self) -> &'a str {
        &self.ident.node.name
    }
}

/// Analyze one compilation unit.
///
/// Fails only when the unit lacks the syntax tree or type tables. Convention
/// violations are returned as diagnostics in source order.
pub fn run(unit: &CompilationUnit, config: &Config) -> Result<Vec<Diagnostic>, AnalysisError> {
    let file = unit.syntax.as_ref().ok_or_else(|| AnalysisError::missing_syntax(&unit.path))?;
    let types = unit.types.as_ref().ok_or_else(|| AnalysisError::missing_type_info(&unit.path))?;

    let diagnostics = check_file(file, types, config);
    tracing::info!(
        path = %unit.path.display(),
        diagnostics = diagnostics.len(),
        "analyzed unit"
    );
    Ok(diagnostics)
}

/// Analyze several units on a pool of worker threads. Results come back in
/// input order; each unit's list is independent of the others.
pub fn run_all(units: &[CompilationUnit], config: &Config) -> Vec<Result<Vec<Diagnostic>, AnalysisError>> {
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, units.len().max(1));
    let (tx, rx) = crossbeam_channel::unbounded();

    std::thread::scope(|s| {
        for worker in 0..workers {
            let tx = tx.clone();
            s.spawn(move || {
                for index in (worker..units.len()).step_by(workers) {
                    // The receiver outlives the scope, so send cannot fail.
                    let _ = tx.send((index, run(&units[index], config)));
                }
            });
        }
    });
    drop(tx);

    let mut results: Vec<_> = rx.iter().collect();
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}

/// Analyze every function in `file`.
pub fn check_file(file: &File, resolver: &dyn TypeResolver, config: &Config) -> Vec<Diagnostic> {
    let mut pass = Pass { resolver, config, reporter: Reporter::new() };
    pass.visit_file(file);
    pass.reporter.finish()
}

/// Run every check over a single function unit. Nested function literals are
/// not entered; they are units of their own.
pub fn check_function(unit: FunctionUnit<'_>, resolver: &dyn TypeResolver, config: &Config) -> Vec<Diagnostic> {
    let Some(body) = unit.body() else {
        tracing::debug!(function = unit.name(), "skipping function without body");
        return Vec::new();
    };
    let Some(results) = unit.results() else {
        return Vec::new();
    };

    let signature::Classified { mut named, mut diagnostics } = signature::classify(results, unit.span());

    if !config.report_error_in_defer {
        for var in &mut named {
            var.exempt = defer::is_exempt(var, &body.node, resolver);
            if var.exempt {
                tracing::debug!(
                    function = unit.name(),
                    variable = var.name(),
                    "named error assigned in deferred closure, exempt"
                );
            }
        }
    }

    let tracked: Vec<&str> = named.iter().filter(|v| !v.exempt).map(|v| v.name()).collect();
    tracing::debug!(function = unit.name(), tracked = ?tracked, "checking function");
    if tracked.is_empty() {
        return diagnostics;
    }

    diagnostics.extend(usage::check_return_usage(&body.node, &tracked, unit.span()));
    diagnostics.extend(shadow::check_shadowing(&body.node, &tracked));
    diagnostics
}

struct Pass<'r> {
    resolver: &'r dyn TypeResolver,
    config: &'r Config,
    reporter: Reporter,
}

impl Visitor for Pass<'_> {
    fn visit_func_decl(&mut self, func: &FuncDecl, span: Span) {
        let unit = FunctionUnit::Decl { func, span };
        self.reporter.extend(check_function(unit, self.resolver, self.config));
        walk_func_decl(self, func, span);
    }

    fn visit_func_lit(&mut self, lit: &FuncLit, span: Span) {
        let unit = FunctionUnit::Lit { lit, span };
        self.reporter.extend(check_function(unit, self.resolver, self.config));
        walk_func_lit(self, lit, span);
    }
}
