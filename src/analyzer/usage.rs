use crate::ast::*;
use crate::diagnostics::Diagnostic;
use crate::span::{Span, Spanned};
use crate::visit::{walk_stmt, Visitor};

/// Check that every non-bare return statement in `body` lists each tracked
/// name as a plain identifier. One diagnostic per missing name per statement,
/// positioned at the function.
///
/// Matching is by identifier text only: `return n + 0` does not use `n`.
pub fn check_return_usage(body: &Block, names: &[&str], func_span: Span) -> Vec<Diagnostic> {
    let mut checker = UsageChecker { names, func_span, diagnostics: Vec::new() };
    for stmt in &body.stmts {
        checker.visit_stmt(stmt);
    }
    checker.diagnostics
}

struct UsageChecker<'n> {
    names: &'n [&'n str],
    func_span: Span,
    diagnostics: Vec<Diagnostic>,
}

impl UsageChecker<'_> {
    fn check_return(&mut self, results: &[Spanned<Expr>]) {
        // A bare return hands back the named variables implicitly.
        if results.is_empty() {
            return;
        }
        for name in self.names {
            let used = results
                .iter()
                .filter_map(|r| r.node.as_ident())
                .any(|ident| ident.name == *name);
            if !used {
                self.diagnostics.push(Diagnostic::return_mismatch(name, self.func_span));
            }
        }
    }
}

impl Visitor for UsageChecker<'_> {
    fn visit_stmt(&mut self, stmt: &Spanned<Stmt>) {
        if let Stmt::Return(results) = &stmt.node {
            self.check_return(results);
        }
        walk_stmt(self, stmt);
    }

    // Returns inside a literal belong to the literal.
    fn visit_func_lit(&mut self, _lit: &FuncLit, _span: Span) {}
}
