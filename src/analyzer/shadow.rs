use crate::ast::*;
use crate::diagnostics::{Diagnostic, ShadowKind};
use crate::span::{Span, Spanned};
use crate::visit::{walk_gen_decl, walk_stmt, Visitor};

/// Report every re-declaration of a tracked name anywhere in `body`,
/// including inside nested function literals. Block scoping is not modeled:
/// a declaration in an unreachable branch is reported all the same.
pub fn check_shadowing(body: &Block, names: &[&str]) -> Vec<Diagnostic> {
    let mut detector = ShadowDetector { names, diagnostics: Vec::new() };
    for stmt in &body.stmts {
        detector.visit_stmt(stmt);
    }
    detector.diagnostics
}

struct ShadowDetector<'n> {
    names: &'n [&'n str],
    diagnostics: Vec<Diagnostic>,
}

impl ShadowDetector<'_> {
    fn check_ident(&mut self, name: &str, span: Span, by: ShadowKind) {
        let names = self.names;
        if let Some(tracked) = names.iter().find(|n| **n == name) {
            self.diagnostics.push(Diagnostic::shadowed_return(tracked, by, span));
        }
    }

    fn check_expr(&mut self, expr: &Spanned<Expr>, by: ShadowKind) {
        if let Some(ident) = expr.node.as_ident() {
            self.check_ident(&ident.name, expr.span, by);
        }
    }
}

impl Visitor for ShadowDetector<'_> {
    fn visit_stmt(&mut self, stmt: &Spanned<Stmt>) {
        match &stmt.node {
            Stmt::Assign { lhs, tok: AssignTok::Define, .. } => {
                for target in lhs {
                    self.check_expr(target, ShadowKind::LocalDeclaration);
                }
            }
            // Flagged whatever the token: `for k = range` still binds `k`.
            Stmt::Range { key, value, .. } => {
                for binding in key.iter().chain(value.iter()) {
                    self.check_expr(binding, ShadowKind::RangeVariable);
                }
            }
            // The initializer is walked below and reported again as a `:=`.
            Stmt::For { init: Some(init), .. } => {
                if let Stmt::Assign { lhs, tok: AssignTok::Define, .. } = &init.node {
                    for target in lhs {
                        self.check_expr(target, ShadowKind::ForLoopVariable);
                    }
                }
            }
            _ => {}
        }
        walk_stmt(self, stmt);
    }

    fn visit_gen_decl(&mut self, decl: &GenDecl, span: Span) {
        if matches!(decl.kind, GenKind::Var | GenKind::Const) {
            for spec in &decl.specs {
                if let Spec::Value(value) = spec {
                    for name in &value.names {
                        self.check_ident(&name.node.name, name.span, ShadowKind::LocalDeclaration);
                    }
                }
            }
        }
        walk_gen_decl(self, decl, span);
    }
}
