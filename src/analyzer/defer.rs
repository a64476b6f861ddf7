use crate::ast::*;
use crate::span::{Span, Spanned};
use crate::types::{ObjectId, TypeResolver};
use crate::visit::{walk_stmt, Visitor};

use super::NamedReturn;

/// Whether `var` is a named `error` result that a deferred closure in `body`
/// assigns to. Such a variable carries the function's error out through the
/// defer and need not appear in return statements.
pub fn is_exempt(var: &NamedReturn<'_>, body: &Block, resolver: &dyn TypeResolver) -> bool {
    if !resolver.is_error_type(&var.ty.node) {
        return false;
    }
    let Some(object) = resolver.object_of(&var.ident.node) else {
        return false;
    };
    assigned_in_deferred_closure(body, object, resolver)
}

/// Search the function's own `defer func() { ... }()` statements for an
/// assignment to `object`. Defers inside nested function literals belong to
/// those literals and are not considered.
pub fn assigned_in_deferred_closure(body: &Block, object: ObjectId, resolver: &dyn TypeResolver) -> bool {
    let mut finder = DeferFinder { object, resolver, found: false };
    for stmt in &body.stmts {
        finder.visit_stmt(stmt);
        if finder.found {
            break;
        }
    }
    finder.found
}

/// Whether any assignment in `body`, at any depth, targets `object`.
pub fn assigns_object(body: &Block, object: ObjectId, resolver: &dyn TypeResolver) -> bool {
    let mut finder = AssignmentFinder { object, resolver, found: false };
    for stmt in &body.stmts {
        finder.visit_stmt(stmt);
        if finder.found {
            break;
        }
    }
    finder.found
}

fn deferred_closure(call: &Expr) -> Option<&FuncLit> {
    let Expr::Call { fun, .. } = call else {
        return None;
    };
    match &fun.node {
        Expr::FuncLit(lit) => Some(lit),
        _ => None,
    }
}

struct DeferFinder<'r> {
    object: ObjectId,
    resolver: &'r dyn TypeResolver,
    found: bool,
}

impl Visitor for DeferFinder<'_> {
    fn visit_stmt(&mut self, stmt: &Spanned<Stmt>) {
        if self.found {
            return;
        }
        if let Stmt::Defer(call) = &stmt.node {
            if let Some(lit) = deferred_closure(&call.node) {
                if assigns_object(&lit.body.node, self.object, self.resolver) {
                    self.found = true;
                    return;
                }
            }
        }
        walk_stmt(self, stmt);
    }

    // Defers inside a nested literal run when that literal returns, not this function.
    fn visit_func_lit(&mut self, _lit: &FuncLit, _span: Span) {}
}

struct AssignmentFinder<'r> {
    object: ObjectId,
    resolver: &'r dyn TypeResolver,
    found: bool,
}

impl Visitor for AssignmentFinder<'_> {
    fn visit_stmt(&mut self, stmt: &Spanned<Stmt>) {
        if self.found {
            return;
        }
        if let Stmt::Assign { lhs, .. } = &stmt.node {
            let hit = lhs
                .iter()
                .filter_map(|target| target.node.as_ident())
                .any(|ident| self.resolver.object_of(ident) == Some(self.object));
            if hit {
                self.found = true;
                return;
            }
        }
        walk_stmt(self, stmt);
    }
}
