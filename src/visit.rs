//! Read-only AST visitor over the Go syntax tree.
//!
//! Implement [`Visitor`] for a pass, overriding only the methods you need, and
//! call the matching `walk_*` function inside the override to keep the default
//! recursion. Omitting the walk call prunes traversal at that node.
//!
//! ```rust
//! use namedreturns::ast::Expr;
//! use namedreturns::span::Spanned;
//! use namedreturns::visit::{Visitor, walk_expr};
//!
//! struct IdentCounter {
//!     count: usize,
//! }
//!
//! impl Visitor for IdentCounter {
//!     fn visit_expr(&mut self, expr: &Spanned<Expr>) {
//!         if matches!(expr.node, Expr::Ident(_)) {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```
//!
//! Traversal is depth-first and pre-order: a node is handed to its `visit_*`
//! method before any of its children.

use crate::ast::*;
use crate::span::{Span, Spanned};

pub trait Visitor: Sized {
    fn visit_file(&mut self, file: &File) {
        walk_file(self, file);
    }

    fn visit_decl(&mut self, decl: &Spanned<Decl>) {
        walk_decl(self, decl);
    }

    fn visit_func_decl(&mut self, func: &FuncDecl, span: Span) {
        walk_func_decl(self, func, span);
    }

    fn visit_func_lit(&mut self, lit: &FuncLit, span: Span) {
        walk_func_lit(self, lit, span);
    }

    fn visit_gen_decl(&mut self, decl: &GenDecl, span: Span) {
        walk_gen_decl(self, decl, span);
    }

    fn visit_block(&mut self, block: &Spanned<Block>) {
        walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &Spanned<Stmt>) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Spanned<Expr>) {
        walk_expr(self, expr);
    }

    fn visit_type_expr(&mut self, _ty: &TypeExpr) {
        // Type expressions never contain statements or function literals.
    }
}

pub fn walk_file<V: Visitor>(v: &mut V, file: &File) {
    for decl in &file.decls {
        v.visit_decl(decl);
    }
}

pub fn walk_decl<V: Visitor>(v: &mut V, decl: &Spanned<Decl>) {
    match &decl.node {
        Decl::Func(func) => v.visit_func_decl(func, decl.span),
        Decl::Gen(gen_decl) => v.visit_gen_decl(gen_decl, decl.span),
    }
}

pub fn walk_func_decl<V: Visitor>(v: &mut V, func: &FuncDecl, _span: Span) {
    if let Some(recv) = &func.recv {
        walk_field_list(v, recv);
    }
    walk_func_type(v, &func.ty);
    if let Some(body) = &func.body {
        v.visit_block(body);
    }
}

pub fn walk_func_lit<V: Visitor>(v: &mut V, lit: &FuncLit, _span: Span) {
    walk_func_type(v, &lit.ty);
    v.visit_block(&lit.body);
}

pub fn walk_func_type<V: Visitor>(v: &mut V, ty: &FuncType) {
    walk_field_list(v, &ty.params);
    if let Some(results) = &ty.results {
        walk_field_list(v, results);
    }
}

pub fn walk_field_list<V: Visitor>(v: &mut V, list: &FieldList) {
    for field in &list.fields {
        v.visit_type_expr(&field.ty.node);
    }
}

pub fn walk_gen_decl<V: Visitor>(v: &mut V, decl: &GenDecl, _span: Span) {
    for spec in &decl.specs {
        match spec {
            Spec::Value(value) => {
                if let Some(ty) = &value.ty {
                    v.visit_type_expr(&ty.node);
                }
                for expr in &value.values {
                    v.visit_expr(expr);
                }
            }
            Spec::Type(type_spec) => v.visit_type_expr(&type_spec.ty.node),
        }
    }
}

pub fn walk_block<V: Visitor>(v: &mut V, block: &Spanned<Block>) {
    for stmt in &block.node.stmts {
        v.visit_stmt(stmt);
    }
}

fn walk_opt_stmt<V: Visitor>(v: &mut V, stmt: &Option<Box<Spanned<Stmt>>>) {
    if let Some(stmt) = stmt {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor>(v: &mut V, stmt: &Spanned<Stmt>) {
    match &stmt.node {
        Stmt::Assign { lhs, rhs, .. } => {
            for expr in lhs {
                v.visit_expr(expr);
            }
            for expr in rhs {
                v.visit_expr(expr);
            }
        }
        Stmt::Decl(decl) => v.visit_gen_decl(decl, stmt.span),
        Stmt::Return(results) => {
            for expr in results {
                v.visit_expr(expr);
            }
        }
        Stmt::Defer(call) | Stmt::Go(call) => v.visit_expr(call),
        Stmt::Block(block) => {
            for inner in &block.stmts {
                v.visit_stmt(inner);
            }
        }
        Stmt::If {
            init,
            cond,
            then_block,
            else_stmt,
        } => {
            walk_opt_stmt(v, init);
            v.visit_expr(cond);
            v.visit_block(then_block);
            walk_opt_stmt(v, else_stmt);
        }
        Stmt::For {
            init,
            cond,
            post,
            body,
        } => {
            walk_opt_stmt(v, init);
            if let Some(cond) = cond {
                v.visit_expr(cond);
            }
            walk_opt_stmt(v, post);
            v.visit_block(body);
        }
        Stmt::Range {
            key, value, x, body, ..
        } => {
            if let Some(key) = key {
                v.visit_expr(key);
            }
            if let Some(value) = value {
                v.visit_expr(value);
            }
            v.visit_expr(x);
            v.visit_block(body);
        }
        Stmt::Switch { init, tag, clauses } => {
            walk_opt_stmt(v, init);
            if let Some(tag) = tag {
                v.visit_expr(tag);
            }
            for clause in clauses {
                for expr in &clause.node.list {
                    v.visit_expr(expr);
                }
                for inner in &clause.node.body {
                    v.visit_stmt(inner);
                }
            }
        }
        Stmt::TypeSwitch {
            init,
            assign,
            clauses,
        } => {
            walk_opt_stmt(v, init);
            v.visit_stmt(assign);
            for clause in clauses {
                for expr in &clause.node.list {
                    v.visit_expr(expr);
                }
                for inner in &clause.node.body {
                    v.visit_stmt(inner);
                }
            }
        }
        Stmt::Select { clauses } => {
            for clause in clauses {
                walk_opt_stmt(v, &clause.node.comm);
                for inner in &clause.node.body {
                    v.visit_stmt(inner);
                }
            }
        }
        Stmt::Labeled { stmt: inner, .. } => v.visit_stmt(inner),
        Stmt::Expr(expr) => v.visit_expr(expr),
        Stmt::IncDec { x, .. } => v.visit_expr(x),
        Stmt::Send { chan, value } => {
            v.visit_expr(chan);
            v.visit_expr(value);
        }
        Stmt::Branch { .. } | Stmt::Empty => {}
    }
}

pub fn walk_expr<V: Visitor>(v: &mut V, expr: &Spanned<Expr>) {
    match &expr.node {
        // Leaves
        Expr::Ident(_) | Expr::BasicLit { .. } => {}
        Expr::FuncLit(lit) => v.visit_func_lit(lit, expr.span),
        Expr::Call { fun, args, .. } => {
            v.visit_expr(fun);
            for arg in args {
                v.visit_expr(arg);
            }
        }
        Expr::Selector { x, .. } => v.visit_expr(x),
        Expr::Index { x, indices } => {
            v.visit_expr(x);
            for index in indices {
                v.visit_expr(index);
            }
        }
        Expr::Slice { x, low, high, max } => {
            v.visit_expr(x);
            for bound in [low, high, max].into_iter().flatten() {
                v.visit_expr(bound);
            }
        }
        Expr::Unary { x, .. } | Expr::Star(x) | Expr::Paren(x) => v.visit_expr(x),
        Expr::Binary { x, y, .. } => {
            v.visit_expr(x);
            v.visit_expr(y);
        }
        Expr::CompositeLit { ty, elts } => {
            if let Some(ty) = ty {
                v.visit_type_expr(&ty.node);
            }
            for elt in elts {
                v.visit_expr(elt);
            }
        }
        Expr::KeyValue { key, value } => {
            v.visit_expr(key);
            v.visit_expr(value);
        }
        Expr::TypeAssert { x, ty } => {
            v.visit_expr(x);
            if let Some(ty) = ty {
                v.visit_type_expr(&ty.node);
            }
        }
        Expr::Type(ty) => v.visit_type_expr(&ty.node),
    }
}
