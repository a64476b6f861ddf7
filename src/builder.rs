//! Programmatic construction of syntax trees together with their type tables.
//!
//! The builder plays the part of a front end: it hands out fresh node ids and
//! monotonically increasing spans, resolves type names, and binds identifiers
//! to objects by name. Name binding is flat: a `:=` or `var` re-binds the name
//! for every identifier built afterwards, there is no block scoping.
//!
//! All methods take `&self` so calls nest naturally:
//!
//! ```rust
//! use namedreturns::builder::UnitBuilder;
//!
//! let b = UnitBuilder::new("div.go");
//! b.func(
//!     "div",
//!     vec![b.param("a", "int"), b.param("d", "int")],
//!     Some(vec![b.result("q", "int"), b.result("err", "error")]),
//!     vec![b.ret(&["q", "err"])],
//! );
//! let unit = b.finish();
//! assert_eq!(unit.syntax.unwrap().decls.len(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::ast::*;
use crate::span::{Span, Spanned};
use crate::types::{ObjectId, ResolvedType, TypeInfo};
use crate::unit::CompilationUnit;

const BASIC_TYPES: &[&str] = &[
    "any", "bool", "byte", "complex64", "complex128", "float32", "float64", "int", "int8", "int16",
    "int32", "int64", "rune", "string", "uint", "uint8", "uint16", "uint32", "uint64", "uintptr",
];

pub struct UnitBuilder {
    path: PathBuf,
    package: String,
    next_id: Cell<NodeId>,
    next_object: Cell<u32>,
    offset: Cell<usize>,
    types: RefCell<TypeInfo>,
    scope: RefCell<HashMap<String, ObjectId>>,
    decls: RefCell<Vec<Spanned<Decl>>>,
}

impl UnitBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_package(path, "main")
    }

    pub fn with_package(path: impl Into<PathBuf>, package: &str) -> Self {
        Self {
            path: path.into(),
            package: package.to_string(),
            next_id: Cell::new(1),
            next_object: Cell::new(1),
            offset: Cell::new(0),
            types: RefCell::new(TypeInfo::new()),
            scope: RefCell::new(HashMap::new()),
            decls: RefCell::new(Vec::new()),
        }
    }

    // ---- bookkeeping ----

    fn node_id(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn span(&self, width: usize) -> Span {
        let start = self.offset.get();
        self.offset.set(start + width + 1);
        Span::new(start, start + width)
    }

    /// A fresh span extended to cover everything in `children`.
    fn around(&self, children: impl IntoIterator<Item = Span>) -> Span {
        children.into_iter().fold(self.span(1), Span::cover)
    }

    fn new_object(&self, name: &str) -> ObjectId {
        let object = ObjectId(self.next_object.get());
        self.next_object.set(object.0 + 1);
        self.scope.borrow_mut().insert(name.to_string(), object);
        object
    }

    /// Object currently bound to `name`.
    pub fn object(&self, name: &str) -> Option<ObjectId> {
        self.scope.borrow().get(name).copied()
    }

    // ---- identifiers ----

    /// An identifier that resolves to nothing (labels, selectors).
    pub fn ident(&self, name: &str) -> Spanned<Ident> {
        Spanned::new(Ident { id: self.node_id(), name: name.to_string() }, self.span(name.len()))
    }

    /// An identifier declaring a fresh object for `name`.
    pub fn bind(&self, name: &str) -> Spanned<Ident> {
        let ident = self.ident(name);
        if !ident.node.is_blank() {
            let object = self.new_object(name);
            self.types.borrow_mut().record_object(ident.node.id, object);
        }
        ident
    }

    /// An identifier expression referring to the current binding of `name`.
    pub fn name(&self, name: &str) -> Spanned<Expr> {
        let ident = self.ident(name);
        if let Some(object) = self.object(name) {
            self.types.borrow_mut().record_object(ident.node.id, object);
        }
        Spanned::new(Expr::Ident(ident.node), ident.span)
    }

    fn bind_expr(&self, name: &str) -> Spanned<Expr> {
        let ident = self.bind(name);
        Spanned::new(Expr::Ident(ident.node), ident.span)
    }

    // ---- types ----

    fn type_expr(&self, kind: TypeKind, resolved: ResolvedType, width: usize) -> Spanned<TypeExpr> {
        let id = self.node_id();
        self.types.borrow_mut().record_type(id, resolved);
        Spanned::new(TypeExpr { id, kind }, self.span(width))
    }

    /// A type by name: `error` is the universe error, basic names resolve as
    /// basic types, anything else is a type defined in this package.
    pub fn ty(&self, name: &str) -> Spanned<TypeExpr> {
        let resolved = if name == "error" {
            ResolvedType::UniverseError
        } else if BASIC_TYPES.contains(&name) {
            ResolvedType::Basic(name.to_string())
        } else {
            ResolvedType::Named { package: Some(self.package.clone()), name: name.to_string() }
        };
        self.type_expr(TypeKind::Name(name.to_string()), resolved, name.len())
    }

    /// A locally defined type that merely shares a name with a predeclared one.
    pub fn local_ty(&self, name: &str) -> Spanned<TypeExpr> {
        let resolved = ResolvedType::Named { package: Some(self.package.clone()), name: name.to_string() };
        self.type_expr(TypeKind::Name(name.to_string()), resolved, name.len())
    }

    pub fn qualified_ty(&self, package: &str, name: &str) -> Spanned<TypeExpr> {
        let resolved = ResolvedType::Named { package: Some(package.to_string()), name: name.to_string() };
        let kind = TypeKind::Qualified { package: package.to_string(), name: name.to_string() };
        self.type_expr(kind, resolved, package.len() + name.len() + 1)
    }

    /// Any other type expression, resolved as an opaque composite.
    pub fn composite_ty(&self, kind: TypeKind) -> Spanned<TypeExpr> {
        let shape = TypeExpr { id: 0, kind };
        let key = crate::pretty::type_expr_string(&shape);
        self.type_expr(shape.kind, ResolvedType::Composite(key.clone()), key.len())
    }

    // ---- fields ----

    pub fn field(&self, names: &[&str], ty: Spanned<TypeExpr>) -> Field {
        Field { names: names.iter().map(|n| self.bind(n)).collect(), ty }
    }

    pub fn param(&self, name: &str, ty: &str) -> Field {
        let name = self.bind(name);
        Field { names: vec![name], ty: self.ty(ty) }
    }

    /// A named result `name ty`.
    pub fn result(&self, name: &str, ty: &str) -> Field {
        self.param(name, ty)
    }

    /// An unnamed result of type `ty`.
    pub fn unnamed(&self, ty: &str) -> Field {
        Field { names: Vec::new(), ty: self.ty(ty) }
    }

    // ---- expressions ----

    pub fn int(&self, value: i64) -> Spanned<Expr> {
        let value = value.to_string();
        let span = self.span(value.len());
        Spanned::new(Expr::BasicLit { kind: LitKind::Int, value }, span)
    }

    pub fn string_lit(&self, value: &str) -> Spanned<Expr> {
        let value = format!("{value:?}");
        let span = self.span(value.len());
        Spanned::new(Expr::BasicLit { kind: LitKind::String, value }, span)
    }

    pub fn nil(&self) -> Spanned<Expr> {
        self.name("nil")
    }

    pub fn call(&self, fun: &str, args: Vec<Spanned<Expr>>) -> Spanned<Expr> {
        let fun = self.name(fun);
        self.call_expr(fun, args)
    }

    pub fn call_expr(&self, fun: Spanned<Expr>, args: Vec<Spanned<Expr>>) -> Spanned<Expr> {
        let span = self.around(std::iter::once(fun.span).chain(args.iter().map(|a| a.span)));
        Spanned::new(Expr::Call { fun: Box::new(fun), args, ellipsis: false }, span)
    }

    pub fn selector(&self, x: Spanned<Expr>, sel: &str) -> Spanned<Expr> {
        let sel = self.ident(sel);
        let span = x.span.cover(sel.span);
        Spanned::new(Expr::Selector { x: Box::new(x), sel }, span)
    }

    pub fn binary(&self, op: &str, x: Spanned<Expr>, y: Spanned<Expr>) -> Spanned<Expr> {
        let span = x.span.cover(y.span);
        Spanned::new(Expr::Binary { op: op.to_string(), x: Box::new(x), y: Box::new(y) }, span)
    }

    pub fn paren(&self, x: Spanned<Expr>) -> Spanned<Expr> {
        let span = self.around([x.span]);
        Spanned::new(Expr::Paren(Box::new(x)), span)
    }

    pub fn func_lit(
        &self,
        params: Vec<Field>,
        results: Option<Vec<Field>>,
        body: Vec<Spanned<Stmt>>,
    ) -> Spanned<Expr> {
        let ty = func_type(params, results);
        let body = self.block_node(body);
        let span = self.around(field_spans(&ty).chain([body.span]));
        Spanned::new(Expr::FuncLit(FuncLit { ty, body }), span)
    }

    // ---- statements ----

    fn stmt(&self, stmt: Stmt, children: impl IntoIterator<Item = Span>) -> Spanned<Stmt> {
        let span = self.around(children);
        Spanned::new(stmt, span)
    }

    fn block_node(&self, stmts: Vec<Spanned<Stmt>>) -> Spanned<Block> {
        let span = self.around(stmts.iter().map(|s| s.span));
        Spanned::new(Block { stmts }, span)
    }

    /// `return a, b` referencing the current bindings of `names`.
    pub fn ret(&self, names: &[&str]) -> Spanned<Stmt> {
        let results = names.iter().map(|n| self.name(n)).collect();
        self.ret_exprs(results)
    }

    pub fn ret_exprs(&self, results: Vec<Spanned<Expr>>) -> Spanned<Stmt> {
        let spans: Vec<Span> = results.iter().map(|r| r.span).collect();
        self.stmt(Stmt::Return(results), spans)
    }

    pub fn bare_ret(&self) -> Spanned<Stmt> {
        self.ret_exprs(Vec::new())
    }

    /// `a, b = rhs...`
    pub fn assign(&self, lhs: &[&str], rhs: Vec<Spanned<Expr>>) -> Spanned<Stmt> {
        let lhs = lhs.iter().map(|n| self.name(n)).collect();
        self.assign_stmt(lhs, AssignTok::Assign, rhs)
    }

    /// `a, b := rhs...`. Every non-blank name gets a fresh object.
    pub fn define(&self, lhs: &[&str], rhs: Vec<Spanned<Expr>>) -> Spanned<Stmt> {
        let lhs = lhs.iter().map(|n| self.bind_expr(n)).collect();
        self.assign_stmt(lhs, AssignTok::Define, rhs)
    }

    pub fn assign_stmt(&self, lhs: Vec<Spanned<Expr>>, tok: AssignTok, rhs: Vec<Spanned<Expr>>) -> Spanned<Stmt> {
        let spans: Vec<Span> = lhs.iter().chain(rhs.iter()).map(|e| e.span).collect();
        self.stmt(Stmt::Assign { lhs, tok, rhs }, spans)
    }

    fn value_decl(&self, kind: GenKind, names: &[&str], ty: Option<&str>, values: Vec<Spanned<Expr>>) -> GenDecl {
        let names = names.iter().map(|n| self.bind(n)).collect();
        let ty = ty.map(|t| self.ty(t));
        GenDecl { kind, specs: vec![Spec::Value(ValueSpec { names, ty, values })] }
    }

    fn gen_spans(decl: &GenDecl) -> Vec<Span> {
        let mut spans = Vec::new();
        for spec in &decl.specs {
            if let Spec::Value(value) = spec {
                spans.extend(value.names.iter().map(|n| n.span));
                spans.extend(value.values.iter().map(|v| v.span));
            }
        }
        spans
    }

    /// `var a, b T = values...`
    pub fn var_decl(&self, names: &[&str], ty: Option<&str>, values: Vec<Spanned<Expr>>) -> Spanned<Stmt> {
        let decl = self.value_decl(GenKind::Var, names, ty, values);
        let spans = Self::gen_spans(&decl);
        self.stmt(Stmt::Decl(decl), spans)
    }

    /// `const a = value`
    pub fn const_decl(&self, names: &[&str], values: Vec<Spanned<Expr>>) -> Spanned<Stmt> {
        let decl = self.value_decl(GenKind::Const, names, None, values);
        let spans = Self::gen_spans(&decl);
        self.stmt(Stmt::Decl(decl), spans)
    }

    pub fn expr_stmt(&self, expr: Spanned<Expr>) -> Spanned<Stmt> {
        let span = expr.span;
        self.stmt(Stmt::Expr(expr), [span])
    }

    pub fn block(&self, stmts: Vec<Spanned<Stmt>>) -> Spanned<Stmt> {
        let spans: Vec<Span> = stmts.iter().map(|s| s.span).collect();
        self.stmt(Stmt::Block(Block { stmts }), spans)
    }

    pub fn if_stmt(
        &self,
        cond: Spanned<Expr>,
        then_body: Vec<Spanned<Stmt>>,
        else_body: Option<Vec<Spanned<Stmt>>>,
    ) -> Spanned<Stmt> {
        self.if_init(None, cond, then_body, else_body)
    }

    pub fn if_init(
        &self,
        init: Option<Spanned<Stmt>>,
        cond: Spanned<Expr>,
        then_body: Vec<Spanned<Stmt>>,
        else_body: Option<Vec<Spanned<Stmt>>>,
    ) -> Spanned<Stmt> {
        let then_block = self.block_node(then_body);
        let else_stmt = else_body.map(|stmts| Box::new(self.block(stmts)));
        let mut spans = vec![cond.span, then_block.span];
        spans.extend(init.iter().map(|s| s.span));
        spans.extend(else_stmt.iter().map(|s| s.span));
        self.stmt(
            Stmt::If { init: init.map(Box::new), cond, then_block, else_stmt },
            spans,
        )
    }

    pub fn for_stmt(
        &self,
        init: Option<Spanned<Stmt>>,
        cond: Option<Spanned<Expr>>,
        post: Option<Spanned<Stmt>>,
        body: Vec<Spanned<Stmt>>,
    ) -> Spanned<Stmt> {
        let body = self.block_node(body);
        let mut spans = vec![body.span];
        spans.extend(init.iter().map(|s| s.span));
        spans.extend(cond.iter().map(|c| c.span));
        spans.extend(post.iter().map(|s| s.span));
        self.stmt(
            Stmt::For { init: init.map(Box::new), cond, post: post.map(Box::new), body },
            spans,
        )
    }

    /// `for key, value := range x`. Pass `None` to omit a binding.
    pub fn range_define(
        &self,
        key: Option<&str>,
        value: Option<&str>,
        x: Spanned<Expr>,
        body: Vec<Spanned<Stmt>>,
    ) -> Spanned<Stmt> {
        let key = key.map(|k| self.bind_expr(k));
        let value = value.map(|v| self.bind_expr(v));
        self.range_stmt(key, value, Some(AssignTok::Define), x, body)
    }

    /// `for key, value = range x`, assigning existing bindings.
    pub fn range_assign(
        &self,
        key: Option<&str>,
        value: Option<&str>,
        x: Spanned<Expr>,
        body: Vec<Spanned<Stmt>>,
    ) -> Spanned<Stmt> {
        let key = key.map(|k| self.name(k));
        let value = value.map(|v| self.name(v));
        self.range_stmt(key, value, Some(AssignTok::Assign), x, body)
    }

    fn range_stmt(
        &self,
        key: Option<Spanned<Expr>>,
        value: Option<Spanned<Expr>>,
        tok: Option<AssignTok>,
        x: Spanned<Expr>,
        body: Vec<Spanned<Stmt>>,
    ) -> Spanned<Stmt> {
        let body = self.block_node(body);
        let mut spans = vec![x.span, body.span];
        spans.extend(key.iter().chain(value.iter()).map(|e| e.span));
        self.stmt(Stmt::Range { key, value, tok, x, body }, spans)
    }

    /// `switch tag { case ...: ... }`; an empty case list is `default:`.
    pub fn switch(
        &self,
        tag: Option<Spanned<Expr>>,
        clauses: Vec<(Vec<Spanned<Expr>>, Vec<Spanned<Stmt>>)>,
    ) -> Spanned<Stmt> {
        let clauses: Vec<Spanned<CaseClause>> = clauses
            .into_iter()
            .map(|(list, body)| {
                let span = self.around(list.iter().map(|e| e.span).chain(body.iter().map(|s| s.span)));
                Spanned::new(CaseClause { list, body }, span)
            })
            .collect();
        let mut spans: Vec<Span> = clauses.iter().map(|c| c.span).collect();
        spans.extend(tag.iter().map(|t| t.span));
        self.stmt(Stmt::Switch { init: None, tag, clauses }, spans)
    }

    /// `switch bind := x.(type) { case T1, T2: ... }`. `None` omits the
    /// binding; an empty type list is `default:`.
    pub fn type_switch(
        &self,
        bind: Option<&str>,
        x: Spanned<Expr>,
        clauses: Vec<(Vec<Spanned<TypeExpr>>, Vec<Spanned<Stmt>>)>,
    ) -> Spanned<Stmt> {
        let guard_span = self.around([x.span]);
        let guard = Spanned::new(Expr::TypeAssert { x: Box::new(x), ty: None }, guard_span);
        let assign = match bind {
            Some(name) => {
                let lhs = self.bind_expr(name);
                self.assign_stmt(vec![lhs], AssignTok::Define, vec![guard])
            }
            None => self.expr_stmt(guard),
        };
        let clauses: Vec<Spanned<CaseClause>> = clauses
            .into_iter()
            .map(|(types, body)| {
                let list: Vec<Spanned<Expr>> = types
                    .into_iter()
                    .map(|ty| {
                        let span = ty.span;
                        Spanned::new(Expr::Type(ty), span)
                    })
                    .collect();
                let span = self.around(list.iter().map(|e| e.span).chain(body.iter().map(|s| s.span)));
                Spanned::new(CaseClause { list, body }, span)
            })
            .collect();
        let mut spans: Vec<Span> = clauses.iter().map(|c| c.span).collect();
        spans.push(assign.span);
        self.stmt(Stmt::TypeSwitch { init: None, assign: Box::new(assign), clauses }, spans)
    }

    /// `select { case comm: ... }`; `None` comm is `default:`.
    pub fn select(&self, clauses: Vec<(Option<Spanned<Stmt>>, Vec<Spanned<Stmt>>)>) -> Spanned<Stmt> {
        let clauses: Vec<Spanned<CommClause>> = clauses
            .into_iter()
            .map(|(comm, body)| {
                let span = self.around(comm.iter().map(|c| c.span).chain(body.iter().map(|s| s.span)));
                Spanned::new(CommClause { comm: comm.map(Box::new), body }, span)
            })
            .collect();
        let spans: Vec<Span> = clauses.iter().map(|c| c.span).collect();
        self.stmt(Stmt::Select { clauses }, spans)
    }

    pub fn defer(&self, call: Spanned<Expr>) -> Spanned<Stmt> {
        let span = call.span;
        self.stmt(Stmt::Defer(call), [span])
    }

    /// `defer func() { body }()`
    pub fn defer_closure(&self, body: Vec<Spanned<Stmt>>) -> Spanned<Stmt> {
        let lit = self.func_lit(Vec::new(), None, body);
        let call = self.call_expr(lit, Vec::new());
        self.defer(call)
    }

    pub fn go_stmt(&self, call: Spanned<Expr>) -> Spanned<Stmt> {
        let span = call.span;
        self.stmt(Stmt::Go(call), [span])
    }

    pub fn labeled(&self, label: &str, stmt: Spanned<Stmt>) -> Spanned<Stmt> {
        let label = self.ident(label);
        let spans = [label.span, stmt.span];
        self.stmt(Stmt::Labeled { label, stmt: Box::new(stmt) }, spans)
    }

    // ---- declarations ----

    /// `func name(params) (results) { body }`. `results: None` declares no
    /// result list at all.
    pub fn func(
        &self,
        name: &str,
        params: Vec<Field>,
        results: Option<Vec<Field>>,
        body: Vec<Spanned<Stmt>>,
    ) -> Span {
        let ty = func_type(params, results);
        let body = self.block_node(body);
        let name = self.ident(name);
        let span = self.around(field_spans(&ty).chain([body.span, name.span]));
        self.push_decl(Decl::Func(FuncDecl { recv: None, name, ty, body: Some(body) }), span)
    }

    /// A method with receiver `recv`.
    pub fn method(
        &self,
        recv: Field,
        name: &str,
        params: Vec<Field>,
        results: Option<Vec<Field>>,
        body: Vec<Spanned<Stmt>>,
    ) -> Span {
        let recv = FieldList { fields: vec![recv] };
        let ty = func_type(params, results);
        let body = self.block_node(body);
        let name = self.ident(name);
        let span = self.around(
            recv.fields.iter().map(|f| f.ty.span).chain(field_spans(&ty)).chain([body.span, name.span]),
        );
        self.push_decl(Decl::Func(FuncDecl { recv: Some(recv), name, ty, body: Some(body) }), span)
    }

    /// A function implemented outside Go: signature only, no body.
    pub fn extern_func(&self, name: &str, params: Vec<Field>, results: Option<Vec<Field>>) -> Span {
        let ty = func_type(params, results);
        let name = self.ident(name);
        let span = self.around(field_spans(&ty).chain([name.span]));
        self.push_decl(Decl::Func(FuncDecl { recv: None, name, ty, body: None }), span)
    }

    /// Package-level `var name = value`.
    pub fn global_var(&self, name: &str, value: Spanned<Expr>) -> Span {
        let decl = self.value_decl(GenKind::Var, &[name], None, vec![value]);
        let span = self.around(Self::gen_spans(&decl));
        self.push_decl(Decl::Gen(decl), span)
    }

    fn push_decl(&self, decl: Decl, span: Span) -> Span {
        self.decls.borrow_mut().push(Spanned::new(decl, span));
        span
    }

    pub fn finish(self) -> CompilationUnit {
        let package = Spanned::new(Ident { id: 0, name: self.package.clone() }, Span::dummy());
        let file = File { package, imports: Vec::new(), decls: self.decls.into_inner() };
        CompilationUnit::new(self.path, file, self.types.into_inner())
    }
}

fn func_type(params: Vec<Field>, results: Option<Vec<Field>>) -> FuncType {
    FuncType {
        params: FieldList { fields: params },
        results: results.map(|fields| FieldList { fields }),
    }
}

fn field_spans(ty: &FuncType) -> impl Iterator<Item = Span> + '_ {
    ty.params
        .fields
        .iter()
        .chain(ty.results.iter().flat_map(|r| r.fields.iter()))
        .flat_map(|f| f.names.iter().map(|n| n.span).chain([f.ty.span]))
}
