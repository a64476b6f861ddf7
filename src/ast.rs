//! Go syntax tree as handed over by the external front end.
//!
//! Only the shape the checks need is modeled. Every identifier and type
//! expression carries a `NodeId` so the type tables in [`crate::types`] can
//! answer identity queries about it.

use serde::{Deserialize, Serialize};

use crate::span::Spanned;

/// Front-end assigned node identifier, unique within one compilation unit.
pub type NodeId = u32;

/// The placeholder identifier.
pub const BLANK: &str = "_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub package: Spanned<Ident>,
    #[serde(default)]
    pub imports: Vec<Spanned<String>>,
    #[serde(default)]
    pub decls: Vec<Spanned<Decl>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    pub id: NodeId,
    pub name: String,
}

impl Ident {
    pub fn is_blank(&self) -> bool {
        self.name == BLANK
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    #[serde(default)]
    pub recv: Option<FieldList>,
    pub name: Spanned<Ident>,
    pub ty: FuncType,
    /// Absent for declarations implemented outside Go (assembly, linkname).
    #[serde(default)]
    pub body: Option<Spanned<Block>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncLit {
    pub ty: FuncType,
    pub body: Spanned<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncType {
    #[serde(default)]
    pub params: FieldList,
    #[serde(default)]
    pub results: Option<FieldList>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldList {
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl FieldList {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub names: Vec<Spanned<Ident>>,
    pub ty: Spanned<TypeExpr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenKind {
    Var,
    Const,
    Type,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenDecl {
    pub kind: GenKind,
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Spec {
    Value(ValueSpec),
    Type(TypeSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub names: Vec<Spanned<Ident>>,
    #[serde(default)]
    pub ty: Option<Spanned<TypeExpr>>,
    #[serde(default)]
    pub values: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: Spanned<Ident>,
    pub ty: Spanned<TypeExpr>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignTok {
    /// `=`
    Assign,
    /// `:=`
    Define,
    /// `+=`, `<<=`, ...
    Op,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchTok {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Assign {
        lhs: Vec<Spanned<Expr>>,
        tok: AssignTok,
        rhs: Vec<Spanned<Expr>>,
    },
    Decl(GenDecl),
    Return(Vec<Spanned<Expr>>),
    Defer(Spanned<Expr>),
    Go(Spanned<Expr>),
    Block(Block),
    If {
        init: Option<Box<Spanned<Stmt>>>,
        cond: Spanned<Expr>,
        then_block: Spanned<Block>,
        else_stmt: Option<Box<Spanned<Stmt>>>,
    },
    For {
        init: Option<Box<Spanned<Stmt>>>,
        cond: Option<Spanned<Expr>>,
        post: Option<Box<Spanned<Stmt>>>,
        body: Spanned<Block>,
    },
    Range {
        key: Option<Spanned<Expr>>,
        value: Option<Spanned<Expr>>,
        /// `None` for `for range x`.
        tok: Option<AssignTok>,
        x: Spanned<Expr>,
        body: Spanned<Block>,
    },
    Switch {
        init: Option<Box<Spanned<Stmt>>>,
        tag: Option<Spanned<Expr>>,
        clauses: Vec<Spanned<CaseClause>>,
    },
    TypeSwitch {
        init: Option<Box<Spanned<Stmt>>>,
        /// `x := y.(type)` or `y.(type)`
        assign: Box<Spanned<Stmt>>,
        clauses: Vec<Spanned<CaseClause>>,
    },
    Select {
        clauses: Vec<Spanned<CommClause>>,
    },
    Labeled {
        label: Spanned<Ident>,
        stmt: Box<Spanned<Stmt>>,
    },
    Expr(Spanned<Expr>),
    IncDec {
        x: Spanned<Expr>,
        inc: bool,
    },
    Send {
        chan: Spanned<Expr>,
        value: Spanned<Expr>,
    },
    Branch {
        tok: BranchTok,
        label: Option<Spanned<Ident>>,
    },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseClause {
    /// Empty for `default:`.
    #[serde(default)]
    pub list: Vec<Spanned<Expr>>,
    pub body: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommClause {
    /// `None` for `default:`.
    #[serde(default)]
    pub comm: Option<Box<Spanned<Stmt>>>,
    pub body: Vec<Spanned<Stmt>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Ident(Ident),
    BasicLit {
        kind: LitKind,
        value: String,
    },
    FuncLit(FuncLit),
    Call {
        fun: Box<Spanned<Expr>>,
        args: Vec<Spanned<Expr>>,
        #[serde(default)]
        ellipsis: bool,
    },
    Selector {
        x: Box<Spanned<Expr>>,
        sel: Spanned<Ident>,
    },
    Index {
        x: Box<Spanned<Expr>>,
        indices: Vec<Spanned<Expr>>,
    },
    Slice {
        x: Box<Spanned<Expr>>,
        low: Option<Box<Spanned<Expr>>>,
        high: Option<Box<Spanned<Expr>>>,
        max: Option<Box<Spanned<Expr>>>,
    },
    Unary {
        op: String,
        x: Box<Spanned<Expr>>,
    },
    Binary {
        op: String,
        x: Box<Spanned<Expr>>,
        y: Box<Spanned<Expr>>,
    },
    Star(Box<Spanned<Expr>>),
    Paren(Box<Spanned<Expr>>),
    CompositeLit {
        ty: Option<Spanned<TypeExpr>>,
        elts: Vec<Spanned<Expr>>,
    },
    KeyValue {
        key: Box<Spanned<Expr>>,
        value: Box<Spanned<Expr>>,
    },
    /// `x.(T)`; `ty` is `None` inside a type switch guard.
    TypeAssert {
        x: Box<Spanned<Expr>>,
        ty: Option<Spanned<TypeExpr>>,
    },
    /// A type used in expression position, e.g. `make([]int, n)`.
    Type(Spanned<TypeExpr>),
}

impl Expr {
    /// The identifier if this expression is a plain reference, unparenthesized.
    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Ident(ident) => Some(ident),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeExpr {
    pub id: NodeId,
    pub kind: TypeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeKind {
    Name(String),
    Qualified {
        package: String,
        name: String,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array {
        len: String,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func(Box<FuncType>),
    Ellipsis(Box<TypeExpr>),
    Interface(FieldList),
    Struct(FieldList),
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
}
