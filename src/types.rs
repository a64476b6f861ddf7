//! Type and object identity as reported by the external type checker.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ast::{Ident, NodeId, TypeExpr};

/// Identity of a declared object (variable, constant, ...). Two identifiers
/// refer to the same binding iff they resolve to the same `ObjectId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// A resolved type, reduced to what identity checks need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedType {
    /// The predeclared `error` interface from the universe scope.
    UniverseError,
    /// Predeclared basic types: `int`, `string`, `bool`, ...
    Basic(String),
    /// A defined type. `package` is `None` only for the universe scope.
    Named { package: Option<String>, name: String },
    /// Any other type, keyed by the front end's canonical type string.
    Composite(String),
}

impl ResolvedType {
    pub fn is_universe_error(&self) -> bool {
        matches!(self, ResolvedType::UniverseError)
    }
}

/// Queries the analyzer needs from the front end's type checker.
pub trait TypeResolver {
    /// Resolved type of a type expression, if the checker recorded one.
    fn type_of(&self, ty: &TypeExpr) -> Option<&ResolvedType>;

    /// Object an identifier defines or refers to.
    fn object_of(&self, ident: &Ident) -> Option<ObjectId>;

    /// Whether `ty` is identical to the universe `error` type.
    fn is_error_type(&self, ty: &TypeExpr) -> bool {
        self.type_of(ty).is_some_and(ResolvedType::is_universe_error)
    }
}

/// Serializable type tables filled by the front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    #[serde(default)]
    pub types: BTreeMap<NodeId, ResolvedType>,
    /// Definitions and uses, merged: identifier node -> object.
    #[serde(default)]
    pub objects: BTreeMap<NodeId, ObjectId>,
}

impl TypeInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_type(&mut self, node: NodeId, ty: ResolvedType) {
        self.types.insert(node, ty);
    }

    pub fn record_object(&mut self, node: NodeId, object: ObjectId) {
        self.objects.insert(node, object);
    }
}

impl TypeResolver for TypeInfo {
    fn type_of(&self, ty: &TypeExpr) -> Option<&ResolvedType> {
        self.types.get(&ty.id)
    }

    fn object_of(&self, ident: &Ident) -> Option<ObjectId> {
        self.objects.get(&ident.id).copied()
    }
}
