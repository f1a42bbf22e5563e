//! Top-level declarations.

use crate::{Field, FuncType, Stmt, TypeExpr};
use serde::{Deserialize, Serialize};

/// A top-level declaration that can be printed back to source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decl {
    /// `type Name T`
    Type(TypeSpec),
    /// `func (recv) Name(params) results { body }`
    Func(FuncDecl),
}

/// `type Name[TypeParams] T` or `type Name = T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: String,
    /// Type parameters; empty for non-generic types.
    pub type_params: Vec<Field>,
    pub ty: TypeExpr,
    /// True for alias declarations (`type A = B`).
    pub alias: bool,
}

impl TypeSpec {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            ty,
            alias: false,
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    /// Receiver, for methods.
    pub recv: Option<Field>,
    pub name: String,
    pub ty: FuncType,
    /// `None` when the body was not read (or is absent, as for assembly stubs).
    pub body: Option<Vec<Stmt>>,
}

impl FuncDecl {
    pub fn new(name: impl Into<String>, ty: FuncType) -> Self {
        Self {
            recv: None,
            name: name.into(),
            ty,
            body: None,
        }
    }

    pub fn method(recv: Field, name: impl Into<String>, ty: FuncType, body: Vec<Stmt>) -> Self {
        Self {
            recv: Some(recv),
            name: name.into(),
            ty,
            body: Some(body),
        }
    }
}
