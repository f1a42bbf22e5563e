//! Type expressions and field lists.

use serde::{Deserialize, Serialize};

/// A type as written in source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// Named type in the current package: `Request`, `byte`.
    Ident(String),

    /// Type from another package: `context.Context`.
    Qualified { package: String, name: String },

    /// Pointer: `*T`.
    Pointer(Box<TypeExpr>),

    /// Slice: `[]T`.
    Slice(Box<TypeExpr>),

    /// Array: `[N]T`. The length is kept as written.
    Array { len: String, elem: Box<TypeExpr> },

    /// Map: `map[K]V`.
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },

    /// Channel: `chan T`, `<-chan T`, `chan<- T`.
    Chan { dir: ChanDir, elem: Box<TypeExpr> },

    /// Function type: `func(params) results`.
    Func(FuncType),

    /// Interface type: `interface { ... }`.
    Interface(InterfaceType),

    /// Variadic parameter type: `...T`. Only valid as the last parameter.
    Variadic(Box<TypeExpr>),

    /// Instantiated generic type: `List[T]`.
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },

    /// Parenthesized type: `(T)`.
    Paren(Box<TypeExpr>),

    /// Anything else, kept verbatim (struct literals, unions, ...).
    Raw(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

// Builder methods for types
impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(inner))
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(elem))
    }

    pub fn array(len: impl Into<String>, elem: TypeExpr) -> Self {
        TypeExpr::Array {
            len: len.into(),
            elem: Box::new(elem),
        }
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: TypeExpr) -> Self {
        TypeExpr::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    pub fn func(params: Vec<Field>, results: Option<Vec<Field>>) -> Self {
        TypeExpr::Func(FuncType::new(params, results))
    }

    pub fn interface(methods: Vec<Field>) -> Self {
        TypeExpr::Interface(InterfaceType { methods })
    }

    pub fn variadic(elem: TypeExpr) -> Self {
        TypeExpr::Variadic(Box::new(elem))
    }

    pub fn generic(base: TypeExpr, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Generic {
            base: Box::new(base),
            args,
        }
    }

    pub fn paren(inner: TypeExpr) -> Self {
        TypeExpr::Paren(Box::new(inner))
    }

    pub fn raw(text: impl Into<String>) -> Self {
        TypeExpr::Raw(text.into())
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self, TypeExpr::Variadic(_))
    }
}

/// A field in a parameter, result, receiver or method list.
///
/// `names` may be empty (an unnamed parameter or an embedded interface) or
/// hold several names sharing one type (`a, b int`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeExpr,
}

impl Field {
    pub fn new(names: Vec<String>, ty: TypeExpr) -> Self {
        Self { names, ty }
    }

    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self::new(vec![name.into()], ty)
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self::new(Vec::new(), ty)
    }

    /// A method entry of an interface: `Name(params) results`.
    pub fn method(name: impl Into<String>, signature: FuncType) -> Self {
        Self::named(name, TypeExpr::Func(signature))
    }
}

/// A function signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncType {
    pub params: Vec<Field>,
    /// `None` when the function declares no results at all.
    pub results: Option<Vec<Field>>,
}

impl FuncType {
    pub fn new(params: Vec<Field>, results: Option<Vec<Field>>) -> Self {
        Self { params, results }
    }

    pub fn has_results(&self) -> bool {
        self.results.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// Number of parameters, counting each name of a multi-name field.
    pub fn param_count(&self) -> usize {
        self.params.iter().map(|f| f.names.len().max(1)).sum()
    }
}

/// An interface body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceType {
    /// Method entries in declaration order. Embedded interfaces appear as
    /// fields without names.
    pub methods: Vec<Field>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_results() {
        let none = FuncType::new(vec![], None);
        let empty = FuncType::new(vec![], Some(vec![]));
        let one = FuncType::new(vec![], Some(vec![Field::unnamed(TypeExpr::ident("error"))]));
        assert!(!none.has_results());
        assert!(!empty.has_results());
        assert!(one.has_results());
    }

    #[test]
    fn test_param_count() {
        let sig = FuncType::new(
            vec![
                Field::new(vec!["a".into(), "b".into()], TypeExpr::ident("int")),
                Field::unnamed(TypeExpr::ident("string")),
            ],
            None,
        );
        assert_eq!(sig.param_count(), 3);
    }
}
