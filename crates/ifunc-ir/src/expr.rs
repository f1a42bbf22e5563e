//! Expression types for the IR.

use serde::{Deserialize, Serialize};

/// An expression that produces a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Variable reference.
    Ident(String),

    /// Function call: `func(args...)`.
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        /// True when the last argument is spread: `f(a, rest...)`.
        ellipsis: bool,
    },
}

// Builder methods for expressions
impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            ellipsis: false,
        }
    }

    pub fn call_spread(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            ellipsis: true,
        }
    }
}
