//! Statement types for the IR.

use crate::Expr;
use serde::{Deserialize, Serialize};

/// A statement in a function body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Expression statement: `expr`.
    Expr(Expr),

    /// Return statement: `return a, b`.
    Return(Vec<Expr>),
}

// Builder methods for statements
impl Stmt {
    pub fn expr(e: Expr) -> Self {
        Stmt::Expr(e)
    }

    pub fn return_stmt(values: Vec<Expr>) -> Self {
        Stmt::Return(values)
    }
}
