//! Core syntax-tree types for ifunc.
//!
//! This is a deliberately small model of a parsed Go program: enough to find
//! top-level declarations by name, inspect type shapes, and describe the
//! declarations the generator emits. Anything that the generator never looks
//! into is kept as raw source text.

mod decl;
mod expr;
mod stmt;
mod types;

pub use decl::*;
pub use expr::*;
pub use stmt::*;
pub use types::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A parsed program: every package found under one source location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Packages keyed by package name.
    pub packages: BTreeMap<String, Package>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the package it declares, creating the package if needed.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, file: File) {
        self.packages
            .entry(file.package.clone())
            .or_insert_with(|| Package::new(file.package.clone()))
            .files
            .insert(path.into(), file);
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// A package: the files that share one `package` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    /// Files keyed by path.
    pub files: BTreeMap<PathBuf, File>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: BTreeMap::new(),
        }
    }
}

/// A single source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Name from the `package` clause.
    pub package: String,
    /// Top-level scope.
    pub scope: Scope,
}

impl File {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            scope: Scope::default(),
        }
    }

    /// Builder-style insert, handy for assembling programs by hand.
    pub fn with(mut self, name: impl Into<String>, binding: Binding) -> Self {
        self.scope.insert(name, binding);
        self
    }
}

/// Maps top-level identifiers to what they are bound to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub objects: BTreeMap<String, Binding>,
}

impl Scope {
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.objects.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, binding: Binding) {
        self.objects.insert(name.into(), binding);
    }
}

/// The declaration a top-level name resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Binding {
    /// `type Name ...`
    Type(TypeSpec),
    /// `func Name(...) ...`
    Func(FuncDecl),
    /// `var name ...`
    Var(String),
    /// `const name ...`
    Const(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_groups_by_package() {
        let mut program = Program::new();
        program.add_file("a.go", File::new("foo"));
        program.add_file("b.go", File::new("foo"));
        program.add_file("a_test.go", File::new("foo_test"));

        assert_eq!(program.packages.len(), 2);
        assert_eq!(program.packages["foo"].files.len(), 2);
        assert_eq!(program.packages["foo_test"].name, "foo_test");
    }

    #[test]
    fn test_program_json_shape() {
        let file = File::new("foo").with("Answer", Binding::Const("Answer".into()));
        let mut program = Program::new();
        program.add_file("foo.go", file);

        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(
            json["packages"]["foo"]["files"]["foo.go"]["scope"]["objects"]["Answer"],
            serde_json::json!({ "Const": "Answer" })
        );
        let back: Program = serde_json::from_value(json).unwrap();
        assert_eq!(back, program);
    }
}
