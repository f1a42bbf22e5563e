//! Go reader for ifunc IR.
//!
//! Parses Go source code into ifunc IR using tree-sitter. Only top-level
//! declarations are read; function bodies are skipped.

mod reader;

pub use reader::{read, read_dir, ReadError};
