//! Go writer for ifunc IR.
//!
//! - `GoWriter`: Emit declarations as gofmt-style Go source

mod writer;

pub use writer::GoWriter;
