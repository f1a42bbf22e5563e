use clap::Parser;
use std::path::PathBuf;

/// Generate a function type that implements a single-method Go interface
#[derive(Parser, Debug)]
#[command(name = "ifunc")]
#[command(version)]
#[command(about = "Generate a function adapter for a single-method Go interface", long_about = None)]
pub struct Cli {
    /// Directory of the Go package to scan (or a JSON program with --json)
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Name of the interface to adapt
    #[arg(value_name = "INTERFACE")]
    pub interface: String,

    /// Treat PATH as a JSON-serialized program instead of a source directory
    #[arg(long)]
    pub json: bool,
}
