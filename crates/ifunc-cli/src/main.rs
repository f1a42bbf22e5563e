//! `ifunc PATH INTERFACE`: print a function type and adapter method for a
//! single-method interface.
//!
//! Set `IFUNC_LOG` (e.g. `IFUNC_LOG=debug`) to trace the run on stderr.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use ifunc_go::GoWriter;
use ifunc_ir::Program;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    if let Ok(filter) = EnvFilter::try_from_env("IFUNC_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let program = load_program(&cli.path, cli.json)?;

    let location = cli.path.display().to_string();
    let generated = ifunc_gen::generate(&location, &cli.interface, &program)?;
    tracing::debug!(interface = %cli.interface, func_type = %generated.func_type.name, "generated");

    let output = GoWriter::emit(&generated.into_decls());
    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    Ok(())
}

fn load_program(path: &Path, json: bool) -> Result<Program> {
    if json {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("{} is not a valid program", path.display()));
    }
    ifunc_read_go::read_dir(path).with_context(|| format!("failed to parse {}", path.display()))
}
