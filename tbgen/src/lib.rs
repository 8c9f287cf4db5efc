//! Turns a program binary into a Verilog testbench that preloads it into the
//! CPU's PRAM, runs the CPU for a fixed number of cycles, and traces it.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod dut;
pub mod harness;
pub mod loader;

pub use harness::{Harness, Preload, PreloadKind, WriteError};
pub use loader::{LoadError, Program, Truncation, load_program};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Debug, Clone)]
pub struct Report {
    pub output: PathBuf,
    // Bytes actually preloaded, after truncation.
    pub program_size: usize,
    pub truncation: Option<Truncation>,
}

/// Loads `input` and writes its testbench to `output`. Nothing is written if
/// the input can't be loaded.
pub fn generate(input: &Path, output: &Path) -> Result<Report, Error> {
    let prog = load_program(input)?;
    Harness::new(&prog).write_to(output)?;
    Ok(Report {
        output: output.to_owned(),
        program_size: prog.len(),
        truncation: prog.truncation(),
    })
}
