use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

/// Generate a Verilog testbench that preloads a program binary into the CPU's PRAM
#[derive(Parser)]
#[command(about)]
struct Args {
    /// Program binary
    input: PathBuf,

    /// Testbench file to write
    output: PathBuf,
}

fn main() -> ExitCode {
    // Truncation warnings must show up without RUST_LOG set.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match tbgen::generate(&args.input, &args.output) {
        Ok(report) => {
            println!("Generated testbench: {}", report.output.display());
            println!("Program size: {} bytes", report.program_size);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
