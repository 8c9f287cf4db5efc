use std::io::ErrorKind;
use std::process::ExitCode;

use viewbin::{disassemble, hexdump};

use clap::Parser;

/// Binary viewer
#[derive(Parser)]
struct Args {
    /// Binary to view
    bin: String,

    /// Decode instructions instead of dumping bytes.
    #[arg(long, short)]
    disassemble: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let bin = match std::fs::read(&args.bin) {
        Ok(bin) => bin,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            eprintln!("File '{}' not found.", args.bin);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Unable to read '{}': {e}", args.bin);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("{}: {} bytes", args.bin, bin.len());

    if args.disassemble {
        for dis in disassemble(&bin) {
            println!("{dis}");
        }
    } else {
        for line in hexdump(&bin) {
            println!("{line}");
        }
    }
    ExitCode::SUCCESS
}
