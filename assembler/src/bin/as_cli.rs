use std::fs::File;
use std::io::Write;
use std::process::ExitCode;

use as_lib::assemble;

use clap::Parser;
use clap_stdin::FileOrStdin;

/// CPU Assembler
#[derive(Parser)]
#[command(about)]
struct Args {
    /// Input assembly file
    input: FileOrStdin,

    /// File name to output to
    #[arg(long, short)]
    output: Option<String>,

    /// Print each instruction with its address.
    #[arg(long)]
    listing: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let input = match args.input.contents() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error reading input: {e}");
            return ExitCode::FAILURE;
        }
    };

    let prog = match assemble(input.as_str()) {
        Ok(prog) => prog,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if args.listing {
        for stmt in &prog.stmts {
            eprintln!("{:03}:\t{}", stmt.addr, stmt.ins);
        }
    }

    let outname = args.output.as_deref().unwrap_or("a.bin");
    let res = File::create(outname).and_then(|mut out| out.write_all(&prog.text));
    if let Err(e) = res {
        eprintln!("Error writing {outname}: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
