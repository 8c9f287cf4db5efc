use crate::ir::Stmt;
use crate::parse::{parse_line, ParseError};

use log::trace;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Error line {line}: {err}")]
pub struct AsmError {
    pub line: usize,
    #[source]
    pub err: ParseError,
}

#[derive(Debug, Clone, Default)]
pub struct Program {
    pub text: Vec<u8>,
    pub stmts: Vec<Stmt>,
}

/// Assembles a whole source file. The first bad line aborts; no partial image
/// is produced.
pub fn assemble(prog: &str) -> Result<Program, AsmError> {
    let mut out = Program::default();

    for (src, line) in prog.lines().zip(1..) {
        let ins = parse_line(src).map_err(|err| AsmError { line, err })?;
        let Some(ins) = ins else {
            continue;
        };

        let stmt = Stmt { line, addr: out.text.len(), ins };
        trace!("Line {line}: {ins} at {:#x}", stmt.addr);
        stmt.emit(&mut out.text);
        out.stmts.push(stmt);
    }

    Ok(out)
}
