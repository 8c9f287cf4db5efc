pub mod assembler;
pub mod ir;
pub mod lex;
pub mod parse;

pub use assembler::{assemble, AsmError, Program};
pub use parse::ParseError;
