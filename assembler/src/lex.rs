use std::num::IntErrorKind;

use logos::{Lexer, Logos};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy, Default)]
pub enum LexErr {
    #[error("hex literal has no digits")]
    InvalidHexEmpty,

    #[error("numeric literal does not fit in 16 bits")]
    DoesNotFitU16,

    #[error("could not parse integer")]
    UnknownIntErr,

    #[default]
    #[error("unrecognized symbol")]
    InvalidSymbol,
}

/// One line of assembly. Lines are lexed on their own, so there's no newline.
#[derive(Debug, Logos, PartialEq, Eq, Clone)]
#[logos(skip r"[ \t\r]+", error = LexErr)]
pub enum Token {
    #[regex(r"0[xX][0-9A-Fa-f]*", lex_hex)]
    Hex(u16),

    #[regex(r"[0-9]+", lex_dec)]
    Dec(u16),

    // Mnemonics and register names.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lx| lx.slice().to_string())]
    Ident(String),

    #[token(",")]
    Comma,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    // Runs to the end of the line.
    #[regex(r";.*")]
    Comment,
}

fn convert_int_error(kind: &IntErrorKind) -> LexErr {
    match kind {
        IntErrorKind::Empty => LexErr::InvalidHexEmpty,
        IntErrorKind::PosOverflow => LexErr::DoesNotFitU16,
        _ => LexErr::UnknownIntErr,
    }
}

fn lex_hex(lx: &Lexer<'_, Token>) -> Result<u16, LexErr> {
    let digits = &lx.slice()[2..];
    u16::from_str_radix(digits, 16).map_err(|e| convert_int_error(e.kind()))
}

fn lex_dec(lx: &Lexer<'_, Token>) -> Result<u16, LexErr> {
    lx.slice().parse::<u16>().map_err(|e| convert_int_error(e.kind()))
}
