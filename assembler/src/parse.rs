use common::isa::{Ins, Reg};

use crate::ir::Operand;
use crate::lex::{LexErr, Token};

use logos::Logos;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexErr),

    #[error("unknown instruction '{0}'")]
    UnknownMnemonic(String),

    #[error("expected {0}")]
    Expected(&'static str),

    #[error("invalid register '{0}'")]
    InvalidReg(String),

    #[error("value {0:#x} does not fit in a byte")]
    OutOfRange(u16),

    #[error("immediate {0} must be written in hex (0x..)")]
    DecimalImmediate(u16),

    #[error("moving register {0} to itself")]
    SameRegister(Reg),

    #[error("invalid MOV operands")]
    InvalidOperands,

    #[error("unexpected trailing input")]
    Trailing,
}

struct LineParser {
    tokens: std::vec::IntoIter<Token>,
}

impl LineParser {
    fn new(line: &str) -> Result<LineParser, ParseError> {
        let tokens = Token::lexer(line)
            .filter(|t| t != &Ok(Token::Comment))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LineParser { tokens: tokens.into_iter() })
    }

    fn expect(&mut self, tok: Token, what: &'static str) -> Result<(), ParseError> {
        match self.tokens.next() {
            Some(t) if t == tok => Ok(()),
            _ => Err(ParseError::Expected(what)),
        }
    }

    fn operand(&mut self) -> Result<Operand, ParseError> {
        match self.tokens.next() {
            Some(Token::Ident(name)) => reg(&name).map(Operand::Reg),
            Some(Token::Hex(val)) => Ok(Operand::Imm { val, hex: true }),
            Some(Token::Dec(val)) => Ok(Operand::Imm { val, hex: false }),
            Some(Token::LBracket) => {
                let addr = match self.tokens.next() {
                    Some(Token::Hex(val) | Token::Dec(val)) => val,
                    _ => return Err(ParseError::Expected("address")),
                };
                self.expect(Token::RBracket, "']'")?;
                Ok(Operand::Mem(addr))
            }
            _ => Err(ParseError::Expected("operand")),
        }
    }

    fn end(&mut self) -> Result<(), ParseError> {
        match self.tokens.next() {
            None => Ok(()),
            Some(_) => Err(ParseError::Trailing),
        }
    }
}

fn reg(name: &str) -> Result<Reg, ParseError> {
    let mut chars = name.chars();
    match (chars.next().and_then(Reg::from_char), chars.next()) {
        (Some(reg), None) => Ok(reg),
        _ => Err(ParseError::InvalidReg(name.to_string())),
    }
}

fn byte(val: u16) -> Result<u8, ParseError> {
    u8::try_from(val).map_err(|_| ParseError::OutOfRange(val))
}

fn mov(dst: Operand, src: Operand) -> Result<Ins, ParseError> {
    let ins = match (dst, src) {
        (Operand::Reg(dst), Operand::Reg(src)) => {
            if dst == src {
                return Err(ParseError::SameRegister(dst));
            }
            Ins::MovRegReg { dst, src }
        }
        (Operand::Reg(dst), Operand::Imm { val, hex: true }) => Ins::MovRegImm { dst, imm: byte(val)? },
        (Operand::Reg(_), Operand::Imm { val, hex: false }) => return Err(ParseError::DecimalImmediate(val)),
        (Operand::Reg(dst), Operand::Mem(addr)) => Ins::MovRegAdr { dst, addr: byte(addr)? },
        (Operand::Mem(addr), Operand::Reg(src)) => Ins::MovAdrReg { addr: byte(addr)?, src },
        _ => return Err(ParseError::InvalidOperands),
    };
    Ok(ins)
}

/// Parses one line of source. Blank and comment-only lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Ins>, ParseError> {
    let mut p = LineParser::new(line)?;

    let mnemonic = match p.tokens.next() {
        None => return Ok(None),
        Some(Token::Ident(m)) => m,
        Some(_) => return Err(ParseError::Expected("instruction")),
    };

    let ins = match mnemonic.to_ascii_uppercase().as_str() {
        "MOV" => {
            let dst = p.operand()?;
            p.expect(Token::Comma, "','")?;
            let src = p.operand()?;
            mov(dst, src)?
        }
        _ => return Err(ParseError::UnknownMnemonic(mnemonic)),
    };
    p.end()?;
    Ok(Some(ins))
}
