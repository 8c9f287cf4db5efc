use std::fmt;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use derive_more::IsVariant;


#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq, Hash)]
pub enum Reg {
    A = 0,
    B,
    C,
    D,
}

impl Reg {
    pub const NUM_BITS: usize = 2;
    pub const MASK: u8 = (1u8 << Self::NUM_BITS) - 1;
    pub const ALL: [Reg; 4] = [Reg::A, Reg::B, Reg::C, Reg::D];

    pub fn from_char(c: char) -> Option<Reg> {
        match c.to_ascii_uppercase() {
            'A' => Some(Reg::A),
            'B' => Some(Reg::B),
            'C' => Some(Reg::C),
            'D' => Some(Reg::D),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self.to_u8().unwrap_or_default()
    }

    pub fn from_code(code: u8) -> Reg {
        // Masked to two bits, so every value is a register.
        Reg::from_u8(code & Self::MASK).unwrap_or(Reg::A)
    }

    pub fn name(self) -> char {
        (b'A' + self.code()) as char
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

////////////////////////////////////////////////////////////////////////////////

// Upper nibble of the first instruction byte.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq)]
pub enum Opcode {
    MovRegReg = 0x00,
    MovRegImm = 0x10,
    MovRegAdr = 0x20,
    MovAdrReg = 0x30,
}

impl Opcode {
    pub const MASK: u8 = 0xf0;

    pub fn decode(byte: u8) -> Option<Opcode> {
        Opcode::from_u8(byte & Self::MASK)
    }

    pub fn bits(self) -> u8 {
        self.to_u8().unwrap_or_default()
    }
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Ins {
    MovRegReg { dst: Reg, src: Reg },
    MovRegImm { dst: Reg, imm: u8 },
    MovRegAdr { dst: Reg, addr: u8 },
    MovAdrReg { addr: u8, src: Reg },
}

impl Ins {
    // Bit offset of the register field that sits above the low register.
    const HIGH_REG_SHIFT: u8 = 2;

    pub fn opcode(&self) -> Opcode {
        match self {
            Ins::MovRegReg { .. } => Opcode::MovRegReg,
            Ins::MovRegImm { .. } => Opcode::MovRegImm,
            Ins::MovRegAdr { .. } => Opcode::MovRegAdr,
            Ins::MovAdrReg { .. } => Opcode::MovAdrReg,
        }
    }

    // Size in bytes.
    pub fn size(&self) -> usize {
        match self {
            Ins::MovRegReg { .. } => 1,
            _ => 2,
        }
    }

    pub fn emit(&self, buf: &mut Vec<u8>) {
        let op = self.opcode().bits();
        match *self {
            Ins::MovRegReg { dst, src } => {
                buf.push(op | (dst.code() << Self::HIGH_REG_SHIFT) | src.code());
            }
            Ins::MovRegImm { dst, imm: operand } | Ins::MovRegAdr { dst, addr: operand } => {
                buf.extend([op | (dst.code() << Self::HIGH_REG_SHIFT), operand]);
            }
            Ins::MovAdrReg { addr, src } => {
                buf.extend([op | (src.code() << Self::HIGH_REG_SHIFT), addr]);
            }
        }
    }

    /// Decodes the instruction at the start of `input`. Returns `None` for an
    /// unknown opcode or when the operand byte is missing.
    pub fn decode(input: &[u8]) -> Option<Ins> {
        let first = *input.first()?;
        let op = Opcode::decode(first)?;
        let high = Reg::from_code(first >> Self::HIGH_REG_SHIFT);
        let low = Reg::from_code(first);

        let ins = match op {
            Opcode::MovRegReg => Ins::MovRegReg { dst: high, src: low },
            Opcode::MovRegImm => Ins::MovRegImm { dst: high, imm: *input.get(1)? },
            Opcode::MovRegAdr => Ins::MovRegAdr { dst: high, addr: *input.get(1)? },
            Opcode::MovAdrReg => Ins::MovAdrReg { addr: *input.get(1)?, src: high },
        };
        Some(ins)
    }
}

impl fmt::Display for Ins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ins::MovRegReg { dst, src } => write!(f, "MOV {dst}, {src}"),
            Ins::MovRegImm { dst, imm } => write!(f, "MOV {dst}, {imm:#04x}"),
            Ins::MovRegAdr { dst, addr } => write!(f, "MOV {dst}, [{addr:#04x}]"),
            Ins::MovAdrReg { addr, src } => write!(f, "MOV [{addr:#04x}], {src}"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn encode(ins: Ins) -> Vec<u8> {
        let mut buf = vec![];
        ins.emit(&mut buf);
        buf
    }

    #[test]
    fn reg_reg() {
        let ins = Ins::MovRegReg { dst: Reg::B, src: Reg::D };
        assert_eq!(encode(ins), vec![0b0000_0111]);
        assert_eq!(ins.size(), 1);
    }

    #[test]
    fn reg_imm() {
        let ins = Ins::MovRegImm { dst: Reg::C, imm: 0x5a };
        assert_eq!(encode(ins), vec![0x18, 0x5a]);
    }

    #[test]
    fn adr_forms() {
        assert_eq!(encode(Ins::MovRegAdr { dst: Reg::D, addr: 0x40 }), vec![0x2c, 0x40]);
        assert_eq!(encode(Ins::MovAdrReg { addr: 0x41, src: Reg::A }), vec![0x30, 0x41]);
    }

    #[test]
    fn decode_stream() {
        let bin = [0x14, 0x07, 0x01, 0x34, 0x80];
        let first = Ins::decode(&bin).unwrap();
        assert_eq!(first, Ins::MovRegImm { dst: Reg::B, imm: 0x07 });
        let second = Ins::decode(&bin[first.size()..]).unwrap();
        assert_eq!(second, Ins::MovRegReg { dst: Reg::A, src: Reg::B });
        let third = Ins::decode(&bin[first.size() + second.size()..]).unwrap();
        assert_eq!(third, Ins::MovAdrReg { addr: 0x80, src: Reg::B });
    }

    #[test]
    fn decode_rejects() {
        assert_eq!(Ins::decode(&[]), None);
        assert_eq!(Ins::decode(&[0x40]), None);
        // Missing operand.
        assert_eq!(Ins::decode(&[0x10]), None);
    }

    #[test]
    fn display() {
        assert_eq!(Ins::MovRegImm { dst: Reg::A, imm: 5 }.to_string(), "MOV A, 0x05");
        assert_eq!(Ins::MovAdrReg { addr: 0x10, src: Reg::D }.to_string(), "MOV [0x10], D");
        assert!(Ins::MovRegReg { dst: Reg::A, src: Reg::C }.is_mov_reg_reg());
    }
}
