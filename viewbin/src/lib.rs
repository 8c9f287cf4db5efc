use std::fmt;

use common::isa::Ins;

pub const BYTES_PER_LINE: usize = 16;
// Width of a full line of hex bytes: 16 * 3 - 1.
const HEX_WIDTH: usize = BYTES_PER_LINE * 3 - 1;

/// One row of a hex dump.
pub struct HexLine<'a> {
    pub offset: usize,
    pub bytes: &'a [u8],
}

impl HexLine<'_> {
    fn printable(b: u8) -> char {
        if (0x20..=0x7e).contains(&b) {
            b as char
        } else {
            '.'
        }
    }
}

impl fmt::Display for HexLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: Vec<String> = self.bytes.iter().map(|b| format!("{b:02X}")).collect();
        let ascii: String = self.bytes.iter().map(|&b| Self::printable(b)).collect();
        write!(f, "{:08X}  {:<width$}  |{ascii}|", self.offset, hex.join(" "), width = HEX_WIDTH)
    }
}

pub fn hexdump(bin: &[u8]) -> Vec<HexLine<'_>> {
    bin.chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, bytes)| HexLine { offset: i * BYTES_PER_LINE, bytes })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////

pub struct Disassembled {
    pub addr: usize,
    pub repr: Vec<u8>,
    pub interp: Option<Ins>,
}

impl fmt::Display for Disassembled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr: Vec<String> = self.repr.iter().map(|b| format!("{b:02X}")).collect();
        write!(f, "{:03}:  {:<5}", self.addr, repr.join(" "))?;
        match &self.interp {
            Some(ins) => write!(f, "  {ins}"),
            None => f.write_str("  ???"),
        }
    }
}

pub fn disassemble(bin: &[u8]) -> Vec<Disassembled> {
    let mut out = vec![];
    let mut addr = 0;
    while addr < bin.len() {
        let ins = Ins::decode(&bin[addr..]);
        let size = ins.map_or(1, |ins| ins.size());
        out.push(Disassembled {
            addr,
            repr: bin[addr..addr + size].into(),
            interp: ins,
        });
        addr += size;
    }
    out
}
