use common::isa::{Ins, Reg};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(Reg),
    // `hex` records whether the literal was written with a 0x prefix.
    Imm { val: u16, hex: bool },
    Mem(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    // 1-based source line.
    pub line: usize,
    pub addr: usize,
    pub ins: Ins,
}

impl Stmt {
    pub fn size(&self) -> usize {
        self.ins.size()
    }

    pub fn emit(&self, buf: &mut Vec<u8>) {
        assert_eq!(buf.len(), self.addr);
        self.ins.emit(buf);
    }
}
