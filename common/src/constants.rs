
// Program RAM, in bytes.
pub const PRAM_SIZE: usize = 512;

// Images shorter than this get padded out to it.
pub const MIN_PROGRAM_LEN: usize = 16;
pub const PAD_BYTE: u8 = 0x00;
