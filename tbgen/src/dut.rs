//! Names and timing of the simulated CPU, as seen from the testbench.
//!
//! The CPU itself is opaque; these are the ports and hierarchical paths the
//! generated testbench pokes at. They have to match the RTL exactly.

use common::isa::Reg;

pub const TIMESCALE: &str = "1ns/1ns";

pub const TB_MODULE: &str = "tb_operations";
pub const VCD_FILE: &str = "tb_operations.vcd";

pub const DUT_MODULE: &str = "cpu_top";
pub const INSTANCE: &str = "uut";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy)]
pub struct Port {
    pub name: &'static str,
    pub dir: Dir,
    pub width: u32,
    pub note: Option<&'static str>,
}

impl Port {
    const fn new(name: &'static str, dir: Dir, width: u32, note: Option<&'static str>) -> Port {
        Port { name, dir, width, note }
    }

    /// Testbench-side declaration: inputs of the DUT are driven from a `reg`,
    /// outputs are observed on a `wire`.
    pub fn declaration(&self) -> String {
        let kind = match self.dir {
            Dir::Input => "reg",
            Dir::Output => "wire",
        };
        let range = if self.width > 1 {
            format!(" [{}:0]", self.width - 1)
        } else {
            String::new()
        };
        let note = self.note.map(|n| format!("  // {n}")).unwrap_or_default();
        format!("{kind}{range} {};{note}", self.name)
    }
}

pub const CLK: &str = "sys_clk";
pub const RESET: &str = "btn1";
pub const START: &str = "btn2";
pub const FLASH_MISO: &str = "flash_MISO";

// Declaration order.
pub const PORTS: [Port; 12] = [
    Port::new(CLK, Dir::Input, 1, None),
    Port::new(RESET, Dir::Input, 1, Some("Reset")),
    Port::new(START, Dir::Input, 1, Some("Start")),
    Port::new(FLASH_MISO, Dir::Input, 1, None),
    Port::new("lcd_ctrl", Dir::Output, 8, None),
    Port::new("lcd_en", Dir::Output, 1, None),
    Port::new("lcd_rw", Dir::Output, 1, None),
    Port::new("lcd_rs", Dir::Output, 1, None),
    Port::new("flash_MOSI", Dir::Output, 1, None),
    Port::new("flash_clk", Dir::Output, 1, None),
    Port::new("flash_cs", Dir::Output, 1, None),
    Port::new("leds", Dir::Output, 8, None),
];

// Order of the named connections in the instantiation. Not the same as
// declaration order.
pub const CONNECTIONS: [&str; 12] = [
    CLK,
    FLASH_MISO,
    RESET,
    START,
    "lcd_ctrl",
    "lcd_en",
    "lcd_rw",
    "lcd_rs",
    "flash_MOSI",
    "flash_clk",
    "flash_cs",
    "leds",
];

// 27MHz, ~37ns period.
pub const CLOCK_HALF_PERIOD: u32 = 18;
pub const RESET_HOLD: u32 = 100;
// Delay before preloading, so the memory array exists.
pub const PRELOAD_DELAY: u32 = 1;
// Settle time after each rising edge before sampling.
pub const SAMPLE_DELAY: u32 = 1;
pub const TRACE_CYCLES: u32 = 200;
pub const DECODE_STATE: u32 = 3;

pub const PRAM_PATH: &str = "uut.sys_pram.mem";
pub const STATE_PATH: &str = "uut.dec_inst.state";
pub const PC_PATH: &str = "uut.pc_inst.pc";
pub const INSTR_PATHS: [&str; 3] = ["uut.data_out_0", "uut.data_out_1", "uut.data_out_2"];
pub const REGS_PATH: &str = "uut.reg_map.cpu_regs";

pub fn reg_path(reg: Reg) -> String {
    format!("{REGS_PATH}[{}]", reg.code())
}

pub fn pram_slot(addr: usize) -> String {
    format!("{PRAM_PATH}[{addr}]")
}
