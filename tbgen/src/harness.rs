//! Rendering a program into a Verilog testbench.
//!
//! The testbench is an ordered [`Skeleton`] of fixed lines with a handful of
//! [`Field`]s where the program gets spliced in. The skeleton only depends on
//! the constants in [`crate::dut`], so it is built once and shared by every
//! render.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use common::constants::{MIN_PROGRAM_LEN, PAD_BYTE, PRAM_SIZE};
use common::isa::Reg;

use crate::dut::{self, Dir};
use crate::loader::Program;

use log::{debug, trace};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Unable to create temporary file next to '{}': {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to write testbench '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to move testbench into place at '{}': {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadKind {
    Program,
    Padding,
}

/// A byte written into PRAM before the simulation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preload {
    pub addr: usize,
    pub val: u8,
    pub kind: PreloadKind,
}

impl fmt::Display for Preload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = 8'h{:02X};", dut::pram_slot(self.addr), self.val)?;
        if self.kind == PreloadKind::Padding {
            f.write_str("  // NOP")?;
        }
        Ok(())
    }
}

/// One statement per byte, then zero padding up to `MIN_PROGRAM_LEN`.
/// Longer images are not padded; the rest of PRAM is left as the RTL has it.
pub fn preloads(bytes: &[u8]) -> Vec<Preload> {
    assert!(bytes.len() <= PRAM_SIZE);

    let mut out: Vec<Preload> = bytes
        .iter()
        .enumerate()
        .map(|(addr, &val)| Preload { addr, val, kind: PreloadKind::Program })
        .collect();

    for addr in bytes.len()..MIN_PROGRAM_LEN {
        trace!("Padding PRAM slot {addr}");
        out.push(Preload { addr, val: PAD_BYTE, kind: PreloadKind::Padding });
    }
    out
}

////////////////////////////////////////////////////////////////////////////////

// The parts of the testbench that vary between programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    SourceName,
    ProgramSize,
    Preloads,
    Banner,
}

#[derive(Debug)]
enum Item {
    Text { indent: usize, text: String },
    Blank,
    Field { indent: usize, field: Field },
}

#[derive(Debug, Default)]
struct Skeleton {
    items: Vec<Item>,
    indent: usize,
}

impl Skeleton {
    const INDENT: &'static str = "    ";

    fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.items.push(Item::Text { indent: self.indent, text: text.into() });
        self
    }

    fn blank(&mut self) -> &mut Self {
        self.items.push(Item::Blank);
        self
    }

    fn field(&mut self, field: Field) -> &mut Self {
        self.items.push(Item::Field { indent: self.indent, field });
        self
    }

    // Emits `text` and indents what follows.
    fn open(&mut self, text: impl Into<String>) -> &mut Self {
        self.text(text);
        self.indent += 1;
        self
    }

    // Dedents and emits `text`.
    fn close(&mut self, text: impl Into<String>) -> &mut Self {
        self.indent -= 1;
        self.text(text)
    }

    fn build() -> Skeleton {
        let mut sk = Skeleton::default();

        sk.text(format!("`timescale {}", dut::TIMESCALE))
            .blank()
            .field(Field::SourceName)
            .field(Field::ProgramSize)
            .blank()
            .open(format!("module {};", dut::TB_MODULE));

        sk.ports().instance().clock().preload_block().blank().stimulus();

        sk.close("endmodule");
        assert_eq!(sk.indent, 0);
        sk
    }

    fn ports(&mut self) -> &mut Self {
        for (dir, title) in [(Dir::Input, "// Inputs"), (Dir::Output, "// Outputs")] {
            self.text(title);
            for port in dut::PORTS.iter().filter(|p| p.dir == dir) {
                self.text(port.declaration());
            }
            self.blank();
        }
        self
    }

    fn instance(&mut self) -> &mut Self {
        self.text("// Instantiate the CPU")
            .open(format!("{} {} (", dut::DUT_MODULE, dut::INSTANCE));
        let last = dut::CONNECTIONS.len() - 1;
        for (i, name) in dut::CONNECTIONS.iter().enumerate() {
            let sep = if i == last { "" } else { "," };
            self.text(format!(".{name}({name}){sep}"));
        }
        self.close(");").blank()
    }

    fn clock(&mut self) -> &mut Self {
        self.text("// Clock generation - 27MHz = ~37ns period")
            .text(format!("always #{} {} = ~{};", dut::CLOCK_HALF_PERIOD, dut::CLK, dut::CLK))
            .blank()
    }

    fn preload_block(&mut self) -> &mut Self {
        self.text("// Pre-load PRAM with program")
            .open("initial begin")
            .text(format!("#{};  // Wait for module instantiation", dut::PRELOAD_DELAY))
            .field(Field::Preloads)
            .close("end")
    }

    fn stimulus(&mut self) -> &mut Self {
        self.open("initial begin")
            .text(format!("$dumpfile(\"{}\");", dut::VCD_FILE))
            .text(format!("$dumpvars(0, {});", dut::TB_MODULE))
            .blank();

        self.text("// Initialize")
            .text(format!("{} = 0;", dut::CLK))
            .text(format!("{} = 1;  // Reset active", dut::RESET))
            .text(format!("{} = 0;", dut::START))
            .text(format!("{} = 0;", dut::FLASH_MISO))
            .blank();

        self.text("// Hold reset")
            .text(format!("#{};", dut::RESET_HOLD))
            .text(format!("{} = 0;  // Release reset", dut::RESET))
            .blank();

        self.text("// Monitor execution")
            .text("$display(\"=== Starting CPU Execution ===\");")
            .field(Field::Banner)
            .text("$display(\"\");")
            .text("");

        self.trace_loop().blank().final_report().blank();
        self.text("$finish;").close("end").blank()
    }

    fn trace_loop(&mut self) -> &mut Self {
        let regs: Vec<String> = Reg::ALL.iter().map(|r| format!("{r}=%02h")).collect();
        let fmt_str = format!("PC=%03d | Instr=%02h %02h %02h | {}", regs.join(" "));

        let mut args = vec![dut::PC_PATH.to_string()];
        args.extend(dut::INSTR_PATHS.iter().map(|p| p.to_string()));
        args.extend(Reg::ALL.iter().map(|&r| dut::reg_path(r)));

        self.open(format!("repeat({}) begin", dut::TRACE_CYCLES))
            .text(format!("@(posedge {});", dut::CLK))
            .text(format!("#{};", dut::SAMPLE_DELAY))
            .text("// Print state on decode cycles")
            .open(format!("if ({} == {}) begin  // DECODE state", dut::STATE_PATH, dut::DECODE_STATE))
            .open(format!("$display(\"{fmt_str}\", "));

        // The format string and the PC are each followed by a trailing space.
        let last = args.len() - 1;
        for (i, arg) in args.iter().enumerate() {
            let sep = match i {
                0 => ", ",
                _ if i == last => ");",
                _ => ",",
            };
            self.text(format!("{arg}{sep}"));
        }
        self.indent -= 1;
        self.close("end").close("end")
    }

    fn final_report(&mut self) -> &mut Self {
        self.text("// Print final state")
            .text("$display(\"\");")
            .text("$display(\"=== Final CPU State ===\");");
        for reg in Reg::ALL {
            self.text(format!("$display(\"Register {reg}: 0x%02h\", {});", dut::reg_path(reg)));
        }
        self.text(format!("$display(\"PC:         %d\", {});", dut::PC_PATH))
    }
}

static SKELETON: LazyLock<Skeleton> = LazyLock::new(Skeleton::build);

////////////////////////////////////////////////////////////////////////////////

/// A testbench for one program, ready to render.
#[derive(Debug, Clone)]
pub struct Harness {
    source_name: String,
    program_size: usize,
    preloads: Vec<Preload>,
}

impl Harness {
    pub fn new(prog: &Program) -> Harness {
        let preloads = preloads(prog.bytes());
        debug!(
            "{}: {} bytes, {} preload statements",
            prog.name(),
            prog.len(),
            preloads.len()
        );
        Harness {
            source_name: prog.name().to_string(),
            program_size: prog.len(),
            preloads,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn program_size(&self) -> usize {
        self.program_size
    }

    pub fn preloads(&self) -> &[Preload] {
        &self.preloads
    }

    fn push_line(out: &mut String, indent: usize, text: &str) {
        for _ in 0..indent {
            out.push_str(Skeleton::INDENT);
        }
        out.push_str(text);
        out.push('\n');
    }

    fn render_field(&self, out: &mut String, indent: usize, field: Field) {
        match field {
            Field::SourceName => Self::push_line(
                out,
                indent,
                &format!("// Auto-generated testbench for: {}", self.source_name),
            ),
            Field::ProgramSize => Self::push_line(
                out,
                indent,
                &format!("// Program size: {} bytes", self.program_size),
            ),
            Field::Preloads => {
                for p in &self.preloads {
                    Self::push_line(out, indent, &p.to_string());
                }
            }
            Field::Banner => Self::push_line(
                out,
                indent,
                &format!("$display(\"Program: {}\");", self.source_name),
            ),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for item in &SKELETON.items {
            match item {
                Item::Text { indent, text } => Self::push_line(&mut out, *indent, text),
                Item::Blank => out.push('\n'),
                Item::Field { indent, field } => self.render_field(&mut out, *indent, *field),
            }
        }
        out
    }

    /// Writes the rendered testbench to `path`, replacing whatever is there.
    /// The document goes to a temporary file in the same directory first, so
    /// `path` never holds a partial testbench.
    pub fn write_to(&self, path: &Path) -> Result<(), WriteError> {
        let doc = self.render();

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|source| WriteError::Create {
            path: path.to_owned(),
            source,
        })?;

        tmp.write_all(doc.as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|source| WriteError::Write {
                path: path.to_owned(),
                source,
            })?;

        tmp.persist(path).map_err(|e| WriteError::Persist {
            path: path.to_owned(),
            source: e.error,
        })?;
        debug!("Wrote {} bytes to {}", doc.len(), path.display());
        Ok(())
    }
}
