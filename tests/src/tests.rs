#![cfg(test)]

mod generate;
mod progs;
mod scenarios;

use std::path::Path;

/// Preload statements in a rendered testbench, as (addr, value, padding).
pub fn parse_preloads(doc: &str) -> Vec<(usize, u8, bool)> {
    const PREFIX: &str = "uut.sys_pram.mem[";
    doc.lines()
        .filter_map(|l| l.trim_start().strip_prefix(PREFIX))
        .map(|rest| {
            let (addr, rest) = rest.split_once("] = 8'h").unwrap();
            let val = u8::from_str_radix(&rest[..2], 16).unwrap();
            (addr.parse().unwrap(), val, rest.ends_with("// NOP"))
        })
        .collect()
}

pub fn write_bin(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}
