use common::constants::PRAM_SIZE;
use tbgen::{Harness, Program};

use crate::parse_preloads;

fn render(name: &str, bytes: Vec<u8>) -> String {
    Harness::new(&Program::from_bytes(name, bytes)).render()
}

fn assert_contiguous(preloads: &[(usize, u8, bool)]) {
    for (i, (addr, _, _)) in preloads.iter().enumerate() {
        assert_eq!(*addr, i);
    }
}

#[test]
fn empty_program() {
    let doc = render("empty.bin", vec![]);
    let preloads = parse_preloads(&doc);
    assert_eq!(preloads.len(), 16);
    assert_contiguous(&preloads);
    assert!(preloads.iter().all(|&(_, val, pad)| val == 0 && pad));
    assert!(doc.contains("// Program size: 0 bytes"));
}

#[test]
fn twenty_bytes() {
    let bytes: Vec<u8> = (100..120).collect();
    let doc = render("twenty.bin", bytes.clone());
    let preloads = parse_preloads(&doc);
    assert_eq!(preloads.len(), 20);
    assert_contiguous(&preloads);
    assert!(preloads.iter().all(|&(_, _, pad)| !pad));
    let vals: Vec<u8> = preloads.iter().map(|&(_, val, _)| val).collect();
    assert_eq!(vals, bytes);
    assert!(doc.contains("// Program size: 20 bytes"));
}

#[test]
fn oversize() {
    let bytes: Vec<u8> = (0..600).map(|i| (i * 7 % 256) as u8).collect();
    let prog = Program::from_bytes("big.bin", bytes.clone());
    assert_eq!(prog.truncation().map(|t| t.original_len), Some(600));
    assert!(prog.truncation().unwrap().to_string().contains("600"));

    let doc = Harness::new(&prog).render();
    let preloads = parse_preloads(&doc);
    assert_eq!(preloads.len(), PRAM_SIZE);
    assert_contiguous(&preloads);
    assert_eq!(preloads.last().unwrap().0, 511);
    assert!(preloads.iter().all(|&(_, _, pad)| !pad));
    assert_eq!(preloads[300].1, bytes[300]);
    assert!(doc.contains("// Program size: 512 bytes"));
}

#[test]
fn statement_counts() {
    for len in [0usize, 5, 15, 16, 17, 100, 512, 513, 1000] {
        let doc = render("p.bin", vec![0xc3; len]);
        let preloads = parse_preloads(&doc);
        let expected = len.clamp(16, PRAM_SIZE);
        assert_eq!(preloads.len(), expected, "len {len}");
        assert_contiguous(&preloads);
    }
}

#[test]
fn skeleton_identical() {
    let a = render("a.bin", vec![]);
    let b = render("something_else.bin", vec![0xff; 300]);

    let strip = |doc: &str, name: &str, size: usize| -> String {
        doc.lines()
            .filter(|l| !l.contains("uut.sys_pram.mem["))
            .map(|l| {
                l.replace(name, "<NAME>")
                    .replace(&format!("Program size: {size} bytes"), "Program size: <SIZE> bytes")
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(strip(&a, "a.bin", 0), strip(&b, "something_else.bin", 300));
}
