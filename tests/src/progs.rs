use as_lib::assemble;
use common::isa::{Ins, Reg};
use tbgen::{Harness, PreloadKind, Program};
use viewbin::disassemble;

#[test]
fn assembled_program_preloads() {
    let prog = assemble(r#"
        MOV A, 0x05
        MOV B, 0x07
        MOV C, A
        MOV [0x80], B
    "#).unwrap();
    assert_eq!(prog.text.len(), 7);

    let harness = Harness::new(&Program::from_bytes("add.bin", prog.text.clone()));
    let preloads = harness.preloads();
    assert_eq!(preloads.len(), 16);

    let text: Vec<u8> = preloads
        .iter()
        .filter(|p| p.kind == PreloadKind::Program)
        .map(|p| p.val)
        .collect();
    assert_eq!(text, prog.text);

    let doc = harness.render();
    assert!(doc.contains("        uut.sys_pram.mem[0] = 8'h10;\n        uut.sys_pram.mem[1] = 8'h05;\n"));
    assert!(doc.contains("        uut.sys_pram.mem[7] = 8'h00;  // NOP\n"));
}

#[test]
fn disassembles_back() {
    let prog = assemble("MOV D, [0x10]\nMOV [0x11], D\nMOV A, D\n").unwrap();
    let dis = disassemble(&prog.text);
    let ins: Vec<Ins> = dis.iter().filter_map(|d| d.interp).collect();
    assert_eq!(ins, vec![
        Ins::MovRegAdr { dst: Reg::D, addr: 0x10 },
        Ins::MovAdrReg { addr: 0x11, src: Reg::D },
        Ins::MovRegReg { dst: Reg::A, src: Reg::D },
    ]);
}
