use tbgen::{generate, Error, LoadError};
use tempfile::tempdir;

use crate::{parse_preloads, write_bin};

#[test]
fn writes_testbench() {
    let dir = tempdir().unwrap();
    let input = write_bin(dir.path(), "prog.bin", &[0x10, 0x2a, 0x04]);
    let output = dir.path().join("tb_prog.v");

    let report = generate(&input, &output).unwrap();
    assert_eq!(report.output, output);
    assert_eq!(report.program_size, 3);
    assert_eq!(report.truncation, None);

    let doc = std::fs::read_to_string(&output).unwrap();
    assert!(doc.contains("// Auto-generated testbench for: prog.bin\n"));
    assert!(doc.contains("$display(\"Program: prog.bin\");"));
    assert_eq!(parse_preloads(&doc).len(), 16);
}

#[test]
fn reports_truncation() {
    let dir = tempdir().unwrap();
    let input = write_bin(dir.path(), "big.bin", &[0x01; 600]);
    let output = dir.path().join("tb.v");

    let report = generate(&input, &output).unwrap();
    assert_eq!(report.program_size, 512);
    assert_eq!(report.truncation.unwrap().original_len, 600);
}

#[test]
fn missing_input_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("missing.bin");
    let output = dir.path().join("tb.v");

    let err = generate(&input, &output).unwrap_err();
    assert!(matches!(err, Error::Load(LoadError::NotFound(_))));
    assert!(err.to_string().contains("not found"));
    assert!(!output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn overwrites_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("tb.v");

    let first = write_bin(dir.path(), "first.bin", &[0xaa; 40]);
    generate(&first, &output).unwrap();
    let second = write_bin(dir.path(), "second.bin", &[]);
    generate(&second, &output).unwrap();

    let doc = std::fs::read_to_string(&output).unwrap();
    assert!(doc.contains("second.bin"));
    assert!(!doc.contains("first.bin"));
    assert_eq!(parse_preloads(&doc).len(), 16);
}
