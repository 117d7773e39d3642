use bitlang_core::{Opcode, Register};

use super::{Container, Header, Instruction, Operand, dump, listing};

fn encode(instrs: &[Instruction]) -> Vec<u8> {
    instrs
        .iter()
        .flat_map(|i| i.encode().unwrap())
        .collect()
}

#[test]
fn dump_full_container() {
    let code = encode(&[
        Instruction::binary(
            Opcode::Mov,
            Operand::reg(Register::R0),
            Operand::ImmediateInt(7),
        ),
        Instruction::unary(Opcode::PrintStr, Operand::ImmediateAddress(0x080000)),
        Instruction::nullary(Opcode::Halt),
    ]);
    let container = Container::new(code, b"hi\0\0".to_vec(), vec![1, 0, 0, 0], 0);

    insta::assert_snapshot!(dump(&container), @r"
    [header]
    magic    BTVM
    version  1
    entry    0x000000
    code     24 bytes
    rodata   4 bytes
    data     4 bytes

    [code]
    0x000000  02 00 00 07 00 00 00 02  mov R0, 7
    0x000008  01 00 00 00 00 08 00 20  print_str @0x080000
    0x000010  06 00 00 00 00 00 00 00  halt

    [rodata]
    0x080000  68 69 00 00              hi..

    [data]
    0x0c0000  01 00 00 00              ....
    ");
}

#[test]
fn listing_reports_bad_slots() {
    let mut code = vec![0xFF, 0, 0, 0, 0, 0, 0, 0];
    code.extend_from_slice(&[0x06, 0x00]);
    let container = Container::new(code, Vec::new(), Vec::new(), 0);

    let lines = listing(&container);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "<invalid: unknown opcode 0xff>");
    assert_eq!(lines[1].address, 8);
    assert_eq!(lines[1].bytes, "06 00");
    assert_eq!(lines[1].text, "<truncated>");
}

#[test]
fn dump_flags_unexpected_magic() {
    let mut container = Container::new(
        Instruction::nullary(Opcode::Halt).encode().unwrap().to_vec(),
        Vec::new(),
        Vec::new(),
        0,
    );
    container.header = Header {
        magic: 0xDEAD_BEEF,
        ..container.header
    };

    let out = dump(&container);
    assert!(out.contains("magic    0xdeadbeef (unexpected)"));
    assert!(!out.contains("[rodata]"));
}
