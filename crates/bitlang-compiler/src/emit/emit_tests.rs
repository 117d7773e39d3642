use bitlang_bytecode::{Segment, dump};
use indoc::indoc;

use crate::{EmitError, Error, assemble};

fn emit_err(source: &str) -> EmitError {
    match assemble(source) {
        Err(Error::Emit(e)) => e,
        other => panic!("expected an emit error, got {other:?}"),
    }
}

fn dump_code(code: &[u8]) -> String {
    code.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn full_program() {
    let source = indoc! {r#"
        .RODATA greeting, "hi"
        .DATA counter, 3
        .GLOBAL main
        .GLOBAL helper
        .START main

        helper: ret
        main:   load_addr r1, greeting
                print_str r1
                mov r2, counter
                call helper
                print_str "ok"
                add r2, 'a'
                jmp done
        done:   halt
    "#};

    let container = assemble(source).unwrap();
    insta::assert_snapshot!(dump(&container), @r"
    [header]
    magic    BTVM
    version  1
    entry    0x000008
    code     72 bytes
    rodata   8 bytes
    data     4 bytes

    [code]
    0x000000  17 00 00 00 00 00 00 00  ret
    0x000008  03 01 00 00 00 08 00 04  load_addr R1, @0x080000
    0x000010  01 01 00 00 00 00 00 40  print_str [R1]
    0x000018  02 02 00 00 00 0c 00 04  mov R2, @0x0c0000
    0x000020  16 00 00 00 00 00 00 a0  call @0x000000
    0x000028  01 00 00 04 00 08 00 20  print_str @0x080004
    0x000030  04 02 00 61 00 00 00 02  add R2, 97
    0x000038  15 00 00 40 00 00 00 20  jmp @0x000040
    0x000040  06 00 00 00 00 00 00 00  halt

    [rodata]
    0x080000  68 69 00 00 6f 6b 00 00  hi..ok..

    [data]
    0x0c0000  03 00 00 00              ....
    ");
}

#[test]
fn mov_register_immediate_bytes() {
    let container = assemble("mov r1, 100").unwrap();
    assert_eq!(container.code, [0x02, 0x01, 0x00, 0x64, 0x00, 0x00, 0x00, 0x02]);
}

#[test]
fn push_register_bytes() {
    let container = assemble("push r4").unwrap();
    assert_eq!(container.code, [0x18, 0x04, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn load_addr_register_source_is_indirect() {
    let container = assemble("load_addr r1, r2").unwrap();
    assert_eq!(container.code, [0x03, 0x01, 0x02, 0, 0, 0, 0, 0x08]);
}

#[test]
fn char_in_address_slot_is_an_address() {
    let container = assemble("print_str 'c'\nload_addr r1, 'c'\nmov r1, 'c'").unwrap();
    insta::assert_snapshot!(dump_code(&container.code), @r"
    01 00 00 63 00 00 00 20
    03 01 00 63 00 00 00 04
    02 01 00 63 00 00 00 02
    ");
}

#[test]
fn entry_defaults_to_zero() {
    let container = assemble("halt").unwrap();
    assert_eq!(container.header.entry_point, 0);
    assert!(container.rodata.is_empty());
    assert!(container.data.is_empty());
}

#[test]
fn string_literals_are_shared() {
    let container = assemble("print_str \"x\"\nprint_str \"x\"\nprint_str \"yz\"\nhalt").unwrap();
    assert_eq!(container.rodata, b"x\0\0\0yz\0\0");
}

#[test]
fn duplicate_label() {
    assert_eq!(
        emit_err("a:\nhalt\na:\nhalt"),
        EmitError::DuplicateSymbol {
            line: 3,
            name: "a".to_owned()
        }
    );
}

#[test]
fn data_name_clashes_with_label() {
    assert!(matches!(
        emit_err("x:\nhalt\n.DATA x, 1"),
        EmitError::DuplicateSymbol { line: 3, .. }
    ));
}

#[test]
fn undefined_symbol() {
    assert_eq!(
        emit_err("halt\njmp nowhere"),
        EmitError::UndefinedSymbol {
            line: 2,
            name: "nowhere".to_owned()
        }
    );
}

#[test]
fn undefined_global() {
    assert_eq!(
        emit_err(".GLOBAL ghost\nhalt"),
        EmitError::UndefinedSymbol {
            line: 1,
            name: "ghost".to_owned()
        }
    );
}

#[test]
fn unknown_directive() {
    assert_eq!(emit_err("halt\n.TEXT"), EmitError::UnknownDirective { line: 2 });
}

#[test]
fn entry_must_be_code() {
    assert!(matches!(
        emit_err(".DATA v, 1\n.START v\nhalt"),
        EmitError::InvalidEntry { line: 2, .. }
    ));
    assert!(matches!(
        emit_err(".START end\nhalt\nend:"),
        EmitError::InvalidEntry { line: 1, .. }
    ));
}

#[test]
fn malformed_directives() {
    let err = emit_err(".DATA counter\nhalt");
    assert_eq!(
        err.to_string(),
        "line 1: .DATA expects an integer, char or string value"
    );
    assert!(matches!(
        emit_err(".START 5\nhalt"),
        EmitError::InvalidDirective { line: 1, .. }
    ));
    assert!(matches!(
        emit_err("main:\nhalt\n.START main\n.START main"),
        EmitError::InvalidDirective { line: 4, .. }
    ));
}

#[test]
fn rodata_overflow() {
    let source = format!(".RODATA big, \"{}\"\nhalt", "x".repeat(0x40000));
    assert_eq!(
        emit_err(&source),
        EmitError::SectionOverflow {
            segment: Segment::ReadOnlyData,
            size: 0x40004,
            capacity: 0x40000,
        }
    );
}
