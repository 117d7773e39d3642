use bitlang_core::Opcode;

use crate::parser::Line;
use crate::{Assembly, Error, LexError, ParseError, assemble};

#[test]
fn errors_carry_their_stage() {
    assert!(matches!(assemble("mov r1, 1abc"), Err(Error::Lex(LexError::Malformed { .. }))));
    assert!(matches!(assemble("frob"), Err(Error::Parse(ParseError::UnknownMnemonic { .. }))));
    assert!(matches!(assemble("jmp nowhere"), Err(Error::Emit(_))));
}

#[test]
fn error_messages_name_the_line() {
    let err = assemble("halt\n\nmov r1").unwrap_err();
    assert_eq!(err.to_string(), "line 3: `mov` expects an operand, found end of file");
}

#[test]
fn parse_then_emit() {
    let assembly = Assembly::parse("loop: jmp loop").unwrap();
    let Line::LabelDefinition(label) = assembly.program().lines()[0] else {
        panic!("expected a label");
    };
    assert_eq!(assembly.resolve(label), "loop");

    let container = assembly.emit().unwrap();
    let (_, instr) = container.instructions().next().unwrap();
    assert_eq!(instr.unwrap().opcode, Opcode::Jmp);
}

#[test]
fn render_round_trips_through_text() {
    let assembly = Assembly::parse("start: mov r1, 5\njz start").unwrap();
    assert_eq!(assembly.render(), "001  start:\n001  mov R1, 5\n002  jz start\n");
}
