use crate::{Directive, Opcode, OperandKind, Register};

fn format_table() -> String {
    let mut out = String::new();
    for op in Opcode::ALL {
        let info = op.info();
        let kinds: Vec<_> = info.operands.iter().map(|k| k.as_str()).collect();
        out.push_str(&format!(
            "{:#04x} {}({})\n",
            op.as_u8(),
            info.mnemonic,
            kinds.join(", ")
        ));
    }
    out
}

#[test]
fn format_table_listing() {
    insta::assert_snapshot!(format_table(), @r"
    0x00 print_chr(register)
    0x01 print_str(source)
    0x02 mov(register, source)
    0x03 load_addr(register, source)
    0x04 add(register, source)
    0x05 sub(register, source)
    0x06 halt()
    0x07 mul(register, source)
    0x08 div(register, source)
    0x09 mod(register, source)
    0x0a and(register, source)
    0x0b or(register, source)
    0x0c not(register)
    0x0d cmp()
    0x0e jz(symbol)
    0x0f jnz(symbol)
    0x10 jeq(symbol)
    0x11 jgt(symbol)
    0x12 jge(symbol)
    0x13 jlt(symbol)
    0x14 jle(symbol)
    0x15 jmp(symbol)
    0x16 call(symbol)
    0x17 ret()
    0x18 push(register)
    0x19 pop(register)
    ");
}

#[test]
fn all_is_indexed_by_value() {
    for (i, op) in Opcode::ALL.iter().enumerate() {
        assert_eq!(op.as_u8() as usize, i);
        assert_eq!(Opcode::from_u8(i as u8), Some(*op));
    }
    assert_eq!(Opcode::from_u8(0x1A), None);
    assert_eq!(Opcode::from_u8(0xFF), None);
}

#[test]
fn anchor_values() {
    assert_eq!(Opcode::Mov.as_u8(), 0x02);
    assert_eq!(Opcode::Halt.as_u8(), 0x06);
    assert_eq!(Opcode::Push.as_u8(), 0x18);
    assert_eq!(Opcode::Pop.as_u8(), 0x19);
}

#[test]
fn mnemonic_lookup_ignores_case() {
    assert_eq!(Opcode::from_mnemonic("mov"), Some(Opcode::Mov));
    assert_eq!(Opcode::from_mnemonic("MOV"), Some(Opcode::Mov));
    assert_eq!(Opcode::from_mnemonic("Print_Str"), Some(Opcode::PrintStr));
    assert_eq!(Opcode::from_mnemonic("move"), None);
}

#[test]
fn control_flow_opcodes_take_symbols() {
    for op in Opcode::ALL {
        if op.is_control_flow() {
            assert_eq!(op.info().operands, [OperandKind::Symbol]);
        }
    }
}

#[test]
fn slot_past_arity_is_none() {
    let info = Opcode::Push.info();
    assert_eq!(info.slot(0), OperandKind::Register);
    assert_eq!(info.slot(1), OperandKind::None);
    assert_eq!(Opcode::Halt.info().slot(0), OperandKind::None);
}

#[test]
fn any_source_accepts_values_only() {
    let src = OperandKind::AnySource;
    assert!(src.accepts(OperandKind::Register));
    assert!(src.accepts(OperandKind::ImmediateInt));
    assert!(src.accepts(OperandKind::ImmediateChar));
    assert!(src.accepts(OperandKind::ImmediateString));
    assert!(src.accepts(OperandKind::Symbol));
    assert!(!src.accepts(OperandKind::None));

    assert!(OperandKind::Register.accepts(OperandKind::Register));
    assert!(!OperandKind::Register.accepts(OperandKind::ImmediateInt));
    assert!(!OperandKind::Symbol.accepts(OperandKind::Register));
}

#[test]
fn register_names_and_ids() {
    let names = ["R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7", "SP", "BP", "HP"];
    for (id, name) in names.iter().enumerate() {
        let reg = Register::from_name(name).unwrap();
        assert_eq!(reg.id() as usize, id);
        assert_eq!(reg.name(), *name);
        assert_eq!(Register::from_id(id as u8), Some(reg));
        assert_eq!(Register::from_name(&name.to_lowercase()), Some(reg));
    }
    assert_eq!(Register::from_id(11), None);
    assert_eq!(Register::from_name("R8"), None);
}

#[test]
fn directives_match_exactly() {
    assert_eq!(Directive::from_name(".START"), Directive::Start);
    assert_eq!(Directive::from_name(".DATA"), Directive::Data);
    assert_eq!(Directive::from_name(".RODATA"), Directive::Rodata);
    assert_eq!(Directive::from_name(".GLOBAL"), Directive::Global);
    assert_eq!(Directive::from_name(".start"), Directive::Unknown);
    assert_eq!(Directive::from_name(".TEXT"), Directive::Unknown);
}
