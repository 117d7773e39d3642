//! Tests for instruction encoding.

use bitlang_core::{Opcode, Register};

use super::instructions::{AddressingMode, DecodeError, EncodeError, Instruction, Operand};

#[test]
fn decode_mov_register_immediate() {
    let bytes = [0x02, 0x01, 0x00, 0x64, 0x00, 0x00, 0x00, 0x02];
    let instr = Instruction::decode(&bytes).unwrap();

    assert_eq!(instr.opcode, Opcode::Mov);
    assert_eq!(instr.dest(), Operand::RegisterDirect(Register::R1.id()));
    assert_eq!(instr.src(), Operand::ImmediateInt(100));
    assert!(!instr.global);
}

#[test]
fn decode_push_leaves_second_slot_empty() {
    let bytes = [0x18, 0x04, 0, 0, 0, 0, 0, 0];
    let instr = Instruction::decode(&bytes).unwrap();

    assert_eq!(instr.opcode, Opcode::Push);
    assert_eq!(instr.dest(), Operand::RegisterDirect(4));
    assert_eq!(instr.src(), Operand::None);
    assert_eq!(instr.src().mode(), AddressingMode::None);
}

#[test]
fn decode_ignores_slots_past_arity() {
    // HALT with garbage in every operand field still decodes to no operands.
    let bytes = [0x06, 0x03, 0x07, 0xFF, 0xFF, 0xFF, 0xFF, 0x7E];
    let instr = Instruction::decode(&bytes).unwrap();

    assert_eq!(instr, Instruction::nullary(Opcode::Halt));
}

#[test]
fn decode_absolute_jump() {
    let bytes = [0x15, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x20];
    let instr = Instruction::decode(&bytes).unwrap();

    assert_eq!(instr.opcode, Opcode::Jmp);
    assert_eq!(instr.dest(), Operand::ImmediateAddress(0x100));
}

#[test]
fn decode_base_offset_pairs_register_and_field() {
    // mov R2, [R7+12]
    let meta = AddressingMode::BaseOffset.bits() << 1;
    let bytes = [0x02, 0x02, 0x07, 12, 0, 0, 0, meta];
    let instr = Instruction::decode(&bytes).unwrap();

    assert_eq!(
        instr.src(),
        Operand::BaseOffset {
            base: 7,
            offset: 12
        }
    );
}

#[test]
fn decode_global_flag() {
    let bytes = [0x16, 0, 0, 0x40, 0, 0, 0, 0xA0];
    let instr = Instruction::decode(&bytes).unwrap();

    assert!(instr.global);
    assert_eq!(instr.dest(), Operand::ImmediateAddress(0x40));
}

#[test]
fn decode_unknown_opcode() {
    let bytes = [0x1A, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(
        Instruction::decode(&bytes),
        Err(DecodeError::OpcodeNotFound(0x1A))
    );
}

#[test]
fn decode_unassigned_mode() {
    // Destination bits 011.
    let bytes = [0x0C, 0x01, 0, 0, 0, 0, 0, 0b0011_0000];
    assert_eq!(
        Instruction::decode(&bytes),
        Err(DecodeError::InvalidAddressingMode { slot: 0, bits: 0b011 })
    );
}

#[test]
fn decode_slice_requires_eight_bytes() {
    assert!(Instruction::decode_slice(&[0x06; 7]).is_none());
    assert!(Instruction::decode_slice(&[0x06, 0, 0, 0, 0, 0, 0, 0]).is_some());
}

#[test]
fn decode_then_encode_reproduces_bytes() {
    let cases: [[u8; 8]; 10] = [
        [0x02, 0x01, 0x00, 0x64, 0x00, 0x00, 0x00, 0x02],
        [0x02, 0x03, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00],
        [0x18, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        [0x01, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40],
        [0x01, 0x00, 0x00, 0x10, 0x00, 0x08, 0x00, 0x20],
        [0x03, 0x02, 0x07, 0xF8, 0xFF, 0xFF, 0xFF, 0x0C],
        [0x0E, 0x00, 0x00, 0xF0, 0xFF, 0xFF, 0xFF, 0x70],
        [0x16, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0xA0],
        [0x04, 0x01, 0x00, 0x05, 0x00, 0x00, 0x00, 0x03],
        [0x02, 0x01, 0x00, 0x05, 0x00, 0x00, 0x00, 0x62],
    ];

    for bytes in cases {
        let instr = Instruction::decode(&bytes).unwrap();
        assert_eq!(instr.encode().unwrap(), bytes, "{instr}");
    }
}

#[test]
fn encode_mov_matches_reference_bytes() {
    let instr = Instruction::binary(
        Opcode::Mov,
        Operand::reg(Register::R1),
        Operand::ImmediateInt(100),
    );
    assert_eq!(
        instr.encode().unwrap(),
        [0x02, 0x01, 0x00, 0x64, 0x00, 0x00, 0x00, 0x02]
    );
}

#[test]
fn encode_rejects_two_immediates() {
    let instr = Instruction::binary(
        Opcode::Mov,
        Operand::ImmediateAddress(0x80000),
        Operand::ImmediateInt(1),
    );
    assert_eq!(
        instr.encode(),
        Err(EncodeError::ImmediateConflict(Opcode::Mov))
    );
}

#[test]
fn encode_shares_an_agreeing_immediate() {
    let instr = Instruction::binary(
        Opcode::Mov,
        Operand::BaseOffset { base: 1, offset: 5 },
        Operand::ImmediateInt(5),
    );
    assert_eq!(
        instr.encode().unwrap(),
        [0x02, 0x01, 0x00, 0x05, 0x00, 0x00, 0x00, 0x62]
    );
}

#[test]
fn encode_rejects_operand_past_arity() {
    let instr = Instruction::binary(
        Opcode::Push,
        Operand::reg(Register::R0),
        Operand::reg(Register::R1),
    );
    assert_eq!(
        instr.encode(),
        Err(EncodeError::OperandCount {
            opcode: Opcode::Push,
            expected: 1
        })
    );
}

#[test]
fn mode_bits_roundtrip() {
    for bits in 0..8u8 {
        match AddressingMode::from_bits(bits) {
            Some(mode) => assert_eq!(mode.bits(), bits),
            None => assert!(bits == 0b011 || bits == 0b101),
        }
    }
}

#[test]
fn display_operands() {
    let instr = Instruction::binary(
        Opcode::LoadAddr,
        Operand::reg(Register::R2),
        Operand::BaseOffset {
            base: Register::Bp.id(),
            offset: (-8i32) as u32,
        },
    );
    assert_eq!(instr.to_string(), "load_addr R2, [BP-8]");

    let instr = Instruction::unary(Opcode::PrintStr, Operand::ImmediateAddress(0x80000));
    assert_eq!(instr.to_string(), "print_str @0x080000");

    let instr = Instruction::unary(Opcode::Jz, Operand::PcRelative((-16i32) as u32));
    assert_eq!(instr.to_string(), "jz pc-16");

    assert_eq!(Instruction::nullary(Opcode::Ret).to_string(), "ret");
}
