//! Second emission pass: instruction encoding.

use bitlang_bytecode::{Container, INSTRUCTION_SIZE, Instruction, Operand as Encoded};
use bitlang_core::{Interner, Opcode};

use crate::parser::{Instruction as ParsedInstruction, Line, Operand, Program};

use super::EmitError;
use super::layout::Layout;

/// Emit a bytecode container from a parsed program.
pub fn emit(program: &Program, interner: &Interner) -> Result<Container, EmitError> {
    let layout = Layout::compute(program, interner)?;

    let mut code = Vec::with_capacity(layout.code_len());
    for (line, item) in program.iter() {
        let Line::Instruction(instr) = item else {
            continue;
        };
        code.extend_from_slice(&encode(instr, &layout, interner, line)?);
    }

    tracing::debug!(
        instructions = code.len() / INSTRUCTION_SIZE,
        symbols = layout.symbols.len(),
        rodata = layout.rodata.len(),
        data = layout.data.len(),
        "emitted container"
    );

    let entry_point = layout.entry_point();
    Ok(Container::new(code, layout.rodata, layout.data, entry_point))
}

fn encode(
    instr: &ParsedInstruction,
    layout: &Layout,
    interner: &Interner,
    line: u32,
) -> Result<[u8; INSTRUCTION_SIZE], EmitError> {
    let mut operands = [Encoded::None; 2];
    let mut global = false;

    for (slot, operand) in instr.operands.iter().enumerate() {
        let (encoded, is_global) =
            lower_operand(instr.opcode, slot, *operand, layout, interner, line)?;
        operands[slot] = encoded;
        global |= is_global;
    }

    Instruction::new(instr.opcode, operands)
        .with_global(global)
        .encode()
        .map_err(|source| EmitError::Encode { line, source })
}

/// Choose the addressing mode for one operand. The second value is set when
/// the operand names a `.GLOBAL` symbol.
fn lower_operand(
    opcode: Opcode,
    slot: usize,
    operand: Operand,
    layout: &Layout,
    interner: &Interner,
    line: u32,
) -> Result<(Encoded, bool), EmitError> {
    // The address slot of these opcodes holds an address, not a value.
    let takes_address = address_slot(opcode) == Some(slot);

    let encoded = match operand {
        Operand::Register(reg) if takes_address => Encoded::RegisterIndirect(reg.id()),
        Operand::Register(reg) => Encoded::RegisterDirect(reg.id()),
        Operand::ImmediateInt(v) if takes_address => Encoded::ImmediateAddress(v),
        Operand::ImmediateInt(v) => Encoded::ImmediateInt(v),
        Operand::ImmediateChar(c) if takes_address => Encoded::ImmediateAddress(c as u32),
        Operand::ImmediateChar(c) => Encoded::ImmediateInt(c as u32),
        Operand::ImmediateString(text) => {
            let address = layout.string_address(text).ok_or_else(|| {
                EmitError::UndefinedSymbol {
                    line,
                    name: interner.resolve(text).to_owned(),
                }
            })?;
            Encoded::ImmediateAddress(address)
        }
        Operand::Symbol(name) => {
            let address =
                layout
                    .symbols
                    .lookup(name)
                    .ok_or_else(|| EmitError::UndefinedSymbol {
                        line,
                        name: interner.resolve(name).to_owned(),
                    })?;
            return Ok((Encoded::ImmediateAddress(address), layout.is_global(name)));
        }
        Operand::None => Encoded::None,
    };
    Ok((encoded, false))
}

fn address_slot(opcode: Opcode) -> Option<usize> {
    match opcode {
        Opcode::PrintStr => Some(0),
        Opcode::LoadAddr => Some(1),
        _ => None,
    }
}
