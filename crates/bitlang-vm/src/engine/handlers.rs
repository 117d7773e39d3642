//! Opcode handlers.
//!
//! Every handler validates its addressing modes first and fails with
//! `InvalidAddressingMode` without touching state when they do not fit.

use std::io::Write;

use bitlang_bytecode::{Instruction, MEMORY_SIZE, Operand, Segment};
use bitlang_core::Opcode;

use super::error::RuntimeError;
use super::vm::{Vm, VmState};

/// Stack slot width.
const SLOT: u32 = 4;

impl Vm {
    pub(crate) fn execute<W: Write>(
        &mut self,
        instr: Instruction,
        out: &mut W,
    ) -> Result<(), RuntimeError> {
        let op = instr.opcode;
        match op {
            Opcode::PrintChr => {
                let value = self.read_reg(dest_register(&instr)?)?;
                out.write_all(&[value as u8])?;
            }
            Opcode::PrintStr => self.print_str(&instr, out)?,
            Opcode::Mov => self.mov(&instr)?,
            Opcode::LoadAddr => self.load_addr(&instr)?,
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Mod
            | Opcode::And
            | Opcode::Or => self.arithmetic(&instr)?,
            Opcode::Not => {
                let dest = dest_register(&instr)?;
                let result = !self.read_reg(dest)?;
                self.write_reg(dest, result)?;
                self.set_result_flags(result);
            }
            Opcode::Cmp => {
                let (a, b) = (self.registers[0] as i32, self.registers[1] as i32);
                self.flags.zero = a == b;
                self.flags.negative = a < b;
            }
            Opcode::Jz
            | Opcode::Jnz
            | Opcode::Jeq
            | Opcode::Jgt
            | Opcode::Jge
            | Opcode::Jlt
            | Opcode::Jle
            | Opcode::Jmp => {
                let target = self.jump_target(&instr)?;
                if self.condition(op) {
                    self.pc = target;
                }
            }
            Opcode::Call => {
                let target = self.jump_target(&instr)?;
                self.push(self.pc)?;
                self.pc = target;
            }
            Opcode::Ret => self.pc = self.pop()?,
            Opcode::Push => {
                let value = self.read_reg(dest_register(&instr)?)?;
                self.push(value)?;
            }
            Opcode::Pop => {
                let dest = dest_register(&instr)?;
                // Validate the register before the stack moves.
                Vm::writable_reg(dest)?;
                let value = self.pop()?;
                self.write_reg(dest, value)?;
            }
            Opcode::Halt => {
                if self.state != VmState::Halted {
                    self.state = VmState::Halted;
                }
            }
        }
        Ok(())
    }

    fn print_str<W: Write>(&self, instr: &Instruction, out: &mut W) -> Result<(), RuntimeError> {
        let addr = match instr.dest() {
            Operand::RegisterIndirect(id) => self.read_reg(id)?,
            Operand::ImmediateAddress(addr) => addr,
            other => return Err(invalid_mode(instr.opcode, other)),
        };

        let (text, terminated) = self.memory.c_str(addr)?;
        if !terminated {
            tracing::warn!(addr, "string runs to the end of memory without a terminator");
        }
        out.write_all(text)?;
        Ok(())
    }

    fn mov(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let dest = dest_register(instr)?;
        let value = match instr.src() {
            Operand::PcRelative(_) | Operand::None => return Ok(()),
            _ => self.source_value(instr)?,
        };
        self.write_reg(dest, value)
    }

    fn load_addr(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let dest = dest_register(instr)?;
        let addr = match instr.src() {
            Operand::ImmediateAddress(addr) => self.memory.check(addr, 1)?,
            Operand::RegisterIndirect(id) => self.memory.check(self.read_reg(id)?, 1)?,
            Operand::BaseOffset { base, offset } => self.base_offset(base, offset)?,
            Operand::PcRelative(offset) => self.pc.wrapping_add(offset),
            other => return Err(invalid_mode(instr.opcode, other)),
        };
        self.write_reg(dest, addr)
    }

    fn arithmetic(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let dest = dest_register(instr)?;
        let rhs = self.source_value(instr)?;
        let lhs = self.read_reg(dest)?;

        let result = match instr.opcode {
            Opcode::Add => {
                let (result, carry) = lhs.overflowing_add(rhs);
                self.flags.carry = carry;
                self.flags.overflow = (lhs as i32).overflowing_add(rhs as i32).1;
                result
            }
            Opcode::Sub => {
                let (result, borrow) = lhs.overflowing_sub(rhs);
                self.flags.carry = borrow;
                self.flags.overflow = (lhs as i32).overflowing_sub(rhs as i32).1;
                result
            }
            Opcode::Mul => lhs.wrapping_mul(rhs),
            Opcode::Div => lhs.checked_div(rhs).ok_or(RuntimeError::DivideByZero)?,
            Opcode::Mod => lhs.checked_rem(rhs).ok_or(RuntimeError::DivideByZero)?,
            Opcode::And => lhs & rhs,
            Opcode::Or => lhs | rhs,
            other => unreachable!("`{other}` is not an arithmetic opcode"),
        };

        self.write_reg(dest, result)?;
        self.set_result_flags(result);
        Ok(())
    }

    /// Value of the source operand of a two-operand instruction.
    fn source_value(&self, instr: &Instruction) -> Result<u32, RuntimeError> {
        match instr.src() {
            Operand::RegisterDirect(id) => self.read_reg(id),
            Operand::ImmediateInt(value) => Ok(value),
            Operand::ImmediateAddress(addr) => self.memory.read_u32(addr),
            Operand::RegisterIndirect(id) => self.memory.read_u32(self.read_reg(id)?),
            Operand::BaseOffset { base, offset } => {
                self.memory.read_u32(self.base_offset(base, offset)?)
            }
            other => Err(invalid_mode(instr.opcode, other)),
        }
    }

    /// Base register plus signed offset, checked against the image.
    fn base_offset(&self, base: u8, offset: u32) -> Result<u32, RuntimeError> {
        let base = self.read_reg(base)?;
        let addr = base as i64 + offset as i32 as i64;
        if (0..MEMORY_SIZE as i64).contains(&addr) {
            Ok(addr as u32)
        } else {
            Err(RuntimeError::MemoryOutOfBounds(addr as u32))
        }
    }

    fn jump_target(&self, instr: &Instruction) -> Result<u32, RuntimeError> {
        match instr.dest() {
            Operand::ImmediateAddress(addr) => Ok(addr),
            Operand::PcRelative(offset) => Ok(self.pc.wrapping_add(offset)),
            other => Err(invalid_mode(instr.opcode, other)),
        }
    }

    fn condition(&self, op: Opcode) -> bool {
        let f = self.flags;
        match op {
            Opcode::Jz | Opcode::Jeq => f.zero,
            Opcode::Jnz => !f.zero,
            Opcode::Jgt => !f.zero && !f.negative,
            Opcode::Jge => !f.negative,
            Opcode::Jlt => f.negative,
            Opcode::Jle => f.negative || f.zero,
            _ => true,
        }
    }

    fn push(&mut self, value: u32) -> Result<(), RuntimeError> {
        let sp = self
            .sp
            .checked_sub(SLOT)
            .filter(|&sp| sp >= Segment::Stack.base())
            .ok_or(RuntimeError::StackOverflow)?;
        self.memory.write_u32(sp, value)?;
        self.sp = sp;
        Ok(())
    }

    fn pop(&mut self) -> Result<u32, RuntimeError> {
        let next = self
            .sp
            .checked_add(SLOT)
            .filter(|&next| next <= Segment::Stack.end())
            .ok_or(RuntimeError::StackUnderflow)?;
        let value = self.memory.read_u32(self.sp)?;
        self.sp = next;
        Ok(value)
    }

    fn set_result_flags(&mut self, result: u32) {
        self.flags.zero = result == 0;
        self.flags.negative = (result as i32) < 0;
    }
}

/// Register id of a RegisterDirect destination.
fn dest_register(instr: &Instruction) -> Result<u8, RuntimeError> {
    match instr.dest() {
        Operand::RegisterDirect(id) => Ok(id),
        other => Err(invalid_mode(instr.opcode, other)),
    }
}

fn invalid_mode(opcode: Opcode, operand: Operand) -> RuntimeError {
    RuntimeError::InvalidAddressingMode {
        opcode,
        mode: operand.mode(),
    }
}
