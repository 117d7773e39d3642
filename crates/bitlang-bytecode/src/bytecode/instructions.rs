//! Fixed-width instruction encoding.
//!
//! ```text
//! byte 0     opcode
//! byte 1     operand 0 register id
//! byte 2     operand 1 register id
//! bytes 3-6  immediate / address / offset (u32 LE)
//! byte 7     metadata
//!              bit 7     global
//!              bits 4-6  destination (operand 0) addressing mode
//!              bits 1-3  source (operand 1) addressing mode
//!              bit 0     operand 1 is immediate
//! ```
//!
//! Decoding is a pure function of the 8 bytes. The opcode's entry in the
//! shared format table decides how many operand slots are read; the rest are
//! `Operand::None`.

use std::fmt;

use bitlang_core::{Opcode, Register};

use super::INSTRUCTION_SIZE;

const META_GLOBAL: u8 = 0b1000_0000;
const META_OP2_IMMEDIATE: u8 = 0b0000_0001;
const DEST_SHIFT: u8 = 4;
const SRC_SHIFT: u8 = 1;
const MODE_MASK: u8 = 0b111;

/// How an operand's value is located.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    RegisterDirect,
    ImmediateInt,
    ImmediateAddress,
    RegisterIndirect,
    BaseOffset,
    PcRelative,
    /// Slot not used by the opcode. Encodes as zero bits.
    None,
}

impl AddressingMode {
    /// Decode a 3-bit mode field. `011` and `101` are unassigned.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & MODE_MASK {
            0b000 => Some(Self::RegisterDirect),
            0b001 => Some(Self::ImmediateInt),
            0b010 => Some(Self::ImmediateAddress),
            0b100 => Some(Self::RegisterIndirect),
            0b110 => Some(Self::BaseOffset),
            0b111 => Some(Self::PcRelative),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::RegisterDirect | Self::None => 0b000,
            Self::ImmediateInt => 0b001,
            Self::ImmediateAddress => 0b010,
            Self::RegisterIndirect => 0b100,
            Self::BaseOffset => 0b110,
            Self::PcRelative => 0b111,
        }
    }

    /// Whether the mode reads the 32-bit field.
    pub fn uses_immediate(self) -> bool {
        matches!(
            self,
            Self::ImmediateInt | Self::ImmediateAddress | Self::BaseOffset | Self::PcRelative
        )
    }
}

/// A decoded operand. Register ids are kept raw; the VM validates them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    RegisterDirect(u8),
    ImmediateInt(u32),
    ImmediateAddress(u32),
    RegisterIndirect(u8),
    BaseOffset { base: u8, offset: u32 },
    /// Signed offset from the address of the next instruction.
    PcRelative(u32),
    None,
}

impl Operand {
    pub fn reg(reg: Register) -> Self {
        Operand::RegisterDirect(reg.id())
    }

    pub fn mode(&self) -> AddressingMode {
        match self {
            Operand::RegisterDirect(_) => AddressingMode::RegisterDirect,
            Operand::ImmediateInt(_) => AddressingMode::ImmediateInt,
            Operand::ImmediateAddress(_) => AddressingMode::ImmediateAddress,
            Operand::RegisterIndirect(_) => AddressingMode::RegisterIndirect,
            Operand::BaseOffset { .. } => AddressingMode::BaseOffset,
            Operand::PcRelative(_) => AddressingMode::PcRelative,
            Operand::None => AddressingMode::None,
        }
    }

    /// Register id byte, 0 for modes without one.
    pub fn raw_id(&self) -> u8 {
        match *self {
            Operand::RegisterDirect(id)
            | Operand::RegisterIndirect(id)
            | Operand::BaseOffset { base: id, .. } => id,
            _ => 0,
        }
    }

    pub fn immediate(&self) -> Option<u32> {
        match *self {
            Operand::ImmediateInt(v)
            | Operand::ImmediateAddress(v)
            | Operand::PcRelative(v)
            | Operand::BaseOffset { offset: v, .. } => Some(v),
            _ => None,
        }
    }

    fn from_fields(mode: AddressingMode, id: u8, imm: u32) -> Self {
        match mode {
            AddressingMode::RegisterDirect => Operand::RegisterDirect(id),
            AddressingMode::ImmediateInt => Operand::ImmediateInt(imm),
            AddressingMode::ImmediateAddress => Operand::ImmediateAddress(imm),
            AddressingMode::RegisterIndirect => Operand::RegisterIndirect(id),
            AddressingMode::BaseOffset => Operand::BaseOffset {
                base: id,
                offset: imm,
            },
            AddressingMode::PcRelative => Operand::PcRelative(imm),
            AddressingMode::None => Operand::None,
        }
    }
}

fn register_name(id: u8) -> String {
    match Register::from_id(id) {
        Some(reg) => reg.name().to_owned(),
        None => format!("?{id}"),
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Operand::RegisterDirect(id) => f.write_str(&register_name(id)),
            Operand::ImmediateInt(v) => write!(f, "{v}"),
            Operand::ImmediateAddress(addr) => write!(f, "@{addr:#08x}"),
            Operand::RegisterIndirect(id) => write!(f, "[{}]", register_name(id)),
            Operand::BaseOffset { base, offset } => {
                write!(f, "[{}{:+}]", register_name(base), offset as i32)
            }
            Operand::PcRelative(offset) => write!(f, "pc{:+}", offset as i32),
            Operand::None => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown opcode {0:#04x}")]
    OpcodeNotFound(u8),
    #[error("unassigned addressing mode {bits:#05b} in operand {slot}")]
    InvalidAddressingMode { slot: usize, bits: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("both operands of `{0}` need the 32-bit field")]
    ImmediateConflict(Opcode),
    #[error("`{opcode}` takes {expected} operand(s)")]
    OperandCount { opcode: Opcode, expected: usize },
}

/// One decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: [Operand; 2],
    /// Metadata bit 7.
    pub global: bool,
    /// Metadata bit 0. Carried through, never consulted by the VM.
    pub op2_immediate: bool,
}

impl Instruction {
    pub fn new(opcode: Opcode, operands: [Operand; 2]) -> Self {
        Self {
            opcode,
            operands,
            global: false,
            op2_immediate: false,
        }
    }

    pub fn nullary(opcode: Opcode) -> Self {
        Self::new(opcode, [Operand::None, Operand::None])
    }

    pub fn unary(opcode: Opcode, operand: Operand) -> Self {
        Self::new(opcode, [operand, Operand::None])
    }

    pub fn binary(opcode: Opcode, dest: Operand, src: Operand) -> Self {
        Self::new(opcode, [dest, src])
    }

    pub fn with_global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    pub fn dest(&self) -> Operand {
        self.operands[0]
    }

    pub fn src(&self) -> Operand {
        self.operands[1]
    }

    pub fn decode(bytes: &[u8; INSTRUCTION_SIZE]) -> Result<Self, DecodeError> {
        let opcode = Opcode::from_u8(bytes[0]).ok_or(DecodeError::OpcodeNotFound(bytes[0]))?;
        let imm = u32::from_le_bytes([bytes[3], bytes[4], bytes[5], bytes[6]]);
        let meta = bytes[7];

        let mut operands = [Operand::None; 2];
        for (slot, operand) in operands
            .iter_mut()
            .enumerate()
            .take(opcode.operand_count())
        {
            let shift = if slot == 0 { DEST_SHIFT } else { SRC_SHIFT };
            let bits = (meta >> shift) & MODE_MASK;
            let mode = AddressingMode::from_bits(bits)
                .ok_or(DecodeError::InvalidAddressingMode { slot, bits })?;
            *operand = Operand::from_fields(mode, bytes[1 + slot], imm);
        }

        Ok(Self {
            opcode,
            operands,
            global: meta & META_GLOBAL != 0,
            op2_immediate: meta & META_OP2_IMMEDIATE != 0,
        })
    }

    /// Decode from an arbitrary slice; `None` if it is not 8 bytes long.
    pub fn decode_slice(bytes: &[u8]) -> Option<Result<Self, DecodeError>> {
        let bytes: &[u8; INSTRUCTION_SIZE] = bytes.try_into().ok()?;
        Some(Self::decode(bytes))
    }

    pub fn encode(&self) -> Result<[u8; INSTRUCTION_SIZE], EncodeError> {
        let expected = self.opcode.operand_count();
        if self.operands[expected..]
            .iter()
            .any(|op| !matches!(op, Operand::None))
        {
            return Err(EncodeError::OperandCount {
                opcode: self.opcode,
                expected,
            });
        }

        let [dest, src] = self.operands;
        // Both slots may read the shared field only if they agree on it.
        let imm = match (dest.immediate(), src.immediate()) {
            (Some(a), Some(b)) if a == b => a,
            (Some(_), Some(_)) => return Err(EncodeError::ImmediateConflict(self.opcode)),
            (Some(v), None) | (None, Some(v)) => v,
            (None, None) => 0,
        };

        let mut meta = (dest.mode().bits() << DEST_SHIFT) | (src.mode().bits() << SRC_SHIFT);
        if self.global {
            meta |= META_GLOBAL;
        }
        if self.op2_immediate {
            meta |= META_OP2_IMMEDIATE;
        }

        let mut bytes = [0u8; INSTRUCTION_SIZE];
        bytes[0] = self.opcode.as_u8();
        bytes[1] = dest.raw_id();
        bytes[2] = src.raw_id();
        bytes[3..7].copy_from_slice(&imm.to_le_bytes());
        bytes[7] = meta;
        Ok(bytes)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode.mnemonic())?;
        let mut sep = " ";
        for operand in self.operands.iter().filter(|op| **op != Operand::None) {
            write!(f, "{sep}{operand}")?;
            sep = ", ";
        }
        Ok(())
    }
}
