//! Instruction set tables.
//!
//! `Opcode::info` is the one place where an opcode's mnemonic, arity and
//! operand kinds are declared. The parser uses it to decide how many operands
//! to consume, the decoder uses it to decide how many operand fields to read.

use std::fmt;

/// Operation codes, numbered as they appear in byte 0 of an encoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Opcode {
    PrintChr = 0x00,
    PrintStr = 0x01,
    Mov = 0x02,
    LoadAddr = 0x03,
    Add = 0x04,
    Sub = 0x05,
    Halt = 0x06,
    Mul = 0x07,
    Div = 0x08,
    Mod = 0x09,
    And = 0x0A,
    Or = 0x0B,
    Not = 0x0C,
    Cmp = 0x0D,
    Jz = 0x0E,
    Jnz = 0x0F,
    Jeq = 0x10,
    Jgt = 0x11,
    Jge = 0x12,
    Jlt = 0x13,
    Jle = 0x14,
    Jmp = 0x15,
    Call = 0x16,
    Ret = 0x17,
    Push = 0x18,
    Pop = 0x19,
}

/// Static description of one opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub mnemonic: &'static str,
    /// Expected kind per operand slot; the slice length is the arity.
    pub operands: &'static [OperandKind],
}

impl OpcodeInfo {
    #[inline]
    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }

    /// Expected kind of `slot`, `OperandKind::None` past the arity.
    pub fn slot(&self, slot: usize) -> OperandKind {
        self.operands.get(slot).copied().unwrap_or(OperandKind::None)
    }
}

const NO_OPERANDS: &[OperandKind] = &[];
const REG: &[OperandKind] = &[OperandKind::Register];
const SRC: &[OperandKind] = &[OperandKind::AnySource];
const SYM: &[OperandKind] = &[OperandKind::Symbol];
const REG_SRC: &[OperandKind] = &[OperandKind::Register, OperandKind::AnySource];

impl Opcode {
    /// Every opcode, indexed by its numeric value.
    pub const ALL: [Opcode; 26] = [
        Opcode::PrintChr,
        Opcode::PrintStr,
        Opcode::Mov,
        Opcode::LoadAddr,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Halt,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::And,
        Opcode::Or,
        Opcode::Not,
        Opcode::Cmp,
        Opcode::Jz,
        Opcode::Jnz,
        Opcode::Jeq,
        Opcode::Jgt,
        Opcode::Jge,
        Opcode::Jlt,
        Opcode::Jle,
        Opcode::Jmp,
        Opcode::Call,
        Opcode::Ret,
        Opcode::Push,
        Opcode::Pop,
    ];

    #[inline]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Mnemonic lookup, ASCII case-insensitive.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn info(self) -> OpcodeInfo {
        let (mnemonic, operands) = match self {
            Opcode::PrintChr => ("print_chr", REG),
            Opcode::PrintStr => ("print_str", SRC),
            Opcode::Mov => ("mov", REG_SRC),
            Opcode::LoadAddr => ("load_addr", REG_SRC),
            Opcode::Add => ("add", REG_SRC),
            Opcode::Sub => ("sub", REG_SRC),
            Opcode::Halt => ("halt", NO_OPERANDS),
            Opcode::Mul => ("mul", REG_SRC),
            Opcode::Div => ("div", REG_SRC),
            Opcode::Mod => ("mod", REG_SRC),
            Opcode::And => ("and", REG_SRC),
            Opcode::Or => ("or", REG_SRC),
            Opcode::Not => ("not", REG),
            Opcode::Cmp => ("cmp", NO_OPERANDS),
            Opcode::Jz => ("jz", SYM),
            Opcode::Jnz => ("jnz", SYM),
            Opcode::Jeq => ("jeq", SYM),
            Opcode::Jgt => ("jgt", SYM),
            Opcode::Jge => ("jge", SYM),
            Opcode::Jlt => ("jlt", SYM),
            Opcode::Jle => ("jle", SYM),
            Opcode::Jmp => ("jmp", SYM),
            Opcode::Call => ("call", SYM),
            Opcode::Ret => ("ret", NO_OPERANDS),
            Opcode::Push => ("push", REG),
            Opcode::Pop => ("pop", REG),
        };
        OpcodeInfo { mnemonic, operands }
    }

    #[inline]
    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    #[inline]
    pub fn operand_count(self) -> usize {
        self.info().operand_count()
    }

    /// Jumps and calls: the operand is a code address, not a value.
    pub fn is_control_flow(self) -> bool {
        matches!(
            self,
            Opcode::Jz
                | Opcode::Jnz
                | Opcode::Jeq
                | Opcode::Jgt
                | Opcode::Jge
                | Opcode::Jlt
                | Opcode::Jle
                | Opcode::Jmp
                | Opcode::Call
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// What an operand slot accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Register,
    ImmediateInt,
    ImmediateChar,
    ImmediateString,
    Symbol,
    /// Register, any immediate, or a symbol.
    AnySource,
    None,
}

impl OperandKind {
    /// Whether an operand of kind `found` may fill a slot declared as `self`.
    pub fn accepts(self, found: OperandKind) -> bool {
        match self {
            OperandKind::AnySource => !matches!(found, OperandKind::None | OperandKind::AnySource),
            expected => expected == found,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperandKind::Register => "register",
            OperandKind::ImmediateInt => "integer",
            OperandKind::ImmediateChar => "char",
            OperandKind::ImmediateString => "string",
            OperandKind::Symbol => "symbol",
            OperandKind::AnySource => "source",
            OperandKind::None => "nothing",
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addressable registers. Ids 0..=7 are general purpose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
    Sp = 8,
    Bp = 9,
    Hp = 10,
}

impl Register {
    pub const ALL: [Register; 11] = [
        Register::R0,
        Register::R1,
        Register::R2,
        Register::R3,
        Register::R4,
        Register::R5,
        Register::R6,
        Register::R7,
        Register::Sp,
        Register::Bp,
        Register::Hp,
    ];

    pub const GENERAL_COUNT: usize = 8;

    #[inline]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Name lookup, ASCII case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|reg| reg.name().eq_ignore_ascii_case(name))
    }

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::R0 => "R0",
            Register::R1 => "R1",
            Register::R2 => "R2",
            Register::R3 => "R3",
            Register::R4 => "R4",
            Register::R5 => "R5",
            Register::R6 => "R6",
            Register::R7 => "R7",
            Register::Sp => "SP",
            Register::Bp => "BP",
            Register::Hp => "HP",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Assembler directives. Names match exactly, including case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Directive {
    Start,
    Data,
    Rodata,
    Global,
    Unknown,
}

impl Directive {
    pub fn from_name(name: &str) -> Self {
        match name {
            ".START" => Directive::Start,
            ".DATA" => Directive::Data,
            ".RODATA" => Directive::Rodata,
            ".GLOBAL" => Directive::Global,
            _ => Directive::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Directive::Start => ".START",
            Directive::Data => ".DATA",
            Directive::Rodata => ".RODATA",
            Directive::Global => ".GLOBAL",
            Directive::Unknown => ".?",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
