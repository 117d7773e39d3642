//! Errors that can stop a VM run.
//!
//! Every error carries a numeric `ErrorCode`. Codes 1-99 are fatal
//! (corrupt setup or undecodable code), 100-199 are recoverable (the program
//! did something illegal but the host can keep going).

use std::fmt;
use std::io;
use std::sync::Arc;

use bitlang_bytecode::{AddressingMode, ContainerError, DecodeError};
use bitlang_core::Opcode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    BytecodeTooLarge = 1,
    MemoryAllocationFailed = 2,
    InvalidBytecode = 3,
    OpcodeNotFound = 4,
    NullPointer = 5,
    PcOutOfBounds = 6,
    Unknown = 99,

    StackOverflow = 100,
    StackUnderflow = 101,
    HeapOutOfBounds = 102,
    MemoryOutOfBounds = 103,
    RegisterNotFound = 110,
    DivideByZero = 111,
    InvalidAddressingMode = 112,
    IllegalOperation = 113,
    Io = 120,
    ExecFuelExhausted = 130,
}

impl ErrorCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn severity(self) -> Severity {
        Severity::classify(self.as_u8())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.as_u8())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Fatal,
    Recoverable,
}

impl Severity {
    /// Classify a raw status code. Codes outside the known ranges are fatal.
    pub fn classify(code: u8) -> Self {
        match code {
            0 => Severity::Success,
            1..=99 => Severity::Fatal,
            100..=199 => Severity::Recoverable,
            _ => Severity::Fatal,
        }
    }
}

/// Container rejected by the loader. Nothing has been written to the VM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Truncated(#[from] ContainerError),

    #[error("unsupported bytecode version {0}")]
    UnsupportedVersion(u16),

    #[error("code section is empty")]
    EmptyCode,

    #[error("code section of {len} bytes exceeds the {capacity}-byte code segment")]
    CodeTooLarge { len: u32, capacity: u32 },

    #[error("data section of {len} bytes exceeds the {capacity}-byte data segment")]
    DataTooLarge { len: u32, capacity: u32 },

    #[error("rodata section of {len} bytes exceeds the {capacity}-byte rodata segment")]
    RodataTooLarge { len: u32, capacity: u32 },
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("failed to allocate the VM memory image")]
    MemoryAllocationFailed,

    #[error("invalid bytecode: {0}")]
    InvalidBytecode(#[from] LoadError),

    #[error("invalid instruction: {0}")]
    InvalidInstruction(DecodeError),

    #[error("unknown opcode {0:#04x}")]
    OpcodeNotFound(u8),

    #[error("program counter {0:#08x} is outside the loaded code")]
    PcOutOfBounds(u32),

    #[error("stack overflow")]
    StackOverflow,

    #[error("stack underflow")]
    StackUnderflow,

    #[error("heap exhausted allocating {requested} bytes")]
    HeapOutOfBounds { requested: usize },

    #[error("memory access at {0:#x} is out of bounds")]
    MemoryOutOfBounds(u32),

    #[error("no register with id {0}")]
    RegisterNotFound(u8),

    #[error("division by zero")]
    DivideByZero,

    #[error("`{opcode}` does not accept {mode:?} operands")]
    InvalidAddressingMode {
        opcode: Opcode,
        mode: AddressingMode,
    },

    #[error("illegal operation: {0}")]
    IllegalOperation(&'static str),

    #[error("output error: {0}")]
    Io(#[source] Arc<io::Error>),

    /// Payload is the configured limit.
    #[error("execution fuel of {0} instructions exhausted")]
    ExecFuelExhausted(u32),
}

impl From<io::Error> for RuntimeError {
    fn from(err: io::Error) -> Self {
        RuntimeError::Io(Arc::new(err))
    }
}

impl From<DecodeError> for RuntimeError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::OpcodeNotFound(op) => RuntimeError::OpcodeNotFound(op),
            DecodeError::InvalidAddressingMode { .. } => RuntimeError::InvalidInstruction(err),
        }
    }
}

impl RuntimeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RuntimeError::MemoryAllocationFailed => ErrorCode::MemoryAllocationFailed,
            RuntimeError::InvalidBytecode(_) | RuntimeError::InvalidInstruction(_) => {
                ErrorCode::InvalidBytecode
            }
            RuntimeError::OpcodeNotFound(_) => ErrorCode::OpcodeNotFound,
            RuntimeError::PcOutOfBounds(_) => ErrorCode::PcOutOfBounds,
            RuntimeError::StackOverflow => ErrorCode::StackOverflow,
            RuntimeError::StackUnderflow => ErrorCode::StackUnderflow,
            RuntimeError::HeapOutOfBounds { .. } => ErrorCode::HeapOutOfBounds,
            RuntimeError::MemoryOutOfBounds(_) => ErrorCode::MemoryOutOfBounds,
            RuntimeError::RegisterNotFound(_) => ErrorCode::RegisterNotFound,
            RuntimeError::DivideByZero => ErrorCode::DivideByZero,
            RuntimeError::InvalidAddressingMode { .. } => ErrorCode::InvalidAddressingMode,
            RuntimeError::IllegalOperation(_) => ErrorCode::IllegalOperation,
            RuntimeError::Io(_) => ErrorCode::Io,
            RuntimeError::ExecFuelExhausted(_) => ErrorCode::ExecFuelExhausted,
        }
    }

    pub fn severity(&self) -> Severity {
        self.code().severity()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// A run that stopped on an error, with the address of the failing instruction.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{error} (pc {pc:#08x})")]
pub struct Fault {
    #[source]
    pub error: RuntimeError,
    pub pc: u32,
}

impl Fault {
    pub fn code(&self) -> ErrorCode {
        self.error.code()
    }

    pub fn is_fatal(&self) -> bool {
        self.error.is_fatal()
    }
}
