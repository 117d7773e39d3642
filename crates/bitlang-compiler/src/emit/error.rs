use bitlang_bytecode::{EncodeError, Segment};
use bitlang_core::Directive;

/// Errors from layout and encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("line {line}: `{name}` is already defined")]
    DuplicateSymbol { line: u32, name: String },

    #[error("line {line}: undefined symbol `{name}`")]
    UndefinedSymbol { line: u32, name: String },

    #[error("line {line}: unknown directive")]
    UnknownDirective { line: u32 },

    #[error("line {line}: {directive} {reason}")]
    InvalidDirective {
        line: u32,
        directive: Directive,
        reason: &'static str,
    },

    #[error("line {line}: entry point `{name}` is not a code label")]
    InvalidEntry { line: u32, name: String },

    #[error("{segment} section needs {size} bytes, capacity is {capacity}")]
    SectionOverflow {
        segment: Segment,
        size: usize,
        capacity: u32,
    },

    #[error("line {line}: {source}")]
    Encode { line: u32, source: EncodeError },
}
