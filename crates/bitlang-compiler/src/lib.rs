//! bitlang assembler: source text to bytecode container.
//!
//! Pipeline:
//! - `parser` - lexer, token stream, recursive-descent parser
//! - `analyze` - symbol table
//! - `emit` - layout, label resolution and instruction encoding
//! - `assembly` - the `Assembly` facade tying the stages together

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod assembly;
pub mod emit;
pub mod parser;

pub use analyze::SymbolTable;
pub use assembly::{Assembly, assemble};
pub use emit::EmitError;
pub use parser::{LexError, ParseError};

/// Errors that abort one assembly run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod assembly_tests;
