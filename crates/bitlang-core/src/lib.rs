#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared vocabulary of the bitlang toolchain.
//!
//! The assembler and the VM both read the instruction set from here, so the
//! opcode values, operand arity and operand kinds cannot drift apart.

pub mod interner;
pub mod isa;

pub use interner::{Interner, Symbol};
pub use isa::{Directive, Opcode, OpcodeInfo, OperandKind, Register};

#[cfg(test)]
mod interner_tests;
#[cfg(test)]
mod isa_tests;
