#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Bytecode format for bitlang.
//!
//! This crate contains:
//! - The container layout (`Header`, `Container`) shared by assembler and VM
//! - The fixed 8-byte instruction encoding (`Instruction`, `Operand`, `AddressingMode`)
//! - The VM memory map (`Segment`)
//! - A disassembler (`dump`)

pub mod bytecode;

pub use bytecode::{
    AddressingMode, Container, ContainerError, DecodeError, EncodeError, HEADER_SIZE, Header,
    INSTRUCTION_SIZE, Instruction, ListingLine, MAGIC, MEMORY_SIZE, Operand, Sections, Segment,
    VERSION, dump, format_instruction, listing,
};
