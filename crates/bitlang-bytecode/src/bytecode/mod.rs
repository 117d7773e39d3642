//! Container format, instruction encoding and memory map.

mod constants;
mod container;
mod dump;
mod header;
mod instructions;
mod segment;

pub use constants::{HEADER_SIZE, INSTRUCTION_SIZE, MAGIC, MEMORY_SIZE, VERSION};
pub use container::{Container, ContainerError, Sections};
pub use dump::{ListingLine, dump, format_instruction, listing};
pub use header::Header;
pub use instructions::{AddressingMode, DecodeError, EncodeError, Instruction, Operand};
pub use segment::Segment;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod header_tests;
#[cfg(test)]
mod instructions_tests;
