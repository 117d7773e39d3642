//! Bytecode emission.
//!
//! Two passes over the parsed program:
//! - `layout` assigns code addresses to labels and builds the rodata and
//!   data sections
//! - `emitter` encodes each instruction with every symbol resolved

mod emitter;
mod error;
pub mod layout;

pub use emitter::emit;
pub use error::EmitError;
pub use layout::Layout;

#[cfg(test)]
mod emit_tests;
