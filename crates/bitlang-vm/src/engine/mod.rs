//! Fetch-decode-execute engine.

mod error;
mod handlers;
mod loader;
mod memory;
mod trace;
mod vm;

#[cfg(test)]
mod memory_tests;

pub use error::{ErrorCode, Fault, LoadError, RuntimeError, Severity};
pub use memory::Memory;
pub use trace::{NoopTracer, PrintTracer, Tracer};
pub use vm::{Flags, Vm, VmBuilder, VmState};
