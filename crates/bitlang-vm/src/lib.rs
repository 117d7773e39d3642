//! Register VM for executing bitlang bytecode.
//!
//! The VM owns a single 5 MiB memory image, loads a container into its
//! segments and runs a fetch-decode-execute loop until `halt` or a fault.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

pub use engine::{
    ErrorCode, Fault, Flags, LoadError, Memory, NoopTracer, PrintTracer, RuntimeError, Severity,
    Tracer, Vm, VmBuilder, VmState,
};
