//! Execution tracing.
//!
//! `NoopTracer` methods are empty and `#[inline(always)]`, so a run with it
//! compiles down to the untraced loop. `PrintTracer` keeps one line per event.

use bitlang_bytecode::{Instruction, format_instruction};

use super::error::Fault;

pub trait Tracer {
    /// Called after decode, before the instruction executes.
    fn trace_instruction(&mut self, pc: u32, instr: &Instruction);

    /// Called when `halt` stops the VM.
    fn trace_halt(&mut self, pc: u32);

    /// Called once when a run stops on an error.
    fn trace_fault(&mut self, fault: &Fault);
}

pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _pc: u32, _instr: &Instruction) {}

    #[inline(always)]
    fn trace_halt(&mut self, _pc: u32) {}

    #[inline(always)]
    fn trace_fault(&mut self, _fault: &Fault) {}
}

/// Collects a disassembly-style line per executed instruction.
#[derive(Debug, Default)]
pub struct PrintTracer {
    lines: Vec<String>,
}

impl PrintTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write the trace to stderr; stdout belongs to the program.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{}", line);
        }
    }
}

impl Tracer for PrintTracer {
    fn trace_instruction(&mut self, pc: u32, instr: &Instruction) {
        self.lines
            .push(format!("{pc:#08x}  {}", format_instruction(instr)));
    }

    fn trace_halt(&mut self, pc: u32) {
        self.lines.push(format!("halted at {pc:#08x}"));
    }

    fn trace_fault(&mut self, fault: &Fault) {
        self.lines
            .push(format!("fault [{}]: {fault}", fault.code().as_u8()));
    }
}
