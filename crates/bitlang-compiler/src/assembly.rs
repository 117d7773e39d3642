//! High-level facade over the assembler pipeline.

use bitlang_bytecode::Container;
use bitlang_core::{Interner, Symbol};

use crate::Result;
use crate::emit::emit;
use crate::parser::{DEFAULT_LINE_CAPACITY, Parser, Program, lex};

/// A parsed source file together with the arena that owns its strings.
///
/// Dropping the `Assembly` releases every token, operand and line at once.
#[derive(Debug, Clone)]
pub struct Assembly {
    interner: Interner,
    program: Program,
}

impl Assembly {
    pub fn parse(source: &str) -> Result<Self> {
        Self::parse_with_capacity(source, DEFAULT_LINE_CAPACITY)
    }

    pub fn parse_with_capacity(source: &str, capacity: usize) -> Result<Self> {
        let mut interner = Interner::new();
        let tokens = lex(source, &mut interner)?;
        let program = Parser::new(tokens, &mut interner)
            .with_capacity(capacity)
            .parse()?;
        Ok(Self { interner, program })
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    pub fn emit(&self) -> Result<Container> {
        Ok(emit(&self.program, &self.interner)?)
    }

    /// The parsed program as text, one line per `Line`.
    pub fn render(&self) -> String {
        self.program.render(&self.interner)
    }
}

/// Lex, parse and emit in one step.
pub fn assemble(source: &str) -> Result<Container> {
    Assembly::parse(source)?.emit()
}
