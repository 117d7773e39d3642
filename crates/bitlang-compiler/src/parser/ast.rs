//! Parsed program representation.

use std::fmt::Write as _;

use bitlang_core::{Directive, Interner, Opcode, OperandKind, Register, Symbol};

/// Parse-time operand, before addressing modes are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    ImmediateInt(u32),
    ImmediateChar(u8),
    ImmediateString(Symbol),
    Symbol(Symbol),
    None,
}

impl Operand {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Register(_) => OperandKind::Register,
            Operand::ImmediateInt(_) => OperandKind::ImmediateInt,
            Operand::ImmediateChar(_) => OperandKind::ImmediateChar,
            Operand::ImmediateString(_) => OperandKind::ImmediateString,
            Operand::Symbol(_) => OperandKind::Symbol,
            Operand::None => OperandKind::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Operand::None)
    }

    fn render(&self, interner: &Interner, out: &mut String) {
        match *self {
            Operand::Register(reg) => out.push_str(reg.name()),
            Operand::ImmediateInt(v) => write!(out, "{v}").unwrap(),
            Operand::ImmediateChar(c) => write!(out, "'{}'", c as char).unwrap(),
            Operand::ImmediateString(s) => write!(out, "\"{}\"", interner.resolve(s)).unwrap(),
            Operand::Symbol(s) => out.push_str(interner.resolve(s)),
            Operand::None => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: [Operand; 2],
}

impl Instruction {
    pub fn operand_count(&self) -> usize {
        self.operands.iter().filter(|op| !op.is_none()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDirective {
    pub directive: Directive,
    pub operands: [Operand; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    LabelDefinition(Symbol),
    Instruction(Instruction),
    Directive(ParsedDirective),
}

/// Lines in source order, each tagged with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    lines: Vec<Line>,
    source_lines: Vec<u32>,
    capacity: usize,
}

impl Program {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Vec::new(),
            source_lines: Vec::new(),
            capacity,
        }
    }

    /// # Panics
    /// Panics when the program is already at capacity. The capacity is sized
    /// by the caller up front, so running out is a caller bug.
    pub fn push(&mut self, line: Line, source_line: u32) {
        assert!(
            self.lines.len() < self.capacity,
            "program line capacity ({}) exceeded at source line {source_line}",
            self.capacity
        );
        self.lines.push(line);
        self.source_lines.push(source_line);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `(source line, line)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Line)> {
        self.source_lines.iter().copied().zip(self.lines.iter())
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.lines.iter().filter_map(|line| match line {
            Line::Instruction(instr) => Some(instr),
            _ => None,
        })
    }

    /// One line of text per `Line`, for debugging and tests.
    pub fn render(&self, interner: &Interner) -> String {
        let mut out = String::new();
        for (source_line, line) in self.iter() {
            write!(out, "{source_line:03}  ").unwrap();
            match line {
                Line::LabelDefinition(name) => {
                    write!(out, "{}:", interner.resolve(*name)).unwrap();
                }
                Line::Instruction(instr) => {
                    out.push_str(instr.opcode.mnemonic());
                    render_operands(&instr.operands, interner, &mut out);
                }
                Line::Directive(d) => {
                    out.push_str(d.directive.name());
                    render_operands(&d.operands, interner, &mut out);
                }
            }
            out.push('\n');
        }
        out
    }
}

fn render_operands(operands: &[Operand; 2], interner: &Interner, out: &mut String) {
    let mut sep = " ";
    for operand in operands.iter().filter(|op| !op.is_none()) {
        out.push_str(sep);
        operand.render(interner, out);
        sep = ", ";
    }
}
