//! First emission pass: addresses and data sections.
//!
//! Walks the program once. Every instruction takes 8 bytes of code, so a
//! label's address is known the moment it is seen. `.DATA`/`.RODATA` values
//! and instruction string literals are appended to their sections here, so
//! the encoding pass never has to grow a section.

use bitlang_bytecode::{INSTRUCTION_SIZE, Segment};
use bitlang_core::{Directive, Interner, Symbol};
use indexmap::IndexMap;

use crate::analyze::SymbolTable;
use crate::parser::{Line, Operand, ParsedDirective, Program};

use super::EmitError;

#[derive(Debug, Default)]
pub struct Layout {
    pub symbols: SymbolTable,
    pub rodata: Vec<u8>,
    pub data: Vec<u8>,
    code_len: usize,
    entry_point: u32,
    /// `.GLOBAL` names, with the line that declared them.
    globals: IndexMap<Symbol, u32>,
    /// Instruction string literals, deduplicated, to their rodata address.
    strings: IndexMap<Symbol, u32>,
    /// `.START` target, with its line.
    entry: Option<(Symbol, u32)>,
}

impl Layout {
    pub fn compute(program: &Program, interner: &Interner) -> Result<Self, EmitError> {
        let mut layout = Self::default();

        for (line, item) in program.iter() {
            match item {
                Line::LabelDefinition(name) => {
                    let address = Segment::Code.base() + layout.code_len as u32;
                    layout.define(*name, address, line, interner)?;
                }
                Line::Instruction(instr) => {
                    for operand in &instr.operands {
                        if let Operand::ImmediateString(text) = operand {
                            layout.intern_string(*text, interner);
                        }
                    }
                    layout.code_len += INSTRUCTION_SIZE;
                }
                Line::Directive(directive) => layout.directive(directive, line, interner)?,
            }
        }

        layout.check_capacity()?;
        layout.check_globals(interner)?;
        layout.entry_point = layout.resolve_entry(interner)?;
        Ok(layout)
    }

    pub fn code_len(&self) -> usize {
        self.code_len
    }

    /// Entry offset from the code segment base.
    pub fn entry_point(&self) -> u32 {
        self.entry_point
    }

    pub fn is_global(&self, name: Symbol) -> bool {
        self.globals.contains_key(&name)
    }

    /// Rodata address of an instruction string literal.
    pub fn string_address(&self, text: Symbol) -> Option<u32> {
        self.strings.get(&text).copied()
    }

    fn define(
        &mut self,
        name: Symbol,
        address: u32,
        line: u32,
        interner: &Interner,
    ) -> Result<(), EmitError> {
        if self.symbols.add(name, address) {
            return Ok(());
        }
        Err(EmitError::DuplicateSymbol {
            line,
            name: interner.resolve(name).to_owned(),
        })
    }

    fn intern_string(&mut self, text: Symbol, interner: &Interner) {
        if self.strings.contains_key(&text) {
            return;
        }
        let address = Segment::ReadOnlyData.base() + self.rodata.len() as u32;
        self.rodata.extend(string_bytes(interner.resolve(text)));
        self.strings.insert(text, address);
    }

    fn directive(
        &mut self,
        parsed: &ParsedDirective,
        line: u32,
        interner: &Interner,
    ) -> Result<(), EmitError> {
        let directive = parsed.directive;
        let invalid = |reason| EmitError::InvalidDirective {
            line,
            directive,
            reason,
        };

        match directive {
            Directive::Start => {
                let Operand::Symbol(target) = parsed.operands[0] else {
                    return Err(invalid("expects a label"));
                };
                if self.entry.is_some() {
                    return Err(invalid("is given more than once"));
                }
                self.entry = Some((target, line));
            }
            Directive::Global => {
                let Operand::Symbol(name) = parsed.operands[0] else {
                    return Err(invalid("expects a symbol"));
                };
                self.globals.entry(name).or_insert(line);
            }
            Directive::Data | Directive::Rodata => {
                let Operand::Symbol(name) = parsed.operands[0] else {
                    return Err(invalid("expects a name"));
                };
                let bytes = value_bytes(parsed.operands[1], interner)
                    .ok_or_else(|| invalid("expects an integer, char or string value"))?;

                let (segment, section) = match directive {
                    Directive::Data => (Segment::Data, &mut self.data),
                    _ => (Segment::ReadOnlyData, &mut self.rodata),
                };
                let address = segment.base() + section.len() as u32;
                section.extend(bytes);
                self.define(name, address, line, interner)?;
            }
            Directive::Unknown => return Err(EmitError::UnknownDirective { line }),
        }
        Ok(())
    }

    fn check_capacity(&self) -> Result<(), EmitError> {
        let sections = [
            (Segment::Code, self.code_len),
            (Segment::ReadOnlyData, self.rodata.len()),
            (Segment::Data, self.data.len()),
        ];
        for (segment, size) in sections {
            if size > segment.size() as usize {
                return Err(EmitError::SectionOverflow {
                    segment,
                    size,
                    capacity: segment.size(),
                });
            }
        }
        Ok(())
    }

    fn check_globals(&self, interner: &Interner) -> Result<(), EmitError> {
        for (&name, &line) in &self.globals {
            if !self.symbols.contains(name) {
                return Err(EmitError::UndefinedSymbol {
                    line,
                    name: interner.resolve(name).to_owned(),
                });
            }
        }
        Ok(())
    }

    fn resolve_entry(&self, interner: &Interner) -> Result<u32, EmitError> {
        let Some((target, line)) = self.entry else {
            return Ok(0);
        };
        let name = || interner.resolve(target).to_owned();

        let address = self
            .symbols
            .lookup(target)
            .ok_or_else(|| EmitError::UndefinedSymbol { line, name: name() })?;

        let offset = address.wrapping_sub(Segment::Code.base());
        if !Segment::Code.contains(address) || offset as usize >= self.code_len {
            return Err(EmitError::InvalidEntry { line, name: name() });
        }
        Ok(offset)
    }
}

/// NUL-terminated, padded to 4 bytes.
fn string_bytes(text: &str) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    bytes.resize(bytes.len().next_multiple_of(4), 0);
    bytes
}

fn value_bytes(value: Operand, interner: &Interner) -> Option<Vec<u8>> {
    match value {
        Operand::ImmediateInt(v) => Some(v.to_le_bytes().to_vec()),
        Operand::ImmediateChar(c) => Some(vec![c, 0, 0, 0]),
        Operand::ImmediateString(text) => Some(string_bytes(interner.resolve(text))),
        Operand::Register(_) | Operand::Symbol(_) | Operand::None => None,
    }
}
