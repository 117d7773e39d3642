//! Recursive-descent parser.
//!
//! Each call to `parse_line` consumes the tokens of at most one logical line
//! and yields at most one `Line`. Operand counts and kinds are checked
//! against `Opcode::info`.

use bitlang_core::{Directive, Interner, Opcode};

use super::ast::{Instruction, Line, Operand, ParsedDirective, Program};
use super::error::ParseError;
use super::token::{Literal, Separator, Token};
use super::token_stream::TokenStream;

/// Default `Program` line capacity.
pub const DEFAULT_LINE_CAPACITY: usize = 1 << 16;

/// Parse a lexed token vector into a `Program`.
pub fn parse(tokens: Vec<Token>, interner: &mut Interner) -> Result<Program, ParseError> {
    Parser::new(tokens, interner).parse()
}

enum Step {
    Line(Line),
    Skip,
    Done,
}

pub struct Parser<'i> {
    stream: TokenStream,
    interner: &'i mut Interner,
    /// 1-based source line of the current token.
    line: u32,
    capacity: usize,
}

impl<'i> Parser<'i> {
    pub fn new(tokens: Vec<Token>, interner: &'i mut Interner) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            interner,
            line: 1,
            capacity: DEFAULT_LINE_CAPACITY,
        }
    }

    /// Override the program line capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn parse(mut self) -> Result<Program, ParseError> {
        let mut program = Program::with_capacity(self.capacity);
        loop {
            let line = self.line;
            match self.parse_line()? {
                Step::Line(parsed) => program.push(parsed, line),
                Step::Skip => {}
                Step::Done => break,
            }
        }
        tracing::debug!(lines = program.len(), "parsed program");
        Ok(program)
    }

    fn parse_line(&mut self) -> Result<Step, ParseError> {
        let Some(token) = self.stream.peek() else {
            return Ok(Step::Done);
        };

        match token {
            Token::Separator(Separator::EndOfLine) => {
                self.stream.consume();
                self.line += 1;
                Ok(Step::Skip)
            }
            Token::EndOfFile => {
                self.stream.consume();
                Ok(Step::Done)
            }
            Token::Register(reg) => {
                self.stream.consume();
                tracing::warn!(line = self.line, "stray register {reg} ignored");
                Ok(Step::Skip)
            }
            Token::Directive(directive) => {
                self.stream.consume();
                self.parse_directive(directive).map(Step::Line)
            }
            Token::Identifier(sym) => {
                let text = self.interner.resolve(sym);

                if let Some(name) = text.strip_suffix(':') {
                    let name = name.to_owned();
                    self.stream.consume();
                    let label = self.interner.intern(&name);
                    return Ok(Step::Line(Line::LabelDefinition(label)));
                }

                match Opcode::from_mnemonic(text) {
                    Some(opcode) => {
                        self.stream.consume();
                        self.parse_instruction(opcode).map(Step::Line)
                    }
                    None => Err(ParseError::UnknownMnemonic {
                        line: self.line,
                        name: text.to_owned(),
                    }),
                }
            }
            Token::Literal(_) | Token::Separator(Separator::Comma) => {
                Err(ParseError::UnexpectedToken {
                    line: self.line,
                    found: token.describe(self.interner),
                })
            }
        }
    }

    fn parse_instruction(&mut self, opcode: Opcode) -> Result<Line, ParseError> {
        let info = opcode.info();
        let mut operands = [Operand::None; 2];

        for (slot, expected) in info.operands.iter().enumerate() {
            self.stream.eat_comma();
            let operand = self.parse_operand(info.mnemonic)?;
            if !expected.accepts(operand.kind()) {
                return Err(ParseError::OperandKindMismatch {
                    line: self.line,
                    opcode,
                    operand: slot + 1,
                    expected: *expected,
                    found: operand.kind(),
                });
            }
            operands[slot] = operand;
        }

        Ok(Line::Instruction(Instruction { opcode, operands }))
    }

    /// Directives take up to two optional operands.
    fn parse_directive(&mut self, directive: Directive) -> Result<Line, ParseError> {
        let mut operands = [Operand::None; 2];

        if self.at_operand() {
            operands[0] = self.parse_operand(directive.name())?;
            if self.stream.eat_comma() || self.at_operand() {
                operands[1] = self.parse_operand(directive.name())?;
            }
        }

        Ok(Line::Directive(ParsedDirective {
            directive,
            operands,
        }))
    }

    fn at_operand(&self) -> bool {
        matches!(
            self.stream.peek(),
            Some(Token::Register(_) | Token::Identifier(_) | Token::Literal(_))
        )
    }

    /// Register, identifier (symbol reference) or literal.
    fn parse_operand(&mut self, context: &str) -> Result<Operand, ParseError> {
        let operand = match self.stream.peek() {
            Some(Token::Register(reg)) => Operand::Register(reg),
            Some(Token::Identifier(sym)) => Operand::Symbol(sym),
            Some(Token::Literal(Literal::Integer(v))) => Operand::ImmediateInt(v),
            Some(Token::Literal(Literal::Char(c))) => Operand::ImmediateChar(c),
            Some(Token::Literal(Literal::String(s))) => Operand::ImmediateString(s),
            other => {
                let found = match other {
                    Some(token) => token.describe(self.interner),
                    None => "end of input".to_owned(),
                };
                return Err(ParseError::ExpectedOperand {
                    line: self.line,
                    context: context.to_owned(),
                    found,
                });
            }
        };
        self.stream.consume();
        Ok(operand)
    }
}
