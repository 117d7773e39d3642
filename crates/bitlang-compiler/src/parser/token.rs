//! Tokens produced by the lexer.

use bitlang_core::{Directive, Interner, Register, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Integer(u32),
    Char(u8),
    /// Text between the quotes, verbatim.
    String(Symbol),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Comma,
    EndOfLine,
}

/// Opcodes and labels are both `Identifier`s; the parser tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Identifier(Symbol),
    Register(Register),
    Literal(Literal),
    Directive(Directive),
    Separator(Separator),
    EndOfFile,
}

impl Token {
    /// Short human description for diagnostics.
    pub fn describe(&self, interner: &Interner) -> String {
        match *self {
            Token::Identifier(sym) => format!("identifier `{}`", interner.resolve(sym)),
            Token::Register(reg) => format!("register {reg}"),
            Token::Literal(Literal::Integer(v)) => format!("integer {v}"),
            Token::Literal(Literal::Char(c)) => format!("char '{}'", c as char),
            Token::Literal(Literal::String(sym)) => format!("string \"{}\"", interner.resolve(sym)),
            Token::Directive(d) => format!("directive {d}"),
            Token::Separator(Separator::Comma) => "`,`".to_owned(),
            Token::Separator(Separator::EndOfLine) => "end of line".to_owned(),
            Token::EndOfFile => "end of file".to_owned(),
        }
    }
}
