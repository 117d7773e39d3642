//! Assembly source parsing.
//!
//! `lex` turns text into a flat `Token` vector, `TokenStream` walks it, and
//! `Parser` builds a `Program` of one `Line` per logical source line.

mod ast;
mod error;
mod grammar;
mod lexer;
mod token;
mod token_stream;

pub use ast::{Instruction, Line, Operand, ParsedDirective, Program};
pub use error::{LexError, ParseError};
pub use grammar::{DEFAULT_LINE_CAPACITY, Parser, parse};
pub use lexer::{MAX_LEXEMES_PER_LINE, classify, lex};
pub use token::{Literal, Separator, Token};
pub use token_stream::TokenStream;
