//! Lexer for assembly source.
//!
//! Logos splits the text into raw lexemes (words, quoted strings, quoted
//! chars, commas, newlines); `classify` then decides what each word is.
//! Comments run from `;` or `#` to the end of the line.
//!
//! ## Error handling
//!
//! A lexeme that matches no classification rule is a hard `LexError`.
//! Per-line anomalies (too many lexemes, integer overflow) are logged and
//! clamped instead.

use bitlang_core::{Directive, Interner, Register};
use logos::Logos;

use super::error::LexError;
use super::token::{Literal, Separator, Token};

/// Lexemes past this count on one line are dropped.
pub const MAX_LEXEMES_PER_LINE: usize = 32;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    #[regex(r"[;#][^\n]*", allow_greedy = true)]
    Comment,

    #[token("\n")]
    Newline,

    #[token(",")]
    Comma,

    #[regex(r#""[^"\n]*""#)]
    Quoted,

    #[regex(r"'[^\n]'")]
    CharQuoted,

    #[regex(r#"[^ \t\r\f\n,;#"']+"#, allow_greedy = true)]
    Word,
}

/// Tokenize a whole source file. The result always ends with `EndOfFile`.
pub fn lex(source: &str, interner: &mut Interner) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(source);
    let mut line = 1u32;
    let mut on_line = 0usize;
    let mut truncated = false;

    while let Some(next) = lexer.next() {
        let text = lexer.slice();
        let lexeme = match next {
            Ok(lexeme) => lexeme,
            Err(()) => {
                return Err(LexError::Unexpected {
                    line,
                    text: text.to_owned(),
                });
            }
        };

        match lexeme {
            Lexeme::Whitespace | Lexeme::Comment => continue,
            Lexeme::Newline => {
                tokens.push(Token::Separator(Separator::EndOfLine));
                line += 1;
                on_line = 0;
                truncated = false;
                continue;
            }
            Lexeme::Comma | Lexeme::Quoted | Lexeme::CharQuoted | Lexeme::Word => {}
        }

        if on_line == MAX_LEXEMES_PER_LINE {
            if !truncated {
                tracing::error!(
                    line,
                    "more than {} lexemes, truncating line",
                    MAX_LEXEMES_PER_LINE
                );
                truncated = true;
            }
            continue;
        }
        on_line += 1;

        let token = classify(text, line, interner).ok_or_else(|| LexError::Malformed {
            line,
            text: text.to_owned(),
        })?;
        tokens.push(token);
    }

    tokens.push(Token::EndOfFile);
    tracing::trace!(count = tokens.len(), lines = line, "lexed source");
    Ok(tokens)
}

/// Classify one lexeme. `line` is only used for diagnostics.
pub fn classify(lexeme: &str, line: u32, interner: &mut Interner) -> Option<Token> {
    match lexeme {
        "," => return Some(Token::Separator(Separator::Comma)),
        "\n" => return Some(Token::Separator(Separator::EndOfLine)),
        _ => {}
    }

    if let Some(reg) = Register::from_name(lexeme) {
        return Some(Token::Register(reg));
    }

    let bytes = lexeme.as_bytes();
    let first = *bytes.first()?;
    let second = bytes.get(1).copied();

    match first {
        b'.' if lexeme.len() > 3 => Some(Token::Directive(Directive::from_name(lexeme))),
        b'.' => None,
        b'0'..=b'9' => parse_integer(lexeme, line).map(|v| Token::Literal(Literal::Integer(v))),
        b'-' if second.is_some_and(|c| c.is_ascii_digit()) => {
            parse_integer(lexeme, line).map(|v| Token::Literal(Literal::Integer(v)))
        }
        b'\'' if bytes.len() == 3 && bytes[2] == b'\'' => {
            Some(Token::Literal(Literal::Char(bytes[1])))
        }
        b'"' if bytes.len() >= 2 && bytes[bytes.len() - 1] == b'"' => {
            let inner = &lexeme[1..lexeme.len() - 1];
            Some(Token::Literal(Literal::String(interner.intern(inner))))
        }
        c if is_identifier(c, lexeme) => Some(Token::Identifier(interner.intern(lexeme))),
        _ => None,
    }
}

/// Letter or underscore, second character not a digit, then word characters
/// with an optional trailing `:`.
fn is_identifier(first: u8, lexeme: &str) -> bool {
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return false;
    }

    let body = lexeme.strip_suffix(':').unwrap_or(lexeme);
    let mut rest = body.bytes().skip(1).peekable();
    if rest.peek().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }
    rest.all(|c| c.is_ascii_alphanumeric() || c == b'_')
}

/// Decimal or `0x` hex, optionally negative. Negative values are stored as
/// their 32-bit two's-complement pattern. Out-of-range values are clamped.
fn parse_integer(lexeme: &str, line: u32) -> Option<u32> {
    let (negative, unsigned) = match lexeme.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lexeme),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    // Digits are validated, so the only possible failure is overflow.
    let magnitude = u64::from_str_radix(digits, radix).unwrap_or(u64::MAX);

    if negative {
        let min = i32::MIN.unsigned_abs() as u64;
        if magnitude > min {
            tracing::error!(line, literal = lexeme, "integer literal below {}, clamped", i32::MIN);
            return Some(i32::MIN as u32);
        }
        return Some((magnitude as i64).wrapping_neg() as i32 as u32);
    }

    match u32::try_from(magnitude) {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::error!(line, literal = lexeme, "integer literal above {}, clamped", u32::MAX);
            Some(u32::MAX)
        }
    }
}
