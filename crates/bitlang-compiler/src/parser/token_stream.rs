//! Single-direction cursor over lexed tokens.

use super::token::{Separator, Token};

#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    #[inline]
    pub fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    pub fn consume(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    /// Consume a comma if it is next.
    pub fn eat_comma(&mut self) -> bool {
        if self.peek() == Some(Token::Separator(Separator::Comma)) {
            self.pos += 1;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}
