use bitlang_core::{Opcode, OperandKind};

/// Input the lexer cannot turn into a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("line {line}: malformed lexeme `{text}`")]
    Malformed { line: u32, text: String },

    /// Characters the scanner cannot split, e.g. an unterminated string.
    #[error("line {line}: unexpected input `{text}`")]
    Unexpected { line: u32, text: String },
}

impl LexError {
    pub fn line(&self) -> u32 {
        match self {
            LexError::Malformed { line, .. } | LexError::Unexpected { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: unknown mnemonic `{name}`")]
    UnknownMnemonic { line: u32, name: String },

    #[error("line {line}: unexpected {found}")]
    UnexpectedToken { line: u32, found: String },

    #[error("line {line}: `{context}` expects an operand, found {found}")]
    ExpectedOperand {
        line: u32,
        context: String,
        found: String,
    },

    /// `operand` is 1-based.
    #[error("line {line}: operand {operand} of `{opcode}` must be {expected}, found {found}")]
    OperandKindMismatch {
        line: u32,
        opcode: Opcode,
        operand: usize,
        expected: OperandKind,
        found: OperandKind,
    },
}

impl ParseError {
    pub fn line(&self) -> u32 {
        match self {
            ParseError::UnknownMnemonic { line, .. }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::ExpectedOperand { line, .. }
            | ParseError::OperandKindMismatch { line, .. } => *line,
        }
    }
}
