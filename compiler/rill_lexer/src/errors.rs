//! Lexical errors.

use rill_ir::Position;

/// A malformed token. Lexing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("{pos}: unterminated string literal")]
    UnterminatedString { pos: Position },

    #[error("{pos}: unterminated template string")]
    UnterminatedTemplate { pos: Position },

    #[error("{pos}: unterminated block comment")]
    UnterminatedComment { pos: Position },

    #[error("{pos}: invalid escape sequence `\\{escape}`")]
    InvalidEscape { pos: Position, escape: String },

    #[error("{pos}: malformed number `{text}`")]
    InvalidNumber { pos: Position, text: String },

    #[error("{pos}: unexpected character `{ch}`")]
    UnexpectedChar { pos: Position, ch: char },
}

impl LexError {
    /// Where the offending token starts.
    pub fn pos(&self) -> Position {
        match self {
            LexError::UnterminatedString { pos }
            | LexError::UnterminatedTemplate { pos }
            | LexError::UnterminatedComment { pos }
            | LexError::InvalidEscape { pos, .. }
            | LexError::InvalidNumber { pos, .. }
            | LexError::UnexpectedChar { pos, .. } => *pos,
        }
    }
}
