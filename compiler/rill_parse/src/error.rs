//! Parse errors.
//!
//! Parsing stops at the first error. There is no recovery and no partial
//! tree, so one error value is all a caller ever sees.

use rill_ir::{Position, Token};
use rill_lexer::LexError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("{pos}: expected {expected}, found {found}")]
    Expected {
        pos: Position,
        expected: String,
        found: String,
    },

    #[error("{pos}: {message}")]
    Invalid { pos: Position, message: String },
}

impl ParseError {
    /// An `expected X, found Y` error at `found`.
    pub fn expected(expected: impl Into<String>, found: &Token) -> Self {
        ParseError::Expected {
            pos: found.pos,
            expected: expected.into(),
            found: describe(found),
        }
    }

    pub fn invalid(pos: Position, message: impl Into<String>) -> Self {
        ParseError::Invalid {
            pos,
            message: message.into(),
        }
    }

    pub fn pos(&self) -> Position {
        match self {
            ParseError::Lex(err) => err.pos(),
            ParseError::Expected { pos, .. } | ParseError::Invalid { pos, .. } => *pos,
        }
    }

    /// The message without its position prefix.
    pub fn message(&self) -> String {
        match self {
            ParseError::Lex(err) => {
                let full = err.to_string();
                let prefix = format!("{}: ", err.pos());
                full.strip_prefix(&prefix).unwrap_or(&full).to_string()
            }
            ParseError::Expected {
                expected, found, ..
            } => format!("expected {expected}, found {found}"),
            ParseError::Invalid { message, .. } => message.clone(),
        }
    }
}

fn describe(token: &Token) -> String {
    use rill_ir::TokenKind;
    match token.kind {
        TokenKind::Ident | TokenKind::Number => format!("`{}`", token.text),
        TokenKind::Str => format!("string {:?}", token.text),
        TokenKind::Newline | TokenKind::Eof => token.kind.display_name().to_string(),
        _ => format!("`{}`", token.kind.display_name()),
    }
}
