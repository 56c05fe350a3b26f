//! Rill parser: tokens to AST.
//!
//! Recursive descent with two-token lookahead. Statements dispatch on their
//! leading keyword; expressions go through one table-driven precedence climb
//! (see [`rill_ir::BinaryOp::binding_power`]) followed by postfix chaining.
//!
//! The first malformed token aborts parsing with a positioned [`ParseError`].
//! There is no recovery.

mod cursor;
mod error;
mod grammar;

use cursor::Cursor;
use rill_ir::{Program, Token};

pub use error::ParseError;

/// Parser over one token stream.
pub struct Parser {
    cursor: Cursor,
    base_dir: String,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            base_dir: ".".to_string(),
        }
    }

    /// Directory recorded on the program for resolving its imports.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Parse statements until end of input.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        loop {
            self.cursor.skip_separators();
            if self.cursor.at_end() {
                break;
            }
            body.push(self.parse_statement()?);
        }
        tracing::debug!(statements = body.len(), base_dir = %self.base_dir, "parsed program");
        Ok(Program {
            body,
            base_dir: self.base_dir,
        })
    }
}

/// Lex and parse `src` with the current directory as base.
pub fn parse(src: &str) -> Result<Program, ParseError> {
    parse_with_base_dir(src, ".")
}

/// Lex and parse `src`, recording `base_dir` for import resolution.
pub fn parse_with_base_dir(src: &str, base_dir: &str) -> Result<Program, ParseError> {
    let tokens = rill_lexer::tokenize(src)?;
    Parser::new(tokens).with_base_dir(base_dir).parse_program()
}

#[cfg(test)]
mod tests;
