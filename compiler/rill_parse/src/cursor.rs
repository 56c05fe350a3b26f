//! Token cursor with current/peek lookahead.
//!
//! The token vector always ends with `Eof`; reading past it keeps returning
//! that final token, so lookahead never goes out of bounds.

use rill_ir::{Token, TokenKind};

use crate::ParseError;

pub(crate) struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub(crate) fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let pos = tokens.last().map(|t| t.pos).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "", pos));
        }
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub(crate) fn current(&self) -> &Token {
        self.nth(0)
    }

    #[inline]
    pub(crate) fn peek(&self) -> &Token {
        self.nth(1)
    }

    /// Token `n` places ahead of the current one.
    pub(crate) fn nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    #[inline]
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.check(&TokenKind::Eof)
    }

    /// Consume the current token and return it.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(
                format!("`{}`", kind.display_name()),
                self.current(),
            ))
        }
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    /// Skip newlines and semicolons between statements.
    pub(crate) fn skip_separators(&mut self) {
        while matches!(
            self.current().kind,
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.advance();
        }
    }

    /// The first token at or after the current one that is not a newline.
    pub(crate) fn peek_past_newlines(&self) -> &Token {
        let mut n = 0;
        while self.nth(n).kind == TokenKind::Newline {
            n += 1;
        }
        self.nth(n)
    }

    /// Offset (from the current token) of the bracket closing the one at
    /// `open_offset`, counting all three bracket kinds.
    pub(crate) fn matching_close(&self, open_offset: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut n = open_offset;
        loop {
            match self.nth(n).kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(n);
                    }
                }
                TokenKind::Eof => return None,
                _ => {}
            }
            n += 1;
        }
    }
}
