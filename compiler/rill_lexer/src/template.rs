//! Backtick template strings.
//!
//! A template lexes to a single token whose kind carries the literal text
//! pieces and the raw source of every `${...}` hole. Holes are re-lexed and
//! parsed later by the parser. Inside a hole, braces are counted and quoted
//! strings or nested templates are skipped as units so a `}` inside them does
//! not close the hole.

use rill_ir::{Position, TemplatePiece, Token, TokenKind};

use crate::{LexError, Lexer};

impl Lexer<'_> {
    pub(crate) fn lex_template(&mut self, start: Position) -> Result<Token, LexError> {
        let begin = self.cursor.offset();
        self.cursor.bump();
        let mut pieces = Vec::new();
        let mut text = String::new();

        loop {
            match (self.cursor.peek(), self.cursor.peek_nth(1)) {
                (None, _) => return Err(LexError::UnterminatedTemplate { pos: start }),
                (Some('`'), _) => {
                    self.cursor.bump();
                    break;
                }
                (Some('\\'), _) => text.push(self.read_escape()?),
                (Some('$'), Some('{')) => {
                    self.cursor.bump();
                    self.cursor.bump();
                    let pos = self.cursor.pos();
                    let hole_begin = self.cursor.offset();
                    self.scan_hole(start)?;
                    // scan_hole leaves the cursor just past the closing brace.
                    let source = self.cursor.slice_from(hole_begin);
                    let source = source[..source.len() - 1].to_string();
                    if !text.is_empty() {
                        pieces.push(TemplatePiece::Text(std::mem::take(&mut text)));
                    }
                    pieces.push(TemplatePiece::Hole { source, pos });
                }
                (Some(c), _) => {
                    self.cursor.bump();
                    text.push(c);
                }
            }
        }

        if !text.is_empty() {
            pieces.push(TemplatePiece::Text(text));
        }
        let raw = self.cursor.slice_from(begin);
        Ok(Token::new(TokenKind::Template(pieces), raw, start))
    }

    /// Consume through the `}` that closes the hole the cursor is inside.
    fn scan_hole(&mut self, template_start: Position) -> Result<(), LexError> {
        let mut depth = 1usize;
        loop {
            let Some(c) = self.cursor.peek() else {
                return Err(LexError::UnterminatedTemplate {
                    pos: template_start,
                });
            };
            match c {
                '{' => {
                    depth += 1;
                    self.cursor.bump();
                }
                '}' => {
                    depth -= 1;
                    self.cursor.bump();
                    if depth == 0 {
                        return Ok(());
                    }
                }
                '"' | '\'' => self.skip_quoted(c)?,
                '`' => self.skip_nested_template()?,
                _ => {
                    self.cursor.bump();
                }
            }
        }
    }

    fn skip_quoted(&mut self, quote: char) -> Result<(), LexError> {
        let pos = self.cursor.pos();
        self.cursor.bump();
        loop {
            match self.cursor.bump() {
                None => return Err(LexError::UnterminatedString { pos }),
                Some('\\') => {
                    self.cursor.bump();
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn skip_nested_template(&mut self) -> Result<(), LexError> {
        let pos = self.cursor.pos();
        self.cursor.bump();
        loop {
            match (self.cursor.peek(), self.cursor.peek_nth(1)) {
                (None, _) => return Err(LexError::UnterminatedTemplate { pos }),
                (Some('`'), _) => {
                    self.cursor.bump();
                    return Ok(());
                }
                (Some('\\'), _) => {
                    self.cursor.bump();
                    self.cursor.bump();
                }
                (Some('$'), Some('{')) => {
                    self.cursor.bump();
                    self.cursor.bump();
                    self.scan_hole(pos)?;
                }
                (Some(_), _) => {
                    self.cursor.bump();
                }
            }
        }
    }
}
