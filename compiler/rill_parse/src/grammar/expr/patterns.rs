//! `match` expressions and their patterns.

use rill_ir::{Expr, ExprKind, Literal, MatchArm, Pattern, TokenKind};

use crate::{ParseError, Parser};

impl Parser {
    /// `match value { case pattern [if guard] => expr ... }`
    pub(crate) fn parse_match(&mut self) -> Result<Expr, ParseError> {
        let pos = self.cursor.advance().pos;
        let scrutinee = self.parse_expression()?;
        self.cursor.skip_newlines();
        self.cursor.expect(&TokenKind::LBrace)?;

        let mut arms = Vec::new();
        loop {
            while matches!(
                self.cursor.current().kind,
                TokenKind::Newline | TokenKind::Comma | TokenKind::Semicolon
            ) {
                self.cursor.advance();
            }
            if self.cursor.eat(&TokenKind::RBrace) {
                break;
            }
            self.cursor.expect(&TokenKind::Case)?;
            let pattern = self.parse_pattern()?;
            let guard = if self.cursor.eat(&TokenKind::If) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            self.cursor.expect(&TokenKind::FatArrow)?;
            self.cursor.skip_newlines();
            let body = self.parse_expression()?;
            arms.push(MatchArm {
                pattern,
                guard,
                body,
            });
        }

        Ok(Expr::new(
            ExprKind::Match {
                scrutinee: Box::new(scrutinee),
                arms,
            },
            pos,
        ))
    }

    fn parse_pattern(&mut self) -> Result<Pattern, ParseError> {
        let token = self.cursor.current().clone();
        let pattern = match token.kind {
            TokenKind::Ident if token.text == "_" => {
                self.cursor.advance();
                Pattern::Wildcard
            }
            TokenKind::Ident => {
                self.cursor.advance();
                Pattern::Binding(token.text)
            }
            TokenKind::Number => {
                self.cursor.advance();
                Pattern::Literal(Literal::Number(self.number_value(&token.text, token.pos)?))
            }
            TokenKind::Minus if self.cursor.peek().kind == TokenKind::Number => {
                self.cursor.advance();
                let number = self.cursor.advance();
                let value = self.number_value(&number.text, number.pos)?;
                Pattern::Literal(Literal::Number(-value))
            }
            TokenKind::Str => {
                self.cursor.advance();
                Pattern::Literal(Literal::Str(token.text))
            }
            TokenKind::True | TokenKind::False => {
                self.cursor.advance();
                Pattern::Literal(Literal::Bool(token.kind == TokenKind::True))
            }
            TokenKind::Nil => {
                self.cursor.advance();
                Pattern::Literal(Literal::Nil)
            }
            TokenKind::LBracket => self.parse_array_pattern()?,
            TokenKind::LBrace => self.parse_record_pattern()?,
            _ => return Err(ParseError::expected("pattern", &token)),
        };
        Ok(pattern)
    }

    fn parse_array_pattern(&mut self) -> Result<Pattern, ParseError> {
        self.cursor.advance();
        let mut elements = Vec::new();
        let mut rest = None;
        loop {
            self.cursor.skip_newlines();
            if self.cursor.eat(&TokenKind::RBracket) {
                break;
            }
            if self.cursor.eat(&TokenKind::Ellipsis) {
                rest = Some(self.expect_ident()?);
                self.cursor.skip_newlines();
                self.cursor.expect(&TokenKind::RBracket)?;
                break;
            }
            elements.push(self.parse_pattern()?);
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                self.cursor.skip_newlines();
                self.cursor.expect(&TokenKind::RBracket)?;
                break;
            }
        }
        Ok(Pattern::Array { elements, rest })
    }

    fn parse_record_pattern(&mut self) -> Result<Pattern, ParseError> {
        self.cursor.advance();
        let mut fields = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.eat(&TokenKind::RBrace) {
                break;
            }
            let key = if self.cursor.check(&TokenKind::Str) {
                self.cursor.advance().text
            } else {
                self.expect_member_name()?
            };
            let pattern = if self.cursor.eat(&TokenKind::Colon) {
                self.parse_pattern()?
            } else {
                Pattern::Binding(key.clone())
            };
            fields.push((key, pattern));
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                self.cursor.skip_newlines();
                self.cursor.expect(&TokenKind::RBrace)?;
                break;
            }
        }
        Ok(Pattern::Record(fields))
    }

    fn number_value(&self, text: &str, pos: rill_ir::Position) -> Result<f64, ParseError> {
        text.parse::<f64>()
            .map_err(|_| ParseError::invalid(pos, format!("malformed number `{text}`")))
    }
}
