//! Grammar productions, split by syntactic category.

mod class;
mod expr;
mod stmt;

use std::rc::Rc;

use rill_ir::{Block, FunctionBody, FunctionDef, Param, Position, TokenKind};

use crate::{ParseError, Parser};

impl Parser {
    pub(crate) fn expect_ident(&mut self) -> Result<String, ParseError> {
        if self.cursor.check(&TokenKind::Ident) {
            Ok(self.cursor.advance().text)
        } else {
            Err(ParseError::expected("identifier", self.cursor.current()))
        }
    }

    /// A name after `.`: identifiers and keywords alike, so `obj.class` or
    /// `rec.in` read a key rather than failing.
    pub(crate) fn expect_member_name(&mut self) -> Result<String, ParseError> {
        let token = self.cursor.current();
        let wordlike = !matches!(token.kind, TokenKind::Str | TokenKind::Template(_))
            && token
                .text
                .chars()
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
        if wordlike {
            Ok(self.cursor.advance().text)
        } else {
            Err(ParseError::expected("property name", token))
        }
    }

    /// `{ stmt* }`, allowing the opening brace on a following line.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.cursor.skip_newlines();
        let open = self.cursor.expect(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        loop {
            self.cursor.skip_separators();
            if self.cursor.check(&TokenKind::RBrace) {
                self.cursor.advance();
                break;
            }
            if self.cursor.at_end() {
                return Err(ParseError::expected("`}`", self.cursor.current()));
            }
            stmts.push(self.parse_statement()?);
        }
        Ok(Block {
            stmts,
            pos: open.pos,
        })
    }

    /// `( name [= default], ... )`
    pub(crate) fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.eat(&TokenKind::RParen) {
                break;
            }
            let name = self.expect_ident()?;
            let default = if self.cursor.eat(&TokenKind::Assign) {
                self.cursor.skip_newlines();
                Some(self.parse_expression()?)
            } else {
                None
            };
            params.push(Param { name, default });
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                self.cursor.skip_newlines();
                self.cursor.expect(&TokenKind::RParen)?;
                break;
            }
        }
        Ok(params)
    }

    /// Parameters and block body of a `func`, method, or named declaration.
    pub(crate) fn parse_function_rest(
        &mut self,
        name: Option<String>,
        pos: Position,
    ) -> Result<Rc<FunctionDef>, ParseError> {
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(Rc::new(FunctionDef {
            name,
            params,
            body: FunctionBody::Block(body),
            pos,
        }))
    }
}
