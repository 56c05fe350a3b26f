//! Blueprint declarations: `class Name [extends Parent] { members }`.
//!
//! Members are fields (`let x`, `let y = 0`) and methods, written either with
//! a keyword (`func m() {}`, `method m() {}`) or bare (`m() {}`).

use std::rc::Rc;

use rill_ir::{ClassDecl, FieldDecl, TokenKind};

use crate::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_class(&mut self) -> Result<Rc<ClassDecl>, ParseError> {
        let class_token = self.cursor.advance();
        let name = self.expect_ident()?;
        let parent = if self.cursor.eat(&TokenKind::Extends) {
            Some(self.expect_ident()?)
        } else {
            None
        };

        self.cursor.skip_newlines();
        self.cursor.expect(&TokenKind::LBrace)?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        loop {
            self.cursor.skip_separators();
            let token = self.cursor.current().clone();
            match token.kind {
                TokenKind::RBrace => {
                    self.cursor.advance();
                    break;
                }
                TokenKind::Let | TokenKind::Const => {
                    self.cursor.advance();
                    loop {
                        let field = self.expect_ident()?;
                        let default = if self.cursor.eat(&TokenKind::Assign) {
                            self.cursor.skip_newlines();
                            Some(self.parse_expression()?)
                        } else {
                            None
                        };
                        fields.push(FieldDecl {
                            name: field,
                            default,
                        });
                        if !self.cursor.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                TokenKind::Func => {
                    self.cursor.advance();
                    let method = self.expect_ident()?;
                    methods.push(self.parse_function_rest(Some(method), token.pos)?);
                }
                TokenKind::Ident
                    if token.text == "method" && self.cursor.peek().kind == TokenKind::Ident =>
                {
                    self.cursor.advance();
                    let method = self.expect_ident()?;
                    methods.push(self.parse_function_rest(Some(method), token.pos)?);
                }
                TokenKind::Ident if self.cursor.peek().kind == TokenKind::LParen => {
                    let method = self.expect_ident()?;
                    methods.push(self.parse_function_rest(Some(method), token.pos)?);
                }
                _ => {
                    return Err(ParseError::expected(
                        "field or method declaration",
                        &token,
                    ))
                }
            }
        }

        tracing::trace!(class = %name, fields = fields.len(), methods = methods.len(), "parsed class");
        Ok(Rc::new(ClassDecl {
            name,
            parent,
            fields,
            methods,
            pos: class_token.pos,
        }))
    }
}
