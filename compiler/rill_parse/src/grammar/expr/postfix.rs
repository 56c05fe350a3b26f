//! Call, member and index chains.

use rill_ir::{Expr, ExprKind, TokenKind};

use crate::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            let pos = self.cursor.current().pos;
            match self.cursor.current().kind {
                TokenKind::LParen => {
                    let args = self.parse_call_args()?;
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        pos,
                    );
                }
                TokenKind::Dot | TokenKind::QuestionDot => {
                    let optional = self.cursor.advance().kind == TokenKind::QuestionDot;
                    let name = self.expect_member_name()?;
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            name,
                            optional,
                        },
                        pos,
                    );
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    self.cursor.skip_newlines();
                    let index = self.parse_expression()?;
                    self.cursor.skip_newlines();
                    self.cursor.expect(&TokenKind::RBracket)?;
                    expr = Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        pos,
                    );
                }
                // A chain may continue on the next line with a leading dot.
                TokenKind::Newline
                    if matches!(
                        self.cursor.peek_past_newlines().kind,
                        TokenKind::Dot | TokenKind::QuestionDot
                    ) =>
                {
                    self.cursor.skip_newlines();
                }
                _ => return Ok(expr),
            }
        }
    }

    /// `( arg, ... )` where an argument may be a spread.
    pub(crate) fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.eat(&TokenKind::RParen) {
                break;
            }
            args.push(self.parse_expression()?);
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                self.cursor.skip_newlines();
                self.cursor.expect(&TokenKind::RParen)?;
                break;
            }
        }
        Ok(args)
    }
}
