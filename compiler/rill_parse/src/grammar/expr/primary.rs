//! Primary expressions: literals, names, grouping, function literals and
//! arrow functions, templates, `super`.

use std::rc::Rc;

use rill_ir::{
    Expr, ExprKind, FunctionBody, FunctionDef, Literal, Param, Position, TemplatePart,
    TemplatePiece, TokenKind,
};
use tracing::trace;

use crate::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current().clone();
        let pos = token.pos;
        let kind = match token.kind {
            TokenKind::Number => {
                self.cursor.advance();
                let value = token.text.parse::<f64>().map_err(|_| {
                    ParseError::invalid(pos, format!("malformed number `{}`", token.text))
                })?;
                ExprKind::Literal(Literal::Number(value))
            }
            TokenKind::Str => {
                self.cursor.advance();
                ExprKind::Literal(Literal::Str(token.text))
            }
            TokenKind::Template(pieces) => {
                self.cursor.advance();
                ExprKind::Template(self.parse_template(pieces)?)
            }
            TokenKind::True | TokenKind::False => {
                self.cursor.advance();
                ExprKind::Literal(Literal::Bool(token.kind == TokenKind::True))
            }
            TokenKind::Nil => {
                self.cursor.advance();
                ExprKind::Literal(Literal::Nil)
            }
            TokenKind::Ident if self.cursor.peek().kind == TokenKind::FatArrow => {
                self.cursor.advance();
                self.cursor.advance();
                let param = Param {
                    name: token.text,
                    default: None,
                };
                ExprKind::Function(self.parse_arrow_body(vec![param], pos)?)
            }
            TokenKind::Ident => {
                self.cursor.advance();
                ExprKind::Ident(token.text)
            }
            TokenKind::LParen if self.at_arrow_params() => {
                let params = self.parse_params()?;
                self.cursor.expect(&TokenKind::FatArrow)?;
                ExprKind::Function(self.parse_arrow_body(params, pos)?)
            }
            TokenKind::LParen => {
                self.cursor.advance();
                self.cursor.skip_newlines();
                let inner = self.parse_expression()?;
                self.cursor.skip_newlines();
                self.cursor.expect(&TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::LBracket => return self.parse_array(),
            TokenKind::LBrace => return self.parse_record(),
            TokenKind::Func => {
                self.cursor.advance();
                let name = if self.cursor.check(&TokenKind::Ident) {
                    Some(self.expect_ident()?)
                } else {
                    None
                };
                ExprKind::Function(self.parse_function_rest(name, pos)?)
            }
            TokenKind::Match => return self.parse_match(),
            TokenKind::Super => {
                self.cursor.advance();
                let member = if self.cursor.eat(&TokenKind::Dot) {
                    Some(self.expect_member_name()?)
                } else {
                    None
                };
                ExprKind::Super { member }
            }
            _ => return Err(ParseError::expected("expression", &token)),
        };
        Ok(Expr::new(kind, pos))
    }

    /// Whether the `(` at the cursor opens an arrow function's parameter
    /// list, i.e. its matching `)` is directly followed by `=>`.
    fn at_arrow_params(&self) -> bool {
        self.cursor
            .matching_close(0)
            .is_some_and(|close| self.cursor.nth(close + 1).kind == TokenKind::FatArrow)
    }

    /// Body after `=>`: a block, or a single expression.
    fn parse_arrow_body(
        &mut self,
        params: Vec<Param>,
        pos: Position,
    ) -> Result<Rc<FunctionDef>, ParseError> {
        self.cursor.skip_newlines();
        let body = if self.cursor.check(&TokenKind::LBrace) {
            FunctionBody::Block(self.parse_block()?)
        } else {
            FunctionBody::Expr(Box::new(self.parse_expression()?))
        };
        Ok(Rc::new(FunctionDef {
            name: None,
            params,
            body,
            pos,
        }))
    }

    /// Parse each `${...}` hole of a template as a standalone expression,
    /// with positions pointing into the enclosing source.
    fn parse_template(&mut self, pieces: Vec<TemplatePiece>) -> Result<Vec<TemplatePart>, ParseError> {
        let mut parts = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match piece {
                TemplatePiece::Text(text) => parts.push(TemplatePart::Text(text)),
                TemplatePiece::Hole { source, pos } => {
                    trace!(%pos, "parsing template hole");
                    let tokens = rill_lexer::tokenize_at(&source, pos)?;
                    let mut hole = Parser::new(tokens);
                    hole.cursor.skip_newlines();
                    if hole.cursor.at_end() {
                        return Err(ParseError::invalid(pos, "empty `${}` in template string"));
                    }
                    let expr = hole.parse_expression()?;
                    hole.cursor.skip_newlines();
                    if !hole.cursor.at_end() {
                        return Err(ParseError::expected("`}`", hole.cursor.current()));
                    }
                    parts.push(TemplatePart::Expr(expr));
                }
            }
        }
        Ok(parts)
    }
}
