//! Expression parsing.
//!
//! ```text
//! expression := binary [ "?" expression ":" expression ]
//! binary     := unary { binop binary }        (precedence climb)
//! unary      := ("!" | "-" | "+" | "~" | "...") unary | postfix
//! postfix    := primary { call | "." name | "?." name | "[" expression "]" }
//! ```

mod collections;
mod operators;
mod patterns;
mod postfix;
mod primary;

use rill_ir::{Expr, ExprKind, TokenKind};
use rill_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let cond = self.parse_binary(0)?;
            if !self.cursor.check(&TokenKind::Question) {
                return Ok(cond);
            }
            self.cursor.advance();
            self.cursor.skip_newlines();
            let then_expr = self.parse_expression()?;
            self.cursor.skip_newlines();
            self.cursor.expect(&TokenKind::Colon)?;
            self.cursor.skip_newlines();
            let else_expr = self.parse_expression()?;
            let pos = cond.pos;
            Ok(Expr::new(
                ExprKind::Ternary {
                    cond: Box::new(cond),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                },
                pos,
            ))
        })
    }

    /// Left-associative precedence climb: only operators binding tighter
    /// than `min_power` are folded in at this level.
    fn parse_binary(&mut self, min_power: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.match_binary_op() {
            let power = op.binding_power();
            if power <= min_power {
                break;
            }
            self.cursor.advance();
            self.cursor.skip_newlines();
            let right = ensure_sufficient_stack(|| self.parse_binary(power))?;
            let pos = left.pos;
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                pos,
            );
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let pos = self.cursor.current().pos;
        if self.cursor.eat(&TokenKind::Ellipsis) {
            let inner = ensure_sufficient_stack(|| self.parse_unary())?;
            return Ok(Expr::new(ExprKind::Spread(Box::new(inner)), pos));
        }
        if let Some(op) = self.match_unary_op() {
            self.cursor.advance();
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                pos,
            ));
        }
        self.parse_postfix()
    }
}
