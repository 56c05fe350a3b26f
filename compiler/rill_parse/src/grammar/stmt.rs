//! Statement productions.

use rill_ir::{
    AssignOp, CatchClause, Destructure, Expr, ExprKind, LetBinding, Literal, Stmt, StmtKind,
    TokenKind,
};

use crate::{ParseError, Parser};

/// Name bound by `catch` when the clause does not name one.
const DEFAULT_CATCH_BINDING: &str = "$e";

impl Parser {
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.current().pos;
        let kind = match self.cursor.current().kind {
            TokenKind::Let => self.parse_let(false)?,
            TokenKind::Const => self.parse_let(true)?,
            TokenKind::Func if self.cursor.peek().kind == TokenKind::Ident => {
                self.cursor.advance();
                let name = self.expect_ident()?;
                StmtKind::Function(self.parse_function_rest(Some(name), pos)?)
            }
            TokenKind::Class => StmtKind::Class(self.parse_class()?),
            TokenKind::If => self.parse_if()?,
            TokenKind::While => {
                self.cursor.advance();
                let cond = self.parse_expression()?;
                let body = self.parse_block()?;
                StmtKind::While { cond, body }
            }
            TokenKind::For => self.parse_for()?,
            TokenKind::Return => {
                self.cursor.advance();
                if self.cursor.current().kind.is_terminator() {
                    StmtKind::Return(None)
                } else {
                    StmtKind::Return(Some(self.parse_expression()?))
                }
            }
            TokenKind::Break => {
                self.cursor.advance();
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.cursor.advance();
                StmtKind::Continue
            }
            TokenKind::Try => self.parse_try()?,
            TokenKind::Throw => {
                self.cursor.advance();
                StmtKind::Throw(self.parse_expression()?)
            }
            TokenKind::Import => {
                self.cursor.advance();
                let path = self.cursor.expect(&TokenKind::Str)?.text;
                let alias = if self.cursor.eat(&TokenKind::As) {
                    Some(self.expect_ident()?)
                } else {
                    None
                };
                StmtKind::Import { path, alias }
            }
            TokenKind::LBrace => StmtKind::Block(self.parse_block()?),
            _ => return self.parse_simple_statement(),
        };
        Ok(Stmt::new(kind, pos))
    }

    /// A `let`/`const` declaration or an expression with an optional
    /// assignment tail. These are the forms allowed in `for (init; ; post)`.
    fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        let pos = self.cursor.current().pos;
        match self.cursor.current().kind {
            TokenKind::Let => return Ok(Stmt::new(self.parse_let(false)?, pos)),
            TokenKind::Const => return Ok(Stmt::new(self.parse_let(true)?, pos)),
            _ => {}
        }

        let target = self.parse_expression()?;
        let op = match self.cursor.current().kind {
            TokenKind::Assign => AssignOp::Set,
            TokenKind::PlusEq => AssignOp::Add,
            TokenKind::MinusEq => AssignOp::Sub,
            TokenKind::StarEq => AssignOp::Mul,
            TokenKind::SlashEq => AssignOp::Div,
            TokenKind::PercentEq => AssignOp::Mod,
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let token = self.cursor.advance();
                check_assign_target(&target)?;
                let op = if token.kind == TokenKind::PlusPlus {
                    AssignOp::Add
                } else {
                    AssignOp::Sub
                };
                let one = Expr::new(ExprKind::Literal(Literal::Number(1.0)), token.pos);
                return Ok(Stmt::new(
                    StmtKind::Assign {
                        target,
                        op,
                        value: one,
                    },
                    pos,
                ));
            }
            _ => return Ok(Stmt::new(StmtKind::Expr(target), pos)),
        };

        self.cursor.advance();
        check_assign_target(&target)?;
        self.cursor.skip_newlines();
        let value = self.parse_expression()?;
        Ok(Stmt::new(StmtKind::Assign { target, op, value }, pos))
    }

    fn parse_let(&mut self, constant: bool) -> Result<StmtKind, ParseError> {
        self.cursor.advance();

        if matches!(
            self.cursor.current().kind,
            TokenKind::LBracket | TokenKind::LBrace
        ) {
            let pattern = self.parse_destructure()?;
            self.cursor.expect(&TokenKind::Assign)?;
            self.cursor.skip_newlines();
            let value = self.parse_expression()?;
            return Ok(StmtKind::Destructure {
                pattern,
                value,
                constant,
            });
        }

        let mut bindings = Vec::new();
        loop {
            let name_token = self.cursor.current().clone();
            let name = self.expect_ident()?;
            let value = if self.cursor.eat(&TokenKind::Assign) {
                self.cursor.skip_newlines();
                Some(self.parse_expression()?)
            } else {
                None
            };
            if constant && value.is_none() {
                return Err(ParseError::invalid(
                    name_token.pos,
                    format!("constant `{name}` must be initialised"),
                ));
            }
            bindings.push(LetBinding { name, value });
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
            self.cursor.skip_newlines();
        }

        Ok(if constant {
            StmtKind::Const(bindings)
        } else {
            StmtKind::Let(bindings)
        })
    }

    /// `[a, _, b]` or `{x, y}` on the left of a destructuring `let`.
    fn parse_destructure(&mut self) -> Result<Destructure, ParseError> {
        let open = self.cursor.advance();
        let close = if open.kind == TokenKind::LBracket {
            TokenKind::RBracket
        } else {
            TokenKind::RBrace
        };

        let mut names = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.eat(&close) {
                break;
            }
            names.push(self.expect_ident()?);
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                self.cursor.skip_newlines();
                self.cursor.expect(&close)?;
                break;
            }
        }

        Ok(if open.kind == TokenKind::LBracket {
            Destructure::Array(
                names
                    .into_iter()
                    .map(|n| if n == "_" { None } else { Some(n) })
                    .collect(),
            )
        } else {
            Destructure::Record(names)
        })
    }

    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.advance();
        let cond = self.parse_expression()?;
        let then_block = self.parse_block()?;

        let else_branch = if self.cursor.peek_past_newlines().kind == TokenKind::Else {
            self.cursor.skip_newlines();
            let else_token = self.cursor.advance();
            if self.cursor.check(&TokenKind::If) {
                let pos = self.cursor.current().pos;
                Some(Box::new(Stmt::new(self.parse_if()?, pos)))
            } else {
                let block = self.parse_block()?;
                Some(Box::new(Stmt::new(StmtKind::Block(block), else_token.pos)))
            }
        } else {
            None
        };

        Ok(StmtKind::If {
            cond,
            then_block,
            else_branch,
        })
    }

    /// `for (init; cond; post) { }`, `for (x in xs) { }` or `for x in xs { }`.
    fn parse_for(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.advance();
        let parenthesised = self.cursor.eat(&TokenKind::LParen);

        if self.cursor.check(&TokenKind::Ident) && self.cursor.peek().kind == TokenKind::In {
            let binding = self.expect_ident()?;
            self.cursor.advance();
            let iterable = self.parse_expression()?;
            if parenthesised {
                self.cursor.expect(&TokenKind::RParen)?;
            }
            let body = self.parse_block()?;
            return Ok(StmtKind::ForIn {
                binding,
                iterable,
                body,
            });
        }

        let init = if self.cursor.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_simple_statement()?))
        };
        self.cursor.expect(&TokenKind::Semicolon)?;

        let cond = if self.cursor.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.cursor.expect(&TokenKind::Semicolon)?;

        let closer = if parenthesised {
            TokenKind::RParen
        } else {
            TokenKind::LBrace
        };
        let post = if self.cursor.check(&closer) {
            None
        } else {
            Some(Box::new(self.parse_simple_statement()?))
        };
        if parenthesised {
            self.cursor.expect(&TokenKind::RParen)?;
        }

        let body = self.parse_block()?;
        Ok(StmtKind::For {
            init,
            cond,
            post,
            body,
        })
    }

    fn parse_try(&mut self) -> Result<StmtKind, ParseError> {
        let try_token = self.cursor.advance();
        let body = self.parse_block()?;

        let catch = if self.cursor.peek_past_newlines().kind == TokenKind::Catch {
            self.cursor.skip_newlines();
            self.cursor.advance();
            let binding = if self.cursor.eat(&TokenKind::LParen) {
                let name = self.expect_ident()?;
                self.cursor.expect(&TokenKind::RParen)?;
                name
            } else if self.cursor.check(&TokenKind::Ident) {
                self.expect_ident()?
            } else {
                DEFAULT_CATCH_BINDING.to_string()
            };
            let body = self.parse_block()?;
            Some(CatchClause { binding, body })
        } else {
            None
        };

        let finally = if self.cursor.peek_past_newlines().kind == TokenKind::Finally {
            self.cursor.skip_newlines();
            self.cursor.advance();
            Some(self.parse_block()?)
        } else {
            None
        };

        if catch.is_none() && finally.is_none() {
            return Err(ParseError::invalid(
                try_token.pos,
                "`try` needs a `catch` or `finally` clause",
            ));
        }
        Ok(StmtKind::Try {
            body,
            catch,
            finally,
        })
    }
}

fn check_assign_target(target: &Expr) -> Result<(), ParseError> {
    match &target.kind {
        ExprKind::Ident(_)
        | ExprKind::Index { .. }
        | ExprKind::Member {
            optional: false, ..
        } => Ok(()),
        _ => Err(ParseError::invalid(target.pos, "invalid assignment target")),
    }
}
