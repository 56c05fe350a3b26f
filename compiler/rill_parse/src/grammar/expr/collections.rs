//! Array and record literals and their comprehension forms.

use rill_ir::{ComprehensionClause, Expr, ExprKind, Literal, RecordEntry, RecordKey, TokenKind};

use crate::{ParseError, Parser};

impl Parser {
    /// `[a, b, ...c]` or `[expr for x in xs if cond]`.
    pub(crate) fn parse_array(&mut self) -> Result<Expr, ParseError> {
        let pos = self.cursor.advance().pos;
        self.cursor.skip_newlines();
        if self.cursor.eat(&TokenKind::RBracket) {
            return Ok(Expr::new(ExprKind::Array(Vec::new()), pos));
        }

        let first = self.parse_expression()?;
        self.cursor.skip_newlines();
        if self.cursor.check(&TokenKind::For) {
            let clauses = self.parse_comprehension_clauses()?;
            self.cursor.skip_newlines();
            self.cursor.expect(&TokenKind::RBracket)?;
            return Ok(Expr::new(
                ExprKind::ArrayComprehension {
                    element: Box::new(first),
                    clauses,
                },
                pos,
            ));
        }

        let mut items = vec![first];
        while self.cursor.eat(&TokenKind::Comma) {
            self.cursor.skip_newlines();
            if self.cursor.check(&TokenKind::RBracket) {
                break;
            }
            items.push(self.parse_expression()?);
            self.cursor.skip_newlines();
        }
        self.cursor.expect(&TokenKind::RBracket)?;
        Ok(Expr::new(ExprKind::Array(items), pos))
    }

    /// `{key: value, [computed]: v, shorthand, ...spread}` or
    /// `{key: value for x in xs}`. Entries may be separated by commas or
    /// newlines.
    pub(crate) fn parse_record(&mut self) -> Result<Expr, ParseError> {
        let pos = self.cursor.advance().pos;
        let mut entries = Vec::new();

        loop {
            self.skip_entry_separators();
            if self.cursor.eat(&TokenKind::RBrace) {
                break;
            }

            if self.cursor.eat(&TokenKind::Ellipsis) {
                entries.push(RecordEntry::Spread(self.parse_expression()?));
                continue;
            }

            let (key, key_expr) = self.parse_record_key()?;
            let value = if self.cursor.eat(&TokenKind::Colon) {
                self.cursor.skip_newlines();
                self.parse_expression()?
            } else if let (RecordKey::Name(_), ExprKind::Ident(_)) = (&key, &key_expr.kind) {
                key_expr.clone()
            } else {
                return Err(ParseError::expected("`:`", self.cursor.current()));
            };

            if entries.is_empty() && self.cursor.peek_past_newlines().kind == TokenKind::For {
                self.cursor.skip_newlines();
                let clauses = self.parse_comprehension_clauses()?;
                self.cursor.skip_newlines();
                self.cursor.expect(&TokenKind::RBrace)?;
                return Ok(Expr::new(
                    ExprKind::RecordComprehension {
                        key: Box::new(key_expr),
                        value: Box::new(value),
                        clauses,
                    },
                    pos,
                ));
            }

            entries.push(RecordEntry::Field { key, value });
            if !matches!(
                self.cursor.current().kind,
                TokenKind::Comma | TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace
            ) {
                return Err(ParseError::expected("`,` or `}`", self.cursor.current()));
            }
        }

        Ok(Expr::new(ExprKind::Record(entries), pos))
    }

    /// A record key, plus the expression it denotes when the record turns
    /// out to be a comprehension (where `{x: ...}` means the variable `x`).
    fn parse_record_key(&mut self) -> Result<(RecordKey, Expr), ParseError> {
        let token = self.cursor.current().clone();
        match token.kind {
            TokenKind::LBracket => {
                self.cursor.advance();
                self.cursor.skip_newlines();
                let key = self.parse_expression()?;
                self.cursor.skip_newlines();
                self.cursor.expect(&TokenKind::RBracket)?;
                Ok((RecordKey::Computed(key.clone()), key))
            }
            TokenKind::Str => {
                self.cursor.advance();
                let expr = Expr::new(ExprKind::Literal(Literal::Str(token.text.clone())), token.pos);
                Ok((RecordKey::Name(token.text), expr))
            }
            TokenKind::Number => {
                self.cursor.advance();
                let value = token.text.parse::<f64>().unwrap_or(f64::NAN);
                let expr = Expr::new(ExprKind::Literal(Literal::Number(value)), token.pos);
                Ok((RecordKey::Name(token.text), expr))
            }
            _ => {
                let name = self.expect_member_name()?;
                let expr = Expr::new(ExprKind::Ident(name.clone()), token.pos);
                Ok((RecordKey::Name(name), expr))
            }
        }
    }

    fn skip_entry_separators(&mut self) {
        while matches!(
            self.cursor.current().kind,
            TokenKind::Comma | TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.cursor.advance();
        }
    }

    /// `for x in xs [if cond] [for y in ys] ...`
    fn parse_comprehension_clauses(&mut self) -> Result<Vec<ComprehensionClause>, ParseError> {
        let mut clauses = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.eat(&TokenKind::For) {
                let binding = self.expect_ident()?;
                self.cursor.expect(&TokenKind::In)?;
                let iterable = self.parse_expression()?;
                clauses.push(ComprehensionClause::For { binding, iterable });
            } else if !clauses.is_empty() && self.cursor.eat(&TokenKind::If) {
                clauses.push(ComprehensionClause::If(self.parse_expression()?));
            } else {
                break;
            }
        }
        Ok(clauses)
    }
}
