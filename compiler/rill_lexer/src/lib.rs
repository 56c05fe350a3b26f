//! Rill lexer: source text to tokens.
//!
//! The lexer is a pure function of its input and its cursor state. Newlines
//! are real tokens because the parser uses them as statement separators;
//! spaces, tabs, carriage returns and comments are skipped.
//!
//! A `+` or `-` directly followed by a digit lexes as part of a signed number
//! literal when the previous significant character is `(`, `,`, `[`, `=` or
//! `:`, so `f(-1)` and `x = -2` produce a single number token while `a-1`
//! stays a subtraction.

mod cursor;
mod errors;
mod template;

use cursor::Cursor;
use rill_ir::{keyword, Position, Token, TokenKind};

pub use errors::LexError;

/// Characters after which a sign directly before a digit belongs to the number.
const SIGN_CONTEXT: [char; 5] = ['(', ',', '[', '=', ':'];

/// Tokenizer over one source string.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self::starting_at(src, Position::new(1, 1))
    }

    /// Lex `src` as if it started at `start` in some enclosing file. Used for
    /// template-string holes so diagnostics point into the outer source.
    pub fn starting_at(src: &'src str, start: Position) -> Self {
        Lexer {
            cursor: Cursor::new(src, start),
        }
    }

    /// Produce the next token; returns `Eof` forever once input runs out.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;
        let start = self.cursor.pos();
        let Some(c) = self.cursor.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", start));
        };

        match c {
            '\n' => {
                self.cursor.bump();
                Ok(Token::new(TokenKind::Newline, "\n", start))
            }
            '"' | '\'' => self.lex_string(c, start),
            '`' => self.lex_template(start),
            c if c.is_ascii_digit() => self.lex_number(start),
            '+' | '-' if self.starts_signed_number() => self.lex_number(start),
            c if is_ident_start(c) => Ok(self.lex_ident(start)),
            _ => self.lex_operator(c, start),
        }
    }

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match (self.cursor.peek(), self.cursor.peek_nth(1)) {
                (Some(' ' | '\t' | '\r'), _) => {
                    self.cursor.bump();
                }
                (Some('/'), Some('/')) => self.cursor.skip_line(),
                (Some('/'), Some('*')) => {
                    let pos = self.cursor.pos();
                    self.cursor.bump();
                    self.cursor.bump();
                    if !self.cursor.skip_past("*/") {
                        return Err(LexError::UnterminatedComment { pos });
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn starts_signed_number(&self) -> bool {
        self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
            && self
                .cursor
                .previous_significant()
                .is_some_and(|prev| SIGN_CONTEXT.contains(&prev))
    }

    fn lex_number(&mut self, start: Position) -> Result<Token, LexError> {
        let begin = self.cursor.offset();
        if matches!(self.cursor.peek(), Some('+' | '-')) {
            self.cursor.bump();
        }
        self.cursor.eat_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.bump();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            let exponent_digit = match self.cursor.peek_nth(1) {
                Some('+' | '-') => self.cursor.peek_nth(2),
                other => other,
            };
            if exponent_digit.is_some_and(|c| c.is_ascii_digit()) {
                self.cursor.bump();
                if matches!(self.cursor.peek(), Some('+' | '-')) {
                    self.cursor.bump();
                }
                self.cursor.eat_while(|c| c.is_ascii_digit());
            }
        }

        if self.cursor.peek().is_some_and(is_ident_start) {
            self.cursor.eat_while(is_ident_continue);
            return Err(LexError::InvalidNumber {
                pos: start,
                text: self.cursor.slice_from(begin).to_string(),
            });
        }

        let text = self.cursor.slice_from(begin);
        if text.parse::<f64>().is_err() {
            return Err(LexError::InvalidNumber {
                pos: start,
                text: text.to_string(),
            });
        }
        Ok(Token::new(TokenKind::Number, text, start))
    }

    fn lex_ident(&mut self, start: Position) -> Token {
        let begin = self.cursor.offset();
        self.cursor.eat_while(is_ident_continue);
        let word = self.cursor.slice_from(begin);
        let kind = keyword(word).unwrap_or(TokenKind::Ident);
        Token::new(kind, word, start)
    }

    fn lex_string(&mut self, quote: char, start: Position) -> Result<Token, LexError> {
        self.cursor.bump();
        let mut text = String::new();
        loop {
            match self.cursor.peek() {
                None => return Err(LexError::UnterminatedString { pos: start }),
                Some(c) if c == quote => {
                    self.cursor.bump();
                    break;
                }
                Some('\\') => text.push(self.read_escape()?),
                Some(c) => {
                    self.cursor.bump();
                    text.push(c);
                }
            }
        }
        Ok(Token::new(TokenKind::Str, text, start))
    }

    /// Consume a backslash escape and return the character it denotes.
    fn read_escape(&mut self) -> Result<char, LexError> {
        let pos = self.cursor.pos();
        self.cursor.bump();
        let Some(c) = self.cursor.bump() else {
            return Err(LexError::InvalidEscape {
                pos,
                escape: String::new(),
            });
        };
        let cooked = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' | '"' | '\'' | '`' | '$' => c,
            'x' => self.read_hex_escape(pos, 'x', 2)?,
            'u' => self.read_hex_escape(pos, 'u', 4)?,
            'U' => self.read_hex_escape(pos, 'U', 8)?,
            other => {
                return Err(LexError::InvalidEscape {
                    pos,
                    escape: other.to_string(),
                })
            }
        };
        Ok(cooked)
    }

    fn read_hex_escape(&mut self, pos: Position, tag: char, digits: usize) -> Result<char, LexError> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            match self.cursor.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.cursor.bump();
                    hex.push(c);
                }
                _ => break,
            }
        }
        let invalid = || LexError::InvalidEscape {
            pos,
            escape: format!("{tag}{hex}"),
        };
        if hex.len() != digits {
            return Err(invalid());
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(invalid)
    }

    fn lex_operator(&mut self, c: char, start: Position) -> Result<Token, LexError> {
        let next = self.cursor.peek_nth(1);
        let (kind, len) = match (c, next) {
            ('.', Some('.')) if self.cursor.peek_nth(2) == Some('.') => (TokenKind::Ellipsis, 3),
            ('.', _) => (TokenKind::Dot, 1),
            ('?', Some('.'))
                if !self
                    .cursor
                    .peek_nth(2)
                    .is_some_and(|d| d.is_ascii_digit()) =>
            {
                (TokenKind::QuestionDot, 2)
            }
            ('?', Some('?')) => (TokenKind::QuestionQuestion, 2),
            ('?', _) => (TokenKind::Question, 1),
            ('=', Some('>')) => (TokenKind::FatArrow, 2),
            ('=', Some('=')) => (TokenKind::EqEq, 2),
            ('=', _) => (TokenKind::Assign, 1),
            ('!', Some('=')) => (TokenKind::NotEq, 2),
            ('!', _) => (TokenKind::Bang, 1),
            ('<', Some('=')) => (TokenKind::LtEq, 2),
            ('<', Some('<')) => (TokenKind::Shl, 2),
            ('<', _) => (TokenKind::Lt, 1),
            ('>', Some('=')) => (TokenKind::GtEq, 2),
            ('>', Some('>')) => (TokenKind::Shr, 2),
            ('>', _) => (TokenKind::Gt, 1),
            ('+', Some('+')) => (TokenKind::PlusPlus, 2),
            ('+', Some('=')) => (TokenKind::PlusEq, 2),
            ('+', _) => (TokenKind::Plus, 1),
            ('-', Some('-')) => (TokenKind::MinusMinus, 2),
            ('-', Some('=')) => (TokenKind::MinusEq, 2),
            ('-', _) => (TokenKind::Minus, 1),
            ('*', Some('=')) => (TokenKind::StarEq, 2),
            ('*', _) => (TokenKind::Star, 1),
            ('/', Some('=')) => (TokenKind::SlashEq, 2),
            ('/', _) => (TokenKind::Slash, 1),
            ('%', Some('=')) => (TokenKind::PercentEq, 2),
            ('%', _) => (TokenKind::Percent, 1),
            ('&', Some('&')) => (TokenKind::AndAnd, 2),
            ('&', _) => (TokenKind::Amp, 1),
            ('|', Some('|')) => (TokenKind::OrOr, 2),
            ('|', Some('>')) => (TokenKind::PipeArrow, 2),
            ('|', _) => (TokenKind::Pipe, 1),
            ('^', _) => (TokenKind::Caret, 1),
            ('~', _) => (TokenKind::Tilde, 1),
            (':', _) => (TokenKind::Colon, 1),
            (',', _) => (TokenKind::Comma, 1),
            (';', _) => (TokenKind::Semicolon, 1),
            ('(', _) => (TokenKind::LParen, 1),
            (')', _) => (TokenKind::RParen, 1),
            ('[', _) => (TokenKind::LBracket, 1),
            (']', _) => (TokenKind::RBracket, 1),
            ('{', _) => (TokenKind::LBrace, 1),
            ('}', _) => (TokenKind::RBrace, 1),
            _ => return Err(LexError::UnexpectedChar { pos: start, ch: c }),
        };

        let begin = self.cursor.offset();
        for _ in 0..len {
            self.cursor.bump();
        }
        Ok(Token::new(kind, self.cursor.slice_from(begin), start))
    }
}

#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Lex a whole source string. The result always ends with an `Eof` token.
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    tokenize_at(src, Position::new(1, 1))
}

/// Lex `src` with positions offset to `start`.
pub fn tokenize_at(src: &str, start: Position) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::starting_at(src, start);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
