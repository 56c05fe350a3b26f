//! Token types for the Rill lexer.

use super::Position;
use std::fmt;

/// A token with its literal text and where it starts.
///
/// `text` holds the source spelling for identifiers, numbers, keywords and
/// operators, and the cooked (escape-processed) contents for string literals.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Position,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            pos,
        }
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.pos.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.pos.column
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Newline | TokenKind::Eof => write!(f, "{:?} @ {}", self.kind, self.pos),
            _ => write!(f, "{:?}({:?}) @ {}", self.kind, self.text, self.pos),
        }
    }
}

/// One piece of a backtick template string.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplatePiece {
    /// Literal text with escapes already processed.
    Text(String),
    /// Raw source of a `${...}` hole and the position of its first character.
    Hole { source: String, pos: Position },
}

/// Token kinds for Rill.
///
/// Spelling variants of the same keyword (`func`/`function`, `class`/`obj`,
/// `let`/`var`, `nil`/`null`) share one kind; the token text keeps the
/// original spelling.
#[derive(Clone, PartialEq)]
pub enum TokenKind {
    Number,
    Str,
    Template(Vec<TemplatePiece>),
    Ident,

    // Keywords
    Let,
    Const,
    Func,
    Return,
    If,
    Else,
    While,
    For,
    In,
    Break,
    Continue,
    Class,
    Extends,
    Try,
    Catch,
    Finally,
    Throw,
    Import,
    As,
    True,
    False,
    Nil,
    Match,
    Case,
    Super,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Bang,
    AndAnd,
    OrOr,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,
    PipeArrow,
    Question,
    QuestionDot,
    QuestionQuestion,
    FatArrow,
    PlusPlus,
    MinusMinus,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    Ellipsis,

    // Delimiters
    Colon,
    Dot,
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    Newline,
    Eof,
}

impl TokenKind {
    /// Human-readable name used in parse diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Str => "string",
            TokenKind::Template(_) => "template string",
            TokenKind::Ident => "identifier",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::Func => "func",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Class => "class",
            TokenKind::Extends => "extends",
            TokenKind::Try => "try",
            TokenKind::Catch => "catch",
            TokenKind::Finally => "finally",
            TokenKind::Throw => "throw",
            TokenKind::Import => "import",
            TokenKind::As => "as",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            TokenKind::Match => "match",
            TokenKind::Case => "case",
            TokenKind::Super => "super",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Assign => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Bang => "!",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::PipeArrow => "|>",
            TokenKind::Question => "?",
            TokenKind::QuestionDot => "?.",
            TokenKind::QuestionQuestion => "??",
            TokenKind::FatArrow => "=>",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::Ellipsis => "...",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of input",
        }
    }

    /// Whether this token ends a statement without being part of it.
    #[inline]
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        )
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Template(pieces) => write!(f, "Template{pieces:?}"),
            TokenKind::Newline => write!(f, "Newline"),
            TokenKind::Eof => write!(f, "Eof"),
            _ => write!(f, "{}", self.display_name()),
        }
    }
}

/// Map a word to its keyword kind, or `None` for a plain identifier.
pub fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "let" | "var" => TokenKind::Let,
        "const" => TokenKind::Const,
        "func" | "function" => TokenKind::Func,
        "return" => TokenKind::Return,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "in" => TokenKind::In,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "class" | "obj" => TokenKind::Class,
        "extends" => TokenKind::Extends,
        "try" => TokenKind::Try,
        "catch" => TokenKind::Catch,
        "finally" => TokenKind::Finally,
        "throw" => TokenKind::Throw,
        "import" => TokenKind::Import,
        "as" => TokenKind::As,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "nil" | "null" => TokenKind::Nil,
        "match" => TokenKind::Match,
        "case" => TokenKind::Case,
        "super" => TokenKind::Super,
        _ => return None,
    };
    Some(kind)
}
