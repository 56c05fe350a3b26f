//! Rill IR - tokens, positions and the syntax tree.
//!
//! This crate holds the data shared by every phase of the Rill toolchain:
//! - [`Position`] for line/column source locations
//! - [`Token`] and [`TokenKind`] for lexer output
//! - the AST ([`Program`], [`Stmt`], [`Expr`], ...) produced by the parser
//!   and walked by the evaluator
//!
//! The AST is immutable once built. Function bodies and blueprint
//! declarations sit behind `Rc` so closures and blueprints created at run time
//! can keep their syntax alive without copying it.

pub mod ast;
mod position;
mod token;

pub use ast::{
    format_number, AssignOp, BinaryOp, Block, CatchClause, ClassDecl, ComprehensionClause, Destructure, Expr,
    ExprKind, FieldDecl, FunctionBody, FunctionDef, LetBinding, Literal, MatchArm, Param,
    Pattern, Program, RecordEntry, RecordKey, Stmt, StmtKind, TemplatePart, UnaryOp,
};
pub use position::Position;
pub use token::{keyword, TemplatePiece, Token, TokenKind};
