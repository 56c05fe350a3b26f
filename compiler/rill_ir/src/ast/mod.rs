//! Syntax tree for Rill programs.
//!
//! Statements evaluate to control signals; expressions evaluate to values.
//! Every node carries the [`Position`] of its first token.

mod operators;
mod print;

use std::rc::Rc;

use crate::Position;

pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use print::format_number;

/// A parsed source file.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
    /// Directory relative imports are resolved against.
    pub base_dir: String,
}

/// A brace-delimited statement list.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub pos: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Position,
}

impl Stmt {
    pub fn new(kind: StmtKind, pos: Position) -> Self {
        Stmt { kind, pos }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Expr(Expr),
    /// `let a = 1, b` (also `var`).
    Let(Vec<LetBinding>),
    /// `const a = 1, b = 2`.
    Const(Vec<LetBinding>),
    /// `let [a, _, b] = xs` / `let {x, y} = point`.
    Destructure {
        pattern: Destructure,
        value: Expr,
        constant: bool,
    },
    /// `target op value` where target is an identifier, member or index.
    Assign {
        target: Expr,
        op: AssignOp,
        value: Expr,
    },
    Function(Rc<FunctionDef>),
    Class(Rc<ClassDecl>),
    If {
        cond: Expr,
        then_block: Block,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Block,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Block,
    },
    ForIn {
        binding: String,
        iterable: Expr,
        body: Block,
    },
    Block(Block),
    Return(Option<Expr>),
    Break,
    Continue,
    Try {
        body: Block,
        catch: Option<CatchClause>,
        finally: Option<Block>,
    },
    Throw(Expr),
    Import {
        path: String,
        alias: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LetBinding {
    pub name: String,
    pub value: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Destructure {
    /// Positional names; `None` marks a `_` slot.
    Array(Vec<Option<String>>),
    /// Record keys bound to same-named variables.
    Record(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub binding: String,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

impl Expr {
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Expr { kind, pos }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Template(Vec<TemplatePart>),
    Ident(String),
    Array(Vec<Expr>),
    Record(Vec<RecordEntry>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        name: String,
        optional: bool,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Function(Rc<FunctionDef>),
    /// `...expr` inside array literals, record literals and call arguments.
    Spread(Box<Expr>),
    Match {
        scrutinee: Box<Expr>,
        arms: Vec<MatchArm>,
    },
    ArrayComprehension {
        element: Box<Expr>,
        clauses: Vec<ComprehensionClause>,
    },
    RecordComprehension {
        key: Box<Expr>,
        value: Box<Expr>,
        clauses: Vec<ComprehensionClause>,
    },
    /// `super` (member `None`) or `super.name`; only valid as a callee.
    Super { member: Option<String> },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
    Bool(bool),
    Nil,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TemplatePart {
    Text(String),
    Expr(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub enum RecordEntry {
    Field { key: RecordKey, value: Expr },
    Spread(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub enum RecordKey {
    Name(String),
    Computed(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    Wildcard,
    Binding(String),
    Literal(Literal),
    /// `[a, b, ...rest]`
    Array {
        elements: Vec<Pattern>,
        rest: Option<String>,
    },
    /// `{name, age: 30}`; a bare key binds the field to a same-named variable.
    Record(Vec<(String, Pattern)>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ComprehensionClause {
    For { binding: String, iterable: Expr },
    If(Expr),
}

/// A function literal, declaration, arrow function or method.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub body: FunctionBody,
    pub pos: Position,
}

impl FunctionDef {
    /// Name used in call backtraces and limiter diagnostics.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub default: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionBody {
    Block(Block),
    /// Arrow function with an expression body.
    Expr(Box<Expr>),
}

/// `class Name extends Parent { ... }` (also `obj`).
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub parent: Option<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<Rc<FunctionDef>>,
    pub pos: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub default: Option<Expr>,
}
