//! Compact S-expression rendering of the syntax tree.
//!
//! Used by `rill parse` and by parser tests, where comparing a one-line dump
//! is far easier to read than a nested `Debug` tree.

use std::fmt::{self, Display, Formatter, Write};

use super::{
    Block, ClassDecl, ComprehensionClause, Destructure, Expr, ExprKind, FunctionBody,
    FunctionDef, LetBinding, Literal, MatchArm, Pattern, Program, RecordEntry, RecordKey, Stmt,
    StmtKind, TemplatePart,
};

/// Render a number the way the language prints it: integral values without a
/// fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        // Exact: |n| < 1e15 fits in i64.
        #[allow(clippy::cast_possible_truncation)]
        let int = n as i64;
        if int == 0 && n.is_sign_negative() {
            return "-0".to_string();
        }
        int.to_string()
    } else if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        n.to_string()
    }
}

fn join<T: Display>(f: &mut Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        join(f, &self.body, "\n")
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        join(f, &self.stmts, "; ")?;
        f.write_char('}')
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => f.write_str(&format_number(*n)),
            Literal::Str(s) => write!(f, "{s:?}"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Nil => f.write_str("nil"),
        }
    }
}

impl Display for LetBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={value}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl Display for FunctionDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("(func ")?;
        if let Some(name) = &self.name {
            write!(f, "{name} ")?;
        }
        f.write_char('(')?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            f.write_str(&param.name)?;
            if let Some(default) = &param.default {
                write!(f, "={default}")?;
            }
        }
        f.write_str(") ")?;
        match &self.body {
            FunctionBody::Block(block) => write!(f, "{block})"),
            FunctionBody::Expr(expr) => write!(f, "=> {expr})"),
        }
    }
}

impl Display for ClassDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(class {}", self.name)?;
        if let Some(parent) = &self.parent {
            write!(f, " : {parent}")?;
        }
        for field in &self.fields {
            match &field.default {
                Some(default) => write!(f, " (let {}={default})", field.name)?,
                None => write!(f, " (let {})", field.name)?,
            }
        }
        for method in &self.methods {
            write!(f, " {method}")?;
        }
        f.write_char(')')
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Expr(expr) => write!(f, "{expr}"),
            StmtKind::Let(bindings) => {
                f.write_str("(let ")?;
                join(f, bindings, " ")?;
                f.write_char(')')
            }
            StmtKind::Const(bindings) => {
                f.write_str("(const ")?;
                join(f, bindings, " ")?;
                f.write_char(')')
            }
            StmtKind::Destructure {
                pattern,
                value,
                constant,
            } => {
                let keyword = if *constant { "const" } else { "let" };
                write!(f, "({keyword} ")?;
                match pattern {
                    Destructure::Array(names) => {
                        f.write_char('[')?;
                        for (i, name) in names.iter().enumerate() {
                            if i > 0 {
                                f.write_char(' ')?;
                            }
                            f.write_str(name.as_deref().unwrap_or("_"))?;
                        }
                        f.write_char(']')?;
                    }
                    Destructure::Record(names) => {
                        f.write_char('{')?;
                        join(f, names, " ")?;
                        f.write_char('}')?;
                    }
                }
                write!(f, " = {value})")
            }
            StmtKind::Assign { target, op, value } => {
                write!(f, "({} {target} {value})", op.as_symbol())
            }
            StmtKind::Function(def) => write!(f, "{def}"),
            StmtKind::Class(decl) => write!(f, "{decl}"),
            StmtKind::If {
                cond,
                then_block,
                else_branch,
            } => {
                write!(f, "(if {cond} {then_block}")?;
                if let Some(other) = else_branch {
                    write!(f, " else {other}")?;
                }
                f.write_char(')')
            }
            StmtKind::While { cond, body } => write!(f, "(while {cond} {body})"),
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => {
                f.write_str("(for ")?;
                match init {
                    Some(init) => write!(f, "{init}")?,
                    None => f.write_char('_')?,
                }
                f.write_str("; ")?;
                match cond {
                    Some(cond) => write!(f, "{cond}")?,
                    None => f.write_char('_')?,
                }
                f.write_str("; ")?;
                match post {
                    Some(post) => write!(f, "{post}")?,
                    None => f.write_char('_')?,
                }
                write!(f, " {body})")
            }
            StmtKind::ForIn {
                binding,
                iterable,
                body,
            } => write!(f, "(for {binding} in {iterable} {body})"),
            StmtKind::Block(block) => write!(f, "{block}"),
            StmtKind::Return(Some(value)) => write!(f, "(return {value})"),
            StmtKind::Return(None) => f.write_str("(return)"),
            StmtKind::Break => f.write_str("(break)"),
            StmtKind::Continue => f.write_str("(continue)"),
            StmtKind::Try {
                body,
                catch,
                finally,
            } => {
                write!(f, "(try {body}")?;
                if let Some(clause) = catch {
                    write!(f, " catch {} {}", clause.binding, clause.body)?;
                }
                if let Some(block) = finally {
                    write!(f, " finally {block}")?;
                }
                f.write_char(')')
            }
            StmtKind::Throw(value) => write!(f, "(throw {value})"),
            StmtKind::Import { path, alias } => {
                write!(f, "(import {path:?}")?;
                if let Some(alias) = alias {
                    write!(f, " as {alias}")?;
                }
                f.write_char(')')
            }
        }
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => f.write_char('_'),
            Pattern::Binding(name) => f.write_str(name),
            Pattern::Literal(lit) => write!(f, "{lit}"),
            Pattern::Array { elements, rest } => {
                f.write_char('[')?;
                join(f, elements, " ")?;
                if let Some(rest) = rest {
                    if !elements.is_empty() {
                        f.write_char(' ')?;
                    }
                    write!(f, "...{rest}")?;
                }
                f.write_char(']')
            }
            Pattern::Record(fields) => {
                f.write_char('{')?;
                for (i, (key, pattern)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{key}: {pattern}")?;
                }
                f.write_char('}')
            }
        }
    }
}

impl Display for MatchArm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(case {}", self.pattern)?;
        if let Some(guard) = &self.guard {
            write!(f, " if {guard}")?;
        }
        write!(f, " => {})", self.body)
    }
}

impl Display for ComprehensionClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ComprehensionClause::For { binding, iterable } => {
                write!(f, "(for {binding} {iterable})")
            }
            ComprehensionClause::If(cond) => write!(f, "(if {cond})"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(lit) => write!(f, "{lit}"),
            ExprKind::Template(parts) => {
                f.write_str("(template")?;
                for part in parts {
                    match part {
                        TemplatePart::Text(text) => write!(f, " {text:?}")?,
                        TemplatePart::Expr(expr) => write!(f, " {expr}")?,
                    }
                }
                f.write_char(')')
            }
            ExprKind::Ident(name) => f.write_str(name),
            ExprKind::Array(items) => {
                f.write_char('[')?;
                join(f, items, " ")?;
                f.write_char(']')
            }
            ExprKind::Record(entries) => {
                f.write_char('{')?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match entry {
                        RecordEntry::Field {
                            key: RecordKey::Name(name),
                            value,
                        } => write!(f, "{name}: {value}")?,
                        RecordEntry::Field {
                            key: RecordKey::Computed(key),
                            value,
                        } => write!(f, "[{key}]: {value}")?,
                        RecordEntry::Spread(expr) => write!(f, "...{expr}")?,
                    }
                }
                f.write_char('}')
            }
            ExprKind::Binary { op, left, right } => {
                write!(f, "({} {left} {right})", op.as_symbol())
            }
            ExprKind::Unary { op, operand } => write!(f, "({} {operand})", op.as_symbol()),
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => write!(f, "(? {cond} {then_expr} {else_expr})"),
            ExprKind::Call { callee, args } => {
                write!(f, "(call {callee}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_char(')')
            }
            ExprKind::Member {
                object,
                name,
                optional,
            } => {
                let op = if *optional { "?." } else { "." };
                write!(f, "({op} {object} {name})")
            }
            ExprKind::Index { object, index } => write!(f, "(index {object} {index})"),
            ExprKind::Function(def) => write!(f, "{def}"),
            ExprKind::Spread(inner) => write!(f, "(... {inner})"),
            ExprKind::Match { scrutinee, arms } => {
                write!(f, "(match {scrutinee}")?;
                for arm in arms {
                    write!(f, " {arm}")?;
                }
                f.write_char(')')
            }
            ExprKind::ArrayComprehension { element, clauses } => {
                write!(f, "(array-comp {element}")?;
                for clause in clauses {
                    write!(f, " {clause}")?;
                }
                f.write_char(')')
            }
            ExprKind::RecordComprehension {
                key,
                value,
                clauses,
            } => {
                write!(f, "(record-comp {key} {value}")?;
                for clause in clauses {
                    write!(f, " {clause}")?;
                }
                f.write_char(')')
            }
            ExprKind::Super { member: None } => f.write_str("super"),
            ExprKind::Super {
                member: Some(member),
            } => write!(f, "super.{member}"),
        }
    }
}
