//! Runtime faults.
//!
//! A [`Fault`] travels on the `Err` side of every evaluation result until a
//! `try`/`catch` binds it or it reaches the host. Construct faults through
//! the named constructors so kind and message stay consistent.

use indexmap::IndexMap;
use rill_ir::Position;
use rill_parse::ParseError;

use crate::limiter::Breach;
use crate::Value;

/// Category of a runtime fault.
#[derive(Clone, Debug, PartialEq)]
pub enum FaultKind {
    UndeclaredVariable,
    ImmutableBinding,
    AlreadyDeclared,
    TypeMismatch,
    IndexOutOfRange,
    KeyNotFound,
    DivisionByZero,
    NotCallable,
    LimitExceeded(Breach),
    /// A value raised by `throw`.
    Thrown(Value),
    NoMatch,
    Import,
    InvalidSuper,
}

impl FaultKind {
    /// Stable name, exposed to scripts as the `kind` of a caught fault.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FaultKind::UndeclaredVariable => "UndeclaredVariable",
            FaultKind::ImmutableBinding => "ImmutableBinding",
            FaultKind::AlreadyDeclared => "AlreadyDeclared",
            FaultKind::TypeMismatch => "TypeMismatch",
            FaultKind::IndexOutOfRange => "IndexOutOfRange",
            FaultKind::KeyNotFound => "KeyNotFound",
            FaultKind::DivisionByZero => "DivisionByZero",
            FaultKind::NotCallable => "NotCallable",
            FaultKind::LimitExceeded(_) => "LimitExceeded",
            FaultKind::Thrown(_) => "Thrown",
            FaultKind::NoMatch => "NoMatch",
            FaultKind::Import => "Import",
            FaultKind::InvalidSuper => "InvalidSuper",
        }
    }
}

/// Runtime error raised during evaluation.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct Fault {
    pub kind: FaultKind,
    pub message: String,
    /// Innermost source location the fault passed through.
    pub position: Option<Position>,
    /// Calls active when the fault was raised, innermost first.
    pub backtrace: Vec<String>,
}

impl Fault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Fault {
            kind,
            message: message.into(),
            position: None,
            backtrace: Vec::new(),
        }
    }

    #[cold]
    pub fn undeclared_variable(name: &str) -> Self {
        Fault::new(
            FaultKind::UndeclaredVariable,
            format!("undeclared variable `{name}`"),
        )
    }

    #[cold]
    pub fn immutable_binding(name: &str) -> Self {
        Fault::new(
            FaultKind::ImmutableBinding,
            format!("cannot assign to constant `{name}`"),
        )
    }

    #[cold]
    pub fn already_declared(name: &str) -> Self {
        Fault::new(
            FaultKind::AlreadyDeclared,
            format!("`{name}` is already declared in this scope"),
        )
    }

    #[cold]
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Fault::new(FaultKind::TypeMismatch, message)
    }

    #[cold]
    pub fn index_out_of_range(index: i64, len: usize) -> Self {
        Fault::new(
            FaultKind::IndexOutOfRange,
            format!("index {index} out of range for length {len}"),
        )
    }

    #[cold]
    pub fn key_not_found(key: &str) -> Self {
        Fault::new(FaultKind::KeyNotFound, format!("key `{key}` not found"))
    }

    #[cold]
    pub fn division_by_zero() -> Self {
        Fault::new(FaultKind::DivisionByZero, "division by zero")
    }

    #[cold]
    pub fn modulo_by_zero() -> Self {
        Fault::new(FaultKind::DivisionByZero, "modulo by zero")
    }

    #[cold]
    pub fn not_callable(type_name: &str) -> Self {
        Fault::new(
            FaultKind::NotCallable,
            format!("value of type {type_name} is not callable"),
        )
    }

    #[cold]
    pub fn limit_exceeded(breach: Breach) -> Self {
        let message = breach.to_string();
        let position = breach.location;
        Fault {
            kind: FaultKind::LimitExceeded(breach),
            message,
            position,
            backtrace: Vec::new(),
        }
    }

    pub fn thrown(value: Value) -> Self {
        let message = format!("uncaught throw: {value}");
        Fault::new(FaultKind::Thrown(value), message)
    }

    #[cold]
    pub fn no_match(value: &Value) -> Self {
        Fault::new(
            FaultKind::NoMatch,
            format!("no match arm accepts {value:?}"),
        )
    }

    #[cold]
    pub fn import(message: impl Into<String>) -> Self {
        Fault::new(FaultKind::Import, message)
    }

    #[cold]
    pub fn invalid_super(message: impl Into<String>) -> Self {
        Fault::new(FaultKind::InvalidSuper, message)
    }

    /// Record `pos` unless an inner location was already recorded.
    #[must_use]
    pub fn at(mut self, pos: Position) -> Self {
        if self.position.is_none() && pos.is_known() {
            self.position = Some(pos);
        }
        self
    }

    /// Attach a call backtrace unless one is already present.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: Vec<String>) -> Self {
        if self.backtrace.is_empty() {
            self.backtrace = backtrace;
        }
        self
    }

    pub fn breach(&self) -> Option<&Breach> {
        match &self.kind {
            FaultKind::LimitExceeded(breach) => Some(breach),
            _ => None,
        }
    }

    /// The value a `catch` clause binds: a thrown value as-is, anything else
    /// as a `{kind, message, line, column}` record (plus the breach details
    /// for limiter faults).
    pub fn to_catch_value(&self) -> Value {
        if let FaultKind::Thrown(value) = &self.kind {
            return value.clone();
        }

        let mut fields = IndexMap::new();
        fields.insert("kind".to_string(), Value::string(self.kind.as_str()));
        fields.insert("message".to_string(), Value::string(&self.message));
        let (line, column) = match self.position {
            Some(pos) => (Value::Number(f64::from(pos.line)), Value::Number(f64::from(pos.column))),
            None => (Value::Nil, Value::Nil),
        };
        fields.insert("line".to_string(), line);
        fields.insert("column".to_string(), column);

        if let Some(breach) = self.breach() {
            fields.insert("breach".to_string(), Value::string(breach.kind.as_str()));
            #[allow(clippy::cast_precision_loss)]
            let iterations = breach.iterations as f64;
            fields.insert("iterations".to_string(), Value::Number(iterations));
            fields.insert(
                "elapsed_ms".to_string(),
                Value::Number(breach.elapsed.as_secs_f64() * 1000.0),
            );
            fields.insert("hint".to_string(), Value::string(breach.hint));
        }
        Value::record(fields)
    }
}

/// Failure of a complete source-to-value run.
#[derive(Clone, Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Fault(#[from] Fault),
}

#[cfg(test)]
mod tests;
