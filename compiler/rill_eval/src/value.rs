//! Runtime values.
//!
//! Scalars are copied; arrays and records are shared through
//! `Rc<RefCell<_>>`, so a mutation through one holder is visible to every
//! other holder. Callables and instances are shared immutably and compare by
//! identity.

use std::cell::RefCell;
use std::fmt::{self, Write as _};
use std::rc::Rc;

use indexmap::IndexMap;
use rill_ir::format_number;

use crate::function::{NativeFunction, UserFunction};
use crate::object::{Blueprint, ObjectInstance};
use crate::{Fault, Interpreter};

/// Shared, mutable array storage.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;
/// Shared, mutable record storage. Keys keep insertion order.
pub type RecordRef = Rc<RefCell<IndexMap<String, Value>>>;

/// Containers nested deeper than this display as `...`, which also keeps
/// self-referencing containers printable.
const MAX_DISPLAY_DEPTH: usize = 16;

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Array(ArrayRef),
    Record(RecordRef),
    Native(Rc<NativeFunction>),
    Function(Rc<UserFunction>),
    Blueprint(Rc<Blueprint>),
    Object(Rc<ObjectInstance>),
}

impl Value {
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn record(fields: IndexMap<String, Value>) -> Self {
        Value::Record(Rc::new(RefCell::new(fields)))
    }

    /// Wrap a host function as a callable value.
    pub fn native<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Interpreter, Vec<Value>) -> Result<Value, Fault> + 'static,
    {
        Value::Native(Rc::new(NativeFunction::new(name, func)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
            Value::Native(_) | Value::Function(_) => "function",
            Value::Blueprint(_) => "blueprint",
            Value::Object(_) => "object",
        }
    }

    /// `nil`, `false`, `0`, `NaN` and `""` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Value::Native(_) | Value::Function(_) | Value::Blueprint(_)
        )
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Language-level `==`: scalars by value, everything else by identity.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Blueprint(a), Value::Blueprint(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, depth: usize, quote_strings: bool) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) if quote_strings => write!(f, "{:?}", &**s),
            Value::Str(s) => f.write_str(s),
            Value::Array(_) | Value::Record(_) if depth >= MAX_DISPLAY_DEPTH => f.write_str("..."),
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write(f, depth + 1, true)?;
                }
                f.write_char(']')
            }
            Value::Record(fields) => {
                let fields = fields.borrow();
                if fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: ")?;
                    value.write(f, depth + 1, true)?;
                }
                f.write_str(" }")
            }
            Value::Native(native) => write!(f, "<native {}>", native.name),
            Value::Function(func) => write!(f, "<func {}>", func.name()),
            Value::Blueprint(blueprint) => write!(f, "<blueprint {}>", blueprint.name),
            Value::Object(object) => write!(f, "<{} instance>", object.blueprint.name),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, 0, false)
    }
}

/// Like `Display`, with strings quoted.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, 0, true)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}
