//! Control signals produced by statements.

use crate::Value;

/// Outcome of executing a statement.
///
/// `Return`, `Break` and `Continue` travel outward as ordinary data until the
/// construct that consumes them: a call boundary for `Return`, a loop for
/// `Break`/`Continue`.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    Normal(Value),
    Return(Value),
    Break,
    Continue,
}

impl Signal {
    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, Signal::Normal(_))
    }

    /// The carried value; `nil` for `Break`/`Continue`.
    pub fn into_value(self) -> Value {
        match self {
            Signal::Normal(value) | Signal::Return(value) => value,
            Signal::Break | Signal::Continue => Value::Nil,
        }
    }
}

impl Default for Signal {
    fn default() -> Self {
        Signal::Normal(Value::Nil)
    }
}
