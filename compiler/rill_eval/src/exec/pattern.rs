//! `match` patterns and `let` destructuring.

use rill_ir::{Destructure, Expr, MatchArm, Pattern};

use super::expr::literal_value;
use crate::{Environment, Fault, Interpreter, Value};

impl Interpreter {
    /// Try each arm in order; the first whose pattern matches and whose
    /// guard (if any) is truthy supplies the value. Bindings live in a fresh
    /// frame per arm.
    pub(crate) fn eval_match(&self, scrutinee: &Expr, arms: &[MatchArm], env: &Environment) -> Result<Value, Fault> {
        let value = self.eval_expr(scrutinee, env)?;
        for arm in arms {
            let frame = env.child();
            if !bind_pattern(&arm.pattern, &value, &frame) {
                continue;
            }
            if let Some(guard) = &arm.guard {
                if !self.eval_expr(guard, &frame)?.is_truthy() {
                    continue;
                }
            }
            return self.eval_expr(&arm.body, &frame);
        }
        Err(Fault::no_match(&value))
    }
}

/// Match `value` against `pattern`, defining bindings in `frame` as it goes.
/// Bindings made before a failed sub-pattern are left behind; callers
/// discard the frame on failure.
pub(crate) fn bind_pattern(pattern: &Pattern, value: &Value, frame: &Environment) -> bool {
    match pattern {
        Pattern::Wildcard => true,
        Pattern::Binding(name) => {
            frame.define(name, value.clone());
            true
        }
        Pattern::Literal(lit) => literal_value(lit).strict_equals(value),
        Pattern::Array { elements, rest } => {
            let Value::Array(items) = value else {
                return false;
            };
            let items = items.borrow().clone();
            let fits = match rest {
                Some(_) => items.len() >= elements.len(),
                None => items.len() == elements.len(),
            };
            if !fits {
                return false;
            }
            for (sub, item) in elements.iter().zip(&items) {
                if !bind_pattern(sub, item, frame) {
                    return false;
                }
            }
            if let Some(rest) = rest {
                frame.define(rest, Value::array(items[elements.len()..].to_vec()));
            }
            true
        }
        Pattern::Record(fields) => fields.iter().all(|(key, sub)| {
            let field = match value {
                Value::Record(record) => record.borrow().get(key).cloned(),
                Value::Object(instance) => instance.get(key),
                _ => None,
            };
            field.is_some_and(|field| bind_pattern(sub, &field, frame))
        }),
    }
}

/// The `(name, value)` pairs a `let` destructuring binds. Missing elements
/// and keys bind `nil`.
pub(crate) fn destructure(pattern: &Destructure, value: &Value) -> Result<Vec<(String, Value)>, Fault> {
    match (pattern, value) {
        (Destructure::Array(names), Value::Array(items)) => {
            let items = items.borrow();
            Ok(names
                .iter()
                .enumerate()
                .filter_map(|(i, name)| {
                    let name = name.as_ref()?;
                    Some((name.clone(), items.get(i).cloned().unwrap_or_default()))
                })
                .collect())
        }
        (Destructure::Record(keys), Value::Record(fields)) => {
            let fields = fields.borrow();
            Ok(keys
                .iter()
                .map(|key| (key.clone(), fields.get(key).cloned().unwrap_or_default()))
                .collect())
        }
        (Destructure::Record(keys), Value::Object(instance)) => Ok(keys
            .iter()
            .map(|key| (key.clone(), instance.get(key).unwrap_or_default()))
            .collect()),
        (Destructure::Array(_), other) => Err(Fault::type_mismatch(format!(
            "cannot destructure {} as an array",
            other.type_name()
        ))),
        (Destructure::Record(_), other) => Err(Fault::type_mismatch(format!(
            "cannot destructure {} as a record",
            other.type_name()
        ))),
    }
}
