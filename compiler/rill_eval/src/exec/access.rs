//! Member and index access.
//!
//! Records and instances answer `.name`; arrays and strings answer their
//! built-in members. Indexing takes numbers for arrays and strings (negative
//! counts from the end) and strings for records and instances. A missing
//! record key faults rather than reading as `nil`.

use crate::methods::{array_member, string_member};
use crate::operators::to_int;
use crate::{Fault, FaultKind, Value};

pub(crate) fn get_member(object: &Value, name: &str) -> Result<Value, Fault> {
    match object {
        Value::Record(fields) => fields
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| Fault::key_not_found(name)),
        Value::Object(instance) => instance.get(name).ok_or_else(|| {
            Fault::new(
                FaultKind::KeyNotFound,
                format!("`{}` instance has no member `{name}`", instance.blueprint.name),
            )
        }),
        Value::Array(items) => array_member(items, name).ok_or_else(|| no_member(object, name)),
        Value::Str(text) => string_member(text, name).ok_or_else(|| no_member(object, name)),
        _ => Err(Fault::type_mismatch(format!(
            "cannot read member `{name}` of {}",
            object.type_name()
        ))),
    }
}

pub(crate) fn set_member(object: &Value, name: &str, value: Value) -> Result<(), Fault> {
    match object {
        Value::Record(fields) => {
            fields.borrow_mut().insert(name.to_string(), value);
            Ok(())
        }
        Value::Object(instance) => {
            instance.set(name, value);
            Ok(())
        }
        _ => Err(Fault::type_mismatch(format!(
            "cannot set member `{name}` on {}",
            object.type_name()
        ))),
    }
}

pub(crate) fn get_index(object: &Value, key: &Value) -> Result<Value, Fault> {
    match (object, key) {
        (Value::Array(items), Value::Number(n)) => {
            let items = items.borrow();
            let idx = resolve_index(*n, items.len())?;
            Ok(items[idx].clone())
        }
        (Value::Str(text), Value::Number(n)) => {
            let len = text.chars().count();
            let idx = resolve_index(*n, len)?;
            Ok(text
                .chars()
                .nth(idx)
                .map(|c| Value::from(c.to_string()))
                .unwrap_or_default())
        }
        (Value::Record(fields), Value::Str(k)) => fields
            .borrow()
            .get(&**k)
            .cloned()
            .ok_or_else(|| Fault::key_not_found(k)),
        (Value::Object(_), Value::Str(k)) => get_member(object, k),
        _ => Err(bad_index(object, key)),
    }
}

pub(crate) fn set_index(object: &Value, key: &Value, value: Value) -> Result<(), Fault> {
    match (object, key) {
        (Value::Array(items), Value::Number(n)) => {
            let mut items = items.borrow_mut();
            let idx = resolve_index(*n, items.len())?;
            items[idx] = value;
            Ok(())
        }
        (Value::Record(_) | Value::Object(_), Value::Str(k)) => set_member(object, k, value),
        _ => Err(bad_index(object, key)),
    }
}

/// Text form of a computed record key.
pub(crate) fn property_key(key: &Value) -> Result<String, Fault> {
    match key {
        Value::Str(s) => Ok(s.to_string()),
        Value::Number(_) | Value::Bool(_) => Ok(key.to_string()),
        other => Err(Fault::type_mismatch(format!(
            "record keys must be strings, got {}",
            other.type_name()
        ))),
    }
}

/// Map a script index onto `0..len`, counting negatives from the end.
fn resolve_index(n: f64, len: usize) -> Result<usize, Fault> {
    if n.fract() != 0.0 || !n.is_finite() {
        return Err(Fault::type_mismatch(format!("index {n} is not an integer")));
    }
    let raw = to_int(n);
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let idx = if raw < 0 { raw + len_i } else { raw };
    if (0..len_i).contains(&idx) {
        Ok(usize::try_from(idx).unwrap_or_default())
    } else {
        Err(Fault::index_out_of_range(raw, len))
    }
}

#[cold]
fn no_member(object: &Value, name: &str) -> Fault {
    Fault::new(
        FaultKind::KeyNotFound,
        format!("{} has no member `{name}`", object.type_name()),
    )
}

#[cold]
fn bad_index(object: &Value, key: &Value) -> Fault {
    Fault::type_mismatch(format!(
        "cannot index {} with {}",
        object.type_name(),
        key.type_name()
    ))
}
