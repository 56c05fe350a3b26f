//! Built-in members of arrays and strings.
//!
//! Member access on an array or string yields a native bound to the
//! receiver, so `xs.push` is an ordinary callable value and `xs.push(1)` is
//! an ordinary call.

mod array;
mod string;

pub(crate) use array::array_member;
pub(crate) use string::string_member;

use crate::{Fault, Value};

/// The `index`th argument, `nil` when absent.
fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

fn expect_callable(method: &str, value: Value) -> Result<Value, Fault> {
    if value.is_callable() {
        Ok(value)
    } else {
        Err(Fault::type_mismatch(format!(
            "`{method}` expects a function, got {}",
            value.type_name()
        )))
    }
}

fn expect_str(method: &str, value: &Value) -> Result<String, Fault> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        Fault::type_mismatch(format!(
            "`{method}` expects a string, got {}",
            value.type_name()
        ))
    })
}

#[allow(clippy::cast_precision_loss, reason = "lengths are exposed as numbers")]
fn count(n: usize) -> Value {
    Value::Number(n as f64)
}
