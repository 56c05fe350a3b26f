//! Array members.

use rill_ir::Position;

use super::{arg, count, expect_callable, expect_str};
use crate::operators::to_int;
use crate::value::ArrayRef;
use crate::{Fault, Interpreter, Value};

/// Bind `name` to `items`, or `None` if arrays have no such member.
pub(crate) fn array_member(items: &ArrayRef, name: &str) -> Option<Value> {
    let items = items.clone();
    let label = format!("array.{name}");
    let member = match name {
        "len" | "length" | "size" => Value::native(label, move |_, _| Ok(count(items.borrow().len()))),
        "push" => Value::native(label, move |_, args| {
            let mut items = items.borrow_mut();
            items.extend(args);
            Ok(count(items.len()))
        }),
        "pop" => Value::native(label, move |_, _| Ok(items.borrow_mut().pop().unwrap_or_default())),
        "map" => Value::native(label, move |interp, args| {
            let func = expect_callable("map", arg(&args, 0))?;
            let mut out = Vec::new();
            for (index, item) in snapshot(&items).into_iter().enumerate() {
                out.push(call(interp, &func, vec![item, count(index)])?);
            }
            Ok(Value::array(out))
        }),
        "filter" => Value::native(label, move |interp, args| {
            let func = expect_callable("filter", arg(&args, 0))?;
            let mut out = Vec::new();
            for (index, item) in snapshot(&items).into_iter().enumerate() {
                if call(interp, &func, vec![item.clone(), count(index)])?.is_truthy() {
                    out.push(item);
                }
            }
            Ok(Value::array(out))
        }),
        "reduce" => Value::native(label, move |interp, args| {
            let func = expect_callable("reduce", arg(&args, 0))?;
            let mut rest = snapshot(&items).into_iter();
            let mut acc = match args.get(1) {
                Some(init) => init.clone(),
                None => rest.next().ok_or_else(|| {
                    Fault::type_mismatch("`reduce` of an empty array needs an initial value")
                })?,
            };
            for item in rest {
                acc = call(interp, &func, vec![acc, item])?;
            }
            Ok(acc)
        }),
        "each" => Value::native(label, move |interp, args| {
            let func = expect_callable("each", arg(&args, 0))?;
            for (index, item) in snapshot(&items).into_iter().enumerate() {
                call(interp, &func, vec![item, count(index)])?;
            }
            Ok(Value::Nil)
        }),
        "find" => Value::native(label, move |interp, args| {
            let func = expect_callable("find", arg(&args, 0))?;
            for item in snapshot(&items) {
                if call(interp, &func, vec![item.clone()])?.is_truthy() {
                    return Ok(item);
                }
            }
            Ok(Value::Nil)
        }),
        "index_of" => Value::native(label, move |_, args| {
            let needle = arg(&args, 0);
            let found = items.borrow().iter().position(|item| item.strict_equals(&needle));
            Ok(found.map_or(Value::Number(-1.0), count))
        }),
        "contains" => Value::native(label, move |_, args| {
            let needle = arg(&args, 0);
            Ok(Value::Bool(items.borrow().iter().any(|item| item.strict_equals(&needle))))
        }),
        "join" => Value::native(label, move |_, args| {
            let sep = match args.first() {
                Some(sep) => expect_str("join", sep)?,
                None => ",".to_string(),
            };
            let parts: Vec<String> = items.borrow().iter().map(ToString::to_string).collect();
            Ok(Value::from(parts.join(&sep)))
        }),
        "reverse" => Value::native(label, move |_, _| {
            let mut out = snapshot(&items);
            out.reverse();
            Ok(Value::array(out))
        }),
        "slice" => Value::native(label, move |_, args| {
            let items = items.borrow();
            let len = items.len();
            let start = slice_bound(&arg(&args, 0), len, 0)?;
            let end = slice_bound(&arg(&args, 1), len, len)?;
            Ok(Value::array(items.get(start..end.max(start)).unwrap_or_default().to_vec()))
        }),
        _ => return None,
    };
    Some(member)
}

fn snapshot(items: &ArrayRef) -> Vec<Value> {
    items.borrow().clone()
}

fn call(interp: &Interpreter, func: &Value, args: Vec<Value>) -> Result<Value, Fault> {
    interp.call_value(func, args, Position::SYNTHETIC)
}

/// A `slice` bound: `nil` means `default`, negatives count from the end, and
/// the result is clamped to `0..=len`.
fn slice_bound(value: &Value, len: usize, default: usize) -> Result<usize, Fault> {
    match value {
        Value::Nil => Ok(default),
        Value::Number(n) => {
            let n = to_int(*n);
            let len_i = i64::try_from(len).unwrap_or(i64::MAX);
            let idx = if n < 0 { (len_i + n).max(0) } else { n.min(len_i) };
            Ok(usize::try_from(idx).unwrap_or(0))
        }
        other => Err(Fault::type_mismatch(format!(
            "`slice` expects number bounds, got {}",
            other.type_name()
        ))),
    }
}
