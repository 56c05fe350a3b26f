//! String members. Lengths and indices count characters, not bytes.

use std::rc::Rc;

use super::{arg, count, expect_str};
use crate::Value;

/// Bind `name` to `text`, or `None` if strings have no such member.
pub(crate) fn string_member(text: &Rc<str>, name: &str) -> Option<Value> {
    let text = Rc::clone(text);
    let label = format!("string.{name}");
    let member = match name {
        "len" | "length" => Value::native(label, move |_, _| Ok(count(text.chars().count()))),
        "upper" => Value::native(label, move |_, _| Ok(Value::from(text.to_uppercase()))),
        "lower" => Value::native(label, move |_, _| Ok(Value::from(text.to_lowercase()))),
        "trim" => Value::native(label, move |_, _| Ok(Value::string(text.trim()))),
        "split" => Value::native(label, move |_, args| {
            let parts: Vec<Value> = match args.first() {
                None | Some(Value::Nil) => text.split_whitespace().map(Value::string).collect(),
                Some(sep) => {
                    let sep = expect_str("split", sep)?;
                    if sep.is_empty() {
                        text.chars().map(|c| Value::from(c.to_string())).collect()
                    } else {
                        text.split(sep.as_str()).map(Value::string).collect()
                    }
                }
            };
            Ok(Value::array(parts))
        }),
        "contains" => Value::native(label, move |_, args| {
            let needle = expect_str("contains", &arg(&args, 0))?;
            Ok(Value::Bool(text.contains(needle.as_str())))
        }),
        "starts_with" => Value::native(label, move |_, args| {
            let prefix = expect_str("starts_with", &arg(&args, 0))?;
            Ok(Value::Bool(text.starts_with(prefix.as_str())))
        }),
        "ends_with" => Value::native(label, move |_, args| {
            let suffix = expect_str("ends_with", &arg(&args, 0))?;
            Ok(Value::Bool(text.ends_with(suffix.as_str())))
        }),
        _ => return None,
    };
    Some(member)
}
