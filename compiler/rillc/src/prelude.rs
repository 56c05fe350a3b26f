//! Host functions every `rill run` program starts with.

use rill_eval::{Environment, Fault, Value};

/// Bind `print`, `len`, `type_of`, `str`, `keys` and `instance_of` in `env`.
///
/// The bindings are ordinary mutable globals, so a script may shadow them.
pub fn install_prelude(env: &Environment) {
    env.define_native("print", |interp, args| {
        let line: Vec<String> = args.iter().map(ToString::to_string).collect();
        interp.println(&line.join(" "));
        Ok(Value::Nil)
    });

    env.define_native("len", |_, args| {
        let count = match args.first() {
            Some(Value::Str(s)) => s.chars().count(),
            Some(Value::Array(items)) => items.borrow().len(),
            Some(Value::Record(fields)) => fields.borrow().len(),
            other => return Err(expected("len", "a string, array or record", other)),
        };
        #[allow(clippy::cast_precision_loss, reason = "lengths are far below 2^52")]
        let count = count as f64;
        Ok(Value::Number(count))
    });

    env.define_native("type_of", |_, args| {
        let value = args.first().cloned().unwrap_or_default();
        Ok(Value::string(value.type_name()))
    });

    env.define_native("str", |_, args| {
        let value = args.first().cloned().unwrap_or_default();
        Ok(Value::string(value.to_string()))
    });

    env.define_native("keys", |_, args| match args.first() {
        Some(Value::Record(fields)) => Ok(Value::array(
            fields.borrow().keys().map(Value::string).collect(),
        )),
        Some(Value::Object(object)) => Ok(Value::array(
            object
                .blueprint
                .fields()
                .map(|(name, _)| Value::string(name))
                .collect(),
        )),
        other => Err(expected("keys", "a record or object", other)),
    });

    // `instance_of(value, Blueprint)`: true for instances of the blueprint
    // or of anything inheriting from it.
    env.define_native("instance_of", |_, args| match (args.first(), args.get(1)) {
        (Some(Value::Object(object)), Some(Value::Blueprint(blueprint))) => {
            Ok(Value::Bool(object.blueprint.is_a(blueprint)))
        }
        (Some(_), Some(Value::Blueprint(_))) => Ok(Value::Bool(false)),
        (_, other) => Err(expected("instance_of", "a blueprint as its second argument", other)),
    });
}

#[cold]
fn expected(function: &str, what: &str, got: Option<&Value>) -> Fault {
    let got = got.map_or("nothing", Value::type_name);
    Fault::type_mismatch(format!("`{function}` expects {what}, got {got}"))
}
