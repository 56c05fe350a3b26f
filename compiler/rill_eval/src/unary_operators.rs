//! Unary operator implementations for the evaluator.

use rill_ir::UnaryOp;

use crate::operators::to_int;
use crate::{Fault, Value};

/// Evaluate a prefix operator.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> Result<Value, Fault> {
    match (value, op) {
        (Value::Number(n), UnaryOp::Neg) => Ok(Value::Number(-n)),
        (Value::Number(n), UnaryOp::Plus) => Ok(Value::Number(*n)),
        (_, UnaryOp::Not) => Ok(Value::Bool(!value.is_truthy())),
        #[allow(clippy::cast_precision_loss, reason = "results are stored as numbers")]
        (Value::Number(n), UnaryOp::BitNot) => Ok(Value::Number(!to_int(*n) as f64)),
        _ => Err(Fault::type_mismatch(format!(
            "operator `{}` cannot be applied to {}",
            op.as_symbol(),
            value.type_name()
        ))),
    }
}
