//! Binary operator implementations for the evaluator.
//!
//! Operands arrive already evaluated. The short-circuiting operators and
//! `|>` are handled by the expression evaluator before it gets here, but
//! `&&`, `||` and `??` still have eager definitions so this module is total
//! over [`BinaryOp`].

use rill_ir::BinaryOp;

use crate::{Fault, Value};

/// Evaluate `left op right`.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, Fault> {
    match op {
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            let (a, b) = numbers(left, right, op)?;
            eval_arith(a, b, op)
        }
        BinaryOp::Eq => Ok(Value::Bool(left.strict_equals(right))),
        BinaryOp::NotEq => Ok(Value::Bool(!left.strict_equals(right))),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => eval_comparison(left, right, op),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor | BinaryOp::Shl | BinaryOp::Shr => {
            let (a, b) = numbers(left, right, op)?;
            Ok(eval_bitwise(to_int(a), to_int(b), op))
        }
        BinaryOp::And => Ok(if left.is_truthy() { right.clone() } else { left.clone() }),
        BinaryOp::Or => Ok(if left.is_truthy() { left.clone() } else { right.clone() }),
        BinaryOp::Coalesce => Ok(if left.is_nil() { right.clone() } else { left.clone() }),
        BinaryOp::Pipe => Err(Fault::type_mismatch(
            "`|>` needs a function call and cannot be applied to two values",
        )),
    }
}

/// `+`: numbers add, a string on either side concatenates, arrays
/// concatenate with arrays and append anything else. Always produces a new
/// value.
fn eval_add(left: &Value, right: &Value) -> Result<Value, Fault> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::from(format!("{left}{right}"))),
        (Value::Array(a), Value::Array(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::array(items))
        }
        (Value::Array(a), other) => {
            let mut items = a.borrow().clone();
            items.push(other.clone());
            Ok(Value::array(items))
        }
        _ => Err(mismatch(left, right, BinaryOp::Add)),
    }
}

fn eval_arith(a: f64, b: f64, op: BinaryOp) -> Result<Value, Fault> {
    let result = match op {
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div if b == 0.0 => return Err(Fault::division_by_zero()),
        BinaryOp::Div => a / b,
        BinaryOp::Mod if b == 0.0 => return Err(Fault::modulo_by_zero()),
        BinaryOp::Mod => a % b,
        _ => unreachable!("eval_arith called with {op:?}"),
    };
    Ok(Value::Number(result))
}

fn eval_comparison(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, Fault> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => return Err(mismatch(left, right, op)),
    };
    // NaN compares false against everything.
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };
    Ok(Value::Bool(match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::LtEq => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        _ => ordering.is_ge(),
    }))
}

#[allow(clippy::cast_precision_loss, reason = "results are stored as numbers")]
fn eval_bitwise(a: i64, b: i64, op: BinaryOp) -> Value {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "shift count is masked to 0..64")]
    let shift = (b & 63) as u32;
    let result = match op {
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl => a.wrapping_shl(shift),
        _ => a.wrapping_shr(shift),
    };
    Value::Number(result as f64)
}

/// Truncate toward zero; NaN becomes 0 and infinities saturate.
#[allow(clippy::cast_possible_truncation, reason = "bitwise operators work on integers")]
pub(crate) fn to_int(n: f64) -> i64 {
    n as i64
}

fn numbers(left: &Value, right: &Value, op: BinaryOp) -> Result<(f64, f64), Fault> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(mismatch(left, right, op)),
    }
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> Fault {
    Fault::type_mismatch(format!(
        "operator `{}` cannot be applied to {} and {}",
        op.as_symbol(),
        left.type_name(),
        right.type_name()
    ))
}
