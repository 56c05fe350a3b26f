//! Expression evaluation.

use std::rc::Rc;

use indexmap::IndexMap;
use rill_ir::{BinaryOp, Expr, ExprKind, Literal, Position, RecordEntry, RecordKey, TemplatePart};
use rill_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use super::access::{get_index, get_member, property_key};
use crate::function::UserFunction;
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::{Environment, Fault, Interpreter, Value};

/// Argument buffer; most calls pass few arguments.
type ArgBuf = SmallVec<[Value; 4]>;

pub(crate) fn literal_value(lit: &Literal) -> Value {
    match lit {
        Literal::Number(n) => Value::Number(*n),
        Literal::Str(s) => Value::string(s),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Nil => Value::Nil,
    }
}

fn is_placeholder(arg: &Expr) -> bool {
    matches!(&arg.kind, ExprKind::Ident(name) if name == "_")
}

/// A callable that fills the empty `slots` with its arguments, left to
/// right. Once every slot is filled `func` is called; otherwise the result is
/// another partial application over the remaining slots. Arguments beyond
/// the open slots are dropped.
fn partial_application(func: Value, slots: Vec<Option<Value>>, pos: Position) -> Value {
    Value::native("partial", move |interp, args| {
        let mut supplied = args.into_iter();
        let filled: Vec<Option<Value>> = slots
            .iter()
            .map(|slot| slot.clone().or_else(|| supplied.next()))
            .collect();
        if filled.iter().all(Option::is_some) {
            interp.call_value(&func, filled.into_iter().flatten().collect(), pos)
        } else {
            Ok(partial_application(func.clone(), filled, pos))
        }
    })
}

impl Interpreter {
    pub(crate) fn eval_expr(&self, expr: &Expr, env: &Environment) -> Result<Value, Fault> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, env)).map_err(|fault| fault.at(expr.pos))
    }

    fn eval_expr_inner(&self, expr: &Expr, env: &Environment) -> Result<Value, Fault> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(literal_value(lit)),
            ExprKind::Template(parts) => self.eval_template(parts, env),
            ExprKind::Ident(name) => env.get(name).ok_or_else(|| Fault::undeclared_variable(name)),
            ExprKind::Array(items) => Ok(Value::array(self.eval_list(items, env)?.into_vec())),
            ExprKind::Record(entries) => self.eval_record(entries, env),
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right, env),
            ExprKind::Unary { op, operand } => evaluate_unary(&self.eval_expr(operand, env)?, *op),
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                if self.eval_expr(cond, env)?.is_truthy() {
                    self.eval_expr(then_expr, env)
                } else {
                    self.eval_expr(else_expr, env)
                }
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args, env, expr.pos),
            ExprKind::Member {
                object,
                name,
                optional,
            } => {
                let object = self.eval_expr(object, env)?;
                if *optional && object.is_nil() {
                    return Ok(Value::Nil);
                }
                get_member(&object, name)
            }
            ExprKind::Index { object, index } => {
                let object = self.eval_expr(object, env)?;
                let key = self.eval_expr(index, env)?;
                get_index(&object, &key)
            }
            ExprKind::Function(def) => Ok(Value::Function(Rc::new(UserFunction::new(
                Rc::clone(def),
                env.clone(),
            )))),
            ExprKind::Spread(_) => Err(Fault::type_mismatch(
                "`...` is only allowed in array literals, record literals and call arguments",
            )),
            ExprKind::Match { scrutinee, arms } => self.eval_match(scrutinee, arms, env),
            ExprKind::ArrayComprehension { element, clauses } => {
                self.eval_array_comprehension(element, clauses, env, expr.pos)
            }
            ExprKind::RecordComprehension { key, value, clauses } => {
                self.eval_record_comprehension(key, value, clauses, env, expr.pos)
            }
            ExprKind::Super { member } => Ok(self.super_value(member.clone(), env, expr.pos)),
        }
    }

    fn eval_binary(&self, op: BinaryOp, left: &Expr, right: &Expr, env: &Environment) -> Result<Value, Fault> {
        let left = self.eval_expr(left, env)?;
        match op {
            BinaryOp::And if !left.is_truthy() => Ok(left),
            BinaryOp::Or if left.is_truthy() => Ok(left),
            BinaryOp::Coalesce if !left.is_nil() => Ok(left),
            BinaryOp::And | BinaryOp::Or | BinaryOp::Coalesce => self.eval_expr(right, env),
            BinaryOp::Pipe => {
                let func = self.eval_expr(right, env)?;
                self.call_value(&func, vec![left], right.pos)
            }
            _ => {
                let right = self.eval_expr(right, env)?;
                evaluate_binary(&left, &right, op)
            }
        }
    }

    fn eval_template(&self, parts: &[TemplatePart], env: &Environment) -> Result<Value, Fault> {
        let mut out = String::new();
        for part in parts {
            match part {
                TemplatePart::Text(text) => out.push_str(text),
                TemplatePart::Expr(expr) => out.push_str(&self.eval_expr(expr, env)?.to_string()),
            }
        }
        Ok(Value::from(out))
    }

    /// Evaluate array items or call arguments, expanding `...spread`.
    fn eval_list(&self, items: &[Expr], env: &Environment) -> Result<ArgBuf, Fault> {
        let mut out = ArgBuf::new();
        for item in items {
            match &item.kind {
                ExprKind::Spread(inner) => match self.eval_expr(inner, env)? {
                    Value::Array(spread) => out.extend(spread.borrow().iter().cloned()),
                    Value::Str(text) => out.extend(text.chars().map(|c| Value::from(c.to_string()))),
                    other => {
                        return Err(Fault::type_mismatch(format!(
                            "cannot spread {} into a list",
                            other.type_name()
                        ))
                        .at(item.pos))
                    }
                },
                _ => out.push(self.eval_expr(item, env)?),
            }
        }
        Ok(out)
    }

    fn eval_record(&self, entries: &[RecordEntry], env: &Environment) -> Result<Value, Fault> {
        let mut fields = IndexMap::new();
        for entry in entries {
            match entry {
                RecordEntry::Field { key, value } => {
                    let key = match key {
                        RecordKey::Name(name) => name.clone(),
                        RecordKey::Computed(expr) => property_key(&self.eval_expr(expr, env)?)?,
                    };
                    fields.insert(key, self.eval_expr(value, env)?);
                }
                RecordEntry::Spread(expr) => match self.eval_expr(expr, env)? {
                    Value::Record(other) => {
                        fields.extend(other.borrow().iter().map(|(k, v)| (k.clone(), v.clone())));
                    }
                    Value::Nil => {}
                    other => {
                        return Err(Fault::type_mismatch(format!(
                            "cannot spread {} into a record",
                            other.type_name()
                        ))
                        .at(expr.pos))
                    }
                },
            }
        }
        Ok(Value::record(fields))
    }

    fn eval_call(&self, callee: &Expr, args: &[Expr], env: &Environment, pos: Position) -> Result<Value, Fault> {
        match &callee.kind {
            ExprKind::Super { member } => {
                let args = self.eval_list(args, env)?;
                self.call_super(member.as_deref(), args.into_vec(), env, pos)
            }
            ExprKind::Member {
                object,
                name,
                optional,
            } => {
                let object = self.eval_expr(object, env)?;
                if *optional && object.is_nil() {
                    return Ok(Value::Nil);
                }
                let func = get_member(&object, name).map_err(|fault| fault.at(callee.pos))?;
                self.apply(&func, args, env, pos)
            }
            _ => {
                let func = self.eval_expr(callee, env)?;
                self.apply(&func, args, env, pos)
            }
        }
    }

    /// Call `func` with `args`, or partially apply it when any argument is
    /// the `_` placeholder.
    fn apply(&self, func: &Value, args: &[Expr], env: &Environment, pos: Position) -> Result<Value, Fault> {
        if !args.iter().any(is_placeholder) {
            let args = self.eval_list(args, env)?;
            return self.call_value(func, args.into_vec(), pos);
        }
        if !func.is_callable() {
            return Err(Fault::type_mismatch(format!(
                "cannot partially apply {}",
                func.type_name()
            ))
            .at(pos));
        }
        let mut slots = Vec::with_capacity(args.len());
        for arg in args {
            if is_placeholder(arg) {
                slots.push(None);
            } else {
                let values = self.eval_list(std::slice::from_ref(arg), env)?;
                slots.extend(values.into_iter().map(Some));
            }
        }
        Ok(partial_application(func.clone(), slots, pos))
    }

    /// `super` or `super.name` read as a value: a callable that performs the
    /// `super` call against the current method frame.
    fn super_value(&self, member: Option<String>, env: &Environment, pos: Position) -> Value {
        let env = env.clone();
        Value::native("super", move |interp, args| {
            interp.call_super(member.as_deref(), args, &env, pos)
        })
    }
}
