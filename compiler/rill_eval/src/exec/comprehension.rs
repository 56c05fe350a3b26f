//! Array and record comprehensions.
//!
//! `for` clauses nest left to right, each pass in a fresh frame, and charge
//! the limiter like a `for`-`in` loop. `if` clauses filter.

use indexmap::IndexMap;
use rill_ir::{ComprehensionClause, Expr, Position};

use super::access::property_key;
use crate::limiter::BreachKind;
use crate::{Environment, Fault, Interpreter, Value};

impl Interpreter {
    pub(crate) fn eval_array_comprehension(
        &self,
        element: &Expr,
        clauses: &[ComprehensionClause],
        env: &Environment,
        pos: Position,
    ) -> Result<Value, Fault> {
        let mut out = Vec::new();
        self.run_clauses(clauses, env, pos, &mut |frame| {
            out.push(self.eval_expr(element, frame)?);
            Ok(())
        })?;
        Ok(Value::array(out))
    }

    pub(crate) fn eval_record_comprehension(
        &self,
        key: &Expr,
        value: &Expr,
        clauses: &[ComprehensionClause],
        env: &Environment,
        pos: Position,
    ) -> Result<Value, Fault> {
        let mut out = IndexMap::new();
        self.run_clauses(clauses, env, pos, &mut |frame| {
            let name = property_key(&self.eval_expr(key, frame)?)?;
            out.insert(name, self.eval_expr(value, frame)?);
            Ok(())
        })?;
        Ok(Value::record(out))
    }

    fn run_clauses(
        &self,
        clauses: &[ComprehensionClause],
        env: &Environment,
        pos: Position,
        emit: &mut dyn FnMut(&Environment) -> Result<(), Fault>,
    ) -> Result<(), Fault> {
        let Some((first, rest)) = clauses.split_first() else {
            return emit(env);
        };
        match first {
            ComprehensionClause::For { binding, iterable } => {
                let collection = self.eval_expr(iterable, env)?;
                let limiter = env.limiter();
                for item in self.iteration_items(&collection)? {
                    limiter.tick(BreachKind::ForIn, pos)?;
                    let frame = env.child();
                    frame.define(binding, item);
                    self.run_clauses(rest, &frame, pos, emit)?;
                }
                Ok(())
            }
            ComprehensionClause::If(cond) => {
                if self.eval_expr(cond, env)?.is_truthy() {
                    self.run_clauses(rest, env, pos, emit)
                } else {
                    Ok(())
                }
            }
        }
    }
}
