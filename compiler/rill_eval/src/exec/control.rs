//! Conditionals, loops and `try`.
//!
//! Every loop evaluates its condition, then charges one iteration to the
//! limiter, then runs the body. A loop's value is its last normal body value.

use rill_ir::{Block, CatchClause, Expr, Position, Stmt};

use crate::limiter::BreachKind;
use crate::{Environment, Fault, Interpreter, Signal, Value};

/// What a loop does after one body run.
enum Flow {
    Next,
    Exit,
    Return(Value),
}

#[allow(clippy::cast_precision_loss, reason = "indices are exposed as numbers")]
fn index_value(index: usize) -> Value {
    Value::Number(index as f64)
}

/// Fold one body signal into the loop's running value.
fn step(signal: Signal, last: &mut Value) -> Flow {
    match signal {
        Signal::Normal(value) => {
            *last = value;
            Flow::Next
        }
        Signal::Continue => Flow::Next,
        Signal::Break => Flow::Exit,
        Signal::Return(value) => Flow::Return(value),
    }
}

impl Interpreter {
    pub(crate) fn exec_if(
        &self,
        cond: &Expr,
        then_block: &Block,
        else_branch: Option<&Stmt>,
        env: &Environment,
    ) -> Result<Signal, Fault> {
        if self.eval_expr(cond, env)?.is_truthy() {
            self.exec_block(then_block, env)
        } else if let Some(branch) = else_branch {
            self.exec_stmt(branch, env)
        } else {
            Ok(Signal::Normal(Value::Nil))
        }
    }

    pub(crate) fn exec_while(
        &self,
        cond: &Expr,
        body: &Block,
        env: &Environment,
        pos: Position,
    ) -> Result<Signal, Fault> {
        let limiter = env.limiter();
        let mut last = Value::Nil;
        while self.eval_expr(cond, env)?.is_truthy() {
            limiter.tick(BreachKind::While, pos)?;
            match step(self.exec_block(body, env)?, &mut last) {
                Flow::Next => {}
                Flow::Exit => break,
                Flow::Return(value) => return Ok(Signal::Return(value)),
            }
        }
        Ok(Signal::Normal(last))
    }

    /// C-style `for`. The initialiser runs in a frame of its own that every
    /// pass shares; a missing condition loops until `break`.
    pub(crate) fn exec_for(
        &self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        post: Option<&Stmt>,
        body: &Block,
        env: &Environment,
        pos: Position,
    ) -> Result<Signal, Fault> {
        let limiter = env.limiter();
        let frame = env.child();
        if let Some(init) = init {
            self.exec_stmt(init, &frame)?;
        }
        let mut last = Value::Nil;
        loop {
            if let Some(cond) = cond {
                if !self.eval_expr(cond, &frame)?.is_truthy() {
                    break;
                }
            }
            limiter.tick(BreachKind::For, pos)?;
            match step(self.exec_block(body, &frame)?, &mut last) {
                Flow::Next => {}
                Flow::Exit => break,
                Flow::Return(value) => return Ok(Signal::Return(value)),
            }
            if let Some(post) = post {
                self.exec_stmt(post, &frame)?;
            }
        }
        Ok(Signal::Normal(last))
    }

    /// `for k in iterable`. Each pass runs in a fresh frame where the loop
    /// variable and `$k` hold the position, `$v` the element and `$c` the
    /// collection. Arrays and strings bind the index; records bind the key.
    /// Arrays are read live, so growing one from the body keeps the loop
    /// going. Records and strings are walked from a snapshot.
    pub(crate) fn exec_for_in(
        &self,
        binding: &str,
        iterable: &Expr,
        body: &Block,
        env: &Environment,
        pos: Position,
    ) -> Result<Signal, Fault> {
        let limiter = env.limiter();
        let collection = self.eval_expr(iterable, env)?;
        let snapshot: Vec<(Value, Value)> = match &collection {
            Value::Array(_) => Vec::new(),
            Value::Record(fields) => fields
                .borrow()
                .iter()
                .map(|(key, value)| (Value::string(key), value.clone()))
                .collect(),
            Value::Str(text) => text
                .chars()
                .enumerate()
                .map(|(index, c)| (index_value(index), Value::from(c.to_string())))
                .collect(),
            other => {
                return Err(Fault::type_mismatch(format!(
                    "cannot iterate over {}",
                    other.type_name()
                )))
            }
        };
        let mut last = Value::Nil;
        let mut index = 0;
        loop {
            let pass = match &collection {
                Value::Array(items) => {
                    items.borrow().get(index).cloned().map(|item| (index_value(index), item))
                }
                _ => snapshot.get(index).cloned(),
            };
            let Some((key, item)) = pass else {
                break;
            };
            let frame = env.child();
            frame.define(binding, key.clone());
            frame.define("$k", key);
            frame.define("$v", item);
            frame.define("$c", collection.clone());
            limiter.tick(BreachKind::ForIn, pos)?;
            match step(self.exec_stmts(&body.stmts, &frame)?, &mut last) {
                Flow::Next => {}
                Flow::Exit => break,
                Flow::Return(value) => return Ok(Signal::Return(value)),
            }
            index += 1;
        }
        Ok(Signal::Normal(last))
    }

    /// The elements a comprehension walks, snapshotted: array elements,
    /// record keys or string characters.
    pub(crate) fn iteration_items(&self, collection: &Value) -> Result<Vec<Value>, Fault> {
        match collection {
            Value::Array(items) => Ok(items.borrow().clone()),
            Value::Record(fields) => Ok(fields.borrow().keys().map(Value::string).collect()),
            Value::Str(text) => Ok(text.chars().map(|c| Value::from(c.to_string())).collect()),
            other => Err(Fault::type_mismatch(format!(
                "cannot iterate over {}",
                other.type_name()
            ))),
        }
    }

    /// `try`/`catch`/`finally`.
    ///
    /// A fault in the body is bound by `catch` in a fresh frame. `finally`
    /// always runs; if it faults or produces a control signal, that replaces
    /// whatever the body and catch produced.
    pub(crate) fn exec_try(
        &self,
        body: &Block,
        catch: Option<&CatchClause>,
        finally: Option<&Block>,
        env: &Environment,
    ) -> Result<Signal, Fault> {
        let outcome = match (self.exec_block(body, env), catch) {
            (Err(fault), Some(clause)) => {
                tracing::debug!(kind = fault.kind.as_str(), "fault caught");
                let frame = env.child();
                frame.define(&clause.binding, fault.to_catch_value());
                self.exec_stmts(&clause.body.stmts, &frame)
            }
            (outcome, _) => outcome,
        };
        if let Some(finally) = finally {
            match self.exec_block(finally, env)? {
                Signal::Normal(_) => {}
                signal => return Ok(signal),
            }
        }
        outcome
    }
}
