//! Statement dispatch.

use std::rc::Rc;

use rill_ir::{BinaryOp, Block, Destructure, Expr, ExprKind, LetBinding, Stmt, StmtKind};
use rill_stack::ensure_sufficient_stack;

use super::access;
use super::pattern::destructure;
use crate::function::UserFunction;
use crate::operators::evaluate_binary;
use crate::{Environment, Fault, Interpreter, Signal, Value};

impl Interpreter {
    /// Run `block` in a fresh child frame of `env`.
    pub(crate) fn exec_block(&self, block: &Block, env: &Environment) -> Result<Signal, Fault> {
        self.exec_stmts(&block.stmts, &env.child())
    }

    /// Run `stmts` in `env` until one produces a non-normal signal. The
    /// result carries the last statement's value.
    pub(crate) fn exec_stmts(&self, stmts: &[Stmt], env: &Environment) -> Result<Signal, Fault> {
        let mut last = Value::Nil;
        for stmt in stmts {
            match self.exec_stmt(stmt, env)? {
                Signal::Normal(value) => last = value,
                signal => return Ok(signal),
            }
        }
        Ok(Signal::Normal(last))
    }

    pub(crate) fn exec_stmt(&self, stmt: &Stmt, env: &Environment) -> Result<Signal, Fault> {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt, env)).map_err(|fault| fault.at(stmt.pos))
    }

    fn exec_stmt_inner(&self, stmt: &Stmt, env: &Environment) -> Result<Signal, Fault> {
        let normal = |value: Value| -> Result<Signal, Fault> { Ok(Signal::Normal(value)) };
        match &stmt.kind {
            StmtKind::Expr(expr) => normal(self.eval_expr(expr, env)?),
            StmtKind::Let(bindings) => {
                self.declare(bindings, env, false)?;
                normal(Value::Nil)
            }
            StmtKind::Const(bindings) => {
                self.declare(bindings, env, true)?;
                normal(Value::Nil)
            }
            StmtKind::Destructure {
                pattern,
                value,
                constant,
            } => {
                let value = self.eval_expr(value, env)?;
                self.exec_destructure(pattern, &value, env, *constant)?;
                normal(Value::Nil)
            }
            StmtKind::Assign { target, op, value } => {
                normal(self.exec_assign(target, op.binary(), value, env)?)
            }
            StmtKind::Function(def) => {
                let func = UserFunction::new(Rc::clone(def), env.clone());
                env.set(def.display_name(), Value::Function(Rc::new(func)))?;
                normal(Value::Nil)
            }
            StmtKind::Class(decl) => {
                self.declare_class(decl, env)?;
                normal(Value::Nil)
            }
            StmtKind::If {
                cond,
                then_block,
                else_branch,
            } => self.exec_if(cond, then_block, else_branch.as_deref(), env),
            StmtKind::While { cond, body } => self.exec_while(cond, body, env, stmt.pos),
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => self.exec_for(init.as_deref(), cond.as_ref(), post.as_deref(), body, env, stmt.pos),
            StmtKind::ForIn {
                binding,
                iterable,
                body,
            } => self.exec_for_in(binding, iterable, body, env, stmt.pos),
            StmtKind::Block(block) => self.exec_block(block, env),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Nil,
                };
                Ok(Signal::Return(value))
            }
            StmtKind::Break => Ok(Signal::Break),
            StmtKind::Continue => Ok(Signal::Continue),
            StmtKind::Try {
                body,
                catch,
                finally,
            } => self.exec_try(body, catch.as_ref(), finally.as_ref(), env),
            StmtKind::Throw(expr) => {
                let value = self.eval_expr(expr, env)?;
                Err(Fault::thrown(value)
                    .at(stmt.pos)
                    .with_backtrace(env.limiter().backtrace()))
            }
            StmtKind::Import { path, alias } => {
                self.exec_import(path, alias.as_deref(), env)?;
                normal(Value::Nil)
            }
        }
    }

    fn declare(&self, bindings: &[LetBinding], env: &Environment, constant: bool) -> Result<(), Fault> {
        for binding in bindings {
            let value = match &binding.value {
                Some(expr) => self.eval_expr(expr, env)?,
                None => Value::Nil,
            };
            if constant {
                env.set_const(&binding.name, value)?;
            } else {
                env.set(&binding.name, value)?;
            }
        }
        Ok(())
    }

    fn exec_destructure(
        &self,
        pattern: &Destructure,
        value: &Value,
        env: &Environment,
        constant: bool,
    ) -> Result<(), Fault> {
        for (name, item) in destructure(pattern, value)? {
            if constant {
                env.set_const(&name, item)?;
            } else {
                env.set(&name, item)?;
            }
        }
        Ok(())
    }

    /// `target = value` or a compound form. The target's container (if any)
    /// is evaluated before the right-hand side. Yields the assigned value.
    pub(crate) fn exec_assign(
        &self,
        target: &Expr,
        op: Option<BinaryOp>,
        value: &Expr,
        env: &Environment,
    ) -> Result<Value, Fault> {
        let combine = |current: Value, rhs: Value| match op {
            Some(op) => evaluate_binary(&current, &rhs, op),
            None => Ok(rhs),
        };
        match &target.kind {
            ExprKind::Ident(name) => {
                let current = match op {
                    Some(_) => env.get(name).ok_or_else(|| Fault::undeclared_variable(name))?,
                    None => Value::Nil,
                };
                let rhs = self.eval_expr(value, env)?;
                let result = combine(current, rhs)?;
                env.update(name, result.clone())?;
                Ok(result)
            }
            ExprKind::Member { object, name, .. } => {
                let object = self.eval_expr(object, env)?;
                let current = match op {
                    Some(_) => access::get_member(&object, name)?,
                    None => Value::Nil,
                };
                let rhs = self.eval_expr(value, env)?;
                let result = combine(current, rhs)?;
                access::set_member(&object, name, result.clone())?;
                Ok(result)
            }
            ExprKind::Index { object, index } => {
                let object = self.eval_expr(object, env)?;
                let key = self.eval_expr(index, env)?;
                let current = match op {
                    Some(_) => access::get_index(&object, &key)?,
                    None => Value::Nil,
                };
                let rhs = self.eval_expr(value, env)?;
                let result = combine(current, rhs)?;
                access::set_index(&object, &key, result.clone())?;
                Ok(result)
            }
            _ => Err(Fault::type_mismatch("invalid assignment target").at(target.pos)),
        }
    }
}
