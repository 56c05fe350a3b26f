//! Function calls.

use rill_ir::{FunctionBody, FunctionDef, Position};
use rill_stack::ensure_sufficient_stack;
use tracing::trace;

use super::Interpreter;
use crate::environment::MethodContext;
use crate::function::UserFunction;
use crate::{Environment, Fault, Signal, Value};

impl Interpreter {
    /// Call any callable value with already-evaluated arguments.
    ///
    /// Calling a blueprint instantiates it.
    pub fn call_value(&self, callee: &Value, args: Vec<Value>, pos: Position) -> Result<Value, Fault> {
        match callee {
            Value::Native(native) => {
                let _guard = self.limiter().enter_call(&native.name, pos)?;
                native.call(self, args).map_err(|fault| fault.at(pos))
            }
            Value::Function(func) => self.call_function(func, args, pos),
            Value::Blueprint(blueprint) => self.instantiate(blueprint, args, pos),
            other => Err(Fault::not_callable(other.type_name()).at(pos)),
        }
    }

    pub(crate) fn call_function(
        &self,
        func: &UserFunction,
        args: Vec<Value>,
        pos: Position,
    ) -> Result<Value, Fault> {
        let frame = func.env.child();
        if let Some(binding) = &func.method {
            frame.replace_method_context(Some(MethodContext {
                owner: binding.owner.clone(),
                method: binding.name.clone(),
            }));
        }
        self.invoke(&func.def, &frame, args, pos)
    }

    /// Run `def` in `frame`: bind parameters, evaluate the body, and unwrap a
    /// `return`.
    ///
    /// Missing arguments take the parameter default (evaluated in `frame`,
    /// so it can see earlier parameters) or `nil`; extra arguments are
    /// dropped. A `break`/`continue` that escapes the body yields `nil`.
    #[tracing::instrument(level = "debug", skip_all, fields(function = def.display_name()))]
    pub(crate) fn invoke(
        &self,
        def: &FunctionDef,
        frame: &Environment,
        args: Vec<Value>,
        pos: Position,
    ) -> Result<Value, Fault> {
        let limiter = frame.limiter();
        let _guard = limiter.enter_call(def.display_name(), pos)?;
        trace!(depth = limiter.depth(), "call");

        ensure_sufficient_stack(|| {
            self.bind_params(def, frame, args)?;
            match &def.body {
                FunctionBody::Expr(expr) => self.eval_expr(expr, frame),
                FunctionBody::Block(block) => Ok(match self.exec_stmts(&block.stmts, frame)? {
                    Signal::Normal(value) | Signal::Return(value) => value,
                    Signal::Break | Signal::Continue => Value::Nil,
                }),
            }
        })
        .map_err(|fault| fault.with_backtrace(limiter.backtrace()).at(pos))
    }

    fn bind_params(&self, def: &FunctionDef, frame: &Environment, args: Vec<Value>) -> Result<(), Fault> {
        let mut args = args.into_iter();
        for param in &def.params {
            let value = match (args.next(), &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval_expr(default, frame)?,
                (None, None) => Value::Nil,
            };
            frame.define(&param.name, value);
        }
        Ok(())
    }
}
