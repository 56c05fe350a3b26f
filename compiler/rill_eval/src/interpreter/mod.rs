//! Tree-walking interpreter.
//!
//! Statements evaluate to a [`Signal`]; expressions to a [`Value`]. Both
//! return faults on the `Err` side. Evaluation code lives in `crate::exec`
//! (statements, expressions, patterns, comprehensions); this module holds
//! the interpreter state and the call, blueprint and import machinery.

mod blueprint;
mod builder;
mod call;
mod import;

pub use builder::InterpreterBuilder;

use std::cell::RefCell;
use std::rc::Rc;

use rill_ir::{Position, Program};
use rustc_hash::FxHashMap;

use crate::limiter::LimiterHandle;
use crate::print_handler::SharedPrintHandler;
use crate::{Environment, Fault, ModuleLoader, RunError, Signal, Value};

pub struct Interpreter {
    globals: Environment,
    loader: Option<Rc<dyn ModuleLoader>>,
    print_handler: SharedPrintHandler,
    /// Keys of modules currently being evaluated, outermost first.
    loading: RefCell<Vec<String>>,
    /// Evaluated module frames by key, so a repeated import rebinds without
    /// running the module again.
    modules: RefCell<FxHashMap<String, Environment>>,
}

impl Interpreter {
    /// An interpreter with default limits, stdout output and no loader.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// The root frame of this execution.
    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn limiter(&self) -> LimiterHandle {
        self.globals.limiter()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn println(&self, msg: &str) {
        self.print_handler.println(msg);
    }

    /// Run a parsed program in the root frame.
    ///
    /// Restarts the limiter's budgets. A top-level `return` ends the program
    /// with its value; otherwise the result is the last statement's value.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.body.len()))]
    pub fn run(&self, program: &Program) -> Result<Value, Fault> {
        self.limiter().reset();
        self.globals.set_dir(program.base_dir.as_str());
        self.exec_program(program, &self.globals)
    }

    /// Parse and run `source`, resolving imports against the root frame's
    /// directory.
    pub fn run_source(&self, source: &str) -> Result<Value, RunError> {
        let program = rill_parse::parse_with_base_dir(source, &self.globals.dir())?;
        Ok(self.run(&program)?)
    }

    /// Call `main()` if the program defined a callable `main`.
    pub fn run_main(&self) -> Result<Option<Value>, Fault> {
        match self.globals.get("main") {
            Some(main) if main.is_callable() => self
                .call_value(&main, Vec::new(), Position::SYNTHETIC)
                .map(Some),
            _ => Ok(None),
        }
    }

    pub(crate) fn exec_program(&self, program: &Program, env: &Environment) -> Result<Value, Fault> {
        let mut last = Value::Nil;
        for stmt in &program.body {
            match self.exec_stmt(stmt, env)? {
                Signal::Normal(value) => last = value,
                Signal::Return(value) => return Ok(value),
                Signal::Break | Signal::Continue => {}
            }
        }
        Ok(last)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
