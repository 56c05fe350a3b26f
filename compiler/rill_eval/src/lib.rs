//! Rill Eval - tree-walking evaluator for Rill programs.
//!
//! # Architecture
//!
//! - [`Interpreter`]: walks the AST; statements yield a [`Signal`],
//!   expressions a [`Value`], and both fault through [`Fault`]
//! - [`Environment`]: parent-linked frames shared by closures
//! - [`Blueprint`] / [`ObjectInstance`]: classes flattened at declaration,
//!   instances with a private frame of fields and bound methods
//! - [`LimiterHandle`]: per-execution iteration, depth, time and
//!   cancellation budgets
//! - `evaluate_binary` / `evaluate_unary`: enum-dispatched operators
//! - [`ModuleLoader`]: host hook that resolves `import` paths
//!
//! # Example
//!
//! ```
//! use rill_eval::{buffer_handler, Interpreter};
//!
//! let output = buffer_handler();
//! let interp = Interpreter::builder().print_handler(output.clone()).build();
//! let value = interp.run_source("let xs = [1, 2, 3]\nxs.map((x) => x * 2)").unwrap();
//! assert_eq!(value.to_string(), "[2, 4, 6]");
//! ```

mod environment;
mod errors;
mod exec;
mod function;
mod interpreter;
pub mod limiter;
mod methods;
mod module_loader;
mod object;
mod operators;
mod print_handler;
mod signal;
mod unary_operators;
mod value;

pub use environment::{Environment, LocalScope, MethodContext, Mutability};
pub use errors::{Fault, FaultKind, RunError};
pub use function::{MethodBinding, NativeFn, NativeFunction, UserFunction};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use limiter::{Breach, BreachKind, CancelToken, LimiterConfig, LimiterHandle};
pub use module_loader::{LoadedModule, MemoryLoader, ModuleLoader};
pub use object::{Blueprint, MethodEntry, ObjectInstance};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use signal::Signal;
pub use unary_operators::evaluate_unary;
pub use value::{ArrayRef, RecordRef, Value};

#[cfg(test)]
mod tests;
