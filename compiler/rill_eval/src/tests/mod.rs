//! Evaluator tests.
//!
//! Tests are organized into modules by category:
//! - `scoping_tests`: frames, shadowing, constants and closures
//! - `control_tests`: blocks, loops, signals and `try`
//! - `function_tests`: calls, parameters, recursion and natives
//! - `object_tests`: blueprints, inheritance and `super`
//! - `collection_tests`: arrays, records, strings, spread, comprehensions and `match`
//! - `limiter_tests`: budgets observed through whole programs
//! - `import_tests`: module loading through `MemoryLoader`
//!
//! Programs are run end to end from source; `print` writes to a buffer the
//! tests read back.

mod collection_tests;
mod control_tests;
mod import_tests;
mod object_tests;
mod scoping_tests;

use crate::{buffer_handler, Fault, Interpreter, InterpreterBuilder, RunError, Value};

/// Register a `print` native that joins its arguments with spaces.
fn with_print(interp: Interpreter) -> Interpreter {
    interp.globals().define_native("print", |interp, args| {
        let line: Vec<String> = args.iter().map(ToString::to_string).collect();
        interp.println(&line.join(" "));
        Ok(Value::Nil)
    });
    interp
}

fn build(builder: InterpreterBuilder) -> Interpreter {
    with_print(builder.print_handler(buffer_handler()).build())
}

/// Run `src` in `interp`, which must succeed.
fn run_in(interp: &Interpreter, src: &str) -> Value {
    match interp.run_source(src) {
        Ok(value) => value,
        Err(err) => panic!("unexpected error in {src:?}: {err}"),
    }
}

/// Run `src` in a fresh interpreter, which must succeed.
fn run(src: &str) -> Value {
    run_in(&build(Interpreter::builder()), src)
}

/// Render the result of `src`.
fn show(src: &str) -> String {
    run(src).to_string()
}

/// Run `src`, which must fail at run time.
fn run_err_in(interp: &Interpreter, src: &str) -> Fault {
    match interp.run_source(src) {
        Ok(value) => panic!("expected a fault from {src:?}, got {value:?}"),
        Err(RunError::Parse(err)) => panic!("unexpected parse error in {src:?}: {err}"),
        Err(RunError::Fault(fault)) => fault,
    }
}

fn run_err(src: &str) -> Fault {
    run_err_in(&build(Interpreter::builder()), src)
}

/// Everything `src` printed, one line per `print` call.
fn output(src: &str) -> String {
    let interp = build(Interpreter::builder());
    run_in(&interp, src);
    interp.print_handler().get_output()
}
