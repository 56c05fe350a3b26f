//! Frames, shadowing, constants and closure capture.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;

use super::{build, run, run_err, run_in, show};
use crate::{FaultKind, Interpreter, Value};

#[test]
fn inner_binding_is_invisible_outside() {
    let fault = run_err("{ let inner = 1 }\ninner");
    assert_eq!(fault.kind, FaultKind::UndeclaredVariable);
    assert_eq!(fault.message, "undeclared variable `inner`");
}

#[test]
fn shadowing_never_touches_the_outer_binding() {
    assert_eq!(run("let x = 1\n{ let x = 2; x = 3 }\nx"), Value::Number(1.0));
}

#[test]
fn assignment_updates_the_nearest_binding() {
    assert_eq!(run("let x = 1\n{ { x = 2 } }\nx"), Value::Number(2.0));
}

#[test]
fn assigning_an_undeclared_name_faults() {
    assert_eq!(run_err("y = 1").kind, FaultKind::UndeclaredVariable);
}

#[test]
fn constants_cannot_be_reassigned() {
    let fault = run_err("const K = 1\nK = 2");
    assert_eq!(fault.kind, FaultKind::ImmutableBinding);
    assert_eq!(fault.message, "cannot assign to constant `K`");

    let fault = run_err("const K = 1\n{ K += 1 }");
    assert_eq!(fault.kind, FaultKind::ImmutableBinding);
}

#[test]
fn constants_cannot_be_redeclared_in_their_frame() {
    assert_eq!(run_err("const K = 1\nlet K = 2").kind, FaultKind::AlreadyDeclared);
    assert_eq!(run("const K = 1\n{ let K = 2; K }"), Value::Number(2.0));
}

#[test]
fn closures_capture_by_reference() {
    let src = "let n = 1
let fs = []
for (let i = 0; i < 3; i++) { fs.push(() => n * 10) }
n = 5
fs[0]()";
    assert_eq!(run(src), Value::Number(50.0));
}

#[test]
fn closures_keep_their_frame_alive() {
    let src = "func counter() {
  let c = 0
  return () => {
    c += 1
    return c
  }
}
let a = counter()
let b = counter()
a(); a()
[a(), b()]";
    assert_eq!(show(src), "[3, 1]");
}

#[test]
fn for_in_passes_get_their_own_frames() {
    let src = "let fs = []
for i in [10, 20, 30] { fs.push(() => [i, $v]) }
[fs[0](), fs[2]()]";
    assert_eq!(show(src), "[[0, 10], [2, 30]]");
}

#[test]
fn block_value_is_its_last_statement() {
    assert_eq!(run("{ let a = 2; a * 21 }"), Value::Number(42.0));
}

#[test]
fn identical_source_gives_identical_results() {
    let src = "func fib(n) { if n < 2 { return n }; return fib(n - 1) + fib(n - 2) }
let xs = [fib(10), \"x\" + 1, {a: [1, 2]}]
xs";
    let first = run_in(&build(Interpreter::builder()), src).to_string();
    let second = run_in(&build(Interpreter::builder()), src).to_string();
    assert_eq!(first, second);
    assert_eq!(first, r#"[55, "x1", { a: [1, 2] }]"#);
}

#[test]
fn globals_persist_across_runs_of_one_interpreter() {
    let interp = build(Interpreter::builder());
    run_in(&interp, "let total = 1");
    assert_eq!(run_in(&interp, "total += 1\ntotal"), Value::Number(2.0));
}
