//! Module loading through `MemoryLoader`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;

use super::{build, run_err_in, run_in};
use crate::{FaultKind, Interpreter, MemoryLoader, Value};

fn with_modules(loader: MemoryLoader) -> Interpreter {
    build(Interpreter::builder().loader(loader))
}

const MATH: &str = "let base = 10
func square(n) { return n * n }
func scaled(n) { return square(n) * base }";

#[test]
fn import_merges_top_level_names() {
    let interp = with_modules(MemoryLoader::new().with_module("math.rl", MATH));
    assert_eq!(run_in(&interp, "import \"math.rl\"\nscaled(3)"), Value::Number(90.0));
    assert_eq!(interp.globals().get("base"), Some(Value::Number(10.0)));
}

#[test]
fn aliased_import_binds_a_record() {
    let interp = with_modules(MemoryLoader::new().with_module("math.rl", MATH));
    assert_eq!(run_in(&interp, "import \"math.rl\" as m\nm.square(4)"), Value::Number(16.0));
    assert_eq!(interp.globals().get("square"), None);
    assert_eq!(run_in(&interp, "m.base"), Value::Number(10.0));
}

#[test]
fn a_module_runs_once_per_execution() {
    let loader = MemoryLoader::new().with_module("noisy.rl", "print(\"loading\")\nlet n = 1");
    let interp = with_modules(loader);
    let value = run_in(&interp, "import \"noisy.rl\"\nimport \"noisy.rl\"\nn");
    assert_eq!(value, Value::Number(1.0));
    assert_eq!(interp.print_handler().get_output(), "loading\n");
}

#[test]
fn module_state_is_shared_between_importers() {
    let loader = MemoryLoader::new()
        .with_module("counter.rl", "let state = { count: 0 }\nfunc bump() { state.count += 1 }")
        .with_module("user.rl", "import \"counter.rl\"\nbump()");
    let interp = with_modules(loader);
    let src = "import \"user.rl\"\nimport \"counter.rl\" as c\nc.bump()\nc.state.count";
    assert_eq!(run_in(&interp, src), Value::Number(2.0));
}

#[test]
fn nested_imports_resolve_against_the_importing_module() {
    let loader = MemoryLoader::new()
        .with_module("lib/a.rl", "import \"b.rl\"\nlet a = b + 1")
        .with_module("lib/b.rl", "let b = 41");
    let interp = with_modules(loader);
    assert_eq!(run_in(&interp, "import \"lib/a.rl\"\na"), Value::Number(42.0));
}

#[test]
fn modules_see_host_natives() {
    let loader = MemoryLoader::new().with_module("hello.rl", "func hello(who) { print(`hi ${who}`) }");
    let interp = with_modules(loader);
    run_in(&interp, "import \"hello.rl\"\nhello(\"there\")");
    assert_eq!(interp.print_handler().get_output(), "hi there\n");
}

#[test]
fn import_cycles_fault_with_the_chain() {
    let loader = MemoryLoader::new()
        .with_module("a.rl", "import \"b.rl\"")
        .with_module("b.rl", "import \"a.rl\"");
    let interp = with_modules(loader);
    let fault = run_err_in(&interp, "import \"a.rl\"");
    assert_eq!(fault.kind, FaultKind::Import);
    assert_eq!(fault.message, "import cycle: a.rl -> b.rl -> a.rl");
}

#[test]
fn importing_without_a_loader_faults() {
    let interp = build(Interpreter::builder());
    let fault = run_err_in(&interp, "import \"x.rl\"");
    assert_eq!(fault.kind, FaultKind::Import);
    assert_eq!(fault.message, "cannot import `x.rl`: no module loader configured");
}

#[test]
fn missing_modules_fault() {
    let interp = with_modules(MemoryLoader::new());
    let fault = run_err_in(&interp, "import \"nope.rl\"");
    assert_eq!(fault.message, "module `nope.rl` not found");
    assert_eq!(fault.position.map(|pos| pos.line), Some(1));
}

#[test]
fn module_parse_errors_name_the_module() {
    let interp = with_modules(MemoryLoader::new().with_module("bad.rl", "let = 1"));
    let fault = run_err_in(&interp, "import \"bad.rl\"");
    assert_eq!(fault.kind, FaultKind::Import);
    assert!(fault.message.starts_with("bad.rl: "), "{}", fault.message);
}

#[test]
fn imports_are_catchable() {
    let interp = with_modules(MemoryLoader::new());
    let src = "try { import \"nope.rl\" } catch (e) { e.kind }";
    assert_eq!(run_in(&interp, src), Value::string("Import"));
}
