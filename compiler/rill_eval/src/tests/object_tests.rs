//! Blueprints, instances, inheritance and `super`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;

use super::{output, run, run_err, show};
use crate::{FaultKind, Value};

const ANIMALS: &str = "class Animal {
  let name = \"animal\"
  let sound = \"...\"
  constructor(name) { self.name = name }
  speak() { return name + \" says \" + sound }
  rename(n) { name = n }
}
class Dog extends Animal {
  let sound = \"woof\"
  let tricks = 0
  constructor(name) {
    super(name)
    tricks = 1
  }
  learn() {
    tricks += 1
    return tricks
  }
  speak() { return super.speak() + \"!\" }
}
";

fn with_animals(tail: &str) -> String {
    format!("{ANIMALS}{tail}")
}

#[test]
fn constructor_receives_the_call_arguments() {
    assert_eq!(show(&with_animals("let a = Animal(\"cat\")\na.name")), "cat");
}

#[test]
fn inherited_and_own_methods_are_exposed() {
    let src = with_animals("let d = Dog(\"rex\")\n[d.learn(), d.speak(), d.name]");
    assert_eq!(show(&src), r#"[2, "rex says woof!", "rex"]"#);
}

#[test]
fn super_call_mutates_the_same_instance() {
    let src = with_animals("let d = Dog(\"rex\")\nd.rename(\"max\")\n[d.name, d.tricks, d.speak()]");
    assert_eq!(show(&src), r#"["max", 1, "max says woof!"]"#);
}

#[test]
fn instances_do_not_share_fields() {
    let src = "class Bag {
  let items = []
  add(x) { items.push(x); return self }
}
let a = Bag()
let b = Bag()
a.add(1).add(2)
b.add(3)
[a.items.len(), b.items.len()]";
    assert_eq!(show(src), "[2, 1]");
}

#[test]
fn super_chains_through_several_levels() {
    let src = "class A { describe() { return \"A\" } }
class B extends A { describe() { return super.describe() + \">B\" } }
class C extends B { describe() { return super.describe() + \">C\" } }
C().describe()";
    assert_eq!(show(src), "A>B>C");
}

#[test]
fn this_and_self_name_the_instance() {
    let src = "class P {
  let x = 1
  bump() { this.x += 1; self.x += 1; return x }
}
P().bump()";
    assert_eq!(run(src), Value::Number(3.0));
}

#[test]
fn methods_are_bound_to_their_instance() {
    let src = "class Counter {
  let n = 0
  inc() { n += 1; return n }
}
let c = Counter()
let inc = c.inc
inc(); inc()
c.n";
    assert_eq!(run(src), Value::Number(2.0));
}

#[test]
fn fields_can_be_added_from_outside() {
    assert_eq!(show("class Box {}\nlet b = Box()\nb.label = \"x\"\nb[\"label\"]"), "x");
}

#[test]
fn missing_member_faults() {
    let fault = run_err("class Box {}\nBox().nothing");
    assert_eq!(fault.kind, FaultKind::KeyNotFound);
    assert_eq!(fault.message, "`Box` instance has no member `nothing`");
}

#[test]
fn super_outside_a_method_faults() {
    assert_eq!(run_err("super()").kind, FaultKind::InvalidSuper);
    assert_eq!(
        run_err("class Solo { go() { return super.go() } }\nSolo().go()").message,
        "`Solo` has no parent blueprint"
    );
}

#[test]
fn extending_a_non_blueprint_faults() {
    let fault = run_err("let Base = 1\nclass Sub extends Base {}");
    assert_eq!(fault.kind, FaultKind::TypeMismatch);
    assert_eq!(run_err("class Sub extends Missing {}").kind, FaultKind::UndeclaredVariable);
}

#[test]
fn blueprints_and_instances_display() {
    assert_eq!(show("class Dot {}\nDot"), "<blueprint Dot>");
    assert_eq!(show("class Dot {}\nDot()"), "<Dot instance>");
}

#[test]
fn blueprint_without_constructor_ignores_arguments() {
    assert_eq!(output("class Quiet { let v = 4 }\nprint(Quiet(1, 2).v)"), "4\n");
}

#[test]
fn field_defaults_are_evaluated_per_instance() {
    let src = "let made = 0
func next_id() { made += 1; return made }
class Tracked { let id = next_id() }
[Tracked().id, Tracked().id]";
    assert_eq!(show(src), "[1, 2]");
}
