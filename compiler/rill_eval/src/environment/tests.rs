#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;

use super::*;
use crate::limiter::{CancelToken, LimiterConfig};
use crate::FaultKind;

fn root() -> Environment {
    Environment::new_root(LimiterHandle::new(LimiterConfig::default(), CancelToken::new()))
}

fn num(n: f64) -> Value {
    Value::Number(n)
}

#[test]
fn lookup_walks_outward() {
    let globals = root();
    globals.set("x", num(1.0)).unwrap();
    let inner = globals.child().child();
    assert_eq!(inner.get("x"), Some(num(1.0)));
    assert_eq!(inner.get_local("x"), None);
    assert_eq!(inner.get("missing"), None);
}

#[test]
fn child_bindings_shadow_without_touching_the_parent() {
    let globals = root();
    globals.set("x", num(1.0)).unwrap();
    let inner = globals.child();
    inner.set("x", num(2.0)).unwrap();
    assert_eq!(inner.get("x"), Some(num(2.0)));
    assert_eq!(globals.get("x"), Some(num(1.0)));
}

#[test]
fn update_writes_the_nearest_binding() {
    let globals = root();
    globals.set("count", num(0.0)).unwrap();
    let inner = globals.child().child();
    inner.update("count", num(5.0)).unwrap();
    assert_eq!(globals.get("count"), Some(num(5.0)));
}

#[test]
fn update_of_missing_name_faults() {
    let err = root().child().update("ghost", num(1.0)).unwrap_err();
    assert_eq!(err.kind, FaultKind::UndeclaredVariable);
}

#[test]
fn constants_reject_updates_and_redeclaration() {
    let globals = root();
    globals.set_const("PI", num(2.5)).unwrap();

    let err = globals.child().update("PI", num(3.0)).unwrap_err();
    assert_eq!(err.kind, FaultKind::ImmutableBinding);
    assert_eq!(globals.set("PI", num(1.0)).unwrap_err().kind, FaultKind::AlreadyDeclared);
    assert_eq!(globals.set_const("PI", num(1.0)).unwrap_err().kind, FaultKind::AlreadyDeclared);

    // Shadowing in a child frame is allowed.
    let inner = globals.child();
    inner.set("PI", num(3.0)).unwrap();
    assert_eq!(inner.get("PI"), Some(num(3.0)));
}

#[test]
fn let_redeclaration_in_the_same_frame_overwrites() {
    let globals = root();
    globals.set("x", num(1.0)).unwrap();
    globals.set("x", num(2.0)).unwrap();
    assert_eq!(globals.get("x"), Some(num(2.0)));
}

#[test]
fn children_share_imports_and_limiter_and_copy_dir() {
    let globals = root();
    globals.set_dir("lib");
    let inner = globals.child();
    assert_eq!(inner.dir(), "lib");
    inner.set_dir("lib/sub");
    assert_eq!(globals.dir(), "lib");

    inner.mark_imported("lib/a.rl");
    assert!(globals.is_imported("lib/a.rl"));
    assert!(inner.limiter().ptr_eq(&globals.limiter()));
}

#[test]
fn separate_roots_do_not_share_state() {
    let a = root();
    let b = root();
    a.mark_imported("m");
    assert!(!b.is_imported("m"));
    assert!(!a.limiter().ptr_eq(&b.limiter()));
}

#[test]
fn local_bindings_are_sorted() {
    let env = root();
    env.set("b", num(2.0)).unwrap();
    env.set("a", num(1.0)).unwrap();
    let names: Vec<_> = env.local_bindings().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn parent_links() {
    let globals = root();
    let inner = globals.child();
    assert!(inner.parent().unwrap().ptr_eq(&globals));
    assert!(globals.parent().is_none());
}

#[test]
fn method_frame_is_absent_outside_methods() {
    let globals = root();
    assert!(globals.child().method_frame().is_none());
}
