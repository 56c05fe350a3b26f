use super::*;

/// A tiny expression tree shaped like the nested parentheses the parser sees.
enum Nested {
    Leaf(i64),
    Neg(Box<Nested>),
}

fn build(depth: usize) -> Nested {
    let mut node = Nested::Leaf(1);
    for _ in 0..depth {
        node = Nested::Neg(Box::new(node));
    }
    node
}

fn eval(node: &Nested) -> i64 {
    ensure_sufficient_stack(|| match node {
        Nested::Leaf(n) => *n,
        Nested::Neg(inner) => -eval(inner),
    })
}

fn drop_iteratively(mut node: Nested) {
    while let Nested::Neg(inner) = node {
        node = *inner;
    }
}

#[test]
fn shallow_nesting_evaluates() {
    let tree = build(3);
    assert_eq!(eval(&tree), -1);
    drop_iteratively(tree);
}

#[test]
fn deep_nesting_grows_the_stack() {
    let tree = build(200_000);
    assert_eq!(eval(&tree), 1);
    drop_iteratively(tree);
}

#[test]
fn passes_results_through() {
    let value: Result<&str, String> = ensure_sufficient_stack(|| Ok("ok"));
    assert_eq!(value, Ok("ok"));
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn reports_remaining_stack() {
    let remaining = ensure_sufficient_stack(remaining_stack);
    assert!(remaining.is_some_and(|bytes| bytes > 0));
}
