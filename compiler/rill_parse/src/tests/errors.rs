//! Rejected input.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;
use rill_ir::Position;

use super::parse_err;
use crate::ParseError;

#[test]
fn missing_closing_paren() {
    let err = parse_err("f(1, 2");
    assert_eq!(err.pos(), Position::new(1, 7));
    assert_eq!(err.message(), "expected `)`, found end of input");
}

#[test]
fn unexpected_token_in_expression() {
    let err = parse_err("let x = * 2");
    assert!(matches!(err, ParseError::Expected { .. }));
    assert_eq!(err.pos(), Position::new(1, 9));
}

#[test]
fn error_position_on_later_line() {
    let err = parse_err("let a = 1\nlet b = )");
    assert_eq!(err.pos(), Position::new(2, 9));
}

#[test]
fn const_requires_initialiser() {
    let err = parse_err("const x");
    assert_eq!(err.message(), "constant `x` must be initialised");
}

#[test]
fn invalid_assignment_targets() {
    assert_eq!(parse_err("f() = 1").message(), "invalid assignment target");
    assert_eq!(parse_err("a?.b = 1").message(), "invalid assignment target");
    assert_eq!(parse_err("1++").message(), "invalid assignment target");
}

#[test]
fn try_needs_a_clause() {
    assert_eq!(
        parse_err("try { a }").message(),
        "`try` needs a `catch` or `finally` clause"
    );
}

#[test]
fn unterminated_block() {
    let err = parse_err("while x {\n  y");
    assert_eq!(err.message(), "expected `}`, found end of input");
}

#[test]
fn empty_template_hole() {
    let err = parse_err("`a${}b`");
    assert_eq!(err.message(), "empty `${}` in template string");
}

#[test]
fn lex_errors_pass_through() {
    let err = parse_err("let s = \"open");
    assert!(matches!(err, ParseError::Lex(_)));
    assert_eq!(err.pos(), Position::new(1, 9));
}

#[test]
fn match_arm_needs_case() {
    let err = parse_err("match x { 1 => 2 }");
    assert_eq!(err.message(), "expected `case`, found `1`");
}

#[test]
fn class_body_rejects_statements() {
    let err = parse_err("class A { x = 1 }");
    assert!(err.message().starts_with("expected field or method declaration"));
}
