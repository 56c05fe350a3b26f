#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use std::time::Duration;

use pretty_assertions::assert_eq;
use rill_ir::Position;

use super::*;
use crate::limiter::BreachKind;

fn field(record: &Value, key: &str) -> Value {
    match record {
        Value::Record(fields) => fields.borrow().get(key).cloned().unwrap_or_default(),
        other => panic!("expected a record, got {other:?}"),
    }
}

#[test]
fn constructors_set_kind_and_message() {
    let fault = Fault::undeclared_variable("x");
    assert_eq!(fault.kind, FaultKind::UndeclaredVariable);
    assert_eq!(fault.to_string(), "undeclared variable `x`");

    let fault = Fault::immutable_binding("PI");
    assert_eq!(fault.kind, FaultKind::ImmutableBinding);
    assert_eq!(fault.message, "cannot assign to constant `PI`");

    let fault = Fault::not_callable("number");
    assert_eq!(fault.message, "value of type number is not callable");

    let fault = Fault::index_out_of_range(-4, 3);
    assert_eq!(fault.message, "index -4 out of range for length 3");
}

#[test]
fn innermost_position_wins() {
    let fault = Fault::division_by_zero()
        .at(Position::new(3, 9))
        .at(Position::new(1, 1));
    assert_eq!(fault.position, Some(Position::new(3, 9)));

    let fault = Fault::division_by_zero().at(Position::SYNTHETIC);
    assert_eq!(fault.position, None);
}

#[test]
fn first_backtrace_is_kept() {
    let fault = Fault::key_not_found("k")
        .with_backtrace(vec!["inner".into(), "outer".into()])
        .with_backtrace(vec!["outer".into()]);
    assert_eq!(fault.backtrace, vec!["inner".to_string(), "outer".to_string()]);
}

#[test]
fn thrown_values_are_caught_as_is() {
    let value = Value::from("boom");
    let fault = Fault::thrown(value.clone());
    assert_eq!(fault.message, "uncaught throw: boom");
    assert_eq!(fault.to_catch_value(), value);
}

#[test]
fn runtime_faults_are_caught_as_records() {
    let caught = Fault::division_by_zero().at(Position::new(2, 7)).to_catch_value();
    assert_eq!(field(&caught, "kind"), Value::from("DivisionByZero"));
    assert_eq!(field(&caught, "message"), Value::from("division by zero"));
    assert_eq!(field(&caught, "line"), Value::Number(2.0));
    assert_eq!(field(&caught, "column"), Value::Number(7.0));

    let caught = Fault::type_mismatch("nope").to_catch_value();
    assert_eq!(field(&caught, "line"), Value::Nil);
}

#[test]
fn limit_faults_carry_breach_details() {
    let breach = Breach {
        kind: BreachKind::For,
        iterations: 5,
        elapsed: Duration::from_millis(250),
        location: Some(Position::new(1, 1)),
        hint: BreachKind::For.hint(),
        limit: 5,
        function: None,
    };
    let fault = Fault::limit_exceeded(breach);
    assert_eq!(fault.kind.as_str(), "LimitExceeded");
    assert_eq!(fault.position, Some(Position::new(1, 1)));
    assert_eq!(fault.breach().map(|b| b.kind), Some(BreachKind::For));

    let caught = fault.to_catch_value();
    assert_eq!(field(&caught, "breach"), Value::from("for"));
    assert_eq!(field(&caught, "iterations"), Value::Number(5.0));
    assert_eq!(field(&caught, "elapsed_ms"), Value::Number(250.0));
    assert_eq!(field(&caught, "hint"), Value::from(BreachKind::For.hint()));
}

#[test]
fn run_error_wraps_both_phases() {
    let parse = rill_parse::parse("let = 1").unwrap_err();
    let err = RunError::from(parse.clone());
    assert_eq!(err.to_string(), parse.to_string());

    let err = RunError::from(Fault::no_match(&Value::Number(3.0)));
    assert_eq!(err.to_string(), "no match arm accepts 3");
}
