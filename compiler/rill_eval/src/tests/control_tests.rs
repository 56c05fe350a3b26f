//! Blocks, loops, control signals and `try`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;

use super::{output, run, run_err, show};
use crate::{FaultKind, Value};

mod loops {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn break_stops_the_loop() {
        let src = "let c=0; for(let i=0;i<10;i++){ if(i==3){break;} c=c+1;}\nc";
        assert_eq!(run(src), Value::Number(3.0));
    }

    #[test]
    fn continue_skips_one_pass() {
        let src = "let c=0; for(let i=0;i<5;i++){ if(i==3){continue;} c=c+1;}\nc";
        assert_eq!(run(src), Value::Number(4.0));
    }

    #[test]
    fn continue_still_runs_the_post_step() {
        let src = "let seen = []\nfor (let i = 0; i < 4; i++) { if i % 2 == 0 { continue }; seen.push(i) }\nseen";
        assert_eq!(show(src), "[1, 3]");
    }

    #[test]
    fn while_loop_value_is_its_last_body_value() {
        assert_eq!(run("let i = 0\nwhile i < 3 { i++; i * 10 }"), Value::Number(30.0));
    }

    #[test]
    fn break_yields_the_last_normal_value() {
        assert_eq!(run("for i in [1, 2, 3] { if $v == 3 { break }; $v * 2 }"), Value::Number(4.0));
    }

    #[test]
    fn for_with_empty_clauses_runs_until_break() {
        assert_eq!(run("let n = 0\nfor (;;) { n++; if n == 7 { break } }\nn"), Value::Number(7.0));
    }

    #[test]
    fn for_in_binds_index_value_and_collection() {
        let src = "let out = []\nfor x in [\"a\", \"b\"] { out.push($k + \":\" + $v + \"/\" + $c.len()) }\nout";
        assert_eq!(show(src), r#"["0:a/2", "1:b/2"]"#);
    }

    #[test]
    fn for_in_binds_the_array_index() {
        let src = "let arr=[1,2,3,4,5]; let count=0; for (i in arr) { if (arr[i]==3) {break}; count=count+1 }; count";
        assert_eq!(run(src), Value::Number(2.0));
        assert_eq!(show("let is = []\nfor i in [\"x\", \"y\"] { is.push(i) }\nis"), "[0, 1]");
    }

    #[test]
    fn for_in_over_records_binds_keys_and_values() {
        assert_eq!(show("let ks = []\nfor k in {b: 1, a: 2} { ks.push(k) }\nks"), r#"["b", "a"]"#);
        assert_eq!(show("let out = []\nfor (k in {a: 1, b: 2}) { out.push($v) }\nout"), "[1, 2]");
        let src = "let rec = {a: 1, b: 2}\nlet out = []\nfor k in rec { out.push($k + \"=\" + $c[k]) }\nout";
        assert_eq!(show(src), r#"["a=1", "b=2"]"#);
    }

    #[test]
    fn for_in_over_strings_binds_indices_and_characters() {
        assert_eq!(show("let cs = []\nfor i in \"héy\" { cs.push($v) }\ncs"), r#"["h", "é", "y"]"#);
        assert_eq!(show("let is = []\nfor i in \"ab\" { is.push(i) }\nis"), "[0, 1]");
    }

    #[test]
    fn for_in_over_a_number_faults() {
        let fault = run_err("for x in 3 { x }");
        assert_eq!(fault.kind, FaultKind::TypeMismatch);
        assert_eq!(fault.message, "cannot iterate over number");
    }
}

mod returns {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deep_return_unwinds_to_the_call() {
        let src = "func find() {
  let i = 0
  while true {
    if i > 2 {
      {
        if true { return i * 100 }
      }
    }
    i++
  }
}
find()";
        assert_eq!(run(src), Value::Number(300.0));
    }

    #[test]
    fn return_from_inside_for_in() {
        let src = "func first_even(xs) { for i in xs { if xs[i] % 2 == 0 { return xs[i] } }; return nil }\nfirst_even([3, 5, 8, 10])";
        assert_eq!(run(src), Value::Number(8.0));
    }

    #[test]
    fn top_level_return_ends_the_program() {
        assert_eq!(run("let a = 1\nreturn a + 1\na = 99"), Value::Number(2.0));
    }

    #[test]
    fn break_escaping_a_function_yields_nil() {
        assert_eq!(run("func f() { break }\nf()"), Value::Nil);
    }

    #[test]
    fn if_chain_value() {
        assert_eq!(show("let n = 5\nif n < 3 { \"low\" } else if n < 10 { \"mid\" } else { \"high\" }"), "mid");
        assert_eq!(run("if false { 1 }"), Value::Nil);
    }
}

mod exceptions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn thrown_values_are_caught_as_is() {
        assert_eq!(show("try { throw \"bad\" } catch (e) { e + \"!\" }"), "bad!");
        assert_eq!(show("try { throw {code: 7} } catch (e) { e.code }"), "7");
    }

    #[test]
    fn runtime_faults_are_caught_as_records() {
        let src = "let r = nil\ntry {\n  1 / 0\n} catch (e) { r = e }\n[r.kind, r.message, r.line]";
        assert_eq!(show(src), r#"["DivisionByZero", "division by zero", 3]"#);
    }

    #[test]
    fn default_catch_binding() {
        assert_eq!(show("try { missing } catch { $e.kind }"), "UndeclaredVariable");
    }

    #[test]
    fn finally_runs_before_the_fault_resumes() {
        let src = "try {\n  try { throw 1 } finally { print(\"cleanup\") }\n} catch (e) { print(\"caught\", e) }";
        assert_eq!(output(src), "cleanup\ncaught 1\n");
    }

    #[test]
    fn finally_runs_on_normal_completion() {
        assert_eq!(output("try { print(\"body\") } catch { print(\"no\") } finally { print(\"done\") }"), "body\ndone\n");
    }

    #[test]
    fn finally_return_replaces_the_pending_one() {
        assert_eq!(run("func f() { try { return 1 } finally { return 2 } }\nf()"), Value::Number(2.0));
        assert_eq!(run("func f() { try { return 1 } finally { 5 } }\nf()"), Value::Number(1.0));
    }

    #[test]
    fn finally_fault_replaces_a_normal_outcome() {
        let fault = run_err("try { 1 } finally { throw \"late\" }");
        assert_eq!(fault.kind, FaultKind::Thrown(Value::from("late")));
    }

    #[test]
    fn uncaught_throw_aborts_the_run() {
        let fault = run_err("throw {code: 7}\nprint(\"unreachable\")");
        assert_eq!(fault.message, "uncaught throw: { code: 7 }");
        assert!(matches!(fault.kind, FaultKind::Thrown(_)));
    }

    #[test]
    fn fault_in_catch_propagates() {
        assert_eq!(run_err("try { throw 1 } catch (e) { e.nope }").kind, FaultKind::TypeMismatch);
    }
}
