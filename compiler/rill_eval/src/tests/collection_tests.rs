//! Arrays, records, strings, spread, comprehensions, templates and `match`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;

use super::{run, run_err, show};
use crate::{FaultKind, Value};

mod access {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn negative_indices_count_from_the_end() {
        assert_eq!(run("[1, 2, 3][-1]"), Value::Number(3.0));
        assert_eq!(run("let xs = [1, 2, 3]\nxs[-3]"), Value::Number(1.0));
    }

    #[test]
    fn index_out_of_range_faults() {
        let fault = run_err("[1, 2, 3][3]");
        assert_eq!(fault.kind, FaultKind::IndexOutOfRange);
        assert_eq!(fault.message, "index 3 out of range for length 3");
        assert_eq!(run_err("[1][-2]").kind, FaultKind::IndexOutOfRange);
    }

    #[test]
    fn record_key_miss_faults_through_dot_and_brackets() {
        assert_eq!(run_err("let r = {a: 1}\nr.b").kind, FaultKind::KeyNotFound);
        let fault = run_err("let r = {a: 1}\nr[\"b\"]");
        assert_eq!(fault.kind, FaultKind::KeyNotFound);
        assert_eq!(fault.message, "key `b` not found");
    }

    #[test]
    fn wrong_index_type_faults() {
        assert_eq!(run_err("[1][\"a\"]").kind, FaultKind::TypeMismatch);
        assert_eq!(run_err("let r = {a: 1}\nr[0]").kind, FaultKind::TypeMismatch);
        assert_eq!(run_err("[1, 2][0.5]").kind, FaultKind::TypeMismatch);
        assert_eq!(run_err("nil.x").kind, FaultKind::TypeMismatch);
    }

    #[test]
    fn strings_index_by_character() {
        assert_eq!(show("\"héllo\"[1]"), "é");
        assert_eq!(show("\"abc\"[-1]"), "c");
    }

    #[test]
    fn containers_are_shared_by_reference() {
        assert_eq!(run("let a = [1]\nlet b = a\nb.push(2)\na.len()"), Value::Number(2.0));
        assert_eq!(show("let r = {}\nfunc fill(x) { x.k = 1 }\nfill(r)\nr"), "{ k: 1 }");
    }

    #[test]
    fn member_and_index_assignment() {
        assert_eq!(show("let r = {a: 1}\nr.b = 2\nr[\"c\"] = 3\nr.a += 10\nr"), "{ a: 11, b: 2, c: 3 }");
        assert_eq!(show("let xs = [1, 2]\nxs[0] += 10\nxs[-1] = 0\nxs"), "[11, 0]");
        assert_eq!(run_err("let xs = [1]\nxs[5] = 1").kind, FaultKind::IndexOutOfRange);
    }

    #[test]
    fn optional_member_and_coalesce() {
        assert_eq!(show("let r = nil\nr?.name ?? \"anon\""), "anon");
        assert_eq!(show("let r = {name: \"ada\"}\nr?.name ?? \"anon\""), "ada");
        assert_eq!(run("let r = nil\nr?.greet()"), Value::Nil);
        assert_eq!(run("0 ?? 5"), Value::Number(0.0));
    }

    #[test]
    fn logical_operators_yield_the_deciding_operand() {
        assert_eq!(show("nil || \"d\""), "d");
        assert_eq!(run("0 && missing"), Value::Number(0.0));
        assert_eq!(run("1 || missing"), Value::Number(1.0));
    }
}

mod builtins {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn array_pipeline() {
        assert_eq!(show("[1, 2, 3, 4].filter(x => x % 2 == 0).map(x => x * 10).join(\"-\")"), "20-40");
        assert_eq!(show("[\"a\", \"b\"].map((x, i) => x + i)"), r#"["a0", "b1"]"#);
    }

    #[test]
    fn reduce_with_and_without_initial_value() {
        assert_eq!(run("[1, 2, 3].reduce((a, b) => a + b)"), Value::Number(6.0));
        assert_eq!(run("[1, 2, 3].reduce((a, b) => a + b, 10)"), Value::Number(16.0));
        assert_eq!(run_err("[].reduce((a, b) => a + b)").kind, FaultKind::TypeMismatch);
    }

    #[test]
    fn searching() {
        assert_eq!(run("[5, 6, 7].index_of(6)"), Value::Number(1.0));
        assert_eq!(run("[5, 6, 7].index_of(9)"), Value::Number(-1.0));
        assert_eq!(run("[5, 6, 7].contains(7)"), Value::Bool(true));
        assert_eq!(run("[5, 6, 7].find(x => x > 5)"), Value::Number(6.0));
        assert_eq!(run("[5, 6, 7].find(x => x > 9)"), Value::Nil);
    }

    #[test]
    fn slicing_and_reversing_copy() {
        assert_eq!(show("[5, 6, 7].slice(1)"), "[6, 7]");
        assert_eq!(show("[5, 6, 7].slice(-2, -1)"), "[6]");
        assert_eq!(show("[5, 6, 7].slice(2, 1)"), "[]");
        assert_eq!(show("let xs = [1, 2]\nlet ys = xs.reverse()\n[xs, ys]"), "[[1, 2], [2, 1]]");
    }

    #[test]
    fn push_pop_and_lengths() {
        assert_eq!(show("let xs = []\nxs.push(1, 2)\n[xs.pop(), xs.len(), xs.size(), xs.length()]"), "[2, 1, 1, 1]");
        assert_eq!(run("[].pop()"), Value::Nil);
    }

    #[test]
    fn each_visits_in_order() {
        assert_eq!(show("let out = []\n[1, 2].each(x => out.push(x * 3))\nout"), "[3, 6]");
    }

    #[test]
    fn callback_must_be_callable() {
        let fault = run_err("[1].map(3)");
        assert_eq!(fault.kind, FaultKind::TypeMismatch);
        assert_eq!(fault.message, "`map` expects a function, got number");
    }

    #[test]
    fn string_members() {
        assert_eq!(show("\"  Hi There \".trim().lower().split(\" \")"), r#"["hi", "there"]"#);
        assert_eq!(show("\"a,b,,c\".split(\",\")"), r#"["a", "b", "", "c"]"#);
        assert_eq!(show("\"abc\".split(\"\")"), r#"["a", "b", "c"]"#);
        assert_eq!(show("\"abc\".upper()"), "ABC");
        assert_eq!(run("\"héllo\".len()"), Value::Number(5.0));
        assert_eq!(
            show("let s = \"rill lang\"\n[s.contains(\"ll\"), s.starts_with(\"ri\"), s.ends_with(\"x\")]"),
            "[true, true, false]"
        );
    }

    #[test]
    fn unknown_member_faults() {
        assert_eq!(run_err("[].shuffle()").message, "array has no member `shuffle`");
        assert_eq!(run_err("\"x\".reverse()").kind, FaultKind::KeyNotFound);
    }
}

mod literals {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spread_in_arrays_calls_and_records() {
        assert_eq!(show("let xs = [2, 3]\n[1, ...xs, 4]"), "[1, 2, 3, 4]");
        assert_eq!(run("let xs = [2, 3]\nfunc f(a, b, c) { return a + b + c }\nf(...xs, 10)"), Value::Number(15.0));
        assert_eq!(show("let base = {a: 1, b: 1}\nlet m = {...base, b: 2}\nm"), "{ a: 1, b: 2 }");
        assert_eq!(show("[...\"hi\"]"), r#"["h", "i"]"#);
        assert_eq!(run_err("[...3]").kind, FaultKind::TypeMismatch);
    }

    #[test]
    fn records_written_one_entry_per_line() {
        let src = "let cfg = {
  name: \"rill\"
  depth: 2
  tags: [\"a\", \"b\"]
}
cfg.name + cfg.depth + cfg.tags.len()";
        assert_eq!(show(src), "rill22");
    }

    #[test]
    fn computed_and_shorthand_record_keys() {
        assert_eq!(show("let k = \"dyn\"\nlet name = 1\nlet r = {[k]: 2, name, \"q k\": 3}\nr"), r#"{ dyn: 2, name: 1, q k: 3 }"#);
    }

    #[test]
    fn template_strings_display_each_hole() {
        assert_eq!(show("let a = 1, b = 2\n`sum: ${a + b}, list: ${[a, b]}!`"), "sum: 3, list: [1, 2]!");
    }

    #[test]
    fn plus_concatenates_and_appends() {
        assert_eq!(show("\"n=\" + 3"), "n=3");
        assert_eq!(show("[1] + [2, 3]"), "[1, 2, 3]");
        assert_eq!(show("[1] + 2"), "[1, 2]");
    }

    #[test]
    fn arithmetic_faults() {
        assert_eq!(run_err("1 / 0").kind, FaultKind::DivisionByZero);
        assert_eq!(run_err("1 % 0").message, "modulo by zero");
        assert_eq!(run_err("\"a\" - 1").kind, FaultKind::TypeMismatch);
    }

    #[test]
    fn destructuring() {
        assert_eq!(run("let [a, _, c] = [1, 2, 3]\na + c"), Value::Number(4.0));
        assert_eq!(run("let [a, b] = [1]\nb"), Value::Nil);
        assert_eq!(run("let {x, y} = {x: 1, y: 2}\nx * 10 + y"), Value::Number(12.0));
        assert_eq!(run_err("const [a] = [1]\na = 2").kind, FaultKind::ImmutableBinding);
        assert_eq!(run_err("let [a] = 5").kind, FaultKind::TypeMismatch);
    }
}

mod comprehensions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn array_comprehension_with_filter() {
        assert_eq!(show("[x * x for x in [1, 2, 3, 4] if x > 1]"), "[4, 9, 16]");
    }

    #[test]
    fn nested_for_clauses() {
        assert_eq!(show("[[a, b] for a in [1, 2] for b in [\"x\", \"y\"]]"), r#"[[1, "x"], [1, "y"], [2, "x"], [2, "y"]]"#);
    }

    #[test]
    fn record_comprehension() {
        assert_eq!(show("let prices = {a: 1, b: 2}\nlet doubled = {k: prices[k] * 2 for k in prices}\ndoubled"), "{ a: 2, b: 4 }");
    }

    #[test]
    fn comprehension_bindings_do_not_leak() {
        assert_eq!(run_err("let ys = [x for x in [1]]\nx").kind, FaultKind::UndeclaredVariable);
    }
}

mod matching {
    use super::*;
    use pretty_assertions::assert_eq;

    const CLASSIFY: &str = "func classify(v) {
  return match v {
    case 0 => \"zero\"
    case -1 => \"minus one\"
    case [first, ...rest] => `list of ${rest.len() + 1} from ${first}`
    case {kind: \"dot\", x} => `dot at ${x}`
    case nil => \"nothing\"
    case n if n == 500 => \"big\"
    case _ => \"other\"
  }
}
";

    fn classify(arg: &str) -> String {
        show(&format!("{CLASSIFY}classify({arg})"))
    }

    #[test]
    fn arms_are_tried_in_order() {
        assert_eq!(classify("0"), "zero");
        assert_eq!(classify("-1"), "minus one");
        assert_eq!(classify("500"), "big");
        assert_eq!(classify("7"), "other");
        assert_eq!(classify("nil"), "nothing");
    }

    #[test]
    fn structural_arms_bind_parts() {
        assert_eq!(classify("[9, 8, 7]"), "list of 3 from 9");
        assert_eq!(classify("{kind: \"dot\", x: 4}"), "dot at 4");
        assert_eq!(classify("{kind: \"box\", x: 4}"), "other");
        assert_eq!(classify("[]"), "other");
    }

    #[test]
    fn no_matching_arm_faults() {
        let fault = run_err("match 3 { case 1 => 1 }");
        assert_eq!(fault.kind, FaultKind::NoMatch);
        assert_eq!(fault.message, "no match arm accepts 3");
    }
}
