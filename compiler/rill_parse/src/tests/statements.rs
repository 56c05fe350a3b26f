//! Statement parsing tests.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

use pretty_assertions::assert_eq;

use super::dump;
use crate::parse_with_base_dir;

mod declarations {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn let_with_several_bindings() {
        assert_eq!(dump("let a = 1, b, c = a + 1"), "(let a=1 b c=(+ a 1))");
        assert_eq!(dump("var x = 1"), "(let x=1)");
    }

    #[test]
    fn const_binding() {
        assert_eq!(dump("const LIMIT = 10"), "(const LIMIT=10)");
    }

    #[test]
    fn array_destructure_with_holes() {
        assert_eq!(dump("let [a, _, c] = xs"), "(let [a _ c] = xs)");
    }

    #[test]
    fn record_destructure() {
        assert_eq!(dump("const {x, y} = point"), "(const {x y} = point)");
    }

    #[test]
    fn named_function() {
        assert_eq!(
            dump("func add(a, b) {\n  return a + b\n}"),
            "(func add (a b) {(return (+ a b))})"
        );
        assert_eq!(dump("function noop() {}"), "(func noop () {})");
    }

    #[test]
    fn separators_between_statements() {
        assert_eq!(dump("a = 1; b = 2\n\nc = 3"), "(= a 1)\n(= b 2)\n(= c 3)");
    }
}

mod assignment {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_and_compound() {
        assert_eq!(dump("x = 1"), "(= x 1)");
        assert_eq!(dump("x += 2"), "(+= x 2)");
        assert_eq!(dump("x %= 3"), "(%= x 3)");
    }

    #[test]
    fn increment_and_decrement() {
        assert_eq!(dump("i++"), "(+= i 1)");
        assert_eq!(dump("i--"), "(-= i 1)");
    }

    #[test]
    fn member_and_index_targets() {
        assert_eq!(dump("self.count = 0"), "(= (. self count) 0)");
        assert_eq!(dump("grid[i][j] = v"), "(= (index (index grid i) j) v)");
    }
}

mod control_flow {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn if_else_chain() {
        assert_eq!(
            dump("if a { x } else if b { y } else { z }"),
            "(if a {x} else (if b {y} else {z}))"
        );
    }

    #[test]
    fn else_on_following_line() {
        assert_eq!(dump("if a {\n  x\n}\nelse {\n  y\n}"), "(if a {x} else {y})");
    }

    #[test]
    fn if_without_else_leaves_next_statement() {
        assert_eq!(dump("if a { x }\ny"), "(if a {x})\ny");
    }

    #[test]
    fn while_loop() {
        assert_eq!(
            dump("while i < 10 { i++ }"),
            "(while (< i 10) {(+= i 1)})"
        );
    }

    #[test]
    fn classic_for_with_and_without_parens() {
        assert_eq!(
            dump("for (let i = 0; i < n; i++) { sum += i }"),
            "(for (let i=0); (< i n); (+= i 1) {(+= sum i)})"
        );
        assert_eq!(
            dump("for let i = 0; i < n; i += 2 { f(i) }"),
            "(for (let i=0); (< i n); (+= i 2) {(call f i)})"
        );
    }

    #[test]
    fn classic_for_with_empty_clauses() {
        assert_eq!(dump("for (;;) { break }"), "(for _; _; _ {(break)})");
    }

    #[test]
    fn for_in_forms() {
        assert_eq!(dump("for x in xs { f(x) }"), "(for x in xs {(call f x)})");
        assert_eq!(dump("for (k in rec) { continue }"), "(for k in rec {(continue)})");
    }

    #[test]
    fn bare_return() {
        assert_eq!(dump("func f() { return }"), "(func f () {(return)})");
        assert_eq!(dump("func f() { return; }"), "(func f () {(return)})");
    }

    #[test]
    fn nested_block_statement() {
        assert_eq!(dump("{ let a = 1; a }"), "{(let a=1); a}");
    }
}

mod exceptions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn try_catch_finally() {
        assert_eq!(
            dump("try { risky() } catch (e) { log(e) } finally { done() }"),
            "(try {(call risky)} catch e {(call log e)} finally {(call done)})"
        );
    }

    #[test]
    fn catch_binding_forms() {
        assert_eq!(dump("try { a } catch err { b }"), "(try {a} catch err {b})");
        assert_eq!(dump("try { a } catch { b }"), "(try {a} catch $e {b})");
    }

    #[test]
    fn try_finally_only() {
        assert_eq!(dump("try { a }\nfinally { b }"), "(try {a} finally {b})");
    }

    #[test]
    fn throw_expression() {
        assert_eq!(dump("throw {code: 1}"), "(throw {code: 1})");
    }
}

mod classes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fields_and_method_forms() {
        let src = "class Counter {\n  let count = 0\n  let label\n  func inc() { self.count += 1 }\n  method get() { return count }\n  reset() { count = 0 }\n}";
        assert_eq!(
            dump(src),
            "(class Counter (let count=0) (let label) \
             (func inc () {(+= (. self count) 1)}) \
             (func get () {(return count)}) \
             (func reset () {(= count 0)}))"
        );
    }

    #[test]
    fn extends_parent() {
        assert_eq!(
            dump("class Dog extends Animal {\n  speak() { return super.speak() }\n}"),
            "(class Dog : Animal (func speak () {(return (call super.speak))}))"
        );
    }

    #[test]
    fn obj_is_a_class_alias() {
        assert_eq!(dump("obj Point { let x, y }"), "(class Point (let x) (let y))");
    }
}

mod imports {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn import_with_and_without_alias() {
        assert_eq!(dump("import \"lib/math.rl\""), "(import \"lib/math.rl\")");
        assert_eq!(dump("import \"util\" as u"), "(import \"util\" as u)");
    }

    #[test]
    fn base_dir_is_recorded() {
        let program = parse_with_base_dir("import \"a\"", "scripts").unwrap();
        assert_eq!(program.base_dir, "scripts");
        assert_eq!(program.body.len(), 1);
    }
}
