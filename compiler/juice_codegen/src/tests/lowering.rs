use juice_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::{error, js, js_in};
use crate::{GenerationErrorKind, Generator};

// Expressions

#[test]
fn test_binary_operators_are_parenthesized() {
    assert_eq!(js("x := 1 + 2 * 3"), "let x = (1 + (2 * 3));\n");
    assert_eq!(js("a - b - c"), "((a - b) - c);\n");
}

#[test]
fn test_equality_is_strict() {
    assert_eq!(js("a == b"), "(a === b);\n");
    assert_eq!(js("a != b"), "(a !== b);\n");
}

#[test]
fn test_reassignment() {
    assert_eq!(js("x = x + 1"), "(x = (x + 1));\n");
    assert_eq!(js("a = b = c"), "(a = (b = c));\n");
}

#[test]
fn test_unary_and_postfix() {
    assert_eq!(js("!(!done)"), "(!(!done));\n");
    assert_eq!(js("x := -1"), "let x = (-1);\n");
    assert_eq!(js("i++"), "i++;\n");
}

#[test]
fn test_primed_names_become_valid_identifiers() {
    assert_eq!(js("x := 1\nx' := x + 1"), "let x = 1;\nlet x__prime = (x + 1);\n");
    assert_eq!(js("fn f(a') { a' }"), "function f(a__prime) {\nreturn a__prime;\n}\n");
    assert_eq!(js("for x' of xs { }"), "for (const x__prime of xs) {\n\n}\n");
    assert!(js("import util (id')").contains("import { id__prime } from \"./util.js\";"));
}

#[test]
fn test_negated_base_of_power_is_parenthesized() {
    assert_eq!(js("x := -2 ** 2"), "let x = ((-2) ** 2);\n");
}

#[test]
fn test_literals() {
    assert_eq!(js("x := 0x10"), "let x = 16;\n");
    assert_eq!(js("x := 1.5"), "let x = 1.5;\n");
    assert_eq!(js("x := true"), "let x = true;\n");
    assert_eq!(js("x := [1, 2]"), "let x = [1, 2];\n");
    assert_eq!(js("x := (1, 2)"), "let x = [1, 2];\n");
}

#[test]
fn test_out_of_range_numbers_stay_valid() {
    assert_eq!(
        js("x := 0x1_0000_0000_0000_0000"),
        "let x = 18446744073709551616;\n"
    );
    let huge = format!("x := 1{}", "0".repeat(400));
    assert_eq!(js(&huge), "let x = Infinity;\n");
}

#[test]
fn test_string_segments_become_a_template() {
    assert_eq!(js(r#"s := "a${x}b""#), "let s = `a${x}b`;\n");
    assert_eq!(
        js(r#"s := "sum: ${1 + 1}""#),
        "let s = `sum: ${(1 + 1)}`;\n"
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(js(r#"s := "a\nb""#), "let s = `a\\nb`;\n");
    assert_eq!(js("s := \"a`b\""), "let s = `a\\`b`;\n");
}

#[test]
fn test_member_access_and_calls() {
    assert_eq!(js("a.b.c"), "((a.b).c);\n");
    assert_eq!(js("obj.m(1)"), "(obj.m)(1);\n");
    assert_eq!(js("f(1, x: 2)"), "f(1, 2);\n");
    assert_eq!(js("p.await"), "(await (p));\n");
}

#[test]
fn test_computed_identifier_indexes() {
    assert_eq!(js("a${k}"), "a[k];\n");
    assert_eq!(js("x := key${n}_name"), "let x = key[n]._name;\n");
}

#[test]
fn test_records() {
    assert_eq!(
        js(r#"r := {a: 1, "b c": 2}"#),
        "let r = {a: 1, [`b c`]: 2};\n"
    );
    assert_eq!(js("r := {}"), "let r = {};\n");
}

#[test]
fn test_block_value_returns_last_statement() {
    assert_eq!(
        js("x := {\n  a := 1\n  a + 1\n}"),
        "let x = (() => {\nlet a = 1;\nreturn (a + 1);\n})();\n"
    );
}

#[test]
fn test_js_macro() {
    assert_eq!(
        js("js!(a, b) { console.log(a) }"),
        "((a, b) => {\nconsole.log(a)\n})(a, b);\n"
    );
}

#[test]
fn test_unknown_macro_is_an_error() {
    let err = error("sql!(query)");
    assert_eq!(
        err.kind,
        GenerationErrorKind::UnknownMacro {
            name: "sql".to_string()
        }
    );
    assert_eq!(err.error_code(), ErrorCode::E5002);
    assert_eq!(err.to_string(), "unknown macro `sql!`");
}

// Bindings and functions

#[test]
fn test_bindings() {
    assert_eq!(js("x: $int = 5"), "let x = 5;\n");
    assert_eq!(js("[a, b] := pair"), "let [a, b] = pair;\n");
    assert_eq!(js("a.b := 1"), "(a.b) = 1;\n");
}

#[test]
fn test_function_returns_last_expression() {
    assert_eq!(
        js("fn add(a, b = 1) { a + b }"),
        "function add(a, b = 1) {\nreturn (a + b);\n}\n"
    );
    assert_eq!(
        js("async fn run() { go() }"),
        "async function run() {\nreturn go();\n}\n"
    );
}

#[test]
fn test_function_value() {
    assert_eq!(
        js("f := fn(x) { x }"),
        "let f = function(x) {\nreturn x;\n};\n"
    );
}

#[test]
fn test_explicit_return() {
    assert_eq!(
        js("fn f(a) {\n  return\n}"),
        "function f(a) {\nreturn;\n}\n"
    );
}

#[test]
fn test_macro_declaration_is_not_emitted() {
    assert_eq!(js("fn js!(code, args) { raw text }"), "");
}

// Imports and exports

#[test]
fn test_namespace_import() {
    assert_eq!(
        js("import std.io"),
        "import * as io from \"./std.io.js\";\n"
    );
}

#[test]
fn test_internal_import_with_alias_and_names() {
    assert_eq!(
        js_in("app", "main", "import internal utils as u (a, b)"),
        "import * as u from \"./app.utils.js\";\nimport { a, b } from \"./app.utils.js\";\n"
    );
}

#[test]
fn test_foreign_import() {
    assert_eq!(
        js("import foreign std.env (get)"),
        "import { get } from \"./std.env__foreign.js\";\n"
    );
}

#[test]
fn test_imports_precede_body() {
    assert_eq!(
        js("x := 1\nimport a"),
        "import * as a from \"./a.js\";\n\nlet x = 1;\n"
    );
}

#[test]
fn test_exports() {
    assert_eq!(js("export x := 1"), "export let x = 1;\n");
    assert_eq!(js("export fn f() {}"), "export function f() {\n\n}\n");
}

#[test]
fn test_export_of_expression_is_an_error() {
    let err = error("export f()");
    assert_eq!(err.error_code(), ErrorCode::E5003);
}

#[test]
fn test_generator_resets_between_units() {
    let program = juice_parse::parse("fn f() { g()? }").unwrap();
    let mut generator = Generator::new();
    let first = generator.generate("test", "main", &program).unwrap();
    let second = generator.generate("test", "main", &program).unwrap();
    assert_eq!(first, second);
}
