//! Core parser tests.
//!
//! Most assertions compare the rendered tree, which parenthesizes every
//! binary expression, so nesting is visible in one string.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use juice_diagnostic::ErrorCode;
use juice_ir::{
    ElseBranch, ExprKind, ForIterable, StatementKind, TypeDefinition, TypeExprKind,
};
use pretty_assertions::assert_eq;

use crate::{parse, ErrorContext, ParseError};

fn render(source: &str) -> String {
    parse(source).unwrap().to_string()
}

fn statements(source: &str) -> Vec<StatementKind> {
    let mut body: Vec<_> = parse(source)
        .unwrap()
        .body
        .into_iter()
        .map(|statement| statement.kind)
        .collect();
    assert_eq!(body.pop(), Some(StatementKind::Eof));
    body
}

fn single(source: &str) -> StatementKind {
    let mut body = statements(source);
    assert_eq!(body.len(), 1, "expected one statement in {source:?}");
    body.remove(0)
}

fn error(source: &str) -> ParseError {
    parse(source).unwrap_err()
}

// Operators

#[test]
fn test_equal_precedence_associates_left() {
    assert_eq!(render("1 - 2 - 3"), "((1 - 2) - 3)");
    assert_eq!(render("a / b * c % d"), "(((a / b) * c) % d)");
}

#[test]
fn test_higher_precedence_nests_deeper() {
    assert_eq!(render("1 + 2 * 3 - 4 / 5"), "((1 + (2 * 3)) - (4 / 5))");
    assert_eq!(render("a || b && c == d + e"), "((a || b) && (c == (d + e)))");
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(render("(1 + 2) * 3"), "((1 + 2) * 3)");
}

#[test]
fn test_reassignment_binds_loosest() {
    assert_eq!(render("x = y || z"), "(x = (y || z))");
    assert_eq!(render("p.x = p.x + 1"), "(p.x = (p.x + 1))");
}

#[test]
fn test_reassignment_associates_right() {
    assert_eq!(render("a = b = c"), "(a = (b = c))");
    assert_eq!(render("a = b.c = 1 + 2"), "(a = (b.c = (1 + 2)))");
}

#[test]
fn test_logical_operators_share_a_level() {
    assert_eq!(render("a && b || c"), "((a && b) || c)");
    assert_eq!(render("a || b && c"), "((a || b) && c)");
}

#[test]
fn test_prefix_and_postfix_operators() {
    assert_eq!(render("!(!done)"), "!(!done)");
    assert_eq!(render("x := -1"), "x := -1");
    assert_eq!(render("i++"), "i++");
    assert_eq!(render("n-- + 1"), "(n-- + 1)");
}

// Calls and members

#[test]
fn test_call_requires_adjacent_paren() {
    let StatementKind::Expression(call) = single("f(x)") else {
        panic!("expected an expression statement");
    };
    assert!(matches!(call.kind, ExprKind::Call { .. }));

    assert_eq!(render("f (x)"), "f\nx");
}

#[test]
fn test_call_arguments() {
    assert_eq!(render("f(a, b: 2,)"), "f(a, b: 2)");
    assert_eq!(render("f()()"), "f()()");
    assert_eq!(render("obj.method(1).next"), "obj.method(1).next");
}

#[test]
fn test_unwrap_is_postfix() {
    assert_eq!(render("x := read(path)?"), "x := read(path)?");
    let StatementKind::Assignment(assignment) = single("x := read()?") else {
        panic!("expected a binding");
    };
    assert!(matches!(assignment.value.kind, ExprKind::Unwrap(_)));
}

#[test]
fn test_member_names() {
    assert_eq!(render("a.\"b c\""), "a.\"b c\"");
    assert_eq!(render("a.${k}"), "a.${k}");
    assert_eq!(render("a.prefix${k}"), "a.prefix${k}");
    assert_eq!(render("a.type"), "a.type");
}

// Literals

#[test]
fn test_brace_is_record_or_block() {
    let StatementKind::Assignment(record) = single("x := { a: 1, b: 2 }") else {
        panic!("expected a binding");
    };
    assert!(matches!(record.value.kind, ExprKind::Record(ref entries) if entries.len() == 2));

    let StatementKind::Assignment(empty) = single("x := {}") else {
        panic!("expected a binding");
    };
    assert_eq!(empty.value.kind, ExprKind::Record(Vec::new()));

    let StatementKind::Assignment(block) = single("x := { y: $int = 1 }") else {
        panic!("expected a binding");
    };
    assert!(matches!(block.value.kind, ExprKind::Block(_)));
}

#[test]
fn test_record_entries_may_be_newline_separated() {
    assert_eq!(
        render("x := {\n  a: 1\n  \"b\": [1, 2]\n  3: f(x)\n}"),
        "x := { a: 1, \"b\": [1, 2], 3: f(x) }"
    );
}

#[test]
fn test_lists_and_tuples() {
    assert_eq!(render("[1, 2,]"), "[1, 2]");
    assert_eq!(render("[]"), "[]");
    assert_eq!(render("()"), "()");
    assert_eq!(render("(1,)"), "(1,)");
    assert_eq!(render("(a, b)"), "(a, b)");
    assert_eq!(render("(a)"), "a");
}

#[test]
fn test_string_interpolation_is_parsed() {
    assert_eq!(render("s := \"a${b + 1}c\""), "s := \"a${(b + 1)}c\"");
}

#[test]
fn test_computed_identifier() {
    assert_eq!(render("x := key${n}_name"), "x := key${n}_name");
}

#[test]
fn test_macro_call_with_args_and_body() {
    let StatementKind::Expression(expr) = single("js!(a, b) { console.log(a) }") else {
        panic!("expected an expression statement");
    };
    let ExprKind::MacroCall(call) = expr.kind else {
        panic!("expected a macro call");
    };
    assert_eq!(call.name, "js");
    assert_eq!(call.args.map(|args| args.len()), Some(2));
    assert_eq!(call.body.as_deref(), Some(" console.log(a) "));
}

// Statements

#[test]
fn test_typed_binding() {
    assert_eq!(render("x: $int = 5"), "x: $int = 5");
    let StatementKind::Assignment(untyped) = single("x: = 5") else {
        panic!("expected a binding");
    };
    assert!(untyped.annotation.is_none());
}

#[test]
fn test_destructuring_binding() {
    assert_eq!(render("[a, b] := pair"), "[a, b] := pair");
    assert_eq!(render("(a, b) := pair"), "(a, b) := pair");
}

#[test]
fn test_type_declaration_with_constructors() {
    let StatementKind::TypeAssignment(decl) = single("$result := { ok(value) error(value: $str) }")
    else {
        panic!("expected a type declaration");
    };
    assert_eq!(decl.name, "result");
    let TypeDefinition::Constructors(ctors) = decl.definition else {
        panic!("expected constructors");
    };
    let names: Vec<_> = ctors.iter().map(|ctor| ctor.name.as_str()).collect();
    assert_eq!(names, ["ok", "error"]);
    assert!(ctors[1].fields[0].ty.is_some());
    assert!(!ctors[0].is_shorthand);
}

#[test]
fn test_bare_names_beside_constructors_have_no_fields() {
    let StatementKind::TypeAssignment(decl) = single("$option() := { some(value), none }") else {
        panic!("expected a type declaration");
    };
    let TypeDefinition::Constructors(ctors) = decl.definition else {
        panic!("expected constructors");
    };
    assert_eq!(ctors.len(), 2);
    assert!(ctors[1].fields.is_empty());
}

#[test]
fn test_shorthand_type_declaration() {
    let StatementKind::TypeAssignment(decl) = single("type point := { x, y: $int }") else {
        panic!("expected a type declaration");
    };
    let TypeDefinition::Constructors(ctors) = decl.definition else {
        panic!("expected constructors");
    };
    assert_eq!(ctors.len(), 1);
    assert!(ctors[0].is_shorthand);
    assert_eq!(ctors[0].name, "point");
    assert_eq!(ctors[0].fields.len(), 2);

    assert_eq!(render("$unit := {}"), "$unit := {}");
}

#[test]
fn test_type_alias() {
    let StatementKind::TypeAssignment(decl) = single("$num := $int | $float & $big") else {
        panic!("expected a type declaration");
    };
    let TypeDefinition::Alias(ty) = decl.definition else {
        panic!("expected an alias");
    };
    assert!(matches!(ty.kind, TypeExprKind::Binary { .. }));
    assert_eq!(ty.to_string(), "$int | $float & $big");
    assert_eq!(render("$pair := ($a, $list($b))"), "$pair := ($a, $list($b))");
}

#[test]
fn test_named_function() {
    assert_eq!(
        render("fn add(a, b: $int, c = 1) -> $int { return a + b }"),
        "fn add(a, b: $int, c = 1) -> $int {\nreturn (a + b)\n}"
    );
    assert_eq!(render("async fn run() {}"), "async fn run() {}");
}

#[test]
fn test_anonymous_function_is_a_value() {
    let StatementKind::Assignment(assignment) = single("f := fn(x) { x }") else {
        panic!("expected a binding");
    };
    assert!(matches!(assignment.value.kind, ExprKind::Function(_)));
}

#[test]
fn test_macro_declaration() {
    let StatementKind::Function(function) = single("fn js!(code, args) { raw text }") else {
        panic!("expected a function");
    };
    assert!(function.is_macro);
    assert_eq!(function.params.len(), 2);
    assert!(function.body.statements.is_empty());
}

#[test]
fn test_return_value_must_share_the_line() {
    let StatementKind::Function(function) = single("fn f() {\n  return\n  g()\n}") else {
        panic!("expected a function");
    };
    assert_eq!(function.body.statements[0].kind, StatementKind::Return(None));
    assert_eq!(function.body.statements.len(), 2);
    assert_eq!(render("fn f() { return 1 }"), "fn f() {\nreturn 1\n}");
}

#[test]
fn test_if_else_chain() {
    let StatementKind::If(if_node) = single("if a { x } else if b { y } else { z }") else {
        panic!("expected an if");
    };
    let Some(ElseBranch::If(next)) = if_node.else_branch else {
        panic!("expected else if");
    };
    assert!(matches!(next.else_branch, Some(ElseBranch::Block(_))));
}

#[test]
fn test_else_after_newline_continues_the_chain() {
    let StatementKind::If(if_node) = single("if a {\n  x\n}\nelse {\n  y\n}") else {
        panic!("expected an if");
    };
    assert!(if_node.else_branch.is_some());
}

#[test]
fn test_blank_line_ends_the_if_chain() {
    let err = error("if a {\n  x\n}\n\nelse {\n  y\n}");
    assert_eq!(err.code, ErrorCode::E1002);
    assert_eq!(err.message, "expected an expression, found keyword `else`");
}

#[test]
fn test_for_shapes() {
    let shapes: Vec<_> = [
        "for { break }",
        "for items { }",
        "for item of items { }",
        "for i of 0..10 { }",
        "for 10..0 { }",
    ]
    .iter()
    .map(|source| {
        let StatementKind::For(for_node) = single(source) else {
            panic!("expected a for loop");
        };
        let iterable = match for_node.iterable {
            None => "none",
            Some(ForIterable::Expr(_)) => "expr",
            Some(ForIterable::Range(_)) => "range",
        };
        (for_node.binding.is_some(), iterable)
    })
    .collect();
    assert_eq!(
        shapes,
        [
            (false, "none"),
            (false, "expr"),
            (true, "expr"),
            (true, "range"),
            (false, "range"),
        ]
    );
}

#[test]
fn test_impl_block() {
    let StatementKind::Impl(impl_node) =
        single("impl $show for point {\n  fn show() { self.x }\n  static fn origin() {}\n}")
    else {
        panic!("expected an impl");
    };
    assert_eq!(impl_node.trait_name.as_deref(), Some("show"));
    assert_eq!(impl_node.methods.len(), 2);
    assert!(impl_node.methods[1].is_static);
}

#[test]
fn test_match_with_fallback() {
    let StatementKind::Match(match_node) =
        single("match r {\n  ok(v) { v }\n  error(e) { e }\n  else { 0 }\n}")
    else {
        panic!("expected a match");
    };
    assert_eq!(match_node.arms.len(), 2);
    assert!(match_node.fallback.is_some());
    assert!(matches!(match_node.arms[0].pattern.kind, ExprKind::Call { .. }));
}

#[test]
fn test_match_as_value() {
    let StatementKind::Assignment(assignment) = single("x := match n { 1 { a } else { b } }")
    else {
        panic!("expected a binding");
    };
    assert!(matches!(assignment.value.kind, ExprKind::Match(_)));
}

#[test]
fn test_import_and_export() {
    assert_eq!(
        render("import foreign internal a.b.c as d (x, y)"),
        "import foreign internal a.b.c as d (x, y)"
    );
    let StatementKind::Export(inner) = single("export x := 1") else {
        panic!("expected an export");
    };
    assert!(matches!(inner.kind, StatementKind::Assignment(_)));
}

#[test]
fn test_statements_need_no_terminators() {
    assert_eq!(statements("a := 1 b := 2\nc()").len(), 3);
}

#[test]
fn test_program_span_covers_input() {
    let program = parse("x := 1\n").unwrap();
    assert_eq!(program.span.start.offset, 0);
    assert_eq!(program.span.end.offset, 7);
}

// Errors

#[test]
fn test_unexpected_token() {
    let err = error("x := (1 2)");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.message, "expected `)`, found number `2`");
    assert_eq!(err.context, Some(ErrorContext::Tuple));
}

#[test]
fn test_expected_expression() {
    assert_eq!(error("x := )").code, ErrorCode::E1002);
}

#[test]
fn test_unclosed_delimiter_points_at_opener() {
    let err = error("f(1, 2");
    assert_eq!(err.code, ErrorCode::E1003);
    let (related, label) = err.related.unwrap();
    assert_eq!(related.start.offset, 1);
    assert_eq!(label, "opened here");
}

#[test]
fn test_statement_in_value_position() {
    assert_eq!(error("f(x := 1)").code, ErrorCode::E1004);
    assert_eq!(error("x := for").code, ErrorCode::E1004);
}

#[test]
fn test_invalid_prefix_operator() {
    let err = error("x := -y");
    assert_eq!(err.code, ErrorCode::E1005);
    assert!(err.hint.is_some());
    assert_eq!(error("*x").code, ErrorCode::E1005);
}

#[test]
fn test_malformed_type_declaration() {
    assert_eq!(error("$t := 1").code, ErrorCode::E1006);
    assert_eq!(error("$t := { ok(v) x: $int }").code, ErrorCode::E1006);
}

#[test]
fn test_range_outside_for() {
    assert_eq!(error("x := 1..2").code, ErrorCode::E1007);
}

#[test]
fn test_invalid_binding_target() {
    assert_eq!(error("1 := 2").code, ErrorCode::E1008);
    assert_eq!(error("f() := 2").code, ErrorCode::E1008);
    assert_eq!(error("[a, 1] := pair").code, ErrorCode::E1008);
}

#[test]
fn test_invalid_reassignment_target() {
    assert_eq!(error("(a = b) = c").code, ErrorCode::E1008);
    assert_eq!(error("f() = 1").code, ErrorCode::E1008);
    let err = error("1 + x = 2");
    assert_eq!(err.code, ErrorCode::E1008);
    assert_eq!(err.message, "cannot assign to `(1 + x)`");
}

#[test]
fn test_innermost_context_wins() {
    let err = error("if x {\n  f(\n}");
    assert_eq!(err.context, Some(ErrorContext::CallArguments));
}

#[test]
fn test_bad_interpolation_reports_context() {
    let err = error("s := \"${}\"");
    assert_eq!(err.context, Some(ErrorContext::Interpolation));
}

#[test]
fn test_lex_errors_pass_through() {
    let err = error("x := 1;");
    assert_eq!(err.code, ErrorCode::E0002);
    assert!(err.lex_error.is_some());
}
