#![allow(clippy::unwrap_used, clippy::expect_used)]

use juice_ir::{Keyword, NumberRadix, Operator, Position, StringSegment, Token, TokenKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

/// Lex and drop whitespace, comments and the trailing `Eof`.
fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .unwrap()
        .into_iter()
        .filter(|token| !token.is_trivia() && token.kind != TokenKind::Eof)
        .map(|token| token.kind)
        .collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_string())
}

fn op(op: Operator) -> TokenKind {
    TokenKind::Operator(op)
}

fn number(source: &str) -> NumberLiteral {
    match kinds(source).as_slice() {
        [TokenKind::Number(number)] => number.clone(),
        other => panic!("expected a single number, got {other:?}"),
    }
}

fn segments(source: &str) -> Vec<StringSegment> {
    match kinds(source).as_slice() {
        [TokenKind::String(segments)] => segments.clone(),
        other => panic!("expected a single string, got {other:?}"),
    }
}

fn raw_texts(segments: &[StringSegment]) -> Vec<String> {
    segments
        .iter()
        .filter_map(|segment| match segment {
            StringSegment::Raw { text, .. } => Some(text.clone()),
            StringSegment::Interpolation { .. } => None,
        })
        .collect()
}

// Identifiers and keywords

#[test]
fn test_plain_and_prime_identifiers() {
    assert_eq!(
        kinds("hello x_1 _private x' fn'"),
        vec![ident("hello"), ident("x_1"), ident("_private"), ident("x'"), ident("fn'")]
    );
}

#[test]
fn test_keywords_and_booleans() {
    assert_eq!(
        kinds("fn import true false match"),
        vec![
            TokenKind::Keyword(Keyword::Fn),
            TokenKind::Keyword(Keyword::Import),
            TokenKind::Boolean(true),
            TokenKind::Boolean(false),
            TokenKind::Keyword(Keyword::Match),
        ]
    );
}

#[test]
fn test_type_identifiers() {
    assert_eq!(
        kinds("$point type option"),
        vec![
            TokenKind::TypeIdentifier("point".to_string()),
            TokenKind::Keyword(Keyword::Type),
            TokenKind::TypeIdentifier("option".to_string()),
        ]
    );
}

#[test]
fn test_bare_sigil_is_an_error() {
    let err = lex("x := $ 1").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::MissingTypeName);
    assert_eq!(err.span.start, Position::new(5, 1, 6));
}

#[test]
fn test_macro_identifier_versus_not_equal() {
    assert_eq!(
        kinds("x!=y"),
        vec![ident("x"), op(Operator::BangEq), ident("y")]
    );
    assert_eq!(
        kinds("debug!"),
        vec![TokenKind::MacroIdentifier("debug".to_string())]
    );
}

// Numbers

#[test]
fn test_integers_and_floats() {
    let int = number("42");
    assert_eq!((int.value, int.radix), (42.0, NumberRadix::Integer));

    let float = number("3.25");
    assert_eq!((float.value, float.radix), (3.25, NumberRadix::Float));
}

#[test]
fn test_prefixed_numbers() {
    assert_eq!(number("0xff").value, 255.0);
    assert_eq!(number("0o17").value, 15.0);
    assert_eq!(number("0b1010").value, 10.0);
    assert_eq!(number("0b1010").radix, NumberRadix::Binary);
}

#[test]
fn test_prefixed_numbers_past_u64() {
    assert_eq!(number("0x1_0000_0000_0000_0000").value, 18_446_744_073_709_551_616.0);
    assert_eq!(number(&format!("0b1{}", "0".repeat(70))).value, 2f64.powi(70));
    assert_eq!(number("0xffff_ffff_ffff_ffff").value, 18_446_744_073_709_551_616.0);
}

#[test]
fn test_long_number_keeps_raw_text() {
    let long = number("123_456_789.0_1_2_3");
    assert_eq!(long.value, 123_456_789.012_3);
    assert_eq!(long.raw, "123_456_789.0_1_2_3");
    assert_eq!(long.radix, NumberRadix::Float);
}

#[test]
fn test_dot_without_digit_is_member_access() {
    assert_eq!(
        kinds("1.to_string"),
        vec![
            TokenKind::Number(NumberLiteral {
                value: 1.0,
                radix: NumberRadix::Integer,
                raw: "1".to_string(),
            }),
            op(Operator::Dot),
            ident("to_string"),
        ]
    );
}

#[test]
fn test_trailing_underscore_is_not_part_of_number() {
    assert_eq!(number_then_rest("1_"), ("1".to_string(), vec![ident("_")]));
}

fn number_then_rest(source: &str) -> (String, Vec<TokenKind>) {
    let mut all = kinds(source);
    let rest = all.split_off(1);
    match all.remove(0) {
        TokenKind::Number(number) => (number.raw, rest),
        other => panic!("expected number, got {other:?}"),
    }
}

#[test]
fn test_prefix_without_digits_is_invalid() {
    let err = lex("0x").unwrap_err();
    assert_eq!(
        err.kind,
        LexErrorKind::InvalidNumber {
            raw: "0x".to_string()
        }
    );
}

// Strings

#[test]
fn test_plain_string_span_excludes_quotes() {
    let segments = segments("\"hello world\"");
    match segments.as_slice() {
        [StringSegment::Raw { text, span }] => {
            assert_eq!(text, "hello world");
            assert_eq!(span.start, Position::new(1, 1, 2));
            assert_eq!(span.end, Position::new(12, 1, 13));
        }
        other => panic!("unexpected segments {other:?}"),
    }
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        raw_texts(&segments(r#""a\nb\t\"q\" \x41é \q""#)),
        vec!["a\nb\t\"q\" Aé q".to_string()]
    );
}

#[test]
fn test_bad_hex_escape() {
    let err = lex(r#""\xZZ""#).unwrap_err();
    assert_eq!(
        err.kind,
        LexErrorKind::InvalidEscape {
            escape: r"\x".to_string()
        }
    );
    assert!(matches!(err.context, LexErrorContext::InsideString { .. }));
}

#[test]
fn test_interpolation_segments() {
    let segments = segments("\"a\\n${1+1}b\"");
    assert_eq!(segments.len(), 3);
    assert_eq!(raw_texts(&segments), vec!["a\n".to_string(), "b".to_string()]);

    let StringSegment::Interpolation { tokens, .. } = &segments[1] else {
        panic!("expected interpolation, got {:?}", segments[1]);
    };
    let inner: Vec<_> = tokens.iter().map(|token| token.kind.clone()).collect();
    assert_eq!(inner.len(), 3);
    assert_eq!(inner[1], op(Operator::Plus));
}

#[test]
fn test_interpolation_at_end_leaves_empty_segment() {
    let segments = segments("\"hello ${name}\"");
    assert_eq!(raw_texts(&segments), vec!["hello ".to_string(), String::new()]);
}

#[test]
fn test_nested_braces_in_interpolation() {
    let segments = segments("\"${ {a: 1}.a }\"");
    let StringSegment::Interpolation { tokens, .. } = &segments[0] else {
        panic!("expected interpolation first");
    };
    let opens = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::OpenBrace)
        .count();
    let closes = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::CloseBrace)
        .count();
    assert_eq!((opens, closes), (1, 1));
}

#[test]
fn test_block_string_dedents() {
    let source = "\"\n    first\n    | second\n      third\n  \"";
    assert_eq!(
        raw_texts(&segments(source)),
        vec!["first\nsecond\nthird".to_string()]
    );
}

#[test]
fn test_block_string_with_interpolation() {
    let source = "\"\n  a ${x} b\n  c\n\"";
    assert_eq!(
        raw_texts(&segments(source)),
        vec!["a ".to_string(), " b\nc".to_string()]
    );
}

#[test]
fn test_escaped_newline_opens_block_string() {
    let source = r#""\n  a\n  | b\n""#;
    assert_eq!(raw_texts(&segments(source)), vec!["a\nb".to_string()]);
    assert_eq!(raw_texts(&segments(r#""a\n  b""#)), vec!["a\n  b".to_string()]);
}

#[test]
fn test_unterminated_string() {
    let err = lex("x := \"abc").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.span.start, Position::new(5, 1, 6));
}

#[test]
fn test_unterminated_interpolation() {
    let err = lex("\"${x\"").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    let err = lex("a${b").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedInterpolation);
}

// Operators and punctuation

#[test]
fn test_every_operator_lexes() {
    let source = Operator::ALL
        .iter()
        .map(|op| op.as_symbol())
        .collect::<Vec<_>>()
        .join(" ");
    let expected: Vec<_> = Operator::ALL.iter().copied().map(op).collect();
    assert_eq!(kinds(&source), expected);
}

#[test]
fn test_operator_runs_are_greedy() {
    let err = lex("a =- b").unwrap_err();
    assert_eq!(
        err.kind,
        LexErrorKind::InvalidOperator {
            text: "=-".to_string()
        }
    );
}

#[test]
fn test_comment_after_operator() {
    assert_eq!(
        lex("+// note").unwrap()[1].kind,
        TokenKind::Comment(" note".to_string())
    );
}

#[test]
fn test_unexpected_character() {
    let err = lex("x := 1;").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter { found: ';' });
    assert_eq!(err.context, LexErrorContext::TopLevel);
}

// Macros

#[test]
fn test_macro_args_and_body() {
    let all = kinds("js!(a, b) { return a + b; }");
    assert_eq!(all.len(), 3);
    assert_eq!(all[0], TokenKind::MacroIdentifier("js".to_string()));
    let TokenKind::MacroArgs(args) = &all[1] else {
        panic!("expected macro args, got {:?}", all[1]);
    };
    let args: Vec<_> = args
        .iter()
        .filter(|token| !token.is_trivia())
        .map(|token| token.kind.clone())
        .collect();
    assert_eq!(args, vec![ident("a"), op(Operator::Comma), ident("b")]);
    assert_eq!(all[2], TokenKind::MacroBody(" return a + b; ".to_string()));
}

#[test]
fn test_macro_body_balances_and_escapes() {
    assert_eq!(
        kinds(r"js! { if (x) { y } \} }"),
        vec![
            TokenKind::MacroIdentifier("js".to_string()),
            TokenKind::MacroBody(r" if (x) { y } \} ".to_string()),
        ]
    );
}

#[test]
fn test_nested_macro_lookback_is_local() {
    let all = kinds("outer!(inner!(x) {y})");
    let TokenKind::MacroArgs(args) = &all[1] else {
        panic!("expected macro args");
    };
    let kinds: Vec<_> = args
        .iter()
        .filter(|token| !token.is_trivia())
        .map(|token| token.kind.clone())
        .collect();
    assert_eq!(kinds[0], TokenKind::MacroIdentifier("inner".to_string()));
    assert!(matches!(kinds[1], TokenKind::MacroArgs(_)));
    assert_eq!(kinds[2], TokenKind::MacroBody("y".to_string()));
}

#[test]
fn test_unterminated_macro_body() {
    let err = lex("js! { {").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedMacroBody);
}

// Layout

#[test]
fn test_shebang_is_a_comment() {
    let tokens = lex("#!/usr/bin/env juice\nx").unwrap();
    assert_eq!(
        tokens[0].kind,
        TokenKind::Comment("#!/usr/bin/env juice".to_string())
    );
    assert_eq!(tokens[2].kind, ident("x"));
}

#[test]
fn test_eof_position() {
    let tokens = lex("fn").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind, TokenKind::Eof);
    assert_eq!(tokens[1].span.start, Position::new(2, 1, 3));
    assert!(tokens[1].span.is_empty());
}

#[test]
fn test_whitespace_tracks_lines() {
    let tokens = lex("a\n  b").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Whitespace("\n  ".to_string()));
    assert_eq!(tokens[2].span.start, Position::new(4, 2, 3));
}

#[test]
fn test_lex_with_offset() {
    let options = LexOptions {
        offset: 4,
        line: 2,
        column: 1,
    };
    let tokens = lex_with("abc\nxyz", options).unwrap();
    assert_eq!(tokens[0].kind, ident("xyz"));
    assert_eq!(tokens[0].span.start, Position::new(4, 2, 1));
}

// Properties

fn source_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,6}",
        "[0-9]{1,4}(\\.[0-9]{1,3})?",
        "0x[0-9a-f]{1,4}",
        Just("$point".to_string()),
        Just(":=".to_string()),
        Just("+".to_string()),
        Just("==".to_string()),
        Just("->".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("\"str ${x} ing\"".to_string()),
        Just("// note\n".to_string()),
        Just(" ".to_string()),
        Just("\n".to_string()),
    ]
}

fn source_text() -> impl Strategy<Value = String> {
    prop::collection::vec(source_fragment(), 0..24).prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn prop_spans_partition_input(source in source_text()) {
        let Ok(tokens) = lex(&source) else {
            return Ok(());
        };
        let mut offset = 0u32;
        for token in &tokens {
            prop_assert_eq!(token.span.start.offset, offset, "gap before {:?}", token);
            offset = token.span.end.offset;
        }
        prop_assert_eq!(offset as usize, source.len());
        prop_assert_eq!(&tokens.last().map(|t: &Token| t.kind.clone()), &Some(TokenKind::Eof));
    }

    #[test]
    fn prop_number_raw_matches_source(whole in 0u32..1_000_000, frac in proptest::option::of(0u32..1000)) {
        let source = match frac {
            Some(frac) => format!("{whole}.{frac}"),
            None => whole.to_string(),
        };
        let tokens = lex(&source).unwrap();
        let TokenKind::Number(number) = &tokens[0].kind else {
            return Err(TestCaseError::fail("not a number"));
        };
        prop_assert_eq!(&number.raw, &source);
        prop_assert_eq!(number.value, source.parse::<f64>().unwrap());
    }
}
