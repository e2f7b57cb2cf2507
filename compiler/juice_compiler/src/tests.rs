#![allow(clippy::unwrap_used, clippy::expect_used)]

use juice_diagnostic::emitter::ColorMode;
use juice_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use crate::{compile, render_diagnostics, CompileConfig, ErrorPhase};

fn config() -> CompileConfig {
    CompileConfig::default()
        .with_namespace("app")
        .with_module_name("shapes")
        .with_file_path("shapes.juice")
}

#[test]
fn test_default_config() {
    let config = CompileConfig::default();
    assert_eq!(config.namespace, "main");
    assert_eq!(config.module_name, "main");
}

#[test]
fn test_compile_simple_program() {
    let output = compile("x := 1\ny := x * 2", &CompileConfig::default()).unwrap();
    assert_eq!(output.code, "let x = 1;\nlet y = (x * 2);\n");
}

#[test]
fn test_compile_program_with_types_matches_and_methods() {
    let source = r#"
import std.io (print)

$shape := {
  circle(radius)
  rect(width, height)
}

impl $shape {
  fn area(self) {
    match self {
      $shape.circle(r) { 3 * r * r }
      $shape.rect(width: w, height: h) { w * h }
    }
  }
}

export fn describe(s) {
  "area: ${s.area()}"
}
"#;
    let output = compile(source, &config()).unwrap();
    let code = &output.code;

    let import = code.find("import { print } from \"./std.io.js\";").unwrap();
    let types = code.find("const shape = Object.create(null);").unwrap();
    let impls = code.find("shape.prototype.area = function(...__args) {").unwrap();
    let body = code.find("export function describe(s) {").unwrap();
    assert!(import < types && types < impls && impls < body);

    assert!(code.contains("this._type = \"app.shapes@shape#circle\";"));
    assert!(code.contains("shape.rect._params = [\"width\", \"height\"];"));
    assert!(code.contains("let r = __0[(shape.circle)._params[0]];"));
    assert!(code.contains("let w = __0.width;"));
    assert!(code.contains("return `area: ${(s.area)()}`;"));
}

#[test]
fn test_compile_output_lists_imports() {
    let output = compile(
        "import std.io\nimport foreign lib.fs as fs\nx := 1",
        &CompileConfig::default(),
    )
    .unwrap();
    let paths: Vec<String> = output
        .imports()
        .map(|import| import.path.join("."))
        .collect();
    assert_eq!(paths, ["std.io", "lib.fs"]);
}

#[test]
fn test_lex_error_reports_phase() {
    let err = compile("s := \"open", &config()).unwrap_err();
    assert_eq!(err.phase, ErrorPhase::Lex);
    assert_eq!(err.diagnostic.code, ErrorCode::E0001);
}

#[test]
fn test_parse_error_reports_phase() {
    let err = compile("x := (1, 2", &config()).unwrap_err();
    assert_eq!(err.phase, ErrorPhase::Parse);
    assert!(err.diagnostic.code.as_str().starts_with("E1"));
}

#[test]
fn test_generate_error_reports_phase() {
    let err = compile("sql!(query)", &config()).unwrap_err();
    assert_eq!(err.phase, ErrorPhase::Generate);
    assert_eq!(err.diagnostic.code, ErrorCode::E5002);
    assert_eq!(err.to_string(), "generate error E5002: unknown macro `sql!`");
}

#[test]
fn test_render_diagnostics_points_at_source() {
    let source = "x := 1\nsql!(query)";
    let err = compile(source, &config()).unwrap_err();
    let rendered = render_diagnostics(source, "shapes.juice", &[err.diagnostic], ColorMode::Never);
    assert!(rendered.starts_with("error[E5002]: unknown macro `sql!`\n"));
    assert!(rendered.contains(" --> shapes.juice:2:1\n"));
    assert!(rendered.contains("2 | sql!(query)\n"));
    assert!(rendered.contains("= note: `js!` is the only macro the generator implements"));
    assert!(!rendered.contains('\x1b'));
}

#[test]
fn test_render_diagnostics_with_color() {
    let err = compile("sql!(query)", &config()).unwrap_err();
    let rendered = render_diagnostics("sql!(query)", "a.juice", &[err.diagnostic], ColorMode::Always);
    assert!(rendered.contains('\x1b'));
}

#[test]
fn test_units_compile_independently() {
    let a = compile("$unit := {}", &config().with_module_name("a")).unwrap();
    let b = compile("$unit := {}", &config().with_module_name("b")).unwrap();
    assert!(a.code.contains("\"app.a@unit#unit\""));
    assert!(b.code.contains("\"app.b@unit#unit\""));
}
