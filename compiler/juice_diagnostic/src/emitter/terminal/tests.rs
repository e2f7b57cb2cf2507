#![allow(clippy::unwrap_used)]

use juice_ir::{Position, Span};
use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message("unexpected `)`")
        .with_label(
            Span::new(Position::new(9, 2, 6), Position::new(10, 2, 7)),
            "not expected here",
        )
        .with_note("the call was already closed")
        .with_suggestion("remove the extra `)`")
}

fn render(emitter: TerminalEmitter<Vec<u8>>, diagnostic: &Diagnostic) -> String {
    let mut emitter = emitter;
    emitter.emit(diagnostic);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn test_terminal_emitter_no_color() {
    let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, true);
    let text = render(emitter, &sample_diagnostic());

    assert!(text.starts_with("error[E1001]: unexpected `)`"));
    assert!(text.contains("not expected here"));
    assert!(text.contains("= note: the call was already closed"));
    assert!(text.contains("= help: remove the extra `)`"));
    assert!(!text.contains("\x1b["));
}

#[test]
fn test_terminal_emitter_with_color() {
    let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    let text = render(emitter, &sample_diagnostic());
    assert!(text.contains("\x1b["));
    assert!(text.contains("E1001"));
}

#[test]
fn test_snippet_points_at_column() {
    let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
        .with_source("main.juice", "x := 1\nf(a))\n");
    let text = render(emitter, &sample_diagnostic());

    let expected = "\
error[E1001]: unexpected `)`
 --> main.juice:2:6
  |
2 | f(a))
  |      ^ not expected here
  = note: the call was already closed
  = help: remove the extra `)`

";
    assert_eq!(text, expected);
}

#[test]
fn test_emit_summary() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_summary(2, 1);
    emitter.emit_summary(1, 0);
    emitter.emit_summary(0, 3);
    emitter.emit_summary(0, 0);
    let text = String::from_utf8(emitter.into_inner()).unwrap();

    assert_eq!(
        text,
        "error: aborting due to 2 previous errors; 1 warning emitted\n\
         error: aborting due to previous error\n\
         warning: 3 warnings emitted\n"
    );
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}

#[test]
fn test_color_mode_from_flag() {
    assert_eq!(ColorMode::from_flag("always"), Some(ColorMode::Always));
    assert_eq!(ColorMode::from_flag("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::from_flag("auto"), Some(ColorMode::Auto));
    assert_eq!(ColorMode::from_flag("sometimes"), None);
}
