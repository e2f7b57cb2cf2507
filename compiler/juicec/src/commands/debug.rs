//! Debug commands: `lex` and `parse` for inspecting compiler internals.

use std::path::Path;

use juice_compiler::ErrorPhase;
use juice_diagnostic::emitter::ColorMode;

use super::{read_file, report};
use crate::DriverError;

/// Lex a file and display the token stream.
pub fn lex_file(path: &Path, color: ColorMode) -> Result<(), DriverError> {
    let source = read_file(path)?;
    match juice_lexer::lex(&source) {
        Ok(tokens) => {
            println!("Tokens for '{}' ({} tokens):", path.display(), tokens.len());
            for token in &tokens {
                println!("  {:?} @ {}", token.kind, token.span);
            }
            Ok(())
        }
        Err(err) => {
            report(&source, path, err.to_diagnostic(), color);
            Err(DriverError::Compile(ErrorPhase::Lex))
        }
    }
}

/// Parse a file and print the program back as source.
pub fn parse_file(path: &Path, color: ColorMode) -> Result<(), DriverError> {
    let source = read_file(path)?;
    match juice_parse::parse(&source) {
        Ok(program) => {
            println!("{program}");
            Ok(())
        }
        Err(err) => {
            let phase = if err.lex_error.is_some() {
                ErrorPhase::Lex
            } else {
                ErrorPhase::Parse
            };
            report(&source, path, err.to_diagnostic(), color);
            Err(DriverError::Compile(phase))
        }
    }
}
