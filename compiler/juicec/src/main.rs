//! Juice Compiler CLI

use std::path::{Path, PathBuf};

use juice_diagnostic::emitter::ColorMode;
use juicec::commands::{
    build_entry, explain_error, lex_file, parse_file, print_prelude, resolve_color,
};
use juicec::graph::BuildOptions;
use juicec::DriverError;

fn main() {
    juice_compiler::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let mut color = ColorMode::Auto;
    let mut rest = Vec::new();
    for arg in &args[2..] {
        if let Some(value) = arg.strip_prefix("--color=") {
            let Some(mode) = ColorMode::from_flag(value) else {
                eprintln!("error: invalid color mode '{value}'");
                eprintln!("Valid modes: auto, always, never");
                std::process::exit(1);
            };
            color = mode;
        } else {
            rest.push(arg.as_str());
        }
    }
    let color = resolve_color(color);

    let command = &args[1];
    let result = match command.as_str() {
        "build" => {
            if rest.is_empty() {
                eprintln!("Usage: juice build <file.juice> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --namespace=<ns>    Namespace of constructor tags (default: main)");
                eprintln!("  -o <dir>            Output directory (default: out)");
                eprintln!("  --no-prelude        Do not write prelude.js");
                std::process::exit(1);
            }

            // -o needs lookahead
            let mut options = BuildOptions::default();
            let mut entry = None;
            let mut i = 0;
            while i < rest.len() {
                let arg = rest[i];
                if arg == "-o" && i + 1 < rest.len() {
                    options.out_dir = PathBuf::from(rest[i + 1]);
                    i += 2;
                    continue;
                }
                if let Some(namespace) = arg.strip_prefix("--namespace=") {
                    options.namespace = namespace.to_string();
                } else if arg == "--no-prelude" {
                    options.prelude = false;
                } else if !arg.starts_with('-') && entry.is_none() {
                    entry = Some(arg);
                } else {
                    eprintln!("error: unexpected argument '{arg}'");
                    std::process::exit(1);
                }
                i += 1;
            }

            let Some(entry) = entry else {
                eprintln!("error: missing file path");
                eprintln!("Usage: juice build <file.juice> [options]");
                std::process::exit(1);
            };
            build_entry(Path::new(entry), &options, color)
        }
        "lex" => match rest.first() {
            Some(path) => lex_file(Path::new(path), color),
            None => {
                eprintln!("Usage: juice lex <file.juice>");
                std::process::exit(1);
            }
        },
        "parse" => match rest.first() {
            Some(path) => parse_file(Path::new(path), color),
            None => {
                eprintln!("Usage: juice parse <file.juice>");
                std::process::exit(1);
            }
        },
        "prelude" => {
            print_prelude();
            Ok(())
        }
        "--explain" | "explain" => match rest.first() {
            Some(code) => explain_error(code),
            None => {
                eprintln!("Usage: juice explain <ERROR_CODE>");
                eprintln!("Example: juice explain E1001");
                std::process::exit(1);
            }
        },
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("Juice Compiler {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            // A bare source path builds it
            if Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("juice"))
            {
                build_entry(Path::new(command), &BuildOptions::default(), color)
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    };

    if let Err(err) = result {
        exit_with(&err);
    }
}

fn exit_with(err: &DriverError) -> ! {
    eprintln!("error: {err}");
    if matches!(err, DriverError::UnknownErrorCode(_)) {
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("Examples: E0001, E1001, E5001");
    }
    std::process::exit(1);
}

fn print_usage() {
    println!("Juice Compiler");
    println!();
    println!("Usage: juice <command> [options]");
    println!();
    println!("Commands:");
    println!("  build <file.juice>   Compile a program and its imports to JavaScript");
    println!("  lex <file.juice>     Tokenize and display tokens");
    println!("  parse <file.juice>   Parse and print the program back");
    println!("  prelude              Print the JavaScript runtime prelude");
    println!("  explain <code>       Explain an error code (e.g., E1001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Build options:");
    println!("  --namespace=<ns>    Namespace of constructor tags (default: main)");
    println!("  -o <dir>            Output directory (default: out)");
    println!("  --no-prelude        Do not write prelude.js");
    println!();
    println!("Global options:");
    println!("  --color=<mode>      Diagnostics color: auto, always, never");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=juice_parse=debug   Enable tracing output");
    println!("  JUICE_LOG_TREE=1             Print spans as a tree");
    println!();
    println!("Examples:");
    println!("  juice build main.juice");
    println!("  juice build main.juice -o dist --namespace=dev.app");
    println!("  juice main.juice                # Same as `juice build main.juice`");
    println!("  juice explain E5002");
}
