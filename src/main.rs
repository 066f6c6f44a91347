//! CLI tool to inspect and validate MiniTS source files.

use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: minits <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  check   Check if source file(s) parse");
        eprintln!("  tokens  Print the token sequence of file(s)");
        eprintln!("  tree    Print the syntax tree of file(s)");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  minits check program.mts");
        eprintln!("  minits tokens program.mts");
        eprintln!("  minits tree program.mts");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "check" => match minits::parse_source(&content) {
                Ok(tree) => {
                    let lines = tree.children().len();
                    eprintln!("{path}: valid ({lines} statement(s))");
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            "tokens" => match minits::tokenize(&content) {
                Ok(tokens) => {
                    for token in tokens {
                        println!("{token}");
                    }
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            "tree" => match minits::parse_source(&content) {
                Ok(tree) => {
                    print!("{tree}");
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
