//! Hand-rolled `argv` dispatch, grounded in the teacher crate's
//! `src/cli.rs::run_cli`: no argument-parsing crate, since the whole surface
//! is one subcommand plus a file path, or no args at all for the REPL.
use std::fs;

use colored::Colorize;

use crate::pipeline::{Lox, EXIT_OK, EXIT_USAGE};
use crate::repl;

const USAGE: &str = "Usage: rlox tokenize|parse|evaluate <file>";

pub fn run() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        1 => {
            if let Err(e) = repl::run() {
                eprintln!("{} {e}", "REPL error:".red());
                return EXIT_USAGE;
            }
            EXIT_OK
        }
        3 => run_command(&args[1], &args[2]),
        _ => {
            eprintln!("{}", USAGE.yellow());
            EXIT_USAGE
        }
    }
}

fn run_command(command: &str, path: &str) -> i32 {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {e}", format!("Cannot read {path}:").red());
            return EXIT_USAGE;
        }
    };
    let mut lox = Lox::new();
    match command {
        "tokenize" => lox.tokenize(&source),
        "parse" => lox.print_ast(&source),
        "evaluate" => lox.evaluate(&source),
        other => {
            eprintln!("{} {other}", "Unknown command:".red());
            eprintln!("{}", USAGE.yellow());
            EXIT_USAGE
        }
    }
}
