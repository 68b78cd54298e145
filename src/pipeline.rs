//! Owns one interpreter session: scan, then parse, then (for `evaluate`)
//! walk the tree, draining each stage's diagnostics to the error sink before
//! the next stage starts. Mirrors the orchestration the teacher crate's
//! `Lox::run` performed, generalized to the three separate CLI commands.
use colored::Colorize;

use crate::evaluate::{self, RuntimeError};
use crate::parser::expr::Expr;
use crate::parser::printer;
use crate::parser::Parser;
use crate::scanner::Scanner;
use crate::token::Token;

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_DATA_ERROR: i32 = 65;
pub const EXIT_RUNTIME_ERROR: i32 = 70;

#[derive(Debug, Default)]
pub struct Lox {
    pub had_error: bool,
    pub had_runtime_error: bool,
}

impl Lox {
    pub fn new() -> Self {
        Self::default()
    }

    fn report_syntax_err(&mut self, rendered: &str) {
        self.had_error = true;
        eprintln!("{}: {}", "Syntax Error".red(), rendered.yellow());
    }

    fn report_runtime_err(&mut self, rendered: &str) {
        self.had_runtime_error = true;
        eprintln!("{}: {}", "Runtime Error".red(), rendered.yellow());
    }

    /// Scans `source` and appends the driver-owned EOF token (see
    /// `Scanner::scan_tokens`'s contract: the scanner itself never does).
    pub fn scan(&mut self, source: &str) -> Vec<Token> {
        let (mut tokens, diagnostics) = Scanner::new(source).scan_tokens();
        let eof_line = tokens.last().map_or(1, |t| t.line);
        for d in &diagnostics {
            self.report_syntax_err(&d.to_string());
        }
        tokens.push(Token::eof(eof_line));
        tokens
    }

    pub fn parse(&mut self, tokens: Vec<Token>) -> Option<Expr> {
        let (tree, diagnostics, had_error) = Parser::new(tokens).parse();
        for d in &diagnostics {
            self.report_syntax_err(&d.render());
        }
        if had_error {
            self.had_error = true;
            None
        } else {
            tree
        }
    }

    pub fn tokenize(&mut self, source: &str) -> i32 {
        let tokens = self.scan(source);
        for t in &tokens {
            println!("{t}");
        }
        if self.had_error {
            EXIT_DATA_ERROR
        } else {
            EXIT_OK
        }
    }

    pub fn print_ast(&mut self, source: &str) -> i32 {
        let tokens = self.scan(source);
        if self.had_error {
            return EXIT_DATA_ERROR;
        }
        match self.parse(tokens) {
            Some(tree) => {
                println!("{}", printer::print(&tree));
                EXIT_OK
            }
            None => EXIT_DATA_ERROR,
        }
    }

    pub fn evaluate(&mut self, source: &str) -> i32 {
        let tokens = self.scan(source);
        if self.had_error {
            return EXIT_DATA_ERROR;
        }
        let tree = match self.parse(tokens) {
            Some(tree) => tree,
            None => return EXIT_DATA_ERROR,
        };
        match evaluate::evaluate(&tree) {
            Ok(value) => {
                println!("{value}");
                EXIT_OK
            }
            Err(err) => {
                self.report_runtime_err(&render_runtime_error(&err));
                EXIT_RUNTIME_ERROR
            }
        }
    }
}

fn render_runtime_error(err: &RuntimeError) -> String {
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_reports_unexpected_character() {
        let mut lox = Lox::new();
        let code = lox.tokenize("#72");
        assert_eq!(code, EXIT_DATA_ERROR);
        assert!(lox.had_error);
    }

    #[test]
    fn evaluate_succeeds_on_well_formed_input() {
        let mut lox = Lox::new();
        assert_eq!(lox.evaluate("1 + 2"), EXIT_OK);
        assert!(!lox.had_error);
        assert!(!lox.had_runtime_error);
    }

    #[test]
    fn evaluate_reports_runtime_error() {
        let mut lox = Lox::new();
        assert_eq!(lox.evaluate("1 == \"1\""), EXIT_RUNTIME_ERROR);
        assert!(lox.had_runtime_error);
    }

    #[test]
    fn parse_stage_short_circuits_before_evaluate() {
        let mut lox = Lox::new();
        assert_eq!(lox.evaluate("(1 + 2"), EXIT_DATA_ERROR);
        assert!(lox.had_error);
        assert!(!lox.had_runtime_error);
    }
}
