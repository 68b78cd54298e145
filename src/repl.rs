//! Line-editing REPL built on `rustyline`, remembering the last command mode
//! across iterations the way a real shell remembers its last command.
use rustyline::error::ReadlineError;
use rustyline::Editor;

use crate::pipeline::Lox;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Tokenize,
    Parse,
    Evaluate,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Evaluate
    }
}

impl Mode {
    fn from_directive(line: &str) -> Option<Mode> {
        match line {
            ":tokenize" => Some(Mode::Tokenize),
            ":parse" => Some(Mode::Parse),
            ":evaluate" => Some(Mode::Evaluate),
            _ => None,
        }
    }
}

pub fn run() -> rustyline::Result<()> {
    let mut editor = Editor::<()>::new()?;
    let mut mode = Mode::default();
    loop {
        let prompt = match mode {
            Mode::Tokenize => "tokenize> ",
            Mode::Parse => "parse> ",
            Mode::Evaluate => "evaluate> ",
        };
        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line);
                if let Some(new_mode) = Mode::from_directive(line) {
                    mode = new_mode;
                    continue;
                }
                let mut lox = Lox::new();
                let _ = match mode {
                    Mode::Tokenize => lox.tokenize(line),
                    Mode::Parse => lox.print_ast(line),
                    Mode::Evaluate => lox.evaluate(line),
                };
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("readline error: {err}");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_select_mode() {
        assert_eq!(Mode::from_directive(":tokenize"), Some(Mode::Tokenize));
        assert_eq!(Mode::from_directive(":parse"), Some(Mode::Parse));
        assert_eq!(Mode::from_directive(":evaluate"), Some(Mode::Evaluate));
        assert_eq!(Mode::from_directive("1 + 2"), None);
    }

    #[test]
    fn default_mode_is_evaluate() {
        assert_eq!(Mode::default(), Mode::Evaluate);
    }
}
