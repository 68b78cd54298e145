//! Scan-time diagnostics. Kept as its own small taxonomy, distinct from parse
//! and runtime diagnostics, so a caller can never mistake one stage's error
//! for another's.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScanDiagnostic {
    #[error("[line {line}] Error: Unexpected character: {ch}")]
    UnexpectedCharacter { ch: char, line: usize },

    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: usize },
}

impl ScanDiagnostic {
    pub fn line(&self) -> usize {
        match self {
            ScanDiagnostic::UnexpectedCharacter { line, .. } => *line,
            ScanDiagnostic::UnterminatedString { line } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_character_format() {
        let d = ScanDiagnostic::UnexpectedCharacter { ch: '#', line: 1 };
        assert_eq!(d.to_string(), "[line 1] Error: Unexpected character: #");
    }

    #[test]
    fn unterminated_string_format() {
        let d = ScanDiagnostic::UnterminatedString { line: 4 };
        assert_eq!(d.to_string(), "[line 4] Error: Unterminated string.");
    }
}
