use derive_more::Display;

use crate::token_kind::TokenKind;

/// A single lexical atom: its kind, the exact source text it matched, the
/// canonical literal form of the value it denotes (or `"null"` if it denotes
/// none), and the line it began on.
#[derive(Debug, Clone, Display)]
#[display(fmt = "{:?} {} {}", kind, lexeme, literal)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, literal: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: literal.into(),
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::EOF, "", "null", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_prints_two_spaces_before_null() {
        let tok = Token::eof(3);
        assert_eq!(tok.to_string(), "EOF  null");
    }

    #[test]
    fn number_token_prints_kind_lexeme_literal() {
        let tok = Token::new(TokenKind::NUMBER, "72", "72.0", 1);
        assert_eq!(tok.to_string(), "NUMBER 72 72.0");
    }
}
