//! Definitions for token kinds.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LEFT_PAREN,  // (
    RIGHT_PAREN, // )
    LEFT_BRACE,  // {
    RIGHT_BRACE, // }
    COMMA,       // ,
    DOT,         // .
    MINUS,       // -
    PLUS,        // +
    SEMICOLON,   // ;
    SLASH,       // /
    STAR,        // *
    STAR_STAR,   // **
    QUESTION,    // ?
    COLON,       // :

    BANG,          // !
    BANG_EQUAL,    // !=
    EQUAL,         // =
    EQUAL_EQUAL,   // ==
    GREATER,       // >
    GREATER_EQUAL, // >=
    LESS,          // <
    LESS_EQUAL,    // <=

    // Literals
    IDENTIFIER,
    STRING,
    NUMBER,

    // Keywords
    AND,
    CLASS,
    ELSE,
    FALSE,
    FUN,
    FOR,
    IF,
    NIL,
    OR,
    PRINT,
    RETURN,
    SUPER,
    THIS,
    TRUE,
    VAR,
    WHILE,

    EOF,
}

use TokenKind::*;

impl TokenKind {
    pub fn is_literal(&self) -> bool {
        matches!(self, STRING | IDENTIFIER | NUMBER)
    }
}
