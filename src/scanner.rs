//! Character-by-character scanner producing a token stream plus scan
//! diagnostics. Never aborts on a bad byte: it records a diagnostic and
//! resumes at the next one.
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use lazy_static::lazy_static;

use crate::diagnostics::ScanDiagnostic;
use crate::token::Token;
use crate::token_kind::TokenKind;

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut m = HashMap::new();
        m.insert("and", TokenKind::AND);
        m.insert("class", TokenKind::CLASS);
        m.insert("else", TokenKind::ELSE);
        m.insert("false", TokenKind::FALSE);
        m.insert("for", TokenKind::FOR);
        m.insert("fun", TokenKind::FUN);
        m.insert("if", TokenKind::IF);
        m.insert("nil", TokenKind::NIL);
        m.insert("or", TokenKind::OR);
        m.insert("return", TokenKind::RETURN);
        m.insert("super", TokenKind::SUPER);
        m.insert("this", TokenKind::THIS);
        m.insert("true", TokenKind::TRUE);
        m.insert("var", TokenKind::VAR);
        m.insert("while", TokenKind::WHILE);
        m
    };
}

pub struct Scanner<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    start: usize,
    current: usize,
    line: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<ScanDiagnostic>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Scans the full source and returns the tokens produced plus any scan
    /// diagnostics. Does not append a trailing EOF token; that is the
    /// driver's job (see `pipeline::scan`), so a `Scanner` can be reused on
    /// bare fragments without fabricating an end marker.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<ScanDiagnostic>) {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_one();
        }
        (self.tokens, self.diagnostics)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.chars.next().expect("advance past end of source");
        self.current += c.len_utf8();
        c
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    fn matches(&mut self, expected: char) -> bool {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.tokens
            .push(Token::new(kind, self.lexeme(), "null", self.line));
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: String) {
        self.tokens
            .push(Token::new(kind, self.lexeme(), literal, self.line));
    }

    fn scan_one(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.add_token(TokenKind::LEFT_PAREN),
            ')' => self.add_token(TokenKind::RIGHT_PAREN),
            '{' => self.add_token(TokenKind::LEFT_BRACE),
            '}' => self.add_token(TokenKind::RIGHT_BRACE),
            ',' => self.add_token(TokenKind::COMMA),
            '.' => self.add_token(TokenKind::DOT),
            '-' => self.add_token(TokenKind::MINUS),
            '+' => self.add_token(TokenKind::PLUS),
            ';' => self.add_token(TokenKind::SEMICOLON),
            '?' => self.add_token(TokenKind::QUESTION),
            ':' => self.add_token(TokenKind::COLON),
            '*' => {
                if self.matches('*') {
                    self.add_token(TokenKind::STAR_STAR)
                } else {
                    self.add_token(TokenKind::STAR)
                }
            }
            '!' => {
                let kind = if self.matches('=') {
                    TokenKind::BANG_EQUAL
                } else {
                    TokenKind::BANG
                };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.matches('=') {
                    TokenKind::EQUAL_EQUAL
                } else {
                    TokenKind::EQUAL
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.matches('=') {
                    TokenKind::LESS_EQUAL
                } else {
                    TokenKind::LESS
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.matches('=') {
                    TokenKind::GREATER_EQUAL
                } else {
                    TokenKind::GREATER
                };
                self.add_token(kind);
            }
            '/' => {
                if self.matches('/') {
                    while self.peek().map_or(false, |c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::SLASH);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.scan_string(),
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' => self.scan_identifier(),
            other => self.diagnostics.push(ScanDiagnostic::UnexpectedCharacter {
                ch: other,
                line: self.line,
            }),
        }
    }

    fn scan_string(&mut self) {
        let start_line = self.line;
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }
        if self.is_at_end() {
            self.diagnostics.push(ScanDiagnostic::UnterminatedString { line: start_line });
            return;
        }
        self.advance(); // closing quote
        let value = self.source[self.start + 1..self.current - 1].to_string();
        self.add_literal_token(TokenKind::STRING, value);
    }

    fn scan_number(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.advance(); // consume the '.'
            while self.peek().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        let value: f64 = self.lexeme().parse().expect("scanned number must parse");
        self.add_literal_token(TokenKind::NUMBER, canonical_number(value));
    }

    fn scan_identifier(&mut self) {
        while self
            .peek()
            .map_or(false, |c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        let text = self.lexeme();
        match KEYWORDS.get(text) {
            Some(kind) => self.add_token(*kind),
            None => self.add_token(TokenKind::IDENTIFIER),
        }
    }
}

/// Formats a number the way literal tokens canonicalize it: shortest
/// round-tripping decimal, always with a decimal point.
pub fn canonical_number(value: f64) -> String {
    let s = format!("{value}");
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Scanner::new(src).scan_tokens().0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn single_char_tokens() {
        assert_eq!(
            kinds("(){},.-+;*"),
            vec![
                TokenKind::LEFT_PAREN,
                TokenKind::RIGHT_PAREN,
                TokenKind::LEFT_BRACE,
                TokenKind::RIGHT_BRACE,
                TokenKind::COMMA,
                TokenKind::DOT,
                TokenKind::MINUS,
                TokenKind::PLUS,
                TokenKind::SEMICOLON,
                TokenKind::STAR,
            ]
        );
    }

    #[test]
    fn comma_is_not_mistaken_for_bracket() {
        assert_eq!(kinds(","), vec![TokenKind::COMMA]);
    }

    #[test]
    fn maximal_munch_pairs() {
        assert_eq!(
            kinds("== != <= >= ** = < > !"),
            vec![
                TokenKind::EQUAL_EQUAL,
                TokenKind::BANG_EQUAL,
                TokenKind::LESS_EQUAL,
                TokenKind::GREATER_EQUAL,
                TokenKind::STAR_STAR,
                TokenKind::EQUAL,
                TokenKind::LESS,
                TokenKind::GREATER,
                TokenKind::BANG,
            ]
        );
    }

    #[test]
    fn line_comment_consumes_to_newline() {
        let (tokens, diags) = Scanner::new("1 // a comment\n2").scan_tokens();
        assert!(diags.is_empty());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn number_literal_is_canonicalized() {
        let (tokens, _) = Scanner::new("42").scan_tokens();
        assert_eq!(tokens[0].literal, "42.0");
        let (tokens, _) = Scanner::new("1200.50").scan_tokens();
        assert_eq!(tokens[0].literal, "1200.5");
    }

    #[test]
    fn trailing_dot_without_digit_is_not_consumed() {
        let (tokens, _) = Scanner::new("72.").scan_tokens();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::NUMBER);
        assert_eq!(tokens[0].literal, "72.0");
        assert_eq!(tokens[1].kind, TokenKind::DOT);
    }

    #[test]
    fn string_literal_strips_quotes() {
        let (tokens, _) = Scanner::new("\"foo bar\"").scan_tokens();
        assert_eq!(tokens[0].kind, TokenKind::STRING);
        assert_eq!(tokens[0].literal, "foo bar");
    }

    #[test]
    fn unterminated_string_is_diagnosed() {
        let (tokens, diags) = Scanner::new("\"abc").scan_tokens();
        assert!(tokens.is_empty());
        assert_eq!(diags, vec![ScanDiagnostic::UnterminatedString { line: 1 }]);
    }

    #[test]
    fn keyword_and_identifier_recognition() {
        assert_eq!(kinds("true false nil foo"), vec![
            TokenKind::TRUE,
            TokenKind::FALSE,
            TokenKind::NIL,
            TokenKind::IDENTIFIER,
        ]);
    }

    #[test]
    fn unexpected_character_is_diagnosed_and_scan_continues() {
        let (tokens, diags) = Scanner::new("#72").scan_tokens();
        assert_eq!(diags, vec![ScanDiagnostic::UnexpectedCharacter { ch: '#', line: 1 }]);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::NUMBER);
    }

    #[test]
    fn no_trailing_eof_from_scanner_alone() {
        let (tokens, _) = Scanner::new("1").scan_tokens();
        assert!(tokens.iter().all(|t| t.kind != TokenKind::EOF));
    }
}
