pub mod error;
pub mod expr;
pub mod printer;
pub mod statement;

use better_peekable::{BPeekable, BetterPeekable};

use crate::token::Token;
use crate::token_kind::TokenKind;
use crate::value::Value;
use error::ParseError;
use expr::Expr;

/// Recursive-descent parser with precedence climbing. Diagnostics accumulate
/// rather than abort the parse; `had_error` gates whether the produced tree
/// may be handed to the evaluator.
pub struct Parser {
    tokens: BPeekable<std::vec::IntoIter<Token>>,
    previous: Option<Token>,
    diagnostics: Vec<ParseError>,
    had_error: bool,
}

/// One left-associative binary precedence level: a set of operator kinds and
/// the next-tighter production that parses an operand.
struct BinaryLevel<'a> {
    operators: &'a [TokenKind],
    operand: fn(&mut Parser) -> Result<Expr, ParseError>,
    missing_right: fn(Token) -> ParseError,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter().better_peekable(),
            previous: None,
            diagnostics: Vec::new(),
            had_error: false,
        }
    }

    pub fn parse(mut self) -> (Option<Expr>, Vec<ParseError>, bool) {
        let expr = self.expression();
        let tree = if self.had_error { None } else { expr.ok() };
        (tree, self.diagnostics, self.had_error)
    }

    fn record(&mut self, err: ParseError) {
        self.had_error = true;
        self.diagnostics.push(err);
    }

    fn peek(&mut self) -> Token {
        self.tokens
            .peek()
            .cloned()
            .unwrap_or_else(|| Token::eof(0))
    }

    fn is_at_end(&mut self) -> bool {
        self.peek().kind == TokenKind::EOF
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.next().expect("advance past end of token stream");
        self.previous = Some(tok.clone());
        tok
    }

    fn previous(&mut self) -> Token {
        self.previous
            .clone()
            .expect("previous() called before any token consumed")
    }

    fn check(&mut self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|k| self.check(*k)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, on_missing: impl FnOnce(Token) -> ParseError) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let err = on_missing(self.peek());
            self.record(err.clone());
            Err(err)
        }
    }

    // expression → comma
    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.comma()
    }

    // comma → ternary ( "," ternary )*
    //
    // Handled separately from `binary_level`'s other callers: a comma chain
    // builds `Expr::Comma`, not `Expr::Binary`, so the evaluator can give it
    // its own left-to-right-discard semantics instead of falling through an
    // arithmetic/comparison operator table.
    fn comma(&mut self) -> Result<Expr, ParseError> {
        if self.matches(&[TokenKind::COMMA]) {
            let operator = self.previous();
            self.record(ParseError::MissingLeftOperand(operator));
            return self.ternary();
        }
        let mut expr = self.ternary()?;
        while self.matches(&[TokenKind::COMMA]) {
            let operator = self.previous();
            let right = self.ternary().map_err(|_| {
                let err = ParseError::MissingRightOperand(operator.clone());
                self.diagnostics_overwrite(&err);
                err
            })?;
            expr = Expr::comma(expr, right);
        }
        Ok(expr)
    }

    // ternary → equality ( "?" expression ":" ternary )?
    fn ternary(&mut self) -> Result<Expr, ParseError> {
        let condition = self.equality()?;
        if self.matches(&[TokenKind::QUESTION]) {
            let then_branch = self.expression()?;
            if !self.matches(&[TokenKind::COLON]) {
                let err = ParseError::MissingTernaryColon(self.peek());
                self.record(err.clone());
                return Ok(Expr::ternary(condition, then_branch, None));
            }
            if self.is_at_end() {
                let err = ParseError::MissingTernaryRhs(self.peek());
                self.record(err.clone());
                return Ok(Expr::ternary(condition, then_branch, None));
            }
            let else_branch = self.ternary()?;
            return Ok(Expr::ternary(condition, then_branch, Some(else_branch)));
        }
        Ok(condition)
    }

    // equality → comparison ( ( "!=" | "==" ) comparison )*
    fn equality(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(&BinaryLevel {
            operators: &[TokenKind::BANG_EQUAL, TokenKind::EQUAL_EQUAL],
            operand: Parser::comparison,
            missing_right: ParseError::MissingRightOperand,
        })
    }

    // comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
    fn comparison(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(&BinaryLevel {
            operators: &[
                TokenKind::GREATER,
                TokenKind::GREATER_EQUAL,
                TokenKind::LESS,
                TokenKind::LESS_EQUAL,
            ],
            operand: Parser::term,
            missing_right: ParseError::MissingRightOperand,
        })
    }

    // term → factor ( ( "-" | "+" ) factor )*
    fn term(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(&BinaryLevel {
            operators: &[TokenKind::MINUS, TokenKind::PLUS],
            operand: Parser::factor,
            missing_right: ParseError::MissingRightOperand,
        })
    }

    // factor → power ( ( "/" | "*" ) power )*
    fn factor(&mut self) -> Result<Expr, ParseError> {
        self.binary_level(&BinaryLevel {
            operators: &[TokenKind::SLASH, TokenKind::STAR],
            operand: Parser::power,
            missing_right: ParseError::MissingRightOperand,
        })
    }

    // power → unary ( "**" power )?   (right-associative)
    fn power(&mut self) -> Result<Expr, ParseError> {
        if self.matches(&[TokenKind::STAR_STAR]) {
            // missing left operand for power itself
            let operator = self.previous();
            self.record(ParseError::MissingLeftOperand(operator));
            return self.power();
        }
        let left = self.unary()?;
        if self.matches(&[TokenKind::STAR_STAR]) {
            let operator = self.previous();
            let right = self.power().map_err(|_| {
                let err = ParseError::MissingRightOperand(operator.clone());
                self.diagnostics_overwrite(&err);
                err
            })?;
            return Ok(Expr::binary(left, operator, right));
        }
        Ok(left)
    }

    /// Shared left-fold for the standard left-associative binary levels
    /// (comma, equality, comparison, term, factor): handles both
    /// missing-left-operand recovery at entry and missing-right-operand
    /// recovery within the loop.
    fn binary_level(&mut self, level: &BinaryLevel) -> Result<Expr, ParseError> {
        if self.matches(level.operators) {
            let operator = self.previous();
            self.record(ParseError::MissingLeftOperand(operator));
            return (level.operand)(self);
        }
        let mut expr = (level.operand)(self)?;
        while self.matches(level.operators) {
            let operator = self.previous();
            let right = (level.operand)(self).map_err(|_| {
                let err = (level.missing_right)(operator.clone());
                self.diagnostics_overwrite(&err);
                err
            })?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    /// Replaces the inner production's own recorded diagnostic with the
    /// operator-context one, since the latter is more informative for this
    /// cascade (see `binary_level`'s missing-right-operand recovery).
    fn diagnostics_overwrite(&mut self, err: &ParseError) {
        self.diagnostics.pop();
        self.had_error = true;
        self.diagnostics.push(err.clone());
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.matches(&[TokenKind::BANG, TokenKind::MINUS]) {
            let operator = self.previous();
            let right = self.unary()?;
            return Ok(Expr::unary(operator, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        if self.matches(&[TokenKind::NUMBER]) {
            let tok = self.previous();
            let n: f64 = tok.literal.parse().expect("scanner guarantees numeric literal");
            return Ok(Expr::Literal(Value::Number(n)));
        }
        if self.matches(&[TokenKind::STRING]) {
            let tok = self.previous();
            return Ok(Expr::Literal(Value::String(tok.literal)));
        }
        if self.matches(&[TokenKind::TRUE]) {
            return Ok(Expr::Literal(Value::Bool(true)));
        }
        if self.matches(&[TokenKind::FALSE]) {
            return Ok(Expr::Literal(Value::Bool(false)));
        }
        if self.matches(&[TokenKind::NIL]) {
            return Ok(Expr::Literal(Value::Nil));
        }
        if self.matches(&[TokenKind::LEFT_PAREN]) {
            let inner = self.expression()?;
            self.consume(TokenKind::RIGHT_PAREN, ParseError::MissingCloseParen)?;
            return Ok(Expr::grouping(inner));
        }
        let err = ParseError::ExpectingExpression(self.peek());
        self.record(err.clone());
        Err(err)
    }
}
