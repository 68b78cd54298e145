use thiserror::Error;

use crate::token::Token;

/// Parse-time diagnostics. Each carries the offending token (or none, for an
/// end-of-stream offender) so the driver can render the `[line L] Error at
/// ...` form without re-deriving it from the message.
#[derive(Debug, Error, Clone)]
pub enum ParseError {
    #[error("Missing left-hand operand.")]
    MissingLeftOperand(Token),

    #[error("Missing right-hand operand.")]
    MissingRightOperand(Token),

    #[error("Expect ')' after expression.")]
    MissingCloseParen(Token),

    #[error("Missing ':' operator in ternary expression.")]
    MissingTernaryColon(Token),

    #[error("Missing right-hand operator in ternary expression.")]
    MissingTernaryRhs(Token),

    #[error("Expect expression.")]
    ExpectingExpression(Token),
}

impl ParseError {
    pub fn token(&self) -> &Token {
        match self {
            ParseError::MissingLeftOperand(t)
            | ParseError::MissingRightOperand(t)
            | ParseError::MissingCloseParen(t)
            | ParseError::MissingTernaryColon(t)
            | ParseError::MissingTernaryRhs(t)
            | ParseError::ExpectingExpression(t) => t,
        }
    }

    /// Renders the canonical `[line L] Error at <lexeme|end>: <message>` form.
    pub fn render(&self) -> String {
        let token = self.token();
        let message = match self {
            ParseError::MissingLeftOperand(_) => "Missing left-hand operand.",
            ParseError::MissingRightOperand(_) => "Missing right-hand operand.",
            ParseError::MissingCloseParen(_) => "Expect ')' after expression.",
            ParseError::MissingTernaryColon(_) => "Missing ':' operator in ternary expression.",
            ParseError::MissingTernaryRhs(_) => "Missing right-hand operator in ternary expression.",
            ParseError::ExpectingExpression(_) => "Expect expression.",
        };
        if token.kind == crate::token_kind::TokenKind::EOF {
            format!("[line {}] Error at end: {message}", token.line)
        } else {
            format!("[line {}] Error at {}: {message}", token.line, token.lexeme)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_kind::TokenKind;

    #[test]
    fn renders_at_end_for_eof_token() {
        let err = ParseError::MissingCloseParen(Token::eof(1));
        assert_eq!(err.render(), "[line 1] Error at end: Expect ')' after expression.");
    }

    #[test]
    fn renders_at_lexeme_for_named_token() {
        let tok = Token::new(TokenKind::EQUAL_EQUAL, "==", "null", 1);
        let err = ParseError::MissingLeftOperand(tok);
        assert_eq!(err.render(), "[line 1] Error at ==: Missing left-hand operand.");
    }
}
