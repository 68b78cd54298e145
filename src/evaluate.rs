use thiserror::Error;

use crate::parser::expr::Expr;
use crate::token::Token;
use crate::token_kind::TokenKind;
use crate::value::Value;

/// Runtime diagnostics. Kept as its own taxonomy (distinct from scan/parse)
/// so a `Result<Value, RuntimeError>` can never be confused with `Value::Nil`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("[line {line}] Error: invalid operation {left} {op} {right} (mismatched types {left_type} and {right_type})")]
    TypeMismatch {
        line: usize,
        op: String,
        left: String,
        right: String,
        left_type: &'static str,
        right_type: &'static str,
    },

    #[error("[line {line}] Error: invalid operation {operand} {op} (operand must be numeric cannot be {operand_type})")]
    NonNumericOperand {
        line: usize,
        op: String,
        operand: String,
        operand_type: &'static str,
    },

    #[error("[line {line}] Error: invalid operation {left} {op} {right} (mismatched types {left_type} and {right_type})")]
    EqualityTypeMismatch {
        line: usize,
        op: String,
        left: String,
        right: String,
        left_type: &'static str,
        right_type: &'static str,
    },
}

fn type_mismatch(operator: &Token, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch {
        line: operator.line,
        op: operator.lexeme.clone(),
        left: left.to_string(),
        right: right.to_string(),
        left_type: left.kind_name(),
        right_type: right.kind_name(),
    }
}

pub fn evaluate(expr: &Expr) -> Result<Value, RuntimeError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Grouping(inner) => evaluate(inner),
        Expr::Comma { left, right } => {
            evaluate(left)?;
            evaluate(right)
        }
        Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            if evaluate(condition)?.is_truthy() {
                evaluate(then_branch)
            } else {
                match else_branch {
                    Some(e) => evaluate(e),
                    None => Ok(Value::Nil),
                }
            }
        }
        Expr::Unary { operator, right } => eval_unary(operator, right),
        Expr::Binary { left, operator, right } => eval_binary(left, operator, right),
    }
}

fn eval_unary(operator: &Token, right: &Expr) -> Result<Value, RuntimeError> {
    let value = evaluate(right)?;
    match operator.kind {
        TokenKind::BANG => Ok(Value::Bool(!value.is_truthy())),
        TokenKind::MINUS => match value.as_number() {
            Some(n) => Ok(Value::Number(-n)),
            None => Err(RuntimeError::NonNumericOperand {
                line: operator.line,
                op: operator.lexeme.clone(),
                operand: value.to_string(),
                operand_type: value.kind_name(),
            }),
        },
        _ => unreachable!("unary operator must be ! or -"),
    }
}

fn eval_binary(left: &Expr, operator: &Token, right: &Expr) -> Result<Value, RuntimeError> {
    let left = evaluate(left)?;
    let right = evaluate(right)?;

    match operator.kind {
        TokenKind::PLUS => match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
            _ => Err(type_mismatch(operator, &left, &right)),
        },
        TokenKind::MINUS => numeric(operator, &left, &right, |a, b| a - b),
        TokenKind::STAR => numeric(operator, &left, &right, |a, b| a * b),
        TokenKind::SLASH => numeric(operator, &left, &right, |a, b| a / b),
        TokenKind::STAR_STAR => numeric(operator, &left, &right, f64::powf),
        TokenKind::GREATER => compare(operator, &left, &right, |a, b| a > b),
        TokenKind::GREATER_EQUAL => compare(operator, &left, &right, |a, b| a >= b),
        TokenKind::LESS => compare(operator, &left, &right, |a, b| a < b),
        TokenKind::LESS_EQUAL => compare(operator, &left, &right, |a, b| a <= b),
        TokenKind::EQUAL_EQUAL => is_equal(operator, &left, &right).map(Value::Bool),
        TokenKind::BANG_EQUAL => is_equal(operator, &left, &right).map(|b| Value::Bool(!b)),
        _ => unreachable!("unexpected binary operator {:?}", operator.kind),
    }
}

fn numeric(
    operator: &Token,
    left: &Value,
    right: &Value,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok(Value::Number(f(a, b))),
        _ => Err(type_mismatch(operator, left, right)),
    }
}

fn compare(
    operator: &Token,
    left: &Value,
    right: &Value,
    f: impl Fn(f64, f64) -> bool,
) -> Result<Value, RuntimeError> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok(Value::Bool(f(a, b))),
        _ => Err(type_mismatch(operator, left, right)),
    }
}

/// `nil` only equals `nil`; mixed non-nil types are a runtime error rather
/// than silently `false`, matching the distinction the value model draws
/// between "different type" and "different value of the same type".
fn is_equal(operator: &Token, left: &Value, right: &Value) -> Result<bool, RuntimeError> {
    match (left, right) {
        (Value::Nil, Value::Nil) => Ok(true),
        (Value::Nil, _) | (_, Value::Nil) => Ok(false),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::String(a), Value::String(b)) => Ok(a == b),
        _ => Err(RuntimeError::EqualityTypeMismatch {
            line: operator.line,
            op: operator.lexeme.clone(),
            left: left.to_string(),
            right: right.to_string(),
            left_type: left.kind_name(),
            right_type: right.kind_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;
    use crate::token::Token;

    fn eval(src: &str) -> Result<Value, RuntimeError> {
        let (mut tokens, scan_diags) = Scanner::new(src).scan_tokens();
        assert!(scan_diags.is_empty(), "unexpected scan diagnostics: {scan_diags:?}");
        tokens.push(Token::eof(tokens.last().map_or(1, |t| t.line)));
        let (tree, parse_diags, had_error) = Parser::new(tokens).parse();
        assert!(!had_error, "unexpected parse diagnostics: {parse_diags:?}");
        evaluate(&tree.expect("tree"))
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(eval("\"foo\" + \"bar\"").unwrap(), Value::String("foobar".into()));
    }

    #[test]
    fn division_by_zero_is_infinity_not_error() {
        let v = eval("1 / 0").unwrap();
        assert_eq!(v, Value::Number(f64::INFINITY));
    }

    #[test]
    fn equality_type_mismatch_is_runtime_error() {
        assert!(matches!(eval("1 == \"1\""), Err(RuntimeError::EqualityTypeMismatch { .. })));
    }

    #[test]
    fn nil_equals_nil_only() {
        assert_eq!(eval("nil == nil").unwrap(), Value::Bool(true));
        assert_eq!(eval("nil == 1").unwrap(), Value::Bool(false));
    }

    #[test]
    fn ternary_short_circuits_unchosen_branch() {
        // the unchosen branch (1 == "1") would be a runtime error if evaluated
        assert_eq!(eval("true ? 42 : (1 == \"1\")").unwrap(), Value::Number(42.0));
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(eval("1 < 2").unwrap(), Value::Bool(true));
        assert_eq!(eval("2 <= 2").unwrap(), Value::Bool(true));
        assert_eq!(eval("3 > 2").unwrap(), Value::Bool(true));
        assert_eq!(eval("2 >= 3").unwrap(), Value::Bool(false));
    }

    #[test]
    fn power_operator() {
        assert_eq!(eval("2 ** 10").unwrap(), Value::Number(1024.0));
    }

    #[test]
    fn unary_minus_on_non_number_is_error() {
        assert!(matches!(eval("-\"x\""), Err(RuntimeError::NonNumericOperand { .. })));
    }

    #[test]
    fn comma_discards_left_value() {
        assert_eq!(eval("1, 2").unwrap(), Value::Number(2.0));
    }
}
