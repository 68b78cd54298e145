use super::expr::Expr;

/// Renders an expression as a fully-parenthesized prefix form:
/// `(op child1 child2 …)`.
pub fn print(expr: &Expr) -> String {
    match expr {
        Expr::Binary { left, operator, right } => {
            parenthesize(&operator.lexeme, &[left, right])
        }
        Expr::Unary { operator, right } => parenthesize(&operator.lexeme, &[right]),
        Expr::Grouping(inner) => parenthesize("group", &[inner]),
        Expr::Literal(value) => value.to_string(),
        Expr::Comma { left, right } => parenthesize(",", &[left, right]),
        Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => match else_branch {
            Some(else_branch) => parenthesize("?:", &[condition, then_branch, else_branch]),
            None => parenthesize("?:", &[condition, then_branch]),
        },
    }
}

fn parenthesize(name: &str, exprs: &[&Box<Expr>]) -> String {
    let mut out = String::from("(");
    out.push_str(name);
    for e in exprs {
        out.push(' ');
        out.push_str(&print(e));
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use crate::token_kind::TokenKind;
    use crate::value::Value;

    #[test]
    fn prints_nested_binary() {
        // 1 + (2 - (4 / 5))
        let inner = Expr::binary(
            Expr::Literal(Value::Number(2.0)),
            Token::new(TokenKind::MINUS, "-", "null", 1),
            Expr::grouping(Expr::binary(
                Expr::Literal(Value::Number(4.0)),
                Token::new(TokenKind::SLASH, "/", "null", 1),
                Expr::Literal(Value::Number(5.0)),
            )),
        );
        let tree = Expr::binary(
            Expr::Literal(Value::Number(1.0)),
            Token::new(TokenKind::PLUS, "+", "null", 1),
            Expr::grouping(inner),
        );
        assert_eq!(print(&tree), "(+ 1 (group (- 2 (group (/ 4 5)))))");
    }

    #[test]
    fn prints_nil_literal() {
        assert_eq!(print(&Expr::Literal(Value::Nil)), "nil");
    }
}
