//! A statement sketch, kept printable-only. No parser production builds a
//! `Stmt` and the evaluator never sees one; it exists only so the token kinds
//! reserved for a future statement layer have somewhere to point.
use derive_more::Display;

use super::expr::Expr;

#[derive(Debug, Display)]
pub enum Stmt {
    #[display(fmt = "ExprStmt [{}]", "_0")]
    ExprStmt(Box<Expr>),
    #[display(fmt = "PrintStmt [{}]", "_0")]
    Print(Box<Expr>),
}
