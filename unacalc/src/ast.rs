//! Abstract syntax tree
//!
//! A closed set of node shapes: leaves are `Operand`s, inner nodes
//! are unary or binary operator applications. The evaluator does an
//! exhaustive match over these, so every operand and operator
//! combination is handled by construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use unacalc_core::Instant;

/// Binary operators of the arithmetic grammar. `**` is lexed as a
/// synonym of `^` and never appears as its own variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        };
        write!(f, "{}", symbol)
    }
}

/// Unary operators. Leading signs on numeric literals are folded into
/// the literal by the parser, so negation only survives here in front
/// of parenthesized expressions and identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
}

/// A parsed leaf. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// A number with an optional unit symbol, resolved at evaluation
    /// time against the registry.
    Number { value: f64, unit: Option<String> },
    /// A calendar date literal (midnight)
    Date(Instant),
    /// A date and time-of-day literal
    DateTime(Instant),
    /// A named constant such as `c`, `pi`, `now` or `today`
    Constant(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Operand(Operand),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn number(value: f64) -> Expr {
        Expr::Operand(Operand::Number { value, unit: None })
    }

    pub fn quantity(value: f64, unit: &str) -> Expr {
        Expr::Operand(Operand::Number {
            value,
            unit: Some(unit.to_string()),
        })
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn negate(expr: Expr) -> Expr {
        Expr::Unary {
            op: UnaryOp::Neg,
            expr: Box::new(expr),
        }
    }
}
