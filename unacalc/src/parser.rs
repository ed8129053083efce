//! Recursive-descent parser
//!
//! Precedence, loosest to tightest: `+ -`, then `* /`, then `^`
//! (right-associative). Same-precedence chains fold left-to-right
//! directly into nested binary nodes, so the evaluator never sees a
//! flattened operator list.
//!
//! A leading sign in operand position is folded into the numeric
//! literal itself when a number follows. `-2^2` therefore squares the
//! literal `-2` and yields 4, while `-(2)^2` negates first. A unary
//! node is only produced in front of parentheses and identifiers.

use crate::ast::{BinOp, Expr, Operand};
use crate::lexer::{tokenize, Spanned, Token};
use unacalc_core::CalcError;

/// Parse a full expression. The entire input must be consumed;
/// trailing tokens are a syntax error.
pub fn parse(input: &str) -> Result<Expr, CalcError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        input_len: input.chars().count(),
    };
    let expr = parser.parse_additive()?;
    if let Some(spanned) = parser.peek() {
        return Err(CalcError::syntax(
            spanned.pos,
            format!("unexpected trailing token {:?}", spanned.token),
        ));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    input_len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.pos).cloned();
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    fn error_pos(&self) -> usize {
        self.peek().map(|s| s.pos).unwrap_or(self.input_len)
    }

    fn parse_additive(&mut self) -> Result<Expr, CalcError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(spanned) = self.peek() {
            let op = match spanned.token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, CalcError> {
        let mut left = self.parse_power()?;
        while let Some(spanned) = self.peek() {
            let op = match spanned.token {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_power()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_power(&mut self) -> Result<Expr, CalcError> {
        let base = self.parse_operand()?;
        if matches!(self.peek().map(|s| &s.token), Some(Token::Caret)) {
            self.pos += 1;
            // Right-associative: 2^3^2 is 2^(3^2)
            let exponent = self.parse_power()?;
            return Ok(Expr::binary(BinOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_operand(&mut self) -> Result<Expr, CalcError> {
        let spanned = match self.advance() {
            Some(s) => s,
            None => {
                return Err(CalcError::syntax(self.input_len, "unexpected end of input"));
            }
        };
        match spanned.token {
            Token::Number(value) => Ok(Expr::Operand(Operand::Number { value, unit: None })),
            Token::NumberWithUnit(value, unit) => Ok(Expr::Operand(Operand::Number {
                value,
                unit: Some(unit),
            })),
            Token::Date(instant) => Ok(Expr::Operand(Operand::Date(instant))),
            Token::DateTime(instant) => Ok(Expr::Operand(Operand::DateTime(instant))),
            Token::Ident(name) => Ok(Expr::Operand(Operand::Constant(name))),
            Token::LParen => {
                let expr = self.parse_additive()?;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(expr),
                    _ => Err(CalcError::syntax(self.error_pos(), "expected ')'")),
                }
            }
            Token::Minus => self.parse_signed_operand(-1.0),
            Token::Plus => self.parse_signed_operand(1.0),
            token => Err(CalcError::syntax(
                spanned.pos,
                format!("unexpected token {:?}", token),
            )),
        }
    }

    /// Operand after a leading sign. A following number absorbs the
    /// sign into the literal; anything else gets a unary node.
    fn parse_signed_operand(&mut self, sign: f64) -> Result<Expr, CalcError> {
        match self.peek().map(|s| s.token.clone()) {
            Some(Token::Number(value)) => {
                self.pos += 1;
                Ok(Expr::Operand(Operand::Number {
                    value: sign * value,
                    unit: None,
                }))
            }
            Some(Token::NumberWithUnit(value, unit)) => {
                self.pos += 1;
                Ok(Expr::Operand(Operand::Number {
                    value: sign * value,
                    unit: Some(unit),
                }))
            }
            _ => {
                let operand = self.parse_operand()?;
                if sign < 0.0 {
                    Ok(Expr::negate(operand))
                } else {
                    Ok(operand)
                }
            }
        }
    }
}
