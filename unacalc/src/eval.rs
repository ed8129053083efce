//! Expression evaluation
//!
//! Walks the AST and produces either a quantity or an instant.
//! Operand/operator combinations are handled by exhaustive match, so
//! adding a variant forces every rule here to be revisited.

use crate::ast::{BinOp, Expr, Operand, UnaryOp};
use tracing::trace;
use unacalc_core::{CalcError, Instant};
use unacalc_units::{parse_unit, Quantity, Unit, UnitRegistry};

/// Result of evaluating an expression: a physical quantity or a
/// point in time.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalValue {
    Quantity(Quantity),
    Instant(Instant),
}

impl EvalValue {
    fn describe(&self) -> String {
        match self {
            EvalValue::Quantity(q) => q.unit.describe(),
            EvalValue::Instant(_) => "datetime".to_string(),
        }
    }
}

/// Evaluator over a shared read-only registry.
pub struct Evaluator<'a> {
    registry: &'a UnitRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a UnitRegistry) -> Self {
        Evaluator { registry }
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<EvalValue, CalcError> {
        match expr {
            Expr::Operand(operand) => self.evaluate_operand(operand),
            Expr::Unary { op, expr } => {
                let value = self.evaluate(expr)?;
                self.apply_unary(*op, value)
            }
            Expr::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                trace!(op = %op, "binary evaluation");
                self.apply_binary(*op, left, right)
            }
        }
    }

    /// Evaluate and normalize in one step. With an explicit target
    /// unit the result is converted to it; otherwise the registry's
    /// preferred units apply. Instants pass through untouched.
    pub fn evaluate_normalized(
        &self,
        expr: &Expr,
        target_unit: Option<&str>,
    ) -> Result<EvalValue, CalcError> {
        let value = self.evaluate(expr)?;
        match value {
            EvalValue::Instant(_) => Ok(value),
            EvalValue::Quantity(quantity) => {
                let normalized = match target_unit {
                    Some(symbol) => {
                        let target = parse_unit(self.registry, symbol)?;
                        if !quantity.unit.is_compatible(&target) {
                            return Err(CalcError::IncompatibleConversionUnit {
                                result: quantity.unit.describe(),
                                target: target.describe(),
                            });
                        }
                        quantity.convert_to(&target)?
                    }
                    None => quantity.to_preferred(self.registry.preferred_units()),
                };
                Ok(EvalValue::Quantity(normalized))
            }
        }
    }

    fn evaluate_operand(&self, operand: &Operand) -> Result<EvalValue, CalcError> {
        match operand {
            Operand::Number { value, unit } => {
                let quantity = match unit {
                    Some(symbol) => self.resolve_quantity(*value, symbol)?,
                    None => Quantity::dimensionless(*value),
                };
                Ok(EvalValue::Quantity(quantity))
            }
            Operand::Date(instant) | Operand::DateTime(instant) => {
                Ok(EvalValue::Instant(*instant))
            }
            Operand::Constant(name) => match name.as_str() {
                // Temporal constants resolve at evaluation time
                "now" => Ok(EvalValue::Instant(Instant::now())),
                "today" => Ok(EvalValue::Instant(Instant::today())),
                _ => Ok(EvalValue::Quantity(self.registry.resolve_constant(name)?)),
            },
        }
    }

    /// A number's unit symbol usually names a unit, but an identifier
    /// like `pi` in `2 pi` is a constant used multiplicatively. Try
    /// the unit table first and fall back to constants, reporting the
    /// original unknown-unit error when both fail.
    fn resolve_quantity(&self, value: f64, symbol: &str) -> Result<Quantity, CalcError> {
        match parse_unit(self.registry, symbol) {
            Ok(unit) => Ok(Quantity::new(value, unit)),
            Err(unit_err) => match self.registry.resolve_constant(symbol) {
                Ok(constant) => Ok(Quantity::new(value * constant.value, constant.unit)),
                Err(_) => Err(unit_err),
            },
        }
    }

    fn apply_unary(&self, op: UnaryOp, value: EvalValue) -> Result<EvalValue, CalcError> {
        match (op, value) {
            (UnaryOp::Neg, EvalValue::Quantity(q)) => {
                Ok(EvalValue::Quantity(Quantity::new(-q.value, q.unit)))
            }
            (UnaryOp::Neg, EvalValue::Instant(_)) => Err(
                CalcError::UnsupportedTemporalOperation("cannot negate a datetime".to_string()),
            ),
        }
    }

    fn apply_binary(
        &self,
        op: BinOp,
        left: EvalValue,
        right: EvalValue,
    ) -> Result<EvalValue, CalcError> {
        use EvalValue::{Instant as I, Quantity as Q};
        match (op, left, right) {
            (BinOp::Add, Q(a), Q(b)) => Ok(Q(a.add(&b)?)),
            (BinOp::Sub, Q(a), Q(b)) => Ok(Q(a.sub(&b)?)),
            (BinOp::Mul, Q(a), Q(b)) => Ok(Q(a.mul(&b))),
            (BinOp::Div, Q(a), Q(b)) => Ok(Q(a.div(&b))),
            (BinOp::Pow, Q(a), Q(b)) => Ok(Q(a.pow(&b)?)),

            (BinOp::Add, I(instant), Q(q)) | (BinOp::Add, Q(q), I(instant)) => {
                Ok(I(instant.add_seconds(self.as_seconds(&q)?)))
            }
            (BinOp::Sub, I(instant), Q(q)) => {
                Ok(I(instant.add_seconds(-self.as_seconds(&q)?)))
            }
            (BinOp::Sub, I(a), I(b)) => {
                let seconds = a.seconds_since(&b);
                Ok(Q(Quantity::new(seconds, self.seconds_unit())))
            }
            (BinOp::Add, I(_), I(_)) => Err(CalcError::UnsupportedTemporalOperation(
                "cannot add two datetimes".to_string(),
            )),
            (BinOp::Sub, Q(_), I(_)) => Err(CalcError::UnsupportedTemporalOperation(
                "cannot subtract a datetime from a quantity".to_string(),
            )),

            (op, left @ I(_), right) | (op, left, right @ I(_)) => {
                Err(CalcError::UnsupportedTemporalOperation(format!(
                    "'{}' is not defined between {} and {}",
                    op,
                    left.describe(),
                    right.describe()
                )))
            }
        }
    }

    /// Convert a quantity to plain seconds for date arithmetic.
    fn as_seconds(&self, quantity: &Quantity) -> Result<f64, CalcError> {
        let seconds = self.seconds_unit();
        if !quantity.unit.is_compatible(&seconds) {
            return Err(CalcError::DimensionMismatch {
                left: "datetime".to_string(),
                right: quantity.unit.describe(),
            });
        }
        Ok(quantity.si_value())
    }

    fn seconds_unit(&self) -> Unit {
        // Registered at startup, lookup cannot fail
        self.registry
            .resolve_unit("s")
            .unwrap_or_else(|_| Unit::new("s", unacalc_units::Dimension::TIME, 1.0))
    }
}
