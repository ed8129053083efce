//! Quantities: a magnitude paired with a unit

use crate::{Dimension, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;
use unacalc_core::CalcError;

/// A physical quantity: an f64 magnitude with a unit.
///
/// Arithmetic enforces dimensional rules. Addition and subtraction
/// require equal dimensions and convert the right operand into the
/// left operand's unit, so `1 km + 500 m` yields a value in km.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// A bare number without a unit
    pub fn dimensionless(value: f64) -> Self {
        Quantity::new(value, Unit::dimensionless())
    }

    pub fn is_dimensionless(&self) -> bool {
        self.unit.dimension.is_dimensionless()
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    /// Magnitude expressed in SI base units
    pub fn si_value(&self) -> f64 {
        self.unit.to_si(self.value)
    }

    /// Add, keeping the left operand's unit
    pub fn add(&self, other: &Quantity) -> Result<Quantity, CalcError> {
        let converted = other.convert_to(&self.unit)?;
        Ok(Quantity::new(self.value + converted.value, self.unit.clone()))
    }

    /// Subtract, keeping the left operand's unit
    pub fn sub(&self, other: &Quantity) -> Result<Quantity, CalcError> {
        let converted = other.convert_to(&self.unit)?;
        Ok(Quantity::new(self.value - converted.value, self.unit.clone()))
    }

    /// Multiply, combining units
    pub fn mul(&self, other: &Quantity) -> Quantity {
        Quantity::new(self.value * other.value, self.unit.multiply(&other.unit))
    }

    /// Divide, combining units. Division by zero follows IEEE 754
    /// and yields an infinite magnitude rather than an error.
    pub fn div(&self, other: &Quantity) -> Quantity {
        Quantity::new(self.value / other.value, self.unit.divide(&other.unit))
    }

    /// Raise to a power. The exponent must be dimensionless, and a
    /// fractional exponent is only valid when every dimension exponent
    /// scales to an integer (so `(4 m^2) ^ 0.5` works, `(2 m) ^ 0.5`
    /// does not).
    pub fn pow(&self, exponent: &Quantity) -> Result<Quantity, CalcError> {
        if !exponent.is_dimensionless() {
            return Err(CalcError::NonDimensionlessExponent(exponent.unit.describe()));
        }
        let exp = exponent.value;
        if self.is_dimensionless() {
            return Ok(Quantity::dimensionless(self.value.powf(exp)));
        }

        // A fractional exponent that does not scale every dimension
        // exponent to an integer has no representable dimension.
        let dimension = self.unit.dimension.checked_scale(exp).ok_or_else(|| {
            CalcError::DimensionMismatch {
                left: self.unit.describe(),
                right: format!("^{}", exp),
            }
        })?;
        // Exponentiate in SI space so the factor stays coherent with
        // the scaled dimension.
        let si = self.si_value().powf(exp);
        let unit = Unit::new(&dimension.si_symbol(), dimension, 1.0);
        Ok(Quantity::new(si, unit))
    }

    /// Convert to a target unit of the same dimension
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, CalcError> {
        let value = self.unit.convert_to(self.value, target)?;
        Ok(Quantity::new(value, target.clone()))
    }

    /// Express in SI base units, naming the unit by its SI symbol
    pub fn to_si(&self) -> Quantity {
        let dimension = self.unit.dimension;
        let unit = Unit::new(&dimension.si_symbol(), dimension, 1.0);
        Quantity::new(self.si_value(), unit)
    }

    /// Normalize to the first preferred unit whose dimension matches,
    /// or fall back to the SI base-unit composite.
    pub fn to_preferred(&self, preferred: &[Unit]) -> Quantity {
        for unit in preferred {
            if self.unit.is_compatible(unit) {
                return Quantity::new(unit.from_si(self.si_value()), unit.clone());
            }
        }
        self.to_si()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meters(value: f64) -> Quantity {
        Quantity::new(value, Unit::new("m", Dimension::LENGTH, 1.0))
    }

    fn kilometers(value: f64) -> Quantity {
        Quantity::new(value, Unit::new("km", Dimension::LENGTH, 1000.0))
    }

    fn seconds(value: f64) -> Quantity {
        Quantity::new(value, Unit::new("s", Dimension::TIME, 1.0))
    }

    #[test]
    fn test_add_converts_to_left_unit() {
        let sum = kilometers(1.0).add(&meters(500.0)).unwrap();
        assert_eq!(sum.value, 1.5);
        assert_eq!(sum.unit.symbol, "km");
    }

    #[test]
    fn test_add_incompatible() {
        assert!(meters(1.0).add(&seconds(1.0)).is_err());
    }

    #[test]
    fn test_mul_div() {
        let velocity = meters(10.0).div(&seconds(2.0));
        assert_eq!(velocity.value, 5.0);
        assert_eq!(velocity.dimension(), Dimension::VELOCITY);

        let area = meters(3.0).mul(&meters(4.0));
        assert_eq!(area.value, 12.0);
        assert_eq!(area.dimension(), Dimension::AREA);
    }

    #[test]
    fn test_div_by_zero_is_infinite() {
        let result = meters(1.0).div(&seconds(0.0));
        assert!(result.value.is_infinite());
    }

    #[test]
    fn test_pow_dimensionless() {
        let result = Quantity::dimensionless(2.0)
            .pow(&Quantity::dimensionless(10.0))
            .unwrap();
        assert_eq!(result.value, 1024.0);
    }

    #[test]
    fn test_pow_scales_dimension() {
        let cubed = meters(2.0).pow(&Quantity::dimensionless(3.0)).unwrap();
        assert_eq!(cubed.value, 8.0);
        assert_eq!(cubed.dimension(), Dimension::VOLUME);
        assert_eq!(cubed.unit.symbol, "m^3");
    }

    #[test]
    fn test_sqrt_of_area() {
        let area = Quantity::new(4.0, Unit::new("m^2", Dimension::AREA, 1.0));
        let side = area.pow(&Quantity::dimensionless(0.5)).unwrap();
        assert_eq!(side.value, 2.0);
        assert_eq!(side.dimension(), Dimension::LENGTH);
    }

    #[test]
    fn test_fractional_pow_of_length_fails() {
        assert!(meters(2.0).pow(&Quantity::dimensionless(0.5)).is_err());
    }

    #[test]
    fn test_pow_with_unit_exponent_fails() {
        assert!(meters(2.0).pow(&seconds(2.0)).is_err());
    }

    #[test]
    fn test_to_preferred_picks_first_match() {
        let preferred = [
            Unit::new("s", Dimension::TIME, 1.0),
            Unit::new("m", Dimension::LENGTH, 1.0),
        ];
        let normalized = kilometers(2.0).to_preferred(&preferred);
        assert_eq!(normalized.value, 2000.0);
        assert_eq!(normalized.unit.symbol, "m");
    }

    #[test]
    fn test_to_preferred_falls_back_to_si_composite() {
        let preferred = [Unit::new("s", Dimension::TIME, 1.0)];
        let velocity = meters(10.0).div(&seconds(2.0));
        let normalized = velocity.to_preferred(&preferred);
        assert_eq!(normalized.value, 5.0);
        assert_eq!(normalized.unit.symbol, "m/s");
    }
}
