//! Unit representation with conversion factors

use crate::Dimension;
use serde::{Deserialize, Serialize};
use std::fmt;
use unacalc_core::CalcError;

/// A physical unit: a display symbol, its dimensional signature and
/// the factor converting a value in this unit to SI base units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g. "m", "kg", "km/h^2")
    pub symbol: String,
    /// The dimensional signature
    pub dimension: Dimension,
    /// value_si = value * to_si_factor
    pub to_si_factor: f64,
}

impl Unit {
    pub fn new(symbol: &str, dimension: Dimension, to_si_factor: f64) -> Self {
        Unit {
            symbol: symbol.to_string(),
            dimension,
            to_si_factor,
        }
    }

    /// The empty dimensionless unit
    pub fn dimensionless() -> Self {
        Unit::new("", Dimension::DIMENSIONLESS, 1.0)
    }

    /// Check if two units can be converted into each other
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to SI base units
    pub fn to_si(&self, value: f64) -> f64 {
        value * self.to_si_factor
    }

    /// Convert a value from SI base units to this unit
    pub fn from_si(&self, value_si: f64) -> f64 {
        value_si / self.to_si_factor
    }

    /// Convert a value from this unit to another unit
    pub fn convert_to(&self, value: f64, target: &Unit) -> Result<f64, CalcError> {
        if !self.is_compatible(target) {
            return Err(CalcError::DimensionMismatch {
                left: self.describe(),
                right: target.describe(),
            });
        }
        Ok(target.from_si(self.to_si(value)))
    }

    /// Multiply two units (e.g. m * m -> m^2 dimensionally)
    pub fn multiply(&self, other: &Unit) -> Unit {
        Unit {
            symbol: join_symbols(&self.symbol, &other.symbol, '*'),
            dimension: self.dimension.multiply(&other.dimension),
            to_si_factor: self.to_si_factor * other.to_si_factor,
        }
    }

    /// Divide two units (e.g. m / s -> m/s)
    pub fn divide(&self, other: &Unit) -> Unit {
        Unit {
            symbol: join_symbols(&self.symbol, &other.symbol, '/'),
            dimension: self.dimension.divide(&other.dimension),
            to_si_factor: self.to_si_factor / other.to_si_factor,
        }
    }

    /// Raise unit to an integer power (e.g. m^2)
    pub fn power(&self, exp: i32) -> Unit {
        let symbol = match exp {
            1 => self.symbol.clone(),
            _ if self.symbol.is_empty() => String::new(),
            _ => format!("{}^{}", self.symbol, exp),
        };
        Unit {
            symbol,
            dimension: self.dimension.power(exp),
            to_si_factor: self.to_si_factor.powi(exp),
        }
    }

    /// Symbol for error messages, falling back to the dimension when
    /// the unit is anonymous.
    pub fn describe(&self) -> String {
        if self.symbol.is_empty() {
            format!("[{}]", self.dimension)
        } else {
            self.symbol.clone()
        }
    }
}

fn join_symbols(left: &str, right: &str, op: char) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => String::new(),
        (false, true) => left.to_string(),
        (true, false) if op == '/' => format!("1/{}", right),
        (true, false) => right.to_string(),
        (false, false) => format!("{}{}{}", left, op, right),
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::new("m", Dimension::LENGTH, 1.0)
    }

    fn kilometer() -> Unit {
        Unit::new("km", Dimension::LENGTH, 1000.0)
    }

    fn second() -> Unit {
        Unit::new("s", Dimension::TIME, 1.0)
    }

    #[test]
    fn test_compatible_units() {
        assert!(meter().is_compatible(&kilometer()));
        assert!(!meter().is_compatible(&second()));
    }

    #[test]
    fn test_conversion() {
        let converted = meter().convert_to(5000.0, &kilometer()).unwrap();
        assert_eq!(converted, 5.0);
    }

    #[test]
    fn test_incompatible_conversion() {
        assert!(meter().convert_to(1.0, &second()).is_err());
    }

    #[test]
    fn test_roundtrip_within_tolerance() {
        let m = meter();
        let km = kilometer();
        let value = 123.456;
        let back = km.from_si(m.to_si(value));
        let again = m.from_si(km.to_si(back));
        assert!((again - value).abs() < 1e-9);
    }

    #[test]
    fn test_unit_algebra() {
        let velocity = meter().divide(&second());
        assert_eq!(velocity.dimension, Dimension::VELOCITY);
        assert_eq!(velocity.symbol, "m/s");

        let area = meter().power(2);
        assert_eq!(area.dimension, Dimension::AREA);
        assert_eq!(area.symbol, "m^2");

        let product = meter().multiply(&meter());
        assert_eq!(product.dimension, Dimension::AREA);
    }

    #[test]
    fn test_dimensionless_symbol_joins() {
        let inverse = Unit::dimensionless().divide(&second());
        assert_eq!(inverse.symbol, "1/s");
        assert_eq!(inverse.dimension, Dimension::FREQUENCY);
    }
}
