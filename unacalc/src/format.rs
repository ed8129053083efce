//! Result formatting
//!
//! Renders an evaluated value as a `(value_text, unit_text)` pair.
//! Quantities honor precision and notation; instants are always
//! rendered as `YYYY-MM-DD HH:MM:SS` with an empty unit text.

use crate::eval::EvalValue;
use serde::{Deserialize, Serialize};

/// Numeric notation for quantity magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Notation {
    /// Fixed-point, e.g. `194400.000`
    #[default]
    Normal,
    /// Scientific, e.g. `1.944e5`
    Scientific,
}

/// Per-call formatting options, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Digits after the decimal point, clamped to 1..=10
    pub precision: u8,
    pub notation: Notation,
}

impl FormatOptions {
    pub const MIN_PRECISION: u8 = 1;
    pub const MAX_PRECISION: u8 = 10;

    pub fn new(precision: u8, notation: Notation) -> Self {
        FormatOptions {
            precision: precision.clamp(Self::MIN_PRECISION, Self::MAX_PRECISION),
            notation,
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            precision: 3,
            notation: Notation::Normal,
        }
    }
}

/// Format a value as `(value_text, unit_text)`.
pub fn format_value(value: &EvalValue, options: FormatOptions) -> (String, String) {
    match value {
        EvalValue::Quantity(quantity) => {
            let precision = options.precision as usize;
            let value_text = match options.notation {
                Notation::Normal => format!("{:.*}", precision, quantity.value),
                Notation::Scientific => format!("{:.*e}", precision, quantity.value),
            };
            (value_text, quantity.unit.symbol.clone())
        }
        EvalValue::Instant(instant) => (instant.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unacalc_core::Instant;
    use unacalc_units::{Dimension, Quantity, Unit};

    fn quantity(value: f64, symbol: &str) -> EvalValue {
        EvalValue::Quantity(Quantity::new(
            value,
            Unit::new(symbol, Dimension::LENGTH, 1.0),
        ))
    }

    #[test]
    fn test_default_precision() {
        let (value_text, unit_text) = format_value(&quantity(1.0, "kg"), FormatOptions::default());
        assert_eq!(value_text, "1.000");
        assert_eq!(unit_text, "kg");
    }

    #[test]
    fn test_custom_precision() {
        let options = FormatOptions::new(5, Notation::Normal);
        let (value_text, _) = format_value(&quantity(std::f64::consts::PI, ""), options);
        assert_eq!(value_text, "3.14159");
    }

    #[test]
    fn test_precision_is_clamped() {
        assert_eq!(FormatOptions::new(0, Notation::Normal).precision, 1);
        assert_eq!(FormatOptions::new(42, Notation::Normal).precision, 10);
    }

    #[test]
    fn test_scientific_notation() {
        let options = FormatOptions::new(3, Notation::Scientific);
        let (value_text, _) = format_value(&quantity(194_400.0, "km/h^2"), options);
        assert_eq!(value_text, "1.944e5");
    }

    #[test]
    fn test_dimensionless_has_empty_unit_text() {
        let (_, unit_text) = format_value(&quantity(14.0, ""), FormatOptions::default());
        assert_eq!(unit_text, "");
    }

    #[test]
    fn test_instant_ignores_precision() {
        let instant = Instant::from_ymd_hms(2024, 6, 8, 19, 45, 10).unwrap();
        let options = FormatOptions::new(7, Notation::Scientific);
        let (value_text, unit_text) = format_value(&EvalValue::Instant(instant), options);
        assert_eq!(value_text, "2024-06-08 19:45:10");
        assert_eq!(unit_text, "");
    }
}
