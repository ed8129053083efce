//! unacalc - a unit-aware expression calculator
//!
//! Parses a textual arithmetic expression mixing plain numbers,
//! physical quantities (`5 m/s^2`), named constants (`c`, `pi`,
//! `now`, `today`) and ISO-8601 date/time literals, evaluates it with
//! full dimensional analysis, and renders the result for display.
//! A trailing ` in <unit>` converts the result into an explicit
//! target unit.
//!
//! ```
//! let (value, unit) = unacalc::evaluate_expression("1 km + 500 m in m").unwrap();
//! assert_eq!(value, "1500.000");
//! assert_eq!(unit, "m");
//! ```

pub mod ast;
pub mod eval;
pub mod format;
pub mod lexer;
pub mod parser;

pub use ast::{BinOp, Expr, Operand, UnaryOp};
pub use eval::{EvalValue, Evaluator};
pub use format::{format_value, FormatOptions, Notation};
pub use parser::parse;

use tracing::debug;
use unacalc_core::CalcError;
use unacalc_units::UNITS;

/// The calculator engine: formatting options plus the shared
/// registry. Stateless across calls apart from the options.
#[derive(Debug, Clone, Default)]
pub struct Unacalc {
    options: FormatOptions,
}

impl Unacalc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormatOptions) -> Self {
        Unacalc { options }
    }

    pub fn precision(mut self, precision: u8) -> Self {
        self.options = FormatOptions::new(precision, self.options.notation);
        self
    }

    pub fn notation(mut self, notation: Notation) -> Self {
        self.options.notation = notation;
        self
    }

    /// Evaluate an input string and format the result.
    pub fn calculate(&self, input: &str) -> Result<(String, String), CalcError> {
        let value = evaluate(input)?;
        Ok(format_value(&value, self.options))
    }
}

/// Evaluate an input string to a typed value.
///
/// Handles the caller-side pre-processing: the micro sign is replaced
/// with the ASCII `u` prefix, and a ` in <unit>` suffix is split off
/// and applied as the conversion target during final normalization.
pub fn evaluate(input: &str) -> Result<EvalValue, CalcError> {
    let input = input.replace('µ', "u");
    let (expression, target_unit) = split_conversion_target(&input);
    debug!(expression, ?target_unit, "evaluating");

    let expr = parse(expression)?;
    Evaluator::new(&UNITS).evaluate_normalized(&expr, target_unit)
}

/// Evaluate and format with explicit options.
pub fn evaluate_with(
    input: &str,
    options: FormatOptions,
) -> Result<(String, String), CalcError> {
    Unacalc::with_options(options).calculate(input)
}

/// The single entry point used by display layers: default precision
/// and notation, errors flattened to their message text.
pub fn evaluate_expression(input: &str) -> Result<(String, String), String> {
    evaluate_with(input, FormatOptions::default()).map_err(|e| e.to_string())
}

/// Split a trailing ` in <unit>` conversion suffix off the
/// expression. Only the first occurrence is considered.
fn split_conversion_target(input: &str) -> (&str, Option<&str>) {
    match input.split_once(" in ") {
        Some((expression, target)) => (expression.trim(), Some(target.trim())),
        None => (input.trim(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(input: &str) -> (String, String) {
        evaluate_expression(input).unwrap()
    }

    #[test]
    fn test_plain_arithmetic() {
        assert_eq!(ok("2 + 3 * 4"), ("14.000".to_string(), String::new()));
        assert_eq!(ok("2 ^ 3 ^ 2"), ("512.000".to_string(), String::new()));
        assert_eq!(ok("-1 + 2"), ("1.000".to_string(), String::new()));
        assert_eq!(ok("10 - 3 - 2"), ("5.000".to_string(), String::new()));
    }

    #[test]
    fn test_conversion_suffix() {
        assert_eq!(ok("1000 g in kg"), ("1.000".to_string(), "kg".to_string()));
        assert_eq!(
            ok("1 km + 500 m in m"),
            ("1500.000".to_string(), "m".to_string())
        );
    }

    #[test]
    fn test_acceleration_conversion() {
        // 1 m/s^2 = 12960 km/h^2, so 15 m/s^2 = 194400 km/h^2
        assert_eq!(
            ok("3 * 5 m/s^2 in km/h^2"),
            ("194400.000".to_string(), "km/h^2".to_string())
        );
    }

    #[test]
    fn test_micro_sign_pre_processing() {
        assert_eq!(ok("1000 µm in mm"), ("1.000".to_string(), "mm".to_string()));
    }

    #[test]
    fn test_preferred_unit_normalization() {
        // Without a target, energies come back in watt-hours
        assert_eq!(ok("7200 J"), ("2.000".to_string(), "Wh".to_string()));
        // and masses in kilograms
        assert_eq!(ok("500 g"), ("0.500".to_string(), "kg".to_string()));
    }

    #[test]
    fn test_temporal_arithmetic() {
        assert_eq!(
            ok("2024-06-08T19:45:10 + 5 days"),
            ("2024-06-13 19:45:10".to_string(), String::new())
        );
        assert_eq!(
            ok("2024-06-08 - 2024-06-01"),
            ("604800.000".to_string(), "s".to_string())
        );
    }

    #[test]
    fn test_instant_ignores_conversion_target() {
        // Datetimes are never unit-converted; a target unit is ignored
        assert_eq!(
            ok("2024-06-08 + 1 d in s"),
            ("2024-06-09 00:00:00".to_string(), String::new())
        );
    }

    #[test]
    fn test_now_is_not_fixed() {
        // `now` reads the wall clock, so only its shape is asserted
        let (value, unit) = ok("now");
        assert_eq!(value.len(), "2024-06-08 19:45:10".len());
        assert_eq!(unit, "");
    }

    #[test]
    fn test_errors_are_messages() {
        assert!(evaluate_expression("3 + ").is_err());
        assert!(evaluate_expression("3 zz")
            .unwrap_err()
            .contains("unknown unit"));
        assert!(evaluate_expression("3 + foo")
            .unwrap_err()
            .contains("unknown constant"));
        assert!(evaluate_expression("5 m in s")
            .unwrap_err()
            .contains("incompatible"));
    }

    #[test]
    fn test_engine_builder() {
        let calc = Unacalc::new().precision(2).notation(Notation::Scientific);
        let (value, unit) = calc.calculate("1500 m in km").unwrap();
        assert_eq!(value, "1.50e0");
        assert_eq!(unit, "km");
    }

    #[test]
    fn test_explicit_options() {
        let (value, unit) =
            evaluate_with("1000 g in kg", FormatOptions::new(1, Notation::Normal)).unwrap();
        assert_eq!(value, "1.0");
        assert_eq!(unit, "kg");

        let (value, _) =
            evaluate_with("12345.6", FormatOptions::new(2, Notation::Scientific)).unwrap();
        assert_eq!(value, "1.23e4");
    }
}
