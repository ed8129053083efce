//! Compound unit-symbol parsing
//!
//! Unit expressions like `km/h^2` or `kg*m/s^2` are part of the unit
//! symbol itself, not the arithmetic grammar. A symbol is a sequence
//! of `/`-separated segments; the first is the numerator and every
//! later one divides. Within a segment, factors are joined by `*`,
//! `·` or whitespace, and each factor may carry an integer `^`
//! exponent.

use crate::{Unit, UnitRegistry};
use unacalc_core::CalcError;

/// Parse a compound unit symbol against the registry.
///
/// The empty string parses to the dimensionless unit. A bare `1`
/// numerator is allowed, so `1/s` is a frequency.
pub fn parse_unit(registry: &UnitRegistry, symbol: &str) -> Result<Unit, CalcError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Ok(Unit::dimensionless());
    }

    let mut segments = symbol.split('/');
    let numerator = segments.next().unwrap_or("");
    let mut unit = parse_segment(registry, numerator)?;
    for denominator in segments {
        let divisor = parse_segment(registry, denominator)?;
        unit = unit.divide(&divisor);
    }
    // Keep the symbol exactly as written rather than the rebuilt form
    unit.symbol = symbol.to_string();
    Ok(unit)
}

fn parse_segment(registry: &UnitRegistry, segment: &str) -> Result<Unit, CalcError> {
    let segment = segment.trim();
    if segment.is_empty() || segment == "1" {
        return Ok(Unit::dimensionless());
    }

    let mut unit = Unit::dimensionless();
    for factor in segment.split(|c: char| c == '*' || c == '·' || c.is_whitespace()) {
        if factor.is_empty() {
            continue;
        }
        unit = unit.multiply(&parse_factor(registry, factor)?);
    }
    Ok(unit)
}

fn parse_factor(registry: &UnitRegistry, factor: &str) -> Result<Unit, CalcError> {
    match factor.split_once('^') {
        Some((base, exp)) => {
            let exp: i32 = exp
                .parse()
                .map_err(|_| CalcError::UnknownUnit(factor.to_string()))?;
            Ok(registry.resolve_unit(base)?.power(exp))
        }
        None => registry.resolve_unit(factor),
    }
}
