//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as a 7-element
//! vector: [length, mass, time, current, temperature, amount, luminosity].
//! Two quantities are compatible for addition exactly when their
//! vectors are equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance for deciding whether a scaled exponent is integral.
const EXPONENT_EPSILON: f64 = 1e-9;

/// Exponents of the 7 SI base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// [length, mass, time, current, temperature, amount, luminosity]
    pub exponents: [i32; 7],
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 0] };
    pub const LENGTH: Dimension = Dimension { exponents: [1, 0, 0, 0, 0, 0, 0] };
    pub const MASS: Dimension = Dimension { exponents: [0, 1, 0, 0, 0, 0, 0] };
    pub const TIME: Dimension = Dimension { exponents: [0, 0, 1, 0, 0, 0, 0] };
    pub const CURRENT: Dimension = Dimension { exponents: [0, 0, 0, 1, 0, 0, 0] };
    pub const TEMPERATURE: Dimension = Dimension { exponents: [0, 0, 0, 0, 1, 0, 0] };
    pub const AMOUNT: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 1, 0] };
    pub const LUMINOSITY: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 1] };

    /// Velocity [L T^-1]
    pub const VELOCITY: Dimension = Dimension { exponents: [1, 0, -1, 0, 0, 0, 0] };
    /// Acceleration [L T^-2]
    pub const ACCELERATION: Dimension = Dimension { exponents: [1, 0, -2, 0, 0, 0, 0] };
    /// Force [M L T^-2]
    pub const FORCE: Dimension = Dimension { exponents: [1, 1, -2, 0, 0, 0, 0] };
    /// Energy [M L^2 T^-2]
    pub const ENERGY: Dimension = Dimension { exponents: [2, 1, -2, 0, 0, 0, 0] };
    /// Power [M L^2 T^-3]
    pub const POWER: Dimension = Dimension { exponents: [2, 1, -3, 0, 0, 0, 0] };
    /// Pressure [M L^-1 T^-2]
    pub const PRESSURE: Dimension = Dimension { exponents: [-1, 1, -2, 0, 0, 0, 0] };
    /// Area [L^2]
    pub const AREA: Dimension = Dimension { exponents: [2, 0, 0, 0, 0, 0, 0] };
    /// Volume [L^3]
    pub const VOLUME: Dimension = Dimension { exponents: [3, 0, 0, 0, 0, 0, 0] };
    /// Frequency [T^-1]
    pub const FREQUENCY: Dimension = Dimension { exponents: [0, 0, -1, 0, 0, 0, 0] };

    pub fn new(exponents: [i32; 7]) -> Self {
        Dimension { exponents }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        let mut result = [0i32; 7];
        for i in 0..7 {
            result[i] = self.exponents[i] + other.exponents[i];
        }
        Dimension { exponents: result }
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Dimension {
        let mut result = [0i32; 7];
        for i in 0..7 {
            result[i] = self.exponents[i] - other.exponents[i];
        }
        Dimension { exponents: result }
    }

    /// Raise to integer power (multiply exponents)
    pub fn power(&self, exp: i32) -> Dimension {
        let mut result = [0i32; 7];
        for i in 0..7 {
            result[i] = self.exponents[i] * exp;
        }
        Dimension { exponents: result }
    }

    /// Scale exponents by an arbitrary real factor.
    ///
    /// Returns `None` unless every scaled exponent lands on an integer,
    /// so `[L^2]` scaled by 0.5 gives `[L]` while `[L]` scaled by 0.5
    /// has no valid dimension.
    pub fn checked_scale(&self, factor: f64) -> Option<Dimension> {
        let mut result = [0i32; 7];
        for i in 0..7 {
            let scaled = self.exponents[i] as f64 * factor;
            if (scaled - scaled.round()).abs() > EXPONENT_EPSILON {
                return None;
            }
            result[i] = scaled.round() as i32;
        }
        Some(Dimension { exponents: result })
    }

    /// Name of the dimension when it matches a common one
    pub fn name(&self) -> Option<&'static str> {
        match self.exponents {
            [0, 0, 0, 0, 0, 0, 0] => Some("dimensionless"),
            [1, 0, 0, 0, 0, 0, 0] => Some("length"),
            [0, 1, 0, 0, 0, 0, 0] => Some("mass"),
            [0, 0, 1, 0, 0, 0, 0] => Some("time"),
            [0, 0, 0, 1, 0, 0, 0] => Some("current"),
            [0, 0, 0, 0, 1, 0, 0] => Some("temperature"),
            [0, 0, 0, 0, 0, 1, 0] => Some("amount"),
            [0, 0, 0, 0, 0, 0, 1] => Some("luminosity"),
            [1, 0, -1, 0, 0, 0, 0] => Some("velocity"),
            [1, 0, -2, 0, 0, 0, 0] => Some("acceleration"),
            [1, 1, -2, 0, 0, 0, 0] => Some("force"),
            [2, 1, -2, 0, 0, 0, 0] => Some("energy"),
            [2, 1, -3, 0, 0, 0, 0] => Some("power"),
            [-1, 1, -2, 0, 0, 0, 0] => Some("pressure"),
            [2, 0, 0, 0, 0, 0, 0] => Some("area"),
            [3, 0, 0, 0, 0, 0, 0] => Some("volume"),
            [0, 0, -1, 0, 0, 0, 0] => Some("frequency"),
            _ => None,
        }
    }

    /// Render the SI base-unit symbol for this dimension, e.g.
    /// `m/s^2` for acceleration or `kg*m^2/s^3` for power.
    pub fn si_symbol(&self) -> String {
        const SYMBOLS: [&str; 7] = ["m", "kg", "s", "A", "K", "mol", "cd"];
        // Mass is listed first by convention (kg*m/s^2, not m*kg/s^2)
        const ORDER: [usize; 7] = [1, 0, 2, 3, 4, 5, 6];

        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        for &i in &ORDER {
            let exp = self.exponents[i];
            if exp > 0 {
                numerator.push(render_factor(SYMBOLS[i], exp));
            } else if exp < 0 {
                denominator.push(render_factor(SYMBOLS[i], -exp));
            }
        }

        match (numerator.is_empty(), denominator.is_empty()) {
            (true, true) => String::new(),
            (false, true) => numerator.join("*"),
            (true, false) => format!("1/{}", denominator.join("*")),
            (false, false) => format!("{}/{}", numerator.join("*"), denominator.join("*")),
        }
    }
}

fn render_factor(symbol: &str, exp: i32) -> String {
    if exp == 1 {
        symbol.to_string()
    } else {
        format!("{}^{}", symbol, exp)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = ["L", "M", "T", "I", "Θ", "N", "J"];
        let mut parts = Vec::new();
        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp == 1 {
                parts.push(names[i].to_string());
            } else if exp != 0 {
                parts.push(format!("{}^{}", names[i], exp));
            }
        }
        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::LENGTH.is_dimensionless());
    }

    #[test]
    fn test_multiply_divide() {
        let velocity = Dimension::LENGTH.divide(&Dimension::TIME);
        assert_eq!(velocity, Dimension::VELOCITY);

        let force = Dimension::MASS.multiply(&Dimension::ACCELERATION);
        assert_eq!(force, Dimension::FORCE);
    }

    #[test]
    fn test_power() {
        assert_eq!(Dimension::LENGTH.power(2), Dimension::AREA);
        assert_eq!(Dimension::TIME.power(-1), Dimension::FREQUENCY);
    }

    #[test]
    fn test_checked_scale() {
        assert_eq!(Dimension::AREA.checked_scale(0.5), Some(Dimension::LENGTH));
        assert_eq!(Dimension::LENGTH.checked_scale(3.0), Some(Dimension::VOLUME));
        assert_eq!(Dimension::LENGTH.checked_scale(0.5), None);
    }

    #[test]
    fn test_si_symbol() {
        assert_eq!(Dimension::DIMENSIONLESS.si_symbol(), "");
        assert_eq!(Dimension::LENGTH.si_symbol(), "m");
        assert_eq!(Dimension::ACCELERATION.si_symbol(), "m/s^2");
        assert_eq!(Dimension::FORCE.si_symbol(), "kg*m/s^2");
        assert_eq!(Dimension::FREQUENCY.si_symbol(), "1/s");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::DIMENSIONLESS), "1");
        assert_eq!(format!("{}", Dimension::VELOCITY), "L T^-1");
    }
}
