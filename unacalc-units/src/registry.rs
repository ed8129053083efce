//! The unit and constant registry
//!
//! A fixed SI-derived table of units, metric prefixes and physical
//! constants. Built once into the shared [`UNITS`] instance and read
//! from there by the grammar and the evaluator.

use crate::{parse_unit, Dimension, Quantity, Unit};
use std::collections::HashMap;
use std::sync::LazyLock;
use unacalc_core::CalcError;

/// The process-wide registry. Built on first use, never mutated.
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Metric prefixes tried when a symbol has no direct entry.
const PREFIXES: [(&str, f64); 20] = [
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("da", 1e1),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
    ("a", 1e-18),
    ("z", 1e-21),
    ("y", 1e-24),
];

pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
    constants: HashMap<String, Quantity>,
    preferred: Vec<Unit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
            constants: HashMap::new(),
            preferred: Vec::new(),
        };
        registry.register_all_units();
        registry.register_constants();
        registry.preferred = ["s", "m", "kg", "W", "Wh"]
            .iter()
            .map(|s| registry.resolve_unit(s).expect("preferred unit registered"))
            .collect();
        registry
    }

    fn register(&mut self, symbol: &str, dimension: Dimension, to_si_factor: f64) {
        self.units
            .insert(symbol.to_string(), Unit::new(symbol, dimension, to_si_factor));
    }

    fn alias(&mut self, name: &str, canonical: &str) {
        self.aliases.insert(name.to_string(), canonical.to_string());
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_current_units();
        self.register_temperature_units();
        self.register_amount_units();
        self.register_luminosity_units();
        self.register_frequency_units();
        self.register_force_units();
        self.register_energy_units();
        self.register_power_units();
        self.register_pressure_units();
        self.register_volume_units();
        self.register_electrical_units();
    }

    fn register_length_units(&mut self) {
        self.register("m", Dimension::LENGTH, 1.0);
        self.alias("meter", "m");
        self.alias("meters", "m");
    }

    fn register_mass_units(&mut self) {
        // Gram carries factor 1e-3 so the prefixed form kg comes out
        // at exactly 1.
        self.register("g", Dimension::MASS, 1e-3);
        self.register("t", Dimension::MASS, 1e3);
        self.alias("gram", "g");
        self.alias("grams", "g");
        self.alias("tonne", "t");
    }

    fn register_time_units(&mut self) {
        self.register("s", Dimension::TIME, 1.0);
        self.register("min", Dimension::TIME, 60.0);
        self.register("h", Dimension::TIME, 3600.0);
        self.register("d", Dimension::TIME, 86_400.0);
        self.register("week", Dimension::TIME, 604_800.0);

        self.alias("second", "s");
        self.alias("seconds", "s");
        self.alias("sec", "s");
        self.alias("minute", "min");
        self.alias("minutes", "min");
        self.alias("hour", "h");
        self.alias("hours", "h");
        self.alias("hr", "h");
        self.alias("day", "d");
        self.alias("days", "d");
        self.alias("weeks", "week");
    }

    fn register_current_units(&mut self) {
        self.register("A", Dimension::CURRENT, 1.0);
        self.alias("ampere", "A");
    }

    fn register_temperature_units(&mut self) {
        // Factor-based registry, so only the absolute scale
        self.register("K", Dimension::TEMPERATURE, 1.0);
        self.alias("kelvin", "K");
    }

    fn register_amount_units(&mut self) {
        self.register("mol", Dimension::AMOUNT, 1.0);
        self.alias("mole", "mol");
    }

    fn register_luminosity_units(&mut self) {
        self.register("cd", Dimension::LUMINOSITY, 1.0);
        self.alias("candela", "cd");
    }

    fn register_frequency_units(&mut self) {
        self.register("Hz", Dimension::FREQUENCY, 1.0);
        self.alias("hertz", "Hz");
    }

    fn register_force_units(&mut self) {
        self.register("N", Dimension::FORCE, 1.0);
        self.alias("newton", "N");
    }

    fn register_energy_units(&mut self) {
        self.register("J", Dimension::ENERGY, 1.0);
        self.register("Wh", Dimension::ENERGY, 3600.0);
        self.register("cal", Dimension::ENERGY, 4.184);
        self.register("eV", Dimension::ENERGY, 1.602_176_634e-19);
        self.alias("joule", "J");
        self.alias("joules", "J");
    }

    fn register_power_units(&mut self) {
        self.register("W", Dimension::POWER, 1.0);
        self.register("hp", Dimension::POWER, 745.699_871_582_27);
        self.alias("watt", "W");
        self.alias("watts", "W");
    }

    fn register_pressure_units(&mut self) {
        self.register("Pa", Dimension::PRESSURE, 1.0);
        self.register("bar", Dimension::PRESSURE, 1e5);
        self.register("atm", Dimension::PRESSURE, 101_325.0);
        self.alias("pascal", "Pa");
    }

    fn register_volume_units(&mut self) {
        self.register("L", Dimension::VOLUME, 1e-3);
        self.alias("liter", "L");
        self.alias("litre", "L");
    }

    fn register_electrical_units(&mut self) {
        // Volt: kg m^2 / (A s^3)
        self.register("V", Dimension::new([2, 1, -3, -1, 0, 0, 0]), 1.0);
        // Coulomb: A s
        self.register("C", Dimension::new([0, 0, 1, 1, 0, 0, 0]), 1.0);
        self.alias("volt", "V");
        self.alias("coulomb", "C");
    }

    fn register_constants(&mut self) {
        self.constant("c", 299_792_458.0, "m/s");
        self.alias_constant("speed_of_light", "c");
        self.constant("g_0", 9.806_65, "m/s^2");
        self.alias_constant("standard_gravity", "g_0");
        self.constant("pi", std::f64::consts::PI, "");
        self.constant("planck_constant", 6.626_070_15e-34, "J*s");
        self.constant("N_A", 6.022_140_76e23, "1/mol");
        self.alias_constant("avogadro_number", "N_A");
        self.constant("k_B", 1.380_649e-23, "J/K");
        self.alias_constant("boltzmann_constant", "k_B");
        self.constant("G", 6.674_30e-11, "m^3/kg/s^2");
        self.alias_constant("gravitational_constant", "G");
        self.constant("elementary_charge", 1.602_176_634e-19, "A*s");
        self.constant("electron_mass", 9.109_383_701_5e-31, "kg");
    }

    fn constant(&mut self, name: &str, magnitude: f64, unit_symbol: &str) {
        let unit = parse_unit(self, unit_symbol).expect("constant unit registered");
        self.constants
            .insert(name.to_string(), Quantity::new(magnitude, unit));
    }

    fn alias_constant(&mut self, name: &str, canonical: &str) {
        let quantity = self.constants[canonical].clone();
        self.constants.insert(name.to_string(), quantity);
    }

    /// Look up a single unit symbol. The micro sign is normalized to
    /// the ASCII `u` prefix, aliases are followed, and as a last
    /// resort a metric prefix is split off the front.
    pub fn resolve_unit(&self, symbol: &str) -> Result<Unit, CalcError> {
        let symbol = symbol.replace('µ', "u");
        if let Some(unit) = self.lookup(&symbol) {
            return Ok(unit);
        }
        for (prefix, factor) in PREFIXES {
            if let Some(rest) = symbol.strip_prefix(prefix) {
                if !rest.is_empty() {
                    if let Some(base) = self.lookup(rest) {
                        return Ok(Unit::new(
                            &symbol,
                            base.dimension,
                            base.to_si_factor * factor,
                        ));
                    }
                }
            }
        }
        Err(CalcError::UnknownUnit(symbol))
    }

    fn lookup(&self, symbol: &str) -> Option<Unit> {
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit.clone());
        }
        let canonical = self.aliases.get(symbol)?;
        self.units.get(canonical).cloned()
    }

    /// Resolve a bare identifier to a quantity. Named constants are
    /// checked first; any other identifier that names a unit yields
    /// one of that unit, so `g` is a gram and `h` an hour.
    pub fn resolve_constant(&self, name: &str) -> Result<Quantity, CalcError> {
        if let Some(quantity) = self.constants.get(name) {
            return Ok(quantity.clone());
        }
        if let Ok(unit) = parse_unit(self, name) {
            return Ok(Quantity::new(1.0, unit));
        }
        Err(CalcError::UnknownConstant(name.to_string()))
    }

    /// Preferred display units, in lookup order, used for result
    /// normalization when no explicit target unit is given.
    pub fn preferred_units(&self) -> &[Unit] {
        &self.preferred
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_lookup() {
        let m = UNITS.resolve_unit("m").unwrap();
        assert_eq!(m.dimension, Dimension::LENGTH);
        assert_eq!(m.to_si_factor, 1.0);
    }

    #[test]
    fn test_prefixed_lookup() {
        let km = UNITS.resolve_unit("km").unwrap();
        assert_eq!(km.dimension, Dimension::LENGTH);
        assert_eq!(km.to_si_factor, 1000.0);

        let kg = UNITS.resolve_unit("kg").unwrap();
        assert_eq!(kg.dimension, Dimension::MASS);
        assert_eq!(kg.to_si_factor, 1.0);

        let us = UNITS.resolve_unit("us").unwrap();
        assert_eq!(us.dimension, Dimension::TIME);
        assert!((us.to_si_factor - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn test_micro_sign_normalized() {
        let micro = UNITS.resolve_unit("µm").unwrap();
        let ascii = UNITS.resolve_unit("um").unwrap();
        assert_eq!(micro.dimension, ascii.dimension);
        assert_eq!(micro.to_si_factor, ascii.to_si_factor);
    }

    #[test]
    fn test_direct_entry_beats_prefix() {
        // "min" is a minute, never milli-inch or milli-anything
        let min = UNITS.resolve_unit("min").unwrap();
        assert_eq!(min.dimension, Dimension::TIME);
        assert_eq!(min.to_si_factor, 60.0);
    }

    #[test]
    fn test_aliases() {
        let hours = UNITS.resolve_unit("hours").unwrap();
        assert_eq!(hours.to_si_factor, 3600.0);
        assert_eq!(hours.symbol, "h");
    }

    #[test]
    fn test_unknown_unit() {
        assert!(matches!(
            UNITS.resolve_unit("zz"),
            Err(CalcError::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_constants() {
        let c = UNITS.resolve_constant("c").unwrap();
        assert_eq!(c.value, 299_792_458.0);
        assert_eq!(c.dimension(), Dimension::VELOCITY);

        let pi = UNITS.resolve_constant("pi").unwrap();
        assert!(pi.is_dimensionless());

        let gravity = UNITS.resolve_constant("standard_gravity").unwrap();
        assert_eq!(gravity.dimension(), Dimension::ACCELERATION);
    }

    #[test]
    fn test_bare_unit_name_is_one_of_that_unit() {
        let gram = UNITS.resolve_constant("g").unwrap();
        assert_eq!(gram.value, 1.0);
        assert_eq!(gram.dimension(), Dimension::MASS);
    }

    #[test]
    fn test_unknown_constant() {
        assert!(matches!(
            UNITS.resolve_constant("foo"),
            Err(CalcError::UnknownConstant(_))
        ));
    }

    #[test]
    fn test_preferred_units_order() {
        let symbols: Vec<&str> = UNITS
            .preferred_units()
            .iter()
            .map(|u| u.symbol.as_str())
            .collect();
        assert_eq!(symbols, ["s", "m", "kg", "W", "Wh"]);
    }
}
