//! unacalc units - physical quantities and dimensional analysis
//!
//! Provides unit-aware quantities over a fixed SI-derived registry:
//! - `Dimension`: exponents over the 7 SI base dimensions
//! - `Unit`: a symbol with its dimension and conversion-to-base factor
//! - `Quantity`: an f64 magnitude paired with a `Unit`
//! - `UnitRegistry`/`UNITS`: the process-wide read-only unit and
//!   constant table, built once and never mutated
//! - `parse_unit`: compound unit-symbol parsing (`km/h^2`, `kg*m/s^2`)

mod dimension;
mod parse;
mod quantity;
mod registry;
mod unit;

pub use dimension::Dimension;
pub use parse::parse_unit;
pub use quantity::Quantity;
pub use registry::{UnitRegistry, UNITS};
pub use unit::Unit;
