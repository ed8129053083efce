//! unacalc core - fundamental types
//!
//! This crate provides the types shared by the whole workspace:
//! - `CalcError`: every way an evaluation can fail
//! - `Instant`: a point in calendar time with nanosecond precision

mod error;
mod instant;

pub use error::CalcError;
pub use instant::{DateTimeError, Instant};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{CalcError, Instant};
}
