//! Evaluation errors
//!
//! Errors are values: every stage (lexing, parsing, resolution,
//! evaluation, conversion) returns exactly one typed result or one
//! typed error. Nothing is swallowed and nothing retries.

use crate::instant::DateTimeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type covering every failure mode of a single evaluation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum CalcError {
    /// Malformed or incomplete input, including trailing unparsed text.
    #[error("syntax error at position {position}: {detail}")]
    Syntax { position: usize, detail: String },

    /// A unit symbol not present in the registry.
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// An identifier that is neither a constant nor a unit name.
    #[error("unknown constant: {0}")]
    UnknownConstant(String),

    /// Operands whose dimensions cannot be combined by the operator.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: String, right: String },

    /// Exponent of `^` carries a physical dimension.
    #[error("exponent must be dimensionless, got {0}")]
    NonDimensionlessExponent(String),

    /// Operator not defined between temporal operands.
    #[error("unsupported temporal operation: {0}")]
    UnsupportedTemporalOperation(String),

    /// `in <unit>` target has a different dimension than the result.
    #[error("cannot convert result in {result} to {target}: incompatible dimensions")]
    IncompatibleConversionUnit { result: String, target: String },
}

impl CalcError {
    /// Syntax error helper used by the lexer and parser.
    pub fn syntax(position: usize, detail: impl Into<String>) -> Self {
        CalcError::Syntax {
            position,
            detail: detail.into(),
        }
    }
}

impl From<DateTimeError> for CalcError {
    fn from(err: DateTimeError) -> Self {
        // A bad date literal is malformed input to the grammar.
        CalcError::Syntax {
            position: 0,
            detail: err.to_string(),
        }
    }
}
