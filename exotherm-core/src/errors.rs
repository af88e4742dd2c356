use crate::units::{Dimension, ParseError};
use thiserror::Error;

/// Error type for invalid operations.
///
/// Every variant is fatal: they describe malformed input, so nothing in this
/// workspace retries or recovers from them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExothermError {
    #[error("Dimension mismatch in {context}. Expected {expected}, got {found}")]
    DimensionMismatch {
        context: String,
        expected: Dimension,
        found: Dimension,
    },
    #[error(transparent)]
    UnitParse(#[from] ParseError),
    #[error("Shape mismatch in {context}. Expected {expected:?}, got {found:?}")]
    ShapeMismatch {
        context: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("Time axis must contain at least one sample")]
    EmptyTimeAxis,
    #[error("Time axis must be strictly increasing (sample {index} is {value} s, previous is {previous} s)")]
    NonMonotonicTimeAxis {
        index: usize,
        value: f64,
        previous: f64,
    },
    #[error("Time axis must be uniformly spaced. Step {index} is {found} s, expected {expected} s")]
    NonUniformTimeAxis {
        index: usize,
        expected: f64,
        found: f64,
    },
    #[error("Invalid value for {name}: {value} ({reason})")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ExothermError {
    pub(crate) fn dimension_mismatch(context: &str, expected: Dimension, found: Dimension) -> Self {
        Self::DimensionMismatch {
            context: context.to_string(),
            expected,
            found,
        }
    }

    /// Shorthand for [`ExothermError::InvalidParameter`].
    pub fn invalid_parameter(name: &str, value: f64, reason: &str) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        }
    }

    /// Shorthand for [`ExothermError::ShapeMismatch`].
    pub fn shape_mismatch(context: &str, expected: &[usize], found: &[usize]) -> Self {
        Self::ShapeMismatch {
            context: context.to_string(),
            expected: expected.to_vec(),
            found: found.to_vec(),
        }
    }
}

/// Convenience type for `Result<T, ExothermError>`.
pub type ExothermResult<T> = Result<T, ExothermError>;
