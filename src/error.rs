//! Error type shared by all signal operations.

use thiserror::Error;

/// Result type for signal operations.
pub type Result<T> = std::result::Result<T, SignalError>;

/// Errors raised by [`Signal`](crate::Signal) operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("{operation}: signal has no samples")]
    EmptySignal { operation: &'static str },

    #[error("{operation}: division by zero (signal has zero range)")]
    DivisionByZero { operation: &'static str },

    #[error("coordinate count {coordinates} does not match sample count {samples}")]
    CoordinateMismatch { samples: usize, coordinates: usize },

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A sample could not be used as a lookup-table index.
    #[error("sample {value} at index {index} is not a valid lookup-table index")]
    LutIndex { index: usize, value: f64 },

    #[error("model fit did not converge after {iterations} iterations (cost {cost})")]
    DidNotConverge { iterations: usize, cost: f64 },

    #[error("model fit produced a singular normal system")]
    SingularSystem,
}

impl SignalError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SignalError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
