//! Construction and evaluation errors for the core value types.

use crate::bounds::Axis;
use thiserror::Error;

/// Errors raised when constructing or transforming a `Bounds3D`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    /// A lower bound exceeds the matching upper bound.
    #[error("Bounds inverted on {axis} axis: lo {lo} > hi {hi}")]
    Inverted { axis: Axis, lo: f64, hi: f64 },

    /// A coordinate is NaN or infinite.
    #[error("Non-finite coordinate on {axis} axis: {value}")]
    NonFinite { axis: Axis, value: f64 },
}

/// Errors raised when a predicate reads a payload field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    /// The payload has no field with the requested name.
    #[error("Payload field '{field}' is missing")]
    Missing { field: String },

    /// The field exists but holds a value of the wrong type.
    #[error("Payload field '{field}' is not a {expected}")]
    WrongType { field: String, expected: &'static str },
}
