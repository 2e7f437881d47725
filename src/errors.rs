//! Shared error types for comparison operations.
//!
//! Only structural and configuration problems are errors. Data-quality
//! problems found while comparing (different values, mismatched shapes,
//! missing keys) are reported through a [`Notifier`](crate::messages::Notifier)
//! and folded into the boolean result instead.

use crate::comparison::protocol::EntityKind;
use crate::objects::detector::DataKind;
use crate::values::ValueKind;
use thiserror::Error;

/// Main error type for tallycmp operations
#[derive(Debug, Error)]
pub enum Error {
    /// Upper tolerance below the lower tolerance
    #[error("Upper limit must be greater than lower. {upper} is not greater than {lower}")]
    ToleranceOrder { lower: f64, upper: f64 },

    /// Negative tolerance
    #[error("{name} must be non-negative, is {value}")]
    NegativeParameter { name: &'static str, value: f64 },

    /// NaN or infinite tolerance
    #[error("{name} must be a finite number, is {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    /// Entities whose kinds are not related by the subtype table
    #[error("Cannot compare against {other} - not the same kind nor a subtype of {this}")]
    IncompatibleKinds { this: EntityKind, other: EntityKind },

    /// Value kind the direct comparator does not handle
    #[error(
        "Direct comparison is not configured for values of kind {kind}. \
         Extend the comparator or use a dedicated compare routine for {kind} values"
    )]
    UnsupportedValue { kind: ValueKind },

    /// Element-wise operation on arrays of different shapes
    #[error("Arrays of shape {first:?} and {second:?} cannot be compared element-wise")]
    ShapeMismatch { first: Vec<usize>, second: Vec<usize> },

    /// Data length does not match the declared shape
    #[error("Array of shape {shape:?} requires {expected} values, got {actual}")]
    InvalidArray {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// Shape whose element count overflows `usize`
    #[error("Array shape {0:?} has more elements than can be addressed")]
    ShapeOverflow(Vec<usize>),

    /// Slicing a detector whose tallies do not match its bin axes
    #[error("Slicing requires detector {0} to be reshaped")]
    NotReshaped(String),

    /// Slicing a data set the detector does not carry
    #[error("{data} data for detector {detector} is missing. Cannot perform slicing")]
    MissingData { data: DataKind, detector: String },

    /// Fixed index outside the bin axis
    #[error("Index {index} out of bounds for axis {axis} with length {len}")]
    IndexOutOfBounds {
        axis: String,
        index: usize,
        len: usize,
    },

    /// Grid or bin axis lookup failed
    #[error("No index {name} found on detector. Bin indexes: {available}")]
    UnknownAxis { name: String, available: String },

    /// Token that is not a number
    #[error("Could not convert {token:?} to a number")]
    ParseNumber { token: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by bad caller-supplied comparison parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ToleranceOrder { .. }
                | Self::NegativeParameter { .. }
                | Self::NonFiniteParameter { .. }
                | Self::IncompatibleKinds { .. }
                | Self::Configuration(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
