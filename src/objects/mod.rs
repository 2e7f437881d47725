//! Comparable entities.
//!
//! # Module Structure
//!
//! - `results` - named collections of scalar, string and array results
//! - `detector` - binned tallies with slicing and grid helpers

pub mod detector;
pub mod results;

pub use detector::{Axis, DataKind, Detector};
pub use results::ResultsCollection;
