// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod comparison;
pub mod config;
pub mod errors;
pub mod messages;
pub mod objects;
pub mod settings;
pub mod utils;
pub mod values;

// Re-export commonly used types
pub use crate::comparison::{
    common_keys, compare_collections, direct_compare, log_overlaps, matching_shape_keys, overlaps,
    Comparable, CompareOptions, EntityKind, Labels, Tolerances, Verdict,
};

pub use crate::errors::{Error, Result};

pub use crate::messages::{
    CollectingNotifier, Notifier, NullNotifier, Severity, TracingNotifier, Verbosity,
    VerbosityFilter,
};

pub use crate::objects::{Axis, DataKind, Detector, ResultsCollection};

pub use crate::values::{Entry, NamedCollection, NdArray, Uncertain, Value};
