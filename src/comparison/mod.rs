//! Numeric comparison engine.
//!
//! # Module Structure
//!
//! - `verdict` - outcome classification and per-verdict notification
//! - `tolerances` - caller options and validated tolerance pairs
//! - `direct` - value-against-value comparison with the tolerance ladder
//! - `overlap` - confidence-interval overlap for uncertain quantities
//! - `keys` - key reconciliation between two collections
//! - `shapes` - type and shape reconciliation of common keys
//! - `collections` - whole-collection comparison built on the above
//! - `protocol` - entity kinds and the [`Comparable`] trait

pub mod collections;
pub mod direct;
pub mod keys;
pub mod overlap;
pub mod protocol;
pub mod shapes;
pub mod tolerances;
pub mod verdict;

pub use collections::{compare_collections, CollectionItem};
pub use direct::{direct_compare, LOWER_LIM_DIVISION};
pub use keys::{common_keys, common_map_keys, Labels, DEFAULT_HERALD};
pub use overlap::{log_overlaps, overlaps};
pub use protocol::{check_compatible, Comparable, EntityKind};
pub use shapes::{matching_shape_keys, Reconcilable};
pub use tolerances::{CompareOptions, Tolerances};
pub use verdict::Verdict;
