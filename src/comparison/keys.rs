//! Key reconciliation between two collections.
//!
//! Reconciliation never fails: keys present on only one side are reported
//! once, and the intersection is returned regardless.

use crate::messages::builders::{build_misconfigured_herald_message, build_missing_keys_message};
use crate::messages::{Notifier, Severity};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

/// Severity used for missing-key reports unless the caller picks another
pub const DEFAULT_HERALD: Severity = Severity::Error;

/// Human-readable names of the two sides of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub first: String,
    pub second: String,
}

impl Labels {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::new("first", "second")
    }
}

/// Keys present in both `first` and `second`.
///
/// When the key sets differ, one notification at `herald` severity lists
/// what each side is missing. A herald below [`Severity::Warning`] would
/// hide missing data, so it is treated as a misconfiguration: a critical
/// notice explains the fallback and the report goes out at
/// [`DEFAULT_HERALD`] instead.
pub fn common_keys<K, I, J>(
    first: I,
    second: J,
    labels: &Labels,
    herald: Severity,
    notifier: &dyn Notifier,
) -> BTreeSet<K>
where
    K: Ord + Clone + Display,
    I: IntoIterator<Item = K>,
    J: IntoIterator<Item = K>,
{
    let first: BTreeSet<K> = first.into_iter().collect();
    let second: BTreeSet<K> = second.into_iter().collect();

    let missing_from_first: BTreeSet<K> = second.difference(&first).cloned().collect();
    let missing_from_second: BTreeSet<K> = first.difference(&second).cloned().collect();
    if let Some(message) =
        build_missing_keys_message(labels, &missing_from_first, &missing_from_second)
    {
        let severity = resolve_herald(herald, notifier);
        notifier.notify(severity, &message);
    }

    first.intersection(&second).cloned().collect()
}

/// [`common_keys`] over the key domains of two maps.
pub fn common_map_keys<K, V, W>(
    first: &BTreeMap<K, V>,
    second: &BTreeMap<K, W>,
    labels: &Labels,
    herald: Severity,
    notifier: &dyn Notifier,
) -> BTreeSet<K>
where
    K: Ord + Clone + Display,
{
    common_keys(
        first.keys().cloned(),
        second.keys().cloned(),
        labels,
        herald,
        notifier,
    )
}

fn resolve_herald(herald: Severity, notifier: &dyn Notifier) -> Severity {
    if herald >= Severity::Warning {
        return herald;
    }
    notifier.notify(
        Severity::Critical,
        &build_misconfigured_herald_message(herald, DEFAULT_HERALD),
    );
    DEFAULT_HERALD
}
