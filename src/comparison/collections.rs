//! Comparison of two named collections, key by key.
//!
//! The pipeline is fixed: reconcile keys, reconcile types and shapes, then
//! compare every eligible key. Every key is compared even after a failure so
//! that one run reports all differences.

use super::direct::{compare_arrays, direct_compare};
use super::keys::{common_map_keys, Labels, DEFAULT_HERALD};
use super::overlap::log_overlaps;
use super::shapes::{matching_shape_keys, Reconcilable};
use super::tolerances::Tolerances;
use crate::errors::{Error, Result};
use crate::messages::builders::format_shape;
use crate::messages::{Notifier, Severity};
use crate::values::{Entry, NdArray, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// A collection element that knows how to compare itself with its peer.
pub trait CollectionItem: Reconcilable {
    fn compare_item(
        &self,
        other: &Self,
        tolerances: &Tolerances,
        label: &str,
        notifier: &dyn Notifier,
    ) -> Result<bool>;
}

impl CollectionItem for Value {
    fn compare_item(
        &self,
        other: &Self,
        tolerances: &Tolerances,
        label: &str,
        notifier: &dyn Notifier,
    ) -> Result<bool> {
        direct_compare(self, other, tolerances, label, notifier)
    }
}

impl CollectionItem for NdArray {
    fn compare_item(
        &self,
        other: &Self,
        tolerances: &Tolerances,
        label: &str,
        notifier: &dyn Notifier,
    ) -> Result<bool> {
        compare_arrays(self, other, tolerances, label, notifier)
    }
}

impl CollectionItem for Entry {
    /// Uncertain pairs are judged by interval overlap when a confidence
    /// level is set; everything else falls back to direct comparison.
    fn compare_item(
        &self,
        other: &Self,
        tolerances: &Tolerances,
        label: &str,
        notifier: &dyn Notifier,
    ) -> Result<bool> {
        match (self, other) {
            (Entry::Uncertain(a), Entry::Uncertain(b)) if tolerances.is_statistical() => {
                match log_overlaps(label, a, b, tolerances.sigma(), notifier) {
                    Err(Error::ShapeMismatch { first, second }) => {
                        notifier.notify(
                            Severity::Error,
                            &format!(
                                "{label}: values and uncertainties have different shapes: {} vs {}",
                                format_shape(&first),
                                format_shape(&second)
                            ),
                        );
                        Ok(false)
                    }
                    outcome => outcome,
                }
            }
            _ => direct_compare(self.value(), other.value(), tolerances, label, notifier),
        }
    }
}

/// Compare two collections and report every difference.
///
/// Returns `true` only if both collections hold the same keys, every common
/// key holds values of matching type and shape, and every such pair passes.
///
/// # Errors
///
/// Propagates comparator errors such as unsupported value kinds.
pub fn compare_collections<V: CollectionItem>(
    first: &BTreeMap<String, V>,
    second: &BTreeMap<String, V>,
    tolerances: &Tolerances,
    labels: &Labels,
    notifier: &dyn Notifier,
) -> Result<bool> {
    let common = common_map_keys(first, second, labels, DEFAULT_HERALD, notifier);
    let good = matching_shape_keys(&common, first, second, labels, notifier);

    let mut similar =
        common.len() == first.len() && common.len() == second.len() && good.len() == common.len();
    debug!(
        common = common.len(),
        comparable = good.len(),
        "Reconciled collection keys"
    );

    for key in &good {
        if let (Some(a), Some(b)) = (first.get(key), second.get(key)) {
            similar = a.compare_item(b, tolerances, key, notifier)? && similar;
        }
    }

    Ok(similar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::CollectingNotifier;
    use crate::values::NamedCollection;

    fn collection(entries: Vec<(&str, Entry)>) -> NamedCollection {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_identical_collections_are_similar() {
        let data = collection(vec![
            ("keff", Entry::uncertain(1.0, 0.001)),
            ("lib", Entry::from("ENDF")),
            ("n", Entry::from(3i64)),
        ]);
        let sink = CollectingNotifier::new();
        let ok = compare_collections(&data, &data, &Tolerances::default(), &Labels::default(), &sink)
            .unwrap();
        assert!(ok);
        assert_eq!(sink.count_at_least(Severity::Warning), 0);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_missing_key_fails_but_common_keys_still_compared() {
        let first = collection(vec![("a", Entry::from(1.0)), ("b", Entry::from(2.0))]);
        let second = collection(vec![("a", Entry::from(1.0))]);
        let sink = CollectingNotifier::new();

        let ok =
            compare_collections(&first, &second, &Tolerances::default(), &Labels::default(), &sink)
                .unwrap();

        assert!(!ok);
        let notices = sink.notices();
        assert_eq!(notices.len(), 2);
        assert!(notices[0].message.contains("Missing from second: b"));
        assert_eq!(notices[1].message, "a: values are identical");
    }

    #[test]
    fn test_no_short_circuit_after_failure() {
        let first = collection(vec![("a", Entry::from(1.0)), ("b", Entry::from(1.0))]);
        let second = collection(vec![("a", Entry::from(5.0)), ("b", Entry::from(1.0))]);
        let sink = CollectingNotifier::new();

        let ok =
            compare_collections(&first, &second, &Tolerances::default(), &Labels::default(), &sink)
                .unwrap();

        assert!(!ok);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.count_at_least(Severity::Error), 1);
    }

    #[test]
    fn test_uncertain_entries_use_overlap_when_statistical() {
        let first = collection(vec![("keff", Entry::uncertain(1.0, 0.05))]);
        let second = collection(vec![("keff", Entry::uncertain(1.15, 0.01))]);
        let labels = Labels::default();

        let sink = CollectingNotifier::new();
        let tol = Tolerances::new(0.0, 10.0, 3).unwrap();
        assert!(compare_collections(&first, &second, &tol, &labels, &sink).unwrap());
        assert!(sink.notices()[0].message.contains("confidence intervals overlap"));

        // without a confidence level the 15 % deviation is judged directly
        let sink = CollectingNotifier::new();
        let tol = Tolerances::new(0.0, 10.0, 0).unwrap();
        assert!(!compare_collections(&first, &second, &tol, &labels, &sink).unwrap());
        assert!(sink.notices()[0].message.contains("outside acceptable tolerances"));
    }

    #[test]
    fn test_uncertainty_shape_mismatch_is_reported_not_raised() {
        let flux = |u: Vec<f64>| {
            Entry::uncertain(NdArray::from_vec(vec![1.0, 2.0]), NdArray::from_vec(u))
        };
        let first = collection(vec![("flux", flux(vec![0.1, 0.1])), ("keff", Entry::from(1.0))]);
        let second = collection(vec![("flux", flux(vec![0.1])), ("keff", Entry::from(1.0))]);
        let sink = CollectingNotifier::new();

        let ok =
            compare_collections(&first, &second, &Tolerances::default(), &Labels::default(), &sink)
                .unwrap();

        assert!(!ok);
        let notices = sink.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].severity, Severity::Error);
        assert!(notices[0].message.contains("flux: (2,) vs (1,)"));
        assert_eq!(notices[1].message, "keff: values are identical");
    }

    #[test]
    fn test_inconsistent_uncertain_entry_is_reported_not_raised() {
        let lopsided =
            Entry::uncertain(NdArray::from_vec(vec![1.0, 2.0]), NdArray::from_vec(vec![0.1]));
        let first = collection(vec![("flux", lopsided.clone()), ("keff", Entry::from(1.0))]);
        let second = collection(vec![("flux", lopsided), ("keff", Entry::from(1.0))]);
        let sink = CollectingNotifier::new();

        let ok =
            compare_collections(&first, &second, &Tolerances::default(), &Labels::default(), &sink)
                .unwrap();

        assert!(!ok);
        let notices = sink.notices();
        assert_eq!(notices.len(), 2);
        assert!(notices[0]
            .message
            .starts_with("flux: values and uncertainties have different shapes: (2,) vs (1,)"));
        assert_eq!(notices[1].message, "keff: values are identical");
    }

    #[test]
    fn test_grid_like_collections_of_arrays() {
        let first: BTreeMap<String, NdArray> =
            [("X".to_string(), NdArray::from_vec(vec![0.0, 1.0, 2.0]))].into();
        let second: BTreeMap<String, NdArray> =
            [("X".to_string(), NdArray::from_vec(vec![0.0, 1.0, 2.5]))].into();
        let sink = CollectingNotifier::new();
        let ok =
            compare_collections(&first, &second, &Tolerances::default(), &Labels::default(), &sink)
                .unwrap();
        assert!(!ok);
    }
}
