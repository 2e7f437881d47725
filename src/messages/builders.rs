//! Pure message builder functions for reconciliation reports.
//!
//! All functions in this module are pure - they take inputs and return
//! formatted strings without any side effects.

use crate::comparison::keys::Labels;
use crate::messages::Severity;
use crate::values::TypeTag;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

// =============================================================================
// Shared Formatting
// =============================================================================

/// Pure: Format a shape the way array libraries print it, e.g. `(2,)`
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [only] => format!("({only},)"),
        _ => {
            let dims: Vec<String> = shape.iter().map(ToString::to_string).collect();
            format!("({})", dims.join(", "))
        }
    }
}

/// Pure: Join keys with commas in set order
pub fn join_keys<K: Display>(keys: &BTreeSet<K>) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Reconciliation Reports
// =============================================================================

/// Pure: Build the missing-keys report, `None` when nothing is missing
pub fn build_missing_keys_message<K: Display>(
    labels: &Labels,
    missing_from_first: &BTreeSet<K>,
    missing_from_second: &BTreeSet<K>,
) -> Option<String> {
    if missing_from_first.is_empty() && missing_from_second.is_empty() {
        return None;
    }
    let mut lines = vec![format!(
        "Inconsistent keys between {} and {}:",
        labels.first, labels.second
    )];
    if !missing_from_first.is_empty() {
        lines.push(format!(
            "Missing from {}: {}",
            labels.first,
            join_keys(missing_from_first)
        ));
    }
    if !missing_from_second.is_empty() {
        lines.push(format!(
            "Missing from {}: {}",
            labels.second,
            join_keys(missing_from_second)
        ));
    }
    Some(lines.join("\n\t"))
}

/// Pure: Build the type-mismatch report, `None` when all types agree
pub fn build_bad_types_message<K: Display>(
    labels: &Labels,
    bad_types: &BTreeMap<K, (TypeTag, TypeTag)>,
) -> Option<String> {
    if bad_types.is_empty() {
        return None;
    }
    let mut lines = vec![format!(
        "Values in {} and {} have different types:",
        labels.first, labels.second
    )];
    lines.extend(
        bad_types
            .iter()
            .map(|(key, (first, second))| format!("{key}: {first} vs {second}")),
    );
    Some(lines.join("\n\t"))
}

/// Pure: Build the shape-mismatch report, `None` when all shapes agree
pub fn build_bad_shapes_message<K: Display>(
    labels: &Labels,
    bad_shapes: &BTreeMap<K, (Vec<usize>, Vec<usize>)>,
) -> Option<String> {
    if bad_shapes.is_empty() {
        return None;
    }
    let mut lines = vec![format!(
        "Arrays in {} and {} have different shapes:",
        labels.first, labels.second
    )];
    lines.extend(bad_shapes.iter().map(|(key, (first, second))| {
        format!("{key}: {} vs {}", format_shape(first), format_shape(second))
    }));
    Some(lines.join("\n\t"))
}

/// Pure: Explain why a herald severity cannot carry a missing-keys report
pub fn build_misconfigured_herald_message(herald: Severity, fallback: Severity) -> String {
    format!(
        "Missing-key reports cannot be heralded at {herald} severity; \
         reporting at {fallback} instead"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::ValueKind;

    #[test]
    fn test_format_shape() {
        assert_eq!(format_shape(&[]), "()");
        assert_eq!(format_shape(&[2]), "(2,)");
        assert_eq!(format_shape(&[2, 3]), "(2, 3)");
    }

    #[test]
    fn test_missing_keys_message_lists_both_sides() {
        let labels = Labels::new("ref", "test");
        let missing_from_first: BTreeSet<&str> = ["c", "b"].into();
        let missing_from_second: BTreeSet<&str> = ["a"].into();
        let msg =
            build_missing_keys_message(&labels, &missing_from_first, &missing_from_second).unwrap();
        assert_eq!(
            msg,
            "Inconsistent keys between ref and test:\n\t\
             Missing from ref: b, c\n\t\
             Missing from test: a"
        );
    }

    #[test]
    fn test_missing_keys_message_empty() {
        let empty: BTreeSet<&str> = BTreeSet::new();
        assert!(build_missing_keys_message(&Labels::default(), &empty, &empty).is_none());
    }

    #[test]
    fn test_bad_types_message() {
        let tag = |kind| TypeTag {
            kind,
            uncertain: false,
        };
        let bad: BTreeMap<&str, _> = [("x", (tag(ValueKind::Float), tag(ValueKind::Int)))].into();
        let msg = build_bad_types_message(&Labels::default(), &bad).unwrap();
        assert!(msg.ends_with("x: float vs int"), "{msg}");
    }

    #[test]
    fn test_bad_shapes_message() {
        let bad: BTreeMap<&str, _> = [("y", (vec![2], vec![5]))].into();
        let msg = build_bad_shapes_message(&Labels::default(), &bad).unwrap();
        assert!(msg.ends_with("y: (2,) vs (5,)"), "{msg}");
    }
}
