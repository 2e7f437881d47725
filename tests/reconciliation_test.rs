// Integration tests for key and shape reconciliation
// These tests exercise the public reconciliation API the way callers use it

use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, BTreeSet};
use tallycmp::comparison::keys::{common_map_keys, DEFAULT_HERALD};
use tallycmp::comparison::shapes::{matching_shape_keys, reconcile_shapes};
use tallycmp::{CollectingNotifier, Labels, NdArray, Severity};

fn keys(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|k| k.to_string()).collect()
}

#[test]
fn test_common_keys_report_both_missing_sides_once() {
    let first: BTreeMap<String, i64> = [("a".to_string(), 1), ("b".to_string(), 2)].into();
    let second: BTreeMap<String, i64> = [("b".to_string(), 3), ("c".to_string(), 4)].into();
    let sink = CollectingNotifier::new();

    let common = common_map_keys(&first, &second, &Labels::default(), DEFAULT_HERALD, &sink);

    assert_eq!(common, keys(&["b"]));
    let notices = sink.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
    assert!(notices[0].message.contains('a'));
    assert!(notices[0].message.contains('c'));
}

#[test]
fn test_shape_reconciliation_keeps_matching_arrays() {
    let first: BTreeMap<String, NdArray> = [
        ("x".to_string(), NdArray::zeros(vec![3])),
        ("y".to_string(), NdArray::zeros(vec![2])),
    ]
    .into();
    let second: BTreeMap<String, NdArray> = [
        ("x".to_string(), NdArray::zeros(vec![3])),
        ("y".to_string(), NdArray::zeros(vec![5])),
    ]
    .into();
    let sink = CollectingNotifier::new();

    let good = matching_shape_keys(&keys(&["x", "y"]), &first, &second, &Labels::default(), &sink);

    assert_eq!(good, keys(&["x"]));
    assert_eq!(sink.len(), 1);
    assert!(sink.notices()[0].message.contains("(2,) vs (5,)"));
}

#[test]
fn test_reconciliation_is_pure_until_reported() {
    let first: BTreeMap<String, NdArray> = [("m".to_string(), NdArray::zeros(vec![2, 2]))].into();
    let second: BTreeMap<String, NdArray> = [("m".to_string(), NdArray::zeros(vec![4]))].into();

    let report = reconcile_shapes(&keys(&["m"]), &first, &second);

    assert!(!report.is_clean());
    assert_eq!(report.bad_shapes["m"], (vec![2, 2], vec![4]));
}
