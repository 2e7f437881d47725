//! Shape reconciliation: which common keys hold comparable values.
//!
//! Problems are collected over the whole key set and reported once per
//! class (missing, type, shape) after the loop, never per key.

use super::keys::Labels;
use crate::messages::builders::{
    build_bad_shapes_message, build_bad_types_message, build_missing_keys_message,
};
use crate::messages::{Notifier, Severity};
use crate::values::{Entry, NdArray, TypeTag, Value, ValueKind};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

/// Anything that can be checked for type and shape agreement.
pub trait Reconcilable {
    /// Strict type identity; int and float differ here.
    fn type_tag(&self) -> TypeTag;

    /// Array shape, `None` for non-array values.
    fn shape(&self) -> Option<&[usize]>;

    /// Shape of an attached uncertainty, `()` for scalar ones.
    fn uncertainty_shape(&self) -> Option<&[usize]> {
        None
    }
}

impl Reconcilable for Value {
    fn type_tag(&self) -> TypeTag {
        TypeTag {
            kind: self.kind(),
            uncertain: false,
        }
    }

    fn shape(&self) -> Option<&[usize]> {
        Value::shape(self)
    }
}

impl Reconcilable for Entry {
    fn type_tag(&self) -> TypeTag {
        Entry::type_tag(self)
    }

    fn shape(&self) -> Option<&[usize]> {
        self.value().shape()
    }

    fn uncertainty_shape(&self) -> Option<&[usize]> {
        match self {
            Entry::Uncertain(u) => Some(u.uncertainty.shape().unwrap_or_default()),
            Entry::Plain(_) => None,
        }
    }
}

impl Reconcilable for NdArray {
    fn type_tag(&self) -> TypeTag {
        TypeTag {
            kind: ValueKind::Array,
            uncertain: false,
        }
    }

    fn shape(&self) -> Option<&[usize]> {
        Some(NdArray::shape(self))
    }
}

/// Outcome of reconciling a key set, before anything is reported.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeReport<K: Ord> {
    pub good: BTreeSet<K>,
    pub missing_from_first: BTreeSet<K>,
    pub missing_from_second: BTreeSet<K>,
    pub bad_types: BTreeMap<K, (TypeTag, TypeTag)>,
    pub bad_shapes: BTreeMap<K, (Vec<usize>, Vec<usize>)>,
}

impl<K: Ord> ShapeReport<K> {
    pub fn is_clean(&self) -> bool {
        self.missing_from_first.is_empty()
            && self.missing_from_second.is_empty()
            && self.bad_types.is_empty()
            && self.bad_shapes.is_empty()
    }
}

/// Pure: Sort every key into good, missing, bad-type or bad-shape.
pub fn reconcile_shapes<K, V>(
    keys: &BTreeSet<K>,
    first: &BTreeMap<K, V>,
    second: &BTreeMap<K, V>,
) -> ShapeReport<K>
where
    K: Ord + Clone,
    V: Reconcilable,
{
    let mut report = ShapeReport {
        good: BTreeSet::new(),
        missing_from_first: BTreeSet::new(),
        missing_from_second: BTreeSet::new(),
        bad_types: BTreeMap::new(),
        bad_shapes: BTreeMap::new(),
    };

    for key in keys {
        let (v0, v1) = match (first.get(key), second.get(key)) {
            (Some(v0), Some(v1)) => (v0, v1),
            (v0, v1) => {
                if v0.is_none() {
                    report.missing_from_first.insert(key.clone());
                }
                if v1.is_none() {
                    report.missing_from_second.insert(key.clone());
                }
                continue;
            }
        };

        let (t0, t1) = (v0.type_tag(), v1.type_tag());
        if t0 != t1 {
            report.bad_types.insert(key.clone(), (t0, t1));
            continue;
        }
        if let (Some(s0), Some(s1)) = (v0.shape(), v1.shape()) {
            if s0 != s1 {
                report
                    .bad_shapes
                    .insert(key.clone(), (s0.to_vec(), s1.to_vec()));
                continue;
            }
        }
        let (u0, u1) = (v0.uncertainty_shape(), v1.uncertainty_shape());
        if u0 != u1 {
            report.bad_shapes.insert(
                key.clone(),
                (u0.unwrap_or_default().to_vec(), u1.unwrap_or_default().to_vec()),
            );
            continue;
        }
        report.good.insert(key.clone());
    }

    report
}

/// Keys from `keys` whose values agree in type and, for arrays, shape.
///
/// Emits at most three error notifications: missing keys, type mismatches
/// and shape mismatches.
pub fn matching_shape_keys<K, V>(
    keys: &BTreeSet<K>,
    first: &BTreeMap<K, V>,
    second: &BTreeMap<K, V>,
    labels: &Labels,
    notifier: &dyn Notifier,
) -> BTreeSet<K>
where
    K: Ord + Clone + Display,
    V: Reconcilable,
{
    let report = reconcile_shapes(keys, first, second);

    let messages = [
        build_missing_keys_message(
            labels,
            &report.missing_from_first,
            &report.missing_from_second,
        ),
        build_bad_types_message(labels, &report.bad_types),
        build_bad_shapes_message(labels, &report.bad_shapes),
    ];
    for message in messages.into_iter().flatten() {
        notifier.notify(Severity::Error, &message);
    }

    report.good
}
