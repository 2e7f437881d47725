//! Direct comparison of two values against a tolerance pair.
//!
//! Strings must match exactly. Numeric scalars and arrays are reduced to a
//! single metric, the maximum element-wise percent difference relative to
//! the first (reference) value, and classified with the ladder in
//! [`classify_metric`]. One outlying element is enough to fail an array.

use super::tolerances::Tolerances;
use super::verdict::{report, Verdict};
use crate::errors::{Error, Result};
use crate::messages::Notifier;
use crate::values::{NdArray, Value};
use std::fmt::Display;

/// Lower limit for a reference value to be used as a divisor
pub const LOWER_LIM_DIVISION: f64 = 1e-8;

/// Verdict plus the reduced metric it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub verdict: Verdict,
    /// Maximum percent difference; `None` for strings and type mismatches
    pub metric: Option<f64>,
}

impl Classification {
    fn without_metric(verdict: Verdict) -> Self {
        Self {
            verdict,
            metric: None,
        }
    }
}

/// Pure: Percent difference of `second` from the reference `first`.
///
/// References at or below [`LOWER_LIM_DIVISION`] (including negative ones)
/// are not divided by, leaving the absolute difference scaled by 100.
pub fn relative_difference(first: f64, second: f64) -> f64 {
    let diff = (first - second).abs() * 100.0;
    if first > LOWER_LIM_DIVISION {
        diff / first
    } else {
        diff
    }
}

/// Pure: Largest element-wise [`relative_difference`] between two arrays.
///
/// NaN anywhere yields NaN. Empty arrays yield zero.
pub fn max_relative_difference(first: &NdArray, second: &NdArray) -> Result<f64> {
    let diffs = first.zip_with(second, relative_difference)?;
    Ok(diffs.iter().fold(0.0, |acc, d| {
        if acc.is_nan() || d.is_nan() {
            f64::NAN
        } else {
            acc.max(d)
        }
    }))
}

/// Pure: Map a reduced metric onto a verdict.
///
/// Checked in order: below 1e-8 is identical, at or below `lower` is
/// acceptable, at or above `upper` fails, anything between passes with a
/// warning. A NaN metric fails every comparison and so lands on the last
/// rung, a warning.
pub fn classify_metric(metric: f64, lower: f64, upper: f64) -> Verdict {
    if metric < LOWER_LIM_DIVISION {
        Verdict::Identical
    } else if metric <= lower {
        Verdict::AcceptableLow
    } else if metric >= upper {
        Verdict::OutsideTolerance
    } else {
        Verdict::AcceptableHigh
    }
}

/// Pure: Classify two values without emitting anything.
///
/// # Errors
///
/// - [`Error::UnsupportedValue`] for booleans, lists and maps
/// - [`Error::ShapeMismatch`] for arrays of different shapes
pub fn classify_values(
    first: &Value,
    second: &Value,
    lower: f64,
    upper: f64,
) -> Result<Classification> {
    let (kind0, kind1) = (first.kind(), second.kind());
    if !(kind0.is_numeric_scalar() && kind1.is_numeric_scalar()) && kind0 != kind1 {
        return Ok(Classification::without_metric(Verdict::DifferentTypes));
    }

    let metric = match (first, second) {
        (Value::Str(a), Value::Str(b)) => {
            let verdict = if a == b {
                Verdict::Identical
            } else {
                Verdict::NotIdentical
            };
            return Ok(Classification::without_metric(verdict));
        }
        (Value::Array(a), Value::Array(b)) => return classify_arrays(a, b, lower, upper),
        _ => match (first.as_f64(), second.as_f64()) {
            (Some(a), Some(b)) => relative_difference(a, b),
            _ => return Err(Error::UnsupportedValue { kind: kind0 }),
        },
    };

    Ok(Classification {
        verdict: classify_metric(metric, lower, upper),
        metric: Some(metric),
    })
}

/// Pure: Classify two arrays of equal shape by their largest deviation.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] for arrays of different shapes
pub fn classify_arrays(
    first: &NdArray,
    second: &NdArray,
    lower: f64,
    upper: f64,
) -> Result<Classification> {
    let metric = max_relative_difference(first, second)?;
    Ok(Classification {
        verdict: classify_metric(metric, lower, upper),
        metric: Some(metric),
    })
}

fn report_classification(
    classification: Classification,
    label: &str,
    first: &dyn Display,
    second: &dyn Display,
    notifier: &dyn Notifier,
) -> bool {
    let verdict = classification.verdict;
    let detail = classification
        .metric
        .filter(|_| verdict != Verdict::Identical)
        .map(|m| format!("maximum relative difference: {m:.5} %"));
    report(notifier, verdict, label, first, second, detail.as_deref())
}

/// Compare two values and emit one notification describing the outcome.
///
/// Returns `true` for identical or within-tolerance values.
pub fn direct_compare(
    first: &Value,
    second: &Value,
    tolerances: &Tolerances,
    label: &str,
    notifier: &dyn Notifier,
) -> Result<bool> {
    let classification = classify_values(first, second, tolerances.lower(), tolerances.upper())?;

    if classification.verdict == Verdict::DifferentTypes {
        return Ok(report(
            notifier,
            classification.verdict,
            label,
            &first.kind(),
            &second.kind(),
            None,
        ));
    }
    Ok(report_classification(
        classification,
        label,
        first,
        second,
        notifier,
    ))
}

/// [`direct_compare`] for borrowed arrays.
pub fn compare_arrays(
    first: &NdArray,
    second: &NdArray,
    tolerances: &Tolerances,
    label: &str,
    notifier: &dyn Notifier,
) -> Result<bool> {
    let classification = classify_arrays(first, second, tolerances.lower(), tolerances.upper())?;
    Ok(report_classification(
        classification,
        label,
        first,
        second,
        notifier,
    ))
}
