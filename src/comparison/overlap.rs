//! Confidence-interval overlap for quantities with statistical uncertainty.
//!
//! Each value `x` with uncertainty `u` spans `[x - w, x + w]` where the
//! half-width is `w = sigma * u * |x|` for relative uncertainties and
//! `w = sigma * u` for absolute ones. Two quantities agree when every pair
//! of corresponding intervals overlaps.

use super::verdict::{report, Verdict};
use crate::errors::{Error, Result};
use crate::messages::Notifier;
use crate::values::{NdArray, Uncertain, Value};

/// Scalars become zero-dimensional arrays; other non-arrays are rejected.
fn numeric_array(value: &Value) -> Result<NdArray> {
    match value {
        Value::Array(array) => Ok(array.clone()),
        other => match other.as_f64() {
            Some(x) => NdArray::new(Vec::new(), vec![x]),
            None => Err(Error::UnsupportedValue { kind: other.kind() }),
        },
    }
}

fn require_same_shape(first: &NdArray, second: &NdArray) -> Result<()> {
    if first.shape() == second.shape() {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            first: first.shape().to_vec(),
            second: second.shape().to_vec(),
        })
    }
}

/// Pure: Element-wise overlap flags of two uncertain quantities.
///
/// # Errors
///
/// - [`Error::UnsupportedValue`] if any operand is not numeric
/// - [`Error::ShapeMismatch`] if values, uncertainties or the two sides
///   disagree in shape
pub fn overlaps(
    first: &Uncertain,
    second: &Uncertain,
    sigma: u32,
    relative: bool,
) -> Result<Vec<bool>> {
    let x0 = numeric_array(&first.value)?;
    let u0 = numeric_array(&first.uncertainty)?;
    let x1 = numeric_array(&second.value)?;
    let u1 = numeric_array(&second.uncertainty)?;
    require_same_shape(&x0, &u0)?;
    require_same_shape(&x1, &u1)?;
    require_same_shape(&x0, &x1)?;

    let sigma = f64::from(sigma);
    let half_width = |x: f64, u: f64| {
        let scale = if relative { x.abs() } else { 1.0 };
        sigma * u * scale
    };

    Ok(x0
        .iter()
        .zip(u0.iter())
        .zip(x1.iter().zip(u1.iter()))
        .map(|((a, ua), (b, ub))| {
            let (wa, wb) = (half_width(a, ua), half_width(b, ub));
            a - wa <= b + wb && b - wb <= a + wa
        })
        .collect())
}

/// Check overlap of relative-uncertainty quantities and emit one notification.
pub fn log_overlaps(
    label: &str,
    first: &Uncertain,
    second: &Uncertain,
    sigma: u32,
    notifier: &dyn Notifier,
) -> Result<bool> {
    let flags = overlaps(first, second, sigma, true)?;
    let disjoint = flags.iter().filter(|overlap| !**overlap).count();

    if disjoint == 0 {
        return Ok(report(
            notifier,
            Verdict::WithinUncertainty,
            label,
            first,
            second,
            None,
        ));
    }
    let detail = format!(
        "{disjoint} of {} confidence intervals at {sigma} sigma do not overlap",
        flags.len()
    );
    Ok(report(
        notifier,
        Verdict::OutsideUncertainty,
        label,
        first,
        second,
        Some(&detail),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{CollectingNotifier, Severity};

    fn pair(value: impl Into<Value>, uncertainty: impl Into<Value>) -> Uncertain {
        Uncertain {
            value: value.into(),
            uncertainty: uncertainty.into(),
        }
    }

    fn arr(data: &[f64]) -> NdArray {
        NdArray::from_vec(data.to_vec())
    }

    #[test]
    fn test_scalar_intervals() {
        // 1.0 +/- 2*0.05 = [0.9, 1.1]; 1.15 +/- 2*0.01*1.15 = [1.127, 1.173]
        let flags = overlaps(&pair(1.0, 0.05), &pair(1.15, 0.01), 2, true).unwrap();
        assert_eq!(flags, vec![false]);
        let flags = overlaps(&pair(1.0, 0.05), &pair(1.15, 0.01), 3, true).unwrap();
        assert_eq!(flags, vec![true]);
    }

    #[test]
    fn test_absolute_uncertainty() {
        let flags = overlaps(&pair(10.0, 1.0), &pair(12.5, 1.0), 1, false).unwrap();
        assert_eq!(flags, vec![false]);
        let flags = overlaps(&pair(10.0, 1.0), &pair(12.0, 1.0), 1, false).unwrap();
        assert_eq!(flags, vec![true]);
    }

    #[test]
    fn test_zero_sigma_requires_equality() {
        assert_eq!(overlaps(&pair(1.0, 0.5), &pair(1.0, 0.5), 0, true).unwrap(), vec![true]);
        assert_eq!(overlaps(&pair(1.0, 0.5), &pair(1.01, 0.5), 0, true).unwrap(), vec![false]);
    }

    #[test]
    fn test_array_flags_per_element() {
        let a = pair(arr(&[1.0, 2.0, 3.0]), arr(&[0.01, 0.01, 0.01]));
        let b = pair(arr(&[1.0, 2.5, 3.01]), arr(&[0.01, 0.01, 0.01]));
        assert_eq!(overlaps(&a, &b, 2, true).unwrap(), vec![true, false, true]);
    }

    #[test]
    fn test_shape_errors() {
        let a = pair(arr(&[1.0, 2.0]), arr(&[0.1]));
        assert!(matches!(overlaps(&a, &a, 1, true), Err(Error::ShapeMismatch { .. })));
        let b = pair(arr(&[1.0]), arr(&[0.1]));
        let c = pair(1.0, 0.1);
        assert!(matches!(overlaps(&b, &c, 1, true), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_strings_are_unsupported() {
        let a = pair("x", 0.1);
        assert!(matches!(overlaps(&a, &a, 1, true), Err(Error::UnsupportedValue { .. })));
    }

    #[test]
    fn test_log_overlaps_reports_disjoint_count() {
        let a = pair(arr(&[1.0, 2.0]), arr(&[0.01, 0.01]));
        let b = pair(arr(&[1.5, 2.0]), arr(&[0.01, 0.01]));
        let sink = CollectingNotifier::new();

        assert!(!log_overlaps("flux", &a, &b, 2, &sink).unwrap());
        assert!(log_overlaps("flux", &a, &a, 2, &sink).unwrap());

        let notices = sink.notices();
        assert_eq!(notices[0].severity, Severity::Error);
        assert!(notices[0].message.contains("1 of 2 confidence intervals at 2 sigma"));
        assert_eq!(notices[1].severity, Severity::Success);
        assert_eq!(notices[1].message, "flux: confidence intervals overlap");
    }
}
