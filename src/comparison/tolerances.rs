//! Tolerance parameters and their validation.
//!
//! [`CompareOptions`] is what callers build; [`Tolerances`] is the validated
//! form every comparator receives. Holding a `Tolerances` proves the checks
//! below have passed, so comparators never re-validate.

use crate::errors::{Error, Result};
use crate::messages::Verbosity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default lower tolerance in percent
pub const DEFAULT_LOWER: f64 = 0.0;
/// Default upper tolerance in percent
pub const DEFAULT_UPPER: f64 = 10.0;
/// Default confidence level in standard deviations
pub const DEFAULT_SIGMA: i64 = 2;

/// Caller-facing comparison parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    /// Relative differences (percent) at or below this pass silently
    pub lower: f64,
    /// Relative differences (percent) at or above this fail
    pub upper: f64,
    /// Confidence interval width for uncertain quantities; 0 disables it
    pub sigma: i64,
    /// Verbosity for this comparison only
    pub verbosity: Option<Verbosity>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
            sigma: DEFAULT_SIGMA,
            verbosity: None,
        }
    }
}

impl CompareOptions {
    pub fn new(lower: f64, upper: f64, sigma: i64) -> Self {
        Self {
            lower,
            upper,
            sigma,
            verbosity: None,
        }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = Some(verbosity);
        self
    }

    pub fn validate(&self) -> Result<Tolerances> {
        Tolerances::new(self.lower, self.upper, self.sigma)
    }
}

/// Validated tolerance pair and confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    lower: f64,
    upper: f64,
    sigma: u32,
}

impl Tolerances {
    /// Validate and build tolerances.
    ///
    /// `sigma` is clamped to zero rather than rejected. The ordering check
    /// runs before the sign checks, so `lower = -5, upper = -1` is reported
    /// as a negative upper limit.
    pub fn new(lower: f64, upper: f64, sigma: i64) -> Result<Self> {
        for (name, value) in [("upper", upper), ("lower", lower)] {
            if !value.is_finite() {
                return Err(Error::NonFiniteParameter { name, value });
            }
        }
        let sigma = sigma.clamp(0, i64::from(u32::MAX)) as u32;
        if upper < lower {
            return Err(Error::ToleranceOrder { lower, upper });
        }
        for (name, value) in [("upper", upper), ("lower", lower)] {
            if value < 0.0 {
                return Err(Error::NegativeParameter { name, value });
            }
        }
        Ok(Self {
            lower,
            upper,
            sigma,
        })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn sigma(&self) -> u32 {
        self.sigma
    }

    /// Whether uncertain quantities are compared by interval overlap.
    pub fn is_statistical(&self) -> bool {
        self.sigma > 0
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
            sigma: DEFAULT_SIGMA as u32,
        }
    }
}

/// Pure: Confidence percentage for a sigma level, for display only
pub fn confidence_label(sigma: u32) -> &'static str {
    match sigma {
        0 => "0",
        1 => "68",
        2 => "95",
        _ => ">= 99.7",
    }
}

impl fmt::Display for Tolerances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lower tolerance: {:5.3} [%]\n\tUpper tolerance: {:5.3} [%]\n\t\
             Confidence interval for statistical values: {} sigma or {} %",
            self.lower,
            self.upper,
            self.sigma,
            confidence_label(self.sigma)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = CompareOptions::default().validate().unwrap();
        assert_eq!(t, Tolerances::default());
        assert_eq!((t.lower(), t.upper(), t.sigma()), (0.0, 10.0, 2));
    }

    #[test]
    fn test_upper_below_lower_is_rejected() {
        let err = Tolerances::new(10.0, 5.0, 2).unwrap_err();
        assert!(matches!(err, Error::ToleranceOrder { lower, upper } if lower == 10.0 && upper == 5.0));
    }

    #[test]
    fn test_negative_sigma_is_clamped() {
        let t = Tolerances::new(0.0, 10.0, -1).unwrap();
        assert_eq!(t.sigma(), 0);
        assert!(!t.is_statistical());
    }

    #[test]
    fn test_ordering_checked_before_sign() {
        let err = Tolerances::new(-5.0, -1.0, 1).unwrap_err();
        assert!(matches!(err, Error::NegativeParameter { name: "upper", .. }));

        let err = Tolerances::new(-1.0, -5.0, 1).unwrap_err();
        assert!(matches!(err, Error::ToleranceOrder { .. }));

        let err = Tolerances::new(-1.0, 5.0, 1).unwrap_err();
        assert!(matches!(err, Error::NegativeParameter { name: "lower", .. }));
    }

    #[test]
    fn test_non_finite_is_rejected() {
        assert!(matches!(
            Tolerances::new(f64::NAN, 5.0, 1),
            Err(Error::NonFiniteParameter { name: "lower", .. })
        ));
        assert!(matches!(
            Tolerances::new(0.0, f64::INFINITY, 1),
            Err(Error::NonFiniteParameter { name: "upper", .. })
        ));
    }

    #[test]
    fn test_confidence_labels() {
        assert_eq!(confidence_label(0), "0");
        assert_eq!(confidence_label(1), "68");
        assert_eq!(confidence_label(2), "95");
        assert_eq!(confidence_label(3), ">= 99.7");
    }

    #[test]
    fn test_display() {
        let text = Tolerances::new(1.0, 5.0, 3).unwrap().to_string();
        assert!(text.contains("Lower tolerance: 1.000 [%]"), "{text}");
        assert!(text.contains("3 sigma or >= 99.7 %"), "{text}");
    }
}
