//! Classification primitives.
//!
//! A [`Verdict`] names the outcome of one comparison. These functions map a
//! verdict to its pass/fail meaning and severity and emit the matching
//! notification. They never decide which verdict applies; that is the job of
//! the comparators.

use crate::messages::{Notifier, Severity};
use serde::Serialize;
use std::fmt::{self, Display};

/// Outcome of comparing two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Values are equal (to within 1e-8)
    Identical,
    /// Strings differ
    NotIdentical,
    /// Deviation at or below the lower tolerance
    AcceptableLow,
    /// Deviation between the tolerances; passes with a warning
    AcceptableHigh,
    /// Deviation at or above the upper tolerance
    OutsideTolerance,
    /// Values are of incompatible kinds
    DifferentTypes,
    /// All confidence intervals overlap
    WithinUncertainty,
    /// Some confidence intervals are disjoint
    OutsideUncertainty,
}

impl Verdict {
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::Identical | Self::AcceptableLow | Self::AcceptableHigh | Self::WithinUncertainty
        )
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::Identical | Self::AcceptableLow | Self::WithinUncertainty => Severity::Success,
            Self::AcceptableHigh => Severity::Warning,
            Self::NotIdentical
            | Self::OutsideTolerance
            | Self::DifferentTypes
            | Self::OutsideUncertainty => Severity::Error,
        }
    }

    fn headline(self) -> &'static str {
        match self {
            Self::Identical => "values are identical",
            Self::NotIdentical => "values are not identical",
            Self::AcceptableLow => "values are not identical, but within the lower tolerance",
            Self::AcceptableHigh => "values are within tolerances, but exceed the lower tolerance",
            Self::OutsideTolerance => "values are outside acceptable tolerances",
            Self::DifferentTypes => "values have different types",
            Self::WithinUncertainty => "confidence intervals overlap",
            Self::OutsideUncertainty => "confidence intervals do not overlap",
        }
    }

    /// Identical outcomes carry no payload; everything else shows both sides.
    fn shows_values(self) -> bool {
        !matches!(self, Self::Identical | Self::WithinUncertainty)
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Identical => "identical",
            Self::NotIdentical => "not identical",
            Self::AcceptableLow => "acceptable (low)",
            Self::AcceptableHigh => "acceptable (high)",
            Self::OutsideTolerance => "outside tolerance",
            Self::DifferentTypes => "different types",
            Self::WithinUncertainty => "within uncertainty",
            Self::OutsideUncertainty => "outside uncertainty",
        };
        f.write_str(name)
    }
}

/// Pure: Build the notification text for a verdict
pub fn build_verdict_message(
    verdict: Verdict,
    label: &str,
    first: &dyn Display,
    second: &dyn Display,
    detail: Option<&str>,
) -> String {
    let mut message = format!("{label}: {}", verdict.headline());
    if verdict.shows_values() {
        message.push_str(&format!(":\n\t> {first}\n\t< {second}"));
    }
    if let Some(detail) = detail {
        message.push_str("\n\t");
        message.push_str(detail);
    }
    message
}

/// Emit exactly one notification for `verdict` and return whether it passed.
pub fn report(
    notifier: &dyn Notifier,
    verdict: Verdict,
    label: &str,
    first: &dyn Display,
    second: &dyn Display,
    detail: Option<&str>,
) -> bool {
    let message = build_verdict_message(verdict, label, first, second, detail);
    notifier.notify(verdict.severity(), &message);
    verdict.is_success()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::CollectingNotifier;

    const ALL: [Verdict; 8] = [
        Verdict::Identical,
        Verdict::NotIdentical,
        Verdict::AcceptableLow,
        Verdict::AcceptableHigh,
        Verdict::OutsideTolerance,
        Verdict::DifferentTypes,
        Verdict::WithinUncertainty,
        Verdict::OutsideUncertainty,
    ];

    #[test]
    fn test_failures_are_error_severity_and_successes_are_not() {
        for verdict in ALL {
            if verdict.is_success() {
                assert!(verdict.severity() < Severity::Error, "{verdict}");
            } else {
                assert!(verdict.severity() >= Severity::Error, "{verdict}");
            }
        }
    }

    #[test]
    fn test_only_acceptable_high_warns() {
        let warnings: Vec<_> = ALL
            .iter()
            .filter(|v| v.severity() == Severity::Warning)
            .collect();
        assert_eq!(warnings, vec![&Verdict::AcceptableHigh]);
    }

    #[test]
    fn test_report_emits_one_notice() {
        let sink = CollectingNotifier::new();
        let passed = report(&sink, Verdict::OutsideTolerance, "keff", &1.0, &1.5, Some("50 %"));
        assert!(!passed);
        let notices = sink.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
        assert_eq!(
            notices[0].message,
            "keff: values are outside acceptable tolerances:\n\t> 1\n\t< 1.5\n\t50 %"
        );
    }

    #[test]
    fn test_identical_message_omits_values() {
        let msg = build_verdict_message(Verdict::Identical, "burnup", &"a", &"a", None);
        assert_eq!(msg, "burnup: values are identical");
    }
}
