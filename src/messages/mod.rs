//! Severity-tagged notifications emitted while comparing.
//!
//! Every individual comparison reports its outcome through a [`Notifier`].
//! The notifier decides where messages go (the tracing subscriber, a test
//! collector, nowhere); the comparison code only decides the [`Severity`].
//!
//! # Module Structure
//!
//! - `builders` - pure functions formatting report text
//! - this module - severities, verbosity thresholds and notifier sinks

pub mod builders;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;

/// Severity of a single notification, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fine-grained detail about individual steps
    Trace,
    /// Parameters and progress of a comparison
    Info,
    /// A comparison passed
    Success,
    /// A comparison passed but deviates noticeably
    Warning,
    /// A comparison failed or inputs were mismatched
    Error,
    /// The comparison itself was misconfigured
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trace => "trace",
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Minimum severity a notifier lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Everything, including trace detail
    Debug,
    /// Parameters, successes and above
    Info,
    /// Warnings and failures (default)
    #[default]
    Warning,
    /// Failures only
    Error,
    /// Misconfiguration only
    Critical,
}

impl Verbosity {
    fn threshold(self) -> Severity {
        match self {
            Self::Debug => Severity::Trace,
            Self::Info => Severity::Info,
            Self::Warning => Severity::Warning,
            Self::Error => Severity::Error,
            Self::Critical => Severity::Critical,
        }
    }

    pub fn allows(self, severity: Severity) -> bool {
        severity >= self.threshold()
    }

    /// Directive for a `tracing_subscriber::EnvFilter`.
    pub fn as_filter_directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

/// Sink for comparison notifications.
pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, severity: Severity, message: &str) {
        (**self).notify(severity, message)
    }
}

/// Forwards notifications to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Trace => tracing::debug!(%severity, "{message}"),
            Severity::Info | Severity::Success => tracing::info!(%severity, "{message}"),
            Severity::Warning => tracing::warn!(%severity, "{message}"),
            Severity::Error | Severity::Critical => tracing::error!(%severity, "{message}"),
        }
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _severity: Severity, _message: &str) {}
}

/// A notification captured by [`CollectingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// Records notifications in memory, in emission order.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.notices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.borrow().is_empty()
    }

    /// Number of notices at or above `severity`.
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.notices
            .borrow()
            .iter()
            .filter(|n| n.severity >= severity)
            .count()
    }

    /// Highest severity seen so far.
    pub fn max_severity(&self) -> Option<Severity> {
        self.notices.borrow().iter().map(|n| n.severity).max()
    }

    pub fn clear(&self) {
        self.notices.borrow_mut().clear();
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.notices.borrow_mut().push(Notice {
            severity,
            message: message.to_string(),
        });
    }
}

/// Drops notifications below a verbosity threshold before forwarding.
///
/// Used to scope a verbosity override to a single comparison without
/// touching the thread default.
pub struct VerbosityFilter<'a> {
    inner: &'a dyn Notifier,
    verbosity: Verbosity,
}

impl<'a> VerbosityFilter<'a> {
    pub fn new(inner: &'a dyn Notifier, verbosity: Verbosity) -> Self {
        Self { inner, verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl Notifier for VerbosityFilter<'_> {
    fn notify(&self, severity: Severity, message: &str) {
        if self.verbosity.allows(severity) {
            self.inner.notify(severity, message);
        }
    }
}
