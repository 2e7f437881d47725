//! The comparable-entity protocol.
//!
//! Entities (result collections, detectors) share one entry point,
//! [`Comparable::compare`], which validates tolerances, checks that the two
//! entities are of compatible kinds, scopes the verbosity and emits a
//! preamble before handing over to the entity-specific
//! [`Comparable::compare_contents`].

use super::tolerances::{CompareOptions, Tolerances};
use crate::errors::{Error, Result};
use crate::messages::{Notifier, Severity, VerbosityFilter};
use crate::settings;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Kind tag of a comparable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Results,
    Detector,
    CartesianDetector,
    HexagonalDetector,
    CylindricalDetector,
    SphericalDetector,
}

/// Declared subtypes per kind. Relations are one-directional: a cartesian
/// detector may be compared against a generic one, not the reverse.
static SUBTYPES: &[(EntityKind, &[EntityKind])] = &[(
    EntityKind::Detector,
    &[
        EntityKind::CartesianDetector,
        EntityKind::HexagonalDetector,
        EntityKind::CylindricalDetector,
        EntityKind::SphericalDetector,
    ],
)];

impl EntityKind {
    /// Whether `self` is declared a subtype of `parent`.
    pub fn is_subtype_of(self, parent: EntityKind) -> bool {
        SUBTYPES
            .iter()
            .filter(|(kind, _)| *kind == parent)
            .any(|(_, children)| children.contains(&self))
    }

    /// Type-style name used when displaying entities, e.g. `<Detector flux>`.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Results => "ResultsCollection",
            Self::Detector => "Detector",
            Self::CartesianDetector => "CartesianDetector",
            Self::HexagonalDetector => "HexagonalDetector",
            Self::CylindricalDetector => "CylindricalDetector",
            Self::SphericalDetector => "SphericalDetector",
        }
    }

    /// Whether an entity of kind `self` accepts `other` as a peer.
    pub fn accepts(self, other: EntityKind) -> bool {
        self == other || other.is_subtype_of(self)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Results => "results collection",
            Self::Detector => "detector",
            Self::CartesianDetector => "cartesian detector",
            Self::HexagonalDetector => "hexagonal detector",
            Self::CylindricalDetector => "cylindrical detector",
            Self::SphericalDetector => "spherical detector",
        };
        f.write_str(name)
    }
}

/// Fail with [`Error::IncompatibleKinds`] unless `this` accepts `other`.
pub fn check_compatible(this: EntityKind, other: EntityKind) -> Result<()> {
    if this.accepts(other) {
        Ok(())
    } else {
        Err(Error::IncompatibleKinds { this, other })
    }
}

/// An entity that can be compared against a peer of compatible kind.
pub trait Comparable: fmt::Display {
    fn kind(&self) -> EntityKind;

    /// Entity-specific comparison with already validated tolerances.
    ///
    /// Emits one notification per compared quantity plus any reconciliation
    /// reports, and returns `true` if every quantity passed.
    fn compare_contents(
        &self,
        other: &Self,
        tolerances: &Tolerances,
        notifier: &dyn Notifier,
    ) -> Result<bool>;

    /// Compare `self` (the reference) against `other`.
    ///
    /// # Errors
    ///
    /// - tolerance validation errors from [`CompareOptions::validate`]
    /// - [`Error::IncompatibleKinds`] when `other` is neither the same kind
    ///   nor a declared subtype of `self`
    /// - errors propagated from [`Comparable::compare_contents`]
    fn compare(
        &self,
        other: &Self,
        options: &CompareOptions,
        notifier: &dyn Notifier,
    ) -> Result<bool>
    where
        Self: Sized,
    {
        let tolerances = options.validate()?;
        check_compatible(self.kind(), other.kind())?;

        let verbosity = options.verbosity.unwrap_or_else(settings::verbosity);
        let scoped = VerbosityFilter::new(notifier, verbosity);
        debug!(
            first = %self,
            second = %other,
            ?verbosity,
            "Starting comparison"
        );

        scoped.notify(
            Severity::Info,
            &format!(
                "Comparing > against < with the following tolerances:\n\t\
                 > {self}\n\t< {other}\n\t{tolerances}"
            ),
        );
        self.compare_contents(other, &tolerances, &scoped)
    }
}
