//! Binned detector tallies.
//!
//! A detector holds tally data over an ordered set of named bin axes, with
//! optional relative errors and scores of the same shape, plus named grids
//! (energy, mesh) whose rows are `[low, high, ...]` bin bounds.

use crate::comparison::collections::compare_collections;
use crate::comparison::direct::compare_arrays;
use crate::comparison::keys::{common_keys, Labels, DEFAULT_HERALD};
use crate::comparison::overlap::log_overlaps;
use crate::comparison::protocol::{Comparable, EntityKind};
use crate::comparison::tolerances::Tolerances;
use crate::errors::{Error, Result};
use crate::messages::builders::format_shape;
use crate::messages::{Notifier, Severity, TracingNotifier};
use crate::values::{NdArray, Uncertain, Value};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which of the per-bin data sets to operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    #[default]
    Tallies,
    Errors,
    Scores,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tallies => "tallies",
            Self::Errors => "errors",
            Self::Scores => "scores",
        })
    }
}

/// One named bin axis of the reshaped tally array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,
    pub len: usize,
}

impl Axis {
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            len,
        }
    }
}

fn default_detector_kind() -> EntityKind {
    EntityKind::Detector
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    pub name: String,
    #[serde(default = "default_detector_kind")]
    pub kind: EntityKind,
    #[serde(default)]
    pub axes: Vec<Axis>,
    #[serde(default)]
    pub tallies: Option<NdArray>,
    #[serde(default)]
    pub errors: Option<NdArray>,
    #[serde(default)]
    pub scores: Option<NdArray>,
    #[serde(default)]
    pub grids: BTreeMap<String, NdArray>,
}

impl Detector {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntityKind::Detector,
            axes: Vec::new(),
            tallies: None,
            errors: None,
            scores: None,
            grids: BTreeMap::new(),
        }
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn data(&self, which: DataKind) -> Option<&NdArray> {
        match which {
            DataKind::Tallies => self.tallies.as_ref(),
            DataKind::Errors => self.errors.as_ref(),
            DataKind::Scores => self.scores.as_ref(),
        }
    }

    /// Lengths of the bin axes, in order.
    pub fn axis_shape(&self) -> Vec<usize> {
        self.axes.iter().map(|axis| axis.len).collect()
    }

    /// Tallies exist and are laid out over the bin axes.
    pub fn is_reshaped(&self) -> bool {
        self.tallies
            .as_ref()
            .is_some_and(|tallies| tallies.shape() == self.axis_shape().as_slice())
    }

    /// [`Detector::slice_with`], reporting through the tracing sink.
    pub fn slice(&self, fixed: &BTreeMap<String, usize>, which: DataKind) -> Result<NdArray> {
        self.slice_with(fixed, which, &TracingNotifier)
    }

    /// Sub-array with the axes named in `fixed` held at the given bin.
    ///
    /// Axes not named are kept in order. Names that match no axis are
    /// reported once as a warning and otherwise ignored.
    ///
    /// # Errors
    ///
    /// - [`Error::NotReshaped`] if the tallies do not match the bin axes
    /// - [`Error::MissingData`] if the selected data set is absent
    /// - [`Error::IndexOutOfBounds`] if a fixed bin exceeds its axis
    pub fn slice_with(
        &self,
        fixed: &BTreeMap<String, usize>,
        which: DataKind,
        notifier: &dyn Notifier,
    ) -> Result<NdArray> {
        if !self.is_reshaped() {
            return Err(Error::NotReshaped(self.name.clone()));
        }
        let work = self.data(which).ok_or_else(|| Error::MissingData {
            data: which,
            detector: self.name.clone(),
        })?;
        if fixed.is_empty() {
            return Ok(work.clone());
        }

        let unknown: Vec<&str> = fixed
            .keys()
            .filter(|name| !self.axes.iter().any(|axis| &axis.name == *name))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            notifier.notify(
                Severity::Warning,
                &format!(
                    "Could not find arguments in index that match the following \
                     requested slice keys: {}",
                    unknown.join(", ")
                ),
            );
        }

        // Walk backwards so removing an axis never shifts the ones still to visit.
        let mut sliced = work.clone();
        for (position, axis) in self.axes.iter().enumerate().rev() {
            let Some(&index) = fixed.get(&axis.name) else {
                continue;
            };
            if index >= axis.len {
                return Err(Error::IndexOutOfBounds {
                    axis: axis.name.clone(),
                    index,
                    len: axis.len,
                });
            }
            sliced = sliced.index_axis(position, index)?;
        }
        Ok(sliced)
    }

    /// Bin edges along `qty`.
    ///
    /// A grid stored under the uppercased first letter of `qty` yields its
    /// low bounds followed by the last high bound. Otherwise a bin axis
    /// named `qty` yields the bin indices `0..=len`.
    pub fn grid_edges(&self, qty: &str) -> Result<Vec<f64>> {
        let grid_key: String = qty.chars().take(1).flat_map(char::to_uppercase).collect();
        if let Some(grid) = self.grids.get(&grid_key) {
            return edges_from_bounds(grid);
        }
        match self.axes.iter().find(|axis| axis.name == qty) {
            Some(axis) => Ok((0..=axis.len).map(|i| i as f64).collect()),
            None => Err(Error::UnknownAxis {
                name: qty.to_string(),
                available: self
                    .axes
                    .iter()
                    .map(|axis| axis.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    fn labels_against(&self, other: &Self) -> Labels {
        Labels::new(self.to_string(), other.to_string())
    }

    fn compare_tallies(
        &self,
        other: &Self,
        tolerances: &Tolerances,
        notifier: &dyn Notifier,
    ) -> Result<bool> {
        let (Some(t0), Some(t1)) = (&self.tallies, &other.tallies) else {
            if self.tallies.is_none() && other.tallies.is_none() {
                return Ok(true);
            }
            notifier.notify(
                Severity::Error,
                &format!("Tallies are only present on one of {self} and {other}"),
            );
            return Ok(false);
        };

        match (&self.errors, &other.errors) {
            (Some(e0), Some(e1)) if tolerances.is_statistical() => {
                if e0.shape() != t0.shape() || e1.shape() != t1.shape() {
                    notifier.notify(
                        Severity::Error,
                        &format!(
                            "Errors of {self} and {other} do not match the tally shape {}: {} vs {}",
                            format_shape(t0.shape()),
                            format_shape(e0.shape()),
                            format_shape(e1.shape())
                        ),
                    );
                    return Ok(false);
                }
                let first = Uncertain {
                    value: Value::Array(t0.clone()),
                    uncertainty: Value::Array(e0.clone()),
                };
                let second = Uncertain {
                    value: Value::Array(t1.clone()),
                    uncertainty: Value::Array(e1.clone()),
                };
                log_overlaps("tallies", &first, &second, tolerances.sigma(), notifier)
            }
            _ => compare_arrays(t0, t1, tolerances, "tallies", notifier),
        }
    }

    fn compare_scores(
        &self,
        other: &Self,
        tolerances: &Tolerances,
        notifier: &dyn Notifier,
    ) -> Result<bool> {
        match (&self.scores, &other.scores) {
            (Some(s0), Some(s1)) if s0.shape() == s1.shape() => {
                compare_arrays(s0, s1, tolerances, "scores", notifier)
            }
            (None, None) => Ok(true),
            _ => {
                notifier.notify(
                    Severity::Error,
                    &format!("Scores of {self} and {other} cannot be compared"),
                );
                Ok(false)
            }
        }
    }
}

/// Pure: Low bounds of every row plus the high bound of the last row.
fn edges_from_bounds(grid: &NdArray) -> Result<Vec<f64>> {
    let (rows, cols) = match grid.shape() {
        [rows, cols] if *cols >= 2 => (*rows, *cols),
        shape => {
            return Err(Error::InvalidArray {
                shape: shape.to_vec(),
                expected: shape.first().copied().unwrap_or(0) * 2,
                actual: grid.len(),
            })
        }
    };
    let data = grid.data();
    let mut edges: Vec<f64> = (0..rows).map(|row| data[row * cols]).collect();
    if rows > 0 {
        edges.push(data[(rows - 1) * cols + 1]);
    }
    Ok(edges)
}

impl fmt::Display for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}>", self.kind.type_name(), self.name)
    }
}

impl Comparable for Detector {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Compares bin axes, grids, tallies (by interval overlap when both
    /// sides carry errors and a confidence level is set) and scores.
    fn compare_contents(
        &self,
        other: &Self,
        tolerances: &Tolerances,
        notifier: &dyn Notifier,
    ) -> Result<bool> {
        let labels = self.labels_against(other);

        if let (Some(t0), Some(t1)) = (&self.tallies, &other.tallies) {
            if t0.shape() != t1.shape() {
                notifier.notify(
                    Severity::Error,
                    &format!(
                        "Tallies of {} and {} have different shapes: {} vs {}",
                        labels.first,
                        labels.second,
                        format_shape(t0.shape()),
                        format_shape(t1.shape())
                    ),
                );
                return Ok(false);
            }
        }

        let axes0: Vec<&str> = self.axes.iter().map(|a| a.name.as_str()).collect();
        let axes1: Vec<&str> = other.axes.iter().map(|a| a.name.as_str()).collect();
        let common = common_keys(
            axes0.iter().copied(),
            axes1.iter().copied(),
            &labels,
            DEFAULT_HERALD,
            notifier,
        );
        let mut similar = common.len() == axes0.len() && common.len() == axes1.len();

        similar = compare_collections(&self.grids, &other.grids, tolerances, &labels, notifier)?
            && similar;
        similar = self.compare_tallies(other, tolerances, notifier)? && similar;
        similar = self.compare_scores(other, tolerances, notifier)? && similar;
        Ok(similar)
    }
}
