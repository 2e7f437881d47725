//! Dense row-major N-dimensional arrays of `f64`.
//!
//! Tally data, relative errors and grids are all stored this way. The array
//! owns its data; every reshaping operation (indexing an axis, element-wise
//! combination) returns a new array.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// N-dimensional array with an explicit shape.
///
/// A zero-dimensional array (empty shape) holds exactly one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawArray", into = "RawArray")]
pub struct NdArray {
    shape: Vec<usize>,
    data: Vec<f64>,
}

/// Serialized form: `{"shape": [..], "data": [..]}`
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawArray {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl TryFrom<RawArray> for NdArray {
    type Error = Error;

    fn try_from(raw: RawArray) -> Result<Self> {
        NdArray::new(raw.shape, raw.data)
    }
}

impl From<NdArray> for RawArray {
    fn from(array: NdArray) -> Self {
        RawArray {
            shape: array.shape,
            data: array.data,
        }
    }
}

impl NdArray {
    /// Create an array, checking that `data` fills `shape` exactly.
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        let Some(expected) = checked_element_count(&shape) else {
            return Err(Error::ShapeOverflow(shape));
        };
        if expected != data.len() {
            return Err(Error::InvalidArray {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// One-dimensional array over `data`.
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = element_count(&shape);
        Self {
            shape,
            data: vec![0.0; len],
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Element at a full multi-index, `None` when out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0;
        for (&i, &dim) in index.iter().zip(&self.shape) {
            if i >= dim {
                return None;
            }
            offset = offset * dim + i;
        }
        self.data.get(offset).copied()
    }

    /// Fix `axis` at `index`, dropping that dimension.
    pub fn index_axis(&self, axis: usize, index: usize) -> Result<Self> {
        let Some(&len) = self.shape.get(axis) else {
            return Err(Error::IndexOutOfBounds {
                axis: axis.to_string(),
                index: axis,
                len: self.shape.len(),
            });
        };
        if index >= len {
            return Err(Error::IndexOutOfBounds {
                axis: axis.to_string(),
                index,
                len,
            });
        }

        let outer = element_count(&self.shape[..axis]);
        let inner = element_count(&self.shape[axis + 1..]);
        let mut data = Vec::with_capacity(outer * inner);
        for block in 0..outer {
            let start = (block * len + index) * inner;
            data.extend_from_slice(&self.data[start..start + inner]);
        }

        let mut shape = self.shape.clone();
        shape.remove(axis);
        Ok(Self { shape, data })
    }

    /// Combine two arrays of identical shape element by element.
    pub fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        if self.shape != other.shape {
            return Err(Error::ShapeMismatch {
                first: self.shape.clone(),
                second: other.shape.clone(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self {
            shape: self.shape.clone(),
            data,
        })
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            shape: self.shape.clone(),
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }
}

/// Number of elements a shape holds, `None` when it cannot be addressed.
fn checked_element_count(shape: &[usize]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// Element count of a shape, or of part of a shape, already known to fit.
fn element_count(shape: &[usize]) -> usize {
    shape.iter().fold(1usize, |acc, &dim| acc.saturating_mul(dim))
}

impl fmt::Display for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nested(f, &self.shape, &self.data)
    }
}

fn write_nested(f: &mut fmt::Formatter<'_>, shape: &[usize], data: &[f64]) -> fmt::Result {
    let Some((&len, rest)) = shape.split_first() else {
        return match data.first() {
            Some(value) => write!(f, "{value}"),
            None => Ok(()),
        };
    };
    let stride = element_count(rest);
    write!(f, "[")?;
    for i in 0..len {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_nested(f, rest, &data[i * stride..(i + 1) * stride])?;
    }
    write!(f, "]")
}
