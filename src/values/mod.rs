//! In-memory values held by result collections.
//!
//! # Module Structure
//!
//! - `array` - dense N-dimensional `f64` arrays
//! - this module - the [`Value`] sum type and collection [`Entry`]s
//!
//! Values deserialize from plain JSON: numbers, strings, booleans, lists and
//! objects map onto the matching variant, and an object of the exact form
//! `{"shape": [..], "data": [..]}` becomes an [`NdArray`]; such an object
//! whose data does not fill its shape is rejected. An entry object of
//! the exact form `{"value": .., "uncertainty": ..}` carries a relative
//! statistical uncertainty.

pub mod array;

pub use array::NdArray;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single value that may appear in a result collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(NdArray),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

/// Untagged wire form, checked before it becomes a [`Value`]
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(NdArray),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Bool(v) => Self::Bool(v),
            RawValue::Int(v) => Self::Int(v),
            RawValue::Float(v) => Self::Float(v),
            RawValue::Str(v) => Self::Str(v),
            RawValue::Array(v) => Self::Array(v),
            RawValue::List(v) => Self::List(v),
            RawValue::Map(map) => {
                if let Some(problem) = malformed_array(&map) {
                    return Err(serde::de::Error::custom(problem));
                }
                Self::Map(map)
            }
        })
    }
}

/// Why an object of the array form failed to become an array.
fn malformed_array(map: &BTreeMap<String, Value>) -> Option<String> {
    if map.len() != 2 {
        return None;
    }
    let (Some(shape), Some(data)) = (map.get("shape"), map.get("data")) else {
        return None;
    };
    let shape: Option<Vec<usize>> = match shape {
        Value::List(dims) => dims
            .iter()
            .map(|dim| match dim {
                Value::Int(n) => usize::try_from(*n).ok(),
                _ => None,
            })
            .collect(),
        _ => None,
    };
    let data: Option<Vec<f64>> = match data {
        Value::List(items) => items.iter().map(Value::as_f64).collect(),
        _ => None,
    };
    match (shape, data) {
        (Some(shape), Some(data)) => NdArray::new(shape, data).err().map(|e| e.to_string()),
        _ => Some("array objects need a non-negative integer shape and numeric data".to_string()),
    }
}

/// Concrete kind of a [`Value`], used for type checks and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
    Array,
    List,
    Map,
}

impl ValueKind {
    /// Int and float are interchangeable for numeric comparison.
    pub fn is_numeric_scalar(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Array => "array",
            Self::List => "list",
            Self::Map => "map",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
            Self::Array(_) => ValueKind::Array,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
        }
    }

    /// Shape of array values; `None` for everything else.
    pub fn shape(&self) -> Option<&[usize]> {
        match self {
            Self::Array(array) => Some(array.shape()),
            _ => None,
        }
    }

    /// Numeric scalar as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<NdArray> for Value {
    fn from(v: NdArray) -> Self {
        Self::Array(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::Array(v) => write!(f, "{v}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Expected value paired with its relative uncertainty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Uncertain {
    pub value: Value,
    pub uncertainty: Value,
}

impl fmt::Display for Uncertain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} +/- {}", self.value, self.uncertainty)
    }
}

/// One entry of a named result collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Uncertain(Uncertain),
    Plain(Value),
}

impl Entry {
    pub fn uncertain(value: impl Into<Value>, uncertainty: impl Into<Value>) -> Self {
        Self::Uncertain(Uncertain {
            value: value.into(),
            uncertainty: uncertainty.into(),
        })
    }

    /// The expected value, ignoring any uncertainty.
    pub fn value(&self) -> &Value {
        match self {
            Self::Uncertain(pair) => &pair.value,
            Self::Plain(value) => value,
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        TypeTag {
            kind: self.value().kind(),
            uncertain: matches!(self, Self::Uncertain(_)),
        }
    }
}

macro_rules! plain_entry_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Entry {
                fn from(v: $ty) -> Self {
                    Self::Plain(v.into())
                }
            }
        )*
    };
}

plain_entry_from!(Value, f64, i64, bool, &str, String, NdArray);

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncertain(pair) => write!(f, "{pair}"),
            Self::Plain(value) => write!(f, "{value}"),
        }
    }
}

/// Strict type identity used by shape reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTag {
    pub kind: ValueKind,
    pub uncertain: bool,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.uncertain {
            write!(f, "uncertain {}", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// Sorted mapping from key to entry.
pub type NamedCollection = BTreeMap<String, Entry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_numbers_keep_int_and_float_apart() {
        let v: Value = serde_json::from_str("3").unwrap();
        assert_eq!(v.kind(), ValueKind::Int);
        let v: Value = serde_json::from_str("3.0").unwrap();
        assert_eq!(v.kind(), ValueKind::Float);
    }

    #[test]
    fn test_json_array_object_becomes_ndarray() {
        let v: Value = serde_json::from_str(r#"{"shape": [2, 1], "data": [1, 2]}"#).unwrap();
        assert_eq!(v.shape(), Some(&[2usize, 1][..]));
        let v: Value = serde_json::from_str(r#"{"shape": [2], "rows": [1, 2]}"#).unwrap();
        assert_eq!(v.kind(), ValueKind::Map);
        let v: Value = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(v.kind(), ValueKind::List);
    }

    #[test]
    fn test_json_array_object_that_does_not_fill_its_shape_is_rejected() {
        let err = serde_json::from_str::<Value>(r#"{"shape": [2], "data": [1.0]}"#).unwrap_err();
        assert!(err.to_string().contains("requires 2 values, got 1"), "{err}");

        let err = serde_json::from_str::<Value>(r#"{"shape": ["a"], "data": []}"#).unwrap_err();
        assert!(err.to_string().contains("integer shape"), "{err}");

        assert!(serde_json::from_str::<Entry>(r#"{"shape": [3], "data": [1, 2]}"#).is_err());
    }

    #[test]
    fn test_entry_deserializes_uncertain_pair() {
        let e: Entry = serde_json::from_str(r#"{"value": 1.2, "uncertainty": 0.01}"#).unwrap();
        assert_eq!(
            e.type_tag(),
            TypeTag {
                kind: ValueKind::Float,
                uncertain: true
            }
        );
        let e: Entry = serde_json::from_str("\"ENDF\"").unwrap();
        assert_eq!(e, Entry::from("ENDF"));
    }

    #[test]
    fn test_display() {
        let v = Value::from(NdArray::from_vec(vec![1.0, 2.5]));
        assert_eq!(v.to_string(), "[1, 2.5]");
        let e = Entry::uncertain(1.5, 0.1);
        assert_eq!(e.to_string(), "1.5 +/- 0.1");
    }
}
