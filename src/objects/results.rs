//! Named collections of scalar and array results.

use crate::comparison::collections::compare_collections;
use crate::comparison::keys::Labels;
use crate::comparison::protocol::{Comparable, EntityKind};
use crate::comparison::tolerances::Tolerances;
use crate::errors::Result;
use crate::messages::Notifier;
use crate::utils::{convert_variable_name, split_values_uncertainties, str_to_vec};
use crate::values::{Entry, NamedCollection, NdArray, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named set of results keyed by variable name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultsCollection {
    pub name: String,
    #[serde(default)]
    pub data: NamedCollection,
}

impl ResultsCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: NamedCollection::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Option<Entry> {
        self.data.insert(key.into(), entry.into())
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.data.get(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Store raw `[x1, u1, x2, u2, ...]` output text as an uncertain entry.
    ///
    /// The key is the `mixedCase` form of `raw_name`. A single pair is
    /// stored as scalars, longer vectors as 1-D arrays. Returns the key.
    pub fn insert_interleaved(&mut self, raw_name: &str, text: &str) -> Result<String> {
        let key = convert_variable_name(raw_name);
        let (values, uncertainties) = split_values_uncertainties(&str_to_vec(text)?)?;
        let entry = match (values.as_slice(), uncertainties.as_slice()) {
            ([value], [uncertainty]) => Entry::uncertain(*value, *uncertainty),
            _ => Entry::uncertain(
                Value::Array(NdArray::from_vec(values)),
                Value::Array(NdArray::from_vec(uncertainties)),
            ),
        };
        self.data.insert(key.clone(), entry);
        Ok(key)
    }
}

impl fmt::Display for ResultsCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}>", EntityKind::Results.type_name(), self.name)
    }
}

impl Comparable for ResultsCollection {
    fn kind(&self) -> EntityKind {
        EntityKind::Results
    }

    fn compare_contents(
        &self,
        other: &Self,
        tolerances: &Tolerances,
        notifier: &dyn Notifier,
    ) -> Result<bool> {
        let labels = Labels::new(self.to_string(), other.to_string());
        compare_collections(&self.data, &other.data, tolerances, &labels, notifier)
    }
}
