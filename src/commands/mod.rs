//! CLI command implementations.
//!
//! Available commands:
//! - **compare**: Compare two result or detector documents
//! - **slice**: Extract a sub-array of detector data
//! - **edges**: Print the bin edges of a detector grid or axis
//! - **init**: Initialize a new tallycmp configuration file
//!
//! Documents are JSON objects tagged with `"type": "results"` or
//! `"type": "detector"`.

pub mod compare;
pub mod init;
pub mod slice;

pub use compare::{compare_documents, CompareConfig};
pub use init::init_config;
pub use slice::{print_edges, slice_detector};

use crate::comparison::protocol::{Comparable, EntityKind};
use crate::objects::{Detector, ResultsCollection};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A comparable entity as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Document {
    Results(ResultsCollection),
    Detector(Detector),
}

impl Document {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Results(results) => results.kind(),
            Self::Detector(detector) => detector.kind(),
        }
    }
}

/// Read and parse a JSON document.
pub fn read_document(path: &Path) -> Result<Document> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse document {}", path.display()))
}

/// Read a document that must hold a detector.
pub fn read_detector(path: &Path) -> Result<Detector> {
    match read_document(path)? {
        Document::Detector(detector) => Ok(detector),
        other => anyhow::bail!(
            "{} holds a {}, not a detector",
            path.display(),
            other.kind()
        ),
    }
}
