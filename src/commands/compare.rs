use super::{read_document, Document};
use crate::comparison::protocol::Comparable;
use crate::comparison::tolerances::CompareOptions;
use crate::errors::Error;
use crate::messages::Notifier;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

/// Inputs of the `compare` command after config and CLI are merged.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub first: PathBuf,
    pub second: PathBuf,
    pub options: CompareOptions,
}

/// Compare two documents, reporting through `notifier`.
///
/// Returns whether the documents are similar. Documents of unrelated kinds
/// and invalid tolerances are errors.
pub fn compare_documents(config: &CompareConfig, notifier: &dyn Notifier) -> Result<bool> {
    let first = read_document(&config.first)?;
    let second = read_document(&config.second)?;
    debug!(
        first = %config.first.display(),
        second = %config.second.display(),
        "Loaded documents"
    );

    let similar = match (&first, &second) {
        (Document::Results(a), Document::Results(b)) => {
            a.compare(b, &config.options, notifier)?
        }
        (Document::Detector(a), Document::Detector(b)) => {
            a.compare(b, &config.options, notifier)?
        }
        _ => {
            return Err(Error::IncompatibleKinds {
                this: first.kind(),
                other: second.kind(),
            })
            .context("Documents cannot be compared");
        }
    };
    Ok(similar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::CollectingNotifier;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_mixed_documents_are_incompatible() {
        let dir = TempDir::new().unwrap();
        let results = write(&dir, "r.json", r#"{"type": "results", "name": "r", "data": {}}"#);
        let detector = write(
            &dir,
            "d.json",
            indoc! {r#"
                {"type": "detector", "name": "flux", "kind": "spherical_detector"}
            "#},
        );
        let config = CompareConfig {
            first: results,
            second: detector,
            options: CompareOptions::default(),
        };

        let err = compare_documents(&config, &CollectingNotifier::new()).unwrap_err();
        let root = err.root_cause().to_string();
        assert!(root.contains("spherical detector"), "{root}");
        assert!(root.contains("results collection"), "{root}");
    }

    #[test]
    fn test_similar_results() {
        let dir = TempDir::new().unwrap();
        let doc = r#"{"type": "results", "name": "r", "data": {"keff": 1.0}}"#;
        let config = CompareConfig {
            first: write(&dir, "a.json", doc),
            second: write(&dir, "b.json", doc),
            options: CompareOptions::default(),
        };
        assert!(compare_documents(&config, &CollectingNotifier::new()).unwrap());
    }
}
