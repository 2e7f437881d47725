use super::read_detector;
use crate::messages::Notifier;
use crate::objects::DataKind;
use crate::values::NdArray;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Slice a detector document and return the sub-array.
pub fn slice_detector(
    path: &Path,
    fixed: &[(String, usize)],
    data: DataKind,
    notifier: &dyn Notifier,
) -> Result<NdArray> {
    let detector = read_detector(path)?;
    let fixed: BTreeMap<String, usize> = fixed.iter().cloned().collect();
    Ok(detector.slice_with(&fixed, data, notifier)?)
}

/// Bin edges of `quantity` on a detector document, as JSON.
pub fn print_edges(path: &Path, quantity: &str) -> Result<String> {
    let detector = read_detector(path)?;
    let edges = detector.grid_edges(quantity)?;
    Ok(serde_json::to_string(&edges)?)
}
