//! Small helpers for turning raw output text into collection entries.

use crate::errors::{Error, Result};

/// Pure: Parse whitespace-separated numbers.
///
/// # Examples
///
/// ```
/// use tallycmp::utils::str_to_vec;
///
/// assert_eq!(str_to_vec("1 2.5  -3e2").unwrap(), vec![1.0, 2.5, -300.0]);
/// ```
pub fn str_to_vec(text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| Error::ParseNumber {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Pure: Split `[x1, u1, x2, u2, ...]` into values and uncertainties.
///
/// # Errors
///
/// [`Error::InvalidArray`] when the input does not hold whole pairs.
pub fn split_values_uncertainties(interleaved: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if interleaved.len() % 2 != 0 {
        let pairs = interleaved.len() / 2 + 1;
        return Err(Error::InvalidArray {
            shape: vec![pairs, 2],
            expected: pairs * 2,
            actual: interleaved.len(),
        });
    }
    Ok(interleaved
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .unzip())
}

/// Pure: `SCREAMING_SNAKE` output names to `mixedCase`, e.g. `INF_KINF` to `infKinf`
pub fn convert_variable_name(variable: &str) -> String {
    let mut parts = variable.split('_').map(str::to_lowercase);
    let mut name = parts.next().unwrap_or_default();
    for part in parts {
        let mut chars = part.chars();
        if let Some(head) = chars.next() {
            name.extend(head.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}
