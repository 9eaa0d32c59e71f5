//! Statistical primitives
//!
//! Reducers over a single vector and the two sample tests the evaluators
//! bind against their reference data.

pub mod chi2;
pub mod ks;
pub mod special;

pub use chi2::{chi2_contingency, Chi2Result};
pub use ks::{ks_2samp, KsResult};

use crate::errors::DriftError;
use hashbrown::HashMap;
use std::hash::Hash;

// f64::min and f64::max skip NaN, the reducers here return it instead.
fn nan_or(a: f64, b: f64, pick: fn(f64, f64) -> f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        pick(a, b)
    }
}

/// Smallest value of the data, NaN if any value is NaN.
pub fn min(data: &[f64]) -> Result<f64, DriftError> {
    data.iter()
        .copied()
        .reduce(|a, b| nan_or(a, b, f64::min))
        .ok_or(DriftError::EmptyInput)
}

/// Largest value of the data, NaN if any value is NaN.
pub fn max(data: &[f64]) -> Result<f64, DriftError> {
    data.iter()
        .copied()
        .reduce(|a, b| nan_or(a, b, f64::max))
        .ok_or(DriftError::EmptyInput)
}

/// Number of values that are not NaN.
pub fn count_real(data: &[f64]) -> usize {
    data.iter().filter(|x| !x.is_nan()).count()
}

/// Arithmetic mean of the data.
pub fn mean(data: &[f64]) -> Result<f64, DriftError> {
    if data.is_empty() {
        return Err(DriftError::EmptyInput);
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation (no degrees of freedom correction).
pub fn std(data: &[f64]) -> Result<f64, DriftError> {
    let mu = mean(data)?;
    let var = data.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / data.len() as f64;
    Ok(var.sqrt())
}

/// Distinct values of the data with the number of times each occurs,
/// sorted by value.
pub fn unique_counts<T>(data: &[T]) -> Vec<(T, usize)>
where
    T: Clone + Eq + Hash + Ord,
{
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for v in data {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut res: Vec<(T, usize)> = counts.into_iter().map(|(k, c)| (k.clone(), c)).collect();
    res.sort_by(|a, b| a.0.cmp(&b.0));
    res
}
