//! Descriptive statistics over metric samples.

use super::types::Statistics;

impl Statistics {
    /// Mean, population standard deviation, min and max of `values`.
    ///
    /// An empty sample yields all zeros.
    pub fn from_samples(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mean = mean(values);
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

        Self {
            mean,
            std_dev: variance.sqrt(),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Arithmetic mean, summed in input order
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
