//! Population z-score of a value against a history window.

/// Population mean and standard deviation (denominator N).
///
/// Returns `None` for an empty slice. A constant slice has a stddev of
/// exactly zero.
pub fn population_stats(values: &[f64]) -> Option<(f64, f64)> {
    let &first = values.first()?;
    if values.iter().all(|&v| v == first) {
        return Some((first, 0.0));
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

/// Z-score of `latest` relative to `history`.
///
/// `None` when the history is shorter than `min_history` or has zero
/// variance.
pub fn zscore(history: &[f64], latest: f64, min_history: usize) -> Option<f64> {
    if history.len() < min_history {
        return None;
    }
    let (mean, stddev) = population_stats(history)?;
    if stddev == 0.0 {
        return None;
    }
    Some((latest - mean) / stddev)
}
