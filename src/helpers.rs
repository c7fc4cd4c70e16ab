//! Shared constants and small numeric helpers.

/// Small epsilon for numerical comparisons (e.g., avoiding division by zero).
pub const NUMERICAL_EPS: f64 = 1e-10;

/// Default convergence tolerance for iterative algorithms.
pub const DEFAULT_CONVERGENCE_TOL: f64 = 1.49012e-8;

/// Default degree of the Gaussian smoother (window width `2 * degree - 1`).
pub const DEFAULT_SMOOTH_DEGREE: usize = 3;

/// Default number of samples produced by resampling.
pub const DEFAULT_RESAMPLE_LEN: usize = 100;

/// Default binary threshold level.
pub const DEFAULT_THRESHOLD: f64 = 128.0;

/// Default sliding median window.
pub const DEFAULT_MEDIAN_WINDOW: usize = 5;

/// Default value written by LUT fills and looked for by index searches.
pub const DEFAULT_MARK_VALUE: f64 = 255.0;

/// Largest value representable by an 8-bit sample.
pub const MAX_INTENSITY: f64 = 255.0;

/// Evenly spaced values over `[start, stop]`, endpoints included.
///
/// # Arguments
/// * `start` - First value
/// * `stop` - Last value
/// * `n` - Number of values
///
/// # Returns
/// `n` values; a single value is `start`, zero values is empty.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Median of a window of values.
///
/// Even-length windows average the two middle values. NaNs sort last.
pub fn median_of(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(2.0, 4.0, 5);
        assert_eq!(v.len(), 5);
        assert!((v[0] - 2.0).abs() < NUMERICAL_EPS);
        assert!((v[2] - 3.0).abs() < NUMERICAL_EPS);
        assert_eq!(v[4], 4.0);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(7.0, 1.0, 1), vec![7.0]);
    }

    #[test]
    fn test_linspace_descending() {
        let v = linspace(10.0, 0.0, 3);
        assert_eq!(v, vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median_of(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median_of(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_median_empty_is_nan() {
        assert!(median_of(&[]).is_nan());
    }
}
