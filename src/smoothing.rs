//! Smoothing filters for line scans.
//!
//! This module provides a Gaussian-weighted moving average and a sliding
//! median. Both leave the edges of the signal unfiltered instead of padding,
//! so the output always has the same length as the input.

use crate::error::{Result, SignalError};
use crate::helpers::median_of;
use crate::signal::Signal;

/// Gaussian kernel evaluated at a fraction of the window width.
fn gaussian_kernel(frac: f64) -> f64 {
    (-(4.0 * frac).powi(2)).exp()
}

/// Unnormalized Gaussian weights for a smoothing degree.
///
/// The window has `2 * degree - 1` taps centered on tap `degree - 1`.
///
/// # Arguments
/// * `degree` - Smoothing degree, at least 1
///
/// # Returns
/// Window weights, empty for degree 0
pub fn gaussian_window(degree: usize) -> Vec<f64> {
    if degree == 0 {
        return Vec::new();
    }
    let width = 2 * degree - 1;
    (0..width)
        .map(|i| {
            let offset = i as f64 - degree as f64 + 1.0;
            gaussian_kernel(offset / width as f64)
        })
        .collect()
}

/// Weighted moving average, one value per full window.
///
/// Produces `x.len() - weights.len()` values; the window starting at the
/// last possible offset is not evaluated.
fn weighted_moving_average(x: &[f64], weights: &[f64]) -> Vec<f64> {
    let width = weights.len();
    let total: f64 = weights.iter().sum();
    let count = x.len().saturating_sub(width);

    (0..count)
        .map(|i| {
            let acc: f64 = x[i..i + width]
                .iter()
                .zip(weights)
                .map(|(v, w)| v * w)
                .sum();
            acc / total
        })
        .collect()
}

impl Signal {
    /// Gaussian smoothing.
    ///
    /// Higher degree means more smoothing. The first `degree - 1` and last
    /// `degree` samples are passed through unchanged.
    ///
    /// # Errors
    /// [`SignalError::InvalidParameter`] if `degree` is 0 or the window
    /// `2 * degree - 1` is longer than the signal.
    pub fn smooth(&self, degree: usize) -> Result<Signal> {
        if degree == 0 {
            return Err(SignalError::invalid("degree", "must be at least 1"));
        }
        let x = self.as_slice();
        // 2 * degree - 1 <= len, checked without overflowing
        if degree > (x.len() + 1) / 2 {
            return Err(SignalError::invalid(
                "degree",
                format!(
                    "window of 2 * {} - 1 samples is longer than the signal ({})",
                    degree,
                    x.len()
                ),
            ));
        }

        let smoothed = weighted_moving_average(x, &gaussian_window(degree));

        let mut out = Vec::with_capacity(x.len());
        out.extend_from_slice(&x[..degree - 1]);
        out.extend(smoothed);
        out.extend_from_slice(&x[x.len() - degree..]);
        Ok(self.with_samples(out))
    }

    /// Sliding median filter.
    ///
    /// Even window sizes are widened by one. The `window / 2` samples at each
    /// end are passed through; a signal shorter than the window comes back
    /// unchanged.
    pub fn median(&self, window: usize) -> Signal {
        let window = if window % 2 == 0 { window + 1 } else { window };
        let half = window / 2;
        let x = self.as_slice();
        let n = x.len();

        if n <= 2 * half {
            return self.with_samples(x.to_vec());
        }

        let mut out = Vec::with_capacity(n);
        out.extend_from_slice(&x[..half]);
        for i in half..(n - half) {
            out.push(median_of(&x[i - half..=i + half]));
        }
        out.extend_from_slice(&x[n - half..]);
        self.with_samples(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::NUMERICAL_EPS;

    fn noisy_ramp(n: usize) -> Signal {
        (0..n)
            .map(|i| i as f64 + if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect()
    }

    // ============== Gaussian smoothing tests ==============

    #[test]
    fn test_gaussian_window_symmetric() {
        let w = gaussian_window(4);
        assert_eq!(w.len(), 7);
        assert!((w[3] - 1.0).abs() < NUMERICAL_EPS, "center weight is 1");
        for i in 0..3 {
            assert!((w[i] - w[6 - i]).abs() < NUMERICAL_EPS);
            assert!(w[i] < w[i + 1]);
        }
        assert!(gaussian_window(0).is_empty());
    }

    #[test]
    fn test_smooth_preserves_length() {
        let s = noisy_ramp(40);
        for degree in 1..=10 {
            assert_eq!(s.smooth(degree).unwrap().len(), 40, "degree {}", degree);
        }
    }

    #[test]
    fn test_smooth_impulse() {
        let s = Signal::new(vec![0.0, 0.0, 3.0, 0.0, 0.0]);
        let out = s.smooth(2).unwrap();
        let expected = [0.0, 0.37894607965347, 2.2421078406930603, 0.0, 0.0];
        for (a, e) in out.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-12, "got {} expected {}", a, e);
        }
    }

    #[test]
    fn test_smooth_degree_one_is_identity() {
        let s = noisy_ramp(9);
        assert_eq!(s.smooth(1).unwrap().as_slice(), s.as_slice());
    }

    #[test]
    fn test_smooth_constant_unchanged() {
        let s = Signal::new(vec![4.0; 12]);
        for v in s.smooth(3).unwrap().iter() {
            assert!((v - 4.0).abs() < NUMERICAL_EPS);
        }
    }

    #[test]
    fn test_smooth_edges_unfiltered() {
        let s = noisy_ramp(20);
        let out = s.smooth(3).unwrap();
        assert_eq!(&out.as_slice()[..2], &s.as_slice()[..2]);
        assert_eq!(&out.as_slice()[17..], &s.as_slice()[17..]);
    }

    #[test]
    fn test_smooth_invalid_input() {
        let s = noisy_ramp(4);
        assert!(matches!(
            s.smooth(0),
            Err(SignalError::InvalidParameter { name: "degree", .. })
        ));
        // window 5 > 4 samples
        assert!(s.smooth(3).is_err());
    }

    #[test]
    fn test_smooth_huge_degree_is_error() {
        let s = Signal::new(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            s.smooth(usize::MAX / 2 + 1),
            Err(SignalError::InvalidParameter { name: "degree", .. })
        ));
        assert!(s.smooth(usize::MAX).is_err());
        assert!(Signal::new(Vec::new()).smooth(1).is_err());
        // window of exactly the signal length is allowed
        assert_eq!(s.smooth(2).unwrap().len(), 3);
    }

    // ============== Median filter tests ==============

    #[test]
    fn test_median_removes_spike() {
        let s = Signal::new(vec![1.0, 1.0, 1.0, 50.0, 1.0, 1.0, 1.0]);
        let out = s.median(3);
        assert_eq!(out.as_slice(), &[1.0; 7]);
    }

    #[test]
    fn test_median_even_window_widened() {
        let s = Signal::new(vec![9.0, 1.0, 5.0, 2.0, 8.0, 3.0, 7.0]);
        assert_eq!(s.median(4).as_slice(), s.median(5).as_slice());
        // window 5: edges of 2 kept, interior medians
        assert_eq!(s.median(5).as_slice(), &[9.0, 1.0, 5.0, 3.0, 5.0, 3.0, 7.0]);
    }

    #[test]
    fn test_median_short_signal_passthrough() {
        let s = Signal::new(vec![3.0, 1.0, 2.0]);
        assert_eq!(s.median(5).as_slice(), s.as_slice());
        assert_eq!(s.median(0).as_slice(), s.as_slice());
    }
}
