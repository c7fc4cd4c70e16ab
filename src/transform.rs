//! Point-wise transforms: rescaling, differencing, thresholding and search.

use crate::error::{Result, SignalError};
use crate::helpers::MAX_INTENSITY;
use crate::signal::Signal;

/// (min, max) of a non-empty slice, ignoring NaNs.
pub(crate) fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    Some((lo, hi))
}

impl Signal {
    /// Divide every sample by the largest sample, so the maximum becomes 1.
    ///
    /// Fails on an empty signal or when the maximum is zero.
    pub fn normalize(&self) -> Result<Signal> {
        let (_, vmax) = value_range(self.as_slice()).ok_or(SignalError::EmptySignal {
            operation: "normalize",
        })?;
        if vmax == 0.0 {
            return Err(SignalError::DivisionByZero {
                operation: "normalize",
            });
        }

        Ok(self.with_samples(self.iter().map(|&v| v / vmax).collect()))
    }

    /// Linearly map `[min, max]` of the signal onto `[a, b]`.
    ///
    /// The bounds may be given in either order. Fails on an empty or constant
    /// signal.
    pub fn scale(&self, a: f64, b: f64) -> Result<Signal> {
        let (vmin, vmax) = value_range(self.as_slice()).ok_or(SignalError::EmptySignal {
            operation: "scale",
        })?;
        let span = vmax - vmin;
        if span == 0.0 {
            return Err(SignalError::DivisionByZero { operation: "scale" });
        }

        let lo = a.min(b);
        let hi = a.max(b);
        let gain = (hi - lo) / span;
        Ok(self.with_samples(self.iter().map(|&v| gain * (v - vmin) + lo).collect()))
    }

    /// First-order difference, `d[0] = 0` and `d[i] = x[i] - x[i-1]`.
    ///
    /// Useful for locating edges along the scan.
    pub fn derivative(&self) -> Signal {
        let x = self.as_slice();
        let mut d = Vec::with_capacity(x.len());
        if !x.is_empty() {
            d.push(0.0);
        }
        d.extend(x.windows(2).map(|w| w[1] - w[0]));
        self.with_samples(d)
    }

    /// Binary threshold: samples below `level` become 0, the rest 255.
    ///
    /// With `invert` the two output levels swap.
    pub fn threshold(&self, level: f64, invert: bool) -> Signal {
        let (low, high) = if invert {
            (MAX_INTENSITY, 0.0)
        } else {
            (0.0, MAX_INTENSITY)
        };
        self.with_samples(
            self.iter()
                .map(|&v| if v < level { low } else { high })
                .collect(),
        )
    }

    /// `255 - x` for every sample.
    pub fn invert(&self) -> Signal {
        self.with_samples(self.iter().map(|&v| MAX_INTENSITY - v).collect())
    }

    /// Index of the first sample equal to `value`.
    pub fn find_first_index_of(&self, value: f64) -> Option<usize> {
        self.iter().position(|&v| v == value)
    }

    /// Index of the last sample equal to `value`.
    pub fn find_last_index_of(&self, value: f64) -> Option<usize> {
        self.iter().rposition(|&v| v == value)
    }
}
