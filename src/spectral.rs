//! Frequency-domain operations: FFT, inverse FFT, band-limited resampling
//! and kernel convolution.

use num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::{Result, SignalError};
use crate::signal::Signal;

/// Discrete Fourier transform of a signal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spectrum {
    /// DFT bins, same length as the signal
    pub bins: Vec<Complex<f64>>,
    /// Frequency of each bin in cycles per sample
    pub frequencies: Vec<f64>,
}

/// Frequencies of the DFT bins for a length-`n` transform.
///
/// Layout is `[0, 1, ..., ceil(n/2) - 1, -floor(n/2), ..., -1] / n`.
pub fn fft_frequencies(n: usize) -> Vec<f64> {
    let positive = n.div_ceil(2);
    (0..n)
        .map(|k| {
            let k = if k < positive {
                k as f64
            } else {
                k as f64 - n as f64
            };
            k / n as f64
        })
        .collect()
}

/// Forward DFT of real data, unnormalized.
fn forward(data: &[f64]) -> Vec<Complex<f64>> {
    let mut buffer: Vec<Complex<f64>> = data.iter().map(|&x| Complex::new(x, 0.0)).collect();
    if buffer.is_empty() {
        return buffer;
    }
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);
    buffer
}

/// Inverse DFT, normalized by `1 / len`, keeping the real part.
fn inverse_real(spectrum: &[Complex<f64>]) -> Vec<f64> {
    let n = spectrum.len();
    if n == 0 {
        return Vec::new();
    }
    let mut buffer = spectrum.to_vec();
    let mut planner = FftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(n);
    ifft.process(&mut buffer);
    buffer.iter().map(|c| c.re / n as f64).collect()
}

/// Band-limited Fourier resampling of `x` to `num` samples.
///
/// The spectrum is truncated (downsampling) or zero-padded (upsampling)
/// around the Nyquist frequency. For an even cut length the Nyquist bin is
/// folded when downsampling and split between the positive and negative
/// halves when upsampling, so real input stays real.
pub fn fourier_resample(x: &[f64], num: usize) -> Vec<f64> {
    let nx = x.len();
    if nx == 0 || num == 0 {
        return Vec::new();
    }
    if num == nx {
        return x.to_vec();
    }

    let spectrum = forward(x);
    let cut = num.min(nx);
    let mut out = vec![Complex::new(0.0, 0.0); num];

    // Bins strictly below the cut's Nyquist frequency on both sides
    let half = (cut - 1) / 2;
    out[0] = spectrum[0];
    for k in 1..=half {
        out[k] = spectrum[k];
        out[num - k] = spectrum[nx - k];
    }

    if cut % 2 == 0 {
        let k = cut / 2;
        if num < nx {
            out[k] = spectrum[k] + spectrum[nx - k];
        } else {
            let split = spectrum[k] * 0.5;
            out[k] = split;
            out[num - k] = split;
        }
    }

    // rustfft is unnormalized: inverse_real divides by num, rescale to 1/nx
    let gain = num as f64 / nx as f64;
    inverse_real(&out).into_iter().map(|v| v * gain).collect()
}

/// Full discrete linear convolution, length `x.len() + kernel.len() - 1`.
pub fn convolve_full(x: &[f64], kernel: &[f64]) -> Vec<f64> {
    if x.is_empty() || kernel.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; x.len() + kernel.len() - 1];
    for (i, &xi) in x.iter().enumerate() {
        for (j, &kj) in kernel.iter().enumerate() {
            out[i + j] += xi * kj;
        }
    }
    out
}

impl Signal {
    /// Discrete Fourier transform and the frequency of each bin.
    pub fn fft(&self) -> Spectrum {
        Spectrum {
            bins: forward(self.as_slice()),
            frequencies: fft_frequencies(self.len()),
        }
    }

    /// Inverse transform of `spectrum`, keeping the real part.
    ///
    /// Metadata comes from `self`. If the spectrum length differs from the
    /// signal length, coordinates are spread evenly between this signal's
    /// first and last coordinate.
    pub fn ifft(&self, spectrum: &[Complex<f64>]) -> Result<Signal> {
        if spectrum.is_empty() {
            return Err(SignalError::EmptySignal { operation: "ifft" });
        }
        Ok(self.with_resized_samples(inverse_real(spectrum)))
    }

    /// Resample to `n` samples with the Fourier method.
    ///
    /// Coordinates are regenerated as `n` points evenly spaced between the
    /// first and last coordinate. Shrinking the signal discards detail above
    /// the new Nyquist frequency.
    pub fn resample(&self, n: usize) -> Result<Signal> {
        if n == 0 {
            return Err(SignalError::invalid("n", "must be positive"));
        }
        if self.is_empty() {
            return Err(SignalError::EmptySignal {
                operation: "resample",
            });
        }

        let samples = fourier_resample(self.as_slice(), n);
        tracing::debug!(from = self.len(), to = n, "resampled signal");
        Ok(self.with_path_samples(samples))
    }

    /// Convolve with `kernel`, cropped back to the signal length.
    ///
    /// An even kernel of length `k` drops `k / 2` leading and `k / 2 - 1`
    /// trailing values of the full convolution; an odd kernel drops
    /// `(k - 1) / 2` from each end.
    pub fn convolve(&self, kernel: &[f64]) -> Result<Signal> {
        if kernel.is_empty() {
            return Err(SignalError::invalid("kernel", "must not be empty"));
        }
        if self.is_empty() {
            return Err(SignalError::EmptySignal {
                operation: "convolve",
            });
        }

        let k = kernel.len();
        let lead = k / 2;
        let full = convolve_full(self.as_slice(), kernel);
        let out = full[lead..lead + self.len()].to_vec();
        Ok(self.with_samples(out))
    }
}
