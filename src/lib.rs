//! # linescan
//!
//! One-dimensional intensity signals sampled along a path through an image.
//!
//! A [`Signal`] ("line scan") pairs an ordered buffer of samples with the image
//! coordinate each sample came from. It behaves like a plain numeric sequence
//! (indexing, iteration, slicing) and adds signal operations, each of which
//! returns a new signal:
//! - Smoothing (Gaussian moving average, sliding median)
//! - Rescaling (normalize, scale to a range), first difference
//! - Global and local extrema with their image locations
//! - FFT / inverse FFT, band-limited resampling, convolution
//! - Nonlinear least-squares model fitting (Levenberg-Marquardt)
//! - 8-bit lookup tables, thresholding and inversion
//!
//! ## Coordinates
//!
//! Without explicit coordinates every sample `i` is placed at `(i, i)`.
//! Length-preserving operations carry coordinates through unchanged;
//! operations that change the sample count lay new coordinates out evenly
//! between the first and last coordinate, so `coordinates().len() == len()`
//! always holds.

#![allow(clippy::needless_range_loop)]

pub mod error;
pub mod extrema;
pub mod fit;
pub mod helpers;
pub mod image;
pub mod lut;
pub mod signal;
pub mod smoothing;
pub mod spectral;
pub mod transform;

// Re-export commonly used items
pub use error::{Result, SignalError};
pub use extrema::Extremum;
pub use fit::{curve_fit, FitOptions, FitResult};
pub use helpers::{
    DEFAULT_MARK_VALUE, DEFAULT_MEDIAN_WINDOW, DEFAULT_RESAMPLE_LEN, DEFAULT_SMOOTH_DEGREE,
    DEFAULT_THRESHOLD, NUMERICAL_EPS,
};
pub use image::{GrayImage, ImageSource};
pub use lut::{Lut, LutFill, LutIndices, LUT_SIZE};
pub use signal::{Point, Signal};
pub use spectral::{fft_frequencies, Spectrum};

// Re-export the complex type used by `Signal::fft` / `Signal::ifft`
pub use num_complex::Complex;
