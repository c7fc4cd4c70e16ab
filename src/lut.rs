//! 8-bit lookup tables for remapping pixel-like line scans.
//!
//! # Example
//!
//! ```
//! use linescan::{Lut, LutFill, LutIndices, Signal};
//!
//! // Mark intensities 10..=12 and pass everything else through
//! let mut lut = Lut::empty(LutFill::Value(-1.0));
//! lut.fill(LutIndices::Indices(&[10, 11, 12]), 255.0);
//!
//! let s = Signal::new(vec![9.0, 10.0, 12.0, 13.0]);
//! let marked = s.apply_lut(&lut).unwrap();
//! assert_eq!(marked.as_slice(), &[9.0, 255.0, 255.0, 13.0]);
//! ```

use std::ops::Index;

use crate::error::{Result, SignalError};
use crate::helpers::{linspace, MAX_INTENSITY};
use crate::image::ImageSource;
use crate::signal::Signal;

/// Number of entries in a lookup table.
pub const LUT_SIZE: usize = 256;

/// Initial contents of a new lookup table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LutFill {
    /// Rounded linear ramp from the first to the second value, both clamped
    /// to `[0, 255]`.
    Ramp(f64, f64),
    /// `0` fills with zeros, a positive value fills with that value clamped
    /// to `[1, 255]`, a negative value gives the identity ramp `0..=255`.
    Value(f64),
}

impl From<f64> for LutFill {
    fn from(value: f64) -> Self {
        LutFill::Value(value)
    }
}

impl From<(f64, f64)> for LutFill {
    fn from((start, stop): (f64, f64)) -> Self {
        LutFill::Ramp(start, stop)
    }
}

/// Which table entries a fill touches.
#[derive(Debug, Clone, Copy)]
pub enum LutIndices<'a> {
    /// Explicit indices; anything outside `0..256` is skipped.
    Indices(&'a [i64]),
    /// Every grayscale intensity present in an image.
    Image(&'a dyn ImageSource),
}

/// 256-entry table mapping an 8-bit sample to a replacement value.
///
/// Tables built by [`Lut::empty`] hold whole numbers; [`Lut::fill`] stores
/// its value as given, clamped to `[0, 255]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut {
    table: [f64; LUT_SIZE],
}

impl Lut {
    /// Create a table with the given initial contents.
    pub fn empty(fill: impl Into<LutFill>) -> Self {
        let mut table = [0.0; LUT_SIZE];
        match fill.into() {
            LutFill::Ramp(start, stop) => {
                let start = start.clamp(0.0, MAX_INTENSITY);
                let stop = stop.clamp(0.0, MAX_INTENSITY);
                for (entry, v) in table.iter_mut().zip(linspace(start, stop, LUT_SIZE)) {
                    *entry = v.round_ties_even();
                }
            }
            LutFill::Value(v) if v > 0.0 => table.fill(v.clamp(1.0, MAX_INTENSITY).trunc()),
            LutFill::Value(v) if v < 0.0 => return Self::identity(),
            LutFill::Value(_) => {}
        }
        Self { table }
    }

    /// The table mapping every value to itself.
    pub fn identity() -> Self {
        let mut table = [0.0; LUT_SIZE];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as f64;
        }
        Self { table }
    }

    /// Set the selected entries to `value`, clamped to `[0, 255]`.
    ///
    /// Fractional values are kept as they are.
    pub fn fill(&mut self, indices: LutIndices<'_>, value: f64) -> &mut Self {
        let value = value.clamp(0.0, MAX_INTENSITY);
        match indices {
            LutIndices::Indices(idxs) => {
                for &idx in idxs {
                    if (0..LUT_SIZE as i64).contains(&idx) {
                        self.table[idx as usize] = value;
                    }
                }
            }
            LutIndices::Image(image) => {
                for &px in image.gray_pixels().iter() {
                    self.table[px as usize] = value;
                }
            }
        }
        self
    }

    /// Entry at `index`, `None` outside the table.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.table.get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.table
    }
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<usize> for Lut {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.table[index]
    }
}

impl Signal {
    /// Map every sample through `lut`.
    ///
    /// # Errors
    /// [`SignalError::LutIndex`] if a sample is not an integer in `0..256`.
    pub fn apply_lut(&self, lut: &Lut) -> Result<Signal> {
        let out = self
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                if value.fract() != 0.0 || !(0.0..LUT_SIZE as f64).contains(&value) {
                    return Err(SignalError::LutIndex { index, value });
                }
                Ok(lut[value as usize])
            })
            .collect::<Result<Vec<f64>>>()?;
        Ok(self.with_samples(out))
    }
}
