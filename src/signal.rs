//! The line scan signal type.
//!
//! [`Signal`] owns an ordered buffer of intensity samples together with the
//! image coordinate each sample was taken from. Every operation in this crate
//! reads a signal and returns a brand-new one; nothing mutates in place.
//!
//! # Example
//!
//! ```
//! use linescan::{Point, Signal};
//!
//! let s = Signal::new(vec![1.0, 2.0, 3.0, 2.0, 1.0]);
//! assert_eq!(s.len(), 5);
//! assert_eq!(s.coordinates()[3], Point::new(3.0, 3.0));
//!
//! // Slicing keeps the signal type, so every method is still available
//! let tail = s.slice(2..);
//! assert_eq!(tail.as_slice(), &[3.0, 2.0, 1.0]);
//! assert_eq!(tail.derivative().as_slice(), &[0.0, -1.0, -1.0]);
//! ```

use std::ops::{Bound, Index, RangeBounds};
use std::sync::Arc;

use crate::error::{Result, SignalError};
use crate::helpers::linspace;
use crate::image::ImageSource;

/// A 2D image location.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Point {
    fn from((x, y): (usize, usize)) -> Self {
        Self {
            x: x as f64,
            y: y as f64,
        }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Intensity samples pulled along a path through an image.
///
/// Invariant: `coordinates().len() == len()`.
#[derive(Debug, Clone)]
pub struct Signal {
    samples: Vec<f64>,
    coordinates: Vec<Point>,
    image: Option<Arc<dyn ImageSource>>,
    endpoints: Option<(Point, Point)>,
}

/// `(i, i)` placeholder coordinates.
fn index_coordinates(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(i as f64, i as f64)).collect()
}

impl Signal {
    /// Create from samples, with `(i, i)` placeholder coordinates.
    pub fn new(samples: Vec<f64>) -> Self {
        let coordinates = index_coordinates(samples.len());
        Self {
            samples,
            coordinates,
            image: None,
            endpoints: None,
        }
    }

    /// Attach the image location of every sample.
    ///
    /// Fails with [`SignalError::CoordinateMismatch`] unless there is exactly
    /// one coordinate per sample.
    pub fn with_coordinates<P: Into<Point>>(
        mut self,
        coordinates: impl IntoIterator<Item = P>,
    ) -> Result<Self> {
        let coordinates: Vec<Point> = coordinates.into_iter().map(Into::into).collect();
        if coordinates.len() != self.samples.len() {
            return Err(SignalError::CoordinateMismatch {
                samples: self.samples.len(),
                coordinates: coordinates.len(),
            });
        }
        self.coordinates = coordinates;
        Ok(self)
    }

    /// Attach the image the samples were taken from.
    pub fn with_image(mut self, image: Arc<dyn ImageSource>) -> Self {
        self.image = Some(image);
        self
    }

    /// Attach the two ends of the scanned path.
    pub fn with_endpoints(mut self, start: impl Into<Point>, end: impl Into<Point>) -> Self {
        self.endpoints = Some((start.into(), end.into()));
        self
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.samples.iter()
    }

    /// Sample at `index`, `None` when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.samples.get(index).copied()
    }

    /// Image location of every sample.
    #[inline]
    pub fn coordinates(&self) -> &[Point] {
        &self.coordinates
    }

    /// The image this signal was scanned from, if known.
    pub fn image(&self) -> Option<&Arc<dyn ImageSource>> {
        self.image.as_ref()
    }

    /// The two ends of the scanned path, if known.
    #[inline]
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        self.endpoints
    }

    /// Consume and return the sample buffer.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Contiguous sub-signal.
    ///
    /// The result keeps the image and endpoints and takes the matching
    /// range of coordinates.
    ///
    /// # Panics
    /// Panics if the range is out of bounds, like slice indexing.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Signal {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len(),
        };

        Signal {
            samples: self.samples[start..end].to_vec(),
            coordinates: self.coordinates[start..end].to_vec(),
            image: self.image.clone(),
            endpoints: self.endpoints,
        }
    }

    /// New signal with the same metadata and `samples.len() == self.len()`.
    pub(crate) fn with_samples(&self, samples: Vec<f64>) -> Signal {
        debug_assert_eq!(samples.len(), self.samples.len());
        Signal {
            samples,
            coordinates: self.coordinates.clone(),
            image: self.image.clone(),
            endpoints: self.endpoints,
        }
    }

    /// New signal with the same metadata and possibly a different length.
    ///
    /// When the length changes, coordinates are regenerated as by
    /// [`with_path_samples`](Self::with_path_samples).
    pub(crate) fn with_resized_samples(&self, samples: Vec<f64>) -> Signal {
        if samples.len() == self.samples.len() {
            return self.with_samples(samples);
        }
        tracing::debug!(
            from = self.samples.len(),
            to = samples.len(),
            "regenerated coordinates for resized signal"
        );
        self.with_path_samples(samples)
    }

    /// New signal whose coordinates are laid out evenly between the first
    /// and last coordinate of `self`, one per sample.
    pub(crate) fn with_path_samples(&self, samples: Vec<f64>) -> Signal {
        let coordinates = match (self.coordinates.first(), self.coordinates.last()) {
            (Some(first), Some(last)) => interpolate_path(*first, *last, samples.len()),
            _ => index_coordinates(samples.len()),
        };

        Signal {
            samples,
            coordinates,
            image: self.image.clone(),
            endpoints: self.endpoints,
        }
    }
}

/// `n` points evenly spaced on the segment `first..=last`.
fn interpolate_path(first: Point, last: Point, n: usize) -> Vec<Point> {
    let xs = linspace(first.x, last.x, n);
    let ys = linspace(first.y, last.y, n);
    xs.into_iter().zip(ys).map(|(x, y)| Point::new(x, y)).collect()
}

impl PartialEq for Signal {
    /// Samples, coordinates and endpoints compare by value; the image by identity.
    fn eq(&self, other: &Self) -> bool {
        let same_image = match (&self.image, &other.image) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_image
            && self.samples == other.samples
            && self.coordinates == other.coordinates
            && self.endpoints == other.endpoints
    }
}

impl Index<usize> for Signal {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.samples[index]
    }
}

impl AsRef<[f64]> for Signal {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

impl From<Vec<f64>> for Signal {
    fn from(samples: Vec<f64>) -> Self {
        Signal::new(samples)
    }
}

impl From<&[f64]> for Signal {
    fn from(samples: &[f64]) -> Self {
        Signal::new(samples.to_vec())
    }
}

impl FromIterator<f64> for Signal {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Signal::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Signal {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Signal {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signal({} samples)", self.samples.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayImage;

    fn ramp(n: usize) -> Signal {
        Signal::new((0..n).map(|i| i as f64).collect())
    }

    #[test]
    fn test_default_coordinates_are_index_pairs() {
        let s = ramp(4);
        let expected: Vec<Point> = (0..4usize).map(|i| Point::from((i, i))).collect();
        assert_eq!(s.coordinates(), expected.as_slice());
        assert!(s.image().is_none());
        assert!(s.endpoints().is_none());
    }

    #[test]
    fn test_with_coordinates_length_checked() {
        let err = ramp(3)
            .with_coordinates(vec![(0.0, 0.0), (1.0, 0.0)])
            .unwrap_err();
        assert_eq!(
            err,
            SignalError::CoordinateMismatch {
                samples: 3,
                coordinates: 2
            }
        );

        let s = ramp(2)
            .with_coordinates(vec![(5.0, 1.0), (6.0, 1.0)])
            .unwrap();
        assert_eq!(s.coordinates()[1], Point::new(6.0, 1.0));
    }

    #[test]
    fn test_slice_returns_signal_with_metadata() {
        let img: Arc<dyn ImageSource> = Arc::new(GrayImage::filled(4, 4, 0));
        let s = ramp(6)
            .with_image(Arc::clone(&img))
            .with_endpoints((0.0, 0.0), (5.0, 5.0));

        let sub = s.slice(1..4);
        assert_eq!(sub.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(sub.coordinates()[0], Point::new(1.0, 1.0));
        assert_eq!(sub.coordinates().len(), 3);
        assert!(Arc::ptr_eq(sub.image().unwrap(), &img));
        assert_eq!(sub.endpoints(), s.endpoints());

        assert_eq!(s.slice(..2).len(), 2);
        assert_eq!(s.slice(4..).as_slice(), &[4.0, 5.0]);
        assert_eq!(s.slice(2..=3).as_slice(), &[2.0, 3.0]);
    }

    #[test]
    #[should_panic]
    fn test_slice_out_of_bounds_panics() {
        let _ = ramp(3).slice(1..5);
    }

    #[test]
    fn test_sequence_access() {
        let s: Signal = vec![4.0, 5.0, 6.0].into_iter().collect();
        assert_eq!(s[1], 5.0);
        assert_eq!(s.get(3), None);
        let total: f64 = s.iter().sum();
        assert_eq!(total, 15.0);
        let doubled: Vec<f64> = (&s).into_iter().map(|v| v * 2.0).collect();
        assert_eq!(doubled, vec![8.0, 10.0, 12.0]);
        assert_eq!(s.clone().into_samples(), vec![4.0, 5.0, 6.0]);
        assert_eq!(s.to_string(), "Signal(3 samples)");
    }

    #[test]
    fn test_resized_samples_regenerates_coordinates() {
        let s = ramp(3)
            .with_coordinates(vec![(0.0, 10.0), (1.0, 10.0), (2.0, 10.0)])
            .unwrap();
        let r = s.with_resized_samples(vec![0.0; 5]);
        assert_eq!(r.coordinates().len(), 5);
        assert_eq!(r.coordinates()[2], Point::new(1.0, 10.0));
        assert_eq!(r.coordinates()[4], Point::new(2.0, 10.0));
    }

    #[test]
    fn test_equality_compares_image_identity() {
        let a: Arc<dyn ImageSource> = Arc::new(GrayImage::filled(1, 1, 0));
        let b: Arc<dyn ImageSource> = Arc::new(GrayImage::filled(1, 1, 0));
        let s = ramp(2).with_image(Arc::clone(&a));
        assert_eq!(s, ramp(2).with_image(a));
        assert_ne!(s, ramp(2).with_image(b));
        assert_ne!(s, ramp(2));
    }
}
