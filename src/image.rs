//! Image handles attached to signals.
//!
//! A [`Signal`](crate::Signal) may remember the image it was scanned from.
//! The image is shared, never copied or modified by signal operations. The
//! only thing this crate ever reads from it is the flattened grayscale
//! buffer, used when filling lookup tables from image intensities.

use std::borrow::Cow;
use std::fmt;

/// An image a line scan can refer back to.
pub trait ImageSource: fmt::Debug + Send + Sync {
    /// Width in pixels.
    fn width(&self) -> usize;

    /// Height in pixels.
    fn height(&self) -> usize;

    /// Grayscale intensities of every pixel, flattened.
    fn gray_pixels(&self) -> Cow<'_, [u8]>;
}

/// Row-major 8-bit grayscale buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayImage {
    /// Create from row-major pixels.
    ///
    /// Returns `None` if `pixels.len() != width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image filled with a single intensity.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }

    /// Intensity at `(x, y)`, `None` outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }
}

impl ImageSource for GrayImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn gray_pixels(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self.pixels)
    }
}
