//! Global and local extrema of a line scan.
//!
//! Every search returns [`Extremum`] records in ascending index order, each
//! carrying the image location the sample was taken from.

use crate::signal::{Point, Signal};
use crate::transform::value_range;

/// A located extreme sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extremum {
    /// Index along the scan
    pub index: usize,
    /// Sample value
    pub value: f64,
    /// Image location of the sample
    pub point: Point,
}

impl Signal {
    fn extremum_at(&self, index: usize) -> Extremum {
        Extremum {
            index,
            value: self[index],
            point: self.coordinates()[index],
        }
    }

    /// Every sample equal to `target`.
    fn collect_equal(&self, target: f64) -> Vec<Extremum> {
        self.iter()
            .enumerate()
            .filter(|&(_, &v)| v == target)
            .map(|(i, _)| self.extremum_at(i))
            .collect()
    }

    /// Every sample equal to the global maximum (all ties are reported).
    pub fn maxima(&self) -> Vec<Extremum> {
        match value_range(self.as_slice()) {
            Some((_, vmax)) => self.collect_equal(vmax),
            None => Vec::new(),
        }
    }

    /// Every sample equal to the global minimum (all ties are reported).
    pub fn minima(&self) -> Vec<Extremum> {
        match value_range(self.as_slice()) {
            Some((vmin, _)) => self.collect_equal(vmin),
            None => Vec::new(),
        }
    }

    /// Samples strictly above both neighbours.
    ///
    /// The first and last samples are always reported.
    pub fn local_maxima(&self) -> Vec<Extremum> {
        self.local_extrema(|centre, neighbour| centre > neighbour)
    }

    /// Samples strictly below both neighbours.
    ///
    /// The first and last samples are always reported.
    pub fn local_minima(&self) -> Vec<Extremum> {
        self.local_extrema(|centre, neighbour| centre < neighbour)
    }

    fn local_extrema(&self, beats: impl Fn(f64, f64) -> bool) -> Vec<Extremum> {
        let x = self.as_slice();
        let n = x.len();
        if n == 0 {
            return Vec::new();
        }

        let mut found = vec![self.extremum_at(0)];
        for i in 1..n.saturating_sub(1) {
            if beats(x[i], x[i - 1]) && beats(x[i], x[i + 1]) {
                found.push(self.extremum_at(i));
            }
        }
        if n > 1 {
            found.push(self.extremum_at(n - 1));
        }
        found
    }
}
