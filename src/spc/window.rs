//! Fixed-size sliding windows over a measurement sequence.

use std::iter::FusedIterator;

/// A borrowed view of consecutive measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<'a> {
    /// Index of the first measurement in the window.
    pub start: usize,
    /// The measurements, `values.len()` equal to the window size.
    pub values: &'a [f64],
}

impl<'a> Window<'a> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(index, value)` pairs using absolute sequence indices.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, f64)> + 'a {
        let start = self.start;
        self.values
            .iter()
            .enumerate()
            .map(move |(offset, &v)| (start + offset, v))
    }
}

/// Lazy iterator over all windows of a fixed size, advancing one index at a
/// time. Created by [`windows`].
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    data: &'a [f64],
    size: usize,
    next_start: usize,
}

/// Sliding windows of `size` consecutive measurements with stride 1.
///
/// Yields `data.len() - size + 1` windows, or none when `size` exceeds the
/// sequence length. Calling again (or cloning the iterator) reproduces the
/// same windows.
///
/// # Panics
///
/// Panics if `size` is 0.
///
/// # Examples
///
/// ```
/// use u_spc_rules::spc::windows;
///
/// let data = [1.0, 2.0, 3.0, 4.0];
/// let starts: Vec<usize> = windows(&data, 3).map(|w| w.start).collect();
/// assert_eq!(starts, vec![0, 1]);
/// assert_eq!(windows(&data, 5).count(), 0);
/// ```
pub fn windows(data: &[f64], size: usize) -> Windows<'_> {
    assert!(size >= 1, "window size must be at least 1");
    Windows {
        data,
        size,
        next_start: 0,
    }
}

impl<'a> Iterator for Windows<'a> {
    type Item = Window<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.next_start + self.size;
        if end > self.data.len() {
            return None;
        }
        let window = Window {
            start: self.next_start,
            values: &self.data[self.next_start..end],
        };
        self.next_start += 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.data.len() + 1).saturating_sub(self.next_start + self.size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows<'_> {}

impl FusedIterator for Windows<'_> {}
