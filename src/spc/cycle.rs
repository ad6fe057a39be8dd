//! Detection of alternating (oscillating) runs.
//!
//! A run is alternating when consecutive differences strictly alternate in
//! sign: up, down, up, ... or down, up, down, .... A zero difference is
//! neither up nor down and breaks the run.
//!
//! # Reference
//!
//! Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//! *Journal of Quality Technology* 16(4), pp. 237-239 (Test 4).

use std::cmp::Ordering;
use std::iter::FusedIterator;

use super::window::{windows, Windows};

/// Direction of the step between two consecutive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    /// Direction of the step from `from` to `to`.
    pub fn between(from: f64, to: f64) -> Self {
        match to.partial_cmp(&from) {
            Some(Ordering::Greater) => Direction::Up,
            Some(Ordering::Less) => Direction::Down,
            _ => Direction::Flat,
        }
    }
}

/// Whether every step in `values` is nonzero and reverses the previous one.
///
/// Slices of fewer than two points are vacuously alternating; a two-point
/// slice alternates as long as its single step is not flat.
pub fn is_alternating(values: &[f64]) -> bool {
    let mut previous = None;
    for pair in values.windows(2) {
        let dir = Direction::between(pair[0], pair[1]);
        if dir == Direction::Flat || previous == Some(dir) {
            return false;
        }
        previous = Some(dir);
    }
    true
}

/// Lazy iterator over start indices of alternating runs. Created by
/// [`detect_alternating`].
#[derive(Debug, Clone)]
pub struct AlternatingRuns<'a> {
    inner: Windows<'a>,
}

/// Start index of every window of `run_length` points that alternates.
///
/// Slides one index at a time, so a longer oscillation reports each
/// overlapping start.
///
/// # Panics
///
/// Panics if `run_length` is 0.
///
/// # Examples
///
/// ```
/// use u_spc_rules::spc::detect_alternating;
///
/// let data = [1.0, 3.0, 2.0, 4.0, 3.0, 3.0];
/// let starts: Vec<usize> = detect_alternating(&data, 4).collect();
/// assert_eq!(starts, vec![0, 1]);
/// ```
pub fn detect_alternating(data: &[f64], run_length: usize) -> AlternatingRuns<'_> {
    AlternatingRuns {
        inner: windows(data, run_length),
    }
}

impl Iterator for AlternatingRuns<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.inner
            .by_ref()
            .find(|w| is_alternating(w.values))
            .map(|w| w.start)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl FusedIterator for AlternatingRuns<'_> {}
