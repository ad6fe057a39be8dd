//! Statistical Process Control (SPC) sensitizing rules.
//!
//! Evaluates an individual-value control chart built from the measurement
//! sequence itself: the center line is the population mean and the zones are
//! one population standard deviation wide.
//!
//! # Building blocks
//!
//! - [`ZoneBoundaries`] — mean, sigma, zone bands, and point classification
//! - [`windows`] — fixed-size sliding windows with stride 1
//! - [`detect_alternating`] — alternating up/down runs
//! - [`rules`] — the individual rule functions and the [`RULES`] table
//! - [`Analyzer`] / [`analyze`] — run the rules and collect one ordered [`Report`]
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.

mod cycle;
mod report;
pub mod rules;
mod violation;
mod window;
mod zones;

pub use cycle::{detect_alternating, is_alternating, AlternatingRuns, Direction};
pub use report::{analyze, Analyzer, Report};
pub use rules::{RuleDescriptor, RuleFn, RULES};
pub use violation::{RuleId, Violation};
pub use window::{windows, Window, Windows};
pub use zones::{
    Classification, ControlLimits, Side, Zone, ZoneBoundaries, DEFAULT_NEAR_LIMIT_SIGMA,
};
