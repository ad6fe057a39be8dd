//! Sigma zones for an individual-value control chart.
//!
//! The chart is centered on the population mean of the full sequence and
//! divided into bands one standard deviation wide:
//!
//! ```text
//!   Beyond   |x - mu| >= 3 sigma
//!   Zone A   2 sigma <= |x - mu| < 3 sigma
//!   Zone B   1 sigma <= |x - mu| < 2 sigma
//!   Zone C   |x - mu| < 1 sigma
//! ```
//!
//! A point lying exactly on a boundary belongs to the outer band. Every rule
//! reads zone membership and side of center through [`ZoneBoundaries::classify`],
//! so the convention holds uniformly across the rule set.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//!   Section 5.3.6: The Western Electric zone rules.

use serde::Serialize;
use u_numflow::stats;

use crate::error::{SpcError, SpcResult};

/// Default half-width of the near-limit band, in sigmas.
pub const DEFAULT_NEAR_LIMIT_SIGMA: f64 = 0.25;

/// Upper control limit (UCL), center line (CL), and lower control limit (LCL).
///
/// # Invariants
///
/// - `lcl < cl < ucl`
/// - All values are finite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlLimits {
    /// Upper control limit (UCL = CL + 3 sigma).
    pub ucl: f64,
    /// Center line (process mean).
    pub cl: f64,
    /// Lower control limit (LCL = CL - 3 sigma).
    pub lcl: f64,
}

/// Which side of the center line a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Above,
    Below,
    /// Exactly on the center line; belongs to neither side.
    Center,
}

/// Sigma band a point falls in, ordered from the center outwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Zone {
    /// Within one sigma of the mean.
    C,
    /// Between one and two sigma.
    B,
    /// Between two and three sigma.
    A,
    /// Three sigma or more from the mean.
    Beyond,
}

impl Zone {
    /// `true` for every band except zone C.
    pub fn is_outside_c(self) -> bool {
        self != Zone::C
    }
}

/// Position of a single measurement relative to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub side: Side,
    pub zone: Zone,
    /// Within the near-limit band of one of the ±1σ, ±2σ, ±3σ lines.
    pub near_limit: bool,
}

/// Center line, sigma, and zone bands for one measurement sequence.
///
/// Computed once per analysis and read-only afterwards.
///
/// # Examples
///
/// ```
/// use u_spc_rules::spc::{Side, Zone, ZoneBoundaries};
///
/// let zones = ZoneBoundaries::from_data(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((zones.mean() - 5.0).abs() < 1e-12);
/// assert!((zones.sigma() - 2.0).abs() < 1e-12);
///
/// let c = zones.classify(9.5);
/// assert_eq!(c.side, Side::Above);
/// assert_eq!(c.zone, Zone::A);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneBoundaries {
    mean: f64,
    sigma: f64,
    /// Near-limit half-width as a fraction of sigma.
    near_limit: f64,
}

impl ZoneBoundaries {
    /// Compute boundaries from the measurements using the default near-limit
    /// band of 0.25 sigma.
    ///
    /// # Errors
    ///
    /// - [`SpcError::InvalidInput`] if fewer than 2 points are given or any
    ///   value is not finite.
    /// - [`SpcError::Numeric`] if all values are identical (sigma is zero).
    pub fn from_data(data: &[f64]) -> SpcResult<Self> {
        Self::with_near_limit(data, DEFAULT_NEAR_LIMIT_SIGMA)
    }

    /// Compute boundaries with a custom near-limit half-width (in sigmas).
    ///
    /// The fraction must lie in `(0, 0.5)` so that the bands around adjacent
    /// sigma lines never overlap.
    pub fn with_near_limit(data: &[f64], near_limit: f64) -> SpcResult<Self> {
        validate_near_limit(near_limit)?;
        if data.len() < 2 {
            return Err(SpcError::InvalidInput(format!(
                "at least 2 measurements are required, got {}",
                data.len()
            )));
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(SpcError::InvalidInput(format!(
                "measurement at index {pos} is not finite"
            )));
        }

        let mean = stats::mean(data)
            .ok_or_else(|| SpcError::InvalidInput("mean is undefined".to_string()))?;
        let sigma = stats::population_std_dev(data).ok_or_else(|| {
            SpcError::InvalidInput("standard deviation is undefined".to_string())
        })?;
        if sigma == 0.0 {
            return Err(SpcError::Numeric(
                "standard deviation is zero; sigma zones are undefined".to_string(),
            ));
        }

        Ok(Self {
            mean,
            sigma,
            near_limit,
        })
    }

    /// Build boundaries from known process parameters (e.g. historical limits).
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidInput`] if `mean` is not finite or `sigma` is not a
    /// positive finite number.
    pub fn from_parts(mean: f64, sigma: f64) -> SpcResult<Self> {
        if !mean.is_finite() {
            return Err(SpcError::InvalidInput(format!("mean must be finite, got {mean}")));
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(SpcError::InvalidInput(format!(
                "sigma must be positive and finite, got {sigma}"
            )));
        }
        Ok(Self {
            mean,
            sigma,
            near_limit: DEFAULT_NEAR_LIMIT_SIGMA,
        })
    }

    /// Replace the near-limit half-width (in sigmas).
    pub fn near_limit_sigma(mut self, near_limit: f64) -> SpcResult<Self> {
        validate_near_limit(near_limit)?;
        self.near_limit = near_limit;
        Ok(self)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Center line. Always equal to the mean.
    pub fn center(&self) -> f64 {
        self.mean
    }

    /// Upper boundary `mu + k * sigma`.
    pub fn upper(&self, k: u8) -> f64 {
        self.mean + f64::from(k) * self.sigma
    }

    /// Lower boundary `mu - k * sigma`.
    pub fn lower(&self, k: u8) -> f64 {
        self.mean - f64::from(k) * self.sigma
    }

    /// Half-width of the near-limit band in measurement units.
    pub fn near_limit_width(&self) -> f64 {
        self.near_limit * self.sigma
    }

    /// The 3-sigma control limits.
    pub fn control_limits(&self) -> ControlLimits {
        ControlLimits {
            ucl: self.upper(3),
            cl: self.mean,
            lcl: self.lower(3),
        }
    }

    /// Side of center for a single value.
    pub fn side(&self, value: f64) -> Side {
        if value > self.mean {
            Side::Above
        } else if value < self.mean {
            Side::Below
        } else {
            Side::Center
        }
    }

    /// Classify a value by side, zone, and near-limit membership.
    ///
    /// Zones are decided against the same `upper(k)` / `lower(k)` values the
    /// chart reports, so a value equal to a reported line always lands in
    /// the outer band.
    pub fn classify(&self, value: f64) -> Classification {
        let side = self.side(value);
        let beyond_line = |k: u8| match side {
            Side::Above => value >= self.upper(k),
            Side::Below => value <= self.lower(k),
            Side::Center => false,
        };
        let zone = if beyond_line(3) {
            Zone::Beyond
        } else if beyond_line(2) {
            Zone::A
        } else if beyond_line(1) {
            Zone::B
        } else {
            Zone::C
        };

        let width = self.near_limit_width();
        let near_limit = (1..=3_u8).any(|k| {
            (value - self.upper(k)).abs() < width || (value - self.lower(k)).abs() < width
        });

        Classification {
            side,
            zone,
            near_limit,
        }
    }
}

fn validate_near_limit(near_limit: f64) -> SpcResult<()> {
    if !near_limit.is_finite() || near_limit <= 0.0 || near_limit >= 0.5 {
        return Err(SpcError::InvalidInput(format!(
            "near-limit band must be in (0, 0.5) sigma, got {near_limit}"
        )));
    }
    Ok(())
}
