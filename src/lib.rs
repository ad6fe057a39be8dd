//! # u-spc-rules
//!
//! Sensitizing-rule evaluation for individual-value control charts.
//!
//! Given an ordered sequence of measurements, the crate computes the center
//! line and sigma zones and flags the points that break the classic
//! Western Electric / Nelson run rules, plus a near-limit warning rule.
//!
//! This crate is domain-agnostic — it operates on raw `f64` data without
//! knowledge of how the measurements were collected or how they are plotted.
//!
//! ## Modules
//!
//! - [`spc`] — Zones, sliding windows, cycle detection, rules, and reports
//! - [`config`] — Analysis settings loaded from TOML
//! - [`error`] — Error taxonomy
//!
//! ## Example
//!
//! ```
//! use u_spc_rules::spc::{analyze, RuleId};
//!
//! let mut data: Vec<f64> = (0..20).map(|i| if i % 3 == 0 { 1.0 } else { -0.5 }).collect();
//! data[10] = 12.0;
//!
//! let report = analyze(&data).unwrap();
//! let beyond: Vec<usize> = report
//!     .for_rule(RuleId::BeyondLimits)
//!     .map(|v| v.start_index)
//!     .collect();
//! assert_eq!(beyond, vec![10]);
//! ```

pub mod config;
pub mod error;
pub mod spc;

pub use config::AnalysisConfig;
pub use error::{SpcError, SpcResult};
