//! Whole-sequence analysis: zones, every enabled rule, one ordered report.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, debug_span, trace};

use super::rules::descriptor;
use super::violation::{RuleId, Violation};
use super::zones::ZoneBoundaries;
use crate::config::AnalysisConfig;
use crate::error::{SpcError, SpcResult};

/// Outcome of analyzing one measurement sequence.
///
/// Violations are ordered by rule number, then by start index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    boundaries: ZoneBoundaries,
    violations: Vec<Violation>,
}

impl Report {
    /// The zones the rules were evaluated against.
    pub fn boundaries(&self) -> &ZoneBoundaries {
        &self.boundaries
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// `true` if no rule was violated.
    pub fn is_in_control(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of a single rule, in ascending start index.
    pub fn for_rule(&self, rule: RuleId) -> impl Iterator<Item = &Violation> + '_ {
        self.violations.iter().filter(move |v| v.rule == rule)
    }

    /// Every point index implicated by at least one violation, ascending.
    ///
    /// Covers the whole qualifying window of each violation, for overlaying
    /// markers on a chart.
    pub fn flagged_indices(&self) -> Vec<usize> {
        self.violations
            .iter()
            .flat_map(Violation::indices)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Runs a configured set of rules against measurement sequences.
///
/// # Examples
///
/// ```
/// use u_spc_rules::spc::{Analyzer, RuleId};
/// use u_spc_rules::AnalysisConfig;
///
/// let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();
/// let mut data = vec![10.0, 10.2, 9.8, 10.1, 9.9, 10.0, 10.1, 9.9, 10.0, 9.8];
/// data.push(25.0);
/// let report = analyzer.analyze(&data).unwrap();
/// assert_eq!(report.for_rule(RuleId::BeyondLimits).count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer, validating the configuration.
    pub fn new(mut config: AnalysisConfig) -> SpcResult<Self> {
        config.validate()?;
        config.rules.sort();
        config.rules.dedup();
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Compute zones from `data` and evaluate every enabled rule.
    ///
    /// # Errors
    ///
    /// Fails as [`ZoneBoundaries::with_near_limit`] does. No partial report is
    /// produced.
    pub fn analyze(&self, data: &[f64]) -> SpcResult<Report> {
        let span = debug_span!("analyze", points = data.len());
        let _enter = span.enter();

        let boundaries = ZoneBoundaries::with_near_limit(data, self.config.near_limit_sigma)?;
        debug!(
            mean = boundaries.mean(),
            sigma = boundaries.sigma(),
            ucl = boundaries.upper(3),
            lcl = boundaries.lower(3),
            "zones computed"
        );

        self.evaluate(data, boundaries)
    }

    /// Evaluate the enabled rules against externally supplied boundaries,
    /// e.g. limits established from a historical baseline.
    ///
    /// The configured near-limit band replaces the one carried by
    /// `boundaries`.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidInput`] if any measurement is not finite.
    pub fn analyze_with(&self, data: &[f64], boundaries: ZoneBoundaries) -> SpcResult<Report> {
        let span = debug_span!("analyze", points = data.len());
        let _enter = span.enter();

        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(SpcError::InvalidInput(format!(
                "measurement at index {pos} is not finite"
            )));
        }
        let boundaries = boundaries.near_limit_sigma(self.config.near_limit_sigma)?;
        self.evaluate(data, boundaries)
    }

    fn evaluate(&self, data: &[f64], boundaries: ZoneBoundaries) -> SpcResult<Report> {
        let mut violations = Vec::new();
        for &rule in &self.config.rules {
            let found = (descriptor(rule).evaluate)(data, &boundaries);
            debug!(rule = rule.number(), count = found.len(), "rule evaluated");
            for v in &found {
                trace!(rule = v.rule_id(), start_index = v.start_index, "violation");
            }
            violations.extend(found);
        }
        violations.sort_by_key(|v| (v.rule, v.start_index));

        Ok(Report {
            boundaries,
            violations,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }
}

/// Analyze a sequence with every rule and the default near-limit band.
pub fn analyze(data: &[f64]) -> SpcResult<Report> {
    Analyzer::default().analyze(data)
}
