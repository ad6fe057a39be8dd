//! Analysis configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SpcError, SpcResult};
use crate::spc::{RuleId, DEFAULT_NEAR_LIMIT_SIGMA};

/// Settings for a control chart analysis.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration:
///
/// ```toml
/// near_limit_sigma = 0.25
/// rules = [1, 2, 3, 4, 5, 6, 7, 8, 10]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Half-width of the near-limit band around each sigma line, in sigmas.
    pub near_limit_sigma: f64,
    /// Rules to evaluate. Defaults to every implemented rule.
    pub rules: Vec<RuleId>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            near_limit_sigma: DEFAULT_NEAR_LIMIT_SIGMA,
            rules: RuleId::ALL.to_vec(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> SpcResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SpcError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> SpcResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SpcError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration values.
    ///
    /// Returns Err if:
    /// - `near_limit_sigma` is not in (0, 0.5)
    /// - `rules` is empty
    pub fn validate(&self) -> SpcResult<()> {
        if !self.near_limit_sigma.is_finite()
            || self.near_limit_sigma <= 0.0
            || self.near_limit_sigma >= 0.5
        {
            return Err(SpcError::Config(format!(
                "near_limit_sigma ({}) must be in (0, 0.5)",
                self.near_limit_sigma
            )));
        }
        if self.rules.is_empty() {
            return Err(SpcError::Config(
                "at least one rule must be enabled".to_string(),
            ));
        }
        Ok(())
    }
}
