//! Rule identifiers and violation records.
//!
//! # Reference
//!
//! Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//! *Journal of Quality Technology* 16(4), pp. 237-239.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a sensitizing rule.
///
/// The discriminant is the rule number. Number 9 ("unusual or nonrandom
/// pattern") has no variant: it is not a fixed-formula test and is not
/// evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum RuleId {
    /// A point beyond the 3-sigma control limits.
    BeyondLimits = 1,

    /// 2 of 3 consecutive points between 2 and 3 sigma on the same side.
    ///
    /// An early warning of a potential shift.
    TwoOfThreeInZoneA = 2,

    /// 4 of 5 consecutive points beyond 1 sigma on the same side.
    ///
    /// Indicates a small sustained shift.
    FourOfFiveBeyond1Sigma = 3,

    /// 8 consecutive points on the same side of the center line.
    EightOneSide = 4,

    /// 6 consecutive points strictly increasing or strictly decreasing.
    SixTrend = 5,

    /// 15 consecutive points alternating up and down, all within 1 sigma.
    ///
    /// Indicates stratification, typically two mixed streams with reduced
    /// variation.
    FifteenAlternatingInZoneC = 6,

    /// 14 consecutive points alternating up and down.
    FourteenAlternating = 7,

    /// 8 consecutive points beyond 1 sigma with both sides represented.
    ///
    /// Indicates a mixture pattern: points avoid the center zone.
    EightBeyond1SigmaBothSides = 8,

    /// A point within the near-limit band of a 1, 2 or 3 sigma line.
    NearLimit = 10,
}

impl RuleId {
    /// All implemented rules in ascending order.
    pub const ALL: [RuleId; 9] = [
        RuleId::BeyondLimits,
        RuleId::TwoOfThreeInZoneA,
        RuleId::FourOfFiveBeyond1Sigma,
        RuleId::EightOneSide,
        RuleId::SixTrend,
        RuleId::FifteenAlternatingInZoneC,
        RuleId::FourteenAlternating,
        RuleId::EightBeyond1SigmaBothSides,
        RuleId::NearLimit,
    ];

    /// The rule number.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Number of consecutive points the rule examines.
    pub fn window_size(self) -> usize {
        match self {
            RuleId::BeyondLimits | RuleId::NearLimit => 1,
            RuleId::TwoOfThreeInZoneA => 3,
            RuleId::FourOfFiveBeyond1Sigma => 5,
            RuleId::EightOneSide | RuleId::EightBeyond1SigmaBothSides => 8,
            RuleId::SixTrend => 6,
            RuleId::FifteenAlternatingInZoneC => 15,
            RuleId::FourteenAlternating => 14,
        }
    }

    /// Short human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            RuleId::BeyondLimits => "point beyond 3 sigma",
            RuleId::TwoOfThreeInZoneA => "2 of 3 points between 2 and 3 sigma on the same side",
            RuleId::FourOfFiveBeyond1Sigma => "4 of 5 points beyond 1 sigma on the same side",
            RuleId::EightOneSide => "8 points in a row on the same side of the center line",
            RuleId::SixTrend => "6 points in a row steadily increasing or decreasing",
            RuleId::FifteenAlternatingInZoneC => {
                "15 points in a row alternating up and down within 1 sigma"
            }
            RuleId::FourteenAlternating => "14 points in a row alternating up and down",
            RuleId::EightBeyond1SigmaBothSides => {
                "8 points in a row beyond 1 sigma on both sides of the center line"
            }
            RuleId::NearLimit => "point near a 1, 2 or 3 sigma line",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}", self.number())
    }
}

impl From<RuleId> for u8 {
    fn from(id: RuleId) -> u8 {
        id.number()
    }
}

impl TryFrom<u8> for RuleId {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        RuleId::ALL
            .into_iter()
            .find(|id| id.number() == number)
            .ok_or_else(|| match number {
                9 => "rule 9 (unusual or nonrandom pattern) is not implemented".to_string(),
                n => format!("unknown rule {n}"),
            })
    }
}

/// A rule violation anchored at the first point of the qualifying window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: RuleId,
    /// Zero-based index of the earliest point implicated.
    pub start_index: usize,
    pub description: String,
}

impl Violation {
    pub fn new(rule: RuleId, start_index: usize) -> Self {
        Self {
            rule,
            start_index,
            description: rule.description().to_string(),
        }
    }

    /// The integer rule number.
    pub fn rule_id(&self) -> u8 {
        self.rule.number()
    }

    /// Indices of every point in the qualifying window.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start_index..self.start_index + self.rule.window_size()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at index {}: {}",
            self.rule, self.start_index, self.description
        )
    }
}
