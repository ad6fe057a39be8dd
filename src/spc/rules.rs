//! Sensitizing rules for detecting non-random patterns on a control chart.
//!
//! Each rule is a pure function of the measurement sequence and its
//! [`ZoneBoundaries`], returning violations in ascending start index. The
//! reported index is always the first point of the qualifying window.
//!
//! | # | Pattern | Window |
//! |---|---------|--------|
//! | 1 | point beyond 3σ | 1 |
//! | 2 | 2 of 3 in zone A, same side | 3 |
//! | 3 | 4 of 5 beyond 1σ, same side | 5 |
//! | 4 | 8 on one side of center | 8 |
//! | 5 | 6 strictly increasing or decreasing | 6 |
//! | 6 | 15 alternating, all within 1σ | 15 |
//! | 7 | 14 alternating | 14 |
//! | 8 | 8 beyond 1σ, both sides | 8 |
//! | 10 | point near a sigma line | 1 |
//!
//! Rule 9 ("unusual or nonrandom pattern") has no fixed formula and is not
//! evaluated.
//!
//! # References
//!
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.
//! - Western Electric (1956). *Statistical Quality Control Handbook*.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.

use super::cycle::{detect_alternating, Direction};
use super::violation::{RuleId, Violation};
use super::window::{windows, Window};
use super::zones::{Side, Zone, ZoneBoundaries};

/// Signature shared by every rule evaluator.
pub type RuleFn = fn(&[f64], &ZoneBoundaries) -> Vec<Violation>;

/// A rule paired with its evaluator.
#[derive(Clone, Copy)]
pub struct RuleDescriptor {
    pub id: RuleId,
    pub evaluate: RuleFn,
}

impl std::fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleDescriptor").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Every implemented rule, in ascending rule number.
pub static RULES: [RuleDescriptor; 9] = [
    RuleDescriptor {
        id: RuleId::BeyondLimits,
        evaluate: check_rule1,
    },
    RuleDescriptor {
        id: RuleId::TwoOfThreeInZoneA,
        evaluate: check_rule2,
    },
    RuleDescriptor {
        id: RuleId::FourOfFiveBeyond1Sigma,
        evaluate: check_rule3,
    },
    RuleDescriptor {
        id: RuleId::EightOneSide,
        evaluate: check_rule4,
    },
    RuleDescriptor {
        id: RuleId::SixTrend,
        evaluate: check_rule5,
    },
    RuleDescriptor {
        id: RuleId::FifteenAlternatingInZoneC,
        evaluate: check_rule6,
    },
    RuleDescriptor {
        id: RuleId::FourteenAlternating,
        evaluate: check_rule7,
    },
    RuleDescriptor {
        id: RuleId::EightBeyond1SigmaBothSides,
        evaluate: check_rule8,
    },
    RuleDescriptor {
        id: RuleId::NearLimit,
        evaluate: check_rule10,
    },
];

/// Look up the descriptor for a rule.
pub fn descriptor(id: RuleId) -> &'static RuleDescriptor {
    let index = match id {
        RuleId::BeyondLimits => 0,
        RuleId::TwoOfThreeInZoneA => 1,
        RuleId::FourOfFiveBeyond1Sigma => 2,
        RuleId::EightOneSide => 3,
        RuleId::SixTrend => 4,
        RuleId::FifteenAlternatingInZoneC => 5,
        RuleId::FourteenAlternating => 6,
        RuleId::EightBeyond1SigmaBothSides => 7,
        RuleId::NearLimit => 8,
    };
    &RULES[index]
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Report every window of the rule's size for which `predicate` holds.
fn check_windows<F>(data: &[f64], rule: RuleId, predicate: F) -> Vec<Violation>
where
    F: Fn(&Window<'_>) -> bool,
{
    windows(data, rule.window_size())
        .filter(|w| predicate(w))
        .map(|w| Violation::new(rule, w.start))
        .collect()
}

/// Whether at least `min_count` points of the window are on one side and
/// satisfy `in_band`.
fn same_side_count<F>(
    window: &Window<'_>,
    zones: &ZoneBoundaries,
    min_count: usize,
    in_band: F,
) -> bool
where
    F: Fn(Zone) -> bool,
{
    let mut above = 0_usize;
    let mut below = 0_usize;
    for &value in window.values {
        let c = zones.classify(value);
        if !in_band(c.zone) {
            continue;
        }
        match c.side {
            Side::Above => above += 1,
            Side::Below => below += 1,
            Side::Center => {}
        }
    }
    above >= min_count || below >= min_count
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Rule 1: a point beyond 3 sigma.
pub fn check_rule1(data: &[f64], zones: &ZoneBoundaries) -> Vec<Violation> {
    check_windows(data, RuleId::BeyondLimits, |w| {
        zones.classify(w.values[0]).zone == Zone::Beyond
    })
}

/// Rule 2: 2 of 3 consecutive points in zone A on the same side.
///
/// Points beyond 3 sigma do not count; rule 1 reports those.
pub fn check_rule2(data: &[f64], zones: &ZoneBoundaries) -> Vec<Violation> {
    check_windows(data, RuleId::TwoOfThreeInZoneA, |w| {
        same_side_count(w, zones, 2, |zone| zone == Zone::A)
    })
}

/// Rule 3: 4 of 5 consecutive points beyond 1 sigma on the same side.
pub fn check_rule3(data: &[f64], zones: &ZoneBoundaries) -> Vec<Violation> {
    check_windows(data, RuleId::FourOfFiveBeyond1Sigma, |w| {
        same_side_count(w, zones, 4, Zone::is_outside_c)
    })
}

/// Rule 4: 8 consecutive points on the same side of the center line.
///
/// A point exactly on the center line belongs to neither side and breaks the run.
pub fn check_rule4(data: &[f64], zones: &ZoneBoundaries) -> Vec<Violation> {
    check_windows(data, RuleId::EightOneSide, |w| {
        let first = zones.side(w.values[0]);
        first != Side::Center && w.values.iter().all(|&v| zones.side(v) == first)
    })
}

/// Rule 5: 6 consecutive points strictly increasing or strictly decreasing.
///
/// Equal consecutive values break the trend.
pub fn check_rule5(data: &[f64], _zones: &ZoneBoundaries) -> Vec<Violation> {
    check_windows(data, RuleId::SixTrend, |w| {
        let first = Direction::between(w.values[0], w.values[1]);
        first != Direction::Flat
            && w
                .values
                .windows(2)
                .all(|pair| Direction::between(pair[0], pair[1]) == first)
    })
}

/// Rule 6: 15 consecutive points alternating up and down, all in zone C.
pub fn check_rule6(data: &[f64], zones: &ZoneBoundaries) -> Vec<Violation> {
    let rule = RuleId::FifteenAlternatingInZoneC;
    let size = rule.window_size();
    detect_alternating(data, size)
        .filter(|&start| {
            data[start..start + size]
                .iter()
                .all(|&v| zones.classify(v).zone == Zone::C)
        })
        .map(|start| Violation::new(rule, start))
        .collect()
}

/// Rule 7: 14 consecutive points alternating up and down.
pub fn check_rule7(data: &[f64], _zones: &ZoneBoundaries) -> Vec<Violation> {
    let rule = RuleId::FourteenAlternating;
    detect_alternating(data, rule.window_size())
        .map(|start| Violation::new(rule, start))
        .collect()
}

/// Rule 8: 8 consecutive points outside zone C, with points on both sides
/// of the center line.
pub fn check_rule8(data: &[f64], zones: &ZoneBoundaries) -> Vec<Violation> {
    check_windows(data, RuleId::EightBeyond1SigmaBothSides, |w| {
        let mut above = false;
        let mut below = false;
        for &value in w.values {
            let c = zones.classify(value);
            if !c.zone.is_outside_c() {
                return false;
            }
            match c.side {
                Side::Above => above = true,
                Side::Below => below = true,
                Side::Center => return false,
            }
        }
        above && below
    })
}

/// Rule 10: a point within the near-limit band of a 1, 2 or 3 sigma line.
pub fn check_rule10(data: &[f64], zones: &ZoneBoundaries) -> Vec<Violation> {
    check_windows(data, RuleId::NearLimit, |w| {
        zones.classify(w.values[0]).near_limit
    })
}

/// Run the given rules and return their violations in rule order.
pub fn evaluate(rules: &[RuleId], data: &[f64], zones: &ZoneBoundaries) -> Vec<Violation> {
    rules
        .iter()
        .flat_map(|&id| (descriptor(id).evaluate)(data, zones))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// UCL 28, CL 25, LCL 22.
    fn zones() -> ZoneBoundaries {
        ZoneBoundaries::from_parts(25.0, 1.0).unwrap()
    }

    fn starts(violations: &[Violation]) -> Vec<usize> {
        violations.iter().map(|v| v.start_index).collect()
    }

    fn alternating(n: usize, low: f64, high: f64) -> Vec<f64> {
        (0..n).map(|i| if i % 2 == 0 { low } else { high }).collect()
    }

    // --- Descriptor table ---

    #[test]
    fn test_rules_table_is_ordered_and_complete() {
        let ids: Vec<RuleId> = RULES.iter().map(|d| d.id).collect();
        assert_eq!(ids, RuleId::ALL.to_vec());
        for id in RuleId::ALL {
            assert_eq!(descriptor(id).id, id);
        }
    }

    // --- Rule 1: Beyond 3 sigma ---

    #[test]
    fn test_rule1_point_above_ucl() {
        let violations = check_rule1(&[25.0, 29.0, 25.0], &zones());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].start_index, 1);
        assert_eq!(violations[0].rule, RuleId::BeyondLimits);
    }

    #[test]
    fn test_rule1_both_sides() {
        let violations = check_rule1(&[25.0, 28.5, 21.5], &zones());
        assert_eq!(starts(&violations), vec![1, 2]);
    }

    #[test]
    fn test_rule1_on_limit_counts_as_beyond() {
        let violations = check_rule1(&[28.0, 22.0, 27.9, 22.1], &zones());
        assert_eq!(starts(&violations), vec![0, 1]);
    }

    // --- Rule 2: 2 of 3 in zone A ---

    #[test]
    fn test_rule2_two_of_three_above() {
        let violations = check_rule2(&[27.5, 25.0, 27.5], &zones());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].start_index, 0);
        assert_eq!(violations[0].rule, RuleId::TwoOfThreeInZoneA);
    }

    #[test]
    fn test_rule2_two_of_three_below() {
        let violations = check_rule2(&[25.0, 22.5, 22.5, 25.0], &zones());
        assert_eq!(starts(&violations), vec![0, 1]);
    }

    #[test]
    fn test_rule2_not_triggered_mixed_sides() {
        assert!(check_rule2(&[27.5, 25.0, 22.5], &zones()).is_empty());
    }

    #[test]
    fn test_rule2_ignores_points_beyond_3_sigma() {
        assert!(check_rule2(&[28.5, 25.0, 28.5], &zones()).is_empty());
        assert_eq!(check_rule2(&[28.5, 27.0, 27.5], &zones()).len(), 1);
    }

    // --- Rule 3: 4 of 5 beyond 1 sigma ---

    #[test]
    fn test_rule3_four_of_five_above() {
        let violations = check_rule3(&[26.5, 26.5, 25.0, 26.5, 26.5], &zones());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, RuleId::FourOfFiveBeyond1Sigma);
    }

    #[test]
    fn test_rule3_three_of_five_not_enough() {
        assert!(check_rule3(&[26.5, 25.0, 25.0, 26.5, 26.5], &zones()).is_empty());
    }

    #[test]
    fn test_rule3_one_sigma_line_counts_as_beyond() {
        let violations = check_rule3(&[24.0, 24.0, 25.0, 24.0, 23.0], &zones());
        assert_eq!(starts(&violations), vec![0]);
    }

    #[test]
    fn test_rule3_sides_not_mixed() {
        assert!(check_rule3(&[26.5, 23.5, 26.5, 23.5, 26.5], &zones()).is_empty());
    }

    // --- Rule 4: 8 on one side ---

    #[test]
    fn test_rule4_eight_above() {
        let violations = check_rule4(&[26.0; 8], &zones());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].start_index, 0);
        assert_eq!(violations[0].rule, RuleId::EightOneSide);
    }

    #[test]
    fn test_rule4_seven_not_enough() {
        assert!(check_rule4(&[24.0; 7], &zones()).is_empty());
    }

    #[test]
    fn test_rule4_reported_at_first_of_run() {
        let mut values = vec![26.0, 24.0];
        values.extend([24.5; 8]);
        let violations = check_rule4(&values, &zones());
        assert_eq!(starts(&violations), vec![1, 2]);
    }

    #[test]
    fn test_rule4_center_breaks_run() {
        let mut values = vec![26.0; 4];
        values.push(25.0);
        values.extend([26.0; 4]);
        assert!(check_rule4(&values, &zones()).is_empty());
    }

    #[test]
    fn test_rule4_continuation() {
        let violations = check_rule4(&[26.0; 10], &zones());
        assert_eq!(starts(&violations), vec![0, 1, 2]);
    }

    // --- Rule 5: 6 trending ---

    #[test]
    fn test_rule5_six_increasing() {
        let violations = check_rule5(&[20.0, 21.0, 22.0, 23.0, 24.0, 25.0], &zones());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].start_index, 0);
        assert_eq!(violations[0].rule, RuleId::SixTrend);
    }

    #[test]
    fn test_rule5_six_decreasing() {
        let violations = check_rule5(&[30.0, 29.0, 28.0, 27.0, 26.0, 25.0], &zones());
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_rule5_five_not_enough() {
        assert!(check_rule5(&[20.0, 21.0, 22.0, 23.0, 24.0], &zones()).is_empty());
    }

    #[test]
    fn test_rule5_tie_breaks_trend() {
        assert!(check_rule5(&[20.0, 21.0, 22.0, 22.0, 23.0, 24.0, 25.0], &zones()).is_empty());
    }

    #[test]
    fn test_rule5_direction_change_breaks_trend() {
        assert!(check_rule5(&[20.0, 21.0, 22.0, 21.5, 23.0, 24.0], &zones()).is_empty());
    }

    // --- Rule 6: 15 alternating within 1 sigma ---

    #[test]
    fn test_rule6_fifteen_alternating_in_zone_c() {
        let values = alternating(15, 24.5, 25.5);
        let violations = check_rule6(&values, &zones());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].start_index, 0);
        assert_eq!(violations[0].rule, RuleId::FifteenAlternatingInZoneC);
    }

    #[test]
    fn test_rule6_fourteen_not_enough() {
        assert!(check_rule6(&alternating(14, 24.5, 25.5), &zones()).is_empty());
    }

    #[test]
    fn test_rule6_point_on_one_sigma_line_leaves_zone_c() {
        let mut values = alternating(15, 24.5, 25.5);
        values[7] = 26.0;
        assert!(check_rule6(&values, &zones()).is_empty());
    }

    #[test]
    fn test_rule6_requires_alternation() {
        let values: Vec<f64> = (0..15).map(|i| 24.5 + (i as f64 % 3.0) * 0.25).collect();
        assert!(check_rule6(&values, &zones()).is_empty());
    }

    // --- Rule 7: 14 alternating ---

    #[test]
    fn test_rule7_fourteen_alternating() {
        let violations = check_rule7(&alternating(14, 24.0, 26.0), &zones());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].start_index, 0);
        assert_eq!(violations[0].rule, RuleId::FourteenAlternating);
    }

    #[test]
    fn test_rule7_thirteen_not_enough() {
        assert!(check_rule7(&alternating(13, 24.0, 26.0), &zones()).is_empty());
    }

    #[test]
    fn test_rule7_any_zone() {
        let violations = check_rule7(&alternating(15, 20.0, 30.0), &zones());
        assert_eq!(starts(&violations), vec![0, 1]);
    }

    // --- Rule 8: 8 beyond 1 sigma, both sides ---

    #[test]
    fn test_rule8_eight_beyond() {
        let values = [27.0, 23.0, 27.0, 23.0, 27.0, 23.0, 27.0, 23.0];
        let violations = check_rule8(&values, &zones());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, RuleId::EightBeyond1SigmaBothSides);
    }

    #[test]
    fn test_rule8_seven_not_enough() {
        let values = [27.0, 23.0, 27.0, 23.0, 27.0, 23.0, 27.0];
        assert!(check_rule8(&values, &zones()).is_empty());
    }

    #[test]
    fn test_rule8_single_side_does_not_trigger() {
        assert!(check_rule8(&[27.0; 8], &zones()).is_empty());
    }

    #[test]
    fn test_rule8_one_sigma_line_is_outside_zone_c() {
        let values = [26.0, 24.0, 26.0, 24.0, 26.0, 24.0, 26.0, 24.0];
        assert_eq!(check_rule8(&values, &zones()).len(), 1);
    }

    #[test]
    fn test_rule8_zone_c_point_breaks_run() {
        let values = [27.0, 23.0, 27.0, 25.5, 27.0, 23.0, 27.0, 23.0];
        assert!(check_rule8(&values, &zones()).is_empty());
    }

    // --- Rule 10: near a sigma line ---

    #[test]
    fn test_rule10_near_limit() {
        let violations = check_rule10(&[25.5, 26.1, 22.9, 25.0, 27.8], &zones());
        assert_eq!(starts(&violations), vec![1, 2, 4]);
        assert!(violations.iter().all(|v| v.rule == RuleId::NearLimit));
    }

    #[test]
    fn test_rule10_custom_band() {
        let narrow = zones().near_limit_sigma(0.05).unwrap();
        assert!(check_rule10(&[26.1], &narrow).is_empty());
        assert_eq!(check_rule10(&[26.01], &narrow).len(), 1);
    }

    // --- Combined evaluation ---

    #[test]
    fn test_evaluate_follows_rule_order() {
        let values = [25.0, 29.0, 25.0];
        let violations = evaluate(&[RuleId::NearLimit, RuleId::BeyondLimits], &values, &zones());
        // 29.0 is not near any line; only rule 1 fires.
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, RuleId::BeyondLimits);
    }

    #[test]
    fn test_no_violations_in_quiet_data() {
        let values = [25.5, 24.8, 25.2, 24.9, 25.1];
        assert!(evaluate(&RuleId::ALL, &values, &zones()).is_empty());
    }

    #[test]
    fn test_short_sequences_are_not_errors() {
        for d in RULES.iter() {
            assert!((d.evaluate)(&[], &zones()).is_empty());
            assert!((d.evaluate)(&[25.0], &zones()).is_empty());
        }
    }
}
