//! Rule Table Validation
//!
//! `RuleTable` is pure data in lib-types; the structural checks and lookups
//! live here as an extension trait.
//!
//! # Rules (enforced at load)
//!
//! - Both schedules are non-empty
//! - Referral levels are contiguous starting at 1
//! - Rank `required_directs` is strictly increasing
//! - Every rate that is a share of a payment is at most 100%
//!
//! A table that fails validation is a configuration error and must stop
//! startup; it is never surfaced per request.

use std::collections::BTreeSet;

use thiserror::Error;

use lib_types::{Bps, RankName, RuleTable};

const MAX_SHARE_BPS: Bps = 10_000;

/// Structural problems in a rule table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleTableError {
    #[error("referral level schedule is empty")]
    EmptyReferralLevels,

    #[error("rank schedule is empty")]
    EmptyRankSchedule,

    #[error("referral levels must be contiguous from 1: expected level {expected}, found {found}")]
    NonContiguousLevels { expected: u8, found: u8 },

    #[error("level {level} commission {commission_bps} bps exceeds 100%")]
    CommissionTooHigh { level: u8, commission_bps: Bps },

    #[error("rank {rank} requires {required_directs} directs, not more than the previous tier ({previous})")]
    RankDirectsNotIncreasing {
        rank: RankName,
        required_directs: u32,
        previous: u32,
    },

    #[error("rank {0} appears more than once")]
    DuplicateRank(RankName),

    #[error("daily ROI rate {0} bps exceeds 100%")]
    RoiRateTooHigh(Bps),

    #[error("earnings cap multiplier must be non-zero")]
    ZeroCapMultiplier,

    #[error("G4X conversion rate must be non-zero")]
    ZeroConversionRate,
}

/// Lookups and validation on a `RuleTable`
pub trait RuleTableExt {
    /// Check the structural invariants of the table
    fn validate(&self) -> Result<(), RuleTableError>;

    /// Deepest level in the schedule
    fn max_level(&self) -> u8;
}

impl RuleTableExt for RuleTable {
    fn validate(&self) -> Result<(), RuleTableError> {
        if self.referral_levels.is_empty() {
            return Err(RuleTableError::EmptyReferralLevels);
        }
        if self.rank_schedule.is_empty() {
            return Err(RuleTableError::EmptyRankSchedule);
        }

        for (index, row) in self.referral_levels.iter().enumerate() {
            let expected = u8::try_from(index + 1).unwrap_or(u8::MAX);
            if row.level != expected {
                return Err(RuleTableError::NonContiguousLevels {
                    expected,
                    found: row.level,
                });
            }
            if row.commission_bps > MAX_SHARE_BPS {
                return Err(RuleTableError::CommissionTooHigh {
                    level: row.level,
                    commission_bps: row.commission_bps,
                });
            }
        }

        let mut seen = BTreeSet::new();
        let mut previous: Option<u32> = None;
        for tier in &self.rank_schedule {
            if !seen.insert(tier.rank) {
                return Err(RuleTableError::DuplicateRank(tier.rank));
            }
            if let Some(prev) = previous {
                if tier.required_directs <= prev {
                    return Err(RuleTableError::RankDirectsNotIncreasing {
                        rank: tier.rank,
                        required_directs: tier.required_directs,
                        previous: prev,
                    });
                }
            }
            previous = Some(tier.required_directs);
        }

        if self.roi_daily_rate_bps > MAX_SHARE_BPS {
            return Err(RuleTableError::RoiRateTooHigh(self.roi_daily_rate_bps));
        }
        if self.earnings_cap_multiplier_bps == 0 {
            return Err(RuleTableError::ZeroCapMultiplier);
        }
        if self.g4x_conversion_rate_bps == 0 {
            return Err(RuleTableError::ZeroConversionRate);
        }

        Ok(())
    }

    fn max_level(&self) -> u8 {
        self.referral_levels
            .iter()
            .map(|row| row.level)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::canonical_rule_table;

    #[test]
    fn test_canonical_table_is_valid() {
        assert_eq!(canonical_rule_table().validate(), Ok(()));
    }

    #[test]
    fn test_empty_schedules_rejected() {
        let mut rules = canonical_rule_table();
        rules.referral_levels.clear();
        assert_eq!(rules.validate(), Err(RuleTableError::EmptyReferralLevels));

        let mut rules = canonical_rule_table();
        rules.rank_schedule.clear();
        assert_eq!(rules.validate(), Err(RuleTableError::EmptyRankSchedule));
    }

    #[test]
    fn test_level_gap_rejected() {
        let mut rules = canonical_rule_table();
        rules.referral_levels.remove(2);
        assert_eq!(
            rules.validate(),
            Err(RuleTableError::NonContiguousLevels { expected: 3, found: 4 })
        );
    }

    #[test]
    fn test_levels_may_start_only_at_one() {
        let mut rules = canonical_rule_table();
        rules.referral_levels.remove(0);
        assert!(matches!(
            rules.validate(),
            Err(RuleTableError::NonContiguousLevels { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn test_commission_over_100_percent_rejected() {
        let mut rules = canonical_rule_table();
        rules.referral_levels[0].commission_bps = 10_001;
        assert!(matches!(
            rules.validate(),
            Err(RuleTableError::CommissionTooHigh { level: 1, .. })
        ));
    }

    #[test]
    fn test_rank_directs_must_strictly_increase() {
        let mut rules = canonical_rule_table();
        rules.rank_schedule[1].required_directs = rules.rank_schedule[0].required_directs;
        assert!(matches!(
            rules.validate(),
            Err(RuleTableError::RankDirectsNotIncreasing { rank: RankName::Gold, .. })
        ));
    }

    #[test]
    fn test_duplicate_rank_rejected() {
        let mut rules = canonical_rule_table();
        rules.rank_schedule[1].rank = RankName::Star;
        assert_eq!(rules.validate(), Err(RuleTableError::DuplicateRank(RankName::Star)));
    }

    #[test]
    fn test_zero_rates_rejected() {
        let mut rules = canonical_rule_table();
        rules.earnings_cap_multiplier_bps = 0;
        assert_eq!(rules.validate(), Err(RuleTableError::ZeroCapMultiplier));

        let mut rules = canonical_rule_table();
        rules.g4x_conversion_rate_bps = 0;
        assert_eq!(rules.validate(), Err(RuleTableError::ZeroConversionRate));

        let mut rules = canonical_rule_table();
        rules.roi_daily_rate_bps = 20_000;
        assert_eq!(rules.validate(), Err(RuleTableError::RoiRateTooHigh(20_000)));
    }

    #[test]
    fn test_max_level() {
        assert_eq!(canonical_rule_table().max_level(), 20);
        let rules = crate::presets::build_rule_table(
            crate::presets::ReferralPreset::Extended22,
            Default::default(),
            Default::default(),
        );
        assert_eq!(rules.max_level(), 22);
    }
}
