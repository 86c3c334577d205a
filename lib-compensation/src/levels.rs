//! Referral level unlocks
//!
//! A level pays out once the account has at least `required_directs` direct
//! referrals. Exactly-equal counts unlock.

use serde::{Deserialize, Serialize};

use lib_types::{AccountSnapshot, Bps, LevelIncome, RuleTable};

/// Unlock state and income of one referral level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelStatus {
    pub level: u8,
    pub commission_bps: Bps,
    pub required_directs: u32,
    pub is_unlocked: bool,
    /// Zero-valued when the snapshot has no record for this level
    pub income: LevelIncome,
}

/// Status of every level in the schedule, in level order
pub fn unlocked_levels(snapshot: &AccountSnapshot, rules: &RuleTable) -> Vec<LevelStatus> {
    rules
        .referral_levels
        .iter()
        .map(|row| LevelStatus {
            level: row.level,
            commission_bps: row.commission_bps,
            required_directs: row.required_directs,
            is_unlocked: snapshot.direct_referral_count >= row.required_directs,
            income: snapshot.level_income(row.level),
        })
        .collect()
}

/// Number of levels currently paying out
pub fn unlocked_level_count(snapshot: &AccountSnapshot, rules: &RuleTable) -> usize {
    rules
        .referral_levels
        .iter()
        .filter(|row| snapshot.direct_referral_count >= row.required_directs)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::canonical_rule_table;
    use lib_types::TokenAmount;

    fn snapshot_with_directs(directs: u32) -> AccountSnapshot {
        let mut snapshot =
            AccountSnapshot::new("0x2222222222222222222222222222222222222222".parse().unwrap());
        snapshot.direct_referral_count = directs;
        snapshot
    }

    #[test]
    fn test_no_directs_unlocks_nothing() {
        let rules = canonical_rule_table();
        let levels = unlocked_levels(&snapshot_with_directs(0), &rules);
        assert_eq!(levels.len(), 20);
        assert!(levels.iter().all(|l| !l.is_unlocked));
    }

    #[test]
    fn test_boundary_count_unlocks() {
        let rules = canonical_rule_table();
        for row in &rules.referral_levels {
            let below = unlocked_levels(&snapshot_with_directs(row.required_directs - 1), &rules);
            let at = unlocked_levels(&snapshot_with_directs(row.required_directs), &rules);
            let idx = usize::from(row.level - 1);
            assert!(!below[idx].is_unlocked, "level {} unlocked early", row.level);
            assert!(at[idx].is_unlocked, "level {} locked at threshold", row.level);
        }
    }

    #[test]
    fn test_unlocked_count_progression() {
        let rules = canonical_rule_table();
        assert_eq!(unlocked_level_count(&snapshot_with_directs(1), &rules), 1);
        assert_eq!(unlocked_level_count(&snapshot_with_directs(3), &rules), 2);
        assert_eq!(unlocked_level_count(&snapshot_with_directs(7), &rules), 4);
        assert_eq!(unlocked_level_count(&snapshot_with_directs(11), &rules), 4);
        assert_eq!(unlocked_level_count(&snapshot_with_directs(12), &rules), 20);
    }

    #[test]
    fn test_level_income_passed_through() {
        let rules = canonical_rule_table();
        let mut snapshot = snapshot_with_directs(2);
        let income = LevelIncome {
            total_earned: TokenAmount::from_tokens(28),
            last_payout_amount: TokenAmount::from_tokens(14),
            payout_count: 2,
        };
        snapshot.per_level_income.insert(1, income);

        let levels = unlocked_levels(&snapshot, &rules);
        assert_eq!(levels[0].income, income);
        assert_eq!(levels[1].income, LevelIncome::default());
    }
}
