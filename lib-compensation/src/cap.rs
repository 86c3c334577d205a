//! Lifetime earnings cap
//!
//! `cap = total_invested × multiplier`. The engine only reports the status;
//! crediting and enforcement belong to the contract.

use serde::{Deserialize, Serialize};

use lib_types::{AccountSnapshot, Bps, RuleTable, TokenAmount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapStatus {
    pub cap: TokenAmount,
    /// `max(0, cap − total_earned)`
    pub remaining: TokenAmount,
    /// Clamped to `[0, 10000]`; 0 when the cap is 0
    pub percent_used_bps: Bps,
    /// Whether upstream may credit any further ROI or commission
    pub accrual_permitted: bool,
}

pub fn earnings_cap_status(snapshot: &AccountSnapshot, rules: &RuleTable) -> CapStatus {
    let cap = snapshot
        .total_invested
        .mul_bps(rules.earnings_cap_multiplier_bps);
    let remaining = cap.saturating_sub(snapshot.total_earned);

    CapStatus {
        cap,
        remaining,
        percent_used_bps: snapshot.total_earned.ratio_bps(cap),
        accrual_permitted: !remaining.is_zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::canonical_rule_table;

    fn snapshot(invested: u64, earned: u64) -> AccountSnapshot {
        let mut snapshot =
            AccountSnapshot::new("0x5555555555555555555555555555555555555555".parse().unwrap());
        snapshot.total_invested = TokenAmount::from_tokens(invested);
        snapshot.total_earned = TokenAmount::from_tokens(earned);
        snapshot
    }

    #[test]
    fn test_partial_use() {
        let status = earnings_cap_status(&snapshot(1000, 1000), &canonical_rule_table());
        assert_eq!(status.cap, TokenAmount::from_tokens(4000));
        assert_eq!(status.remaining, TokenAmount::from_tokens(3000));
        assert_eq!(status.percent_used_bps, 2_500);
        assert!(status.accrual_permitted);
    }

    #[test]
    fn test_over_cap_clamped() {
        let status = earnings_cap_status(&snapshot(1000, 5000), &canonical_rule_table());
        assert_eq!(status.remaining, TokenAmount::ZERO);
        assert_eq!(status.percent_used_bps, 10_000);
        assert!(!status.accrual_permitted);
    }

    #[test]
    fn test_exactly_at_cap() {
        let status = earnings_cap_status(&snapshot(1000, 4000), &canonical_rule_table());
        assert_eq!(status.remaining, TokenAmount::ZERO);
        assert_eq!(status.percent_used_bps, 10_000);
        assert!(!status.accrual_permitted);
    }

    #[test]
    fn test_nothing_invested() {
        let status = earnings_cap_status(&snapshot(0, 25), &canonical_rule_table());
        assert_eq!(status.cap, TokenAmount::ZERO);
        assert_eq!(status.remaining, TokenAmount::ZERO);
        assert_eq!(status.percent_used_bps, 0);
    }
}
