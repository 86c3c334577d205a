//! Income and autopool summaries

use serde::{Deserialize, Serialize};

use lib_types::{AccountSnapshot, IncomeBreakdown, RuleTable, TokenAmount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSummary {
    pub breakdown: IncomeBreakdown,
    /// Sum of the per-source totals
    pub breakdown_total: TokenAmount,
    pub total_earned: TokenAmount,
    pub total_withdrawn: TokenAmount,
    /// `max(0, total_earned − total_withdrawn)`
    pub withdrawable: TokenAmount,
    /// `directs × direct_referral_bonus`
    pub direct_bonus_expected: TokenAmount,
}

pub fn income_summary(snapshot: &AccountSnapshot, rules: &RuleTable) -> IncomeSummary {
    IncomeSummary {
        breakdown: snapshot.income,
        breakdown_total: snapshot.income.total(),
        total_earned: snapshot.total_earned,
        total_withdrawn: snapshot.total_withdrawn,
        withdrawable: snapshot.total_earned.saturating_sub(snapshot.total_withdrawn),
        direct_bonus_expected: rules
            .direct_referral_bonus
            .saturating_mul(u128::from(snapshot.direct_referral_count)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutopoolStatus {
    /// 0 when the account has no pool position
    pub position: u32,
    pub active_bots: usize,
    pub pool_size: Option<u32>,
    /// `payout − rebirth_fee` per completed cycle, floored at 0
    pub net_payout_per_cycle: TokenAmount,
}

pub fn autopool_status(snapshot: &AccountSnapshot) -> AutopoolStatus {
    AutopoolStatus {
        position: snapshot.autopool_position,
        active_bots: snapshot.active_bot_positions.len(),
        pool_size: snapshot.bot_pool.map(|pool| pool.pool_size),
        net_payout_per_cycle: snapshot.bot_pool.map_or(TokenAmount::ZERO, |pool| {
            pool.payout_amount.saturating_sub(pool.rebirth_fee)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::canonical_rule_table;
    use lib_types::{BotPool, IncomeSource};

    fn snapshot() -> AccountSnapshot {
        AccountSnapshot::new("0x7777777777777777777777777777777777777777".parse().unwrap())
    }

    #[test]
    fn test_withdrawable_floors_at_zero() {
        let rules = canonical_rule_table();
        let mut account = snapshot();
        account.total_earned = TokenAmount::from_tokens(300);
        account.total_withdrawn = TokenAmount::from_tokens(120);
        assert_eq!(income_summary(&account, &rules).withdrawable, TokenAmount::from_tokens(180));

        account.total_withdrawn = TokenAmount::from_tokens(400);
        assert_eq!(income_summary(&account, &rules).withdrawable, TokenAmount::ZERO);
    }

    #[test]
    fn test_direct_bonus_expected() {
        let rules = canonical_rule_table();
        let mut account = snapshot();
        account.direct_referral_count = 3;
        account.income.set(IncomeSource::Direct, TokenAmount::from_tokens(120));
        account.income.set(IncomeSource::Roi, TokenAmount::from_tokens(7));
        let summary = income_summary(&account, &rules);
        assert_eq!(summary.direct_bonus_expected, TokenAmount::from_tokens(120));
        assert_eq!(summary.breakdown_total, TokenAmount::from_tokens(127));
    }

    #[test]
    fn test_autopool_without_position() {
        let status = autopool_status(&snapshot());
        assert_eq!(status.position, 0);
        assert_eq!(status.active_bots, 0);
        assert_eq!(status.pool_size, None);
        assert_eq!(status.net_payout_per_cycle, TokenAmount::ZERO);
    }

    #[test]
    fn test_autopool_net_payout() {
        let mut account = snapshot();
        account.autopool_position = 4;
        account.active_bot_positions = vec![4, 9];
        account.bot_pool = Some(BotPool {
            pool_size: 3,
            payout_amount: TokenAmount::from_tokens(60),
            rebirth_fee: TokenAmount::from_tokens(20),
        });
        let status = autopool_status(&account);
        assert_eq!(status.active_bots, 2);
        assert_eq!(status.pool_size, Some(3));
        assert_eq!(status.net_payout_per_cycle, TokenAmount::from_tokens(40));

        account.bot_pool = Some(BotPool {
            pool_size: 3,
            payout_amount: TokenAmount::from_tokens(10),
            rebirth_fee: TokenAmount::from_tokens(20),
        });
        assert_eq!(autopool_status(&account).net_payout_per_cycle, TokenAmount::ZERO);
    }
}
