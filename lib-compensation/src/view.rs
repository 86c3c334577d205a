//! Derived view assembly
//!
//! Bundles every engine output for one snapshot. Recomputed per call and
//! never persisted.

use serde::{Deserialize, Serialize};

use lib_types::{AccountSnapshot, RuleTable, SnapshotField, TokenAmount, WalletAddress};

use crate::cap::{earnings_cap_status, CapStatus};
use crate::income::{autopool_status, income_summary, AutopoolStatus, IncomeSummary};
use crate::levels::{unlocked_level_count, unlocked_levels, LevelStatus};
use crate::rank::{rank_status, reconcile_rank, RankReconciliation, RankStatus};
use crate::roi::daily_roi;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    pub wallet_address: WalletAddress,
    pub levels: Vec<LevelStatus>,
    pub unlocked_level_count: usize,
    pub daily_roi: TokenAmount,
    pub rank: RankStatus,
    pub reported_rank: RankReconciliation,
    pub cap: CapStatus,
    pub income: IncomeSummary,
    pub autopool: AutopoolStatus,
    /// Snapshot fields that hold zero defaults because their lookup failed
    pub unknown_fields: Vec<SnapshotField>,
}

impl DerivedView {
    pub fn is_complete(&self) -> bool {
        self.unknown_fields.is_empty()
    }
}

pub fn derive_view(snapshot: &AccountSnapshot, rules: &RuleTable) -> DerivedView {
    let levels = unlocked_levels(snapshot, rules);
    let rank = rank_status(snapshot, rules);

    DerivedView {
        wallet_address: snapshot.wallet_address,
        levels,
        unlocked_level_count: unlocked_level_count(snapshot, rules),
        daily_roi: daily_roi(snapshot, rules),
        reported_rank: reconcile_rank(snapshot.current_rank.as_deref(), rank.current_rank()),
        rank,
        cap: earnings_cap_status(snapshot, rules),
        income: income_summary(snapshot, rules),
        autopool: autopool_status(snapshot),
        unknown_fields: snapshot.unknown.iter().copied().collect(),
    }
}
