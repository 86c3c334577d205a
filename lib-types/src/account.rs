//! Per-wallet account snapshot as read from the on-chain collaborator.
//!
//! A snapshot is never mutated by the engine. Fields that could not be read
//! hold their zero value and are listed in `unknown`, so a consumer can tell
//! a real zero from a failed lookup.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::primitives::{TokenAmount, WalletAddress};

/// Explicit tri-state for values fetched from an external collaborator
///
/// `Known(zero)` is a real zero; `Unknown` means the lookup failed and the
/// caller should retry or show a loading/error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Observed<T> {
    Known(T),
    Unknown,
}

impl<T> Observed<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Observed::Known(_))
    }

    pub fn known(&self) -> Option<&T> {
        match self {
            Observed::Known(value) => Some(value),
            Observed::Unknown => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Observed<U> {
        match self {
            Observed::Known(value) => Observed::Known(f(value)),
            Observed::Unknown => Observed::Unknown,
        }
    }
}

impl<T> From<Option<T>> for Observed<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Observed::Known(v),
            None => Observed::Unknown,
        }
    }
}

/// Income attributed to one referral level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelIncome {
    #[serde(default)]
    pub total_earned: TokenAmount,
    #[serde(default)]
    pub last_payout_amount: TokenAmount,
    #[serde(default)]
    pub payout_count: u32,
}

/// Income sources tracked separately on-chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeSource {
    Direct,
    Sponsor,
    Autopool,
    Rank,
    Roi,
}

impl IncomeSource {
    pub const ALL: &'static [IncomeSource] = &[
        IncomeSource::Direct,
        IncomeSource::Sponsor,
        IncomeSource::Autopool,
        IncomeSource::Rank,
        IncomeSource::Roi,
    ];
}

/// Lifetime income per source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBreakdown {
    #[serde(default)]
    pub direct: TokenAmount,
    #[serde(default)]
    pub sponsor: TokenAmount,
    #[serde(default)]
    pub autopool: TokenAmount,
    #[serde(default)]
    pub rank: TokenAmount,
    #[serde(default)]
    pub roi: TokenAmount,
}

impl IncomeBreakdown {
    pub fn get(&self, source: IncomeSource) -> TokenAmount {
        match source {
            IncomeSource::Direct => self.direct,
            IncomeSource::Sponsor => self.sponsor,
            IncomeSource::Autopool => self.autopool,
            IncomeSource::Rank => self.rank,
            IncomeSource::Roi => self.roi,
        }
    }

    pub fn set(&mut self, source: IncomeSource, amount: TokenAmount) {
        match source {
            IncomeSource::Direct => self.direct = amount,
            IncomeSource::Sponsor => self.sponsor = amount,
            IncomeSource::Autopool => self.autopool = amount,
            IncomeSource::Rank => self.rank = amount,
            IncomeSource::Roi => self.roi = amount,
        }
    }

    pub fn total(&self) -> TokenAmount {
        IncomeSource::ALL
            .iter()
            .fold(TokenAmount::ZERO, |acc, source| acc.saturating_add(self.get(*source)))
    }
}

/// Autopool bot pool parameters for one pool position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotPool {
    pub pool_size: u32,
    pub payout_amount: TokenAmount,
    pub rebirth_fee: TokenAmount,
}

/// Individually fetchable snapshot fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapshotField {
    TotalInvested,
    TotalEarned,
    TotalWithdrawn,
    RoiEligiblePrincipal,
    BusinessVolume,
    DirectReferralCount,
    CurrentRank,
    Referrer,
    AutopoolPosition,
    LevelIncome(u8),
    Income(IncomeSource),
    ActiveBots,
    BotPool,
}

impl SnapshotField {
    /// Fields delivered together by the account-totals lookup
    pub const TOTALS: &'static [SnapshotField] = &[
        SnapshotField::TotalInvested,
        SnapshotField::TotalEarned,
        SnapshotField::TotalWithdrawn,
        SnapshotField::RoiEligiblePrincipal,
        SnapshotField::BusinessVolume,
        SnapshotField::DirectReferralCount,
        SnapshotField::CurrentRank,
        SnapshotField::Referrer,
        SnapshotField::AutopoolPosition,
    ];
}

/// Per-wallet account state
///
/// Every optional field defaults to zero/empty so that partially populated
/// JSON (or a partially failed fetch) still yields a usable snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub wallet_address: WalletAddress,
    #[serde(default)]
    pub total_invested: TokenAmount,
    #[serde(default)]
    pub total_earned: TokenAmount,
    #[serde(default)]
    pub total_withdrawn: TokenAmount,
    #[serde(default)]
    pub roi_eligible_principal: TokenAmount,
    #[serde(default)]
    pub business_volume: TokenAmount,
    #[serde(default)]
    pub direct_referral_count: u32,
    /// Rank label as reported upstream; a hint, never the authority
    #[serde(default)]
    pub current_rank: Option<String>,
    #[serde(default)]
    pub referrer: Option<WalletAddress>,
    #[serde(default)]
    pub per_level_income: BTreeMap<u8, LevelIncome>,
    #[serde(default)]
    pub income: IncomeBreakdown,
    /// Current autopool position id, 0 when not placed
    #[serde(default)]
    pub autopool_position: u32,
    #[serde(default)]
    pub active_bot_positions: Vec<u32>,
    #[serde(default)]
    pub bot_pool: Option<BotPool>,
    /// Fields whose lookup failed; their values above are zero defaults
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub unknown: BTreeSet<SnapshotField>,
}

impl AccountSnapshot {
    /// Empty snapshot with every field known and zero
    pub fn new(wallet_address: WalletAddress) -> Self {
        Self {
            wallet_address,
            total_invested: TokenAmount::ZERO,
            total_earned: TokenAmount::ZERO,
            total_withdrawn: TokenAmount::ZERO,
            roi_eligible_principal: TokenAmount::ZERO,
            business_volume: TokenAmount::ZERO,
            direct_referral_count: 0,
            current_rank: None,
            referrer: None,
            per_level_income: BTreeMap::new(),
            income: IncomeBreakdown::default(),
            autopool_position: 0,
            active_bot_positions: Vec::new(),
            bot_pool: None,
            unknown: BTreeSet::new(),
        }
    }

    pub fn is_known(&self, field: SnapshotField) -> bool {
        !self.unknown.contains(&field)
    }

    pub fn mark_unknown(&mut self, field: SnapshotField) {
        self.unknown.insert(field);
    }

    /// True when every lookup succeeded
    pub fn is_complete(&self) -> bool {
        self.unknown.is_empty()
    }

    /// Income for `level`, zero-valued when absent
    pub fn level_income(&self, level: u8) -> LevelIncome {
        self.per_level_income.get(&level).copied().unwrap_or_default()
    }
}
