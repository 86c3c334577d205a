//! Compensation rule primitives.
//!
//! Pure data types for the referral / rank / ROI rule table. Behavior
//! (derivations, presets, validation) lives in lib-compensation.
//!
//! Rule: These types must remain behavior-free and serialization-stable.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::primitives::{Bps, TokenAmount, WalletAddress};

/// Rank tiers across every published rank schedule
///
/// Discriminants are stable; ordering here is NOT tier order. Tier order is
/// the position inside a `RuleTable::rank_schedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum RankName {
    Star = 1,
    Gold = 2,
    Platinum = 3,
    Emerald = 4,
    Diamond = 5,
    Ruby = 6,
}

impl RankName {
    /// All rank names in stable discriminant order
    pub const ALL: &'static [RankName] = &[
        RankName::Star,
        RankName::Gold,
        RankName::Platinum,
        RankName::Emerald,
        RankName::Diamond,
        RankName::Ruby,
    ];

    /// Label as stored on-chain (bytes32 string) and shown in the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            RankName::Star => "STAR",
            RankName::Gold => "GOLD",
            RankName::Platinum => "PLATINUM",
            RankName::Emerald => "EMERALD",
            RankName::Diamond => "DIAMOND",
            RankName::Ruby => "RUBY",
        }
    }

    /// Parse a reported label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<RankName> {
        let wanted = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|rank| rank.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for RankName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the referral level schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralLevel {
    /// Level number, 1-based and contiguous
    pub level: u8,
    /// Commission paid at this level
    #[serde(alias = "commission_bps")]
    pub commission_bps: Bps,
    /// Direct referrals needed before this level pays out
    #[serde(alias = "required_directs")]
    pub required_directs: u32,
}

/// One tier of the rank schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankTier {
    pub rank: RankName,
    /// `None` when the tier has no business-volume requirement
    #[serde(default, alias = "required_business_volume")]
    pub required_business_volume: Option<TokenAmount>,
    #[serde(alias = "required_directs")]
    pub required_directs: u32,
    #[serde(alias = "monthly_salary")]
    pub monthly_salary: TokenAmount,
}

/// Process-wide compensation rules
///
/// Loaded once at startup and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTable {
    pub referral_levels: Vec<ReferralLevel>,
    /// Ascending tier order
    pub rank_schedule: Vec<RankTier>,
    pub roi_daily_rate_bps: Bps,
    /// Lifetime payout cap as a multiple of total invested (40000 = 4x)
    pub earnings_cap_multiplier_bps: Bps,
    /// Flat fee deducted from the first investment
    pub activation_fee: TokenAmount,
    /// USD value of one G4X token (11000 = 1.10)
    pub g4x_conversion_rate_bps: Bps,
    pub minimum_investment: TokenAmount,
    /// Flat bonus credited per direct referral
    pub direct_referral_bonus: TokenAmount,
    /// Referrer that needs no investment of its own
    pub genesis_address: WalletAddress,
}
