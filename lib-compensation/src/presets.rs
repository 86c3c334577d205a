//! Named rule presets
//!
//! The dashboard shipped several incompatible schedules across revisions
//! (14% vs 15% direct commission, 20 vs 22 levels, 0.6% vs 0.7% ROI, two rank
//! ladders). None of them is authoritative, so each is exposed as a named,
//! selectable preset and the deploy-time config picks one.
//!
//! # Canonical defaults
//!
//! | Table | Canonical | Alternative |
//! |-------|-----------|-------------|
//! | Referral levels | `classic-20` | `extended-22` (partially attested) |
//! | Rank ladder | `four-tier` | `five-tier` |
//! | ROI rate | `standard` 0.7% | `legacy` 0.6% (deprecated) |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use lib_types::{Bps, RankName, RankTier, ReferralLevel, RuleTable, TokenAmount, WalletAddress};

/// Genesis / admin referrer: 0x7b84e7e09d210b76ed9d2d51b8473ff83e424a29
pub const GENESIS_ADDRESS: WalletAddress = WalletAddress::new([
    0x7b, 0x84, 0xe7, 0xe0, 0x9d, 0x21, 0x0b, 0x76, 0xed, 0x9d, 0x2d, 0x51, 0xb8, 0x47, 0x3f, 0xf8,
    0x3e, 0x42, 0x4a, 0x29,
]);

/// ROI: 0.7% per day (current)
pub const STANDARD_ROI_DAILY_RATE_BPS: Bps = 70;

/// ROI: 0.6% per day (earlier revision, deprecated)
pub const LEGACY_ROI_DAILY_RATE_BPS: Bps = 60;

/// Lifetime payout cap: 4x total invested
pub const EARNINGS_CAP_MULTIPLIER_BPS: Bps = 40_000;

/// One-off bot activation fee on the first investment
pub const ACTIVATION_FEE_TOKENS: u64 = 50;

/// 1 G4X = 1.10 USD
pub const G4X_CONVERSION_RATE_BPS: Bps = 11_000;

pub const MINIMUM_INVESTMENT_TOKENS: u64 = 100;

/// Flat bonus per direct referral
pub const DIRECT_REFERRAL_BONUS_TOKENS: u64 = 40;

fn level(level: u8, commission_bps: Bps, required_directs: u32) -> ReferralLevel {
    ReferralLevel {
        level,
        commission_bps,
        required_directs,
    }
}

fn tier(rank: RankName, business_volume: Option<u64>, directs: u32, salary: u64) -> RankTier {
    RankTier {
        rank,
        required_business_volume: business_volume.map(TokenAmount::from_tokens),
        required_directs: directs,
        monthly_salary: TokenAmount::from_tokens(salary),
    }
}

/// Referral level schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferralPreset {
    /// 14/8/4/2% then 1% through level 20
    #[default]
    Classic20,
    /// 15/10% headline rates over 22 levels
    Extended22,
}

impl ReferralPreset {
    pub const ALL: &'static [ReferralPreset] = &[ReferralPreset::Classic20, ReferralPreset::Extended22];

    pub fn name(&self) -> &'static str {
        match self {
            ReferralPreset::Classic20 => "classic-20",
            ReferralPreset::Extended22 => "extended-22",
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, ReferralPreset::Classic20)
    }

    /// Whether every row is backed by a published schedule
    ///
    /// `extended-22` publishes its commission rates but no direct-referral
    /// requirements; its `required_directs` column mirrors the classic ladder.
    pub fn is_attested(&self) -> bool {
        matches!(self, ReferralPreset::Classic20)
    }

    pub fn levels(&self) -> Vec<ReferralLevel> {
        match self {
            ReferralPreset::Classic20 => {
                let mut levels = vec![
                    level(1, 1_400, 1),
                    level(2, 800, 2),
                    level(3, 400, 4),
                    level(4, 200, 7),
                ];
                levels.extend((5..=20).map(|l| level(l, 100, 12)));
                levels
            }
            ReferralPreset::Extended22 => {
                let commission = |l: u8| match l {
                    1 => 1_500,
                    2 => 1_000,
                    3 => 500,
                    4..=10 => 400,
                    _ => 350,
                };
                let directs = |l: u8| match l {
                    1 => 1,
                    2 => 2,
                    3 => 4,
                    4 => 7,
                    5 => 10,
                    _ => 12,
                };
                (1..=22).map(|l| level(l, commission(l), directs(l))).collect()
            }
        }
    }
}

impl fmt::Display for ReferralPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReferralPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown referral preset '{}': expected classic-20 or extended-22", s))
    }
}

/// Rank ladders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankPreset {
    /// STAR, GOLD, DIAMOND, RUBY
    #[default]
    FourTier,
    /// STAR, GOLD, PLATINUM, EMERALD, DIAMOND
    FiveTier,
}

impl RankPreset {
    pub const ALL: &'static [RankPreset] = &[RankPreset::FourTier, RankPreset::FiveTier];

    pub fn name(&self) -> &'static str {
        match self {
            RankPreset::FourTier => "four-tier",
            RankPreset::FiveTier => "five-tier",
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, RankPreset::FourTier)
    }

    pub fn tiers(&self) -> Vec<RankTier> {
        match self {
            RankPreset::FourTier => vec![
                tier(RankName::Star, Some(75_000), 12, 500),
                tier(RankName::Gold, None, 15, 1_000),
                tier(RankName::Diamond, None, 18, 2_000),
                tier(RankName::Ruby, None, 20, 4_000),
            ],
            RankPreset::FiveTier => vec![
                tier(RankName::Star, Some(75_000), 12, 500),
                tier(RankName::Gold, None, 15, 1_000),
                tier(RankName::Platinum, Some(300_000), 50, 2_500),
                tier(RankName::Emerald, Some(750_000), 100, 5_000),
                tier(RankName::Diamond, Some(2_000_000), 250, 10_000),
            ],
        }
    }
}

impl fmt::Display for RankPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RankPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown rank preset '{}': expected four-tier or five-tier", s))
    }
}

/// Daily ROI rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoiPreset {
    #[default]
    Standard,
    Legacy,
}

impl RoiPreset {
    pub const ALL: &'static [RoiPreset] = &[RoiPreset::Standard, RoiPreset::Legacy];

    pub fn name(&self) -> &'static str {
        match self {
            RoiPreset::Standard => "standard",
            RoiPreset::Legacy => "legacy",
        }
    }

    pub const fn rate_bps(&self) -> Bps {
        match self {
            RoiPreset::Standard => STANDARD_ROI_DAILY_RATE_BPS,
            RoiPreset::Legacy => LEGACY_ROI_DAILY_RATE_BPS,
        }
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, RoiPreset::Legacy)
    }
}

impl fmt::Display for RoiPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoiPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown ROI preset '{}': expected standard or legacy", s))
    }
}

/// Assemble a rule table from presets and the shared constants
pub fn build_rule_table(referral: ReferralPreset, rank: RankPreset, roi: RoiPreset) -> RuleTable {
    RuleTable {
        referral_levels: referral.levels(),
        rank_schedule: rank.tiers(),
        roi_daily_rate_bps: roi.rate_bps(),
        earnings_cap_multiplier_bps: EARNINGS_CAP_MULTIPLIER_BPS,
        activation_fee: TokenAmount::from_tokens(ACTIVATION_FEE_TOKENS),
        g4x_conversion_rate_bps: G4X_CONVERSION_RATE_BPS,
        minimum_investment: TokenAmount::from_tokens(MINIMUM_INVESTMENT_TOKENS),
        direct_referral_bonus: TokenAmount::from_tokens(DIRECT_REFERRAL_BONUS_TOKENS),
        genesis_address: GENESIS_ADDRESS,
    }
}

/// classic-20 levels, four-tier ranks, 0.7% ROI
pub fn canonical_rule_table() -> RuleTable {
    build_rule_table(
        ReferralPreset::default(),
        RankPreset::default(),
        RoiPreset::default(),
    )
}
