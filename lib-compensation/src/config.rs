//! Rule table configuration
//!
//! The rule table is resolved once at startup from a TOML file. Each schedule
//! is either a named preset or an explicit table; naming both for the same
//! schedule is an error. Omitted keys fall back to the canonical presets.
//!
//! ```toml
//! referral_preset = "classic-20"
//! rank_preset = "four-tier"
//! roi_preset = "standard"
//! activation_fee = "50"
//!
//! # or, instead of rank_preset:
//! # [[rank_schedule]]
//! # rank = "STAR"
//! # required_business_volume = "75000"
//! # required_directs = 12
//! # monthly_salary = "500"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use lib_types::{Bps, RankTier, ReferralLevel, RuleTable, TokenAmount, WalletAddress};

use crate::presets::{build_rule_table, RankPreset, ReferralPreset, RoiPreset};
use crate::rules::{RuleTableError, RuleTableExt};

/// Rule table configuration errors; all of them are fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rule config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration parsing error: {0}")]
    Parsing(#[from] toml::de::Error),

    #[error("conflicting rule config: both {preset} and {table} are set")]
    Conflicting {
        preset: &'static str,
        table: &'static str,
    },

    #[error("invalid rule table: {0}")]
    Invalid(#[from] RuleTableError),
}

/// On-disk rule table description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTableConfig {
    #[serde(default)]
    pub referral_preset: Option<ReferralPreset>,
    #[serde(default)]
    pub referral_levels: Option<Vec<ReferralLevel>>,

    #[serde(default)]
    pub rank_preset: Option<RankPreset>,
    #[serde(default)]
    pub rank_schedule: Option<Vec<RankTier>>,

    #[serde(default)]
    pub roi_preset: Option<RoiPreset>,
    #[serde(default)]
    pub roi_daily_rate_bps: Option<Bps>,

    #[serde(default)]
    pub earnings_cap_multiplier_bps: Option<Bps>,
    #[serde(default)]
    pub activation_fee: Option<TokenAmount>,
    #[serde(default)]
    pub g4x_conversion_rate_bps: Option<Bps>,
    #[serde(default)]
    pub minimum_investment: Option<TokenAmount>,
    #[serde(default)]
    pub direct_referral_bonus: Option<TokenAmount>,
    #[serde(default)]
    pub genesis_address: Option<WalletAddress>,
}

impl RuleTableConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Config selecting three named presets and nothing else
    pub fn from_presets(referral: ReferralPreset, rank: RankPreset, roi: RoiPreset) -> Self {
        Self {
            referral_preset: Some(referral),
            rank_preset: Some(rank),
            roi_preset: Some(roi),
            ..Self::default()
        }
    }

    fn check_conflicts(&self) -> Result<(), ConfigError> {
        if self.referral_preset.is_some() && self.referral_levels.is_some() {
            return Err(ConfigError::Conflicting {
                preset: "referral_preset",
                table: "referral_levels",
            });
        }
        if self.rank_preset.is_some() && self.rank_schedule.is_some() {
            return Err(ConfigError::Conflicting {
                preset: "rank_preset",
                table: "rank_schedule",
            });
        }
        if self.roi_preset.is_some() && self.roi_daily_rate_bps.is_some() {
            return Err(ConfigError::Conflicting {
                preset: "roi_preset",
                table: "roi_daily_rate_bps",
            });
        }
        Ok(())
    }

    /// Discrepancies an integrator should know about
    ///
    /// Empty when every schedule resolves to its canonical preset.
    pub fn notices(&self) -> Vec<String> {
        let mut notices = Vec::new();

        match (self.referral_preset, &self.referral_levels) {
            (_, Some(levels)) => notices.push(format!(
                "custom referral schedule with {} levels replaces the canonical classic-20 preset",
                levels.len()
            )),
            (Some(preset), None) if !preset.is_attested() => notices.push(format!(
                "referral preset {} is only partially attested; its required_directs column is a placeholder",
                preset
            )),
            (Some(preset), None) if !preset.is_canonical() => notices.push(format!(
                "referral preset {} is not the canonical classic-20 schedule",
                preset
            )),
            _ => {}
        }

        match (self.rank_preset, &self.rank_schedule) {
            (_, Some(tiers)) => notices.push(format!(
                "custom rank schedule with {} tiers replaces the canonical four-tier preset",
                tiers.len()
            )),
            (Some(preset), None) if !preset.is_canonical() => notices.push(format!(
                "rank preset {} is not the canonical four-tier schedule",
                preset
            )),
            _ => {}
        }

        match (self.roi_preset, self.roi_daily_rate_bps) {
            (_, Some(bps)) => notices.push(format!(
                "custom daily ROI rate {} bps replaces the canonical standard preset",
                bps
            )),
            (Some(preset), None) if preset.is_deprecated() => notices.push(format!(
                "ROI preset {} ({} bps) is deprecated",
                preset,
                preset.rate_bps()
            )),
            _ => {}
        }

        notices
    }

    /// Build and validate the rule table
    pub fn resolve(&self) -> Result<RuleTable, ConfigError> {
        self.check_conflicts()?;

        let referral = self.referral_preset.unwrap_or_default();
        let rank = self.rank_preset.unwrap_or_default();
        let roi = self.roi_preset.unwrap_or_default();
        let mut rules = build_rule_table(referral, rank, roi);

        if let Some(levels) = &self.referral_levels {
            rules.referral_levels = levels.clone();
        }
        if let Some(tiers) = &self.rank_schedule {
            rules.rank_schedule = tiers.clone();
        }
        if let Some(bps) = self.roi_daily_rate_bps {
            rules.roi_daily_rate_bps = bps;
        }
        if let Some(bps) = self.earnings_cap_multiplier_bps {
            rules.earnings_cap_multiplier_bps = bps;
        }
        if let Some(fee) = self.activation_fee {
            rules.activation_fee = fee;
        }
        if let Some(bps) = self.g4x_conversion_rate_bps {
            rules.g4x_conversion_rate_bps = bps;
        }
        if let Some(minimum) = self.minimum_investment {
            rules.minimum_investment = minimum;
        }
        if let Some(bonus) = self.direct_referral_bonus {
            rules.direct_referral_bonus = bonus;
        }
        if let Some(genesis) = self.genesis_address {
            rules.genesis_address = genesis;
        }

        rules.validate()?;

        for notice in self.notices() {
            warn!(notice = %notice, "non-canonical compensation rules selected");
        }
        info!(
            levels = rules.referral_levels.len(),
            ranks = rules.rank_schedule.len(),
            roi_bps = rules.roi_daily_rate_bps,
            cap_bps = rules.earnings_cap_multiplier_bps,
            "compensation rule table loaded"
        );

        Ok(rules)
    }
}

/// Read, parse and validate a rule table file
pub fn load_rule_table(path: impl AsRef<Path>) -> Result<RuleTable, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    RuleTableConfig::from_toml_str(&raw)?.resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::canonical_rule_table;
    use lib_types::RankName;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_canonical() {
        let config = RuleTableConfig::from_toml_str("").unwrap();
        assert_eq!(config.resolve().unwrap(), canonical_rule_table());
        assert!(config.notices().is_empty());
    }

    #[test]
    fn test_presets_by_name() {
        let config = RuleTableConfig::from_toml_str(
            r#"
            referral_preset = "extended-22"
            rank_preset = "five-tier"
            roi_preset = "legacy"
            "#,
        )
        .unwrap();
        let rules = config.resolve().unwrap();
        assert_eq!(rules.referral_levels.len(), 22);
        assert_eq!(rules.rank_schedule.len(), 5);
        assert_eq!(rules.roi_daily_rate_bps, 60);
        let notices = config.notices();
        assert_eq!(notices.len(), 3);
        assert!(notices[0].contains("required_directs"));
    }

    #[test]
    fn test_explicit_rank_schedule() {
        let config = RuleTableConfig::from_toml_str(
            r#"
            [[rank_schedule]]
            rank = "STAR"
            required_business_volume = "75000"
            required_directs = 12
            monthly_salary = "500"

            [[rank_schedule]]
            rank = "GOLD"
            required_directs = 15
            monthly_salary = 1000
            "#,
        )
        .unwrap();
        let rules = config.resolve().unwrap();
        assert_eq!(rules.rank_schedule.len(), 2);
        assert_eq!(rules.rank_schedule[1].rank, RankName::Gold);
        assert_eq!(rules.rank_schedule[1].required_business_volume, None);
        assert_eq!(rules.rank_schedule[1].monthly_salary, TokenAmount::from_tokens(1000));
        assert_eq!(config.notices().len(), 1);
    }

    #[test]
    fn test_preset_and_table_conflict() {
        let config = RuleTableConfig::from_toml_str(
            r#"
            roi_preset = "standard"
            roi_daily_rate_bps = 65
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::Conflicting { preset: "roi_preset", .. })
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = RuleTableConfig::from_toml_str("roi_rate = 70");
        assert!(matches!(result, Err(ConfigError::Parsing(_))));
    }

    #[test]
    fn test_invalid_table_rejected() {
        let config = RuleTableConfig::from_toml_str("earnings_cap_multiplier_bps = 0").unwrap();
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::Invalid(RuleTableError::ZeroCapMultiplier))
        ));
    }

    #[test]
    fn test_scalar_overrides() {
        let config = RuleTableConfig::from_toml_str(
            r#"
            activation_fee = "25.5"
            genesis_address = "0x1111111111111111111111111111111111111111"
            "#,
        )
        .unwrap();
        let rules = config.resolve().unwrap();
        assert_eq!(rules.activation_fee, "25.5".parse().unwrap());
        assert_eq!(
            rules.genesis_address.to_string(),
            "0x1111111111111111111111111111111111111111"
        );
    }

    #[test]
    fn test_load_rule_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rank_preset = \"five-tier\"").unwrap();
        let rules = load_rule_table(file.path()).unwrap();
        assert_eq!(rules.rank_schedule.len(), 5);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_rule_table(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
