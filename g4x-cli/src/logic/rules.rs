//! Rule table and preset listings

use lib_compensation::{RankPreset, ReferralPreset, RoiPreset};
use lib_types::RuleTable;

use super::format::{amount, multiplier, percent, row};

/// Table lines describing a resolved rule table
pub fn rule_table_lines(rules: &RuleTable) -> Vec<String> {
    let mut lines = vec!["Referral levels:".to_string()];
    lines.push(format!("  {:<6} {:>10} {:>16}", "Level", "Commission", "Directs needed"));
    for level in &rules.referral_levels {
        lines.push(format!(
            "  L{:<5} {:>10} {:>16}",
            level.level,
            percent(level.commission_bps),
            level.required_directs
        ));
    }

    lines.push(String::new());
    lines.push("Rank schedule:".to_string());
    lines.push(format!(
        "  {:<10} {:>16} {:>8} {:>12}",
        "Rank", "Business volume", "Directs", "Salary/mo"
    ));
    for tier in &rules.rank_schedule {
        lines.push(format!(
            "  {:<10} {:>16} {:>8} {:>12}",
            tier.rank.label(),
            tier.required_business_volume.map_or_else(|| "-".to_string(), amount),
            tier.required_directs,
            amount(tier.monthly_salary)
        ));
    }

    lines.push(String::new());
    lines.push("Constants:".to_string());
    lines.push(row("Daily ROI rate", percent(rules.roi_daily_rate_bps)));
    lines.push(row("Earnings cap", multiplier(rules.earnings_cap_multiplier_bps)));
    lines.push(row("Activation fee", amount(rules.activation_fee)));
    lines.push(row("G4X conversion rate", multiplier(rules.g4x_conversion_rate_bps)));
    lines.push(row("Minimum investment", amount(rules.minimum_investment)));
    lines.push(row("Direct referral bonus", amount(rules.direct_referral_bonus)));
    lines.push(row("Genesis address", rules.genesis_address));
    lines
}

/// Flags shown next to a preset name
fn preset_flags(canonical: bool, extra: Option<&str>) -> String {
    let mut flags = Vec::new();
    if canonical {
        flags.push("canonical");
    }
    if let Some(extra) = extra {
        flags.push(extra);
    }
    if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    }
}

/// Table lines listing every selectable preset
pub fn preset_lines() -> Vec<String> {
    let mut lines = vec!["Referral presets:".to_string()];
    for preset in ReferralPreset::ALL {
        let levels = preset.levels();
        lines.push(format!(
            "  {:<12} {} levels{}",
            preset.name(),
            levels.len(),
            preset_flags(
                preset.is_canonical(),
                (!preset.is_attested()).then_some("partially attested")
            )
        ));
    }

    lines.push("Rank presets:".to_string());
    for preset in RankPreset::ALL {
        let names: Vec<&str> = preset.tiers().iter().map(|t| t.rank.label()).collect();
        lines.push(format!(
            "  {:<12} {}{}",
            preset.name(),
            names.join(" > "),
            preset_flags(preset.is_canonical(), None)
        ));
    }

    lines.push("ROI presets:".to_string());
    for preset in RoiPreset::ALL {
        lines.push(format!(
            "  {:<12} {} daily{}",
            preset.name(),
            percent(preset.rate_bps()),
            preset_flags(
                *preset == RoiPreset::default(),
                preset.is_deprecated().then_some("deprecated")
            )
        ));
    }
    lines
}

/// JSON listing of every selectable preset
pub fn preset_catalog() -> serde_json::Value {
    serde_json::json!({
        "referral": ReferralPreset::ALL.iter().map(|p| serde_json::json!({
            "name": p.name(),
            "levels": p.levels().len(),
            "canonical": p.is_canonical(),
            "attested": p.is_attested(),
        })).collect::<Vec<_>>(),
        "rank": RankPreset::ALL.iter().map(|p| serde_json::json!({
            "name": p.name(),
            "tiers": p.tiers().iter().map(|t| t.rank.label()).collect::<Vec<_>>(),
            "canonical": p.is_canonical(),
        })).collect::<Vec<_>>(),
        "roi": RoiPreset::ALL.iter().map(|p| serde_json::json!({
            "name": p.name(),
            "dailyRateBps": p.rate_bps(),
            "deprecated": p.is_deprecated(),
        })).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_compensation::canonical_rule_table;

    #[test]
    fn test_rule_table_lines_cover_schedules() {
        let lines = rule_table_lines(&canonical_rule_table()).join("\n");
        assert!(lines.contains("L1"));
        assert!(lines.contains("14.00%"));
        assert!(lines.contains("L20"));
        assert!(lines.contains("STAR"));
        assert!(lines.contains("RUBY"));
        assert!(lines.contains("0.70%"));
        assert!(lines.contains("4.00x"));
    }

    #[test]
    fn test_preset_lines_flag_discrepancies() {
        let lines = preset_lines();
        let classic = lines.iter().find(|l| l.contains("classic-20")).unwrap();
        assert!(classic.contains("canonical"));
        let extended = lines.iter().find(|l| l.contains("extended-22")).unwrap();
        assert!(extended.contains("partially attested"));
        let legacy = lines.iter().find(|l| l.contains("legacy")).unwrap();
        assert!(legacy.contains("deprecated"));
        assert!(legacy.contains("0.60%"));
    }

    #[test]
    fn test_preset_catalog_json() {
        let catalog = preset_catalog();
        assert_eq!(catalog["referral"][1]["levels"], 22);
        assert_eq!(catalog["roi"][0]["dailyRateBps"], 70);
    }
}
