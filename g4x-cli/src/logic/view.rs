//! Derived view and quote rendering

use lib_compensation::{DerivedView, InvestmentQuote, NextRank, RankReconciliation};
use lib_types::{RankName, TokenAmount};

use super::format::{amount, percent, row, yes_no};

fn rank_label(rank: Option<RankName>) -> &'static str {
    rank.map_or("No Rank", |r| r.label())
}

fn reconciliation_line(reconciliation: &RankReconciliation) -> Option<String> {
    match reconciliation {
        RankReconciliation::NotReported | RankReconciliation::Agrees => None,
        RankReconciliation::Disagrees { reported, computed } => Some(format!(
            "Contract reports {} but snapshot qualifies for {}",
            rank_label(*reported),
            rank_label(*computed)
        )),
        RankReconciliation::Unrecognized { label } => {
            Some(format!("Contract reports unrecognized rank '{}'", label))
        }
    }
}

/// Warnings a user should see above the view
pub fn view_warnings(view: &DerivedView) -> Vec<String> {
    let mut warnings = Vec::new();
    if !view.is_complete() {
        let fields: Vec<String> = view.unknown_fields.iter().map(|f| format!("{:?}", f)).collect();
        warnings.push(format!(
            "Some lookups failed; these fields show zero: {}",
            fields.join(", ")
        ));
    }
    if let Some(line) = reconciliation_line(&view.reported_rank) {
        warnings.push(line);
    }
    if !view.cap.accrual_permitted && !view.cap.cap.is_zero() {
        warnings.push("Earnings cap reached; no further ROI or commission accrues".to_string());
    }
    warnings
}

/// Table lines for a derived view
pub fn view_lines(view: &DerivedView) -> Vec<String> {
    let mut lines = vec![format!("Account {}", view.wallet_address)];

    lines.push(String::new());
    lines.push("Rank:".to_string());
    lines.push(row("Current", rank_label(view.rank.current_rank())));
    match view.rank.next {
        NextRank::Tier { tier, missing_directs, missing_business_volume } => {
            lines.push(row("Next", tier.rank.label()));
            lines.push(row("Progress", percent(view.rank.progress_bps)));
            lines.push(row("Directs missing", missing_directs));
            if !missing_business_volume.is_zero() {
                lines.push(row("Volume missing", amount(missing_business_volume)));
            }
        }
        NextRank::MaxRankReached => lines.push(row("Next", "Max rank reached")),
    }
    lines.push(row("Monthly salary", amount(view.rank.monthly_salary)));

    lines.push(String::new());
    lines.push("Earnings:".to_string());
    lines.push(row("Daily ROI", amount(view.daily_roi)));
    lines.push(row("Earnings cap", amount(view.cap.cap)));
    lines.push(row("Cap remaining", amount(view.cap.remaining)));
    lines.push(row("Cap used", percent(view.cap.percent_used_bps)));
    lines.push(row("Accrual permitted", yes_no(view.cap.accrual_permitted)));
    lines.push(row("Total earned", amount(view.income.total_earned)));
    lines.push(row("Total withdrawn", amount(view.income.total_withdrawn)));
    lines.push(row("Withdrawable", amount(view.income.withdrawable)));

    let breakdown = &view.income.breakdown;
    lines.push(String::new());
    lines.push("Income by source:".to_string());
    lines.push(row("Direct", amount(breakdown.direct)));
    lines.push(row("Sponsor (levels)", amount(breakdown.sponsor)));
    lines.push(row("Autopool", amount(breakdown.autopool)));
    lines.push(row("Rank", amount(breakdown.rank)));
    lines.push(row("ROI", amount(breakdown.roi)));
    lines.push(row("Direct bonus expected", amount(view.income.direct_bonus_expected)));

    lines.push(String::new());
    lines.push(format!(
        "Referral levels ({} of {} unlocked):",
        view.unlocked_level_count,
        view.levels.len()
    ));
    for level in &view.levels {
        lines.push(format!(
            "  L{:<3} {:>7} {:<8} earned {:>12} over {} payouts",
            level.level,
            percent(level.commission_bps),
            if level.is_unlocked { "unlocked" } else { "locked" },
            amount(level.income.total_earned),
            level.income.payout_count
        ));
    }

    lines.push(String::new());
    lines.push("Autopool:".to_string());
    if view.autopool.position == 0 {
        lines.push(row("Position", "none"));
    } else {
        lines.push(row("Position", view.autopool.position));
        lines.push(row("Active bots", view.autopool.active_bots));
        if let Some(size) = view.autopool.pool_size {
            lines.push(row("Pool size", size));
        }
        lines.push(row("Net payout per cycle", amount(view.autopool.net_payout_per_cycle)));
    }
    lines
}

/// Table lines for an investment quote
pub fn quote_lines(quote: &InvestmentQuote) -> Vec<String> {
    let mut lines = vec![format!("Investment of {} {}", amount(quote.amount), quote.token_type)];
    lines.push(row("First investment", yes_no(quote.is_first_investment)));
    lines.push(row("Activation fee", amount(quote.activation_fee)));
    lines.push(row("ROI-eligible principal", amount(quote.roi_eligible)));
    lines.push(row("Daily ROI", amount(quote.daily_roi)));
    if quote.token_type.earns_g4x_reward() {
        lines.push(row("G4X reward", amount(quote.g4x_reward)));
    }
    lines
}

/// One-line conversion summary
pub fn conversion_line(from: TokenAmount, from_unit: &str, to: TokenAmount, to_unit: &str) -> String {
    format!("{} {} = {} {}", amount(from), from_unit, amount(to), to_unit)
}
