//! Rank qualification
//!
//! Rank is recomputed from the snapshot on every call and is never stored.
//! Tiers are cumulative: the walk stops at the first tier the account does
//! not satisfy, so a regression in directs or business volume lowers the rank
//! on the next call.
//!
//! Progress toward the next tier is measured on the binding requirement, the
//! smaller of the directs ratio and (when the tier has one) the business
//! volume ratio.

use serde::{Deserialize, Serialize};

use lib_types::{AccountSnapshot, Bps, RankName, RankTier, RuleTable, TokenAmount};

const FULL_PROGRESS_BPS: Bps = 10_000;

/// Tier after the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NextRank {
    #[serde(rename_all = "camelCase")]
    Tier {
        tier: RankTier,
        missing_directs: u32,
        missing_business_volume: TokenAmount,
    },
    MaxRankReached,
}

impl NextRank {
    pub fn rank(&self) -> Option<RankName> {
        match self {
            NextRank::Tier { tier, .. } => Some(tier.rank),
            NextRank::MaxRankReached => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankStatus {
    /// Highest satisfied tier, `None` below the first tier
    pub current: Option<RankTier>,
    pub next: NextRank,
    /// Progress toward `next`; 10000 once the last tier is reached
    pub progress_bps: Bps,
    /// Salary of the current tier, zero without a rank
    pub monthly_salary: TokenAmount,
    pub salary_eligible: bool,
}

impl RankStatus {
    pub fn current_rank(&self) -> Option<RankName> {
        self.current.map(|tier| tier.rank)
    }
}

fn satisfies(snapshot: &AccountSnapshot, tier: &RankTier) -> bool {
    let volume_ok = tier
        .required_business_volume
        .map_or(true, |required| snapshot.business_volume >= required);
    volume_ok && snapshot.direct_referral_count >= tier.required_directs
}

fn directs_progress(directs: u32, required: u32) -> Bps {
    if required == 0 {
        return FULL_PROGRESS_BPS;
    }
    let ratio = u64::from(directs) * u64::from(FULL_PROGRESS_BPS) / u64::from(required);
    ratio.min(u64::from(FULL_PROGRESS_BPS)) as Bps
}

fn progress_toward(snapshot: &AccountSnapshot, tier: &RankTier) -> Bps {
    let by_directs = directs_progress(snapshot.direct_referral_count, tier.required_directs);
    match tier.required_business_volume {
        Some(required) if !required.is_zero() => {
            by_directs.min(snapshot.business_volume.ratio_bps(required))
        }
        _ => by_directs,
    }
}

/// Compute rank, next-rank gap and salary eligibility from scratch
pub fn rank_status(snapshot: &AccountSnapshot, rules: &RuleTable) -> RankStatus {
    let achieved = rules
        .rank_schedule
        .iter()
        .take_while(|tier| satisfies(snapshot, tier))
        .count();

    let current = achieved
        .checked_sub(1)
        .and_then(|index| rules.rank_schedule.get(index))
        .copied();

    let (next, progress_bps) = match rules.rank_schedule.get(achieved) {
        Some(tier) => {
            let missing_business_volume = tier
                .required_business_volume
                .map_or(TokenAmount::ZERO, |required| {
                    required.saturating_sub(snapshot.business_volume)
                });
            (
                NextRank::Tier {
                    tier: *tier,
                    missing_directs: tier
                        .required_directs
                        .saturating_sub(snapshot.direct_referral_count),
                    missing_business_volume,
                },
                progress_toward(snapshot, tier),
            )
        }
        None => (NextRank::MaxRankReached, FULL_PROGRESS_BPS),
    };

    RankStatus {
        current,
        next,
        progress_bps,
        monthly_salary: current.map_or(TokenAmount::ZERO, |tier| tier.monthly_salary),
        salary_eligible: current.is_some(),
    }
}

/// Comparison of an externally reported rank label with the computed rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RankReconciliation {
    /// No label was reported
    NotReported,
    Agrees,
    Disagrees {
        reported: Option<RankName>,
        computed: Option<RankName>,
    },
    /// The label names no known rank
    Unrecognized { label: String },
}

/// Treat a reported rank label as a hint and compare it with `computed`
///
/// An empty label is "not reported"; `"No Rank"` and `"NONE"` report the
/// absence of a rank.
pub fn reconcile_rank(reported: Option<&str>, computed: Option<RankName>) -> RankReconciliation {
    let label = match reported.map(str::trim) {
        None | Some("") => return RankReconciliation::NotReported,
        Some(label) => label,
    };

    let reported = if label.eq_ignore_ascii_case("no rank") || label.eq_ignore_ascii_case("none") {
        None
    } else {
        match RankName::from_label(label) {
            Some(rank) => Some(rank),
            None => {
                return RankReconciliation::Unrecognized {
                    label: label.to_string(),
                }
            }
        }
    };

    if reported == computed {
        RankReconciliation::Agrees
    } else {
        RankReconciliation::Disagrees { reported, computed }
    }
}
