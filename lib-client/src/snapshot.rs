//! Account snapshot assembly
//!
//! Every lookup runs on its own. A failed lookup leaves its field(s) at zero,
//! logs a warning and records the field in `AccountSnapshot::unknown`; it
//! never aborts the snapshot.

use std::sync::Arc;

use tracing::{debug, warn};

use lib_types::{AccountSnapshot, IncomeSource, Observed, SnapshotField, WalletAddress};

use crate::account_reader::{AccountReader, AccountTotals};
use crate::error::ClientError;

pub struct SnapshotBuilder {
    reader: Arc<dyn AccountReader>,
}

fn log_failure(wallet: &WalletAddress, field: SnapshotField, err: &ClientError) {
    warn!(
        wallet = %wallet,
        field = ?field,
        error = %err,
        "account lookup failed, defaulting to zero"
    );
}

fn apply_totals(snapshot: &mut AccountSnapshot, totals: AccountTotals) {
    snapshot.total_invested = totals.total_invested;
    snapshot.total_earned = totals.total_earned;
    snapshot.total_withdrawn = totals.total_withdrawn;
    snapshot.roi_eligible_principal = totals.roi_eligible_principal;
    snapshot.business_volume = totals.business_volume;
    snapshot.direct_referral_count = totals.direct_referral_count;
    snapshot.current_rank = totals.current_rank;
    snapshot.referrer = totals.referrer;
    snapshot.autopool_position = totals.autopool_position;
}

impl SnapshotBuilder {
    pub fn new(reader: Arc<dyn AccountReader>) -> Self {
        Self { reader }
    }

    /// Fetch a full snapshot, reading per-level income for levels `1..=levels`
    pub async fn build(&self, wallet: &WalletAddress, levels: u8) -> AccountSnapshot {
        let mut snapshot = AccountSnapshot::new(*wallet);

        let totals_known = match self.reader.account_totals(wallet).await {
            Ok(totals) => {
                apply_totals(&mut snapshot, totals);
                true
            }
            Err(err) => {
                for field in SnapshotField::TOTALS {
                    log_failure(wallet, *field, &err);
                    snapshot.mark_unknown(*field);
                }
                false
            }
        };

        for level in 1..=levels {
            match self.reader.level_income(wallet, level).await {
                Ok(income) => {
                    snapshot.per_level_income.insert(level, income);
                }
                Err(err) => {
                    let field = SnapshotField::LevelIncome(level);
                    log_failure(wallet, field, &err);
                    snapshot.mark_unknown(field);
                }
            }
        }

        for source in IncomeSource::ALL {
            match self.reader.income_source(wallet, *source).await {
                Ok(amount) => snapshot.income.set(*source, amount),
                Err(err) => {
                    let field = SnapshotField::Income(*source);
                    log_failure(wallet, field, &err);
                    snapshot.mark_unknown(field);
                }
            }
        }

        match self.reader.active_bot_positions(wallet).await {
            Ok(positions) => snapshot.active_bot_positions = positions,
            Err(err) => {
                log_failure(wallet, SnapshotField::ActiveBots, &err);
                snapshot.mark_unknown(SnapshotField::ActiveBots);
            }
        }

        if !totals_known {
            // Pool parameters hang off the position, which is unknown too
            snapshot.mark_unknown(SnapshotField::BotPool);
        } else if snapshot.autopool_position != 0 {
            match self.reader.bot_pool(snapshot.autopool_position).await {
                Ok(pool) => snapshot.bot_pool = Some(pool),
                Err(err) => {
                    log_failure(wallet, SnapshotField::BotPool, &err);
                    snapshot.mark_unknown(SnapshotField::BotPool);
                }
            }
        }

        debug!(
            wallet = %wallet,
            unknown = snapshot.unknown.len(),
            "account snapshot assembled"
        );
        snapshot
    }

    /// Fetch only what referrer eligibility needs
    ///
    /// `Unknown` when the totals lookup fails.
    pub async fn fetch_referrer(&self, wallet: &WalletAddress) -> Observed<AccountSnapshot> {
        match self.reader.account_totals(wallet).await {
            Ok(totals) => {
                let mut snapshot = AccountSnapshot::new(*wallet);
                apply_totals(&mut snapshot, totals);
                Observed::Known(snapshot)
            }
            Err(err) => {
                warn!(wallet = %wallet, error = %err, "referrer lookup failed");
                Observed::Unknown
            }
        }
    }
}
