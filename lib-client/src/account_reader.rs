//! On-chain account read port
//!
//! The contract is an external collaborator. Each lookup may fail on its
//! own; `SnapshotBuilder` turns the individual results into one snapshot.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use lib_types::{
    AccountSnapshot, BotPool, IncomeSource, LevelIncome, SnapshotField, TokenAmount,
    WalletAddress,
};

use crate::error::{ClientError, Result};

/// Fields returned together by the account-totals call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTotals {
    pub total_invested: TokenAmount,
    pub total_earned: TokenAmount,
    pub total_withdrawn: TokenAmount,
    pub roi_eligible_principal: TokenAmount,
    pub business_volume: TokenAmount,
    pub direct_referral_count: u32,
    pub current_rank: Option<String>,
    pub referrer: Option<WalletAddress>,
    pub autopool_position: u32,
}

impl From<&AccountSnapshot> for AccountTotals {
    fn from(snapshot: &AccountSnapshot) -> Self {
        Self {
            total_invested: snapshot.total_invested,
            total_earned: snapshot.total_earned,
            total_withdrawn: snapshot.total_withdrawn,
            roi_eligible_principal: snapshot.roi_eligible_principal,
            business_volume: snapshot.business_volume,
            direct_referral_count: snapshot.direct_referral_count,
            current_rank: snapshot.current_rank.clone(),
            referrer: snapshot.referrer,
            autopool_position: snapshot.autopool_position,
        }
    }
}

/// Read interface of the investment contract
#[async_trait]
pub trait AccountReader: Send + Sync {
    async fn account_totals(&self, wallet: &WalletAddress) -> Result<AccountTotals>;

    /// Income for one referral level (1-based)
    async fn level_income(&self, wallet: &WalletAddress, level: u8) -> Result<LevelIncome>;

    async fn income_source(&self, wallet: &WalletAddress, source: IncomeSource) -> Result<TokenAmount>;

    async fn active_bot_positions(&self, wallet: &WalletAddress) -> Result<Vec<u32>>;

    async fn bot_pool(&self, position: u32) -> Result<BotPool>;
}

/// In-memory reader over pre-recorded snapshots
///
/// Wallets without a record read as all zero, as the contract does for
/// unknown accounts. Fields listed in a recorded snapshot's `unknown` set, or
/// registered with `fail_field`, fail their lookup.
#[derive(Debug, Clone, Default)]
pub struct StaticAccountReader {
    accounts: HashMap<WalletAddress, AccountSnapshot>,
    failing: HashSet<SnapshotField>,
    unreachable: bool,
}

impl StaticAccountReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of snapshots
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ClientError::Unavailable {
            what: "account fixture",
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let snapshots: Vec<AccountSnapshot> = serde_json::from_str(raw)?;
        let mut reader = Self::new();
        for snapshot in snapshots {
            reader.insert(snapshot);
        }
        Ok(reader)
    }

    pub fn insert(&mut self, snapshot: AccountSnapshot) {
        self.accounts.insert(snapshot.wallet_address, snapshot);
    }

    pub fn with_account(mut self, snapshot: AccountSnapshot) -> Self {
        self.insert(snapshot);
        self
    }

    /// Make every lookup of `field` fail
    pub fn fail_field(&mut self, field: SnapshotField) {
        self.failing.insert(field);
    }

    /// Make every lookup fail
    pub fn set_unreachable(&mut self, unreachable: bool) {
        self.unreachable = unreachable;
    }

    pub fn get(&self, wallet: &WalletAddress) -> Option<&AccountSnapshot> {
        self.accounts.get(wallet)
    }

    fn check(&self, wallet: Option<&WalletAddress>, field: SnapshotField) -> Result<()> {
        let recorded_unknown = wallet
            .and_then(|w| self.accounts.get(w))
            .is_some_and(|snapshot| !snapshot.is_known(field));
        if self.unreachable || self.failing.contains(&field) || recorded_unknown {
            return Err(ClientError::Unavailable {
                what: "account reader",
                reason: format!("lookup of {:?} failed", field),
            });
        }
        Ok(())
    }

    fn account(&self, wallet: &WalletAddress) -> AccountSnapshot {
        self.accounts
            .get(wallet)
            .cloned()
            .unwrap_or_else(|| AccountSnapshot::new(*wallet))
    }
}

#[async_trait]
impl AccountReader for StaticAccountReader {
    async fn account_totals(&self, wallet: &WalletAddress) -> Result<AccountTotals> {
        for field in SnapshotField::TOTALS {
            self.check(Some(wallet), *field)?;
        }
        Ok(AccountTotals::from(&self.account(wallet)))
    }

    async fn level_income(&self, wallet: &WalletAddress, level: u8) -> Result<LevelIncome> {
        self.check(Some(wallet), SnapshotField::LevelIncome(level))?;
        Ok(self.account(wallet).level_income(level))
    }

    async fn income_source(&self, wallet: &WalletAddress, source: IncomeSource) -> Result<TokenAmount> {
        self.check(Some(wallet), SnapshotField::Income(source))?;
        Ok(self.account(wallet).income.get(source))
    }

    async fn active_bot_positions(&self, wallet: &WalletAddress) -> Result<Vec<u32>> {
        self.check(Some(wallet), SnapshotField::ActiveBots)?;
        Ok(self.account(wallet).active_bot_positions)
    }

    async fn bot_pool(&self, position: u32) -> Result<BotPool> {
        self.check(None, SnapshotField::BotPool)?;
        self.accounts
            .values()
            .find(|snapshot| snapshot.autopool_position == position)
            .and_then(|snapshot| snapshot.bot_pool)
            .ok_or_else(|| ClientError::Unavailable {
                what: "account reader",
                reason: format!("no bot pool recorded for position {}", position),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> WalletAddress {
        "0x9999999999999999999999999999999999999999".parse().unwrap()
    }

    #[tokio::test]
    async fn test_unknown_wallet_reads_zero() {
        let reader = StaticAccountReader::new();
        let totals = reader.account_totals(&wallet()).await.unwrap();
        assert_eq!(totals, AccountTotals::default());
        assert_eq!(reader.level_income(&wallet(), 3).await.unwrap(), LevelIncome::default());
    }

    #[tokio::test]
    async fn test_recorded_unknown_field_fails() {
        let mut snapshot = AccountSnapshot::new(wallet());
        snapshot.mark_unknown(SnapshotField::LevelIncome(2));
        let reader = StaticAccountReader::new().with_account(snapshot);
        assert!(reader.level_income(&wallet(), 1).await.is_ok());
        assert!(reader.level_income(&wallet(), 2).await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_fails_everything() {
        let mut reader = StaticAccountReader::new();
        reader.set_unreachable(true);
        let err = reader.account_totals(&wallet()).await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_from_json() {
        let reader = StaticAccountReader::from_json_str(
            r#"[{ "walletAddress": "0x9999999999999999999999999999999999999999",
                  "totalInvested": "500", "directReferralCount": 3 }]"#,
        )
        .unwrap();
        let snapshot = reader.get(&wallet()).unwrap();
        assert_eq!(snapshot.total_invested, TokenAmount::from_tokens(500));
        assert_eq!(snapshot.direct_referral_count, 3);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"[{ "walletAddress": "0x9999999999999999999999999999999999999999", "totalInvested": 100 }]"#,
        )
        .unwrap();
        let reader = StaticAccountReader::from_json_file(file.path()).unwrap();
        assert_eq!(
            reader.get(&wallet()).map(|s| s.total_invested),
            Some(TokenAmount::from_tokens(100))
        );

        let missing = StaticAccountReader::from_json_file("/nonexistent/accounts.json").unwrap_err();
        assert!(matches!(missing, ClientError::Unavailable { what: "account fixture", .. }));
    }
}
