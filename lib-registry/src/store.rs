//! In-memory registry store
//!
//! Two collections behind `tokio::sync::RwLock`: users keyed by wallet
//! address and investments keyed by transaction hash. Uniqueness checks and
//! inserts happen under one write lock, so concurrent duplicate requests see
//! exactly one success.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use lib_types::{
    InvestmentRecord, ReferralValidation, TxHash, UserLookup, UserRecord, WalletAddress,
};

use crate::error::{RegistryError, RegistryResult};
use crate::requests::Registration;

/// Default upper bound on stored records per collection
pub const DEFAULT_MAX_RECORDS: usize = 1_000_000;

#[derive(Debug)]
pub struct MemoryRegistry {
    genesis_address: WalletAddress,
    max_records: usize,
    users: RwLock<HashMap<WalletAddress, UserRecord>>,
    investments: RwLock<HashMap<TxHash, InvestmentRecord>>,
}

impl MemoryRegistry {
    pub fn new(genesis_address: WalletAddress) -> Self {
        Self::with_capacity_limit(genesis_address, DEFAULT_MAX_RECORDS)
    }

    pub fn with_capacity_limit(genesis_address: WalletAddress, max_records: usize) -> Self {
        Self {
            genesis_address,
            max_records,
            users: RwLock::new(HashMap::new()),
            investments: RwLock::new(HashMap::new()),
        }
    }

    pub fn genesis_address(&self) -> WalletAddress {
        self.genesis_address
    }

    pub async fn lookup_user(&self, address: &WalletAddress) -> UserLookup {
        let user = self.users.read().await.get(address).cloned();
        UserLookup {
            exists: user.is_some(),
            user,
        }
    }

    /// Genesis is always valid; anyone else must be registered
    pub async fn validate_referral(&self, address: &WalletAddress) -> ReferralValidation {
        if *address == self.genesis_address {
            return ReferralValidation {
                is_valid: true,
                is_genesis: Some(true),
            };
        }
        ReferralValidation {
            is_valid: self.users.read().await.contains_key(address),
            is_genesis: None,
        }
    }

    pub async fn register(
        &self,
        registration: Registration,
        joined_at: DateTime<Utc>,
    ) -> RegistryResult<UserRecord> {
        let mut users = self.users.write().await;
        if users.contains_key(&registration.wallet) {
            return Err(RegistryError::AlreadyRegistered);
        }
        if users.len() >= self.max_records {
            return Err(RegistryError::StoreFull {
                limit: self.max_records,
            });
        }

        let record = UserRecord {
            wallet_address: registration.wallet,
            referrer_address: Some(registration.referrer),
            joined_at,
        };
        users.insert(registration.wallet, record.clone());
        info!(
            wallet = %registration.wallet,
            referrer = %registration.referrer,
            "user registered"
        );
        Ok(record)
    }

    pub async fn record_investment(&self, record: InvestmentRecord) -> RegistryResult<InvestmentRecord> {
        let mut investments = self.investments.write().await;
        if investments.contains_key(&record.tx_hash) {
            return Err(RegistryError::DuplicateTransaction);
        }
        if investments.len() >= self.max_records {
            return Err(RegistryError::StoreFull {
                limit: self.max_records,
            });
        }

        investments.insert(record.tx_hash, record.clone());
        info!(
            wallet = %record.wallet_address,
            amount = %record.amount,
            token = %record.token_type,
            tx_hash = %record.tx_hash,
            "investment recorded"
        );
        Ok(record)
    }

    /// Investments by one wallet, oldest first
    pub async fn investments_by(&self, wallet: &WalletAddress) -> Vec<InvestmentRecord> {
        let mut records: Vec<_> = self
            .investments
            .read()
            .await
            .values()
            .filter(|record| record.wallet_address == *wallet)
            .cloned()
            .collect();
        records.sort_by_key(|record| (record.timestamp, record.tx_hash));
        records
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn investment_count(&self) -> usize {
        self.investments.read().await.len()
    }
}
