//! Registration flow
//!
//! ```text
//! Connect -> CheckingRegistry -> AlreadyRegistered
//!                             -> CollectReferral -> ValidateAndSubmit -> Done
//! ```
//!
//! A rejected or undetermined referrer returns the flow to `CollectReferral`
//! so the user can correct the address or retry. Self-referral is rejected
//! before the registry is contacted.

use std::sync::Arc;

use tracing::{info, warn};

use lib_compensation::{is_genesis, referrer_eligibility, validate_registration, ReferrerEligibility};
use lib_types::{RuleTable, UserRecord, WalletAddress};

use crate::error::{ClientError, Result};
use crate::registry_client::RegistryPort;
use crate::snapshot::SnapshotBuilder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationState {
    Connect,
    CheckingRegistry { wallet: WalletAddress },
    AlreadyRegistered { user: UserRecord },
    CollectReferral { wallet: WalletAddress },
    ValidateAndSubmit { wallet: WalletAddress, referrer: WalletAddress },
    Done { user: UserRecord },
}

impl RegistrationState {
    pub fn name(&self) -> &'static str {
        match self {
            RegistrationState::Connect => "connect",
            RegistrationState::CheckingRegistry { .. } => "checking-registry",
            RegistrationState::AlreadyRegistered { .. } => "already-registered",
            RegistrationState::CollectReferral { .. } => "collect-referral",
            RegistrationState::ValidateAndSubmit { .. } => "validate-and-submit",
            RegistrationState::Done { .. } => "done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RegistrationState::AlreadyRegistered { .. } | RegistrationState::Done { .. }
        )
    }
}

pub struct RegistrationFlow {
    registry: Arc<dyn RegistryPort>,
    snapshots: SnapshotBuilder,
    rules: Arc<RuleTable>,
    state: RegistrationState,
}

impl RegistrationFlow {
    pub fn new(
        registry: Arc<dyn RegistryPort>,
        snapshots: SnapshotBuilder,
        rules: Arc<RuleTable>,
    ) -> Self {
        Self {
            registry,
            snapshots,
            rules,
            state: RegistrationState::Connect,
        }
    }

    pub fn state(&self) -> &RegistrationState {
        &self.state
    }

    fn invalid(&self, action: &'static str) -> ClientError {
        ClientError::InvalidState {
            state: self.state.name(),
            action,
        }
    }

    /// Wallet connected; look it up in the registry
    pub async fn connect(&mut self, wallet: WalletAddress) -> Result<&RegistrationState> {
        if !matches!(self.state, RegistrationState::Connect) {
            return Err(self.invalid("connect a wallet"));
        }
        self.state = RegistrationState::CheckingRegistry { wallet };
        self.check_registry().await
    }

    /// Run (or re-run after a failure) the registry lookup
    pub async fn check_registry(&mut self) -> Result<&RegistrationState> {
        let wallet = match self.state {
            RegistrationState::CheckingRegistry { wallet } => wallet,
            _ => return Err(self.invalid("check the registry")),
        };

        let lookup = self.registry.lookup_user(&wallet).await?;
        self.state = match lookup.user {
            Some(user) if lookup.exists => {
                info!(wallet = %wallet, "wallet already registered");
                RegistrationState::AlreadyRegistered { user }
            }
            _ => RegistrationState::CollectReferral { wallet },
        };
        Ok(&self.state)
    }

    /// Validate `referrer` and register the wallet under it
    pub async fn submit_referral(&mut self, referrer: WalletAddress) -> Result<&RegistrationState> {
        let wallet = match self.state {
            RegistrationState::CollectReferral { wallet } => wallet,
            _ => return Err(self.invalid("submit a referral")),
        };

        validate_registration(&wallet, &referrer)?;
        self.state = RegistrationState::ValidateAndSubmit { wallet, referrer };

        match self.validate_and_register(wallet, referrer).await {
            Ok(user) => {
                info!(wallet = %wallet, referrer = %referrer, "registration complete");
                self.state = RegistrationState::Done { user };
                Ok(&self.state)
            }
            Err(err) => {
                warn!(wallet = %wallet, referrer = %referrer, error = %err, "referral not accepted");
                self.state = RegistrationState::CollectReferral { wallet };
                Err(err)
            }
        }
    }

    async fn validate_and_register(
        &self,
        wallet: WalletAddress,
        referrer: WalletAddress,
    ) -> Result<UserRecord> {
        let validation = self.registry.validate_referral(&referrer).await?;
        if !validation.is_valid {
            return Err(ClientError::InvalidReferrer(referrer));
        }

        // Genesis needs no on-chain investment
        if !validation.is_genesis() && !is_genesis(&referrer, &self.rules) {
            let snapshot = self.snapshots.fetch_referrer(&referrer).await;
            match referrer_eligibility(&referrer, &snapshot, &self.rules) {
                ReferrerEligibility::Active => {}
                ReferrerEligibility::Inactive => return Err(ClientError::InactiveReferrer(referrer)),
                ReferrerEligibility::Undetermined => {
                    return Err(ClientError::ReferrerUndetermined(referrer))
                }
            }
        }

        self.registry.register(&wallet, &referrer).await
    }
}
