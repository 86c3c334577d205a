//! Referrer eligibility and registration rules
//!
//! A referrer is active once it has invested anything, or when it is the
//! configured genesis address. A snapshot that could not be fetched yields
//! `Undetermined`, never `Inactive`, so callers retry instead of rejecting a
//! valid referrer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lib_types::{AccountSnapshot, Observed, RuleTable, SnapshotField, WalletAddress};

pub fn is_genesis(address: &WalletAddress, rules: &RuleTable) -> bool {
    *address == rules.genesis_address
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferrerEligibility {
    Active,
    Inactive,
    /// The referrer's investment total could not be read
    Undetermined,
}

impl ReferrerEligibility {
    /// `None` when undetermined
    pub fn is_active(&self) -> Option<bool> {
        match self {
            ReferrerEligibility::Active => Some(true),
            ReferrerEligibility::Inactive => Some(false),
            ReferrerEligibility::Undetermined => None,
        }
    }
}

/// Decide whether `referrer` may accept new registrations
pub fn referrer_eligibility(
    referrer: &WalletAddress,
    snapshot: &Observed<AccountSnapshot>,
    rules: &RuleTable,
) -> ReferrerEligibility {
    if is_genesis(referrer, rules) {
        return ReferrerEligibility::Active;
    }

    match snapshot {
        Observed::Unknown => ReferrerEligibility::Undetermined,
        Observed::Known(snapshot) if !snapshot.is_known(SnapshotField::TotalInvested) => {
            ReferrerEligibility::Undetermined
        }
        Observed::Known(snapshot) if snapshot.total_invested.is_zero() => {
            ReferrerEligibility::Inactive
        }
        Observed::Known(_) => ReferrerEligibility::Active,
    }
}

/// Registration rejected before anything is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationRuleError {
    #[error("Cannot refer yourself")]
    SelfReferral,

    #[error("Referrer address is required")]
    MissingReferrer,
}

/// Synchronous checks on a registration request
///
/// Case variants of the same address are already equal as `WalletAddress`.
pub fn validate_registration(
    wallet: &WalletAddress,
    referrer: &WalletAddress,
) -> Result<(), RegistrationRuleError> {
    if referrer.is_zero() {
        return Err(RegistrationRuleError::MissingReferrer);
    }
    if wallet == referrer {
        return Err(RegistrationRuleError::SelfReferral);
    }
    Ok(())
}
