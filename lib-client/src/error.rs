//! Error types for the Gold4X client library
//!
//! Collaborator failures (`Unavailable`, `ReferrerUndetermined`) are kept
//! apart from domain rejections so a caller can offer a retry instead of
//! reporting a misleading "no".

use thiserror::Error;

use lib_compensation::RegistrationRuleError;
use lib_types::WalletAddress;

/// Client library error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// An external collaborator could not be reached or failed
    #[error("{what} unavailable: {reason}")]
    Unavailable { what: &'static str, reason: String },

    /// The registry answered with a domain error
    #[error("Registry rejected request ({status}): {message}")]
    Registry { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    /// Referrer is not registered
    #[error("Invalid User")]
    InvalidReferrer(WalletAddress),

    /// Referrer is registered but has never invested
    #[error("Inactive User")]
    InactiveReferrer(WalletAddress),

    /// The referrer's on-chain status could not be read
    #[error("Could not verify referrer status")]
    ReferrerUndetermined(WalletAddress),

    #[error(transparent)]
    Registration(#[from] RegistrationRuleError),

    /// Action not allowed in the current registration state
    #[error("Cannot {action} while {state}")]
    InvalidState {
        state: &'static str,
        action: &'static str,
    },
}

impl ClientError {
    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Unavailable { .. } | ClientError::ReferrerUndetermined(_)
        ) || matches!(self, ClientError::Registry { status, .. } if *status >= 500)
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_referrer_messages() {
        let referrer = WalletAddress::new([1; 20]);
        assert_eq!(ClientError::InvalidReferrer(referrer).to_string(), "Invalid User");
        assert_eq!(ClientError::InactiveReferrer(referrer).to_string(), "Inactive User");
        assert_eq!(
            ClientError::ReferrerUndetermined(referrer).to_string(),
            "Could not verify referrer status"
        );
    }

    #[test]
    fn test_retryable_classification() {
        let referrer = WalletAddress::new([1; 20]);
        assert!(ClientError::ReferrerUndetermined(referrer).is_retryable());
        assert!(ClientError::Unavailable { what: "registry", reason: "timeout".into() }.is_retryable());
        assert!(ClientError::Registry { status: 500, message: "boom".into() }.is_retryable());
        assert!(!ClientError::Registry { status: 400, message: "User already registered".into() }
            .is_retryable());
        assert!(!ClientError::InactiveReferrer(referrer).is_retryable());
        assert!(!ClientError::Registration(RegistrationRuleError::SelfReferral).is_retryable());
    }
}
