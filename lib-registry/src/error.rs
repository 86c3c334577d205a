//! Registry error types
//!
//! Every variant maps to a status code and a `{ "error": ... }` body. The
//! messages are user-facing and stable.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use lib_compensation::RegistrationRuleError;
use lib_types::ErrorResponse;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// `/register` without both addresses
    #[error("Missing fields")]
    MissingFields,

    /// `/invest` without wallet, amount, token or tx hash
    #[error("Missing required fields")]
    MissingRequiredFields,

    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("Invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Cannot refer yourself")]
    SelfReferral,

    #[error("Referrer address is required")]
    MissingReferrer,

    #[error("User already registered")]
    AlreadyRegistered,

    #[error("Transaction already recorded")]
    DuplicateTransaction,

    #[error("Registry is full ({limit} records)")]
    StoreFull { limit: usize },
}

impl RegistryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::StoreFull { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<RegistrationRuleError> for RegistryError {
    fn from(err: RegistrationRuleError) -> Self {
        match err {
            RegistrationRuleError::SelfReferral => RegistryError::SelfReferral,
            RegistrationRuleError::MissingReferrer => RegistryError::MissingReferrer,
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "registry request failed");
        } else {
            tracing::debug!(error = %self, "registry request rejected");
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}
