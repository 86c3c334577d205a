//! Structured error types for the Gold4X CLI

use thiserror::Error;

use lib_client::ClientError;
use lib_compensation::{ConfigError, QuoteError};

#[derive(Error, Debug)]
pub enum CliError {
    // Configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to load config from {path}: {reason}")]
    ConfigLoadFailed { path: String, reason: String },

    #[error("Rule table error: {0}")]
    RulesError(#[from] ConfigError),

    // Arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported output format: '{0}'. Supported: table, json")]
    UnsupportedFormat(String),

    // Engine
    #[error("Investment rejected: {0}")]
    QuoteRejected(#[from] QuoteError),

    // Collaborators
    #[error("{0}")]
    ClientError(#[from] ClientError),

    #[error("No account data source configured; pass --accounts or set accounts_file")]
    NoAccountSource,

    // Output
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl CliError {
    /// Whether the failure came from an unreachable collaborator
    pub fn is_retryable(&self) -> bool {
        matches!(self, CliError::ClientError(err) if err.is_retryable())
    }
}

pub type CliResult<T> = Result<T, CliError>;
