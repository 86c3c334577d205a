//! Off-chain registry wire types.
//!
//! JSON shapes for the user / referral / investment REST routes. Request
//! bodies keep every field optional so that a missing field is reported as a
//! domain error ("Missing fields") instead of a deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::primitives::{TokenAmount, TxHash, WalletAddress};

/// Token used to pay for an investment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    #[serde(rename = "USDT", alias = "usdt")]
    Usdt,
    #[serde(rename = "USDC", alias = "usdc")]
    Usdc,
    #[serde(rename = "G4X", alias = "g4x")]
    G4x,
}

impl TokenType {
    /// Stablecoin payments earn a G4X reward; paying in G4X does not
    pub const fn earns_g4x_reward(self) -> bool {
        !matches!(self, TokenType::G4x)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TokenType::Usdt => "USDT",
            TokenType::Usdc => "USDC",
            TokenType::G4x => "G4X",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for TokenType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USDT" => Ok(TokenType::Usdt),
            "USDC" => Ok(TokenType::Usdc),
            "G4X" => Ok(TokenType::G4x),
            other => Err(format!("unknown token type '{}': expected USDT, USDC or G4X", other)),
        }
    }
}

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub wallet_address: WalletAddress,
    #[serde(default)]
    pub referrer_address: Option<WalletAddress>,
    pub joined_at: DateTime<Utc>,
}

/// `GET /users/:address`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLookup {
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
}

/// `GET /referral/:address`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralValidation {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_genesis: Option<bool>,
}

impl ReferralValidation {
    pub fn is_genesis(&self) -> bool {
        self.is_genesis.unwrap_or(false)
    }
}

/// `POST /register` body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub referrer_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
}

/// `POST /invest` body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestRequest {
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub amount: Option<TokenAmount>,
    #[serde(default)]
    pub token_type: Option<TokenType>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub referrer_address: Option<String>,
    #[serde(default)]
    pub activation_fee: Option<TokenAmount>,
    #[serde(default)]
    pub roi_eligible: Option<TokenAmount>,
    #[serde(default)]
    pub g4x_received: Option<TokenAmount>,
    #[serde(default)]
    pub daily_roi: Option<TokenAmount>,
}

/// Stored investment log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecord {
    pub wallet_address: WalletAddress,
    pub amount: TokenAmount,
    pub token_type: TokenType,
    pub tx_hash: TxHash,
    #[serde(default)]
    pub referrer_address: Option<WalletAddress>,
    pub activation_fee: TokenAmount,
    pub roi_eligible: TokenAmount,
    pub g4x_received: TokenAmount,
    pub daily_roi: TokenAmount,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment: Option<InvestmentRecord>,
}

/// Body of every 4xx/5xx registry response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
