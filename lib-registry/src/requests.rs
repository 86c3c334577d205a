//! Wire request validation
//!
//! Request bodies arrive with every field optional. Checks run in a fixed
//! order: presence, then parsing, then domain rules, so a body missing a
//! field reports "missing" even when another field is malformed.

use chrono::{DateTime, Utc};

use lib_compensation::validate_registration;
use lib_types::{InvestRequest, InvestmentRecord, RegisterRequest, TokenAmount, WalletAddress};

use crate::error::{RegistryError, RegistryResult};

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn parse_address(raw: &str) -> RegistryResult<WalletAddress> {
    raw.parse()
        .map_err(|_| RegistryError::InvalidAddress(raw.to_string()))
}

/// Validated `/register` body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub wallet: WalletAddress,
    pub referrer: WalletAddress,
}

impl TryFrom<&RegisterRequest> for Registration {
    type Error = RegistryError;

    fn try_from(req: &RegisterRequest) -> RegistryResult<Self> {
        let (wallet, referrer) = match (present(&req.wallet_address), present(&req.referrer_address)) {
            (Some(wallet), Some(referrer)) => (wallet, referrer),
            _ => return Err(RegistryError::MissingFields),
        };
        let wallet = parse_address(wallet)?;
        let referrer = parse_address(referrer)?;
        validate_registration(&wallet, &referrer)?;
        Ok(Self { wallet, referrer })
    }
}

/// Build the stored record for an `/invest` body
///
/// A zero amount counts as missing. Optional amounts default to zero.
pub fn investment_record(
    req: &InvestRequest,
    timestamp: DateTime<Utc>,
) -> RegistryResult<InvestmentRecord> {
    let wallet = present(&req.wallet_address);
    let amount = req.amount.filter(|amount| !amount.is_zero());
    let tx_hash = present(&req.tx_hash);

    let (wallet, amount, token_type, tx_hash) = match (wallet, amount, req.token_type, tx_hash) {
        (Some(wallet), Some(amount), Some(token_type), Some(tx_hash)) => {
            (wallet, amount, token_type, tx_hash)
        }
        _ => return Err(RegistryError::MissingRequiredFields),
    };

    let referrer_address = present(&req.referrer_address)
        .map(parse_address)
        .transpose()?;

    Ok(InvestmentRecord {
        wallet_address: parse_address(wallet)?,
        amount,
        token_type,
        tx_hash: tx_hash
            .parse()
            .map_err(|_| RegistryError::InvalidTxHash(tx_hash.to_string()))?,
        referrer_address,
        activation_fee: req.activation_fee.unwrap_or(TokenAmount::ZERO),
        roi_eligible: req.roi_eligible.unwrap_or(TokenAmount::ZERO),
        g4x_received: req.g4x_received.unwrap_or(TokenAmount::ZERO),
        daily_roi: req.daily_roi.unwrap_or(TokenAmount::ZERO),
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::TokenType;

    const WALLET: &str = "0x1111111111111111111111111111111111111111";
    const REFERRER: &str = "0x2222222222222222222222222222222222222222";

    fn tx_hash() -> String {
        format!("0x{}", "ab".repeat(32))
    }

    #[test]
    fn test_register_missing_fields() {
        let req = RegisterRequest {
            wallet_address: Some(WALLET.to_string()),
            referrer_address: Some("  ".to_string()),
        };
        assert_eq!(Registration::try_from(&req), Err(RegistryError::MissingFields));
    }

    #[test]
    fn test_register_self_referral_any_case() {
        let req = RegisterRequest {
            wallet_address: Some("0xABCDEFABCDEFABCDEFABCDEFABCDEFABCDEFABCD".to_string()),
            referrer_address: Some("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd".to_string()),
        };
        assert_eq!(Registration::try_from(&req), Err(RegistryError::SelfReferral));
    }

    #[test]
    fn test_register_bad_address() {
        let req = RegisterRequest {
            wallet_address: Some("not-an-address".to_string()),
            referrer_address: Some(REFERRER.to_string()),
        };
        assert!(matches!(
            Registration::try_from(&req),
            Err(RegistryError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_investment_defaults() {
        let req = InvestRequest {
            wallet_address: Some(WALLET.to_uppercase().replace("0X", "0x")),
            amount: Some(TokenAmount::from_tokens(150)),
            token_type: Some(TokenType::Usdt),
            tx_hash: Some(tx_hash()),
            ..InvestRequest::default()
        };
        let now = Utc::now();
        let record = investment_record(&req, now).unwrap();
        assert_eq!(record.wallet_address.to_string(), WALLET);
        assert_eq!(record.referrer_address, None);
        assert_eq!(record.activation_fee, TokenAmount::ZERO);
        assert_eq!(record.daily_roi, TokenAmount::ZERO);
        assert_eq!(record.timestamp, now);
    }

    #[test]
    fn test_investment_zero_amount_is_missing() {
        let req = InvestRequest {
            wallet_address: Some(WALLET.to_string()),
            amount: Some(TokenAmount::ZERO),
            token_type: Some(TokenType::Usdc),
            tx_hash: Some(tx_hash()),
            ..InvestRequest::default()
        };
        assert_eq!(
            investment_record(&req, Utc::now()),
            Err(RegistryError::MissingRequiredFields)
        );
    }

    #[test]
    fn test_investment_bad_tx_hash() {
        let req = InvestRequest {
            wallet_address: Some(WALLET.to_string()),
            amount: Some(TokenAmount::from_tokens(100)),
            token_type: Some(TokenType::G4x),
            tx_hash: Some("0x1234".to_string()),
            ..InvestRequest::default()
        };
        assert_eq!(
            investment_record(&req, Utc::now()),
            Err(RegistryError::InvalidTxHash("0x1234".to_string()))
        );
    }
}
