//! ROI accrual and investment quoting
//!
//! # Rules
//!
//! - `daily_roi = roi_eligible_principal × roi_daily_rate`
//! - First investment: `roi_eligible = max(0, amount − activation_fee)`
//! - Stablecoin payments earn `amount / g4x_conversion_rate` G4X; paying in
//!   G4X earns nothing
//! - Amounts below `minimum_investment` are rejected, never rounded up

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lib_types::{AccountSnapshot, RuleTable, TokenAmount, TokenType};

/// Expected ROI for one day at the configured rate
///
/// Full base-unit precision; round only for display.
pub fn daily_roi(snapshot: &AccountSnapshot, rules: &RuleTable) -> TokenAmount {
    snapshot.roi_eligible_principal.mul_bps(rules.roi_daily_rate_bps)
}

/// G4X received for a USD amount
pub fn usd_to_g4x(usd: TokenAmount, rules: &RuleTable) -> TokenAmount {
    usd.div_bps(rules.g4x_conversion_rate_bps)
}

/// USD value of a G4X amount
pub fn g4x_to_usd(g4x: TokenAmount, rules: &RuleTable) -> TokenAmount {
    g4x.mul_bps(rules.g4x_conversion_rate_bps)
}

/// Investment rejected before it reaches the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("Investment amount must be greater than zero")]
    ZeroAmount,

    #[error("Minimum investment is {minimum} (got {amount})")]
    BelowMinimum {
        amount: TokenAmount,
        minimum: TokenAmount,
    },
}

/// Breakdown of a prospective investment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentQuote {
    pub amount: TokenAmount,
    pub token_type: TokenType,
    pub is_first_investment: bool,
    /// Zero unless this is the account's first investment
    pub activation_fee: TokenAmount,
    pub roi_eligible: TokenAmount,
    pub daily_roi: TokenAmount,
    pub g4x_reward: TokenAmount,
}

/// Quote an investment of `amount` paid in `token_type`
pub fn investment_quote(
    amount: TokenAmount,
    token_type: TokenType,
    is_first_investment: bool,
    rules: &RuleTable,
) -> Result<InvestmentQuote, QuoteError> {
    if amount.is_zero() {
        return Err(QuoteError::ZeroAmount);
    }
    if amount < rules.minimum_investment {
        return Err(QuoteError::BelowMinimum {
            amount,
            minimum: rules.minimum_investment,
        });
    }

    let activation_fee = if is_first_investment {
        rules.activation_fee
    } else {
        TokenAmount::ZERO
    };
    let roi_eligible = amount.saturating_sub(activation_fee);
    let g4x_reward = if token_type.earns_g4x_reward() {
        usd_to_g4x(amount, rules)
    } else {
        TokenAmount::ZERO
    };

    Ok(InvestmentQuote {
        amount,
        token_type,
        is_first_investment,
        activation_fee,
        roi_eligible,
        daily_roi: roi_eligible.mul_bps(rules.roi_daily_rate_bps),
        g4x_reward,
    })
}
