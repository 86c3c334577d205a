//! Registry record rendering

use lib_client::RegistrationState;
use lib_types::{InvestmentRecord, ReferralValidation, UserLookup, UserRecord};

use super::format::{amount, row, yes_no};

pub fn user_lines(user: &UserRecord) -> Vec<String> {
    vec![
        row("Wallet", user.wallet_address),
        row(
            "Referrer",
            user.referrer_address
                .map_or_else(|| "none".to_string(), |r| r.to_string()),
        ),
        row("Joined", user.joined_at.to_rfc3339()),
    ]
}

pub fn lookup_lines(lookup: &UserLookup, referral: &ReferralValidation) -> Vec<String> {
    let mut lines = vec![row("Registered", yes_no(lookup.exists))];
    if let Some(user) = &lookup.user {
        lines.extend(user_lines(user));
    }
    lines.push(row("Valid referrer", yes_no(referral.is_valid)));
    if referral.is_genesis() {
        lines.push(row("Genesis", "YES"));
    }
    lines
}

/// Summary of where a registration attempt ended
pub fn registration_lines(state: &RegistrationState) -> Vec<String> {
    match state {
        RegistrationState::AlreadyRegistered { user } => {
            let mut lines = vec!["Wallet is already registered".to_string()];
            lines.extend(user_lines(user));
            lines
        }
        RegistrationState::Done { user } => {
            let mut lines = vec!["Registration complete".to_string()];
            lines.extend(user_lines(user));
            lines
        }
        other => vec![format!("Registration stopped at {}", other.name())],
    }
}

pub fn investment_lines(record: &InvestmentRecord) -> Vec<String> {
    vec![
        row("Wallet", record.wallet_address),
        row("Amount", format!("{} {}", amount(record.amount), record.token_type)),
        row("Transaction", record.tx_hash),
        row("Activation fee", amount(record.activation_fee)),
        row("ROI-eligible principal", amount(record.roi_eligible)),
        row("G4X received", amount(record.g4x_received)),
        row("Daily ROI", amount(record.daily_roi)),
        row("Recorded", record.timestamp.to_rfc3339()),
    ]
}
