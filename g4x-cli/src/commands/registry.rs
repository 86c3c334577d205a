//! Registry commands: lookup, register, invest

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use lib_client::{
    AccountReader, HttpRegistryClient, RegistrationFlow, RegistrationState, RegistryPort,
    SnapshotBuilder, StaticAccountReader,
};
use lib_compensation::investment_quote;
use lib_types::{InvestRequest, TxHash, UserRecord};

use crate::argument_parsing::{CliContext, InvestArgs, LookupArgs, RegisterArgs};
use crate::commands::view::account_reader;
use crate::error::{CliError, CliResult};
use crate::logic::{investment_lines, lookup_lines, registration_lines};
use crate::output::{ConsoleOutput, Output};

fn registry(ctx: &CliContext) -> Arc<dyn RegistryPort> {
    Arc::new(HttpRegistryClient::new(ctx.settings.registry_url.clone()))
}

/// Account reader for referrer checks
///
/// Without an account source every on-chain read fails, so non-genesis
/// referrers come back as undetermined rather than inactive.
fn referrer_reader(ctx: &CliContext) -> CliResult<Arc<dyn AccountReader>> {
    match account_reader(ctx) {
        Err(CliError::NoAccountSource) => {
            let mut reader = StaticAccountReader::new();
            reader.set_unreachable(true);
            Ok(Arc::new(reader))
        }
        other => other,
    }
}

// ============================================================================
// LOOKUP
// ============================================================================

pub async fn handle_lookup_command(args: LookupArgs, ctx: &CliContext) -> CliResult<()> {
    handle_lookup_command_impl(args, ctx, registry(ctx), &ConsoleOutput).await
}

async fn handle_lookup_command_impl(
    args: LookupArgs,
    ctx: &CliContext,
    registry: Arc<dyn RegistryPort>,
    output: &dyn Output,
) -> CliResult<()> {
    let lookup = registry.lookup_user(&args.address).await?;
    let referral = registry.validate_referral(&args.address).await?;
    let data = json!({ "lookup": lookup, "referral": referral });
    output.emit(ctx.settings.format, &data, &lookup_lines(&lookup, &referral))
}

// ============================================================================
// REGISTER
// ============================================================================

pub async fn handle_register_command(args: RegisterArgs, ctx: &CliContext) -> CliResult<()> {
    let reader = referrer_reader(ctx)?;
    handle_register_command_impl(args, ctx, registry(ctx), reader, &ConsoleOutput).await
}

async fn handle_register_command_impl(
    args: RegisterArgs,
    ctx: &CliContext,
    registry: Arc<dyn RegistryPort>,
    reader: Arc<dyn AccountReader>,
    output: &dyn Output,
) -> CliResult<()> {
    let mut flow = RegistrationFlow::new(registry, SnapshotBuilder::new(reader), ctx.rules.clone());

    let needs_referral = matches!(
        flow.connect(args.wallet).await?,
        RegistrationState::CollectReferral { .. }
    );
    if needs_referral {
        flow.submit_referral(args.referrer).await?;
        info!(wallet = %args.wallet, referrer = %args.referrer, "wallet registered");
    }

    let state = flow.state();
    let data = json!({ "state": state.name(), "user": user_of(state) });
    output.emit(ctx.settings.format, &data, &registration_lines(state))
}

fn user_of(state: &RegistrationState) -> Option<&UserRecord> {
    match state {
        RegistrationState::AlreadyRegistered { user } | RegistrationState::Done { user } => Some(user),
        _ => None,
    }
}

// ============================================================================
// INVEST
// ============================================================================

/// Registry request for a quoted investment
///
/// Pure function - the quote fills every derived field
pub fn invest_request(args: &InvestArgs, ctx: &CliContext) -> CliResult<InvestRequest> {
    let tx_hash: TxHash = args
        .tx_hash
        .parse()
        .map_err(|e| CliError::InvalidArgument(format!("transaction hash: {}", e)))?;
    let quote = investment_quote(args.amount, args.token, args.first, &ctx.rules)?;

    Ok(InvestRequest {
        wallet_address: Some(args.wallet.to_string()),
        amount: Some(quote.amount),
        token_type: Some(quote.token_type),
        tx_hash: Some(tx_hash.to_string()),
        referrer_address: args.referrer.map(|r| r.to_string()),
        activation_fee: Some(quote.activation_fee),
        roi_eligible: Some(quote.roi_eligible),
        g4x_received: Some(quote.g4x_reward),
        daily_roi: Some(quote.daily_roi),
    })
}

pub async fn handle_invest_command(args: InvestArgs, ctx: &CliContext) -> CliResult<()> {
    handle_invest_command_impl(args, ctx, registry(ctx), &ConsoleOutput).await
}

async fn handle_invest_command_impl(
    args: InvestArgs,
    ctx: &CliContext,
    registry: Arc<dyn RegistryPort>,
    output: &dyn Output,
) -> CliResult<()> {
    let request = invest_request(&args, ctx)?;
    let record = registry.record_investment(&request).await?;
    output.success("Investment recorded")?;
    output.emit(ctx.settings.format, &serde_json::to_value(&record)?, &investment_lines(&record))
}
