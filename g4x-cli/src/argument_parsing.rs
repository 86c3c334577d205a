//! Gold4X CLI argument parsing and dispatch

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lib_compensation::{RankPreset, ReferralPreset, RoiPreset};
use lib_types::{RuleTable, TokenAmount, TokenType, WalletAddress};

use crate::cli_config::{load_config, resolve_settings, CliOverrides, Settings};
use crate::commands;
use crate::output::{ConsoleOutput, Output};
use crate::error::{CliError, CliResult};

/// Gold4X compensation engine and registry CLI
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(name = "g4x-cli")]
pub struct G4xCli {
    /// Registry base URL, including the /api prefix
    #[arg(long, env = "G4X_REGISTRY")]
    pub registry: Option<String>,

    /// Rule table TOML file (canonical presets when omitted)
    #[arg(long, env = "G4X_RULES")]
    pub rules: Option<PathBuf>,

    /// JSON file of account snapshots standing in for the contract
    #[arg(long, env = "G4X_ACCOUNTS")]
    pub accounts: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, env = "G4X_FORMAT")]
    pub format: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "G4X_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, env = "G4X_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: G4xCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum G4xCommand {
    /// Inspect rule tables and presets
    Rules(RulesArgs),

    /// Derive the compensation view for an account
    View(ViewArgs),

    /// Quote a prospective investment
    Quote(QuoteArgs),

    /// Convert between USD and G4X
    Convert(ConvertArgs),

    /// Look up a wallet in the registry
    Lookup(LookupArgs),

    /// Register a wallet under a referrer
    Register(RegisterArgs),

    /// Record a confirmed investment in the registry
    Invest(InvestArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub action: RulesAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RulesAction {
    /// Show the active rule table, or one built from the given presets
    Show(PresetSelection),
    /// List every selectable preset
    Presets,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PresetSelection {
    #[arg(long)]
    pub referral_preset: Option<ReferralPreset>,
    #[arg(long)]
    pub rank_preset: Option<RankPreset>,
    #[arg(long)]
    pub roi_preset: Option<RoiPreset>,
}

impl PresetSelection {
    pub fn is_empty(&self) -> bool {
        self.referral_preset.is_none() && self.rank_preset.is_none() && self.roi_preset.is_none()
    }
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Wallet address
    pub address: WalletAddress,

    /// Referral levels to read income for (default: every level in the rule table)
    #[arg(long)]
    pub levels: Option<u8>,
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Amount in token units, e.g. 1000 or 150.5
    pub amount: TokenAmount,

    /// Payment token (USDT, USDC, G4X)
    #[arg(long, default_value = "USDT")]
    pub token: TokenType,

    /// Treat as the account's first investment (activation fee applies)
    #[arg(long)]
    pub first: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    pub amount: TokenAmount,

    /// Target unit
    #[arg(long, value_parser = ["g4x", "usd"], default_value = "g4x")]
    pub to: String,
}

#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    pub address: WalletAddress,
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Wallet to register
    pub wallet: WalletAddress,
    /// Referrer wallet
    pub referrer: WalletAddress,
}

#[derive(Args, Debug, Clone)]
pub struct InvestArgs {
    pub wallet: WalletAddress,

    pub amount: TokenAmount,

    /// Confirmed transaction hash
    #[arg(long)]
    pub tx_hash: String,

    #[arg(long, default_value = "USDT")]
    pub token: TokenType,

    #[arg(long)]
    pub first: bool,

    #[arg(long)]
    pub referrer: Option<WalletAddress>,
}

/// Settings and rule table shared by every command
#[derive(Debug, Clone)]
pub struct CliContext {
    pub settings: Settings,
    pub rules: Arc<RuleTable>,
}

impl CliContext {
    pub fn new(settings: Settings) -> CliResult<Self> {
        let rules = Arc::new(settings.rule_table()?);
        Ok(Self { settings, rules })
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run_cli() -> Result<()> {
    let cli = G4xCli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let overrides = CliOverrides {
        registry_url: cli.registry.clone(),
        rules_file: cli.rules.clone(),
        accounts_file: cli.accounts.clone(),
        format: cli.format.clone(),
    };
    let ctx = CliContext::new(resolve_settings(overrides, config)?)?;

    let result = match &cli.command {
        G4xCommand::Rules(args) => commands::rules::handle_rules_command(args.clone(), &ctx).await,
        G4xCommand::View(args) => commands::view::handle_view_command(args.clone(), &ctx).await,
        G4xCommand::Quote(args) => commands::quote::handle_quote_command(args.clone(), &ctx).await,
        G4xCommand::Convert(args) => commands::quote::handle_convert_command(args.clone(), &ctx).await,
        G4xCommand::Lookup(args) => commands::registry::handle_lookup_command(args.clone(), &ctx).await,
        G4xCommand::Register(args) => commands::registry::handle_register_command(args.clone(), &ctx).await,
        G4xCommand::Invest(args) => commands::registry::handle_invest_command(args.clone(), &ctx).await,
    };

    if let Err(err) = result {
        report_failure(&err, &ConsoleOutput)?;
        std::process::exit(1);
    }
    Ok(())
}

/// Print a failed command's error, with a retry hint when a collaborator was unreachable
pub fn report_failure(err: &CliError, output: &dyn Output) -> CliResult<()> {
    output.error(&err.to_string())?;
    if err.is_retryable() {
        output.error("A collaborator is unavailable; retrying later may succeed.")?;
    }
    Ok(())
}
