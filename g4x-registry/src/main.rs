//! Gold4X Registry Server
//!
//! Serves the off-chain user and investment registry over HTTP.

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lib_registry::{router, MemoryRegistry};

use crate::config::RegistryConfig;

#[derive(Debug, Parser)]
#[command(name = "g4x-registry", version, about = "Gold4X off-chain registry server")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "G4X_REGISTRY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind address from the config file
    #[arg(short, long, env = "G4X_REGISTRY_BIND")]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let mut config = RegistryConfig::load(args.config.as_deref())
        .context("failed to load registry configuration")?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    let rules = config.rule_table().context("failed to resolve rule table")?;

    let registry = Arc::new(MemoryRegistry::with_capacity_limit(
        rules.genesis_address,
        config.max_records,
    ));
    let app = router(registry);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        addr = %config.bind_addr,
        genesis = %rules.genesis_address,
        max_records = config.max_records,
        "registry listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("registry server failed")?;

    info!("registry stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
