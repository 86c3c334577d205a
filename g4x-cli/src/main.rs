//! Gold4X Command-Line Interface
//!
//! Entry point for the g4x-cli binary. Parses command-line arguments
//! and delegates to the appropriate command handler.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    g4x_cli::run_cli().await
}
