//! Gold4X CLI Library
//!
//! ## Architecture
//!
//! Functional core, imperative shell:
//!
//! - **Functional Core** (`logic/`): pure formatting and validation
//! - **Imperative Shell** (`commands/`): collaborator calls and printing
//! - **Error Handling** (`error`): `CliError` wraps engine, config and client errors
//! - **Output Abstraction** (`output`): testable printing interface

pub mod argument_parsing;
pub mod cli_config;
pub mod commands;
pub mod error;
pub mod logic;
pub mod output;

pub use argument_parsing::{run_cli, CliContext, G4xCli, G4xCommand};
pub use error::{CliError, CliResult};
pub use output::Output;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
