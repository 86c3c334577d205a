//! Registry server configuration
//!
//! ```toml
//! bind_addr = "0.0.0.0:5000"
//! rules_file = "rules.toml"
//! genesis_address = "0x7b84e7e09d210b76ed9d2d51b8473ff83e424a29"
//! max_records = 1000000
//! ```
//!
//! Every key is optional. The genesis address defaults to the one in the
//! resolved rule table.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use lib_compensation::{canonical_rule_table, load_rule_table, ConfigError as RulesError};
use lib_registry::DEFAULT_MAX_RECORDS;
use lib_types::{RuleTable, WalletAddress};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration parsing error: {0}")]
    Parsing(#[from] toml::de::Error),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("max_records must be at least 1")]
    ZeroCapacity,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub rules_file: Option<PathBuf>,
    #[serde(default)]
    pub genesis_address: Option<WalletAddress>,
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

fn default_max_records() -> usize {
    DEFAULT_MAX_RECORDS
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rules_file: None,
            genesis_address: None,
            max_records: default_max_records(),
        }
    }
}

impl RegistryConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        if config.max_records == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(config)
    }

    /// Load from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("no config file given, using defaults");
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&raw)?;

        // Relative rule paths are relative to the config file
        if let (Some(rules), Some(dir)) = (&config.rules_file, path.parent()) {
            if rules.is_relative() {
                config.rules_file = Some(dir.join(rules));
            }
        }
        Ok(config)
    }

    /// Resolve the rule table this server validates against
    pub fn rule_table(&self) -> Result<RuleTable, ConfigError> {
        let mut rules = match &self.rules_file {
            Some(path) => load_rule_table(path)?,
            None => canonical_rule_table(),
        };
        if let Some(genesis) = self.genesis_address {
            rules.genesis_address = genesis;
        }
        Ok(rules)
    }
}
