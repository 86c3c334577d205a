//! CLI configuration loader and runtime settings
//!
//! Precedence: command-line flags and `G4X_*` environment variables, then
//! `~/.g4x/cli.toml`, then built-in defaults.
//!
//! ```toml
//! registry_url = "http://localhost:5000/api"
//! rules_file = "/etc/g4x/rules.toml"
//! accounts_file = "accounts.json"
//! format = "table"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use lib_compensation::{canonical_rule_table, load_rule_table};
use lib_types::RuleTable;

use crate::error::{CliError, CliResult};
use crate::logic::format::OutputFormat;

pub const DEFAULT_CONFIG_FILENAME: &str = "cli.toml";
pub const DEFAULT_REGISTRY_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    pub registry_url: Option<String>,
    pub rules_file: Option<PathBuf>,
    /// JSON array of account snapshots served by the static account reader
    pub accounts_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

/// Values given on the command line or through the environment
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOverrides {
    pub registry_url: Option<String>,
    pub rules_file: Option<PathBuf>,
    pub accounts_file: Option<PathBuf>,
    pub format: Option<String>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub registry_url: String,
    pub rules_file: Option<PathBuf>,
    pub accounts_file: Option<PathBuf>,
    pub format: OutputFormat,
}

impl Settings {
    /// Load the rule table named by `rules_file`, or the canonical one
    pub fn rule_table(&self) -> CliResult<RuleTable> {
        match &self.rules_file {
            Some(path) => Ok(load_rule_table(path)?),
            None => Ok(canonical_rule_table()),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        home.join(".g4x").join(DEFAULT_CONFIG_FILENAME)
    } else {
        PathBuf::from("./g4x-cli.toml")
    }
}

/// Load the CLI config
///
/// A missing default config is not an error; a missing explicit one is.
pub fn load_config(path: Option<&Path>) -> CliResult<CliConfig> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !config_path.exists() {
        if path.is_some() {
            return Err(CliError::ConfigError(format!(
                "Configuration file not found: {}",
                config_path.display()
            )));
        }
        debug!(path = %config_path.display(), "no CLI config, using defaults");
        return Ok(CliConfig::default());
    }

    let raw = fs::read_to_string(&config_path).map_err(|e| CliError::ConfigLoadFailed {
        path: config_path.display().to_string(),
        reason: e.to_string(),
    })?;

    toml::from_str(&raw).map_err(|e| CliError::ConfigLoadFailed {
        path: config_path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Merge overrides onto the config file
///
/// Pure function - no I/O
pub fn resolve_settings(overrides: CliOverrides, config: CliConfig) -> CliResult<Settings> {
    let format = match overrides.format {
        Some(raw) => raw.parse()?,
        None => config.format.unwrap_or_default(),
    };

    let registry_url = overrides
        .registry_url
        .or(config.registry_url)
        .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());
    if !registry_url.starts_with("http://") && !registry_url.starts_with("https://") {
        return Err(CliError::ConfigError(format!(
            "registry URL must start with http:// or https://, got '{}'",
            registry_url
        )));
    }

    Ok(Settings {
        registry_url,
        rules_file: overrides.rules_file.or(config.rules_file),
        accounts_file: overrides.accounts_file.or(config.accounts_file),
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_config() {
        let settings = resolve_settings(CliOverrides::default(), CliConfig::default()).unwrap();
        assert_eq!(settings.registry_url, DEFAULT_REGISTRY_URL);
        assert_eq!(settings.format, OutputFormat::Table);
        assert_eq!(settings.rule_table().unwrap(), canonical_rule_table());
    }

    #[test]
    fn test_flags_override_config() {
        let config = CliConfig {
            registry_url: Some("http://registry.internal/api".into()),
            format: Some(OutputFormat::Json),
            accounts_file: Some("from-config.json".into()),
            ..CliConfig::default()
        };
        let overrides = CliOverrides {
            format: Some("table".into()),
            ..CliOverrides::default()
        };
        let settings = resolve_settings(overrides, config).unwrap();
        assert_eq!(settings.registry_url, "http://registry.internal/api");
        assert_eq!(settings.format, OutputFormat::Table);
        assert_eq!(settings.accounts_file, Some(PathBuf::from("from-config.json")));
    }

    #[test]
    fn test_rejects_bad_format_and_url() {
        let overrides = CliOverrides {
            format: Some("yaml".into()),
            ..CliOverrides::default()
        };
        assert!(matches!(
            resolve_settings(overrides, CliConfig::default()),
            Err(CliError::UnsupportedFormat(_))
        ));

        let overrides = CliOverrides {
            registry_url: Some("localhost:5000".into()),
            ..CliOverrides::default()
        };
        assert!(matches!(
            resolve_settings(overrides, CliConfig::default()),
            Err(CliError::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"registry_url = "http://127.0.0.1:5000/api""#).unwrap();
        writeln!(file, r#"format = "json""#).unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.registry_url.as_deref(), Some("http://127.0.0.1:5000/api"));
        assert_eq!(config.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        assert!(matches!(
            load_config(Some(Path::new("/nonexistent/cli.toml"))),
            Err(CliError::ConfigError(_))
        ));
    }
}
