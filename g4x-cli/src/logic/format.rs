//! Pure output formatting helpers

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use lib_types::{Bps, TokenAmount, BPS_DENOMINATOR};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> CliResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Render `data` as pretty JSON or `table` as newline-joined lines
pub fn render(format: OutputFormat, data: &serde_json::Value, table: &[String]) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Table => Ok(table.join("\n")),
    }
}

/// One aligned `label value` line
pub fn row(label: &str, value: impl Display) -> String {
    format!("  {:<26} {}", label, value)
}

/// Basis points as a percentage, e.g. 70 -> "0.70%"
pub fn percent(bps: Bps) -> String {
    let hundredths = u128::from(bps) * 10_000 / BPS_DENOMINATOR;
    format!("{}.{:02}%", hundredths / 100, hundredths % 100)
}

/// Basis points as a multiplier, e.g. 40000 -> "4.00x"
pub fn multiplier(bps: Bps) -> String {
    let hundredths = u128::from(bps) * 100 / BPS_DENOMINATOR;
    format!("{}.{:02}x", hundredths / 100, hundredths % 100)
}

pub fn amount(value: TokenAmount) -> String {
    value.display_2dp()
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "YES"
    } else {
        "NO"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" table ".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(CliError::UnsupportedFormat(f)) if f == "yaml"
        ));
    }

    #[test]
    fn test_percent_and_multiplier() {
        assert_eq!(percent(70), "0.70%");
        assert_eq!(percent(1400), "14.00%");
        assert_eq!(percent(8000), "80.00%");
        assert_eq!(multiplier(40_000), "4.00x");
        assert_eq!(multiplier(11_000), "1.10x");
    }

    #[test]
    fn test_render_table_joins_lines() {
        let lines = vec!["a".to_string(), "b".to_string()];
        let out = render(OutputFormat::Table, &serde_json::Value::Null, &lines).unwrap();
        assert_eq!(out, "a\nb");
    }
}
