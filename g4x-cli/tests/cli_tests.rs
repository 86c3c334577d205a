//! Argument parsing and settings resolution through the public API

use clap::Parser;

use g4x_cli::cli_config::{resolve_settings, CliConfig, CliOverrides};
use g4x_cli::logic::OutputFormat;
use g4x_cli::{CliContext, CliError, G4xCli, G4xCommand};

#[test]
fn test_every_command_parses() {
    let wallet = "0x1111111111111111111111111111111111111111";
    let referrer = "0x7b84e7e09d210b76ed9d2d51b8473ff83e424a29";
    let tx = format!("0x{}", "ab".repeat(32));

    let cases: Vec<Vec<&str>> = vec![
        vec!["rules", "show"],
        vec!["rules", "presets"],
        vec!["view", wallet, "--levels", "5"],
        vec!["quote", "150.5", "--token", "G4X"],
        vec!["convert", "110", "--to", "g4x"],
        vec!["lookup", wallet],
        vec!["register", wallet, referrer],
        vec!["invest", wallet, "1000", "--tx-hash", &tx, "--first"],
    ];

    for case in cases {
        let argv = std::iter::once("g4x-cli").chain(case.iter().copied());
        assert!(G4xCli::try_parse_from(argv).is_ok(), "failed to parse {:?}", case);
    }
}

#[test]
fn test_invalid_values_rejected_at_parse() {
    assert!(G4xCli::try_parse_from(["g4x-cli", "quote", "abc"]).is_err());
    assert!(G4xCli::try_parse_from(["g4x-cli", "quote", "100", "--token", "BTC"]).is_err());
    assert!(G4xCli::try_parse_from(["g4x-cli", "convert", "100", "--to", "eur"]).is_err());
    assert!(G4xCli::try_parse_from(["g4x-cli", "rules", "show", "--roi-preset", "turbo"]).is_err());
}

#[test]
fn test_global_flags_resolve_settings() {
    let cli = G4xCli::try_parse_from([
        "g4x-cli",
        "--registry",
        "http://127.0.0.1:5000/api",
        "-f",
        "json",
        "rules",
        "presets",
    ])
    .unwrap();
    assert!(matches!(cli.command, G4xCommand::Rules(_)));

    let overrides = CliOverrides {
        registry_url: cli.registry,
        format: cli.format,
        ..CliOverrides::default()
    };
    let ctx = CliContext::new(resolve_settings(overrides, CliConfig::default()).unwrap()).unwrap();
    assert_eq!(ctx.settings.format, OutputFormat::Json);
    assert_eq!(ctx.rules.referral_levels.len(), 20);
}

#[test]
fn test_bad_rules_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(&path, "referral_preset = \"classic-20\"\nreferral_levels = []\n").unwrap();

    let overrides = CliOverrides {
        rules_file: Some(path),
        ..CliOverrides::default()
    };
    let settings = resolve_settings(overrides, CliConfig::default()).unwrap();
    assert!(matches!(CliContext::new(settings), Err(CliError::RulesError(_))));
}
