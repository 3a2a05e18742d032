use super::{ConfigError, ExportConfig};

use std::io::Write;

use anyhow::Result;
use tempfile::NamedTempFile;

use crate::interpreters::Protocol;

#[test]
fn test_defaults_carry_mainnet_tables() {
    let config = ExportConfig::default();
    let verified = config.verified_symbols();

    assert!(!config.strict);
    assert_eq!(config.exchange, "ALGO Wallet");
    assert_eq!(config.action_skip_marker, "bail");
    assert_eq!(verified.get(&230946361), Some(&Some("GEMS3".to_string())));
    assert_eq!(verified.get(&31566704), Some(&None));
    assert_eq!(config.governance.periods.len(), 5);
    assert_eq!(config.governance.periods[4].period, 5);
    assert!(config.is_lending_market("goBTC"));
    assert!(!config.is_lending_market("YLDY"));
    assert_eq!(config.algomint.fee_rate.to_string(), "0.002");
    assert_eq!(config.algomint.fee_effective.to_rfc3339(), "2022-03-01T14:00:01+00:00");
    assert_eq!(config.wrapped_asset(386195940).map(|asset| asset.network_fee.to_string()), Some("0.0025".to_string()));
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_overrides_only_what_it_names() -> Result<()> {
    let config = ExportConfig::from_toml(r#"
        strict = true

        [[applications]]
        id = 233725848
        protocol = "yieldly-staking-pools"

        [[applications]]
        id = 465814065
        protocol = "algofi-market"

        [algomint]
        fee-rate = "0.003"
    "#)?;

    assert!(config.strict);
    assert_eq!(config.exchange, "ALGO Wallet");
    assert_eq!(config.applications.len(), 2);
    assert_eq!(config.applications[0].protocol, Protocol::YieldlyStakingPools);
    assert_eq!(config.applications[1].protocol, Protocol::AlgoFiMarket);
    assert_eq!(config.algomint.fee_rate.to_string(), "0.003");
    assert_eq!(config.algomint.assets.len(), 2);
    assert_eq!(config.staking_services[0].comment, "AlgoStake");

    Ok(())
}

#[test]
fn test_unknown_protocol_is_a_parse_error() {
    let result = ExportConfig::from_toml(r#"
        [[applications]]
        id = 1
        protocol = "unknown-dex"
    "#);

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_values_are_rejected() {
    let fee = ExportConfig::from_toml("[algomint]\nfee-rate = \"1.5\"\n");
    let marker = ExportConfig::from_toml("action-skip-marker = \"\"\n");
    let conflict = ExportConfig::from_toml(r#"
        [[applications]]
        id = 7
        protocol = "tinyman"

        [[applications]]
        id = 7
        protocol = "akita-token-swap"
    "#);

    assert!(matches!(fee, Err(ConfigError::Invalid(_))));
    assert!(matches!(marker, Err(ConfigError::Invalid(_))));
    assert!(matches!(conflict, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_config_loads_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "exchange = \"Algorand Wallet\"")?;
    writeln!(file, "lending-markets = [\"ALGO\"]")?;

    let config = ExportConfig::from_path(file.path())?;

    assert_eq!(config.exchange, "Algorand Wallet");
    assert!(!config.is_lending_market("USDC"));

    Ok(())
}

#[test]
fn test_missing_file_is_an_io_error() {
    assert!(matches!(ExportConfig::from_path("/definitely/not/here.toml"), Err(ConfigError::Io { .. })));
}
