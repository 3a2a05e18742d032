use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use csv::ReaderBuilder;

use super::{lookup, Cointracking, ExportFormat, FormatError, Koinly};

use crate::assets::{AssetBook, AssetError, AssetInfo};
use crate::config::ExportConfig;
use crate::fixtures::{deposit, fee_record, reward_record, withdrawal, ACCOUNT, OTHER, POOL};
use crate::models::{CustomAmount, RecordTag};
use crate::types::{Quantity, ALGO_ASSET_ID};

const USDC: u64 = 31566704;
const MEME: u64 = 123456789;

fn assets() -> AssetBook {
    let mut book = AssetBook::new(Arc::new(ExportConfig::default().verified_symbols()));
    book.insert(AssetInfo { asset_id: USDC, decimals: 6, unit_name: "USDC".to_string(), name: "USDC".to_string() });
    book.insert(AssetInfo { asset_id: MEME, decimals: 2, unit_name: "MEME".to_string(), name: "Meme Coin".to_string() });
    book
}

fn cointracking() -> Cointracking {
    Cointracking::new("ALGO Wallet".to_string())
}

#[test]
fn test_cointracking_deposit_row() -> Result<()> {
    let row = cointracking().write_record(&assets(), &deposit("TX", ALGO_ASSET_ID, 1_000_000, OTHER))?;

    assert_eq!(row, format!("Deposit,1.000000,ALGO,,,,,ALGO Wallet,{ACCOUNT},\"\",2021-09-01T00:00:00Z,TX_ACCOUNTAAA"));

    Ok(())
}

#[test]
fn test_cointracking_fee_only_row() -> Result<()> {
    let row = cointracking().write_record(&assets(), &fee_record("TX", 1000))?;

    assert_eq!(
        row,
        format!("Other Fee,,,0.001000,ALGO,0.001000,ALGO,ALGO Wallet,{ACCOUNT},\"\",2021-09-01T00:00:00Z,TX_ACCOUNTAAA_fee")
    );

    Ok(())
}

#[test]
fn test_cointracking_trade_annotates_unverified_assets() -> Result<()> {
    let mut trade = deposit("TX", MEME, 1050, POOL);
    trade.sent = 2_000_000;
    trade.sent_asset = USDC;
    trade.flags.application = true;
    trade.flags.trade = true;
    trade.comment = "Tinyman Swap".to_string();

    let row = cointracking().write_record(&assets(), &trade)?;

    assert_eq!(
        row,
        format!(
            "Trade,10.50,75bcd15,2.000000,USDC,,,ALGO Wallet,{ACCOUNT},\"MEME-123456789 | Meme Coin | Tinyman Swap\",2021-09-01T00:00:00Z,TX_ACCOUNTAAA_appl"
        )
    );

    Ok(())
}

#[test]
fn test_cointracking_custom_amounts_replace_chain_legs() -> Result<()> {
    let primary = deposit("TX", ALGO_ASSET_ID, 0, OTHER);
    let mut fee = primary.synthetic("mining-fee-TX".to_string(), "Algomint - Mint goBTC - mining fee");
    let network_fee: Quantity = "0.0001".parse()?;
    fee.flags.other_fee = true;
    fee.sent_custom = Some(CustomAmount::new(network_fee, "BTC"));
    fee.fee_custom = Some(CustomAmount::new(network_fee, "BTC"));

    let row = cointracking().write_record(&assets(), &fee)?;

    assert_eq!(
        row,
        format!(
            "Other Fee,,,0.0001,BTC,0.0001,BTC,ALGO Wallet,{ACCOUNT},\"Algomint - Mint goBTC - mining fee\",2021-09-01T00:00:00Z,mining-fee-TX_ACCOUNTAAA"
        )
    );

    Ok(())
}

#[test]
fn test_cointracking_type_priority_and_quoting() -> Result<()> {
    let mut airdrop = deposit("TX", USDC, 1, OTHER);
    airdrop.flags.airdrop = true;
    airdrop.flags.reward = true;
    airdrop.comment = "say \"hi\"".to_string();

    let mut income = deposit("TX", USDC, 1, POOL);
    income.tag = RecordTag::Synthetic("lending-income-TX".to_string());
    income.flags.lending_income = true;

    let mut borrowed = deposit("TX", USDC, 1, POOL);
    borrowed.flags.income_no_tax = true;

    let airdrop = cointracking().write_record(&assets(), &airdrop)?;
    let income = cointracking().write_record(&assets(), &income)?;
    let borrowed = cointracking().write_record(&assets(), &borrowed)?;

    assert!(airdrop.starts_with("Airdrop,"));
    assert!(airdrop.contains(",\"say \"\"hi\"\"\","));
    assert!(airdrop.ends_with("_airdrop"));
    assert!(income.starts_with("Lending Income,"));
    assert!(income.ends_with(",lending-income-TX_ACCOUNTAAA"));
    assert!(borrowed.starts_with("Income (non taxable),"));

    Ok(())
}

#[test]
fn test_koinly_rows() -> Result<()> {
    let assets = assets();

    let reward = Koinly.write_record(&assets, &reward_record("TX", 7))?;
    let received = Koinly.write_record(&assets, &deposit("TX", MEME, 1050, OTHER))?;
    let sent = Koinly.write_record(&assets, &withdrawal("TX", ALGO_ASSET_ID, 3_000, 1_000, OTHER))?;

    assert_eq!(reward, "2021-09-01 00:00:00 UTC,,,0.000007,ALGO,,,,,staking,,reward-TX");
    assert_eq!(received, "2021-09-01 00:00:00 UTC,,,10.50,ASA-123456789,,,,,,,TX");
    assert_eq!(sent, "2021-09-01 00:00:00 UTC,0.003000,ALGO,,,0.001000,ALGO,,,,,TX");

    Ok(())
}

#[test]
fn test_unresolved_asset_cannot_be_rendered() {
    let result = cointracking().write_record(&assets(), &deposit("TX", 999, 5, OTHER));

    assert!(matches!(result, Err(AssetError::UnknownAsset { asset_id: 999 })));
}

fn cells(row: &str) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(row.as_bytes());
    let record = reader.records().next().ok_or_else(|| anyhow!("row is empty"))??;

    Ok(record.iter().map(String::from).collect())
}

#[test]
fn test_separators_in_exchange_and_currency_cells_stay_inside_the_cell() -> Result<()> {
    const GEMS: u64 = 230946361;

    let mut book = AssetBook::new(Arc::new(HashMap::from([(GEMS, Some("GE\"MS,3".to_string()))])));
    book.insert(AssetInfo { asset_id: GEMS, decimals: 6, unit_name: "GEMS".to_string(), name: "AlgoGems".to_string() });

    let mut bridged = deposit("TX", GEMS, 1_000_000, OTHER);
    bridged.sent_custom = Some(CustomAmount::new("0.5".parse::<Quantity>()?, "B,TC"));

    let row = Cointracking::new("Main, Wallet".to_string()).write_record(&book, &bridged)?;
    let parsed = cells(&row)?;

    assert_eq!(parsed.len(), 12);
    assert_eq!(parsed[2], "GE\"MS,3");
    assert_eq!(parsed[4], "B,TC");
    assert_eq!(parsed[7], "Main, Wallet");

    let koinly = cells(&Koinly.write_record(&book, &bridged)?)?;

    assert_eq!(koinly.len(), 12);
    assert_eq!(koinly[2], "B,TC");
    assert_eq!(koinly[4], format!("ASA-{GEMS}"));

    let plain = cointracking().write_record(&assets(), &deposit("TX", USDC, 1, OTHER))?;
    assert!(plain.starts_with("Deposit,0.000001,USDC,,,,,ALGO Wallet,"));

    Ok(())
}

#[test]
fn test_headers_have_twelve_columns() {
    assert_eq!(cointracking().header().split(',').count(), 12);
    assert_eq!(Koinly.header().split(',').count(), 12);
}

#[test]
fn test_lookup_by_name() -> Result<()> {
    let config = ExportConfig::default();

    assert_eq!(lookup("CoinTracking", &config)?.name(), "cointracking");
    assert_eq!(lookup("koinly", &config)?.name(), "koinly");

    let unknown = lookup("bogus", &config);
    assert!(matches!(unknown, Err(FormatError::UnknownFormat { ref available, .. }) if available == "cointracking, koinly"));

    Ok(())
}
