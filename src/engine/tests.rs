use super::{EngineError, ExportEngine};

use std::io::Write;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tempfile::NamedTempFile;

use crate::actors::ExportContext;
use crate::assets::{AssetCatalog, AssetInfo, AssetTable};
use crate::config::ExportConfig;
use crate::formats::lookup;
use crate::storage::ExportStorage;

const ALICE: &str = "ALICEAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
const BOB: &str = "BOBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB";
const SHOP: &str = "SHOPCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCC";

fn context(assets: Vec<AssetInfo>) -> Result<Arc<ExportContext>> {
    let config = Arc::new(ExportConfig::default());
    let catalog = Arc::new(AssetCatalog::new(Arc::new(AssetTable::from_assets(assets))));
    let format = lookup("cointracking", &config)?;

    Ok(Arc::new(ExportContext::new(config, catalog, format)))
}

fn pages(lines: &[String]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    for line in lines {
        writeln!(file, "{line}")?;
    }

    Ok(file)
}

fn payment(id: &str, sender: &str, receiver: &str, amount: u64, fee: u64, round_time: i64) -> String {
    format!(
        r#"{{"id":"{id}","tx-type":"pay","sender":"{sender}","fee":{fee},"round-time":{round_time},"payment-transaction":{{"amount":{amount},"receiver":"{receiver}"}}}}"#
    )
}

fn page(account: &str, transactions: &[String]) -> String {
    format!(r#"{{"account":"{account}","current-round":100,"transactions":[{}]}}"#, transactions.join(","))
}

async fn run(file: &NamedTempFile, context: Arc<ExportContext>) -> Result<Arc<ExportStorage>> {
    let storage = Arc::new(ExportStorage::new());
    let engine = ExportEngine::new(context, storage.clone());
    let path = file.path().to_str().ok_or_else(|| anyhow!("temporary path is not UTF-8"))?;

    engine.run(path).await?;

    Ok(storage)
}

#[tokio::test]
async fn test_engine_exports_each_account_in_order() -> Result<()> {
    let file = pages(&[
        page(ALICE, &[
            payment("T1", BOB, ALICE, 1_000_000, 1_000, 1_630_454_400),
            payment("T2", ALICE, SHOP, 250_000, 1_000, 1_630_454_500)
        ]),
        page(BOB, &[payment("T1", BOB, ALICE, 1_000_000, 1_000, 1_630_454_400)]),
        page(ALICE, &[payment("T3", SHOP, ALICE, 5, 1_000, 1_630_454_600)])
    ])?;

    let storage = run(&file, context(Vec::new())?).await?;

    assert_eq!(storage.accounts(), vec![ALICE, BOB]);

    let alice = storage.get(ALICE).ok_or_else(|| anyhow!("Alice missing from storage"))?;
    let ids: Vec<&str> = alice.records.iter().map(|record| record.tx_id.as_str()).collect();

    assert_eq!(ids, vec!["T1", "T2", "T3"]);
    assert!(alice.rows[0].starts_with("Deposit,1.000000,ALGO,"));
    assert!(alice.rows[1].starts_with("Withdrawal,,,0.251000,ALGO,0.001000,ALGO,"));

    let bob = storage.get(BOB).ok_or_else(|| anyhow!("Bob missing from storage"))?;

    assert_eq!(bob.rows.len(), 1);
    assert!(bob.rows[0].starts_with("Withdrawal,,,1.001000,ALGO,0.001000,ALGO,"));

    Ok(())
}

#[tokio::test]
async fn test_engine_resolves_assets_through_the_catalog() -> Result<()> {
    let transfer = format!(
        r#"{{"id":"T1","tx-type":"axfer","sender":"{BOB}","fee":1000,"round-time":1630454400,"asset-transfer-transaction":{{"amount":1050,"asset-id":777,"receiver":"{ALICE}"}}}}"#
    );
    let file = pages(&[page(ALICE, &[transfer])])?;
    let meme = AssetInfo { asset_id: 777, decimals: 2, unit_name: "MEME".to_string(), name: "Meme Coin".to_string() };

    let storage = run(&file, context(vec![meme])?).await?;
    let alice = storage.get(ALICE).ok_or_else(|| anyhow!("Alice missing from storage"))?;

    assert_eq!(alice.rows.len(), 1);
    assert!(alice.rows[0].starts_with("Deposit,10.50,309,"));
    assert!(alice.rows[0].contains("\"MEME-777 | Meme Coin\""));

    Ok(())
}

#[tokio::test]
async fn test_engine_fails_on_unknown_asset() -> Result<()> {
    let transfer = format!(
        r#"{{"id":"T1","tx-type":"axfer","sender":"{BOB}","round-time":1630454400,"asset-transfer-transaction":{{"amount":1,"asset-id":777,"receiver":"{ALICE}"}}}}"#
    );
    let file = pages(&[page(ALICE, &[transfer])])?;

    let result = run(&file, context(Vec::new())?).await;

    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_engine_rejects_malformed_pages() -> Result<()> {
    let file = pages(&[
        page(ALICE, &[payment("T1", BOB, ALICE, 1, 0, 1_630_454_400)]),
        "{ not json".to_string()
    ])?;

    let error = run(&file, context(Vec::new())?).await.err().ok_or_else(|| anyhow!("malformed page accepted"))?;

    assert!(matches!(error.downcast_ref::<EngineError>(), Some(EngineError::MalformedPage { line: 2, .. })));

    Ok(())
}

#[tokio::test]
async fn test_engine_reports_missing_input_file() -> Result<()> {
    let context = context(Vec::new())?;
    let storage = Arc::new(ExportStorage::new());
    let engine = ExportEngine::new(context, storage.clone());

    let error = engine.run("missing.jsonl").await.err().ok_or_else(|| anyhow!("missing file accepted"))?;

    assert!(matches!(error.downcast_ref::<EngineError>(), Some(EngineError::Io { .. })));
    assert!(storage.accounts().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_engine_skips_blank_lines_and_unrelated_transactions() -> Result<()> {
    let file = pages(&[
        String::new(),
        page(ALICE, &[payment("T1", BOB, SHOP, 1, 0, 1_630_454_400)])
    ])?;

    let storage = run(&file, context(Vec::new())?).await?;
    let alice = storage.get(ALICE).ok_or_else(|| anyhow!("Alice missing from storage"))?;

    assert!(alice.rows.is_empty());

    Ok(())
}
