use super::{AssetBook, AssetCatalog, AssetError, AssetInfo, AssetSource, AssetTable};

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::future::join_all;

use crate::types::AssetId;

fn asset(asset_id: AssetId, decimals: u32, unit_name: &str, name: &str) -> AssetInfo {
    AssetInfo {
        asset_id,
        decimals,
        unit_name: unit_name.to_string(),
        name: name.to_string()
    }
}

struct CountingSource {
    table: AssetTable,
    fetches: AtomicUsize,
    interval: Duration
}

impl AssetSource for CountingSource {
    fn fetch(&self, asset_id: AssetId) -> Result<AssetInfo, AssetError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.table.fetch(asset_id)
    }

    fn fetch_interval(&self) -> Duration {
        self.interval
    }
}

fn counting_source(interval: Duration) -> Arc<CountingSource> {
    let table = AssetTable::from_assets([
        asset(31566704, 6, "USDC", "USDC"),
        asset(123456789, 2, "MEME", "Meme Coin")
        ]);

    Arc::new(CountingSource { table, fetches: AtomicUsize::new(0), interval })
}

fn verified() -> Arc<HashMap<AssetId, Option<String>>> {
    Arc::new(HashMap::from([(31566704, None), (230946361, Some("GEMS3".to_string()))]))
}

#[test]
fn test_table_loads_csv_with_whitespace() -> Result<()> {
    let csv = "asset_id, decimals, unit_name, name\n31566704, 6, USDC, USDC\n 230946361 ,6, GEMS, AlgoGems\n";
    let table = AssetTable::from_reader(csv.as_bytes())?;

    assert_eq!(table.len(), 2);
    assert_eq!(table.fetch(230946361)?.unit_name, "GEMS");
    assert!(matches!(table.fetch(1), Err(AssetError::UnknownAsset { asset_id: 1 })));

    Ok(())
}

#[test]
fn test_table_rejects_decimals_beyond_ledger_limit() {
    let table = AssetTable::from_assets([asset(7, 20, "BAD", "Bad")]);

    assert!(matches!(table.fetch(7), Err(AssetError::InvalidDecimals { asset_id: 7, decimals: 20 })));
}

#[test]
fn test_table_rejects_malformed_rows() {
    let csv = "asset_id,decimals,unit_name,name\nnot-a-number,6,X,X\n";

    assert!(matches!(AssetTable::from_reader(csv.as_bytes()), Err(AssetError::Table(_))));
}

#[tokio::test]
async fn test_catalog_fetches_each_asset_once() -> Result<()> {
    let source = counting_source(Duration::ZERO);
    let catalog = Arc::new(AssetCatalog::new(source.clone()));

    let lookups = (0..8).map(|_| {
        let catalog = catalog.clone();
        async move { catalog.resolve(31566704).await }
    });

    for result in join_all(lookups).await {
        assert_eq!(result?.unit_name, "USDC");
    }

    catalog.resolve(123456789).await?;
    catalog.resolve(31566704).await?;

    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);

    Ok(())
}

#[tokio::test]
async fn test_catalog_spaces_consecutive_fetches() -> Result<()> {
    let interval = Duration::from_millis(40);
    let catalog = AssetCatalog::new(counting_source(interval));

    let timer = Instant::now();
    catalog.resolve(31566704).await?;
    catalog.resolve(123456789).await?;

    assert!(timer.elapsed() >= interval);

    Ok(())
}

#[tokio::test]
async fn test_catalog_unknown_asset_is_an_error() {
    let catalog = AssetCatalog::new(counting_source(Duration::ZERO));

    assert!(matches!(catalog.resolve(42).await, Err(AssetError::UnknownAsset { asset_id: 42 })));
}

#[tokio::test]
async fn test_book_formats_quantities_and_currencies() -> Result<()> {
    let catalog = AssetCatalog::new(counting_source(Duration::ZERO));
    let mut book = AssetBook::new(verified());

    book.load(&catalog, [0, 31566704, 123456789]).await?;
    book.insert(asset(230946361, 6, "GEMS", "AlgoGems"));

    assert_eq!(book.quantity(1_000_000, 0)?.to_string(), "1.000000");
    assert_eq!(book.quantity(1_050, 123456789)?.to_string(), "10.50");
    assert_eq!(book.currency(0)?, "ALGO");
    assert_eq!(book.currency(31566704)?, "USDC");
    assert_eq!(book.currency(230946361)?, "GEMS3");
    assert_eq!(book.currency(123456789)?, "75bcd15");
    assert_eq!(book.unit_name(230946361)?, "GEMS");
    assert_eq!(book.annotation(123456789)?, "MEME-123456789 | Meme Coin");
    assert_eq!(book.annotation(31566704)?, "");
    assert_eq!(book.annotation(0)?, "");

    Ok(())
}

#[test]
fn test_book_refuses_unresolved_assets() {
    let book = AssetBook::new(verified());

    assert!(matches!(book.quantity(1, 999), Err(AssetError::UnknownAsset { asset_id: 999 })));
    assert!(matches!(book.currency(31566704), Err(AssetError::UnknownAsset { .. })));
}
