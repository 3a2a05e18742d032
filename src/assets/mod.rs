mod book;
mod catalog;
mod errors;
mod table;
#[cfg(test)]
mod tests;

use std::time::Duration;

use serde::Deserialize;

use crate::types::AssetId;

pub use book::AssetBook;
pub use catalog::AssetCatalog;
pub use errors::AssetError;
pub use table::AssetTable;

/// Metadata the exporter needs to render quantities of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetInfo {
    pub asset_id: AssetId,
    pub decimals: u32,
    pub unit_name: String,
    pub name: String
}

/// Where asset metadata comes from (an indexer, a local table, a test fixture).
pub trait AssetSource: Send + Sync + 'static {
    fn fetch(&self, asset_id: AssetId) -> Result<AssetInfo, AssetError>;

    /// Minimum spacing between two consecutive fetches.
    fn fetch_interval(&self) -> Duration {
        Duration::ZERO
    }
}
