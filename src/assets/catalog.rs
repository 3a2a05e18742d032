use std::sync::Arc;
use std::time::Instant;

use moka::future::Cache;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

use crate::assets::{AssetError, AssetInfo, AssetSource};
use crate::types::AssetId;

const CAPACITY: u64 = 10_000;

/// Shared, memoising front for an [`AssetSource`].
///
/// Every asset is fetched at most once while it stays cached; concurrent lookups of
/// the same id wait on a single fetch. Fetches are serialised and spaced by the
/// source's `fetch_interval`.
pub struct AssetCatalog {
    source: Arc<dyn AssetSource>,
    cache: Cache<AssetId, Arc<AssetInfo>>,
    last_fetch: Mutex<Option<Instant>>
}

impl AssetCatalog {
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self {
            source,
            cache: Cache::builder().max_capacity(CAPACITY).build(),
            last_fetch: Mutex::new(None)
        }
    }

    pub async fn resolve(&self, asset_id: AssetId) -> Result<Arc<AssetInfo>, AssetError> {
        self.cache.try_get_with(asset_id, self.fetch(asset_id))
            .await
            .map_err(|error| (*error).clone())
    }

    async fn fetch(&self, asset_id: AssetId) -> Result<Arc<AssetInfo>, AssetError> {
        let mut last_fetch = self.last_fetch.lock().await;

        if let Some(previous) = *last_fetch {
            let wait = self.source.fetch_interval().saturating_sub(previous.elapsed());
            if !wait.is_zero() {
                sleep(wait).await;
            }
        }

        let result = self.source.fetch(asset_id);
        *last_fetch = Some(Instant::now());

        let asset = result?;
        debug!("Asset [{}] resolved as [{}] with [{}] decimals", asset.asset_id, asset.unit_name, asset.decimals);

        Ok(Arc::new(asset))
    }
}
