use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::{AssetCatalog, AssetError, AssetInfo};
use crate::types::{AssetId, Quantity, ALGO_ASSET_ID, ALGO_DECIMALS, ALGO_UNIT_NAME};

/// An account worker's view of the asset metadata it has resolved so far.
///
/// Formatting is synchronous; the book must be [loaded](AssetBook::load) with every
/// asset a batch touches before its records are rendered.
#[derive(Debug, Clone, Default)]
pub struct AssetBook {
    assets: HashMap<AssetId, Arc<AssetInfo>>,
    /// Verified assets, with an optional symbol override.
    verified: Arc<HashMap<AssetId, Option<String>>>
}

impl AssetBook {
    pub fn new(verified: Arc<HashMap<AssetId, Option<String>>>) -> Self {
        Self { assets: HashMap::new(), verified }
    }

    /// Resolves every asset in `asset_ids` the book does not hold yet.
    pub async fn load(&mut self, catalog: &AssetCatalog, asset_ids: impl IntoIterator<Item = AssetId>) -> Result<(), AssetError> {
        for asset_id in asset_ids {
            if asset_id == ALGO_ASSET_ID || self.assets.contains_key(&asset_id) {
                continue;
            }
            let asset = catalog.resolve(asset_id).await?;
            self.assets.insert(asset_id, asset);
        }

        Ok(())
    }

    pub fn insert(&mut self, asset: AssetInfo) {
        self.assets.insert(asset.asset_id, Arc::new(asset));
    }

    pub fn info(&self, asset_id: AssetId) -> Result<&AssetInfo, AssetError> {
        self.assets.get(&asset_id)
            .map(Arc::as_ref)
            .ok_or_else(|| AssetError::unknown(asset_id))
    }

    pub fn decimals(&self, asset_id: AssetId) -> Result<u32, AssetError> {
        if asset_id == ALGO_ASSET_ID {
            return Ok(ALGO_DECIMALS);
        }
        Ok(self.info(asset_id)?.decimals)
    }

    /// `amount` base units of `asset_id`, scaled by the asset's decimals.
    pub fn quantity(&self, amount: u64, asset_id: AssetId) -> Result<Quantity, AssetError> {
        let decimals = self.decimals(asset_id)?;

        Quantity::from_base_units(amount, decimals)
            .map_err(|error| AssetError::quantity(asset_id, error))
    }

    pub fn unit_name(&self, asset_id: AssetId) -> Result<&str, AssetError> {
        if asset_id == ALGO_ASSET_ID {
            return Ok(ALGO_UNIT_NAME);
        }
        Ok(&self.info(asset_id)?.unit_name)
    }

    pub fn is_verified(&self, asset_id: AssetId) -> bool {
        self.verified.contains_key(&asset_id)
    }

    /// Currency symbol a tax tracker recognises. Unverified assets get a short,
    /// stable hexadecimal code so they never collide with a listed ticker.
    pub fn currency(&self, asset_id: AssetId) -> Result<String, AssetError> {
        if asset_id == ALGO_ASSET_ID {
            return Ok(ALGO_UNIT_NAME.to_string());
        }

        let asset = self.info(asset_id)?;

        match self.verified.get(&asset_id) {
            Some(Some(symbol)) if !symbol.is_empty() => Ok(symbol.clone()),
            Some(_) => Ok(asset.unit_name.clone()),
            None => Ok(format!("{:x}", asset_id % 4_294_967_295))
        }
    }

    /// Human-readable identification of an unverified asset, empty otherwise.
    pub fn annotation(&self, asset_id: AssetId) -> Result<String, AssetError> {
        if asset_id == ALGO_ASSET_ID || self.is_verified(asset_id) {
            return Ok(String::new());
        }

        let asset = self.info(asset_id)?;
        Ok(format!("{}-{} | {}", asset.unit_name, asset_id, asset.name))
    }
}
