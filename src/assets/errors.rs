use thiserror::Error;

use crate::types::{AssetId, QuantityError};

#[derive(Debug, Clone, Error)]
pub enum AssetError {
    #[error("Unknown asset [{asset_id}]: metadata is unavailable")]
    UnknownAsset {
        asset_id: AssetId
    },
    #[error("Asset [{asset_id}] declares [{decimals}] decimals which the ledger does not allow")]
    InvalidDecimals {
        asset_id: AssetId,
        decimals: u32
    },
    #[error("Asset [{asset_id}] quantity could not be formatted: {source}")]
    Quantity {
        asset_id: AssetId,
        #[source]
        source: QuantityError
    },
    #[error("Asset table could not be loaded: {0}")]
    Table(String)
}

impl AssetError {
    pub fn unknown(asset_id: AssetId) -> Self {
        Self::UnknownAsset { asset_id }
    }

    pub fn quantity(asset_id: AssetId, source: QuantityError) -> Self {
        Self::Quantity { asset_id, source }
    }
}
