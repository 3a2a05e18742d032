use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::assets::{AssetError, AssetInfo, AssetSource};
use crate::types::{AssetId, MAX_ASSET_DECIMALS};

/// Asset metadata loaded from a CSV table (`asset_id,decimals,unit_name,name`).
#[derive(Debug, Default)]
pub struct AssetTable {
    assets: HashMap<AssetId, AssetInfo>
}

impl AssetTable {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|error| AssetError::Table(format!("{}: {error}", path.display())))?;

        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AssetError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(reader);

        let assets = reader.deserialize::<AssetInfo>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| AssetError::Table(error.to_string()))?;

        Ok(Self::from_assets(assets))
    }

    pub fn from_assets(assets: impl IntoIterator<Item = AssetInfo>) -> Self {
        Self {
            assets: assets.into_iter().map(|asset| (asset.asset_id, asset)).collect()
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }
}

impl AssetSource for AssetTable {
    fn fetch(&self, asset_id: AssetId) -> Result<AssetInfo, AssetError> {
        let asset = self.assets.get(&asset_id).ok_or_else(|| AssetError::unknown(asset_id))?;

        if asset.decimals > MAX_ASSET_DECIMALS {
            return Err(AssetError::InvalidDecimals { asset_id, decimals: asset.decimals });
        }

        Ok(asset.clone())
    }
}
