mod defaults;
mod errors;
#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::interpreters::Protocol;
use crate::types::{Address, ApplicationId, AssetId, Quantity, MAX_ASSET_DECIMALS};

pub use errors::ConfigError;

/// Address tables, application registry and behaviour switches of an export run.
///
/// Every field has a mainnet default; a TOML file only needs to name what it
/// overrides. Lists replace the default list entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExportConfig {
    /// Treat interpreter and classifier failures as fatal instead of exporting the
    /// group's records unlabeled.
    pub strict: bool,
    /// Constant written to the exchange column.
    pub exchange: String,
    /// Application argument that makes action extraction move on to the next call.
    pub action_skip_marker: String,
    pub verified_assets: Vec<VerifiedAsset>,
    pub applications: Vec<ApplicationEntry>,
    pub airdrops: AirdropConfig,
    pub mining: Vec<MiningSource>,
    pub governance: GovernanceConfig,
    pub staking_services: Vec<StakingService>,
    /// Unit names of the assets the lending ledger tracks.
    pub lending_markets: Vec<String>,
    pub algomint: AlgomintConfig
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VerifiedAsset {
    pub asset_id: AssetId,
    /// Ticker override for trackers that list several coins under the unit name.
    #[serde(default)]
    pub symbol: Option<String>
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationEntry {
    pub id: ApplicationId,
    pub protocol: Protocol
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AirdropConfig {
    pub distributors: Vec<AirdropDistributor>,
    /// Note fragments left by airdrop tools.
    pub tool_markers: Vec<String>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AirdropDistributor {
    pub address: Address,
    #[serde(default)]
    pub asset_id: Option<AssetId>,
    pub label: String
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MiningSource {
    pub address: Address,
    pub asset_id: AssetId,
    #[serde(default)]
    pub comment: String
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GovernanceConfig {
    pub note_prefix: String,
    pub periods: Vec<GovernancePeriod>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GovernancePeriod {
    pub period: u32,
    pub address: Address
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StakingService {
    pub address: Address,
    pub comment: String
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AlgomintConfig {
    pub address: Address,
    /// Percentage charged on mint and burn, as a fraction (`0.002`).
    pub fee_rate: Quantity,
    /// Mints confirmed after this instant pay the minting fee.
    pub fee_effective: DateTime<Utc>,
    pub assets: Vec<WrappedAsset>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WrappedAsset {
    pub asset_id: AssetId,
    /// Name of the wrapped token on chain (`goBTC`).
    pub symbol: String,
    /// Currency of the coin on its native chain (`BTC`).
    pub currency: String,
    /// Fixed network fee per mint or unlock, in `currency`.
    pub network_fee: Quantity,
    /// Fractional digits of the native coin.
    pub fractional_digits: u32
}

impl ExportConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ExportConfig = toml::from_str(content)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.action_skip_marker.is_empty() {
            return Err(ConfigError::invalid("action-skip-marker must not be empty"));
        }

        let rate = self.algomint.fee_rate;
        if rate >= Quantity::one() {
            return Err(ConfigError::invalid(format!("algomint fee-rate [{rate}] must be below 1")));
        }

        for asset in &self.algomint.assets {
            if asset.fractional_digits > MAX_ASSET_DECIMALS {
                return Err(ConfigError::invalid(format!(
                    "algomint asset [{}] declares [{}] fractional digits", asset.symbol, asset.fractional_digits
                )));
            }
        }

        let mut seen = HashMap::new();
        for entry in &self.applications {
            if let Some(previous) = seen.insert(entry.id, &entry.protocol) {
                if previous != &entry.protocol {
                    return Err(ConfigError::invalid(format!("application [{}] is mapped to two protocols", entry.id)));
                }
            }
        }

        Ok(())
    }

    /// Verified asset ids with their optional ticker override.
    pub fn verified_symbols(&self) -> HashMap<AssetId, Option<String>> {
        self.verified_assets.iter()
            .map(|asset| (asset.asset_id, asset.symbol.clone().filter(|symbol| !symbol.is_empty())))
            .collect()
    }

    pub fn is_lending_market(&self, unit_name: &str) -> bool {
        self.lending_markets.iter().any(|market| market == unit_name)
    }

    pub fn wrapped_asset(&self, asset_id: AssetId) -> Option<&WrappedAsset> {
        self.algomint.assets.iter().find(|asset| asset.asset_id == asset_id)
    }
}
