mod errors;
mod quantity;

pub use errors::QuantityError;
pub use quantity::Quantity;

pub type Address = String;
pub type AssetId = u64;
pub type ApplicationId = u64;
pub type MicroAlgos = u64;

/// Asset id the indexer reports for the chain's native asset.
pub const ALGO_ASSET_ID: AssetId = 0;
pub const ALGO_UNIT_NAME: &str = "ALGO";
pub const ALGO_DECIMALS: u32 = 6;
/// Upper bound the ledger allows for ASA decimal precision.
pub const MAX_ASSET_DECIMALS: u32 = 19;
