mod cointracking;
mod errors;
mod koinly;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::assets::{AssetBook, AssetError};
use crate::config::ExportConfig;
use crate::models::{CustomAmount, ExportRecord};
use crate::types::{AssetId, ALGO_ASSET_ID, ALGO_UNIT_NAME};

pub use cointracking::Cointracking;
pub use errors::FormatError;
pub use koinly::Koinly;

pub const FORMATS: [&str; 2] = ["cointracking", "koinly"];

/// A tax tracker's CSV import dialect.
pub trait ExportFormat: Send + Sync {
    fn name(&self) -> &'static str;

    fn header(&self) -> &'static str;

    /// Renders one record as a CSV row, without the line terminator.
    fn write_record(&self, assets: &AssetBook, record: &ExportRecord) -> Result<String, AssetError>;
}

/// Looks up a format by its command line name.
pub fn lookup(name: &str, config: &ExportConfig) -> Result<Arc<dyn ExportFormat>, FormatError> {
    match name.to_lowercase().as_str() {
        "cointracking" => Ok(Arc::new(Cointracking::new(config.exchange.clone()))),
        "koinly" => Ok(Arc::new(Koinly)),
        _ => Err(FormatError::UnknownFormat { name: name.to_string(), available: FORMATS.join(", ") })
    }
}

/// Amount and currency of one side of a row. Custom amounts replace the
/// on-chain leg; an empty leg renders as two blank cells.
fn leg(
    assets: &AssetBook,
    custom: Option<&CustomAmount>,
    quantity: u64,
    asset_id: AssetId,
    currency: impl Fn(AssetId) -> Result<String, AssetError>
) -> Result<(String, String), AssetError> {
    if let Some(custom) = custom {
        return Ok((custom.quantity.to_string(), cell(&custom.currency)));
    }

    if quantity == 0 {
        return Ok((String::new(), String::new()));
    }

    Ok((assets.quantity(quantity, asset_id)?.to_string(), cell(&currency(asset_id)?)))
}

/// A free-text cell, quoted only when its content would split or break the row.
fn cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(value)
    } else {
        value.to_string()
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// The fee cells; on-chain fees are always ALGO.
fn fee_leg(assets: &AssetBook, record: &ExportRecord) -> Result<(String, String), AssetError> {
    leg(assets, record.fee_custom.as_ref(), record.fee, ALGO_ASSET_ID, |_| Ok(ALGO_UNIT_NAME.to_string()))
}

fn has_received(record: &ExportRecord) -> bool {
    record.received_custom.is_some() || record.received != 0
}

fn has_sent(record: &ExportRecord) -> bool {
    record.sent_custom.is_some() || record.sent != 0
}

/// Row id: the tag when the record has one, else the transaction id.
fn record_id(record: &ExportRecord) -> String {
    if record.tag.is_top() {
        record.tx_id.clone()
    } else {
        record.tag.to_string()
    }
}
