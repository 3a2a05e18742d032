use crate::assets::{AssetBook, AssetError};
use crate::formats::{fee_leg, leg, record_id, ExportFormat};
use crate::models::ExportRecord;
use crate::types::{AssetId, ALGO_ASSET_ID, ALGO_UNIT_NAME};

/// Koinly universal CSV import. Assets are identified as `ASA-<id>`.
pub struct Koinly;

fn currency(asset_id: AssetId) -> Result<String, AssetError> {
    if asset_id == ALGO_ASSET_ID {
        return Ok(ALGO_UNIT_NAME.to_string());
    }
    Ok(format!("ASA-{asset_id}"))
}

impl ExportFormat for Koinly {
    fn name(&self) -> &'static str {
        "koinly"
    }

    fn header(&self) -> &'static str {
        "Date,Sent Amount,Sent Currency,Received Amount,Received Currency,Fee Amount,Fee Currency,Net Worth Amount,Net Worth Currency,Label,Description,TxHash"
    }

    fn write_record(&self, assets: &AssetBook, record: &ExportRecord) -> Result<String, AssetError> {
        let (sent, sent_currency) = leg(assets, record.sent_custom.as_ref(), record.sent, record.sent_asset, currency)?;
        let (received, received_currency) = leg(assets, record.received_custom.as_ref(), record.received, record.received_asset, currency)?;
        let (fee, fee_currency) = fee_leg(assets, record)?;

        let (label, tx_hash) = if record.is_reward() {
            ("staking", format!("reward-{}", record_id(record)))
        } else {
            ("", record_id(record))
        };

        Ok(format!(
            "{},{sent},{sent_currency},{received},{received_currency},{fee},{fee_currency},,,{label},,{tx_hash}",
            record.block_time.format("%Y-%m-%d %H:%M:%S UTC")
        ))
    }
}
