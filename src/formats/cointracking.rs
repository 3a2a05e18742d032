use crate::assets::{AssetBook, AssetError};
use crate::formats::{cell, fee_leg, has_received, has_sent, leg, quoted, record_id, ExportFormat};
use crate::models::ExportRecord;
use crate::types::{AssetId, ALGO_ASSET_ID};

/// CoinTracking custom CSV import.
///
/// https://cointracking.info/import/import_csv/
pub struct Cointracking {
    exchange: String
}

impl Cointracking {
    pub fn new(exchange: String) -> Self {
        Self { exchange }
    }
}

/// Transaction type column. Flags win over the direction of the legs, in this order.
fn kind(record: &ExportRecord) -> &'static str {
    let flags = &record.flags;

    if flags.airdrop {
        "Airdrop"
    } else if flags.fee_only || flags.other_fee {
        "Other Fee"
    } else if flags.mining {
        "Mining"
    } else if flags.reward {
        "Reward / Bonus"
    } else if flags.spend {
        "Spend"
    } else if flags.staking {
        "Staking"
    } else if flags.lending_income {
        "Lending Income"
    } else if flags.borrowing_fee {
        "Borrowing Fee"
    } else if flags.income_no_tax {
        "Income (non taxable)"
    } else if flags.expense_no_tax {
        "Expense (non taxable)"
    } else if has_received(record) && has_sent(record) {
        "Trade"
    } else if has_received(record) {
        "Deposit"
    } else {
        "Withdrawal"
    }
}

fn suffix(record: &ExportRecord) -> &'static str {
    let flags = &record.flags;

    if flags.airdrop {
        "_airdrop"
    } else if flags.application {
        "_appl"
    } else if flags.fee_only {
        "_fee"
    } else if flags.mining {
        "_mining"
    } else if flags.reward {
        "_reward"
    } else {
        ""
    }
}

fn comment(assets: &AssetBook, record: &ExportRecord) -> Result<String, AssetError> {
    let mut parts = Vec::new();

    if record.received_asset != ALGO_ASSET_ID {
        parts.push(assets.annotation(record.received_asset)?);
    }
    if record.sent_asset != ALGO_ASSET_ID && record.sent_asset != record.received_asset {
        parts.push(assets.annotation(record.sent_asset)?);
    }
    parts.push(record.comment.clone());
    parts.retain(|part| !part.is_empty());

    Ok(quoted(&parts.join(" | ")))
}

impl ExportFormat for Cointracking {
    fn name(&self) -> &'static str {
        "cointracking"
    }

    fn header(&self) -> &'static str {
        "Type,Buy Amount,Buy Currency,Sell Amount,Sell Currency,Fee,Fee Currency,Exchange,Trade-Group,Comment,Date,Tx-ID"
    }

    fn write_record(&self, assets: &AssetBook, record: &ExportRecord) -> Result<String, AssetError> {
        let currency = |asset_id: AssetId| assets.currency(asset_id);

        let (buy, buy_currency) = leg(assets, record.received_custom.as_ref(), record.received, record.received_asset, currency)?;
        let (sell, sell_currency) = leg(assets, record.sent_custom.as_ref(), record.sent, record.sent_asset, currency)?;
        let (fee, fee_currency) = fee_leg(assets, record)?;
        let account = record.account.get(..10).unwrap_or(&record.account);

        Ok(format!(
            "{},{buy},{buy_currency},{sell},{sell_currency},{fee},{fee_currency},{},{},{},{},{}_{account}{}",
            kind(record),
            cell(&self.exchange),
            record.account,
            comment(assets, record)?,
            record.block_time.format("%Y-%m-%dT%H:%M:%SZ"),
            record_id(record),
            suffix(record)
        ))
    }
}
