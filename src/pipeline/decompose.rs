use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::{ExportRecord, RecordTag, Transaction, TransactionType};
use crate::pipeline::ExportError;
use crate::types::{MicroAlgos, ALGO_ASSET_ID};

/// Splits one transaction into the send/receive records it means for `account`.
///
/// Records are netted and all-zero records dropped as they are appended. Pending
/// rewards credited by the transaction become a standalone reward record stamped
/// one second before the transaction, so the balance covers what follows.
pub fn decompose(transaction: &Arc<Transaction>, account: &str, tag: &RecordTag) -> Result<Vec<ExportRecord>, ExportError> {
    let mut records = Vec::new();

    let rewards = match &transaction.tx_type {
        TransactionType::Payment => decompose_payment(transaction, account, tag, &mut records)?,
        TransactionType::AssetTransfer => decompose_asset_transfer(transaction, account, tag, &mut records)?,
        TransactionType::KeyRegistration
        | TransactionType::AssetConfig
        | TransactionType::AssetFreeze
        | TransactionType::ApplicationCall => decompose_fee_only(transaction, account, tag, &mut records),
        TransactionType::Other(_) => return Err(ExportError::unsupported_type(transaction))
    };

    if rewards > 0 {
        let mut record = ExportRecord::new(transaction, account, tag);
        record.block_time = shift(record.block_time, -1);
        record.received = rewards;
        record.receiver = account.to_string();
        record.flags.reward = true;
        append(&mut records, record);
    }

    Ok(records)
}

fn decompose_payment(transaction: &Arc<Transaction>, account: &str, tag: &RecordTag, records: &mut Vec<ExportRecord>) -> Result<MicroAlgos, ExportError> {
    let payment = transaction.payment_transaction.as_ref()
        .ok_or_else(|| ExportError::missing_payload(transaction))?;

    let close_to = payment.close_remainder_to.as_deref().filter(|address| !address.is_empty());
    //NOTE: Older indexer responses only report the closed amount at the top level
    let close_amount = if payment.close_amount != 0 { payment.close_amount } else { transaction.closing_amount };

    let is_sender = transaction.sender == account;
    let is_receiver = payment.receiver == account;
    let is_close_to = close_to == Some(account);
    let mut rewards: MicroAlgos = 0;

    if is_receiver || is_close_to {
        let mut record = ExportRecord::new(transaction, account, tag);
        record.sender = transaction.sender.clone();
        record.receiver = account.to_string();

        if is_receiver {
            record.received = record.received.saturating_add(payment.amount);
            rewards = rewards.saturating_add(transaction.receiver_rewards);
        }
        if is_close_to {
            record.received = record.received.saturating_add(close_amount);
            rewards = rewards.saturating_add(transaction.close_rewards);
        }
        if is_sender {
            record.sent = payment.amount.saturating_add(transaction.fee);
            rewards = rewards.saturating_add(transaction.sender_rewards);
        }
        if is_sender || !is_receiver {
            record.fee = transaction.fee;
        }

        append(records, record);
        return Ok(rewards);
    }

    if !is_sender {
        return Ok(0);
    }

    match close_to {
        Some(close_to) if close_to != payment.receiver => {
            let mut closing = sent_record(transaction, account, tag, close_to);
            closing.sent = close_amount;
            append(records, closing);

            let mut paying = sent_record(transaction, account, tag, &payment.receiver);
            paying.block_time = shift(paying.block_time, 1);
            paying.sent = payment.amount.saturating_add(transaction.fee);
            paying.fee = transaction.fee;
            append(records, paying);
        }
        _ => {
            let mut record = sent_record(transaction, account, tag, &payment.receiver);
            record.sent = payment.amount
                .saturating_add(close_amount)
                .saturating_add(transaction.fee);
            record.fee = transaction.fee;
            append(records, record);
        }
    }

    Ok(transaction.sender_rewards)
}

fn decompose_asset_transfer(transaction: &Arc<Transaction>, account: &str, tag: &RecordTag, records: &mut Vec<ExportRecord>) -> Result<MicroAlgos, ExportError> {
    let transfer = transaction.asset_transfer_transaction.as_ref()
        .ok_or_else(|| ExportError::missing_payload(transaction))?;

    let close_to = transfer.close_to.as_deref().filter(|address| !address.is_empty());
    let is_sender = transaction.sender == account;
    let is_receiver = transfer.receiver == account;
    let is_close_to = close_to == Some(account);
    let mut rewards: MicroAlgos = 0;

    if is_receiver || is_close_to {
        let mut record = ExportRecord::new(transaction, account, tag);
        record.sender = transaction.sender.clone();
        record.receiver = account.to_string();
        record.received_asset = transfer.asset_id;
        record.sent_asset = transfer.asset_id;

        if is_receiver {
            record.received = record.received.saturating_add(transfer.amount);
            rewards = rewards.saturating_add(transaction.receiver_rewards);
        }
        if is_close_to {
            record.received = record.received.saturating_add(transfer.close_amount);
            rewards = rewards.saturating_add(transaction.close_rewards);
        }
        if is_sender {
            record.sent = transfer.amount;
            rewards = rewards.saturating_add(transaction.sender_rewards);
        }

        append(records, record);
    } else if is_sender {
        rewards = transaction.sender_rewards;

        match close_to {
            Some(close_to) if close_to != transfer.receiver => {
                let mut closing = sent_record(transaction, account, tag, close_to);
                closing.sent = transfer.close_amount;
                closing.sent_asset = transfer.asset_id;
                append(records, closing);

                let mut sending = sent_record(transaction, account, tag, &transfer.receiver);
                sending.block_time = shift(sending.block_time, 1);
                sending.sent = transfer.amount;
                sending.sent_asset = transfer.asset_id;
                append(records, sending);
            }
            _ => {
                let mut record = sent_record(transaction, account, tag, &transfer.receiver);
                record.sent = transfer.amount.saturating_add(transfer.close_amount);
                record.sent_asset = transfer.asset_id;
                append(records, record);
            }
        }
    }

    //NOTE: The fee is paid in ALGO, so it cannot share a record with the asset legs
    if is_sender {
        append(records, fee_record(transaction, account, tag));
    }

    Ok(rewards)
}

fn decompose_fee_only(transaction: &Arc<Transaction>, account: &str, tag: &RecordTag, records: &mut Vec<ExportRecord>) -> MicroAlgos {
    if transaction.sender != account {
        return 0;
    }

    append(records, fee_record(transaction, account, tag));
    transaction.sender_rewards
}

fn sent_record(transaction: &Arc<Transaction>, account: &str, tag: &RecordTag, receiver: &str) -> ExportRecord {
    let mut record = ExportRecord::new(transaction, account, tag);
    record.sender = account.to_string();
    record.receiver = receiver.to_string();
    record
}

fn fee_record(transaction: &Arc<Transaction>, account: &str, tag: &RecordTag) -> ExportRecord {
    let mut record = ExportRecord::new(transaction, account, tag);
    record.sender = account.to_string();
    record.sent = transaction.fee;
    record.sent_asset = ALGO_ASSET_ID;
    record.fee = transaction.fee;
    record.flags.fee_only = true;
    record
}

fn append(records: &mut Vec<ExportRecord>, mut record: ExportRecord) {
    record.net();

    if !record.is_empty() {
        records.push(record);
    }
}

fn shift(time: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    time.checked_add_signed(TimeDelta::seconds(seconds)).unwrap_or(time)
}
