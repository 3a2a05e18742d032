use std::sync::Arc;

use crate::models::{
    ApplicationTransaction, AssetTransferTransaction, ExportRecord, OnCompletion, PaymentTransaction, RecordTag,
    Transaction, TransactionType,
};
use crate::types::{AssetId, ALGO_ASSET_ID};

pub const ACCOUNT: &str = "ACCOUNTAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
pub const OTHER: &str = "OTHERBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB";
pub const POOL: &str = "POOLCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCC";

/// 2021-09-01T00:00:00Z
pub const ROUND_TIME: i64 = 1_630_454_400;

pub fn transaction(id: &str, tx_type: TransactionType, sender: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        tx_type,
        sender: sender.to_string(),
        fee: 0,
        round_time: ROUND_TIME,
        confirmed_round: 1,
        group: Vec::new(),
        note: Vec::new(),
        inner_txns: Vec::new(),
        sender_rewards: 0,
        receiver_rewards: 0,
        close_rewards: 0,
        closing_amount: 0,
        payment_transaction: None,
        asset_transfer_transaction: None,
        application_transaction: None
    }
}

pub fn payment(id: &str, sender: &str, receiver: &str, amount: u64, fee: u64) -> Transaction {
    let mut transaction = transaction(id, TransactionType::Payment, sender);
    transaction.fee = fee;
    transaction.payment_transaction = Some(PaymentTransaction {
        amount,
        receiver: receiver.to_string(),
        close_amount: 0,
        close_remainder_to: None
    });
    transaction
}

pub fn asset_transfer(id: &str, sender: &str, receiver: &str, asset_id: AssetId, amount: u64, fee: u64) -> Transaction {
    let mut transaction = transaction(id, TransactionType::AssetTransfer, sender);
    transaction.fee = fee;
    transaction.asset_transfer_transaction = Some(AssetTransferTransaction {
        amount,
        asset_id,
        receiver: receiver.to_string(),
        close_amount: 0,
        close_to: None
    });
    transaction
}

pub fn app_call(id: &str, sender: &str, application_id: u64, on_completion: OnCompletion, args: &[&str], fee: u64) -> Transaction {
    let mut transaction = transaction(id, TransactionType::ApplicationCall, sender);
    transaction.fee = fee;
    transaction.application_transaction = Some(ApplicationTransaction {
        application_id,
        on_completion,
        application_args: args.iter().map(|arg| arg.as_bytes().to_vec()).collect()
    });
    transaction
}

pub fn grouped(transactions: Vec<Transaction>) -> Vec<Arc<Transaction>> {
    transactions.into_iter()
        .map(|mut transaction| {
            transaction.group = b"group-1".to_vec();
            Arc::new(transaction)
        })
        .collect()
}

pub fn record(tx_id: &str) -> ExportRecord {
    let transaction = Arc::new(payment(tx_id, OTHER, ACCOUNT, 0, 0));
    ExportRecord::new(&transaction, ACCOUNT, &RecordTag::Top)
}

pub fn deposit(tx_id: &str, asset_id: AssetId, quantity: u64, sender: &str) -> ExportRecord {
    let mut record = record(tx_id);
    record.received = quantity;
    record.received_asset = asset_id;
    record.sender = sender.to_string();
    record.receiver = ACCOUNT.to_string();
    record
}

pub fn withdrawal(tx_id: &str, asset_id: AssetId, quantity: u64, fee: u64, receiver: &str) -> ExportRecord {
    let mut record = record(tx_id);
    record.sent = quantity;
    record.sent_asset = asset_id;
    record.fee = fee;
    record.sender = ACCOUNT.to_string();
    record.receiver = receiver.to_string();
    record
}

pub fn fee_record(tx_id: &str, fee: u64) -> ExportRecord {
    let mut record = withdrawal(tx_id, ALGO_ASSET_ID, fee, fee, "");
    record.flags.fee_only = true;
    record
}

pub fn reward_record(tx_id: &str, quantity: u64) -> ExportRecord {
    let mut record = record(tx_id);
    record.received = quantity;
    record.receiver = ACCOUNT.to_string();
    record.flags.reward = true;
    record
}
