use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::encoding;
use crate::types::{Address, ApplicationId, AssetId, MicroAlgos};

/// One page of an account's history as returned by the indexer's
/// `/v2/accounts/{address}/transactions` endpoint, tagged with the account it
/// was requested for.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionPage {
    pub account: Address,
    #[serde(default)]
    pub current_round: u64,
    #[serde(default)]
    pub next_token: Option<String>,
    #[serde(default)]
    pub transactions: Vec<Transaction>
}

/// A ledger transaction in the indexer's JSON representation.
///
/// Only the fields the export pipeline reads are modelled. Byte fields (`group`,
/// `note`, application arguments) arrive base64 encoded and are decoded on load.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Transaction {
    /// Inner transactions carry no id of their own.
    #[serde(default)]
    pub id: String,
    pub tx_type: TransactionType,
    #[serde(default)]
    pub sender: Address,
    #[serde(default)]
    pub fee: MicroAlgos,
    #[serde(default)]
    pub round_time: i64,
    #[serde(default)]
    pub confirmed_round: u64,
    #[serde(default, deserialize_with = "encoding::bytes")]
    pub group: Vec<u8>,
    #[serde(default, deserialize_with = "encoding::bytes")]
    pub note: Vec<u8>,
    /// Shared so records decomposed from an inner transaction can point at it.
    #[serde(default)]
    pub inner_txns: Vec<Arc<Transaction>>,
    #[serde(default)]
    pub sender_rewards: MicroAlgos,
    #[serde(default)]
    pub receiver_rewards: MicroAlgos,
    #[serde(default)]
    pub close_rewards: MicroAlgos,
    #[serde(default)]
    pub closing_amount: MicroAlgos,
    #[serde(default)]
    pub payment_transaction: Option<PaymentTransaction>,
    #[serde(default)]
    pub asset_transfer_transaction: Option<AssetTransferTransaction>,
    #[serde(default)]
    pub application_transaction: Option<ApplicationTransaction>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PaymentTransaction {
    #[serde(default)]
    pub amount: MicroAlgos,
    #[serde(default)]
    pub receiver: Address,
    #[serde(default)]
    pub close_amount: MicroAlgos,
    #[serde(default)]
    pub close_remainder_to: Option<Address>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssetTransferTransaction {
    #[serde(default)]
    pub amount: u64,
    pub asset_id: AssetId,
    #[serde(default)]
    pub receiver: Address,
    #[serde(default)]
    pub close_amount: u64,
    #[serde(default)]
    pub close_to: Option<Address>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationTransaction {
    #[serde(default)]
    pub application_id: ApplicationId,
    #[serde(default)]
    pub on_completion: OnCompletion,
    #[serde(default, deserialize_with = "encoding::bytes_list")]
    pub application_args: Vec<Vec<u8>>
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TransactionType {
    Payment,
    AssetTransfer,
    KeyRegistration,
    AssetConfig,
    AssetFreeze,
    ApplicationCall,
    Other(String)
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pay" => TransactionType::Payment,
            "axfer" => TransactionType::AssetTransfer,
            "keyreg" => TransactionType::KeyRegistration,
            "acfg" => TransactionType::AssetConfig,
            "afrz" => TransactionType::AssetFreeze,
            "appl" => TransactionType::ApplicationCall,
            _ => TransactionType::Other(value)
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let code = match self {
            TransactionType::Payment => "pay",
            TransactionType::AssetTransfer => "axfer",
            TransactionType::KeyRegistration => "keyreg",
            TransactionType::AssetConfig => "acfg",
            TransactionType::AssetFreeze => "afrz",
            TransactionType::ApplicationCall => "appl",
            TransactionType::Other(code) => code
        };
        formatter.write_str(code)
    }
}

/// Smart contract lifecycle action requested by an application call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum OnCompletion {
    #[default]
    NoOp,
    OptIn,
    CloseOut,
    Clear,
    Update,
    Delete,
    Other(String)
}

impl From<String> for OnCompletion {
    fn from(value: String) -> Self {
        match value.as_str() {
            "noop" => OnCompletion::NoOp,
            "optin" => OnCompletion::OptIn,
            "closeout" => OnCompletion::CloseOut,
            "clear" => OnCompletion::Clear,
            "update" => OnCompletion::Update,
            "delete" => OnCompletion::Delete,
            _ => OnCompletion::Other(value)
        }
    }
}

impl Display for OnCompletion {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let code = match self {
            OnCompletion::NoOp => "noop",
            OnCompletion::OptIn => "optin",
            OnCompletion::CloseOut => "closeout",
            OnCompletion::Clear => "clear",
            OnCompletion::Update => "update",
            OnCompletion::Delete => "delete",
            OnCompletion::Other(code) => code
        };
        formatter.write_str(code)
    }
}

impl Transaction {
    pub fn block_time(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.round_time, 0).unwrap_or_default()
    }

    pub fn group_id(&self) -> Option<&[u8]> {
        (!self.group.is_empty()).then_some(self.group.as_slice())
    }

    pub fn is_application_call(&self) -> bool {
        self.tx_type == TransactionType::ApplicationCall
    }

    /// Decoded note text, when the note is present and valid UTF-8.
    pub fn note_text(&self) -> Option<&str> {
        if self.note.is_empty() {
            return None;
        }
        std::str::from_utf8(&self.note).ok()
    }

    /// Collects every asset id moved by this transaction or its inner transactions.
    pub fn collect_assets(&self, assets: &mut BTreeSet<AssetId>) {
        if let Some(transfer) = &self.asset_transfer_transaction {
            assets.insert(transfer.asset_id);
        }
        for inner in &self.inner_txns {
            inner.collect_assets(assets);
        }
    }
}
