use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::Transaction;
use crate::types::{Address, AssetId, MicroAlgos, Quantity, ALGO_ASSET_ID};

/// Classification flags attached to a record.
///
/// The flags are not mutually exclusive; export formats resolve them through a
/// fixed priority when choosing the row's transaction kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFlags {
    pub airdrop: bool,
    pub application: bool,
    pub borrowing_fee: bool,
    pub expense_no_tax: bool,
    pub fee_only: bool,
    pub income_no_tax: bool,
    pub lending_income: bool,
    pub mining: bool,
    pub other_fee: bool,
    pub reward: bool,
    pub spend: bool,
    pub staking: bool,
    pub trade: bool
}

/// Identifies where a record came from beyond its transaction id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecordTag {
    /// A top-level transaction of the account's history.
    #[default]
    Top,
    /// An inner transaction. `path` holds sibling indexes innermost first, so the
    /// second inner transaction of `ABC` is `1-inner-ABC`.
    Inner {
        root: String,
        path: Vec<usize>
    },
    /// A record fabricated by an interpreter for a leg that never touched the chain.
    Synthetic(String)
}

impl RecordTag {
    /// Tag of the `index`-th inner transaction issued by a transaction tagged `self`
    /// whose own id is `parent_id`.
    pub fn child(&self, parent_id: &str, index: usize) -> RecordTag {
        match self {
            RecordTag::Inner { root, path } => {
                let mut path = path.clone();
                path.insert(0, index);
                RecordTag::Inner { root: root.clone(), path }
            }
            _ => RecordTag::Inner { root: parent_id.to_string(), path: vec![index] }
        }
    }

    /// Position of an inner transaction among its siblings.
    pub fn position(&self) -> Option<usize> {
        match self {
            RecordTag::Inner { path, .. } => path.first().copied(),
            _ => None
        }
    }

    pub fn is_top(&self) -> bool {
        matches!(self, RecordTag::Top)
    }
}

impl Display for RecordTag {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RecordTag::Top => Ok(()),
            RecordTag::Inner { root, path } => {
                for index in path {
                    write!(formatter, "{index}-")?;
                }
                write!(formatter, "inner-{root}")
            }
            RecordTag::Synthetic(id) => formatter.write_str(id)
        }
    }
}

/// A quantity in a currency the chain does not know about (e.g. the BTC side of a
/// goBTC mint), exported verbatim instead of the on-chain leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomAmount {
    pub quantity: Quantity,
    pub currency: String
}

impl CustomAmount {
    pub fn new(quantity: Quantity, currency: impl Into<String>) -> Self {
        Self { quantity, currency: currency.into() }
    }
}

/// A single send and/or receive event seen from one account.
///
/// Records are produced by decomposition, relabelled in place by interpreters and
/// classifiers, and consumed by an export format.
#[derive(Debug, Clone)]
pub struct ExportRecord {
    pub block_time: DateTime<Utc>,
    pub tag: RecordTag,
    pub tx_id: String,
    /// The account being exported.
    pub account: Address,
    pub received: u64,
    pub received_asset: AssetId,
    pub sent: u64,
    pub sent_asset: AssetId,
    /// Transaction fee, always in microAlgos.
    pub fee: MicroAlgos,
    pub sender: Address,
    pub receiver: Address,
    pub flags: RecordFlags,
    pub comment: String,
    pub received_custom: Option<CustomAmount>,
    pub sent_custom: Option<CustomAmount>,
    pub fee_custom: Option<CustomAmount>,
    pub raw: Arc<Transaction>
}

impl ExportRecord {
    /// Creates an empty record for `transaction` owned by `account`.
    ///
    /// Inner transactions have no id of their own and borrow the id of the
    /// top-level transaction that issued them.
    pub fn new(transaction: &Arc<Transaction>, account: &str, tag: &RecordTag) -> Self {
        let tx_id = match tag {
            RecordTag::Inner { root, .. } if transaction.id.is_empty() => root.clone(),
            _ => transaction.id.clone()
        };

        Self {
            block_time: transaction.block_time(),
            tag: tag.clone(),
            tx_id,
            account: account.to_string(),
            received: 0,
            received_asset: ALGO_ASSET_ID,
            sent: 0,
            sent_asset: ALGO_ASSET_ID,
            fee: 0,
            sender: String::new(),
            receiver: String::new(),
            flags: RecordFlags::default(),
            comment: String::new(),
            received_custom: None,
            sent_custom: None,
            fee_custom: None,
            raw: Arc::clone(transaction)
        }
    }

    /// A copy of this record with every value leg and flag cleared, tagged as a
    /// synthetic record. Interpreters fill in the leg they fabricate.
    pub fn synthetic(&self, id: String, comment: impl Into<String>) -> Self {
        Self {
            tag: RecordTag::Synthetic(id),
            received: 0,
            received_asset: ALGO_ASSET_ID,
            sent: 0,
            sent_asset: ALGO_ASSET_ID,
            fee: 0,
            flags: RecordFlags::default(),
            comment: comment.into(),
            received_custom: None,
            sent_custom: None,
            fee_custom: None,
            ..self.clone()
        }
    }

    /// Nothing received, nothing sent, no fee.
    pub fn is_empty(&self) -> bool {
        self.received == 0 && self.sent == 0 && self.fee == 0
    }

    /// Collapses a self-transfer: the smaller leg is netted into the larger one so
    /// at most one leg stays nonzero.
    pub fn net(&mut self) {
        if self.sent == 0 || self.received == 0 {
            return;
        }

        if self.sent >= self.received {
            self.sent -= self.received;
            self.received = 0;
        } else {
            self.received -= self.sent;
            self.sent = 0;
        }
    }

    pub fn is_deposit(&self) -> bool {
        self.received != 0 && self.sent == 0
    }

    pub fn is_withdrawal(&self) -> bool {
        self.received == 0 && self.sent != 0
    }

    pub fn is_reward(&self) -> bool {
        self.flags.reward
    }

    pub fn is_algo_deposit(&self) -> bool {
        self.received_asset == ALGO_ASSET_ID && self.is_deposit()
    }

    pub fn is_asa_deposit(&self) -> bool {
        self.received_asset != ALGO_ASSET_ID && self.is_deposit()
    }

    /// Whether the counterparty of this record is someone other than the account itself.
    pub fn is_from_other(&self) -> bool {
        self.sender != self.account
    }
}

impl Display for ExportRecord {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "| tag: {} | tx: {} | recv: {} {} | sent: {} {} | fee: {} | sender: {} | receiver: {} | comment: {}",
            self.tag,
            self.tx_id,
            self.received,
            self.received_asset,
            self.sent,
            self.sent_asset,
            self.fee,
            self.sender,
            self.receiver,
            self.comment
        )
    }
}
