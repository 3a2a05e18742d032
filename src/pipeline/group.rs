use std::mem;
use std::sync::Arc;

use crate::models::{ExportRecord, RecordTag, Transaction};
use crate::pipeline::{decompose, ExportError};

pub type Batch = Vec<Arc<Transaction>>;

/// Cuts an account's ordered transaction stream into batches.
///
/// Consecutive transactions sharing a group id form one batch. An ungrouped
/// transaction closes the pending group and is a batch of its own.
#[derive(Debug, Default)]
pub struct GroupBuffer {
    pending: Batch
}

impl GroupBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts the next transaction and returns the batches it completed, in order.
    pub fn push(&mut self, transaction: Transaction) -> Vec<Batch> {
        let transaction = Arc::new(transaction);
        let mut completed = Vec::new();

        let Some(group) = transaction.group_id() else {
            completed.extend(self.flush());
            completed.push(vec![transaction]);
            return completed;
        };

        let same_group = self.pending.first().is_some_and(|first| first.group_id() == Some(group));

        if !same_group {
            completed.extend(self.flush());
        }

        self.pending.push(transaction);
        completed
    }

    /// Releases the pending group at the end of the stream.
    pub fn flush(&mut self) -> Option<Batch> {
        if self.pending.is_empty() {
            return None;
        }
        Some(mem::take(&mut self.pending))
    }
}

/// Decomposes a batch for `account`. Inner transactions are visited depth-first
/// and contribute their records before the transaction that issued them.
pub fn decompose_group(batch: &[Arc<Transaction>], account: &str) -> Result<Vec<ExportRecord>, ExportError> {
    let mut records = Vec::new();

    for transaction in batch {
        decompose_tree(transaction, account, &RecordTag::Top, &mut records)?;
    }

    Ok(records)
}

fn decompose_tree(transaction: &Arc<Transaction>, account: &str, tag: &RecordTag, records: &mut Vec<ExportRecord>) -> Result<(), ExportError> {
    for (index, inner) in transaction.inner_txns.iter().enumerate() {
        decompose_tree(inner, account, &tag.child(&transaction.id, index), records)?;
    }

    records.extend(decompose(transaction, account, tag)?);

    Ok(())
}
