use std::sync::Arc;

use tracing::{debug, warn};

use crate::assets::AssetBook;
use crate::interpreters::{GroupContext, Interpreter, LendingLedger};
use crate::models::{ExportRecord, Transaction};
use crate::pipeline::{decompose_group, ExportError, Pipeline};
use crate::types::Address;

/// Turns one account's batches into labelled export records.
///
/// Owns the account's lending ledger, so batches must be fed in chain order.
pub struct AccountExporter {
    account: Address,
    pipeline: Arc<Pipeline>,
    ledger: LendingLedger
}

impl AccountExporter {
    pub fn new(account: Address, pipeline: Arc<Pipeline>) -> Self {
        Self {
            account,
            pipeline,
            ledger: LendingLedger::default()
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn ledger(&self) -> &LendingLedger {
        &self.ledger
    }

    /// Decomposes, interprets and classifies one batch. `assets` must already hold
    /// every asset the batch moves.
    pub fn export_batch(&mut self, batch: &[Arc<Transaction>], assets: &AssetBook) -> Result<Vec<ExportRecord>, ExportError> {
        let mut records = decompose_group(batch, &self.account)?;

        if records.is_empty() {
            return Ok(records);
        }

        let pipeline = Arc::clone(&self.pipeline);
        let config = pipeline.config();
        let group = GroupContext::new(batch, &self.account, assets, config);

        if let Some(interpreter) = pipeline.registry().select(&group, &records) {
            return interpret(interpreter, &group, records, &mut self.ledger, config.strict);
        }

        match pipeline.classifiers().classify(&mut records) {
            Ok(Some(classifier)) => debug!("Group [{}] classified by [{classifier}]", group.describe()),
            Ok(None) => {}
            Err(error) if config.strict => return Err(error.into()),
            Err(error) => warn!("{error} | exporting group [{}] unlabeled", group.describe())
        }

        Ok(records)
    }
}

/// Runs `interpreter` against a scratch copy of the ledger, committing it only when
/// the group was understood.
fn interpret(
    interpreter: &dyn Interpreter,
    group: &GroupContext<'_>,
    records: Vec<ExportRecord>,
    ledger: &mut LendingLedger,
    strict: bool
) -> Result<Vec<ExportRecord>, ExportError> {
    let mut scratch = ledger.clone();

    match interpreter.interpret(group, records.clone(), &mut scratch) {
        Ok(processed) => {
            debug!("Group [{}] interpreted by [{}] into [{}] records", group.describe(), interpreter.name(), processed.len());
            *ledger = scratch;
            Ok(processed)
        }
        Err(error) if strict || !error.is_recoverable() => Err(error.into()),
        Err(error) => {
            warn!("{error} | exporting group [{}] unlabeled", group.describe());
            Ok(records)
        }
    }
}
