use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::actors::{ActorError, ExportContext};
use crate::assets::AssetBook;
use crate::models::Transaction;
use crate::pipeline::{AccountExporter, Batch, GroupBuffer};
use crate::storage::{AccountExport, Storage};
use crate::types::Address;

/// Exports one account. Transactions are processed strictly in the order they
/// are accepted; the finished export is saved to storage when the actor stops.
pub struct AccountActor {
    sender: mpsc::UnboundedSender<Transaction>,
    handle: JoinHandle<Result<(), ActorError>>
}

/// State owned by the actor's task.
struct Worker {
    context: Arc<ExportContext>,
    exporter: AccountExporter,
    assets: AssetBook,
    buffer: GroupBuffer
}

impl AccountActor {
    /// Spawns a new actor for `account`.
    pub fn new<S: Storage>(account: Address, context: Arc<ExportContext>, storage: Arc<S>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = spawn(run(account, context, storage, receiver));

        Self { sender, handle }
    }

    /// Queues a transaction. Returns `false` once the actor has stopped.
    pub fn accept(&self, transaction: Transaction) -> bool {
        self.sender.send(transaction).is_ok()
    }

    /// Closes the queue and waits for the actor to drain it.
    pub async fn despawn(self) -> Result<(), ActorError> {
        drop(self.sender);
        self.handle.await?
    }
}

async fn run<S: Storage>(
    account: Address,
    context: Arc<ExportContext>,
    storage: Arc<S>,
    mut receiver: mpsc::UnboundedReceiver<Transaction>
) -> Result<(), ActorError> {
    let mut export = storage.load(&account).unwrap_or_else(|| AccountExport::new(account.clone()));
    let mut worker = Worker {
        exporter: AccountExporter::new(account.clone(), Arc::clone(&context.pipeline)),
        assets: AssetBook::new(context.verified()),
        buffer: GroupBuffer::new(),
        context
    };

    let outcome = consume(&mut worker, &mut receiver, &mut export).await;

    debug!("Account [{account}] closed with lending positions {:?}", worker.exporter.ledger());
    info!("Account [{account}] exported [{}] rows", export.rows.len());
    //NOTE: Rows produced before a failure are saved as well
    storage.save(export);

    outcome
}

async fn consume(
    worker: &mut Worker,
    receiver: &mut mpsc::UnboundedReceiver<Transaction>,
    export: &mut AccountExport
) -> Result<(), ActorError> {
    while let Some(transaction) = receiver.recv().await {
        for batch in worker.buffer.push(transaction) {
            worker.export_batch(&batch, export).await?;
        }
    }

    if let Some(batch) = worker.buffer.flush() {
        worker.export_batch(&batch, export).await?;
    }

    Ok(())
}

impl Worker {
    async fn export_batch(&mut self, batch: &Batch, export: &mut AccountExport) -> Result<(), ActorError> {
        let account = self.exporter.account().to_string();

        let mut asset_ids = BTreeSet::new();
        for transaction in batch {
            transaction.collect_assets(&mut asset_ids);
        }

        self.assets.load(&self.context.catalog, asset_ids).await
            .map_err(|error| ActorError::asset(&account, error))?;

        let records = self.exporter.export_batch(batch, &self.assets)
            .map_err(|error| ActorError::export(&account, error))?;

        debug!("Account [{account}] batch of [{}] transactions produced [{}] records", batch.len(), records.len());

        for record in records {
            let row = self.context.format.write_record(&self.assets, &record)
                .map_err(|error| ActorError::asset(&account, error))?;
            export.rows.push(row);
            export.records.push(record);
        }

        Ok(())
    }
}
