use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error};

use crate::actors::{AccountActor, ExportContext};
use crate::engine::EngineError;
use crate::models::{Transaction, TransactionPage};
use crate::storage::ExportStorage;
use crate::types::Address;

/// Fans an input stream of indexer pages out to one actor per account.
pub struct ExportEngine {
    context: Arc<ExportContext>,
    storage: Arc<ExportStorage>,
    backpressure: usize
}

impl ExportEngine {
    pub fn new(context: Arc<ExportContext>, storage: Arc<ExportStorage>) -> Self {
        Self {
            context,
            storage,
            backpressure: 256
        }
    }

    /// Exports every account found in the JSON lines file at `path`.
    pub async fn run(&self, path: &str) -> anyhow::Result<()> {
        let (sender, receiver) = mpsc::channel::<(Address, Transaction)>(self.backpressure);
        let reader_handle = self.spawn_page_reader(path.to_string(), sender);
        let processing_result = self.process_transactions(receiver).await;

        reader_handle.await??;

        processing_result
    }

    fn spawn_page_reader(&self, path: String, sender: mpsc::Sender<(Address, Transaction)>) -> JoinHandle<Result<(), EngineError>> {
        spawn_blocking(move || {
            let file = File::open(&path).map_err(|error| EngineError::io(&path, error))?;

            for (index, line) in BufReader::new(file).lines().enumerate() {
                let line = line.map_err(|error| EngineError::io(&path, error))?;

                if line.trim().is_empty() {
                    continue;
                }

                let page: TransactionPage = serde_json::from_str(&line)
                    .map_err(|source| EngineError::MalformedPage { line: index + 1, source })?;

                debug!("Page of [{}] transactions for account [{}] read", page.transactions.len(), page.account);

                for transaction in page.transactions {
                    //NOTE: The receiving side only hangs up after a fatal export error
                    if sender.blocking_send((page.account.clone(), transaction)).is_err() {
                        return Ok(());
                    }
                }
            }

            Ok(())
        })
    }

    async fn process_transactions(&self, mut receiver: mpsc::Receiver<(Address, Transaction)>) -> anyhow::Result<()> {
        let mut actors = HashMap::<Address, AccountActor>::new();

        //NOTE: Pages of one account arrive in chain order, and each account has exactly one actor
        while let Some((account, transaction)) = receiver.recv().await {
            let tx_id = transaction.id.clone();
            let actor = actors.entry(account.clone()).or_insert_with(|| {
                AccountActor::new(account.clone(), Arc::clone(&self.context), Arc::clone(&self.storage))
            });

            if !actor.accept(transaction) {
                error!("Account actor for [{account}] could not accept transaction [{tx_id}]");
                break;
            }
        }

        drop(receiver);

        //NOTE: Provide a graceful shutdown and wait for all actors to finish processing their individual queues
        let despawns = actors.into_values().map(|actor| actor.despawn());
        let mut failure = None;

        for result in join_all(despawns).await {
            if let Err(error) = result {
                error!("{error}");
                failure.get_or_insert(error);
            }
        }

        match failure {
            Some(error) => Err(error.into()),
            None => Ok(())
        }
    }
}
