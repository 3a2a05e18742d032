use thiserror::Error;

use crate::assets::AssetError;
use crate::classifiers::ClassifyError;
use crate::interpreters::InterpretError;
use crate::models::Transaction;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Transaction [{tx_id}] has unsupported type [{tx_type}]")]
    UnsupportedTransactionType {
        tx_id: String,
        tx_type: String
    },
    #[error("Transaction [{tx_id}] of type [{tx_type}] carries no payload")]
    MissingPayload {
        tx_id: String,
        tx_type: String
    },
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("Group interpretation failed: {0}")]
    Interpret(#[from] InterpretError),
    #[error("Group classification failed: {0}")]
    Classify(#[from] ClassifyError)
}

impl ExportError {
    pub fn unsupported_type(transaction: &Transaction) -> Self {
        Self::UnsupportedTransactionType {
            tx_id: transaction.id.clone(),
            tx_type: transaction.tx_type.to_string()
        }
    }

    pub fn missing_payload(transaction: &Transaction) -> Self {
        Self::MissingPayload {
            tx_id: transaction.id.clone(),
            tx_type: transaction.tx_type.to_string()
        }
    }
}
