use thiserror::Error;
use tokio::task::JoinError;

use crate::assets::AssetError;
use crate::pipeline::ExportError;
use crate::types::Address;

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("Export of account [{account}] failed: {source}")]
    Export {
        account: Address,
        #[source]
        source: ExportError
    },
    #[error("Asset lookup for account [{account}] failed: {source}")]
    Asset {
        account: Address,
        #[source]
        source: AssetError
    },
    #[error("Account actor did not finish: {0}")]
    Join(#[from] JoinError)
}

impl ActorError {
    pub fn export(account: &str, source: ExportError) -> Self {
        Self::Export { account: account.to_string(), source }
    }

    pub fn asset(account: &str, source: AssetError) -> Self {
        Self::Asset { account: account.to_string(), source }
    }
}
