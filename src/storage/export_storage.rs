use std::sync::Arc;

use dashmap::DashMap;

use crate::storage::{AccountExport, Storage};
use crate::types::Address;

/// Finished exports of every account worker, shared across the engine.
pub struct ExportStorage {
    exports: Arc<DashMap<Address, AccountExport>>
}

impl ExportStorage {
    pub fn new() -> Self {
        Self {
            exports: Arc::new(DashMap::new())
        }
    }

    /// Account addresses in ascending order, for deterministic output.
    pub fn accounts(&self) -> Vec<Address> {
        let mut accounts: Vec<Address> = self.exports.iter().map(|entry| entry.key().clone()).collect();
        accounts.sort();
        accounts
    }

    /// A copy of one account's export without removing it.
    pub fn get(&self, account: &str) -> Option<AccountExport> {
        self.exports.get(account).map(|entry| entry.value().clone())
    }
}

impl Storage for ExportStorage {
    fn load(&self, account: &str) -> Option<AccountExport> {
        self.exports.remove(account).map(|(_, export)| export)
    }

    fn save(&self, export: AccountExport) {
        self.exports.insert(export.account.clone(), export);
    }
}
