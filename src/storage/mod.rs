mod export_storage;

use crate::models::ExportRecord;
use crate::types::Address;

pub use export_storage::ExportStorage;

/// Rows an account worker produced, in chain order.
#[derive(Debug, Clone, Default)]
pub struct AccountExport {
    pub account: Address,
    pub rows: Vec<String>,
    /// Records that were exported, kept for callers that inspect labels.
    pub records: Vec<ExportRecord>
}

impl AccountExport {
    pub fn new(account: Address) -> Self {
        Self { account, ..Self::default() }
    }
}

pub trait Storage: Send + Sync + 'static {
    fn load(&self, account: &str) -> Option<AccountExport>;
    fn save(&self, export: AccountExport);
}
