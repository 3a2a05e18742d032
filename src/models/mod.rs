mod encoding;
mod record;
mod shape;
#[cfg(test)]
mod tests;
mod transaction;

pub use record::{CustomAmount, ExportRecord, RecordFlags, RecordTag};
pub use shape::{legs_mut, matches_shape, shape, Shaped};
pub use transaction::{
    ApplicationTransaction, AssetTransferTransaction, OnCompletion, PaymentTransaction, Transaction,
    TransactionPage, TransactionType,
};
