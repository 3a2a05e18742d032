use thiserror::Error;

use crate::assets::AssetError;
use crate::types::QuantityError;

#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("{protocol} could not interpret group | on-completion: {on_completion} | action: {action} | records: {records} | transactions: {transactions}")]
    ShapeMismatch {
        protocol: &'static str,
        on_completion: String,
        action: String,
        records: usize,
        transactions: usize
    },
    #[error("{protocol} has no lending market for [{market}]")]
    UnknownMarket {
        protocol: &'static str,
        market: String
    },
    #[error("{protocol} quantity could not be computed: {source}")]
    Quantity {
        protocol: &'static str,
        #[source]
        source: QuantityError
    },
    #[error(transparent)]
    Asset(#[from] AssetError)
}

impl InterpretError {
    pub fn unknown_market(protocol: &'static str, market: impl Into<String>) -> Self {
        Self::UnknownMarket { protocol, market: market.into() }
    }

    pub fn quantity(protocol: &'static str, source: QuantityError) -> Self {
        Self::Quantity { protocol, source }
    }

    /// Whether the group can still be exported with its unlabeled records.
    /// Missing asset metadata leaves nothing to export.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Asset(_))
    }
}
