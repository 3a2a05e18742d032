use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("Quantity error: {0}")]
    InvalidFormat(String),
    #[error("Quantity error: {decimals} decimals is outside of 0..={max}")]
    InvalidDecimals {
        decimals: u32,
        max: u32
    },
    #[error("Quantity error: {value} is not representable with {decimals} decimals")]
    Precision {
        value: String,
        decimals: u32
    },
    #[error("Quantity error: Negative value")]
    Negative,
    #[error("Quantity error: Overflow")]
    Overflow
}
