use thiserror::Error;

#[derive(Debug, Error)]
pub enum FundsError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("transfer amount must be positive")]
    ZeroAmount,

    #[error("balance overflow")]
    Overflow,
}
