//! Error types for settlement engine

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for settlement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Settlement errors
#[derive(Error, Debug)]
pub enum Error {
    /// Ledger error (aggregation or ledger configuration)
    #[error("Ledger error: {0}")]
    Ledger(#[from] ledger_core::Error),

    /// Balances handed to the optimizer do not sum to zero
    #[error("Unbalanced ledger: balances sum to {residual}")]
    UnbalancedLedger {
        /// Sum of all balances
        residual: Decimal,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
