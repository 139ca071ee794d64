//! Error types for the wallet ledger
//!
//! Every operation surfaces exactly one of these. Validation failures are
//! raised before any mutation; mutation-time failures discard the staged
//! batch; store faults surface as `Transient` after rollback. Nothing is
//! half-applied or silently swallowed.

use crate::types::{TopUpId, TopUpStatus, TxId};
use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
#[derive(Error, Debug)]
pub enum Error {
    /// Amount is non-positive or outside the representable balance range
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Reference is malformed or outside the operation's domain
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// No wallet for the given owner or wallet ID
    #[error("Wallet not found: {0}")]
    WalletNotFound(String),

    /// A wallet already exists for this owner
    #[error("Wallet already exists for owner {0}")]
    WalletExists(String),

    /// Wallet holds less than the requested debit
    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Balance at mutation time
        available: i64,
        /// Debit magnitude that was requested
        requested: i64,
    },

    /// Caller lacks the required capability
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Top-up request not found
    #[error("Top-up request not found: {0}")]
    TopUpNotFound(TopUpId),

    /// Transaction not found
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TxId),

    /// Top-up request is no longer pending
    #[error("Top-up request {id} already {status}")]
    TopUpClosed {
        /// Request ID
        id: TopUpId,
        /// Terminal status the request reached
        status: TopUpStatus,
    },

    /// Duplicate operation detected; the original outcome is referenced
    #[error("Duplicate operation, originally recorded as transaction {transaction_id}")]
    Conflict {
        /// Transaction committed by the first occurrence
        transaction_id: TxId,
    },

    /// Retryable fault (store error, lock timeout); nothing was committed
    #[error("Transient error: {0}")]
    Transient(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<rocksdb::Error> for Error {
    fn from(err: rocksdb::Error) -> Self {
        Error::Transient(format!("storage: {}", err))
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Transient(format!("serialization: {}", err))
    }
}
