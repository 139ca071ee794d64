//! Wallet Ledger Core
//!
//! Monetary balance store for user wallets: top-ups, payments, refunds, and
//! administrative penalties, each leaving an immutable audit trail.
//!
//! # Architecture
//!
//! - **Row Locking**: One async lock per wallet; unrelated wallets never block
//! - **Atomic Scope**: Every mutation stages all rows on one `WriteBatch`,
//!   committed or discarded as a unit
//! - **Append-Only Log**: Transactions are never modified once confirmed
//! - **Two-Phase Top-Up**: Intent and settlement are separate commits, so no
//!   store transaction is ever held across external I/O
//!
//! # Invariants
//!
//! - Conservation: balance == Σ(confirmed amounts) per wallet, at all times
//! - Exactly-once: duplicate top-up requests are detected, never re-credited
//! - Atomicity: a balance change and its transaction are both visible or
//!   both absent
//! - Isolation: the committed per-wallet sequence is a valid serialization
//!   of concurrent calls

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications, clippy::all)]

pub mod types;
pub mod storage;
pub mod ledger;
pub mod locks;
pub mod history;
pub mod validate;
pub mod error;
pub mod config;
pub mod metrics;

// Re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use ledger::Ledger;
pub use storage::StorageStats;
pub use types::{
    AdminAction, Caller, HistoryPage, HistoryQuery, OwnerId, Receipt, Reference, TopUpId,
    TopUpReceipt, TopUpRequest, TopUpStatus, Transaction, TxId, TxKind, TxStatus, Wallet,
    WalletId, WalletStats,
};
