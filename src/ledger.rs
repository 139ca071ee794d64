//! Main ledger orchestration layer
//!
//! Ties validation, per-wallet locks, and the storage layer together into
//! the four ledger operations (top-up, payment, refund, penalty) plus the
//! read surface. Every mutation follows the same discipline: validate,
//! acquire the wallet's lock, stage all rows on one [`StoreTxn`], then
//! commit or discard as a unit. A caller observes either the new balance
//! plus a transaction ID, or a typed error with the wallet untouched.
//!
//! [`StoreTxn`]: crate::storage::StoreTxn
//!
//! # Example
//!
//! ```no_run
//! use wallet_ledger::{Caller, Config, Ledger, OwnerId, Reference};
//!
//! #[tokio::main]
//! async fn main() -> wallet_ledger::Result<()> {
//!     let ledger = Ledger::open(Config::default()).await?;
//!
//!     let owner = OwnerId::generate();
//!     ledger.create_wallet(owner, 0).await?;
//!     ledger.top_up(Caller::user(owner), 50_000, None).await?;
//!
//!     let receipt = ledger
//!         .pay(Caller::user(owner), 30_000, Reference::Ride(7))
//!         .await?;
//!     println!("balance after ride: {}", receipt.balance);
//!
//!     Ok(())
//! }
//! ```

use crate::{
    error::{Error, Result},
    history,
    locks::WalletLocks,
    metrics::Metrics,
    storage::{Storage, StorageStats},
    types::{
        AdminAction, Caller, HistoryPage, HistoryQuery, OwnerId, Receipt, Reference, TopUpId,
        TopUpReceipt, TopUpRequest, TopUpStatus, Transaction, TxId, TxKind, TxStatus, Wallet,
        WalletId, WalletStats,
    },
    validate, Config,
};
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::Mutex;

/// Main ledger interface
pub struct Ledger {
    /// Durable store (RocksDB)
    storage: Storage,

    /// Per-wallet row locks
    locks: WalletLocks,

    /// Serializes the owner-uniqueness check during wallet creation
    create_gate: Mutex<()>,

    /// Idempotency key reservations, scoped per owner, loaded from the
    /// store at open
    idempotency: DashMap<(OwnerId, String), TxId>,

    /// Last issued transaction ID
    tx_seq: AtomicU64,

    /// Last issued top-up request ID
    topup_seq: AtomicU64,

    /// Last issued admin action ID
    action_seq: AtomicU64,

    /// Metrics collector
    metrics: Metrics,

    /// Configuration
    config: Config,
}

impl Ledger {
    /// Open the ledger with configuration
    ///
    /// Recovers the ID sequences and idempotency reservations from the
    /// store, so a reopened ledger continues past the highest committed IDs.
    pub async fn open(config: Config) -> Result<Self> {
        let storage = Storage::open(&config)?;

        let tx_seq = AtomicU64::new(storage.last_transaction_id()?);
        let topup_seq = AtomicU64::new(storage.last_topup_id()?);
        let action_seq = AtomicU64::new(storage.last_admin_action_id()?);

        let idempotency = DashMap::new();
        for (owner, key, tx_id) in storage.load_idempotency_keys()? {
            idempotency.insert((owner, key), tx_id);
        }

        let metrics =
            Metrics::new().map_err(|e| Error::Config(format!("metrics registry: {}", e)))?;
        let stats = storage.get_stats()?;
        metrics.set_wallet_count(stats.total_wallets as i64);

        tracing::info!(
            wallets = stats.total_wallets,
            transactions = stats.total_transactions,
            topups = stats.total_topups,
            "Wallet ledger opened"
        );

        Ok(Self {
            locks: WalletLocks::new(config.locks.acquire_timeout()),
            create_gate: Mutex::new(()),
            idempotency,
            tx_seq,
            topup_seq,
            action_seq,
            metrics,
            storage,
            config,
        })
    }

    // Wallet lifecycle

    /// Create a wallet for an owner
    ///
    /// Each owner holds exactly one wallet. A nonzero `initial_balance`
    /// seeds the wallet and records a confirmed seed transaction in the same
    /// commit, so the balance always equals the sum of confirmed amounts.
    pub async fn create_wallet(&self, owner: OwnerId, initial_balance: u64) -> Result<Wallet> {
        let seed = if initial_balance == 0 {
            0
        } else {
            validate::validate_amount(initial_balance)?
        };

        // One creation at a time; the uniqueness check and the owner index
        // write must not interleave with another create for the same owner.
        let _gate = self.create_gate.lock().await;

        if self.storage.wallet_id_by_owner(owner)?.is_some() {
            return Err(Error::WalletExists(owner.to_string()));
        }

        let now = Utc::now();
        let wallet = Wallet {
            id: WalletId::generate(),
            owner,
            balance: seed,
            created_at: now,
            updated_at: now,
        };

        let mut txn = self.storage.begin();
        txn.put_wallet(&wallet)?;
        txn.put_owner_index(owner, wallet.id)?;

        if seed > 0 {
            let tx = Transaction {
                id: self.next_tx_id(),
                wallet_id: wallet.id,
                amount: seed,
                description: "seed balance".to_string(),
                kind: TxKind::TopUp,
                reference: Reference::Admin(owner),
                status: TxStatus::Confirmed,
                created_at: now,
            };
            txn.put_transaction(&tx)?;
        }

        txn.commit()?;
        self.metrics.record_wallet_created();

        tracing::info!(
            wallet_id = %wallet.id,
            owner = %owner,
            balance = seed,
            "Wallet created"
        );

        Ok(wallet)
    }

    // Point reads (no locks, no staged writes)

    /// Get a wallet by owner
    pub async fn wallet(&self, owner: OwnerId) -> Result<Wallet> {
        self.storage.wallet_by_owner(owner)
    }

    /// Get a wallet's current balance
    pub async fn balance(&self, owner: OwnerId) -> Result<i64> {
        Ok(self.storage.wallet_by_owner(owner)?.balance)
    }

    /// Get a transaction by ID
    pub async fn transaction(&self, tx_id: TxId) -> Result<Transaction> {
        self.storage.get_transaction(tx_id)
    }

    /// Transactions recorded against a business reference
    ///
    /// The reconciliation query: "which transactions did ride #7 produce?"
    pub async fn find_by_reference(&self, reference: &Reference) -> Result<Vec<Transaction>> {
        self.storage.find_by_reference(reference)
    }

    /// Get a top-up request by ID
    pub async fn top_up_request(&self, id: TopUpId) -> Result<TopUpRequest> {
        self.storage.get_topup(id)
    }

    // Top-up (two-phase)

    /// Request a top-up, then confirm it immediately
    ///
    /// The synchronous composition of [`request_top_up`] and
    /// [`confirm_top_up`] for callers that settle in-process.
    ///
    /// [`request_top_up`]: Ledger::request_top_up
    /// [`confirm_top_up`]: Ledger::confirm_top_up
    pub async fn top_up(
        &self,
        caller: Caller,
        amount: u64,
        idempotency_key: Option<String>,
    ) -> Result<Receipt> {
        let request = self.request_top_up(caller, amount, idempotency_key).await?;

        // TODO: hand the pending request to the payment gateway here once one
        // is integrated; until then every request settles in-process.

        self.confirm_top_up(request.request_id).await
    }

    /// Record the intent to add funds
    ///
    /// Commits a pending request plus a pending transaction row; the balance
    /// is untouched until [`confirm_top_up`]. A replayed `idempotency_key`
    /// fails with [`Error::Conflict`] carrying the originally assigned
    /// transaction ID instead of opening a second request. Keys are scoped
    /// to the calling owner, so two owners may reuse the same key string.
    ///
    /// [`confirm_top_up`]: Ledger::confirm_top_up
    pub async fn request_top_up(
        &self,
        caller: Caller,
        amount: u64,
        idempotency_key: Option<String>,
    ) -> Result<TopUpReceipt> {
        let result = self
            .request_top_up_inner(caller, amount, idempotency_key)
            .await;
        if result.is_err() {
            self.metrics.record_rejection();
        }
        result
    }

    async fn request_top_up_inner(
        &self,
        caller: Caller,
        amount: u64,
        idempotency_key: Option<String>,
    ) -> Result<TopUpReceipt> {
        let amount = validate::validate_amount(amount)?;
        let wallet_id = self
            .storage
            .wallet_id_by_owner(caller.owner)?
            .ok_or_else(|| Error::WalletNotFound(caller.owner.to_string()))?;

        // The lock covers ID allocation through commit, so a wallet's
        // transaction IDs and `created_at` stamps advance together.
        let _guard = self.locks.acquire(wallet_id).await?;

        let tx_id = self.next_tx_id();
        let request_id = self.next_topup_id();

        let now = Utc::now();
        let request = TopUpRequest {
            id: request_id,
            wallet_id,
            amount,
            status: TopUpStatus::Pending,
            transaction_id: tx_id,
            idempotency_key: idempotency_key.clone(),
            created_at: now,
            confirmed_at: None,
        };
        let tx = Transaction {
            id: tx_id,
            wallet_id,
            amount,
            description: "wallet top-up".to_string(),
            kind: TxKind::TopUp,
            reference: Reference::TopUp(request_id),
            status: TxStatus::Pending,
            created_at: now,
        };

        match &idempotency_key {
            // Keys are scoped to the owner: the same client string from two
            // owners names two independent operations. The reservation is
            // published inside the vacant-entry guard only after the batch
            // commits, so a racing replay sees either the committed
            // reservation or a vacant slot, never an uncommitted ID.
            Some(key) => match self.idempotency.entry((caller.owner, key.clone())) {
                Entry::Occupied(entry) => {
                    return Err(Error::Conflict {
                        transaction_id: *entry.get(),
                    });
                }
                Entry::Vacant(entry) => {
                    let mut txn = self.storage.begin();
                    txn.put_topup(&request)?;
                    txn.put_transaction(&tx)?;
                    txn.put_idempotency_key(caller.owner, key, tx_id)?;
                    txn.commit()?;
                    entry.insert(tx_id);
                }
            },
            None => {
                let mut txn = self.storage.begin();
                txn.put_topup(&request)?;
                txn.put_transaction(&tx)?;
                txn.commit()?;
            }
        }

        tracing::info!(
            request_id = %request_id,
            wallet_id = %wallet_id,
            amount,
            "Top-up requested"
        );

        Ok(TopUpReceipt {
            request_id,
            transaction_id: tx_id,
            wallet_id,
            amount,
        })
    }

    /// Apply a settled top-up to the wallet
    ///
    /// Under the wallet's lock: credits the balance, flips the pending
    /// transaction to confirmed (its `created_at` unchanged), and marks the
    /// request completed, all in one commit. Confirming an already-completed
    /// request fails with [`Error::Conflict`]; a failed request with
    /// [`Error::TopUpClosed`].
    pub async fn confirm_top_up(&self, request_id: TopUpId) -> Result<Receipt> {
        let started = Instant::now();
        let result = self.confirm_top_up_inner(request_id).await;
        self.observe(TxKind::TopUp, started, result)
    }

    async fn confirm_top_up_inner(&self, request_id: TopUpId) -> Result<Receipt> {
        let wallet_id = self.storage.get_topup(request_id)?.wallet_id;
        let _guard = self.locks.acquire(wallet_id).await?;

        // Re-read under the lock; a concurrent confirm may have settled it.
        let mut request = self.storage.get_topup(request_id)?;
        match request.status {
            TopUpStatus::Pending => {}
            TopUpStatus::Completed => {
                return Err(Error::Conflict {
                    transaction_id: request.transaction_id,
                });
            }
            TopUpStatus::Failed => {
                return Err(Error::TopUpClosed {
                    id: request_id,
                    status: TopUpStatus::Failed,
                });
            }
        }

        let mut wallet = self.storage.get_wallet(request.wallet_id)?;
        let new_balance = wallet.balance.checked_add(request.amount).ok_or_else(|| {
            Error::InvalidAmount("credit would overflow the balance".to_string())
        })?;

        let mut tx = self.storage.get_transaction(request.transaction_id)?;
        let now = Utc::now();

        wallet.balance = new_balance;
        wallet.updated_at = now;
        tx.status = TxStatus::Confirmed;
        request.status = TopUpStatus::Completed;
        request.confirmed_at = Some(now);

        let mut txn = self.storage.begin();
        txn.put_wallet(&wallet)?;
        txn.put_transaction(&tx)?;
        txn.put_topup(&request)?;
        txn.commit()?;

        tracing::info!(
            request_id = %request_id,
            wallet_id = %wallet.id,
            tx_id = %tx.id,
            amount = tx.amount,
            balance = new_balance,
            "Top-up confirmed"
        );

        Ok(Receipt {
            transaction_id: tx.id,
            wallet_id: wallet.id,
            amount: tx.amount,
            balance: new_balance,
        })
    }

    /// Mark a top-up request as failed
    ///
    /// The pending transaction row is left pending; the balance was never
    /// touched. Only pending requests can fail, anything else returns
    /// [`Error::TopUpClosed`].
    pub async fn fail_top_up(&self, request_id: TopUpId) -> Result<TopUpRequest> {
        let wallet_id = self.storage.get_topup(request_id)?.wallet_id;
        let _guard = self.locks.acquire(wallet_id).await?;

        let mut request = self.storage.get_topup(request_id)?;
        if request.status != TopUpStatus::Pending {
            return Err(Error::TopUpClosed {
                id: request_id,
                status: request.status,
            });
        }

        request.status = TopUpStatus::Failed;

        let mut txn = self.storage.begin();
        txn.put_topup(&request)?;
        txn.commit()?;

        tracing::warn!(
            request_id = %request_id,
            wallet_id = %request.wallet_id,
            amount = request.amount,
            "Top-up marked failed"
        );

        Ok(request)
    }

    // Payment

    /// Debit the caller's wallet for a completed ride or delivery
    pub async fn pay(&self, caller: Caller, amount: u64, reference: Reference) -> Result<Receipt> {
        let started = Instant::now();
        let result = self.pay_inner(caller, amount, reference).await;
        self.observe(TxKind::Payment, started, result)
    }

    async fn pay_inner(
        &self,
        caller: Caller,
        amount: u64,
        reference: Reference,
    ) -> Result<Receipt> {
        let amount = validate::validate_amount(amount)?;
        validate::validate_payment_reference(&reference)?;

        let wallet_id = self
            .storage
            .wallet_id_by_owner(caller.owner)?
            .ok_or_else(|| Error::WalletNotFound(caller.owner.to_string()))?;

        let _guard = self.locks.acquire(wallet_id).await?;
        let mut wallet = self.storage.get_wallet(wallet_id)?;

        // Sufficiency is decided here, under the lock, never earlier.
        let new_balance = wallet
            .balance
            .checked_sub(amount)
            .filter(|b| *b >= 0)
            .ok_or(Error::InsufficientFunds {
                available: wallet.balance,
                requested: amount,
            })?;

        let now = Utc::now();
        let tx = Transaction {
            id: self.next_tx_id(),
            wallet_id,
            amount: TxKind::Payment.signed_amount(amount),
            description: format!("payment for {}", reference),
            kind: TxKind::Payment,
            reference,
            status: TxStatus::Confirmed,
            created_at: now,
        };

        wallet.balance = new_balance;
        wallet.updated_at = now;

        let mut txn = self.storage.begin();
        txn.put_wallet(&wallet)?;
        txn.put_transaction(&tx)?;
        txn.commit()?;

        tracing::info!(
            wallet_id = %wallet_id,
            tx_id = %tx.id,
            amount = tx.amount,
            balance = new_balance,
            reference = %tx.reference,
            "Payment recorded"
        );

        Ok(Receipt {
            transaction_id: tx.id,
            wallet_id,
            amount: tx.amount,
            balance: new_balance,
        })
    }

    // Refund

    /// Credit the caller's wallet, reversing a prior payment
    ///
    /// The reference is recorded as given; the calling flow points it back
    /// at the ride or delivery being reversed.
    pub async fn refund(
        &self,
        caller: Caller,
        amount: u64,
        reference: Reference,
    ) -> Result<Receipt> {
        let started = Instant::now();
        let result = self.refund_inner(caller, amount, reference).await;
        self.observe(TxKind::Refund, started, result)
    }

    async fn refund_inner(
        &self,
        caller: Caller,
        amount: u64,
        reference: Reference,
    ) -> Result<Receipt> {
        let amount = validate::validate_amount(amount)?;

        let wallet_id = self
            .storage
            .wallet_id_by_owner(caller.owner)?
            .ok_or_else(|| Error::WalletNotFound(caller.owner.to_string()))?;

        let _guard = self.locks.acquire(wallet_id).await?;
        let mut wallet = self.storage.get_wallet(wallet_id)?;

        let new_balance = wallet.balance.checked_add(amount).ok_or_else(|| {
            Error::InvalidAmount("credit would overflow the balance".to_string())
        })?;

        let now = Utc::now();
        let tx = Transaction {
            id: self.next_tx_id(),
            wallet_id,
            amount: TxKind::Refund.signed_amount(amount),
            description: format!("refund for {}", reference),
            kind: TxKind::Refund,
            reference,
            status: TxStatus::Confirmed,
            created_at: now,
        };

        wallet.balance = new_balance;
        wallet.updated_at = now;

        let mut txn = self.storage.begin();
        txn.put_wallet(&wallet)?;
        txn.put_transaction(&tx)?;
        txn.commit()?;

        tracing::info!(
            wallet_id = %wallet_id,
            tx_id = %tx.id,
            amount = tx.amount,
            balance = new_balance,
            reference = %tx.reference,
            "Refund recorded"
        );

        Ok(Receipt {
            transaction_id: tx.id,
            wallet_id,
            amount: tx.amount,
            balance: new_balance,
        })
    }

    // Penalty

    /// Administratively debit a target owner's wallet
    ///
    /// Requires the admin capability on the caller; the action is written to
    /// the admin audit trail in the same commit as the debit.
    pub async fn penalty(
        &self,
        caller: Caller,
        target: OwnerId,
        amount: u64,
        reason: &str,
    ) -> Result<Receipt> {
        let started = Instant::now();
        let result = self.penalty_inner(caller, target, amount, reason).await;
        self.observe(TxKind::Penalty, started, result)
    }

    async fn penalty_inner(
        &self,
        caller: Caller,
        target: OwnerId,
        amount: u64,
        reason: &str,
    ) -> Result<Receipt> {
        // Capability first: a non-admin is refused before any other check.
        if !caller.admin {
            return Err(Error::Unauthorized(
                "penalty requires the admin capability".to_string(),
            ));
        }

        let amount = validate::validate_amount(amount)?;

        let wallet_id = self
            .storage
            .wallet_id_by_owner(target)?
            .ok_or_else(|| Error::WalletNotFound(target.to_string()))?;

        let _guard = self.locks.acquire(wallet_id).await?;
        let mut wallet = self.storage.get_wallet(wallet_id)?;

        let new_balance = wallet
            .balance
            .checked_sub(amount)
            .filter(|b| *b >= 0)
            .ok_or(Error::InsufficientFunds {
                available: wallet.balance,
                requested: amount,
            })?;

        let now = Utc::now();
        let tx = Transaction {
            id: self.next_tx_id(),
            wallet_id,
            amount: TxKind::Penalty.signed_amount(amount),
            description: format!("penalty: {}", reason),
            kind: TxKind::Penalty,
            reference: Reference::Admin(caller.owner),
            status: TxStatus::Confirmed,
            created_at: now,
        };
        let action = AdminAction {
            id: self.next_action_id(),
            admin_id: caller.owner,
            action_type: "penalty".to_string(),
            target_user: target,
            details: reason.to_string(),
            transaction_id: tx.id,
            created_at: now,
        };

        wallet.balance = new_balance;
        wallet.updated_at = now;

        let mut txn = self.storage.begin();
        txn.put_wallet(&wallet)?;
        txn.put_transaction(&tx)?;
        txn.put_admin_action(&action)?;
        txn.commit()?;

        tracing::info!(
            wallet_id = %wallet_id,
            tx_id = %tx.id,
            admin = %caller.owner,
            target = %target,
            amount = tx.amount,
            balance = new_balance,
            "Penalty applied"
        );

        Ok(Receipt {
            transaction_id: tx.id,
            wallet_id,
            amount: tx.amount,
            balance: new_balance,
        })
    }

    // History and statistics (read-only aggregation)

    /// One page of an owner's confirmed transactions, newest first
    pub async fn history(&self, owner: OwnerId, query: HistoryQuery) -> Result<HistoryPage> {
        let wallet = self.storage.wallet_by_owner(owner)?;
        history::wallet_history(&self.storage, &self.config.history, wallet.id, &query)
    }

    /// Aggregates over an owner's confirmed transactions
    pub async fn statistics(&self, owner: OwnerId) -> Result<WalletStats> {
        let wallet = self.storage.wallet_by_owner(owner)?;
        history::wallet_statistics(&self.storage, wallet.id)
    }

    /// One page of the admin audit trail, newest first
    pub async fn admin_actions(&self, page: u64, limit: Option<usize>) -> Result<Vec<AdminAction>> {
        history::admin_actions(&self.storage, &self.config.history, page, limit)
    }

    /// Store-level counters
    pub async fn stats(&self) -> Result<StorageStats> {
        self.storage.get_stats()
    }

    /// Metrics collector (for export)
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Close the ledger (graceful shutdown)
    pub async fn close(self) -> Result<()> {
        self.storage.close()
    }

    // Internal helpers

    fn next_tx_id(&self) -> TxId {
        TxId::new(self.tx_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn next_topup_id(&self) -> TopUpId {
        TopUpId::new(self.topup_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn next_action_id(&self) -> u64 {
        self.action_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn observe<T>(&self, kind: TxKind, started: Instant, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => {
                self.metrics.record_operation(kind);
                self.metrics
                    .record_operation_duration(started.elapsed().as_secs_f64());
            }
            Err(_) => self.metrics.record_rejection(),
        }
        result
    }
}
