//! Core types for the wallet ledger
//!
//! All types are designed for:
//! - Deterministic serialization (bincode)
//! - Memory safety (no unsafe code)
//! - Exact arithmetic (i64 minor currency units for money)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Wallet identifier (stable, never reassigned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletId(Uuid);

impl WalletId {
    /// Create from an existing UUID
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh wallet ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Raw bytes for store keys
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wallet owner identifier (user or system account)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(Uuid);

impl OwnerId {
    /// Create from an existing UUID
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh owner ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Raw bytes for store keys
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction identifier, assigned monotonically per store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxId(u64);

impl TxId {
    /// Create from a raw sequence value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw sequence value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-up request identifier, assigned monotonically per store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TopUpId(u64);

impl TopUpId {
    /// Create from a raw sequence value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw sequence value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TopUpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user's wallet row
///
/// `balance` is maintained equal to the sum of all confirmed transaction
/// amounts recorded against the wallet. It is never written outside the
/// atomic scope that records the explaining transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// Wallet ID
    pub id: WalletId,

    /// Owning user (1:1, never reassigned)
    pub owner: OwnerId,

    /// Current balance in minor currency units
    pub balance: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last balance change timestamp
    pub updated_at: DateTime<Utc>,
}

/// Transaction kind (what business event moved the money)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TxKind {
    /// Funds added from outside the system
    TopUp = 1,
    /// Debit for a completed ride or delivery
    Payment = 2,
    /// Credit reversing a prior payment
    Refund = 3,
    /// Administrative debit
    Penalty = 4,
}

impl TxKind {
    /// Stable label (metrics, logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::TopUp => "topup",
            TxKind::Payment => "payment",
            TxKind::Refund => "refund",
            TxKind::Penalty => "penalty",
        }
    }

    /// Whether this kind credits the wallet
    pub fn is_credit(&self) -> bool {
        matches!(self, TxKind::TopUp | TxKind::Refund)
    }

    /// Apply this kind's sign to a positive magnitude
    pub fn signed_amount(&self, magnitude: i64) -> i64 {
        if self.is_credit() {
            magnitude
        } else {
            -magnitude
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TxStatus {
    /// Recorded but not yet applied to the balance (unsettled top-up)
    Pending = 1,
    /// Applied to the balance, counted by all readers
    Confirmed = 2,
}

impl TxStatus {
    /// Stable label (metrics, logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference back to the business event that caused a transaction
///
/// A closed set: each kind of caller names its own domain, so a transaction
/// can never point at a reference type that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// Completed ride
    Ride(u64),
    /// Completed delivery
    Delivery(u64),
    /// Top-up request that produced this credit
    TopUp(TopUpId),
    /// Administrative actor behind a penalty or seed
    Admin(OwnerId),
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Ride(id) => write!(f, "ride #{}", id),
            Reference::Delivery(id) => write!(f, "delivery #{}", id),
            Reference::TopUp(id) => write!(f, "top-up #{}", id),
            Reference::Admin(actor) => write!(f, "admin {}", actor),
        }
    }
}

/// Immutable record of one balance mutation
///
/// Append-only: once confirmed, nothing changes. The only permitted
/// transition is `Pending -> Confirmed` when a top-up settles; a top-up that
/// never settles leaves its row pending forever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID (monotonic)
    pub id: TxId,

    /// Wallet this transaction belongs to
    pub wallet_id: WalletId,

    /// Signed amount in minor units (positive = credit, negative = debit)
    pub amount: i64,

    /// Human-readable description
    pub description: String,

    /// Transaction kind
    pub kind: TxKind,

    /// Business event behind this transaction
    pub reference: Reference,

    /// Status
    pub status: TxStatus,

    /// Creation timestamp (unchanged when a pending row confirms)
    pub created_at: DateTime<Utc>,
}

/// Top-up request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TopUpStatus {
    /// Awaiting settlement
    Pending = 1,
    /// Settled and credited
    Completed = 2,
    /// Settlement failed, nothing credited
    Failed = 3,
}

impl TopUpStatus {
    /// Stable label (metrics, logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            TopUpStatus::Pending => "pending",
            TopUpStatus::Completed => "completed",
            TopUpStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TopUpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Intent to add funds, decoupled from the funds being applied
///
/// Request and confirmation are separate store commits because settlement is
/// external; no store transaction stays open across external I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpRequest {
    /// Request ID (monotonic)
    pub id: TopUpId,

    /// Wallet to credit
    pub wallet_id: WalletId,

    /// Requested amount in minor units (positive)
    pub amount: i64,

    /// Request status
    pub status: TopUpStatus,

    /// Pending transaction committed alongside this request
    pub transaction_id: TxId,

    /// Caller-supplied duplicate-suppression key
    pub idempotency_key: Option<String>,

    /// Request timestamp
    pub created_at: DateTime<Utc>,

    /// Settlement timestamp (set when the request completes)
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// One entry in the append-only administrative audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAction {
    /// Entry ID (monotonic)
    pub id: u64,

    /// Acting administrator
    pub admin_id: OwnerId,

    /// Action label ("penalty")
    pub action_type: String,

    /// Owner of the affected wallet
    pub target_user: OwnerId,

    /// Free-form details (the stated reason)
    pub details: String,

    /// Transaction recorded by the action
    pub transaction_id: TxId,

    /// Entry timestamp
    pub created_at: DateTime<Utc>,
}

/// Explicit caller identity, passed to every operation
///
/// No ambient request context: authorization is decided from this value
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// Acting owner
    pub owner: OwnerId,

    /// Whether the caller holds the admin capability
    pub admin: bool,
}

impl Caller {
    /// Regular (non-admin) caller
    pub fn user(owner: OwnerId) -> Self {
        Self { owner, admin: false }
    }

    /// Caller holding the admin capability
    pub fn admin(owner: OwnerId) -> Self {
        Self { owner, admin: true }
    }
}

/// Outcome of a committed balance mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Recorded transaction
    pub transaction_id: TxId,

    /// Mutated wallet
    pub wallet_id: WalletId,

    /// Signed amount as recorded
    pub amount: i64,

    /// Balance after the commit
    pub balance: i64,
}

/// Outcome of a committed top-up request (nothing credited yet)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpReceipt {
    /// Recorded request
    pub request_id: TopUpId,

    /// Pending transaction committed with the request
    pub transaction_id: TxId,

    /// Wallet to credit on confirmation
    pub wallet_id: WalletId,

    /// Requested amount in minor units
    pub amount: i64,
}

/// Per-wallet aggregation over confirmed transactions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletStats {
    /// Confirmed transaction count
    pub transaction_count: u64,

    /// Sum of credit amounts
    pub total_credited: i64,

    /// Sum of debit magnitudes (positive number)
    pub total_debited: i64,

    /// Confirmed top-ups
    pub topup_count: u64,

    /// Confirmed payments
    pub payment_count: u64,

    /// Confirmed refunds
    pub refund_count: u64,

    /// Confirmed penalties
    pub penalty_count: u64,
}

/// History read parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// 1-based page number (0 is treated as 1)
    pub page: u64,

    /// Page size; `None` takes the configured default, values above the
    /// configured maximum are clamped
    pub limit: Option<usize>,

    /// Restrict to one transaction kind
    pub kind: Option<TxKind>,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            kind: None,
        }
    }
}

/// One page of transaction history, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPage {
    /// Rows on this page (confirmed only, `created_at` descending, ties
    /// broken by transaction ID descending)
    pub transactions: Vec<Transaction>,

    /// Page number served (1-based)
    pub page: u64,

    /// Effective page size after defaulting and clamping
    pub limit: usize,

    /// Confirmed rows matching the filter across all pages
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_sign() {
        assert_eq!(TxKind::TopUp.signed_amount(50_000), 50_000);
        assert_eq!(TxKind::Refund.signed_amount(30_000), 30_000);
        assert_eq!(TxKind::Payment.signed_amount(30_000), -30_000);
        assert_eq!(TxKind::Penalty.signed_amount(5_000), -5_000);
    }

    #[test]
    fn test_reference_display() {
        assert_eq!(Reference::Ride(7).to_string(), "ride #7");
        assert_eq!(Reference::Delivery(12).to_string(), "delivery #12");
        assert_eq!(Reference::TopUp(TopUpId::new(3)).to_string(), "top-up #3");
    }

    #[test]
    fn test_caller_capability() {
        let owner = OwnerId::generate();
        assert!(!Caller::user(owner).admin);
        assert!(Caller::admin(owner).admin);
    }

    #[test]
    fn test_transaction_roundtrip() {
        let tx = Transaction {
            id: TxId::new(42),
            wallet_id: WalletId::generate(),
            amount: -30_000,
            description: "payment for ride #7".to_string(),
            kind: TxKind::Payment,
            reference: Reference::Ride(7),
            status: TxStatus::Confirmed,
            created_at: Utc::now(),
        };

        let bytes = bincode::serialize(&tx).unwrap();
        let decoded: Transaction = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded.id, tx.id);
        assert_eq!(decoded.amount, tx.amount);
        assert_eq!(decoded.reference, Reference::Ride(7));

        let json = serde_json::to_string(&tx).unwrap();
        let from_json: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(from_json.kind, TxKind::Payment);
        assert_eq!(from_json.status, TxStatus::Confirmed);
    }
}
