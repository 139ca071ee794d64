//! Per-wallet row locks
//!
//! Mutations on the same wallet serialize; mutations on different wallets
//! never share a lock. Acquisition is bounded: a caller that cannot get the
//! lock in time fails with a retryable error having committed nothing.

use crate::error::{Error, Result};
use crate::types::WalletId;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-wallet async locks
///
/// Entries are created on first touch and never evicted; the map grows with
/// the number of distinct wallets mutated by this process.
pub struct WalletLocks {
    locks: DashMap<WalletId, Arc<Mutex<()>>>,
    acquire_timeout: Duration,
}

impl WalletLocks {
    /// Create a registry with the given acquisition bound
    pub fn new(acquire_timeout: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            acquire_timeout,
        }
    }

    /// Acquire one wallet's lock, waiting at most the configured timeout
    ///
    /// The returned guard owns the lock; dropping it releases the wallet.
    pub async fn acquire(&self, wallet_id: WalletId) -> Result<OwnedMutexGuard<()>> {
        let lock = self
            .locks
            .entry(wallet_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        tokio::time::timeout(self.acquire_timeout, lock.lock_owned())
            .await
            .map_err(|_| {
                Error::Transient(format!(
                    "lock acquisition timed out for wallet {}",
                    wallet_id
                ))
            })
    }

    /// Number of wallets with a registered lock
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no wallet has been locked yet
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_wallet_times_out_while_held() {
        let locks = WalletLocks::new(Duration::from_millis(50));
        let wallet = WalletId::generate();

        let guard = locks.acquire(wallet).await.unwrap();
        let second = locks.acquire(wallet).await;
        assert!(matches!(second, Err(Error::Transient(_))));

        drop(guard);
        assert!(locks.acquire(wallet).await.is_ok());
    }

    #[tokio::test]
    async fn test_different_wallets_do_not_contend() {
        let locks = WalletLocks::new(Duration::from_millis(50));

        let _guard_a = locks.acquire(WalletId::generate()).await.unwrap();
        let _guard_b = locks.acquire(WalletId::generate()).await.unwrap();
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_waiter_acquires_after_release() {
        let locks = Arc::new(WalletLocks::new(Duration::from_secs(1)));
        let wallet = WalletId::generate();

        let guard = locks.acquire(wallet).await.unwrap();

        let locks2 = Arc::clone(&locks);
        let waiter = tokio::spawn(async move { locks2.acquire(wallet).await.is_ok() });

        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(guard);

        assert!(waiter.await.unwrap());
    }
}
