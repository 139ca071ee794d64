//! Read-only aggregation over the transaction log
//!
//! History, per-wallet statistics, and the admin audit trail reader. Reads
//! take no locks and stage no writes; they only ever see committed rows, and
//! they count confirmed rows only. Ordering is newest first: transaction ID
//! descending, straight off the store's big-endian ID index. A wallet's IDs
//! and `created_at` stamps are assigned together under its lock, so this
//! equals `created_at` descending with the ID as tiebreak.

use crate::config::HistoryConfig;
use crate::error::Result;
use crate::storage::Storage;
use crate::types::{
    AdminAction, HistoryPage, HistoryQuery, Transaction, TxKind, TxStatus, WalletId, WalletStats,
};

/// One page of a wallet's confirmed transactions, newest first
pub fn wallet_history(
    storage: &Storage,
    config: &HistoryConfig,
    wallet_id: WalletId,
    query: &HistoryQuery,
) -> Result<HistoryPage> {
    let limit = query
        .limit
        .unwrap_or(config.default_limit)
        .min(config.max_limit)
        .max(1);
    let page = query.page.max(1);

    let filtered: Vec<Transaction> = storage
        .wallet_transactions_desc(wallet_id)?
        .into_iter()
        .filter(|tx| tx.status == TxStatus::Confirmed)
        .filter(|tx| query.kind.map_or(true, |kind| tx.kind == kind))
        .collect();

    let total = filtered.len() as u64;
    let offset = (page - 1).saturating_mul(limit as u64).min(total) as usize;
    let transactions = filtered.into_iter().skip(offset).take(limit).collect();

    Ok(HistoryPage {
        transactions,
        page,
        limit,
        total,
    })
}

/// Aggregates over a wallet's confirmed transactions
pub fn wallet_statistics(storage: &Storage, wallet_id: WalletId) -> Result<WalletStats> {
    let mut stats = WalletStats::default();

    for tx in storage.wallet_transactions_desc(wallet_id)? {
        if tx.status != TxStatus::Confirmed {
            continue;
        }

        stats.transaction_count += 1;
        if tx.amount >= 0 {
            stats.total_credited = stats.total_credited.saturating_add(tx.amount);
        } else {
            stats.total_debited = stats.total_debited.saturating_add(tx.amount.saturating_neg());
        }

        match tx.kind {
            TxKind::TopUp => stats.topup_count += 1,
            TxKind::Payment => stats.payment_count += 1,
            TxKind::Refund => stats.refund_count += 1,
            TxKind::Penalty => stats.penalty_count += 1,
        }
    }

    Ok(stats)
}

/// One page of the admin audit trail, newest first
pub fn admin_actions(
    storage: &Storage,
    config: &HistoryConfig,
    page: u64,
    limit: Option<usize>,
) -> Result<Vec<AdminAction>> {
    let limit = limit
        .unwrap_or(config.default_limit)
        .min(config.max_limit)
        .max(1);
    let page = page.max(1);

    let actions = storage.admin_actions_desc()?;
    let offset = (page - 1)
        .saturating_mul(limit as u64)
        .min(actions.len() as u64) as usize;

    Ok(actions.into_iter().skip(offset).take(limit).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OwnerId, Reference, TxId};
    use crate::Config;
    use chrono::Utc;
    use tempfile::TempDir;

    fn test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.data_dir = temp_dir.path().to_path_buf();
        (Storage::open(&config).unwrap(), temp_dir)
    }

    fn commit_tx(
        storage: &Storage,
        id: u64,
        wallet_id: WalletId,
        amount: i64,
        kind: TxKind,
        status: TxStatus,
    ) {
        let tx = Transaction {
            id: TxId::new(id),
            wallet_id,
            amount,
            description: format!("{} #{}", kind, id),
            kind,
            reference: Reference::Ride(id),
            status,
            created_at: Utc::now(),
        };
        let mut txn = storage.begin();
        txn.put_transaction(&tx).unwrap();
        txn.commit().unwrap();
    }

    #[test]
    fn test_history_pagination() {
        let (storage, _temp) = test_storage();
        let wallet_id = WalletId::generate();
        let config = HistoryConfig::default();

        for id in 1..=7u64 {
            commit_tx(&storage, id, wallet_id, -100, TxKind::Payment, TxStatus::Confirmed);
        }

        let query = HistoryQuery {
            page: 1,
            limit: Some(3),
            kind: None,
        };
        let page1 = wallet_history(&storage, &config, wallet_id, &query).unwrap();
        assert_eq!(page1.total, 7);
        assert_eq!(page1.limit, 3);
        let ids: Vec<u64> = page1.transactions.iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![7, 6, 5]);

        let page3 = wallet_history(
            &storage,
            &config,
            wallet_id,
            &HistoryQuery {
                page: 3,
                limit: Some(3),
                kind: None,
            },
        )
        .unwrap();
        let ids: Vec<u64> = page3.transactions.iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![1]);

        // Past the last page: empty rows, same total
        let page9 = wallet_history(
            &storage,
            &config,
            wallet_id,
            &HistoryQuery {
                page: 9,
                limit: Some(3),
                kind: None,
            },
        )
        .unwrap();
        assert!(page9.transactions.is_empty());
        assert_eq!(page9.total, 7);
    }

    #[test]
    fn test_history_limit_clamped() {
        let (storage, _temp) = test_storage();
        let wallet_id = WalletId::generate();
        let config = HistoryConfig {
            default_limit: 2,
            max_limit: 5,
        };

        for id in 1..=10u64 {
            commit_tx(&storage, id, wallet_id, 100, TxKind::Refund, TxStatus::Confirmed);
        }

        let defaulted =
            wallet_history(&storage, &config, wallet_id, &HistoryQuery::default()).unwrap();
        assert_eq!(defaulted.limit, 2);
        assert_eq!(defaulted.transactions.len(), 2);

        let clamped = wallet_history(
            &storage,
            &config,
            wallet_id,
            &HistoryQuery {
                page: 1,
                limit: Some(50),
                kind: None,
            },
        )
        .unwrap();
        assert_eq!(clamped.limit, 5);
        assert_eq!(clamped.transactions.len(), 5);
    }

    #[test]
    fn test_history_filters_pending_and_kind() {
        let (storage, _temp) = test_storage();
        let wallet_id = WalletId::generate();
        let config = HistoryConfig::default();

        commit_tx(&storage, 1, wallet_id, 500, TxKind::TopUp, TxStatus::Confirmed);
        commit_tx(&storage, 2, wallet_id, 900, TxKind::TopUp, TxStatus::Pending);
        commit_tx(&storage, 3, wallet_id, -200, TxKind::Payment, TxStatus::Confirmed);

        let all = wallet_history(&storage, &config, wallet_id, &HistoryQuery::default()).unwrap();
        assert_eq!(all.total, 2); // pending row invisible

        let topups = wallet_history(
            &storage,
            &config,
            wallet_id,
            &HistoryQuery {
                page: 1,
                limit: None,
                kind: Some(TxKind::TopUp),
            },
        )
        .unwrap();
        assert_eq!(topups.total, 1);
        assert_eq!(topups.transactions[0].id.value(), 1);
    }

    #[test]
    fn test_statistics_sums() {
        let (storage, _temp) = test_storage();
        let wallet_id = WalletId::generate();

        commit_tx(&storage, 1, wallet_id, 50_000, TxKind::TopUp, TxStatus::Confirmed);
        commit_tx(&storage, 2, wallet_id, -30_000, TxKind::Payment, TxStatus::Confirmed);
        commit_tx(&storage, 3, wallet_id, 30_000, TxKind::Refund, TxStatus::Confirmed);
        commit_tx(&storage, 4, wallet_id, -5_000, TxKind::Penalty, TxStatus::Confirmed);
        commit_tx(&storage, 5, wallet_id, 900, TxKind::TopUp, TxStatus::Pending);

        let stats = wallet_statistics(&storage, wallet_id).unwrap();
        assert_eq!(stats.transaction_count, 4);
        assert_eq!(stats.total_credited, 80_000);
        assert_eq!(stats.total_debited, 35_000);
        assert_eq!(stats.topup_count, 1);
        assert_eq!(stats.payment_count, 1);
        assert_eq!(stats.refund_count, 1);
        assert_eq!(stats.penalty_count, 1);
    }

    #[test]
    fn test_admin_actions_newest_first() {
        let (storage, _temp) = test_storage();
        let config = HistoryConfig::default();
        let admin = OwnerId::generate();
        let target = OwnerId::generate();

        for id in 1..=3u64 {
            let action = AdminAction {
                id,
                admin_id: admin,
                action_type: "penalty".to_string(),
                target_user: target,
                details: format!("strike {}", id),
                transaction_id: TxId::new(id),
                created_at: Utc::now(),
            };
            let mut txn = storage.begin();
            txn.put_admin_action(&action).unwrap();
            txn.commit().unwrap();
        }

        let actions = admin_actions(&storage, &config, 1, Some(2)).unwrap();
        let ids: Vec<u64> = actions.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 2]);

        let rest = admin_actions(&storage, &config, 2, Some(2)).unwrap();
        let ids: Vec<u64> = rest.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
