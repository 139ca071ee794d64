//! Storage layer using RocksDB
//!
//! # Column Families
//!
//! - `wallets` - Wallet rows (key: wallet_id)
//! - `transactions` - Append-only transaction log (key: tx_id, big-endian)
//! - `topups` - Top-up requests (key: topup_id, big-endian)
//! - `admin_log` - Administrative audit trail (key: action_id, big-endian)
//! - `indices` - Secondary indices for fast lookups
//! - `meta` - Idempotency keys and other bookkeeping (key: owner_id || client key)
//!
//! All multi-row mutations go through [`StoreTxn`], a staged `WriteBatch`
//! handle: nothing is visible until `commit()`, and dropping the handle
//! discards every staged write. Numeric keys are big-endian so lexicographic
//! key order equals numeric order.

use crate::{
    error::{Error, Result},
    types::{
        AdminAction, OwnerId, Reference, TopUpId, TopUpRequest, Transaction, TxId, Wallet,
        WalletId,
    },
    Config,
};
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, DBCompactionStyle, Direction, IteratorMode, Options,
    WriteBatch, DB,
};
use std::sync::Arc;
use uuid::Uuid;

/// Column family names
const CF_WALLETS: &str = "wallets";
const CF_TRANSACTIONS: &str = "transactions";
const CF_TOPUPS: &str = "topups";
const CF_ADMIN_LOG: &str = "admin_log";
const CF_INDICES: &str = "indices";
const CF_META: &str = "meta";

/// Index key prefixes within `indices`
const IDX_OWNER: u8 = b'o';
const IDX_WALLET_TX: u8 = b't';
const IDX_REFERENCE: u8 = b'r';

/// Key prefix within `meta`
const META_IDEMPOTENCY: u8 = b'i';

/// Storage wrapper for RocksDB
pub struct Storage {
    db: Arc<DB>,
    // Column family handles are stored in DB, accessed by name
}

impl Storage {
    /// Open or create the database
    pub fn open(config: &Config) -> Result<Self> {
        let path = &config.data_dir;

        // Create directory if not exists
        std::fs::create_dir_all(path)
            .map_err(|e| Error::Config(format!("create {}: {}", path.display(), e)))?;

        // Database options
        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);

        // Tuning from config
        db_opts.set_write_buffer_size(config.rocksdb.write_buffer_size_mb * 1024 * 1024);
        db_opts.set_max_write_buffer_number(config.rocksdb.max_write_buffer_number);
        db_opts.set_target_file_size_base(config.rocksdb.target_file_size_mb * 1024 * 1024);
        db_opts.set_max_background_jobs(config.rocksdb.max_background_jobs);
        db_opts.set_level_zero_file_num_compaction_trigger(
            config.rocksdb.level0_file_num_compaction_trigger,
        );

        // Universal compaction for write-heavy workload
        db_opts.set_compaction_style(DBCompactionStyle::Universal);

        // Enable statistics
        if config.rocksdb.enable_statistics {
            db_opts.enable_statistics();
        }

        // Column family descriptors
        let cf_descriptors = vec![
            ColumnFamilyDescriptor::new(CF_WALLETS, Self::cf_options_wallets()),
            ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Self::cf_options_transactions()),
            ColumnFamilyDescriptor::new(CF_TOPUPS, Self::cf_options_topups()),
            ColumnFamilyDescriptor::new(CF_ADMIN_LOG, Self::cf_options_admin_log()),
            ColumnFamilyDescriptor::new(CF_INDICES, Self::cf_options_indices()),
            ColumnFamilyDescriptor::new(CF_META, Self::cf_options_meta()),
        ];

        // Open database
        let db = DB::open_cf_descriptors(&db_opts, path, cf_descriptors)?;

        tracing::info!("Opened RocksDB at {:?} with 6 column families", path);

        Ok(Self { db: Arc::new(db) })
    }

    // Column family options

    fn cf_options_wallets() -> Options {
        let mut opts = Options::default();
        // Wallets are frequently read, use LZ4 for speed
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
        opts
    }

    fn cf_options_transactions() -> Options {
        let mut opts = Options::default();
        opts.set_compression_type(rocksdb::DBCompressionType::Zstd);
        opts.set_bottommost_compression_type(rocksdb::DBCompressionType::Zstd);
        opts
    }

    fn cf_options_topups() -> Options {
        let mut opts = Options::default();
        opts.set_compression_type(rocksdb::DBCompressionType::Zstd);
        opts
    }

    fn cf_options_admin_log() -> Options {
        let mut opts = Options::default();
        opts.set_compression_type(rocksdb::DBCompressionType::Zstd);
        opts
    }

    fn cf_options_indices() -> Options {
        let mut opts = Options::default();
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
        // Indices benefit from bloom filters
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false); // 10 bits per key
        opts.set_block_based_table_factory(&block_opts);
        opts
    }

    fn cf_options_meta() -> Options {
        let mut opts = Options::default();
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
        opts
    }

    // Helper: get column family handle

    fn cf_handle(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| Error::Transient(format!("column family {} not found", name)))
    }

    /// Begin a staged transaction against the store
    ///
    /// Writes staged on the handle become visible only when `commit()`
    /// succeeds; dropping the handle without committing discards them all.
    pub fn begin(&self) -> StoreTxn<'_> {
        StoreTxn {
            store: self,
            batch: WriteBatch::default(),
        }
    }

    // Wallet operations

    /// Get wallet by ID
    pub fn get_wallet(&self, wallet_id: WalletId) -> Result<Wallet> {
        let cf = self.cf_handle(CF_WALLETS)?;

        let value = self
            .db
            .get_cf(cf, wallet_id.as_bytes())?
            .ok_or_else(|| Error::WalletNotFound(wallet_id.to_string()))?;

        let wallet: Wallet = bincode::deserialize(&value)?;
        Ok(wallet)
    }

    /// Look up a wallet ID through the owner index
    pub fn wallet_id_by_owner(&self, owner: OwnerId) -> Result<Option<WalletId>> {
        let cf = self.cf_handle(CF_INDICES)?;
        let key = Self::index_key_owner(owner);

        match self.db.get_cf(cf, &key)? {
            Some(value) if value.len() == 16 => {
                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(&value);
                Ok(Some(WalletId::new(Uuid::from_bytes(bytes))))
            }
            Some(_) => Err(Error::Transient("corrupt owner index entry".to_string())),
            None => Ok(None),
        }
    }

    /// Get wallet by owner
    pub fn wallet_by_owner(&self, owner: OwnerId) -> Result<Wallet> {
        let wallet_id = self
            .wallet_id_by_owner(owner)?
            .ok_or_else(|| Error::WalletNotFound(owner.to_string()))?;
        self.get_wallet(wallet_id)
    }

    // Transaction operations

    /// Get transaction by ID
    pub fn get_transaction(&self, tx_id: TxId) -> Result<Transaction> {
        let cf = self.cf_handle(CF_TRANSACTIONS)?;
        let key = tx_id.value().to_be_bytes();

        let value = self
            .db
            .get_cf(cf, key)?
            .ok_or(Error::TransactionNotFound(tx_id))?;

        let tx: Transaction = bincode::deserialize(&value)?;
        Ok(tx)
    }

    /// All transactions of a wallet, newest first (tx_id descending)
    pub fn wallet_transactions_desc(&self, wallet_id: WalletId) -> Result<Vec<Transaction>> {
        let cf_indices = self.cf_handle(CF_INDICES)?;

        let mut prefix = vec![IDX_WALLET_TX];
        prefix.extend_from_slice(wallet_id.as_bytes());

        // Reverse scan from the prefix's upper bound
        let mut upper = prefix.clone();
        upper.extend_from_slice(&u64::MAX.to_be_bytes());

        let iter = self
            .db
            .iterator_cf(cf_indices, IteratorMode::From(upper.as_slice(), Direction::Reverse));

        let mut transactions = Vec::new();
        for item in iter {
            let (key, _) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            if key.len() != prefix.len() + 8 {
                continue;
            }

            let mut id_bytes = [0u8; 8];
            id_bytes.copy_from_slice(&key[prefix.len()..]);
            let tx = self.get_transaction(TxId::new(u64::from_be_bytes(id_bytes)))?;
            transactions.push(tx);
        }

        Ok(transactions)
    }

    /// Transactions recorded against a business reference (via index)
    pub fn find_by_reference(&self, reference: &Reference) -> Result<Vec<Transaction>> {
        let cf_indices = self.cf_handle(CF_INDICES)?;
        let prefix = Self::index_key_reference_prefix(reference);

        let iter = self
            .db
            .iterator_cf(cf_indices, IteratorMode::From(prefix.as_slice(), Direction::Forward));

        let mut transactions = Vec::new();
        for item in iter {
            let (key, _) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            if key.len() != prefix.len() + 8 {
                continue;
            }

            let mut id_bytes = [0u8; 8];
            id_bytes.copy_from_slice(&key[prefix.len()..]);
            let tx = self.get_transaction(TxId::new(u64::from_be_bytes(id_bytes)))?;
            transactions.push(tx);
        }

        Ok(transactions)
    }

    // Top-up operations

    /// Get top-up request by ID
    pub fn get_topup(&self, id: TopUpId) -> Result<TopUpRequest> {
        let cf = self.cf_handle(CF_TOPUPS)?;
        let key = id.value().to_be_bytes();

        let value = self.db.get_cf(cf, key)?.ok_or(Error::TopUpNotFound(id))?;

        let request: TopUpRequest = bincode::deserialize(&value)?;
        Ok(request)
    }

    // Admin log operations

    /// All admin actions, newest first
    pub fn admin_actions_desc(&self) -> Result<Vec<AdminAction>> {
        let cf = self.cf_handle(CF_ADMIN_LOG)?;

        let iter = self.db.iterator_cf(cf, IteratorMode::End);

        let mut actions = Vec::new();
        for item in iter {
            let (_, value) = item?;
            let action: AdminAction = bincode::deserialize(&value)?;
            actions.push(action);
        }

        Ok(actions)
    }

    // Idempotency keys

    /// Load all persisted idempotency keys (done once at open)
    ///
    /// Rows are `owner_id || client key`; both halves come back out so the
    /// in-memory reservations stay scoped the way they were written.
    pub fn load_idempotency_keys(&self) -> Result<Vec<(OwnerId, String, TxId)>> {
        let cf = self.cf_handle(CF_META)?;
        let prefix = [META_IDEMPOTENCY];

        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(&prefix, Direction::Forward));

        let mut keys = Vec::new();
        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            if key.len() < 1 + 16 || value.len() != 8 {
                continue;
            }

            let mut owner_bytes = [0u8; 16];
            owner_bytes.copy_from_slice(&key[1..17]);
            let owner = OwnerId::new(Uuid::from_bytes(owner_bytes));
            let idem = String::from_utf8_lossy(&key[17..]).into_owned();

            let mut id_bytes = [0u8; 8];
            id_bytes.copy_from_slice(&value);
            keys.push((owner, idem, TxId::new(u64::from_be_bytes(id_bytes))));
        }

        Ok(keys)
    }

    // Sequence recovery

    /// Highest committed transaction ID (0 when empty)
    pub fn last_transaction_id(&self) -> Result<u64> {
        self.last_u64_key(CF_TRANSACTIONS)
    }

    /// Highest committed top-up request ID (0 when empty)
    pub fn last_topup_id(&self) -> Result<u64> {
        self.last_u64_key(CF_TOPUPS)
    }

    /// Highest committed admin action ID (0 when empty)
    pub fn last_admin_action_id(&self) -> Result<u64> {
        self.last_u64_key(CF_ADMIN_LOG)
    }

    fn last_u64_key(&self, cf_name: &str) -> Result<u64> {
        let cf = self.cf_handle(cf_name)?;

        let mut iter = self.db.iterator_cf(cf, IteratorMode::End);
        if let Some(item) = iter.next() {
            let (key, _) = item?;
            if key.len() == 8 {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&key);
                return Ok(u64::from_be_bytes(bytes));
            }
        }

        Ok(0)
    }

    // Index key helpers

    fn index_key_owner(owner: OwnerId) -> Vec<u8> {
        let mut key = vec![IDX_OWNER];
        key.extend_from_slice(owner.as_bytes());
        key
    }

    fn index_key_wallet_tx(wallet_id: WalletId, tx_id: TxId) -> Vec<u8> {
        let mut key = vec![IDX_WALLET_TX];
        key.extend_from_slice(wallet_id.as_bytes());
        key.extend_from_slice(&tx_id.value().to_be_bytes());
        key
    }

    fn index_key_reference_prefix(reference: &Reference) -> Vec<u8> {
        let mut key = vec![IDX_REFERENCE, Self::reference_tag(reference)];
        match reference {
            Reference::Ride(id) | Reference::Delivery(id) => {
                key.extend_from_slice(&id.to_be_bytes());
            }
            Reference::TopUp(id) => {
                key.extend_from_slice(&id.value().to_be_bytes());
            }
            Reference::Admin(actor) => {
                key.extend_from_slice(actor.as_bytes());
            }
        }
        key
    }

    fn index_key_reference(reference: &Reference, tx_id: TxId) -> Vec<u8> {
        let mut key = Self::index_key_reference_prefix(reference);
        key.extend_from_slice(&tx_id.value().to_be_bytes());
        key
    }

    fn reference_tag(reference: &Reference) -> u8 {
        match reference {
            Reference::Ride(_) => 1,
            Reference::Delivery(_) => 2,
            Reference::TopUp(_) => 3,
            Reference::Admin(_) => 4,
        }
    }

    // Statistics

    /// Get storage statistics
    pub fn get_stats(&self) -> Result<StorageStats> {
        let cf_wallets = self.cf_handle(CF_WALLETS)?;
        let cf_transactions = self.cf_handle(CF_TRANSACTIONS)?;
        let cf_topups = self.cf_handle(CF_TOPUPS)?;

        Ok(StorageStats {
            total_wallets: self.approximate_count(cf_wallets)?,
            total_transactions: self.approximate_count(cf_transactions)?,
            total_topups: self.approximate_count(cf_topups)?,
        })
    }

    fn approximate_count(&self, cf: &ColumnFamily) -> Result<u64> {
        // RocksDB property for approximate count
        let prop = self
            .db
            .property_int_value_cf(cf, "rocksdb.estimate-num-keys")?
            .unwrap_or(0);

        Ok(prop)
    }

    /// Close database (graceful shutdown)
    pub fn close(self) -> Result<()> {
        drop(self.db);
        tracing::info!("RocksDB closed gracefully");
        Ok(())
    }
}

/// Staged writes against the store
///
/// The atomic scope of every ledger operation. Rows staged here hit RocksDB
/// as a single `WriteBatch` on `commit()`; if the handle is dropped instead,
/// the store is untouched.
pub struct StoreTxn<'a> {
    store: &'a Storage,
    batch: WriteBatch,
}

impl StoreTxn<'_> {
    /// Stage a wallet row
    pub fn put_wallet(&mut self, wallet: &Wallet) -> Result<()> {
        let cf = self.store.cf_handle(CF_WALLETS)?;
        let value = bincode::serialize(wallet)?;
        self.batch.put_cf(cf, wallet.id.as_bytes(), &value);
        Ok(())
    }

    /// Stage the owner index entry (written once, at wallet creation)
    pub fn put_owner_index(&mut self, owner: OwnerId, wallet_id: WalletId) -> Result<()> {
        let cf = self.store.cf_handle(CF_INDICES)?;
        let key = Storage::index_key_owner(owner);
        self.batch.put_cf(cf, &key, wallet_id.as_bytes());
        Ok(())
    }

    /// Stage a transaction row plus its wallet and reference index entries
    pub fn put_transaction(&mut self, tx: &Transaction) -> Result<()> {
        let cf_transactions = self.store.cf_handle(CF_TRANSACTIONS)?;
        let key = tx.id.value().to_be_bytes();
        let value = bincode::serialize(tx)?;
        self.batch.put_cf(cf_transactions, key, &value);

        let cf_indices = self.store.cf_handle(CF_INDICES)?;

        // Index: wallet_id || tx_id -> empty
        let idx_wallet = Storage::index_key_wallet_tx(tx.wallet_id, tx.id);
        self.batch.put_cf(cf_indices, &idx_wallet, b"");

        // Index: reference || tx_id -> empty
        let idx_reference = Storage::index_key_reference(&tx.reference, tx.id);
        self.batch.put_cf(cf_indices, &idx_reference, b"");

        Ok(())
    }

    /// Stage a top-up request row
    pub fn put_topup(&mut self, request: &TopUpRequest) -> Result<()> {
        let cf = self.store.cf_handle(CF_TOPUPS)?;
        let key = request.id.value().to_be_bytes();
        let value = bincode::serialize(request)?;
        self.batch.put_cf(cf, key, &value);
        Ok(())
    }

    /// Stage an admin audit trail entry
    pub fn put_admin_action(&mut self, action: &AdminAction) -> Result<()> {
        let cf = self.store.cf_handle(CF_ADMIN_LOG)?;
        let key = action.id.to_be_bytes();
        let value = bincode::serialize(action)?;
        self.batch.put_cf(cf, key, &value);
        Ok(())
    }

    /// Stage an idempotency key record, scoped to its owner
    pub fn put_idempotency_key(&mut self, owner: OwnerId, key: &str, tx_id: TxId) -> Result<()> {
        let cf = self.store.cf_handle(CF_META)?;
        let mut meta_key = vec![META_IDEMPOTENCY];
        meta_key.extend_from_slice(owner.as_bytes());
        meta_key.extend_from_slice(key.as_bytes());
        self.batch
            .put_cf(cf, &meta_key, tx_id.value().to_be_bytes());
        Ok(())
    }

    /// Commit all staged writes atomically
    pub fn commit(self) -> Result<()> {
        self.store.db.write(self.batch)?;
        Ok(())
    }
}

/// Storage statistics
#[derive(Debug, Clone)]
pub struct StorageStats {
    /// Estimated wallet count
    pub total_wallets: u64,
    /// Estimated transaction count
    pub total_transactions: u64,
    /// Estimated top-up request count
    pub total_topups: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TxKind, TxStatus};
    use crate::Config;
    use chrono::Utc;
    use tempfile::TempDir;

    fn test_config() -> (Config, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.data_dir = temp_dir.path().to_path_buf();
        (config, temp_dir)
    }

    fn test_wallet(owner: OwnerId, balance: i64) -> Wallet {
        Wallet {
            id: WalletId::generate(),
            owner,
            balance,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_transaction(
        id: u64,
        wallet_id: WalletId,
        amount: i64,
        reference: Reference,
    ) -> Transaction {
        Transaction {
            id: TxId::new(id),
            wallet_id,
            amount,
            description: format!("payment for {}", reference),
            kind: TxKind::Payment,
            reference,
            status: TxStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_storage_open() {
        let (config, _temp) = test_config();
        let storage = Storage::open(&config).unwrap();
        assert!(storage.db.cf_handle(CF_WALLETS).is_some());
        assert!(storage.db.cf_handle(CF_TRANSACTIONS).is_some());
        assert!(storage.db.cf_handle(CF_META).is_some());
    }

    #[test]
    fn test_wallet_roundtrip() {
        let (config, _temp) = test_config();
        let storage = Storage::open(&config).unwrap();

        let owner = OwnerId::generate();
        let wallet = test_wallet(owner, 1_000);

        let mut txn = storage.begin();
        txn.put_wallet(&wallet).unwrap();
        txn.put_owner_index(owner, wallet.id).unwrap();
        txn.commit().unwrap();

        let retrieved = storage.get_wallet(wallet.id).unwrap();
        assert_eq!(retrieved.balance, 1_000);

        let by_owner = storage.wallet_by_owner(owner).unwrap();
        assert_eq!(by_owner.id, wallet.id);
    }

    #[test]
    fn test_dropped_txn_discards() {
        let (config, _temp) = test_config();
        let storage = Storage::open(&config).unwrap();

        let wallet = test_wallet(OwnerId::generate(), 500);

        let mut txn = storage.begin();
        txn.put_wallet(&wallet).unwrap();
        drop(txn);

        assert!(matches!(
            storage.get_wallet(wallet.id),
            Err(Error::WalletNotFound(_))
        ));
    }

    #[test]
    fn test_wallet_transactions_newest_first() {
        let (config, _temp) = test_config();
        let storage = Storage::open(&config).unwrap();

        let wallet = test_wallet(OwnerId::generate(), 0);
        for id in 1..=3u64 {
            let tx = test_transaction(id, wallet.id, -100, Reference::Ride(id));
            let mut txn = storage.begin();
            txn.put_transaction(&tx).unwrap();
            txn.commit().unwrap();
        }

        // Rows for another wallet must not leak into the scan
        let other = test_wallet(OwnerId::generate(), 0);
        let mut txn = storage.begin();
        txn.put_transaction(&test_transaction(4, other.id, -100, Reference::Ride(9)))
            .unwrap();
        txn.commit().unwrap();

        let transactions = storage.wallet_transactions_desc(wallet.id).unwrap();
        let ids: Vec<u64> = transactions.iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_find_by_reference() {
        let (config, _temp) = test_config();
        let storage = Storage::open(&config).unwrap();

        let wallet = test_wallet(OwnerId::generate(), 0);

        let mut txn = storage.begin();
        txn.put_transaction(&test_transaction(1, wallet.id, -100, Reference::Ride(7)))
            .unwrap();
        txn.put_transaction(&test_transaction(2, wallet.id, -200, Reference::Ride(8)))
            .unwrap();
        txn.put_transaction(&test_transaction(3, wallet.id, 100, Reference::Ride(7)))
            .unwrap();
        txn.commit().unwrap();

        let matches = storage.find_by_reference(&Reference::Ride(7)).unwrap();
        let ids: Vec<u64> = matches.iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_sequence_recovery() {
        let (config, _temp) = test_config();
        let storage = Storage::open(&config).unwrap();

        assert_eq!(storage.last_transaction_id().unwrap(), 0);

        let wallet = test_wallet(OwnerId::generate(), 0);
        let mut txn = storage.begin();
        txn.put_transaction(&test_transaction(41, wallet.id, -100, Reference::Ride(1)))
            .unwrap();
        txn.put_transaction(&test_transaction(42, wallet.id, -100, Reference::Ride(2)))
            .unwrap();
        txn.commit().unwrap();

        assert_eq!(storage.last_transaction_id().unwrap(), 42);
    }

    #[test]
    fn test_idempotency_keys_roundtrip() {
        let (config, _temp) = test_config();
        let storage = Storage::open(&config).unwrap();

        let alice = OwnerId::generate();
        let bob = OwnerId::generate();

        // The same client string under two owners is two distinct records
        let mut txn = storage.begin();
        txn.put_idempotency_key(alice, "retry-1", TxId::new(7)).unwrap();
        txn.put_idempotency_key(alice, "retry-2", TxId::new(8)).unwrap();
        txn.put_idempotency_key(bob, "retry-1", TxId::new(9)).unwrap();
        txn.commit().unwrap();

        let mut keys = storage.load_idempotency_keys().unwrap();
        keys.sort_by_key(|(_, _, tx_id)| *tx_id);
        assert_eq!(
            keys,
            vec![
                (alice, "retry-1".to_string(), TxId::new(7)),
                (alice, "retry-2".to_string(), TxId::new(8)),
                (bob, "retry-1".to_string(), TxId::new(9)),
            ]
        );
    }
}
