//! redb-backed local store.
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `active_orders` | sequence | `Order` | Placed, not-yet-fulfilled orders |
//! | `archived_orders` | sequence | `Order` | Completed order history |
//! | `customers` | phone | `Customer` | Marketing database (one per phone) |
//! | `product_overrides` | product id | `ProductOverride` | Admin overlays |
//! | `reviews` | product id | `Vec<Review>` | Per-product reviews, newest first |
//! | `counters` | name | `u64` | Monotonic insert sequences |
//!
//! Sequences only grow, so reverse key iteration over the order tables
//! yields newest-first. Everything that must move together (completing an
//! order touches three tables) happens inside one write transaction, so a
//! crash can never leave the archive and the customer database disagreeing.
//!
//! # Durability
//!
//! redb commits are persistent as soon as `commit()` returns and the file is
//! always in a consistent state, which is all a single-device shop needs.

mod orders;
mod overrides;
mod reviews;

pub use orders::OrderRepository;
pub use overrides::OverrideRepository;
pub use reviews::ReviewRepository;

use std::path::Path;
use std::sync::Arc;

use redb::{
    Database, ReadTransaction, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use thiserror::Error;

/// Table for active orders: key = insert sequence, value = JSON-serialized `Order`.
pub(crate) const ACTIVE_ORDERS: TableDefinition<u64, &[u8]> = TableDefinition::new("active_orders");

/// Table for archived orders: key = archive sequence, value = JSON-serialized `Order`.
pub(crate) const ARCHIVED_ORDERS: TableDefinition<u64, &[u8]> =
    TableDefinition::new("archived_orders");

/// Table for customer records: key = phone number, value = JSON-serialized `Customer`.
pub(crate) const CUSTOMERS: TableDefinition<&str, &[u8]> = TableDefinition::new("customers");

/// Table for admin overlays: key = product id, value = JSON-serialized `ProductOverride`.
pub(crate) const OVERRIDES: TableDefinition<u64, &[u8]> = TableDefinition::new("product_overrides");

/// Table for reviews: key = product id, value = JSON-serialized `Vec<Review>`.
pub(crate) const REVIEWS: TableDefinition<u64, &[u8]> = TableDefinition::new("reviews");

/// Table for monotonic counters: key = counter name, value = u64.
const COUNTERS: TableDefinition<&str, u64> = TableDefinition::new("counters");

pub(crate) const ACTIVE_SEQ: &str = "active_seq";
pub(crate) const ARCHIVE_SEQ: &str = "archive_seq";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// The embedded local store all repositories share.
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl Store {
    /// Open or create the store at the given path.
    ///
    /// All tables are created up front so later reads never observe a
    /// missing table.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or initialized.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init_tables(&db)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Open an ephemeral in-memory store (tests, dry runs).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init_tables(&db)?;
        Ok(Self { db: Arc::new(db) })
    }

    fn init_tables(db: &Database) -> StorageResult<()> {
        let txn = db.begin_write()?;
        {
            let _ = txn.open_table(ACTIVE_ORDERS)?;
            let _ = txn.open_table(ARCHIVED_ORDERS)?;
            let _ = txn.open_table(CUSTOMERS)?;
            let _ = txn.open_table(OVERRIDES)?;
            let _ = txn.open_table(REVIEWS)?;
            let _ = txn.open_table(COUNTERS)?;
        }
        txn.commit()?;
        Ok(())
    }

    pub(crate) fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    pub(crate) fn begin_read(&self) -> StorageResult<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }
}

/// Increment and return a named counter (within a transaction).
pub(crate) fn next_seq(txn: &WriteTransaction, name: &str) -> StorageResult<u64> {
    let mut table = txn.open_table(COUNTERS)?;
    let current = table.get(name)?.map(|guard| guard.value()).unwrap_or(0);
    let next = current + 1;
    table.insert(name, next)?;
    Ok(next)
}
