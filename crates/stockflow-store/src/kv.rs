//! # Key-Value Backends
//!
//! The opaque storage abstraction the tracker persists into: named JSON
//! string values behind a synchronous get/set pair, localStorage-style. The
//! seam is a trait so backends can swap without touching the entity store.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      KeyValueStore                                      │
//! │                                                                         │
//! │  MemoryStore                     RedbStore                              │
//! │  ───────────                     ─────────                              │
//! │  HashMap behind a mutex          Embedded redb database file           │
//! │  Ephemeral, shared by clone      Survives restarts                     │
//! │  Tests, previews                 Production storage                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No transactions span keys: each `set` is its own atomic write, matching
//! the single-writer execution model.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use redb::{Database, ReadableTable, TableDefinition};

use crate::error::StoreResult;

/// The single redb table holding every collection, keyed by collection name.
const COLLECTIONS: TableDefinition<&str, &str> = TableDefinition::new("collections");

// =============================================================================
// Trait
// =============================================================================

/// Named JSON string values with synchronous get/set.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// HashMap-backed store. Clones share the same underlying map, so a test can
/// reopen an [`crate::InventoryStore`] over the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Embedded Database Backend
// =============================================================================

/// redb-backed store: a single database file, one table, one row per key.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Ok(RedbStore { db })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(COLLECTIONS) {
            Ok(table) => table,
            // Fresh database: nothing has been written yet.
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(COLLECTIONS)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
