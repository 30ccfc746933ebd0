//! # Storage Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Backend error (redb::*Error)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← One storage category, message preserved    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Presentation displays user-friendly message                           │
//! │                                                                         │
//! │  Domain errors pass through untouched: a CoreError inside a            │
//! │  StoreError is still matchable as the variant the engine produced.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockflow_core::CoreError;
use thiserror::Error;

/// Persistence layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A reconciliation or validation failure from the engine.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A stored value could not be serialized or parsed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key-value backend failed.
    ///
    /// ## When This Occurs
    /// - Database file cannot be created or opened
    /// - Disk full / permissions issue
    /// - Corrupted database detected by the backend
    #[error("Storage failed: {0}")]
    Storage(String),
}

// redb spreads failures across per-phase error types; they all collapse into
// the one storage category here, keeping the backend swappable.

impl From<redb::DatabaseError> for StoreError {
    fn from(err: redb::DatabaseError) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(err: redb::TransactionError) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(err: redb::TableError) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(err: redb::StorageError) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(err: redb::CommitError) -> Self {
        StoreError::Storage(err.to_string())
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through() {
        let err: StoreError = CoreError::ProductNotFound("p1".to_string()).into();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::ProductNotFound(_))
        ));
        assert_eq!(err.to_string(), "Product not found: p1");
    }
}
