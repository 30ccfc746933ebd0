//! # stockflow-store: Persistence Layer for StockFlow
//!
//! This crate persists the StockFlow ledger into an opaque key-value store:
//! one key per entity collection, JSON string values, synchronous get/set.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       StockFlow Data Flow                               │
//! │                                                                         │
//! │  Presentation command (record sale, delete purchase, ...)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockflow-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐        ┌──────────────────────────────┐   │   │
//! │  │   │ InventoryStore │        │        KeyValueStore         │   │   │
//! │  │   │  (store.rs)    │───────►│  MemoryStore │ RedbStore     │   │   │
//! │  │   │                │        │  (kv.rs)                     │   │   │
//! │  │   │ Ledger + user, │        │  one key per collection      │   │   │
//! │  │   │ write-through  │        │  JSON string values          │   │   │
//! │  │   └────────────────┘        └──────────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stockflow-core reconciliation engine (pure, no I/O)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The key-value abstraction and its backends
//! - [`store`] - The write-through entity store
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust
//! use stockflow_store::{InventoryStore, MemoryStore};
//! use stockflow_core::ledger::{PurchaseInput, PurchaseTarget};
//! use chrono::Utc;
//!
//! let mut store = InventoryStore::open(MemoryStore::new())?;
//!
//! let purchase = store.add_purchase(PurchaseInput {
//!     target: PurchaseTarget::new_product("Widget", "shiny", "cat-1"),
//!     quantity: 20,
//!     unit_price_cents: 250,
//!     date: Utc::now(),
//! })?;
//!
//! assert_eq!(store.ledger().product(&purchase.product_id).unwrap().stock, 20);
//! # Ok::<(), stockflow_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{KeyValueStore, MemoryStore, RedbStore};
pub use store::InventoryStore;
