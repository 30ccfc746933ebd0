//! # stockflow-core: Pure Business Logic for StockFlow
//!
//! This crate is the **heart** of StockFlow. It contains the stock
//! reconciliation engine and all report aggregation as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       StockFlow Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Browser Presentation Layer                     │   │
//! │  │    Dashboard ──► Products ──► Purchases ──► Sales ──► Reports  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ generated TS bindings                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockflow-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  ledger   │  │  reports  │  │ validation│  │   │
//! │  │   │  Product  │  │ Purchase/ │  │  monthly  │  │   rules   │  │   │
//! │  │   │   Sale    │  │ Sale CRUD │  │  top-N    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               stockflow-store (Persistence Layer)               │   │
//! │  │            key-value backed, write-through collections          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Purchase, Sale, User)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`id`] - Injectable id-generator capability
//! - [`ledger`] - The stock reconciliation engine
//! - [`reports`] - Monthly totals, time series, top products, low stock
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic - the clock and the
//!    id source are passed in, never sampled
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float
//!    errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use stockflow_core::id::SequentialGenerator;
//! use stockflow_core::ledger::{Ledger, PurchaseInput, PurchaseTarget};
//! use chrono::Utc;
//!
//! let ids = SequentialGenerator::default();
//! let mut ledger = Ledger::default();
//!
//! // Buying stock of a product we have never seen creates the product.
//! let purchase = ledger
//!     .add_purchase(
//!         PurchaseInput {
//!             target: PurchaseTarget::new_product("Widget", "", "cat-1"),
//!             quantity: 20,
//!             unit_price_cents: 250,
//!             date: Utc::now(),
//!         },
//!         &ids,
//!     )
//!     .unwrap();
//!
//! let product = ledger.product(&purchase.product_id).unwrap();
//! assert_eq!(product.stock, 20);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod id;
pub mod ledger;
pub mod money;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockflow_core::Money` instead of
// `use stockflow_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use id::IdGenerator;
pub use ledger::Ledger;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which a product counts as "low stock".
///
/// ## Business Reason
/// Products under ten units trigger the dashboard restock alert. Fixed for
/// now; can become a per-product threshold later.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// How many products the best-sellers report returns.
///
/// ## Business Reason
/// The reports view shows a top-5 ranking by revenue. More rows add noise
/// without changing restock decisions.
pub const TOP_PRODUCTS_LIMIT: usize = 5;
