//! # Error Types
//!
//! Domain-specific error types for stockflow-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockflow-core errors (this file)                                     │
//! │  ├── CoreError        - Reconciliation and lookup failures             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockflow-store errors (separate crate)                               │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Presentation         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities, ids)
//! 3. Errors are enum variants, never String
//! 4. No operation fails silently: every caller-side guard has an
//!    engine-level variant here

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Reconciliation engine errors.
///
/// These errors represent business rule violations or lookup failures.
/// They should be caught and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - A purchase or sale references a product id that does not exist
    /// - The product was deleted and a stale id is replayed
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Insufficient stock to complete a sale.
    ///
    /// ## When This Occurs
    /// - Trying to sell more units than the product currently holds
    ///
    /// ## User Workflow
    /// ```text
    /// Record Sale (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Widget", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 Widget in stock"
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Category still has products attached.
    ///
    /// ## When This Occurs
    /// - Deleting a category while one or more products reference it.
    ///   The products must be moved or deleted first.
    #[error("Category {category} is referenced by {product_count} product(s)")]
    CategoryInUse {
        category: String,
        product_count: usize,
    },

    /// Category cannot be found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Purchase record cannot be found.
    #[error("Purchase not found: {0}")]
    PurchaseNotFound(String),

    /// Sale record cannot be found.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before reconciliation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed color code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
