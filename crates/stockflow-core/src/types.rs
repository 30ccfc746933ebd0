//! # Domain Types
//!
//! Core domain types used throughout StockFlow.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Purchase     │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product_id     │   │  product_id     │──┐    │
//! │  │  category_id ─┐ │   │  product_name*  │   │  product_name*  │  │    │
//! │  │  stock        │ │   │  kind           │   │  quantity       │  │    │
//! │  └───────────────┼─┘   │  new_product?   │   └─────────────────┘  │    │
//! │          ▲       │     └─────────────────┘        * = snapshot    │    │
//! │          └───────┼────────────────────────────────────────────────┘    │
//! │  ┌───────────────▼─┐   ┌─────────────────┐                             │
//! │  │    Category     │   │      User       │                             │
//! │  │  id, name,      │   │  id, name,      │                             │
//! │  │  color          │   │  email          │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Purchase and Sale carry `product_name` frozen at write time. This is a
//! deliberate read optimization (no join needed to render history), not a
//! foreign-key violation: `product_id` stays the authoritative reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// User
// =============================================================================

/// The single local user of the tracker.
///
/// Captured at login as a plain name/email pair; there is no verification
/// and no multi-user support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email address (unverified).
    pub email: String,
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on product cards and filters.
    pub name: String,

    /// Badge color as a `#RRGGBB` hex string.
    pub color: String,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry with its current stock level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Category this product belongs to.
    pub category_id: String,

    /// Current stock level in units.
    ///
    /// Mutated only by the reconciliation engine: purchases raise it, sales
    /// lower it, deletions reverse their record's effect. Conceptually ≥ 0;
    /// purchase-deletion clamps at zero rather than going negative.
    pub stock: i64,
}

impl Product {
    /// Checks if the product is under the restock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Checks if `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Purchase Kind
// =============================================================================

/// Whether a purchase restocked an existing product or introduced a new one.
///
/// This dichotomy drives the reconciliation engine: an `Existing` purchase is
/// an update-in-place on stock, a `New` purchase is a create (and its deletion
/// a cascade-delete of the created product).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseKind {
    /// Restock of a product already in the catalog.
    Existing,
    /// First purchase of a product created alongside this record.
    New,
}

// =============================================================================
// New Product Data
// =============================================================================

/// Catalog fields for a product created by a `New`-kind purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProductData {
    pub name: String,
    pub description: String,
    pub category_id: String,
}

// =============================================================================
// Purchase
// =============================================================================

/// A stock purchase record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Purchase {
    pub id: String,

    /// The product this purchase stocked. For `New`-kind purchases this is
    /// the id of the product the engine created.
    pub product_id: String,

    /// Product name at time of purchase (frozen).
    pub product_name: String,

    /// Units bought (always positive).
    pub quantity: i64,

    /// Price per unit in cents at time of purchase (frozen).
    pub unit_price_cents: i64,

    /// Line total in cents (unit_price × quantity).
    pub total_price_cents: i64,

    /// When the purchase happened.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// Existing-product restock or new-product introduction.
    pub kind: PurchaseKind,

    /// Present iff `kind` is [`PurchaseKind::New`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_product: Option<NewProductData>,
}

impl Purchase {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: String,

    /// The product sold.
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Units sold (always positive, never more than stock at sale time).
    pub quantity: i64,

    /// Price per unit in cents at time of sale (frozen).
    pub unit_price_cents: i64,

    /// Line total in cents (unit_price × quantity).
    pub total_price_cents: i64,

    /// When the sale happened.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl Sale {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_stock_boundary() {
        let mut product = Product {
            id: "p1".to_string(),
            name: "Widget".to_string(),
            description: String::new(),
            category_id: "c1".to_string(),
            stock: 9,
        };
        assert!(product.is_low_stock());

        product.stock = 10;
        assert!(!product.is_low_stock());
    }

    #[test]
    fn test_can_sell() {
        let product = Product {
            id: "p1".to_string(),
            name: "Widget".to_string(),
            description: String::new(),
            category_id: "c1".to_string(),
            stock: 3,
        };
        assert!(product.can_sell(3));
        assert!(!product.can_sell(4));
    }

    #[test]
    fn test_purchase_kind_serde_format() {
        // The stored format uses lowercase tags, matching the persisted
        // collections the presentation layer reads.
        assert_eq!(
            serde_json::to_string(&PurchaseKind::Existing).unwrap(),
            r#""existing""#
        );
        assert_eq!(
            serde_json::to_string(&PurchaseKind::New).unwrap(),
            r#""new""#
        );
    }

    #[test]
    fn test_purchase_new_product_omitted_when_absent() {
        let purchase = Purchase {
            id: "b1".to_string(),
            product_id: "p1".to_string(),
            product_name: "Widget".to_string(),
            quantity: 2,
            unit_price_cents: 500,
            total_price_cents: 1000,
            date: chrono::Utc::now(),
            kind: PurchaseKind::Existing,
            new_product: None,
        };
        let json = serde_json::to_string(&purchase).unwrap();
        assert!(!json.contains("new_product"));
        assert_eq!(purchase.total_price(), Money::from_cents(1000));
    }
}
