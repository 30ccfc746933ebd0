//! # Ledger: The Stock Reconciliation Engine
//!
//! The [`Ledger`] owns the four entity collections and enforces the rules
//! that keep them mutually consistent: product stock reflects net
//! purchases − sales, new-product purchases create their product, and every
//! delete reverses or cascades the effect of the record it removes.
//!
//! ## Reconciliation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Stock Reconciliation                                │
//! │                                                                         │
//! │  add_purchase (existing) ──► stock += qty                              │
//! │  add_purchase (new)      ──► create Product { stock: qty }             │
//! │  add_sale                ──► stock -= qty   (fails if qty > stock)     │
//! │                                                                         │
//! │  delete_purchase (existing) ──► stock = max(0, stock - qty)            │
//! │  delete_purchase (new)      ──► delete the created Product (cascade)   │
//! │  delete_sale                ──► stock += qty                           │
//! │  delete_product             ──► drop every Purchase/Sale of that id    │
//! │                                                                         │
//! │  delete_category            ──► refused while any Product references it│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation validates its input and resolves its references before
//! mutating anything; a returned error means the ledger is unchanged. The
//! guards live in the engine, not the caller: a dangling product reference or
//! an oversell is a typed error even when the UI forgot to check first.
//!
//! Collections are plain vectors and cascades are scan-and-filter. At
//! single-user catalog sizes an index by product id buys nothing.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::id::IdGenerator;
use crate::money::Money;
use crate::types::{Category, NewProductData, Product, Purchase, PurchaseKind, Sale};
use crate::validation::{
    validate_category_name, validate_color, validate_product_name, validate_quantity,
    validate_unit_price_cents,
};

// =============================================================================
// Operation Inputs
// =============================================================================

/// Fields for creating or editing a catalog product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub category_id: String,
}

/// Fields for creating a category.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub color: String,
}

/// What a purchase stocks: a known product, or one created on the spot.
#[derive(Debug, Clone)]
pub enum PurchaseTarget {
    /// Restock the product with this id.
    Existing { product_id: String },
    /// Create a product from these fields with initial stock = the
    /// purchase quantity.
    New(NewProductData),
}

impl PurchaseTarget {
    /// Restock target for an existing product.
    pub fn existing(product_id: impl Into<String>) -> Self {
        PurchaseTarget::Existing {
            product_id: product_id.into(),
        }
    }

    /// Creation target for a product not yet in the catalog.
    pub fn new_product(
        name: impl Into<String>,
        description: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        PurchaseTarget::New(NewProductData {
            name: name.into(),
            description: description.into(),
            category_id: category_id.into(),
        })
    }
}

/// Fields for recording a purchase.
#[derive(Debug, Clone)]
pub struct PurchaseInput {
    pub target: PurchaseTarget,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub date: DateTime<Utc>,
}

/// Fields for recording a sale.
#[derive(Debug, Clone)]
pub struct SaleInput {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub date: DateTime<Utc>,
}

// =============================================================================
// Ledger
// =============================================================================

/// The four entity collections plus the reconciliation operations over them.
///
/// The ledger is an explicit value, not ambient state: callers own it, pass
/// it where it is needed, and can snapshot it by cloning. The persistence
/// layer wraps it with write-through storage; the engine itself never
/// touches I/O.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub purchases: Vec<Purchase>,
    pub sales: Vec<Sale>,
}

impl Ledger {
    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Finds a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Finds a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Finds a purchase by id.
    pub fn purchase(&self, id: &str) -> Option<&Purchase> {
        self.purchases.iter().find(|p| p.id == id)
    }

    /// Finds a sale by id.
    pub fn sale(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Counts products referencing a category.
    pub fn products_in_category(&self, category_id: &str) -> usize {
        self.products
            .iter()
            .filter(|p| p.category_id == category_id)
            .count()
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    /// Adds a category.
    pub fn add_category(
        &mut self,
        input: CategoryInput,
        ids: &dyn IdGenerator,
    ) -> CoreResult<Category> {
        validate_category_name(&input.name)?;
        validate_color(&input.color)?;

        let category = Category {
            id: ids.next_id(),
            name: input.name,
            color: input.color,
        };
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Deletes a category, refusing while products still reference it.
    pub fn delete_category(&mut self, id: &str) -> CoreResult<Category> {
        let pos = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CoreError::CategoryNotFound(id.to_string()))?;

        let product_count = self.products_in_category(id);
        if product_count > 0 {
            return Err(CoreError::CategoryInUse {
                category: self.categories[pos].name.clone(),
                product_count,
            });
        }

        Ok(self.categories.remove(pos))
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Adds a catalog product with zero stock.
    ///
    /// Stock enters the system through purchases, never through catalog
    /// edits.
    pub fn add_product(&mut self, input: ProductInput, ids: &dyn IdGenerator) -> CoreResult<Product> {
        validate_product_name(&input.name)?;

        let product = Product {
            id: ids.next_id(),
            name: input.name,
            description: input.description,
            category_id: input.category_id,
            stock: 0,
        };
        self.products.push(product.clone());
        Ok(product)
    }

    /// Edits a product's catalog fields. Stock is untouched.
    pub fn update_product(&mut self, id: &str, input: ProductInput) -> CoreResult<Product> {
        validate_product_name(&input.name)?;

        let product = self
            .product_mut(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
        product.name = input.name;
        product.description = input.description;
        product.category_id = input.category_id;
        Ok(product.clone())
    }

    /// Deletes a product and cascades to its purchase and sale records.
    ///
    /// The cascade is a direct filter, not a replay of per-record reversals:
    /// no other product's stock moves.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<Product> {
        let pos = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        let product = self.products.remove(pos);
        self.purchases.retain(|p| p.product_id != id);
        self.sales.retain(|s| s.product_id != id);
        Ok(product)
    }

    // -------------------------------------------------------------------------
    // Purchases
    // -------------------------------------------------------------------------

    /// Records a purchase.
    ///
    /// ## Reconciliation
    /// - [`PurchaseTarget::Existing`]: the product's stock rises by the
    ///   purchase quantity. Unknown ids fail with
    ///   [`CoreError::ProductNotFound`] before anything mutates.
    /// - [`PurchaseTarget::New`]: a product is created with
    ///   `stock = quantity` and the purchase records its id.
    ///
    /// The product name is snapshotted onto the record at write time.
    pub fn add_purchase(
        &mut self,
        input: PurchaseInput,
        ids: &dyn IdGenerator,
    ) -> CoreResult<Purchase> {
        validate_quantity(input.quantity)?;
        validate_unit_price_cents(input.unit_price_cents)?;

        let (product_id, product_name, kind, new_product) = match input.target {
            PurchaseTarget::Existing { product_id } => {
                let product = self
                    .product_mut(&product_id)
                    .ok_or_else(|| CoreError::ProductNotFound(product_id.clone()))?;
                product.stock += input.quantity;
                let name = product.name.clone();
                (product_id, name, PurchaseKind::Existing, None)
            }
            PurchaseTarget::New(data) => {
                validate_product_name(&data.name)?;
                let product = Product {
                    id: ids.next_id(),
                    name: data.name.clone(),
                    description: data.description.clone(),
                    category_id: data.category_id.clone(),
                    stock: input.quantity,
                };
                let id = product.id.clone();
                let name = product.name.clone();
                self.products.push(product);
                (id, name, PurchaseKind::New, Some(data))
            }
        };

        let purchase = Purchase {
            id: ids.next_id(),
            product_id,
            product_name,
            quantity: input.quantity,
            unit_price_cents: input.unit_price_cents,
            total_price_cents: Money::from_cents(input.unit_price_cents)
                .multiply_quantity(input.quantity)
                .cents(),
            date: input.date,
            kind,
            new_product,
        };
        self.purchases.push(purchase.clone());
        Ok(purchase)
    }

    /// Deletes a purchase, reversing its effect on the catalog.
    ///
    /// ## Reconciliation
    /// - Existing-kind: stock drops by the purchase quantity, clamped at
    ///   zero. The clamp is a tolerated floor, not an error.
    /// - New-kind: the purchase introduced its product, so the product is
    ///   deleted outright - cascading to every purchase and sale that
    ///   references it, this record included.
    pub fn delete_purchase(&mut self, id: &str) -> CoreResult<Purchase> {
        let purchase = self
            .purchase(id)
            .cloned()
            .ok_or_else(|| CoreError::PurchaseNotFound(id.to_string()))?;

        match purchase.kind {
            PurchaseKind::Existing => {
                let product = self
                    .product_mut(&purchase.product_id)
                    .ok_or_else(|| CoreError::ProductNotFound(purchase.product_id.clone()))?;
                product.stock = (product.stock - purchase.quantity).max(0);
                self.purchases.retain(|p| p.id != id);
            }
            PurchaseKind::New => {
                self.delete_product(&purchase.product_id)?;
                // The cascade already dropped this record; keep the removal
                // unconditional anyway.
                self.purchases.retain(|p| p.id != id);
            }
        }

        Ok(purchase)
    }

    // -------------------------------------------------------------------------
    // Sales
    // -------------------------------------------------------------------------

    /// Records a sale, taking the units out of stock.
    ///
    /// The stock check lives here, not in the caller: a direct call that
    /// bypasses the UI hits the same [`CoreError::InsufficientStock`] guard,
    /// so stock can never go negative through a sale.
    pub fn add_sale(&mut self, input: SaleInput, ids: &dyn IdGenerator) -> CoreResult<Sale> {
        validate_quantity(input.quantity)?;
        validate_unit_price_cents(input.unit_price_cents)?;

        let product = self
            .product_mut(&input.product_id)
            .ok_or_else(|| CoreError::ProductNotFound(input.product_id.clone()))?;

        if !product.can_sell(input.quantity) {
            return Err(CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock,
                requested: input.quantity,
            });
        }

        product.stock -= input.quantity;
        let product_name = product.name.clone();

        let sale = Sale {
            id: ids.next_id(),
            product_id: input.product_id,
            product_name,
            quantity: input.quantity,
            unit_price_cents: input.unit_price_cents,
            total_price_cents: Money::from_cents(input.unit_price_cents)
                .multiply_quantity(input.quantity)
                .cents(),
            date: input.date,
        };
        self.sales.push(sale.clone());
        Ok(sale)
    }

    /// Deletes a sale, returning its units to stock.
    ///
    /// The restore is unconditional and unbounded - stock may exceed any
    /// previous level if purchases were deleted in between.
    pub fn delete_sale(&mut self, id: &str) -> CoreResult<Sale> {
        let sale = self
            .sale(id)
            .cloned()
            .ok_or_else(|| CoreError::SaleNotFound(id.to_string()))?;

        let product = self
            .product_mut(&sale.product_id)
            .ok_or_else(|| CoreError::ProductNotFound(sale.product_id.clone()))?;
        product.stock += sale.quantity;

        self.sales.retain(|s| s.id != id);
        Ok(sale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
