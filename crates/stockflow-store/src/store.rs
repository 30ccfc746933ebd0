//! # Inventory Store
//!
//! The write-through entity store: an in-memory [`Ledger`] bound 1:1 to
//! key-value entries, one key per collection plus one for the current user.
//!
//! ## Write-Through Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mutation Lifecycle                                 │
//! │                                                                         │
//! │  Presentation command (e.g. record a sale)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Reconciliation engine ── typed error? ──► returned to caller,         │
//! │       │                                    nothing persisted           │
//! │       ▼                                                                 │
//! │  Affected collections serialized and written back                      │
//! │       │                                                                 │
//! │       └── write failed? logged at warn, operation still reports Ok     │
//! │           (single local writer; the in-memory ledger stays the truth   │
//! │           for this session - fire-and-forget persistence)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On open, each collection loads from its key; missing or malformed values
//! fall back to the empty collection with a warning, and a first run seeds
//! the default category palette.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use stockflow_core::id::UuidGenerator;
use stockflow_core::ledger::{CategoryInput, ProductInput, PurchaseInput, SaleInput};
use stockflow_core::{Category, IdGenerator, Ledger, Product, Purchase, Sale, User};

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

// =============================================================================
// Storage Keys
// =============================================================================
// One key per entity collection and one for the current user.

pub const CATEGORIES_KEY: &str = "stockflow-categories";
pub const PRODUCTS_KEY: &str = "stockflow-products";
pub const PURCHASES_KEY: &str = "stockflow-purchases";
pub const SALES_KEY: &str = "stockflow-sales";
pub const USER_KEY: &str = "stockflow-user";

/// Categories seeded on first run, with the standard badge palette.
const DEFAULT_CATEGORIES: [(&str, &str); 5] = [
    ("Electronics", "#3B82F6"),
    ("Clothing", "#8B5CF6"),
    ("Home & Garden", "#10B981"),
    ("Sports", "#F59E0B"),
    ("Books", "#EF4444"),
];

// =============================================================================
// Inventory Store
// =============================================================================

/// The entity store: owns the ledger and writes every mutation back to the
/// key-value backend.
pub struct InventoryStore<K: KeyValueStore> {
    kv: K,
    ids: Box<dyn IdGenerator>,
    ledger: Ledger,
    user: Option<User>,
}

impl<K: KeyValueStore> InventoryStore<K> {
    /// Opens the store over a backend, loading all collections.
    pub fn open(kv: K) -> StoreResult<Self> {
        Self::open_with_ids(kv, Box::new(UuidGenerator))
    }

    /// Opens the store with an explicit id source (deterministic in tests).
    pub fn open_with_ids(kv: K, ids: Box<dyn IdGenerator>) -> StoreResult<Self> {
        let ledger = Ledger {
            categories: load_collection(&kv, CATEGORIES_KEY)?,
            products: load_collection(&kv, PRODUCTS_KEY)?,
            purchases: load_collection(&kv, PURCHASES_KEY)?,
            sales: load_collection(&kv, SALES_KEY)?,
        };
        let user = load_user(&kv)?;

        let mut store = InventoryStore {
            kv,
            ids,
            ledger,
            user,
        };

        if store.ledger.categories.is_empty() {
            store.seed_default_categories();
        }

        info!(
            categories = store.ledger.categories.len(),
            products = store.ledger.products.len(),
            purchases = store.ledger.purchases.len(),
            sales = store.ledger.sales.len(),
            "Inventory store opened"
        );
        Ok(store)
    }

    fn seed_default_categories(&mut self) {
        for (name, color) in DEFAULT_CATEGORIES {
            self.ledger.categories.push(Category {
                id: self.ids.next_id(),
                name: name.to_string(),
                color: color.to_string(),
            });
        }
        debug!(count = DEFAULT_CATEGORIES.len(), "Seeded default categories");
        self.persist(CATEGORIES_KEY, &self.ledger.categories);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The underlying ledger, for report aggregation.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn categories(&self) -> &[Category] {
        &self.ledger.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.ledger.products
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.ledger.purchases
    }

    pub fn sales(&self) -> &[Sale] {
        &self.ledger.sales
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    pub fn add_category(&mut self, input: CategoryInput) -> StoreResult<Category> {
        let category = self.ledger.add_category(input, self.ids.as_ref())?;
        debug!(id = %category.id, name = %category.name, "Added category");
        self.persist(CATEGORIES_KEY, &self.ledger.categories);
        Ok(category)
    }

    pub fn delete_category(&mut self, id: &str) -> StoreResult<Category> {
        let category = self.ledger.delete_category(id)?;
        debug!(id = %id, "Deleted category");
        self.persist(CATEGORIES_KEY, &self.ledger.categories);
        Ok(category)
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    pub fn add_product(&mut self, input: ProductInput) -> StoreResult<Product> {
        let product = self.ledger.add_product(input, self.ids.as_ref())?;
        debug!(id = %product.id, name = %product.name, "Added product");
        self.persist(PRODUCTS_KEY, &self.ledger.products);
        Ok(product)
    }

    pub fn update_product(&mut self, id: &str, input: ProductInput) -> StoreResult<Product> {
        let product = self.ledger.update_product(id, input)?;
        debug!(id = %id, "Updated product");
        self.persist(PRODUCTS_KEY, &self.ledger.products);
        Ok(product)
    }

    /// Deletes a product; its purchase and sale records cascade away.
    pub fn delete_product(&mut self, id: &str) -> StoreResult<Product> {
        let product = self.ledger.delete_product(id)?;
        debug!(id = %id, "Deleted product with cascade");
        self.persist(PRODUCTS_KEY, &self.ledger.products);
        self.persist(PURCHASES_KEY, &self.ledger.purchases);
        self.persist(SALES_KEY, &self.ledger.sales);
        Ok(product)
    }

    // -------------------------------------------------------------------------
    // Purchases
    // -------------------------------------------------------------------------

    pub fn add_purchase(&mut self, input: PurchaseInput) -> StoreResult<Purchase> {
        let purchase = self.ledger.add_purchase(input, self.ids.as_ref())?;
        debug!(
            id = %purchase.id,
            product_id = %purchase.product_id,
            quantity = purchase.quantity,
            "Recorded purchase"
        );
        self.persist(PRODUCTS_KEY, &self.ledger.products);
        self.persist(PURCHASES_KEY, &self.ledger.purchases);
        Ok(purchase)
    }

    pub fn delete_purchase(&mut self, id: &str) -> StoreResult<Purchase> {
        let purchase = self.ledger.delete_purchase(id)?;
        debug!(id = %id, kind = ?purchase.kind, "Deleted purchase");
        // A new-kind deletion cascades into the sale collection too.
        self.persist(PRODUCTS_KEY, &self.ledger.products);
        self.persist(PURCHASES_KEY, &self.ledger.purchases);
        self.persist(SALES_KEY, &self.ledger.sales);
        Ok(purchase)
    }

    // -------------------------------------------------------------------------
    // Sales
    // -------------------------------------------------------------------------

    pub fn add_sale(&mut self, input: SaleInput) -> StoreResult<Sale> {
        let sale = self.ledger.add_sale(input, self.ids.as_ref())?;
        debug!(
            id = %sale.id,
            product_id = %sale.product_id,
            quantity = sale.quantity,
            "Recorded sale"
        );
        self.persist(PRODUCTS_KEY, &self.ledger.products);
        self.persist(SALES_KEY, &self.ledger.sales);
        Ok(sale)
    }

    pub fn delete_sale(&mut self, id: &str) -> StoreResult<Sale> {
        let sale = self.ledger.delete_sale(id)?;
        debug!(id = %id, "Deleted sale, stock restored");
        self.persist(PRODUCTS_KEY, &self.ledger.products);
        self.persist(SALES_KEY, &self.ledger.sales);
        Ok(sale)
    }

    // -------------------------------------------------------------------------
    // Current User
    // -------------------------------------------------------------------------

    /// Captures the local user. Plain name/email, no verification.
    pub fn login(&mut self, name: impl Into<String>, email: impl Into<String>) -> User {
        let user = User {
            id: self.ids.next_id(),
            name: name.into(),
            email: email.into(),
        };
        info!(name = %user.name, "User logged in");
        self.user = Some(user.clone());
        self.persist(USER_KEY, &self.user);
        user
    }

    /// Clears the stored user.
    pub fn logout(&mut self) {
        info!("User logged out");
        self.user = None;
        self.persist(USER_KEY, &self.user);
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Writes one collection back. Failures are logged, not surfaced: there
    /// is a single local writer and the in-memory ledger remains the source
    /// of truth for the session.
    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                if let Err(err) = self.kv.set(key, &json) {
                    warn!(key, %err, "Failed to persist collection");
                }
            }
            Err(err) => warn!(key, %err, "Failed to serialize collection"),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Loads one collection, treating missing or malformed values as empty.
fn load_collection<T: DeserializeOwned>(
    kv: &impl KeyValueStore,
    key: &str,
) -> StoreResult<Vec<T>> {
    match kv.get(key)? {
        None => Ok(Vec::new()),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(values) => Ok(values),
            Err(err) => {
                warn!(key, %err, "Malformed stored collection, starting empty");
                Ok(Vec::new())
            }
        },
    }
}

fn load_user(kv: &impl KeyValueStore) -> StoreResult<Option<User>> {
    match kv.get(USER_KEY)? {
        None => Ok(None),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(user) => Ok(user),
            Err(err) => {
                warn!(key = USER_KEY, %err, "Malformed stored user, starting logged out");
                Ok(None)
            }
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::kv::{MemoryStore, RedbStore};
    use chrono::{TimeZone, Utc};
    use stockflow_core::id::SequentialGenerator;
    use stockflow_core::ledger::PurchaseTarget;
    use stockflow_core::CoreError;

    fn open_memory(kv: MemoryStore) -> InventoryStore<MemoryStore> {
        InventoryStore::open_with_ids(kv, Box::new(SequentialGenerator::default())).unwrap()
    }

    fn date() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 7, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_first_run_seeds_default_categories() {
        let kv = MemoryStore::new();
        let store = open_memory(kv.clone());

        assert_eq!(store.categories().len(), 5);
        assert!(store.categories().iter().any(|c| c.name == "Electronics"));

        // The seed is persisted, so a reopen loads it instead of reseeding.
        let reopened = open_memory(kv);
        assert_eq!(reopened.categories().len(), 5);
        assert_eq!(reopened.categories(), store.categories());
    }

    #[test]
    fn test_mutations_survive_reopen() {
        let kv = MemoryStore::new();
        let mut store = open_memory(kv.clone());

        let purchase = store
            .add_purchase(PurchaseInput {
                target: PurchaseTarget::new_product("Widget", "shiny", "cat-1"),
                quantity: 20,
                unit_price_cents: 250,
                date: date(),
            })
            .unwrap();
        store
            .add_sale(SaleInput {
                product_id: purchase.product_id.clone(),
                quantity: 3,
                unit_price_cents: 1000,
                date: date(),
            })
            .unwrap();

        let reopened = open_memory(kv);
        let product = reopened.ledger().product(&purchase.product_id).unwrap();
        assert_eq!(product.stock, 17);
        assert_eq!(reopened.purchases().len(), 1);
        assert_eq!(reopened.sales().len(), 1);
        assert_eq!(reopened.sales()[0].total_price_cents, 3000);
    }

    #[test]
    fn test_engine_errors_pass_through_and_persist_nothing() {
        let kv = MemoryStore::new();
        let mut store = open_memory(kv.clone());

        let err = store
            .add_sale(SaleInput {
                product_id: "missing".to_string(),
                quantity: 1,
                unit_price_cents: 100,
                date: date(),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::ProductNotFound(_))
        ));

        assert_eq!(kv.get(SALES_KEY).unwrap(), None);
    }

    #[test]
    fn test_delete_purchase_cascade_persists_all_collections() {
        let kv = MemoryStore::new();
        let mut store = open_memory(kv.clone());

        let purchase = store
            .add_purchase(PurchaseInput {
                target: PurchaseTarget::new_product("Widget", "", "cat-1"),
                quantity: 10,
                unit_price_cents: 100,
                date: date(),
            })
            .unwrap();
        store
            .add_sale(SaleInput {
                product_id: purchase.product_id.clone(),
                quantity: 2,
                unit_price_cents: 500,
                date: date(),
            })
            .unwrap();

        store.delete_purchase(&purchase.id).unwrap();

        let reopened = open_memory(kv);
        assert!(reopened.ledger().product(&purchase.product_id).is_none());
        assert!(reopened.purchases().is_empty());
        assert!(reopened.sales().is_empty());
    }

    #[test]
    fn test_malformed_collection_degrades_to_empty() {
        let kv = MemoryStore::new();
        kv.set(PRODUCTS_KEY, "definitely not json").unwrap();
        kv.set(USER_KEY, "{broken").unwrap();

        let store = open_memory(kv);
        assert!(store.products().is_empty());
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_user_login_logout_roundtrip() {
        let kv = MemoryStore::new();
        let mut store = open_memory(kv.clone());
        assert!(store.current_user().is_none());

        let user = store.login("Ada", "ada@example.com");
        assert_eq!(store.current_user(), Some(&user));

        let reopened = open_memory(kv.clone());
        assert_eq!(reopened.current_user(), Some(&user));

        let mut store = reopened;
        store.logout();
        let reopened = open_memory(kv);
        assert!(reopened.current_user().is_none());
    }

    #[test]
    fn test_category_guard_reaches_the_store_api() {
        let kv = MemoryStore::new();
        let mut store = open_memory(kv);

        let category_id = store.categories()[0].id.clone();
        store
            .add_product(ProductInput {
                name: "Widget".to_string(),
                description: String::new(),
                category_id: category_id.clone(),
            })
            .unwrap();

        let err = store.delete_category(&category_id).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::CategoryInUse { .. })
        ));
    }

    #[test]
    fn test_redb_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockflow.redb");

        let product_id = {
            let kv = RedbStore::open(&path).unwrap();
            let mut store =
                InventoryStore::open_with_ids(kv, Box::new(SequentialGenerator::default()))
                    .unwrap();
            let purchase = store
                .add_purchase(PurchaseInput {
                    target: PurchaseTarget::new_product("Widget", "", "cat-1"),
                    quantity: 5,
                    unit_price_cents: 200,
                    date: date(),
                })
                .unwrap();
            purchase.product_id
        };

        let kv = RedbStore::open(&path).unwrap();
        let store =
            InventoryStore::open_with_ids(kv, Box::new(SequentialGenerator::default())).unwrap();
        assert_eq!(store.ledger().product(&product_id).unwrap().stock, 5);
        assert_eq!(store.purchases().len(), 1);
    }

    #[test]
    fn test_persistence_failure_does_not_mask_domain_outcome() {
        /// Backend that accepts reads but refuses every write.
        #[derive(Default)]
        struct ReadOnly;

        impl KeyValueStore for ReadOnly {
            fn get(&self, _key: &str) -> StoreResult<Option<String>> {
                Ok(None)
            }

            fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
                Err(StoreError::Storage("read-only backend".to_string()))
            }
        }

        let mut store =
            InventoryStore::open_with_ids(ReadOnly, Box::new(SequentialGenerator::default()))
                .unwrap();

        // Writes fail behind the scenes; the operation still reports the
        // engine's outcome.
        let purchase = store
            .add_purchase(PurchaseInput {
                target: PurchaseTarget::new_product("Widget", "", "cat-1"),
                quantity: 2,
                unit_price_cents: 100,
                date: date(),
            })
            .unwrap();
        assert_eq!(store.ledger().product(&purchase.product_id).unwrap().stock, 2);
    }
}
