//! # Inventory Store
//!
//! Owns every product and the locks that guard them.
//!
//! ## Two Lock Tiers
//!
//! - The **structural lock** (`catalog`, an `RwLock`) guards id allocation, the
//!   description index and map membership. Adding a product takes it for writing; looking a
//!   product up takes it for reading and lets go before touching the product.
//! - Each product carries its own **entity lock** (`ProductSlot::quantity`, a `Mutex`),
//!   created once when the product is inserted and shared through an `Arc` by every later
//!   operation on that product. Changes to one product are serialized by it; changes to
//!   different products never wait for each other.
//!
//! Lock order is structural, then entity. Nothing here waits for the structural lock while
//! holding a product's lock.

use crate::model::{ProductId, ProductListing, StockStatus};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// One product. The description is fixed at creation; only the quantity changes.
#[derive(Debug)]
struct ProductSlot {
    description: String,
    quantity: Mutex<i64>,
}

#[derive(Debug)]
struct Catalog {
    next_id: u32,
    products: BTreeMap<ProductId, Arc<ProductSlot>>,
    by_description: HashMap<String, ProductId>,
}

impl Catalog {
    fn new() -> Self {
        Self {
            next_id: 1,
            products: BTreeMap::new(),
            by_description: HashMap::new(),
        }
    }

    fn find(&self, description: &str) -> Option<(ProductId, Arc<ProductSlot>)> {
        let id = *self.by_description.get(description)?;
        self.products.get(&id).map(|slot| (id, slot.clone()))
    }

    fn insert(&mut self, description: String, quantity: u32) -> ProductId {
        let id = ProductId(self.next_id);
        self.next_id += 1;
        self.by_description.insert(description.clone(), id);
        self.products.insert(
            id,
            Arc::new(ProductSlot {
                description,
                quantity: Mutex::new(i64::from(quantity)),
            }),
        );
        id
    }
}

/// The product records of one inventory service.
#[derive(Debug)]
pub struct InventoryStore {
    catalog: RwLock<Catalog>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Catalog::new()),
        }
    }

    /// Adds `quantity` units under `description`.
    ///
    /// A new description gets the next id. A description that already exists keeps its id and
    /// has `quantity` added to its stock under that product's own lock.
    pub async fn add_product(&self, description: String, quantity: u32) -> ProductId {
        let (id, slot) = {
            let mut catalog = self.catalog.write().await;
            match catalog.find(&description) {
                Some(found) => found,
                None => {
                    let id = catalog.insert(description, quantity);
                    info!(product_id = %id, quantity, size = catalog.products.len(), "Product added");
                    return id;
                }
            }
        };

        let mut stock = slot.quantity.lock().await;
        *stock = stock.saturating_add(i64::from(quantity));
        info!(product_id = %id, added = quantity, quantity = *stock, "Product restocked");
        id
    }

    /// Applies `delta` to the product's quantity.
    ///
    /// Returns the new quantity, or `InsufficientStock` without changing anything if the result
    /// would be negative (or does not fit in an `i64`). Unknown ids yield `UnknownProduct`.
    pub async fn change_quantity(&self, id: ProductId, delta: i64) -> StockStatus {
        let slot = self.catalog.read().await.products.get(&id).cloned();
        let Some(slot) = slot else {
            debug!(product_id = %id, delta, "Unknown product");
            return StockStatus::UnknownProduct;
        };

        let mut stock = slot.quantity.lock().await;
        match stock.checked_add(delta) {
            Some(updated) if updated >= 0 => {
                *stock = updated;
                debug!(product_id = %id, delta, quantity = updated, "Quantity changed");
                StockStatus::Committed(updated)
            }
            _ => {
                debug!(product_id = %id, delta, quantity = *stock, "Insufficient stock");
                StockStatus::InsufficientStock
            }
        }
    }

    /// Every product in ascending id order.
    ///
    /// The structural lock is held for reading across the whole walk, and each quantity is read
    /// under its product's lock, so no row reflects a half-applied change and no product can
    /// appear mid-listing.
    pub async fn list_products(&self) -> Vec<ProductListing> {
        let catalog = self.catalog.read().await;
        let mut listing = Vec::with_capacity(catalog.products.len());
        for (id, slot) in &catalog.products {
            let quantity = *slot.quantity.lock().await;
            listing.push(ProductListing {
                id: *id,
                quantity,
                description: slot.description.clone(),
            });
        }
        listing
    }

    pub async fn product_count(&self) -> usize {
        self.catalog.read().await.products.len()
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::JoinSet;

    #[tokio::test]
    async fn test_add_and_change_quantity() {
        let store = InventoryStore::new();

        let id = store.add_product("Widget".to_string(), 10).await;
        assert_eq!(id, ProductId(1));

        assert_eq!(store.change_quantity(id, -3).await, StockStatus::Committed(7));
        assert_eq!(
            store.change_quantity(id, -10).await,
            StockStatus::InsufficientStock
        );

        let listing = store.list_products().await;
        assert_eq!(listing[0].quantity, 7, "failed change must leave stock alone");
    }

    #[tokio::test]
    async fn test_matching_description_restocks_existing_product() {
        let store = InventoryStore::new();

        let widget = store.add_product("Widget".to_string(), 10).await;
        let gadget = store.add_product("Gadget".to_string(), 1).await;
        let again = store.add_product("Widget".to_string(), 5).await;

        assert_eq!(widget, ProductId(1));
        assert_eq!(gadget, ProductId(2));
        assert_eq!(again, widget);
        assert_eq!(store.product_count().await, 2);
        assert_eq!(store.change_quantity(widget, 0).await, StockStatus::Committed(15));
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let store = InventoryStore::new();
        assert_eq!(
            store.change_quantity(ProductId(99), 1).await,
            StockStatus::UnknownProduct
        );
    }

    #[tokio::test]
    async fn test_overflowing_change_is_rejected() {
        let store = InventoryStore::new();
        let id = store.add_product("Bolt".to_string(), 1).await;
        assert_eq!(
            store.change_quantity(id, i64::MAX).await,
            StockStatus::InsufficientStock
        );
        assert_eq!(store.change_quantity(id, 0).await, StockStatus::Committed(1));
    }

    #[tokio::test]
    async fn test_listing_is_sorted_by_id() {
        let store = InventoryStore::new();
        for name in ["c", "a", "b", "d", "e", "f", "g", "h", "i", "j", "k"] {
            store.add_product(name.to_string(), 1).await;
        }
        let ids: Vec<u32> = store
            .list_products()
            .await
            .iter()
            .map(|p| p.id.0)
            .collect();
        assert_eq!(ids, (1..=11).collect::<Vec<_>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_never_duplicate() {
        let store = Arc::new(InventoryStore::new());
        let mut tasks = JoinSet::new();
        for i in 0..40 {
            let store = store.clone();
            tasks.spawn(async move { store.add_product(format!("item-{}", i % 4), 1).await });
        }
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap();
        }

        let listing = store.list_products().await;
        assert_eq!(listing.len(), 4);
        assert!(listing.iter().all(|p| p.quantity == 10));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_changes_are_serialized() {
        let store = Arc::new(InventoryStore::new());
        let id = store.add_product("Nut".to_string(), 100).await;

        let mut tasks = JoinSet::new();
        for i in 0..200 {
            let store = store.clone();
            let delta = if i % 2 == 0 { -1 } else { 1 };
            tasks.spawn(async move { (delta, store.change_quantity(id, delta).await) });
        }

        let mut committed = 0;
        while let Some(joined) = tasks.join_next().await {
            let (delta, status) = joined.unwrap();
            match status {
                StockStatus::Committed(quantity) => {
                    assert!(quantity >= 0);
                    committed += delta;
                }
                other => panic!("unexpected status {other:?}"),
            }
        }

        assert_eq!(
            store.change_quantity(id, 0).await,
            StockStatus::Committed(100 + committed)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_stock_never_goes_negative_under_contention() {
        let store = Arc::new(InventoryStore::new());
        let id = store.add_product("Last units".to_string(), 5).await;

        let mut tasks = JoinSet::new();
        for _ in 0..20 {
            let store = store.clone();
            tasks.spawn(async move { store.change_quantity(id, -1).await });
        }

        let mut granted = 0;
        let mut refused = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined.unwrap() {
                StockStatus::Committed(_) => granted += 1,
                StockStatus::InsufficientStock => refused += 1,
                StockStatus::UnknownProduct => panic!("product exists"),
            }
        }
        assert_eq!((granted, refused), (5, 15));
        assert_eq!(store.change_quantity(id, 0).await, StockStatus::Committed(0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_listing_during_concurrent_writes() {
        let store = Arc::new(InventoryStore::new());
        for i in 0..5 {
            store.add_product(format!("seed-{i}"), 1).await;
        }

        let mut writers = JoinSet::new();
        for i in 0..20u32 {
            let store = store.clone();
            writers.spawn(async move {
                store.add_product(format!("late-{i}"), 1).await;
                // Every product's stock stays within 0..=1.
                let id = ProductId(i % 5 + 1);
                if let StockStatus::Committed(_) = store.change_quantity(id, -1).await {
                    store.change_quantity(id, 1).await;
                }
            });
        }

        let mut readers = JoinSet::new();
        for _ in 0..4 {
            let store = store.clone();
            readers.spawn(async move {
                for _ in 0..25 {
                    let listing = store.list_products().await;
                    let ids: Vec<u32> = listing.iter().map(|p| p.id.0).collect();
                    let expected: Vec<u32> = (1..=listing.len() as u32).collect();
                    assert_eq!(ids, expected, "listing must be sorted with no gaps");
                    assert!(listing.iter().all(|p| (0..=1).contains(&p.quantity)));
                    tokio::task::yield_now().await;
                }
            });
        }

        while let Some(joined) = writers.join_next().await {
            joined.unwrap();
        }
        while let Some(joined) = readers.join_next().await {
            joined.unwrap();
        }
        assert_eq!(store.list_products().await.len(), 25);
    }
}
