//! In-memory stores.
//!
//! Owner-scoped collections keep one async mutex per owner, so mutations for
//! the same owner run one at a time while different owners proceed in
//! parallel. The dashboard catalog and order book are single shared lists.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, RwLock};

use crate::domain::aggregates::inventory::{self, InventoryFilter, InventoryItem, InventoryPayload, InventoryView, Upserted};
use crate::domain::aggregates::order::{self, Order, OrderFilter, OrderStatus, StatusChanged};
use crate::domain::aggregates::wishlist::{self, WishlistItem};
use crate::domain::value_objects::OwnerId;
use crate::{Result, StorefrontError};

type Collection<R> = Arc<Mutex<Vec<R>>>;

/// Record lists keyed by owner, in insertion order.
pub struct OwnedCollections<R> {
    owners: RwLock<HashMap<OwnerId, Collection<R>>>,
}

impl<R> Default for OwnedCollections<R> {
    fn default() -> Self { Self { owners: RwLock::new(HashMap::new()) } }
}

impl<R: Clone + Send> OwnedCollections<R> {
    async fn existing(&self, owner: &OwnerId) -> Option<Collection<R>> {
        self.owners.read().await.get(owner).cloned()
    }

    async fn collection(&self, owner: &OwnerId) -> Collection<R> {
        if let Some(found) = self.existing(owner).await {
            return found;
        }
        Arc::clone(self.owners.write().await.entry(owner.clone()).or_default())
    }

    async fn is_registered(&self, owner: &OwnerId, collection: &Collection<R>) -> bool {
        self.owners.read().await.get(owner).is_some_and(|c| Arc::ptr_eq(c, collection))
    }

    /// Runs `f` on a locked, still-registered collection and unregisters it
    /// if `f` left it empty.
    async fn apply<T>(&self, owner: &OwnerId, collection: &Collection<R>, records: &mut Vec<R>, f: impl FnOnce(&mut Vec<R>) -> T) -> T {
        let out = f(records);
        if records.is_empty() {
            let mut owners = self.owners.write().await;
            if owners.get(owner).is_some_and(|c| Arc::ptr_eq(c, collection)) {
                owners.remove(owner);
            }
        }
        out
    }

    /// Runs `f` over the owner's records without copying them; `None` for
    /// unknown owners.
    pub async fn read<T>(&self, owner: &OwnerId, f: impl FnOnce(&[R]) -> T) -> Option<T> {
        let collection = self.existing(owner).await?;
        let records = collection.lock().await;
        Some(f(&records))
    }

    /// Copy of the owner's records; empty for unknown owners.
    pub async fn snapshot(&self, owner: &OwnerId) -> Vec<R> {
        self.read(owner, <[R]>::to_vec).await.unwrap_or_default()
    }

    /// Runs `f` with exclusive access to the owner's records, creating the
    /// collection if needed.
    pub async fn with<T>(&self, owner: &OwnerId, f: impl FnOnce(&mut Vec<R>) -> T) -> T {
        loop {
            let collection = self.collection(owner).await;
            let mut records = collection.lock().await;
            // Pruned while we waited for the lock.
            if !self.is_registered(owner, &collection).await { continue; }
            return self.apply(owner, &collection, &mut records, f).await;
        }
    }

    /// Like [`with`](Self::with) for operations that need an existing record:
    /// an unknown owner fails with `missing` and leaves no entry behind.
    pub async fn with_existing<T>(&self, owner: &OwnerId, missing: StorefrontError, f: impl FnOnce(&mut Vec<R>) -> Result<T>) -> Result<T> {
        loop {
            let Some(collection) = self.existing(owner).await else { return Err(missing) };
            let mut records = collection.lock().await;
            if !self.is_registered(owner, &collection).await { continue; }
            return self.apply(owner, &collection, &mut records, f).await;
        }
    }

    pub async fn owner_count(&self) -> usize { self.owners.read().await.len() }
}

// =============================================================================
// Wishlist
// =============================================================================

#[derive(Default)]
pub struct WishlistStore {
    items: OwnedCollections<WishlistItem>,
}

impl WishlistStore {
    pub async fn list(&self, owner: &OwnerId) -> Vec<WishlistItem> { self.items.snapshot(owner).await }

    pub async fn add(&self, owner: &OwnerId, item: WishlistItem) -> Result<WishlistItem> {
        self.items.with(owner, |items| wishlist::add(items, item)).await
    }

    pub async fn remove(&self, owner: &OwnerId, product_id: &str) -> Result<WishlistItem> {
        self.items.with_existing(owner, StorefrontError::WishlistItemNotFound, |items| wishlist::remove(items, product_id)).await
    }

    pub async fn seed(&self, owner: &OwnerId, seed: Vec<WishlistItem>) {
        self.items.with(owner, |items| items.extend(seed)).await;
    }
}

// =============================================================================
// Pharmacy inventory
// =============================================================================

#[derive(Default)]
pub struct InventoryCatalog {
    items: RwLock<Vec<InventoryItem>>,
}

impl InventoryCatalog {
    pub fn new(items: Vec<InventoryItem>) -> Self { Self { items: RwLock::new(items) } }

    pub async fn list(&self, filter: &InventoryFilter, today: NaiveDate) -> Vec<InventoryView> {
        inventory::list(&self.items.read().await, filter, today)
    }

    pub async fn get(&self, id: &str) -> Result<InventoryItem> {
        inventory::find(&self.items.read().await, id).cloned()
    }

    pub async fn upsert(&self, payload: InventoryPayload) -> Result<Upserted> {
        let (id, draft) = payload.into_parts()?;
        inventory::upsert(&mut *self.items.write().await, id, draft)
    }

    pub async fn remove(&self, id: &str) -> Result<InventoryItem> {
        inventory::remove(&mut *self.items.write().await, id)
    }
}

// =============================================================================
// Pharmacy orders
// =============================================================================

#[derive(Default)]
pub struct OrderBook {
    orders: RwLock<Vec<Order>>,
}

impl OrderBook {
    pub fn new(orders: Vec<Order>) -> Self { Self { orders: RwLock::new(orders) } }

    pub async fn list(&self, filter: &OrderFilter) -> Vec<Order> { order::list(&self.orders.read().await, filter) }

    pub async fn get(&self, id: &str) -> Result<Order> { order::find(&self.orders.read().await, id).cloned() }

    pub async fn update_status(&self, id: &str, next: OrderStatus) -> Result<StatusChanged> {
        order::update_status(&mut self.orders.write().await, id, next)
    }
}
