//! Storage for the storefront's record collections.
//!
//! Addresses go through [`AddressStore`], which runs the default-flag
//! operations against either the in-memory collections or Postgres. The
//! wishlist, inventory catalog and order book are in-memory.

pub mod memory;
pub mod postgres;
pub mod seed;

use std::sync::Arc;

use crate::domain::aggregates::address::{self, Address, AddressDraft};
use crate::domain::defaults::Mutation;
use crate::domain::value_objects::OwnerId;
use crate::{Result, StorefrontError};

pub use memory::{InventoryCatalog, OrderBook, OwnedCollections, WishlistStore};
pub use postgres::PgAddressStore;

#[derive(Clone)]
pub enum AddressStore {
    Memory(Arc<OwnedCollections<Address>>),
    Postgres(PgAddressStore),
}

impl AddressStore {
    pub fn in_memory() -> Self { Self::Memory(Arc::default()) }

    pub fn backend(&self) -> &'static str {
        match self { Self::Memory(_) => "memory", Self::Postgres(_) => "postgres" }
    }

    pub async fn list(&self, owner: &OwnerId) -> Result<Vec<Address>> {
        match self {
            Self::Memory(book) => Ok(book.snapshot(owner).await),
            Self::Postgres(pg) => pg.list(owner).await,
        }
    }

    pub async fn get(&self, owner: &OwnerId, id: &str) -> Result<Address> {
        match self {
            Self::Memory(book) => book.read(owner, |records| address::find(records, id).cloned()).await
                .unwrap_or(Err(StorefrontError::AddressNotFound)),
            Self::Postgres(pg) => pg.get(owner, id).await,
        }
    }

    pub async fn create(&self, owner: &OwnerId, draft: AddressDraft) -> Result<Mutation<Address>> {
        self.mutate(owner, |book| Ok(address::create(book, owner, draft))).await
    }

    pub async fn update(&self, owner: &OwnerId, id: &str, draft: AddressDraft) -> Result<Mutation<Address>> {
        self.mutate_existing(owner, |book| address::replace(book, id, draft)).await
    }

    pub async fn delete(&self, owner: &OwnerId, id: &str) -> Result<Mutation<Address>> {
        self.mutate_existing(owner, |book| address::delete(book, id)).await
    }

    pub async fn set_default(&self, owner: &OwnerId, id: &str) -> Result<Mutation<Address>> {
        self.mutate_existing(owner, |book| address::make_default(book, id)).await
    }

    /// Loads `seed` for an owner whose address book is still empty.
    pub async fn seed(&self, owner: &OwnerId, seed: Vec<Address>) -> Result<()> {
        self.mutate(owner, |book| {
            if book.is_empty() { book.extend(seed); }
            Ok(())
        }).await
    }

    async fn mutate<T, F>(&self, owner: &OwnerId, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Address>) -> Result<T>,
    {
        match self {
            Self::Memory(book) => book.with(owner, f).await,
            Self::Postgres(pg) => pg.mutate(owner, f).await,
        }
    }

    /// For operations on an existing address: unknown owners are not registered.
    async fn mutate_existing<T, F>(&self, owner: &OwnerId, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Address>) -> Result<T>,
    {
        match self {
            Self::Memory(book) => book.with_existing(owner, StorefrontError::AddressNotFound, f).await,
            Self::Postgres(pg) => pg.mutate(owner, f).await,
        }
    }
}
