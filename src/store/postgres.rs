//! Postgres-backed address book.
//!
//! Each mutation runs in one transaction: take an advisory lock keyed by the
//! owner, load the owner's addresses in insertion order, apply the same
//! in-memory operation the memory store uses, then write back only the rows
//! that changed.

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};

use crate::domain::aggregates::Address;
use crate::domain::value_objects::OwnerId;
use crate::{Result, StorefrontError};

const SELECT_OWNER: &str = "SELECT id, owner_id, name, full_name, street_address, apartment, city, state, zip_code, phone, is_default, created_at, updated_at FROM addresses WHERE owner_id = $1 ORDER BY seq";
const SELECT_ONE: &str = "SELECT id, owner_id, name, full_name, street_address, apartment, city, state, zip_code, phone, is_default, created_at, updated_at FROM addresses WHERE owner_id = $1 AND id = $2";

#[derive(Clone)]
pub struct PgAddressStore {
    pool: PgPool,
}

impl PgAddressStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new().max_connections(max_connections).connect(database_url).await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await.map_err(|e| StorefrontError::Storage(e.to_string()))
    }

    pub async fn list(&self, owner: &OwnerId) -> Result<Vec<Address>> {
        Ok(sqlx::query_as::<_, Address>(SELECT_OWNER).bind(owner.as_str()).fetch_all(&self.pool).await?)
    }

    pub async fn get(&self, owner: &OwnerId, id: &str) -> Result<Address> {
        sqlx::query_as::<_, Address>(SELECT_ONE)
            .bind(owner.as_str()).bind(id)
            .fetch_optional(&self.pool).await?
            .ok_or(StorefrontError::AddressNotFound)
    }

    /// Runs `f` over the owner's addresses under the owner lock and persists the result.
    pub async fn mutate<T, F>(&self, owner: &OwnerId, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Address>) -> Result<T>,
    {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))").bind(owner.as_str()).execute(&mut *tx).await?;
        let before = sqlx::query_as::<_, Address>(SELECT_OWNER).bind(owner.as_str()).fetch_all(&mut *tx).await?;
        let mut after = before.clone();
        let out = f(&mut after)?;
        persist(&mut tx, &before, &after).await?;
        tx.commit().await?;
        Ok(out)
    }
}

/// Writes the difference between `before` and `after` for one owner.
///
/// Rows losing the default flag are written before any row gaining it, so the
/// one-default-per-owner index never sees two defaults.
async fn persist(tx: &mut Transaction<'_, Postgres>, before: &[Address], after: &[Address]) -> Result<()> {
    for gone in before.iter().filter(|b| !after.iter().any(|a| a.id == b.id)) {
        sqlx::query("DELETE FROM addresses WHERE id = $1").bind(&gone.id).execute(&mut **tx).await?;
    }

    let mut changed: Vec<&Address> = after.iter()
        .filter(|a| before.iter().any(|b| b.id == a.id && b != *a))
        .collect();
    changed.sort_by_key(|a| a.is_default);
    for address in changed {
        sqlx::query(
            "UPDATE addresses SET name = $2, full_name = $3, street_address = $4, apartment = $5, city = $6, state = $7, zip_code = $8, phone = $9, is_default = $10, updated_at = $11 WHERE id = $1",
        )
        .bind(&address.id).bind(&address.name).bind(&address.full_name).bind(&address.street_address)
        .bind(&address.apartment).bind(&address.city).bind(&address.state).bind(&address.zip_code)
        .bind(&address.phone).bind(address.is_default).bind(address.updated_at)
        .execute(&mut **tx).await?;
    }

    for address in after.iter().filter(|a| !before.iter().any(|b| b.id == a.id)) {
        sqlx::query(
            "INSERT INTO addresses (id, owner_id, name, full_name, street_address, apartment, city, state, zip_code, phone, is_default, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(&address.id).bind(&address.owner_id).bind(&address.name).bind(&address.full_name)
        .bind(&address.street_address).bind(&address.apartment).bind(&address.city).bind(&address.state)
        .bind(&address.zip_code).bind(&address.phone).bind(address.is_default)
        .bind(address.created_at).bind(address.updated_at)
        .execute(&mut **tx).await?;
    }
    Ok(())
}

/// These run against `DATABASE_URL` and pass trivially when it is unset.
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::aggregates::AddressDraft;
    use crate::domain::defaults::default_count;
    use crate::store::AddressStore;

    async fn store() -> Option<(AddressStore, PgAddressStore)> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        };
        let pg = PgAddressStore::connect(&url, 4).await.unwrap();
        pg.migrate().await.unwrap();
        Some((AddressStore::Postgres(pg.clone()), pg))
    }

    fn owner() -> OwnerId { OwnerId::new(format!("pg-test-{}", uuid::Uuid::now_v7())).unwrap() }

    fn draft(name: &str, is_default: Option<bool>) -> AddressDraft {
        AddressDraft {
            name: name.into(), full_name: "John Doe".into(), street_address: "1 Road".into(), apartment: Some("Apt 1".into()),
            city: "Anytown".into(), state: "CA".into(), zip_code: "94321".into(), phone: "555".into(), is_default,
        }
    }

    async fn default_ids(store: &AddressStore, owner: &OwnerId) -> Vec<String> {
        store.list(owner).await.unwrap().into_iter().filter(|a| a.is_default).map(|a| a.id).collect()
    }

    async fn cleanup(pg: &PgAddressStore, owner: &OwnerId) {
        sqlx::query("DELETE FROM addresses WHERE owner_id = $1").bind(owner.as_str()).execute(&pg.pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_with_default_clears_previous_row() {
        let Some((store, pg)) = store().await else { return };
        let owner = owner();
        let home = store.create(&owner, draft("Home", None)).await.unwrap().record;
        assert!(home.is_default);
        let work = store.create(&owner, draft("Work", Some(true))).await.unwrap().record;

        assert_eq!(default_ids(&store, &owner).await, vec![work.id.clone()]);
        let all = store.list(&owner).await.unwrap();
        assert_eq!(all.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(), vec![home.id.as_str(), work.id.as_str()]);
        cleanup(&pg, &owner).await;
    }

    #[tokio::test]
    async fn test_set_default_switches_and_is_idempotent() {
        let Some((store, pg)) = store().await else { return };
        let owner = owner();
        let a = store.create(&owner, draft("A", None)).await.unwrap().record;
        let b = store.create(&owner, draft("B", None)).await.unwrap().record;

        assert!(store.set_default(&owner, &b.id).await.unwrap().default_change.changed());
        assert_eq!(default_ids(&store, &owner).await, vec![b.id.clone()]);
        store.set_default(&owner, &a.id).await.unwrap();
        let again = store.set_default(&owner, &a.id).await.unwrap();
        assert!(!again.default_change.changed());
        assert_eq!(default_ids(&store, &owner).await, vec![a.id.clone()]);

        assert!(matches!(store.set_default(&owner, "nope").await, Err(StorefrontError::AddressNotFound)));
        cleanup(&pg, &owner).await;
    }

    #[tokio::test]
    async fn test_update_claiming_default() {
        let Some((store, pg)) = store().await else { return };
        let owner = owner();
        let a = store.create(&owner, draft("A", None)).await.unwrap().record;
        let b = store.create(&owner, draft("B", None)).await.unwrap().record;

        let updated = store.update(&owner, &b.id, draft("Office", Some(true))).await.unwrap().record;
        assert_eq!(updated.name, "Office");
        assert_eq!(default_ids(&store, &owner).await, vec![b.id.clone()]);
        assert!(!store.get(&owner, &a.id).await.unwrap().is_default);
        cleanup(&pg, &owner).await;
    }

    #[tokio::test]
    async fn test_delete_default_promotes_first_remaining() {
        let Some((store, pg)) = store().await else { return };
        let owner = owner();
        let a = store.create(&owner, draft("A", None)).await.unwrap().record;
        let b = store.create(&owner, draft("B", None)).await.unwrap().record;
        let c = store.create(&owner, draft("C", None)).await.unwrap().record;

        store.delete(&owner, &a.id).await.unwrap();
        assert_eq!(default_ids(&store, &owner).await, vec![b.id.clone()]);
        store.delete(&owner, &b.id).await.unwrap();
        assert_eq!(default_ids(&store, &owner).await, vec![c.id.clone()]);
        store.delete(&owner, &c.id).await.unwrap();
        assert!(store.list(&owner).await.unwrap().is_empty());
        assert!(matches!(store.delete(&owner, &c.id).await, Err(StorefrontError::AddressNotFound)));
        cleanup(&pg, &owner).await;
    }

    #[tokio::test]
    async fn test_concurrent_set_default_keeps_one_default() {
        let Some((store, pg)) = store().await else { return };
        let owner = owner();
        let mut ids = Vec::new();
        for n in 0..4 {
            ids.push(store.create(&owner, draft(&format!("A{n}"), None)).await.unwrap().record.id);
        }
        let store = Arc::new(store);
        let mut handles = Vec::new();
        for round in 0..16 {
            let (store, owner, id) = (Arc::clone(&store), owner.clone(), ids[round % ids.len()].clone());
            handles.push(tokio::spawn(async move { store.set_default(&owner, &id).await }));
        }
        for handle in handles { handle.await.unwrap().unwrap(); }
        assert_eq!(default_count(&store.list(&owner).await.unwrap()), 1);
        cleanup(&pg, &owner).await;
    }
}
