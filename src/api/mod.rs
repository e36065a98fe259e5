//! HTTP API: application state, routing and the owner extractor.

mod addresses;
pub mod error;
pub mod extract;
mod pharmacy;
mod wishlist;

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::domain::aggregates::PharmacyStats;
use crate::domain::value_objects::OwnerId;
use crate::publisher::EventPublisher;
use crate::store::{seed, AddressStore, InventoryCatalog, OrderBook, WishlistStore};
use crate::StorefrontError;

pub use error::{ApiError, ApiResult};
pub use extract::{Json, Query};

/// Header carrying the authenticated owner id, set by the upstream auth layer.
pub const OWNER_HEADER: &str = "x-owner-id";

#[derive(Clone)]
pub struct AppState {
    pub addresses: AddressStore,
    pub wishlist: Arc<WishlistStore>,
    pub inventory: Arc<InventoryCatalog>,
    pub orders: Arc<OrderBook>,
    pub stats: Arc<PharmacyStats>,
    pub events: EventPublisher,
}

impl AppState {
    /// Assembles the state around an address backend, loading the demo
    /// records when `seed_demo_data` is set.
    pub async fn build(addresses: AddressStore, events: EventPublisher, seed_demo_data: bool) -> crate::Result<Self> {
        let wishlist = WishlistStore::default();
        let (inventory, orders) = if seed_demo_data {
            let owner = OwnerId::new(seed::DEMO_OWNER).map_err(|e| StorefrontError::validation(e.to_string()))?;
            addresses.seed(&owner, seed::demo_addresses(&owner)).await?;
            wishlist.seed(&owner, seed::demo_wishlist()).await;
            tracing::info!(owner = %owner, "demo data loaded");
            (seed::demo_inventory(), seed::demo_orders())
        } else {
            (Vec::new(), Vec::new())
        };
        Ok(Self {
            addresses,
            wishlist: Arc::new(wishlist),
            inventory: Arc::new(InventoryCatalog::new(inventory)),
            orders: Arc::new(OrderBook::new(orders)),
            stats: Arc::new(seed::demo_stats()),
            events,
        })
    }

    /// Fully in-memory state with no event sink.
    pub async fn in_memory(seed_demo_data: bool) -> crate::Result<Self> {
        Self::build(AddressStore::in_memory(), EventPublisher::default(), seed_demo_data).await
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.headers
            .get(OWNER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| OwnerId::new(value).ok())
            .ok_or(ApiError::Unauthorized)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "pharmacy-storefront"})) }))
        .route("/api/addresses", get(addresses::list).post(addresses::create))
        .route("/api/addresses/:id", get(addresses::get).put(addresses::update).delete(addresses::delete))
        .route("/api/addresses/:id/default", put(addresses::set_default))
        .route("/api/wishlist", get(wishlist::list).post(wishlist::add))
        .route("/api/wishlist/:id", axum::routing::delete(wishlist::remove))
        .route("/api/pharmacy/inventory", get(pharmacy::list_inventory).post(pharmacy::upsert_inventory).delete(pharmacy::delete_inventory))
        .route("/api/pharmacy/inventory/:id", get(pharmacy::get_inventory))
        .route("/api/pharmacy/orders", get(pharmacy::list_orders).post(pharmacy::update_order_status))
        .route("/api/pharmacy/orders/:id", get(pharmacy::get_order))
        .route("/api/pharmacy/stats", get(pharmacy::stats))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()))
        .with_state(state)
}
