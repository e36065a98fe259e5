//! `/api/wishlist` handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::{ApiResult, AppState, Json};
use crate::domain::aggregates::{WishlistItem, WishlistPayload};
use crate::domain::events::{DomainEvent, WishlistEvent};
use crate::domain::value_objects::OwnerId;

pub(super) async fn list(State(s): State<AppState>, owner: OwnerId) -> Json<Vec<WishlistItem>> {
    Json(s.wishlist.list(&owner).await)
}

pub(super) async fn add(State(s): State<AppState>, owner: OwnerId, Json(payload): Json<WishlistPayload>) -> ApiResult<(StatusCode, Json<WishlistItem>)> {
    let item = s.wishlist.add(&owner, payload.into_item()?).await?;
    tracing::info!(owner = %owner, product_id = %item.id, "wishlist item added");
    s.events.publish([DomainEvent::Wishlist(WishlistEvent::Added { owner_id: owner.to_string(), product_id: item.id.clone() })]).await;
    Ok((StatusCode::CREATED, Json(item)))
}

pub(super) async fn remove(State(s): State<AppState>, owner: OwnerId, Path(id): Path<String>) -> ApiResult<Json<WishlistItem>> {
    let item = s.wishlist.remove(&owner, &id).await?;
    tracing::info!(owner = %owner, product_id = %id, "wishlist item removed");
    s.events.publish([DomainEvent::Wishlist(WishlistEvent::Removed { owner_id: owner.to_string(), product_id: id })]).await;
    Ok(Json(item))
}
