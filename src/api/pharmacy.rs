//! `/api/pharmacy` handlers for the operator dashboard

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use super::{ApiResult, AppState, Json, Query};
use crate::domain::aggregates::{InventoryFilter, InventoryItem, InventoryPayload, InventoryView, Order, OrderFilter, PharmacyStats, StatusUpdate, TimeRange};
use crate::domain::events::{DomainEvent, InventoryEvent, OrderEvent};
use crate::StorefrontError;

pub(super) async fn list_inventory(State(s): State<AppState>, Query(filter): Query<InventoryFilter>) -> Json<Vec<InventoryView>> {
    Json(s.inventory.list(&filter, Utc::now().date_naive()).await)
}

pub(super) async fn get_inventory(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<InventoryView>> {
    Ok(Json(s.inventory.get(&id).await?.view(Utc::now().date_naive())))
}

pub(super) async fn upsert_inventory(State(s): State<AppState>, Json(payload): Json<InventoryPayload>) -> ApiResult<(StatusCode, Json<InventoryItem>)> {
    let up = s.inventory.upsert(payload).await?;
    let item_id = up.item.id.clone();
    let (status, event) = if up.created {
        tracing::info!(item_id = %item_id, "inventory item added");
        (StatusCode::CREATED, InventoryEvent::Added { item_id })
    } else {
        tracing::info!(item_id = %item_id, stock = up.item.stock_quantity, "inventory item updated");
        (StatusCode::OK, InventoryEvent::Updated { item_id })
    };
    s.events.publish(std::iter::once(DomainEvent::Inventory(event)).chain(DomainEvent::low_stock(&up.item))).await;
    Ok((status, Json(up.item)))
}

#[derive(Debug, Deserialize)]
pub(super) struct DeleteParams { id: Option<String> }

pub(super) async fn delete_inventory(State(s): State<AppState>, Query(params): Query<DeleteParams>) -> ApiResult<Json<InventoryItem>> {
    let id = params.id.filter(|id| !id.is_empty()).ok_or_else(|| StorefrontError::validation("Item ID is required"))?;
    let item = s.inventory.remove(&id).await?;
    tracing::info!(item_id = %id, "inventory item removed");
    s.events.publish([DomainEvent::Inventory(InventoryEvent::Removed { item_id: id })]).await;
    Ok(Json(item))
}

pub(super) async fn list_orders(State(s): State<AppState>, Query(filter): Query<OrderFilter>) -> Json<Vec<Order>> {
    Json(s.orders.list(&filter).await)
}

pub(super) async fn get_order(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Order>> {
    Ok(Json(s.orders.get(&id).await?))
}

pub(super) async fn update_order_status(State(s): State<AppState>, Json(update): Json<StatusUpdate>) -> ApiResult<Json<Order>> {
    let (id, next) = update.into_parts()?;
    let changed = s.orders.update_status(&id, next).await?;
    if changed.previous != next {
        tracing::info!(order_id = %id, from = %changed.previous, to = %next, "order status changed");
        s.events.publish([DomainEvent::Order(OrderEvent::StatusChanged { order_id: id, from: changed.previous, to: next })]).await;
    }
    Ok(Json(changed.order))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StatsParams { time_range: Option<String> }

pub(super) async fn stats(State(s): State<AppState>, Query(params): Query<StatsParams>) -> Json<PharmacyStats> {
    Json(s.stats.for_range(TimeRange::parse(params.time_range.as_deref())))
}
