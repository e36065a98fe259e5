//! `/api/addresses` handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::{ApiResult, AppState, Json};
use crate::domain::aggregates::{Address, AddressPayload};
use crate::domain::defaults::Mutation;
use crate::domain::events::{AddressEvent, DomainEvent};
use crate::domain::value_objects::OwnerId;

pub(super) async fn list(State(s): State<AppState>, owner: OwnerId) -> ApiResult<Json<Vec<Address>>> {
    Ok(Json(s.addresses.list(&owner).await?))
}

pub(super) async fn get(State(s): State<AppState>, owner: OwnerId, Path(id): Path<String>) -> ApiResult<Json<Address>> {
    Ok(Json(s.addresses.get(&owner, &id).await?))
}

pub(super) async fn create(State(s): State<AppState>, owner: OwnerId, Json(payload): Json<AddressPayload>) -> ApiResult<(StatusCode, Json<Address>)> {
    let draft = payload.into_draft()?;
    let m = s.addresses.create(&owner, draft).await?;
    tracing::info!(owner = %owner, address_id = %m.record.id, is_default = m.record.is_default, "address created");
    let created = AddressEvent::Created { owner_id: owner.to_string(), address_id: m.record.id.clone() };
    publish(&s, &owner, &m, created).await;
    Ok((StatusCode::CREATED, Json(m.record)))
}

pub(super) async fn update(State(s): State<AppState>, owner: OwnerId, Path(id): Path<String>, Json(payload): Json<AddressPayload>) -> ApiResult<Json<Address>> {
    // Unknown ids report 404 ahead of validation errors.
    s.addresses.get(&owner, &id).await?;
    let draft = payload.into_draft()?;
    let m = s.addresses.update(&owner, &id, draft).await?;
    tracing::info!(owner = %owner, address_id = %id, "address updated");
    let updated = AddressEvent::Updated { owner_id: owner.to_string(), address_id: id };
    publish(&s, &owner, &m, updated).await;
    Ok(Json(m.record))
}

pub(super) async fn delete(State(s): State<AppState>, owner: OwnerId, Path(id): Path<String>) -> ApiResult<Json<Address>> {
    let m = s.addresses.delete(&owner, &id).await?;
    tracing::info!(owner = %owner, address_id = %id, promoted = ?m.default_change.current, "address deleted");
    let deleted = AddressEvent::Deleted { owner_id: owner.to_string(), address_id: id };
    publish(&s, &owner, &m, deleted).await;
    Ok(Json(m.record))
}

pub(super) async fn set_default(State(s): State<AppState>, owner: OwnerId, Path(id): Path<String>) -> ApiResult<Json<Address>> {
    let m = s.addresses.set_default(&owner, &id).await?;
    if m.default_change.changed() {
        tracing::info!(owner = %owner, address_id = %id, "default address changed");
    }
    s.events.publish(DomainEvent::default_changed(owner.as_str(), &m.default_change)).await;
    Ok(Json(m.record))
}

async fn publish(s: &AppState, owner: &OwnerId, m: &Mutation<Address>, event: AddressEvent) {
    let default_moved = DomainEvent::default_changed(owner.as_str(), &m.default_change);
    s.events.publish(std::iter::once(DomainEvent::Address(event)).chain(default_moved)).await;
}
