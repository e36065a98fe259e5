//! Domain events
use serde::Serialize;

use crate::domain::aggregates::{InventoryItem, OrderStatus};
use crate::domain::defaults::DefaultChange;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "aggregate", content = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    Address(AddressEvent),
    Wishlist(WishlistEvent),
    Inventory(InventoryEvent),
    Order(OrderEvent),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddressEvent {
    Created { owner_id: String, address_id: String },
    Updated { owner_id: String, address_id: String },
    Deleted { owner_id: String, address_id: String },
    DefaultChanged { owner_id: String, previous: Option<String>, current: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WishlistEvent {
    Added { owner_id: String, product_id: String },
    Removed { owner_id: String, product_id: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InventoryEvent {
    Added { item_id: String },
    Updated { item_id: String },
    Removed { item_id: String },
    LowStock { item_id: String, stock_quantity: u32, reorder_level: u32 },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderEvent {
    StatusChanged { order_id: String, from: OrderStatus, to: OrderStatus },
}

impl DomainEvent {
    /// Bus subject, `pharmacy.<aggregate>.<kind>`.
    pub fn subject(&self) -> String {
        let (aggregate, kind) = match self {
            Self::Address(e) => ("address", match e {
                AddressEvent::Created { .. } => "created",
                AddressEvent::Updated { .. } => "updated",
                AddressEvent::Deleted { .. } => "deleted",
                AddressEvent::DefaultChanged { .. } => "default_changed",
            }),
            Self::Wishlist(e) => ("wishlist", match e {
                WishlistEvent::Added { .. } => "added",
                WishlistEvent::Removed { .. } => "removed",
            }),
            Self::Inventory(e) => ("inventory", match e {
                InventoryEvent::Added { .. } => "added",
                InventoryEvent::Updated { .. } => "updated",
                InventoryEvent::Removed { .. } => "removed",
                InventoryEvent::LowStock { .. } => "low_stock",
            }),
            Self::Order(OrderEvent::StatusChanged { .. }) => ("order", "status_changed"),
        };
        format!("pharmacy.{aggregate}.{kind}")
    }

    /// `DefaultChanged` for `owner`, or nothing when the default stayed put.
    pub fn default_changed(owner_id: &str, change: &DefaultChange) -> Option<DomainEvent> {
        change.changed().then(|| DomainEvent::Address(AddressEvent::DefaultChanged {
            owner_id: owner_id.to_string(),
            previous: change.previous.clone(),
            current: change.current.clone(),
        }))
    }

    /// `LowStock` when `item` sits at or below its reorder level.
    pub fn low_stock(item: &InventoryItem) -> Option<DomainEvent> {
        item.is_low_stock().then(|| DomainEvent::Inventory(InventoryEvent::LowStock {
            item_id: item.id.clone(),
            stock_quantity: item.stock_quantity,
            reorder_level: item.reorder_level,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subjects() {
        let e = DomainEvent::Address(AddressEvent::DefaultChanged { owner_id: "123".into(), previous: None, current: Some("a".into()) });
        assert_eq!(e.subject(), "pharmacy.address.default_changed");
        let e = DomainEvent::Order(OrderEvent::StatusChanged { order_id: "ORD-1".into(), from: OrderStatus::Pending, to: OrderStatus::Shipped });
        assert_eq!(e.subject(), "pharmacy.order.status_changed");
    }

    #[test]
    fn test_default_changed_only_on_move() {
        let same = DefaultChange { previous: Some("a".into()), current: Some("a".into()) };
        assert!(DomainEvent::default_changed("123", &same).is_none());
        let moved = DefaultChange { previous: Some("a".into()), current: Some("b".into()) };
        assert!(DomainEvent::default_changed("123", &moved).is_some());
    }

    #[test]
    fn test_json_shape() {
        let e = DomainEvent::Order(OrderEvent::StatusChanged { order_id: "ORD-1".into(), from: OrderStatus::Pending, to: OrderStatus::Shipped });
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["aggregate"], "order");
        assert_eq!(json["event"]["kind"], "status_changed");
        assert_eq!(json["event"]["to"], "Shipped");
    }
}
