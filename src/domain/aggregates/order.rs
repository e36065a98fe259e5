//! Order Aggregate

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Result, StorefrontError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub total_price: Decimal,
    pub order_date: NaiveDateTime,
    pub items: Vec<LineItem>,
    pub customer_address: String,
    pub payment_method: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineItem { pub name: String, pub quantity: u32, pub price: Decimal }

/// Fulfilment progress, from placement to delivery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum OrderStatus { #[default] Pending, Processing, Shipped, Delivered }

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self { Self::Pending => "Pending", Self::Processing => "Processing", Self::Shipped => "Shipped", Self::Delivered => "Delivered" }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for OrderStatus {
    type Err = StorefrontError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            other => Err(StorefrontError::validation(format!("Unknown order status: {other}"))),
        }
    }
}

impl Order {
    /// Sets the status to `next`, returning the status it left. Operators may
    /// move an order to any status, including back to an earlier one.
    pub fn set_status(&mut self, next: OrderStatus) -> OrderStatus {
        std::mem::replace(&mut self.status, next)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OrderFilter { pub status: Option<String>, pub search: Option<String> }

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        let status_ok = match self.status.as_deref() {
            None | Some("") | Some("All") => true,
            Some(status) => order.status.as_str() == status,
        };
        let search_ok = match self.search.as_deref().map(str::to_lowercase) {
            None => true,
            Some(term) => order.id.to_lowercase().contains(&term) || order.customer_name.to_lowercase().contains(&term),
        };
        status_ok && search_ok
    }
}

/// Filtered orders, newest first.
pub fn list(orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
    let mut matched: Vec<Order> = orders.iter().filter(|o| filter.matches(o)).cloned().collect();
    matched.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    matched
}

pub fn find<'a>(orders: &'a [Order], id: &str) -> Result<&'a Order> {
    orders.iter().find(|o| o.id == id).ok_or(StorefrontError::OrderNotFound)
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StatusUpdate { pub id: Option<String>, pub status: Option<String> }

impl StatusUpdate {
    pub fn into_parts(self) -> Result<(String, OrderStatus)> {
        match (self.id.filter(|s| !s.is_empty()), self.status.filter(|s| !s.is_empty())) {
            (Some(id), Some(status)) => Ok((id, status.parse()?)),
            _ => Err(StorefrontError::validation("Order ID and status are required")),
        }
    }
}

/// The order after the update and the status it left.
#[derive(Clone, Debug)]
pub struct StatusChanged { pub order: Order, pub previous: OrderStatus }

pub fn update_status(orders: &mut [Order], id: &str, next: OrderStatus) -> Result<StatusChanged> {
    let order = orders.iter_mut().find(|o| o.id == id).ok_or(StorefrontError::OrderNotFound)?;
    let previous = order.set_status(next);
    Ok(StatusChanged { order: order.clone(), previous })
}
