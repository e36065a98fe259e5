//! Wishlist Aggregate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Result, StorefrontError};

/// A product saved to an owner's wishlist. `id` is the product id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WishlistPayload {
    #[validate(required, length(min = 1))]
    pub id: Option<String>,
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required)]
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub in_stock: Option<bool>,
    pub category: Option<String>,
}

impl WishlistPayload {
    pub fn into_item(self) -> Result<WishlistItem> {
        let missing = || StorefrontError::validation("Missing required product information");
        self.validate().map_err(|_| missing())?;
        Ok(WishlistItem {
            id: self.id.ok_or_else(missing)?,
            name: self.name.ok_or_else(missing)?,
            price: self.price.ok_or_else(missing)?,
            image: self.image,
            in_stock: self.in_stock.unwrap_or(true),
            category: self.category,
        })
    }
}

/// Adds `item`, rejecting a product that is already saved.
pub fn add(items: &mut Vec<WishlistItem>, item: WishlistItem) -> Result<WishlistItem> {
    if items.iter().any(|existing| existing.id == item.id) {
        return Err(StorefrontError::DuplicateWishlistItem);
    }
    items.push(item.clone());
    Ok(item)
}

pub fn remove(items: &mut Vec<WishlistItem>, id: &str) -> Result<WishlistItem> {
    let index = items.iter().position(|i| i.id == id).ok_or(StorefrontError::WishlistItemNotFound)?;
    Ok(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panadol() -> WishlistItem {
        WishlistPayload { id: Some("1".into()), name: Some("Panadol Extra".into()), price: Some(Decimal::new(1299, 2)), ..Default::default() }
            .into_item().unwrap()
    }

    #[test]
    fn test_payload_requires_price() {
        let p = WishlistPayload { id: Some("1".into()), name: Some("Panadol".into()), ..Default::default() };
        assert_eq!(p.into_item().unwrap_err().to_string(), "Missing required product information");
    }

    #[test]
    fn test_zero_price_is_present() {
        let p = WishlistPayload { id: Some("9".into()), name: Some("Sample".into()), price: Some(Decimal::ZERO), ..Default::default() };
        assert!(p.into_item().is_ok());
    }

    #[test]
    fn test_defaults_in_stock() { assert!(panadol().in_stock); }

    #[test]
    fn test_duplicate_rejected() {
        let mut items = vec![panadol()];
        assert!(matches!(add(&mut items, panadol()), Err(StorefrontError::DuplicateWishlistItem)));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut items = vec![panadol()];
        assert_eq!(remove(&mut items, "1").unwrap().name, "Panadol Extra");
        assert!(matches!(remove(&mut items, "1"), Err(StorefrontError::WishlistItemNotFound)));
    }
}
