//! Inventory Aggregate

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::domain::value_objects::InventoryId;
use crate::{Result, StorefrontError};

pub const DEFAULT_REORDER_LEVEL: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub reorder_level: u32,
    pub supplier: String,
    pub expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool { self.stock_quantity <= self.reorder_level }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < today)
    }

    pub fn view(&self, today: NaiveDate) -> InventoryView {
        InventoryView { item: self.clone(), low_stock: self.is_low_stock(), expired: self.is_expired(today) }
    }

    fn merge(&mut self, draft: InventoryDraft) {
        let InventoryDraft { name, category, price, stock_quantity, fields } = draft;
        self.name = name;
        self.category = category;
        self.price = price;
        self.stock_quantity = stock_quantity;
        if let Some(v) = fields.reorder_level { self.reorder_level = v; }
        if let Some(v) = fields.supplier { self.supplier = v; }
        if let Some(v) = fields.expiry_date { self.expiry_date = Some(v); }
        if fields.description.is_some() { self.description = fields.description; }
        if fields.batch_number.is_some() { self.batch_number = fields.batch_number; }
        if fields.location.is_some() { self.location = fields.location; }
    }
}

/// Inventory item as listed on the dashboard, with derived flags.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub low_stock: bool,
    pub expired: bool,
}

/// Upsert body: with `id` it updates that item, without it creates one.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPayload {
    pub id: Option<String>,
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub category: Option<String>,
    #[validate(required)]
    pub price: Option<Decimal>,
    #[validate(required)]
    pub stock_quantity: Option<u32>,
    pub reorder_level: Option<u32>,
    pub supplier: Option<String>,
    #[serde(default, deserialize_with = "blank_date")]
    pub expiry_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub batch_number: Option<String>,
    pub location: Option<String>,
}

/// Dashboard forms send `""` for a cleared date.
fn blank_date<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(date) => date.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Only the literal `true` enables a query flag.
fn query_flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.as_deref() == Some("true"))
}

#[derive(Clone, Debug, Default)]
struct OptionalFields {
    reorder_level: Option<u32>,
    supplier: Option<String>,
    expiry_date: Option<NaiveDate>,
    description: Option<String>,
    batch_number: Option<String>,
    location: Option<String>,
}

/// A validated [`InventoryPayload`].
#[derive(Clone, Debug)]
pub struct InventoryDraft {
    name: String,
    category: String,
    price: Decimal,
    stock_quantity: u32,
    fields: OptionalFields,
}

impl InventoryPayload {
    /// Splits off the target id and validates the rest.
    pub fn into_parts(self) -> Result<(Option<String>, InventoryDraft)> {
        let required = || StorefrontError::validation("Name, category, price, and stock quantity are required");
        self.validate().map_err(|_| required())?;
        let price = self.price.ok_or_else(required)?;
        if price.is_sign_negative() {
            return Err(StorefrontError::validation("Price must not be negative"));
        }
        let draft = InventoryDraft {
            name: self.name.ok_or_else(required)?,
            category: self.category.ok_or_else(required)?,
            price,
            stock_quantity: self.stock_quantity.ok_or_else(required)?,
            fields: OptionalFields {
                reorder_level: self.reorder_level, supplier: self.supplier, expiry_date: self.expiry_date,
                description: self.description, batch_number: self.batch_number, location: self.location,
            },
        };
        Ok((self.id.filter(|id| !id.is_empty()), draft))
    }
}

/// Dashboard listing filter.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "query_flag")]
    pub low_stock: bool,
}

impl InventoryFilter {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some("") | Some("All") => true,
            Some(category) => item.category == category,
        };
        let search_ok = match self.search.as_deref().map(str::to_lowercase) {
            None => true,
            Some(term) => item.name.to_lowercase().contains(&term) || item.id.to_lowercase().contains(&term),
        };
        category_ok && search_ok && (!self.low_stock || item.is_low_stock())
    }
}

/// Filtered items sorted by name.
pub fn list(items: &[InventoryItem], filter: &InventoryFilter, today: NaiveDate) -> Vec<InventoryView> {
    let mut matched: Vec<&InventoryItem> = items.iter().filter(|i| filter.matches(i)).collect();
    matched.sort_by_cached_key(|i| i.name.to_lowercase());
    matched.into_iter().map(|i| i.view(today)).collect()
}

pub fn find<'a>(items: &'a [InventoryItem], id: &str) -> Result<&'a InventoryItem> {
    items.iter().find(|i| i.id == id).ok_or(StorefrontError::InventoryItemNotFound)
}

/// Outcome of an upsert; `created` is false when an existing item was updated.
#[derive(Clone, Debug)]
pub struct Upserted {
    pub item: InventoryItem,
    pub created: bool,
}

pub fn upsert(items: &mut Vec<InventoryItem>, id: Option<String>, draft: InventoryDraft) -> Result<Upserted> {
    if let Some(id) = id {
        let item = items.iter_mut().find(|i| i.id == id).ok_or(StorefrontError::InventoryItemNotFound)?;
        item.merge(draft);
        return Ok(Upserted { item: item.clone(), created: false });
    }
    let id = InventoryId::next_after(items.iter().map(|i| i.id.as_str())).into_string();
    let InventoryDraft { name, category, price, stock_quantity, fields } = draft;
    let item = InventoryItem {
        id, name, category, price, stock_quantity,
        reorder_level: fields.reorder_level.filter(|&l| l > 0).unwrap_or(DEFAULT_REORDER_LEVEL),
        supplier: fields.supplier.unwrap_or_default(),
        expiry_date: fields.expiry_date,
        description: fields.description,
        batch_number: fields.batch_number,
        location: fields.location,
    };
    items.push(item.clone());
    Ok(Upserted { item, created: true })
}

pub fn remove(items: &mut Vec<InventoryItem>, id: &str) -> Result<InventoryItem> {
    let index = items.iter().position(|i| i.id == id).ok_or(StorefrontError::InventoryItemNotFound)?;
    Ok(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate { NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap() }

    fn item(id: &str, name: &str, category: &str, stock: u32, reorder: u32, expiry: &str) -> InventoryItem {
        InventoryItem {
            id: id.into(), name: name.into(), category: category.into(), price: Decimal::new(625, 2),
            stock_quantity: stock, reorder_level: reorder, supplier: "PharmSupply Inc.".into(),
            expiry_date: Some(date(expiry)), description: None, batch_number: None, location: None,
        }
    }

    fn shelf() -> Vec<InventoryItem> {
        vec![
            item("MED-001", "Paracetamol 500mg", "Pain Relief", 150, 30, "2024-12-31"),
            item("MED-004", "Ibuprofen 200mg", "Pain Relief", 18, 25, "2024-08-15"),
            item("MED-003", "amoxicillin", "Antibiotics", 20, 20, "2026-01-01"),
        ]
    }

    fn payload(name: &str) -> InventoryPayload {
        InventoryPayload {
            name: Some(name.into()), category: Some("Allergy".into()),
            price: Some(Decimal::new(999, 2)), stock_quantity: Some(5), ..Default::default()
        }
    }

    #[test]
    fn test_low_stock_includes_equal() {
        let items = shelf();
        assert!(!items[0].is_low_stock());
        assert!(items[1].is_low_stock());
        assert!(items[2].is_low_stock());
    }

    #[test]
    fn test_expiry_is_strictly_before_today() {
        let i = item("MED-009", "X", "Y", 1, 1, "2025-01-01");
        assert!(!i.is_expired(date("2025-01-01")));
        assert!(i.is_expired(date("2025-01-02")));
    }

    #[test]
    fn test_list_filters_and_sorts_by_name() {
        let items = shelf();
        let all = list(&items, &InventoryFilter { category: Some("All".into()), ..Default::default() }, date("2025-01-01"));
        let names: Vec<_> = all.iter().map(|v| v.item.name.as_str()).collect();
        assert_eq!(names, vec!["amoxicillin", "Ibuprofen 200mg", "Paracetamol 500mg"]);
        assert!(all[2].expired);

        let low = list(&items, &InventoryFilter { low_stock: true, category: Some("Pain Relief".into()), ..Default::default() }, date("2025-01-01"));
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].item.id, "MED-004");

        let searched = list(&items, &InventoryFilter { search: Some("med-00".into()), ..Default::default() }, date("2025-01-01"));
        assert_eq!(searched.len(), 3);
    }

    #[test]
    fn test_create_assigns_next_free_id_and_defaults() {
        let mut items = shelf();
        let (id, draft) = payload("Loratadine 10mg").into_parts().unwrap();
        let up = upsert(&mut items, id, draft).unwrap();
        assert!(up.created);
        assert_eq!(up.item.id, "MED-005");
        assert_eq!(up.item.reorder_level, DEFAULT_REORDER_LEVEL);
        assert_eq!(up.item.supplier, "");
    }

    #[test]
    fn test_update_merges_over_existing() {
        let mut items = shelf();
        let mut p = payload("Ibuprofen 400mg");
        p.id = Some("MED-004".into());
        let (id, draft) = p.into_parts().unwrap();
        let up = upsert(&mut items, id, draft).unwrap();
        assert!(!up.created);
        assert_eq!(up.item.name, "Ibuprofen 400mg");
        assert_eq!(up.item.reorder_level, 25);
        assert_eq!(up.item.supplier, "PharmSupply Inc.");
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut items = shelf();
        let mut p = payload("Ghost");
        p.id = Some("MED-999".into());
        let (id, draft) = p.into_parts().unwrap();
        assert!(matches!(upsert(&mut items, id, draft), Err(StorefrontError::InventoryItemNotFound)));
    }

    #[test]
    fn test_blank_expiry_date_means_none() {
        let p: InventoryPayload = serde_json::from_value(serde_json::json!({"name": "X", "expiryDate": ""})).unwrap();
        assert_eq!(p.expiry_date, None);
        let p: InventoryPayload = serde_json::from_value(serde_json::json!({"expiryDate": "2025-06-30"})).unwrap();
        assert_eq!(p.expiry_date, Some(date("2025-06-30")));
        assert!(serde_json::from_value::<InventoryPayload>(serde_json::json!({"expiryDate": "soon"})).is_err());
    }

    #[test]
    fn test_low_stock_flag_only_accepts_true() {
        let on: InventoryFilter = serde_json::from_value(serde_json::json!({"lowStock": "true"})).unwrap();
        assert!(on.low_stock);
        let other: InventoryFilter = serde_json::from_value(serde_json::json!({"lowStock": "1"})).unwrap();
        assert!(!other.low_stock);
        assert!(!InventoryFilter::default().low_stock);
    }

    #[test]
    fn test_payload_validation() {
        let mut p = payload("X");
        p.stock_quantity = None;
        assert_eq!(p.into_parts().unwrap_err().to_string(), "Name, category, price, and stock quantity are required");
        let mut p = payload("X");
        p.price = Some(Decimal::new(-1, 0));
        assert!(p.into_parts().is_err());
    }

    #[test]
    fn test_view_serializes_flat() {
        let json = serde_json::to_value(shelf()[1].view(date("2025-01-01"))).unwrap();
        assert_eq!(json["id"], "MED-004");
        assert_eq!(json["lowStock"], true);
        assert_eq!(json["expired"], true);
        assert_eq!(json["expiryDate"], "2024-08-15");
    }
}
