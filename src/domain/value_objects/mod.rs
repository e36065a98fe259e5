//! Value Objects for the pharmacy storefront

use std::fmt;
use uuid::Uuid;

/// Identity of the user that owns a record collection.
///
/// Supplied by the caller on every request; never serialized into responses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(value: impl Into<String>) -> Result<Self, OwnerIdError> {
        let value = value.into().trim().to_string();
        if value.is_empty() { return Err(OwnerIdError::Empty); }
        if value.len() > 128 { return Err(OwnerIdError::TooLong); }
        Ok(Self(value))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum OwnerIdError { Empty, TooLong }
impl std::error::Error for OwnerIdError {}
impl fmt::Display for OwnerIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::Empty => write!(f, "owner id empty"), Self::TooLong => write!(f, "owner id too long") }
    }
}

/// Fresh address id, timestamp-ordered so collection order follows creation.
pub fn new_address_id() -> String { format!("addr-{}", Uuid::now_v7()) }

/// Pharmacy inventory identifier of the form `MED-001`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InventoryId(String);

impl InventoryId {
    const PREFIX: &'static str = "MED-";

    pub fn from_sequence(n: u32) -> Self { Self(format!("{}{:03}", Self::PREFIX, n)) }

    /// Numeric suffix of a `MED-###` id, `None` for ids in any other shape.
    pub fn sequence_of(id: &str) -> Option<u32> {
        id.strip_prefix(Self::PREFIX)?.parse().ok()
    }

    /// Next free id after every id in `existing`.
    pub fn next_after<'a>(existing: impl IntoIterator<Item = &'a str>) -> Self {
        let max = existing.into_iter().filter_map(Self::sequence_of).max().unwrap_or(0);
        Self::from_sequence(max + 1)
    }

    pub fn as_str(&self) -> &str { &self.0 }
    pub fn into_string(self) -> String { self.0 }
}

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_owner_id_trims() { assert_eq!(OwnerId::new("  123 ").unwrap().as_str(), "123"); }
    #[test]
    fn test_owner_id_rejects_blank() { assert_eq!(OwnerId::new("   "), Err(OwnerIdError::Empty)); }
    #[test]
    fn test_inventory_id_format() { assert_eq!(InventoryId::from_sequence(7).as_str(), "MED-007"); }
    #[test]
    fn test_next_inventory_id_skips_gaps() {
        let next = InventoryId::next_after(["MED-001", "MED-007", "CUSTOM", "MED-003"]);
        assert_eq!(next.as_str(), "MED-008");
        assert_eq!(InventoryId::next_after(std::iter::empty()).as_str(), "MED-001");
    }
    #[test]
    fn test_address_ids_are_unique() { assert_ne!(new_address_id(), new_address_id()); }
}
