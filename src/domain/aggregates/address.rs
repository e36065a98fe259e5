//! Address Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::defaults::{self, DefaultFlagged, Mutation};
use crate::domain::value_objects::{new_address_id, OwnerId};
use crate::{Result, StorefrontError};

/// A shipping address in an owner's address book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    #[serde(skip)]
    pub owner_id: String,
    pub name: String,
    pub full_name: String,
    pub street_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DefaultFlagged for Address {
    fn record_id(&self) -> &str { &self.id }
    fn is_default(&self) -> bool { self.is_default }
    fn set_default_flag(&mut self, value: bool) {
        if self.is_default != value {
            self.is_default = value;
            self.touch();
        }
    }
    fn not_found() -> StorefrontError { StorefrontError::AddressNotFound }
}

impl Address {
    pub fn from_draft(id: impl Into<String>, owner: &OwnerId, draft: AddressDraft) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(), owner_id: owner.as_str().to_string(),
            name: draft.name, full_name: draft.full_name, street_address: draft.street_address,
            apartment: draft.apartment, city: draft.city, state: draft.state, zip_code: draft.zip_code,
            phone: draft.phone, is_default: draft.is_default.unwrap_or(false),
            created_at: now, updated_at: now,
        }
    }

    /// Overwrites the payload fields. `apartment` is kept when the draft omits it.
    fn apply(&mut self, draft: AddressDraft) {
        self.name = draft.name;
        self.full_name = draft.full_name;
        self.street_address = draft.street_address;
        if draft.apartment.is_some() { self.apartment = draft.apartment; }
        self.city = draft.city;
        self.state = draft.state;
        self.zip_code = draft.zip_code;
        self.phone = draft.phone;
        self.touch();
    }

    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

/// Request body for creating or replacing an address.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub full_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub street_address: Option<String>,
    pub apartment: Option<String>,
    #[validate(required, length(min = 1))]
    pub city: Option<String>,
    #[validate(required, length(min = 1))]
    pub state: Option<String>,
    #[validate(required, length(min = 1))]
    pub zip_code: Option<String>,
    #[validate(required, length(min = 1))]
    pub phone: Option<String>,
    pub is_default: Option<bool>,
}

/// Required fields in reporting order: (struct field, wire name).
const REQUIRED_FIELDS: [(&str, &str); 7] = [
    ("name", "name"),
    ("full_name", "fullName"),
    ("street_address", "streetAddress"),
    ("city", "city"),
    ("state", "state"),
    ("zip_code", "zipCode"),
    ("phone", "phone"),
];

/// An [`AddressPayload`] whose required fields are all present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressDraft {
    pub name: String,
    pub full_name: String,
    pub street_address: String,
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub is_default: Option<bool>,
}

impl AddressPayload {
    /// Checks required fields, reporting the first missing one.
    pub fn into_draft(self) -> Result<AddressDraft> {
        if let Err(errors) = self.validate() {
            let failed = errors.field_errors();
            let wire = REQUIRED_FIELDS.iter()
                .find(|(field, _)| failed.contains_key(*field))
                .map_or("address", |(_, wire)| *wire);
            return Err(StorefrontError::validation(format!("Missing required field: {wire}")));
        }
        let missing = || StorefrontError::validation("Missing required field");
        Ok(AddressDraft {
            name: self.name.ok_or_else(missing)?,
            full_name: self.full_name.ok_or_else(missing)?,
            street_address: self.street_address.ok_or_else(missing)?,
            apartment: self.apartment,
            city: self.city.ok_or_else(missing)?,
            state: self.state.ok_or_else(missing)?,
            zip_code: self.zip_code.ok_or_else(missing)?,
            phone: self.phone.ok_or_else(missing)?,
            is_default: self.is_default,
        })
    }
}

// =============================================================================
// Address book operations over one owner's collection
// =============================================================================

pub fn find<'a>(records: &'a [Address], id: &str) -> Result<&'a Address> {
    records.iter().find(|a| a.id == id).ok_or(StorefrontError::AddressNotFound)
}

pub fn create(records: &mut Vec<Address>, owner: &OwnerId, draft: AddressDraft) -> Mutation<Address> {
    defaults::insert(records, Address::from_draft(new_address_id(), owner, draft))
}

pub fn replace(records: &mut [Address], id: &str, draft: AddressDraft) -> Result<Mutation<Address>> {
    let wants_default = draft.is_default;
    defaults::update(records, id, wants_default, |address| address.apply(draft))
}

pub fn delete(records: &mut Vec<Address>, id: &str) -> Result<Mutation<Address>> {
    defaults::remove(records, id)
}

pub fn make_default(records: &mut [Address], id: &str) -> Result<Mutation<Address>> {
    defaults::set_default(records, id)
}
