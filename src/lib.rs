//! Pharmacy Storefront
//!
//! Backend for a pharmacy e-commerce storefront.
//!
//! ## Features
//! - Customer address book with a single default address per owner
//! - Customer wishlist
//! - Pharmacy inventory with low-stock and expiry flags
//! - Pharmacy order status tracking
//! - Dashboard statistics snapshot

use thiserror::Error;

pub mod api;
pub mod config;
pub mod domain;
pub mod publisher;
pub mod store;

pub use config::StorefrontConfig;
pub use domain::value_objects::OwnerId;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Address not found")]
    AddressNotFound,

    #[error("Item not found in wishlist")]
    WishlistItemNotFound,

    #[error("Item not found")]
    InventoryItemNotFound,

    #[error("Order not found")]
    OrderNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Item already exists in wishlist")]
    DuplicateWishlistItem,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl StorefrontError {
    pub fn validation(message: impl Into<String>) -> Self { Self::Validation(message.into()) }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
