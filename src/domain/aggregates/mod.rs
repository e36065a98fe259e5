//! Aggregates module
pub mod address;
pub mod inventory;
pub mod order;
pub mod stats;
pub mod wishlist;

pub use address::{Address, AddressDraft, AddressPayload};
pub use inventory::{InventoryFilter, InventoryItem, InventoryPayload, InventoryView};
pub use order::{LineItem, Order, OrderFilter, OrderStatus, StatusUpdate};
pub use stats::{PharmacyStats, TimeRange};
pub use wishlist::{WishlistItem, WishlistPayload};
