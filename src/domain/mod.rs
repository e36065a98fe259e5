//! Domain model: aggregates, the default-flag maintainer, events and value objects
pub mod aggregates;
pub mod defaults;
pub mod events;
pub mod value_objects;
