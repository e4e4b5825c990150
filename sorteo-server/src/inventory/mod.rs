//! Ticket inventory and reservation/sale lifecycle
//!
//! The inventory is the only shared mutable resource in the server: a
//! fixed mapping of the 99 ticket numbers to their sale state. All
//! mutation goes through [`InventoryService`] — handlers never touch
//! ticket fields directly, including the admin release path.

mod store;

pub use store::InventoryService;
