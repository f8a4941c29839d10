//! Property inventory status machine.

pub mod error;
pub mod service;
pub mod types;

pub use error::InventoryError;
pub use service::InventoryService;
pub use types::{PropertyKind, PropertyStatus};
