//! Inventory error types.

use thiserror::Error;

use super::types::PropertyStatus;

/// Errors raised by property status transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    /// The requested status change is not a legal transition.
    #[error("Invalid property status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: PropertyStatus,
        /// Requested status.
        to: PropertyStatus,
    },

    /// The property cannot be sold in its current status.
    #[error("Property cannot be sold while {0}")]
    NotSellable(PropertyStatus),
}
