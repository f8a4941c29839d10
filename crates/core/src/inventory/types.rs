//! Inventory domain types.

use serde::{Deserialize, Serialize};

/// Kind of property held in inventory.
///
/// A `Block` is a large parcel awaiting subdivision; a `Lot` is a parcel
/// carved out of a block through the subdivision workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// A parcel that can be subdivided into lots.
    Block,
    /// A parcel carved out of a block.
    Lot,
}

/// Lifecycle status of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    /// Listed and open to booking, sale, or subdivision.
    Available,
    /// Reserved by a client; a sale may still complete.
    Booked,
    /// Sold - terminal.
    Sold,
    /// Not sellable: the block's size has been fully carved into lots.
    /// Rejecting one of those lots returns the property to `Available`.
    Unavailable,
}

impl PropertyStatus {
    /// Returns true if a sale may be recorded against the property.
    #[must_use]
    pub fn is_sellable(&self) -> bool {
        matches!(self, Self::Available | Self::Booked)
    }

    /// Returns true if no further status change is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sold)
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Booked => write!(f, "booked"),
            Self::Sold => write!(f, "sold"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Block => write!(f, "block"),
            Self::Lot => write!(f, "lot"),
        }
    }
}
