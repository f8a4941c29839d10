//! Subdivision error types.

use thiserror::Error;

use terralot_shared::types::LandSize;

use super::types::LotProposalStatus;
use crate::inventory::{PropertyKind, PropertyStatus};

/// Errors raised by the subdivision workflow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubdivisionError {
    /// Only blocks can be subdivided.
    #[error("Cannot subdivide a {0}: only blocks can be subdivided")]
    NotABlock(PropertyKind),

    /// The parent block is not open for subdivision.
    #[error("Parent block is {0}, not available for subdivision")]
    ParentNotAvailable(PropertyStatus),

    /// A lot must have a positive size.
    #[error("Lot size must be positive")]
    NonPositiveSize,

    /// The requested lot size exceeds what remains of the parent block.
    #[error("Requested lot size {requested} exceeds parent's remaining {available}")]
    SizeExceedsParent {
        /// Size asked for.
        requested: LandSize,
        /// Size the parent still holds.
        available: LandSize,
    },

    /// The proposal is not in a state that permits this decision.
    #[error("Invalid proposal transition: {from} -> {to}")]
    InvalidTransition {
        /// Current proposal status.
        from: LotProposalStatus,
        /// Requested proposal status.
        to: LotProposalStatus,
    },
}
