//! Subdivision domain types.

use serde::{Deserialize, Serialize};
use terralot_shared::types::LandSize;

use crate::inventory::PropertyStatus;

/// Lifecycle status of a subdivision proposal.
///
/// `Confirmed` and `Rejected` are both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotProposalStatus {
    /// Awaiting a decision; the lot's size is on loan from the parent block.
    Proposed,
    /// Decided: a property row now owns the size permanently.
    Confirmed,
    /// Decided: the size has been returned to the parent block.
    Rejected,
}

impl LotProposalStatus {
    /// Returns true if the proposal can still be confirmed or rejected.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Proposed)
    }
}

impl std::fmt::Display for LotProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proposed => write!(f, "proposed"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// The effect of accepting a new lot proposal on the parent block.
///
/// The size is deducted immediately at proposal time, not at confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalPlan {
    /// Parent block size after the lot's size is carved out.
    pub parent_new_size: LandSize,
    /// Parent block status after the carve-out (`Unavailable` when the
    /// remainder is within tolerance of zero).
    pub parent_new_status: PropertyStatus,
}

/// The effect of rejecting a pending proposal on the parent block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectionPlan {
    /// Parent block size after the lot's size is returned.
    pub parent_new_size: LandSize,
    /// Parent block status after the return (`Available` again if the
    /// block had been exhausted).
    pub parent_new_status: PropertyStatus,
}
