//! Subdivision state machine.
//!
//! States: `Proposed → Confirmed` (terminal) or `Proposed → Rejected`
//! (terminal). The parent block's size is mutable only while proposals
//! carved from it are still `Proposed`.

use terralot_shared::types::LandSize;

use super::error::SubdivisionError;
use super::types::{LotProposalStatus, ProposalPlan, RejectionPlan};
use crate::inventory::{PropertyKind, PropertyStatus};

/// Stateless service for subdivision transitions.
///
/// Each method validates a transition and returns the plan the repository
/// must apply atomically; no method mutates anything itself.
pub struct SubdivisionService;

impl SubdivisionService {
    /// Plan carving a new lot out of a parent block.
    ///
    /// The lot's size is deducted from the parent immediately. When the
    /// remainder is within tolerance of zero the parent flips to
    /// `Unavailable`.
    ///
    /// # Errors
    ///
    /// * `NotABlock` if the parent is a lot
    /// * `ParentNotAvailable` unless the parent is `Available`
    /// * `NonPositiveSize` if the requested size is zero or negative
    /// * `SizeExceedsParent` if the parent holds less than requested
    pub fn plan_proposal(
        parent_kind: PropertyKind,
        parent_status: PropertyStatus,
        parent_size: LandSize,
        lot_size: LandSize,
    ) -> Result<ProposalPlan, SubdivisionError> {
        if parent_kind != PropertyKind::Block {
            return Err(SubdivisionError::NotABlock(parent_kind));
        }
        if parent_status != PropertyStatus::Available {
            return Err(SubdivisionError::ParentNotAvailable(parent_status));
        }
        if !lot_size.is_positive() {
            return Err(SubdivisionError::NonPositiveSize);
        }
        if lot_size > parent_size {
            return Err(SubdivisionError::SizeExceedsParent {
                requested: lot_size,
                available: parent_size,
            });
        }

        let parent_new_size = parent_size.minus(lot_size);
        let parent_new_status = if parent_new_size.is_exhausted() {
            PropertyStatus::Unavailable
        } else {
            PropertyStatus::Available
        };

        Ok(ProposalPlan {
            parent_new_size,
            parent_new_status,
        })
    }

    /// Validate confirming a pending proposal.
    ///
    /// Only `Proposed` lots can be confirmed, so confirming twice can never
    /// create a second property row.
    pub fn plan_confirmation(current: LotProposalStatus) -> Result<(), SubdivisionError> {
        match current {
            LotProposalStatus::Proposed => Ok(()),
            _ => Err(SubdivisionError::InvalidTransition {
                from: current,
                to: LotProposalStatus::Confirmed,
            }),
        }
    }

    /// Plan rejecting a pending proposal.
    ///
    /// The lot's size goes back to the parent, and a parent that had been
    /// exhausted becomes `Available` again. The size return and the status
    /// flip belong to one atomic unit: if the return cannot be applied the
    /// proposal must stay `Proposed`, otherwise the size would be lost.
    pub fn plan_rejection(
        current: LotProposalStatus,
        parent_size: LandSize,
        parent_status: PropertyStatus,
        lot_size: LandSize,
    ) -> Result<RejectionPlan, SubdivisionError> {
        match current {
            LotProposalStatus::Proposed => Ok(RejectionPlan {
                parent_new_size: parent_size.plus(lot_size),
                parent_new_status: if parent_status == PropertyStatus::Unavailable {
                    PropertyStatus::Available
                } else {
                    parent_status
                },
            }),
            _ => Err(SubdivisionError::InvalidTransition {
                from: current,
                to: LotProposalStatus::Rejected,
            }),
        }
    }
}
