//! Subdivision state machine tests.

use rstest::rstest;
use rust_decimal_macros::dec;
use terralot_shared::types::LandSize;

use super::error::SubdivisionError;
use super::service::SubdivisionService;
use super::types::LotProposalStatus;
use crate::inventory::{PropertyKind, PropertyStatus};

fn acres(n: rust_decimal::Decimal) -> LandSize {
    LandSize::new(n)
}

#[test]
fn test_proposal_deducts_size_immediately() {
    let plan = SubdivisionService::plan_proposal(
        PropertyKind::Block,
        PropertyStatus::Available,
        acres(dec!(10)),
        acres(dec!(4)),
    )
    .unwrap();

    assert_eq!(plan.parent_new_size, acres(dec!(6)));
    assert_eq!(plan.parent_new_status, PropertyStatus::Available);
}

#[test]
fn test_exhausting_proposal_flips_parent_unavailable() {
    let plan = SubdivisionService::plan_proposal(
        PropertyKind::Block,
        PropertyStatus::Available,
        acres(dec!(6)),
        acres(dec!(6)),
    )
    .unwrap();

    assert_eq!(plan.parent_new_size, acres(dec!(0)));
    assert_eq!(plan.parent_new_status, PropertyStatus::Unavailable);
}

#[test]
fn test_near_zero_remainder_counts_as_exhausted() {
    let plan = SubdivisionService::plan_proposal(
        PropertyKind::Block,
        PropertyStatus::Available,
        acres(dec!(5.0005)),
        acres(dec!(5)),
    )
    .unwrap();

    assert_eq!(plan.parent_new_status, PropertyStatus::Unavailable);
}

#[test]
fn test_oversized_proposal_rejected() {
    let err = SubdivisionService::plan_proposal(
        PropertyKind::Block,
        PropertyStatus::Available,
        acres(dec!(3)),
        acres(dec!(4)),
    )
    .unwrap_err();

    assert_eq!(
        err,
        SubdivisionError::SizeExceedsParent {
            requested: acres(dec!(4)),
            available: acres(dec!(3)),
        }
    );
}

#[rstest]
#[case(dec!(0))]
#[case(dec!(-1))]
fn test_non_positive_size_rejected(#[case] size: rust_decimal::Decimal) {
    let err = SubdivisionService::plan_proposal(
        PropertyKind::Block,
        PropertyStatus::Available,
        acres(dec!(10)),
        acres(size),
    )
    .unwrap_err();

    assert_eq!(err, SubdivisionError::NonPositiveSize);
}

#[test]
fn test_cannot_subdivide_a_lot() {
    let err = SubdivisionService::plan_proposal(
        PropertyKind::Lot,
        PropertyStatus::Available,
        acres(dec!(10)),
        acres(dec!(1)),
    )
    .unwrap_err();

    assert_eq!(err, SubdivisionError::NotABlock(PropertyKind::Lot));
}

#[rstest]
#[case(PropertyStatus::Sold)]
#[case(PropertyStatus::Booked)]
#[case(PropertyStatus::Unavailable)]
fn test_parent_must_be_available(#[case] status: PropertyStatus) {
    let err = SubdivisionService::plan_proposal(
        PropertyKind::Block,
        status,
        acres(dec!(10)),
        acres(dec!(1)),
    )
    .unwrap_err();

    assert_eq!(err, SubdivisionError::ParentNotAvailable(status));
}

#[test]
fn test_confirmation_only_from_proposed() {
    assert!(SubdivisionService::plan_confirmation(LotProposalStatus::Proposed).is_ok());

    for decided in [LotProposalStatus::Confirmed, LotProposalStatus::Rejected] {
        assert_eq!(
            SubdivisionService::plan_confirmation(decided),
            Err(SubdivisionError::InvalidTransition {
                from: decided,
                to: LotProposalStatus::Confirmed,
            })
        );
    }
}

#[test]
fn test_rejection_returns_size_and_restores_availability() {
    let plan = SubdivisionService::plan_rejection(
        LotProposalStatus::Proposed,
        acres(dec!(0)),
        PropertyStatus::Unavailable,
        acres(dec!(4)),
    )
    .unwrap();

    assert_eq!(plan.parent_new_size, acres(dec!(4)));
    assert_eq!(plan.parent_new_status, PropertyStatus::Available);
}

#[test]
fn test_rejection_keeps_status_when_parent_still_available() {
    let plan = SubdivisionService::plan_rejection(
        LotProposalStatus::Proposed,
        acres(dec!(6)),
        PropertyStatus::Available,
        acres(dec!(4)),
    )
    .unwrap();

    assert_eq!(plan.parent_new_size, acres(dec!(10)));
    assert_eq!(plan.parent_new_status, PropertyStatus::Available);
}

#[test]
fn test_rejection_only_from_proposed() {
    let err = SubdivisionService::plan_rejection(
        LotProposalStatus::Confirmed,
        acres(dec!(6)),
        PropertyStatus::Available,
        acres(dec!(4)),
    )
    .unwrap_err();

    assert_eq!(
        err,
        SubdivisionError::InvalidTransition {
            from: LotProposalStatus::Confirmed,
            to: LotProposalStatus::Rejected,
        }
    );
}

/// The worked scenario from the feasibility record: a 10-acre block,
/// a 4-acre proposal, a 6-acre proposal, then rejecting the first.
#[test]
fn test_block_lifecycle_scenario() {
    let mut size = acres(dec!(10));
    let mut status = PropertyStatus::Available;

    let plan =
        SubdivisionService::plan_proposal(PropertyKind::Block, status, size, acres(dec!(4)))
            .unwrap();
    size = plan.parent_new_size;
    status = plan.parent_new_status;
    assert_eq!(size, acres(dec!(6)));
    assert_eq!(status, PropertyStatus::Available);

    let plan =
        SubdivisionService::plan_proposal(PropertyKind::Block, status, size, acres(dec!(6)))
            .unwrap();
    size = plan.parent_new_size;
    status = plan.parent_new_status;
    assert_eq!(size, acres(dec!(0)));
    assert_eq!(status, PropertyStatus::Unavailable);

    let plan = SubdivisionService::plan_rejection(
        LotProposalStatus::Proposed,
        size,
        status,
        acres(dec!(4)),
    )
    .unwrap();
    assert_eq!(plan.parent_new_size, acres(dec!(4)));
    assert_eq!(plan.parent_new_status, PropertyStatus::Available);
}

/// Propose then reject leaves the parent exactly where it started.
#[test]
fn test_propose_reject_round_trip_conserves_size() {
    let original = acres(dec!(12.345));
    let lot = acres(dec!(7.89));

    let proposal = SubdivisionService::plan_proposal(
        PropertyKind::Block,
        PropertyStatus::Available,
        original,
        lot,
    )
    .unwrap();

    let rejection = SubdivisionService::plan_rejection(
        LotProposalStatus::Proposed,
        proposal.parent_new_size,
        proposal.parent_new_status,
        lot,
    )
    .unwrap();

    assert_eq!(rejection.parent_new_size, original);
    assert_eq!(rejection.parent_new_status, PropertyStatus::Available);
}
