//! Property-based tests for size conservation.
//!
//! For any sequence of proposals and rejections against one block, the
//! original size must equal the current size plus the sizes of all
//! proposals that were not rejected.

use proptest::prelude::*;
use rust_decimal::Decimal;
use terralot_shared::types::LandSize;

use super::service::SubdivisionService;
use super::types::LotProposalStatus;
use crate::inventory::{PropertyKind, PropertyStatus};

/// Strategy for block sizes between 0.01 and 1000.00 acres.
fn block_size() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

/// Strategy for a sequence of carve fractions (percent of remaining size).
fn carve_fractions() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=100u8, 1..8)
}

proptest! {
    #[test]
    fn prop_size_conserved_across_proposals(
        size in block_size(),
        fractions in carve_fractions(),
    ) {
        let original = LandSize::new(size);
        let mut current = original;
        let mut status = PropertyStatus::Available;
        let mut outstanding: Vec<LandSize> = Vec::new();

        for pct in fractions {
            let lot = LandSize::new(
                current.acres() * Decimal::from(pct) / Decimal::ONE_HUNDRED,
            );
            let Ok(plan) = SubdivisionService::plan_proposal(
                PropertyKind::Block,
                status,
                current,
                lot,
            ) else {
                break;
            };
            current = plan.parent_new_size;
            status = plan.parent_new_status;
            outstanding.push(lot);
        }

        let carved: Decimal = outstanding.iter().map(|l| l.acres()).sum();
        prop_assert_eq!(original.acres(), current.acres() + carved);
    }

    #[test]
    fn prop_propose_then_reject_restores_exactly(
        size in block_size(),
        pct in 1u8..=100u8,
    ) {
        let original = LandSize::new(size);
        let lot = LandSize::new(
            original.acres() * Decimal::from(pct) / Decimal::ONE_HUNDRED,
        );

        prop_assume!(lot.is_positive());

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

        prop_assert_eq!(rejection.parent_new_size.acres(), original.acres());
    }
}
