//! Integration tests for the subdivision workflow.
//!
//! Drives the full propose → finalize / reject cycle over entity rows the
//! way `SubdivisionRepository` applies it: enum columns convert to their
//! core counterparts, the core plans the transition, and the resulting
//! row states are checked for size conservation and status gating.

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use terralot_core::subdivision::{SubdivisionError, SubdivisionService};
    use terralot_shared::types::LandSize;

    use crate::entities::sea_orm_active_enums::{
        LotProposalStatus, PropertyKind, PropertyStatus,
    };
    use crate::entities::{properties, proposed_lots};

    fn block(size: Decimal) -> properties::Model {
        let now = Utc::now().into();
        properties::Model {
            id: Uuid::new_v4(),
            kind: PropertyKind::Block,
            title_deed_number: format!("BLOCK/{}", Uuid::new_v4()),
            location: "Riverside".to_string(),
            size,
            price: dec!(5_000_000),
            status: PropertyStatus::Available,
            owner: None,
            description: None,
            telephone_number: None,
            email: None,
            recorded_by: "tester".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn lot_row(parent: &properties::Model, size: Decimal) -> proposed_lots::Model {
        proposed_lots::Model {
            id: Uuid::new_v4(),
            parent_block_id: parent.id,
            size,
            location: parent.location.clone(),
            surveyor_name: None,
            title_deed_number: format!("LOT/{}", Uuid::new_v4()),
            price: dec!(500_000),
            status: LotProposalStatus::Proposed,
            created_by: "tester".to_string(),
            created_at: Utc::now().into(),
            decided_at: None,
        }
    }

    /// Carve a lot out of the block row exactly as the repository does.
    fn propose(
        parent: &mut properties::Model,
        size: Decimal,
    ) -> Result<proposed_lots::Model, SubdivisionError> {
        let plan = SubdivisionService::plan_proposal(
            parent.kind.clone().into(),
            parent.status.clone().into(),
            LandSize::new(parent.size),
            LandSize::new(size),
        )?;
        parent.size = plan.parent_new_size.acres();
        parent.status = plan.parent_new_status.into();
        Ok(lot_row(parent, size))
    }

    /// Return a pending lot's size to the block row exactly as the
    /// repository does.
    fn reject(
        parent: &mut properties::Model,
        lot: &mut proposed_lots::Model,
    ) -> Result<(), SubdivisionError> {
        let plan = SubdivisionService::plan_rejection(
            lot.status.clone().into(),
            LandSize::new(parent.size),
            parent.status.clone().into(),
            LandSize::new(lot.size),
        )?;
        parent.size = plan.parent_new_size.acres();
        parent.status = plan.parent_new_status.into();
        lot.status = LotProposalStatus::Rejected;
        Ok(())
    }

    /// The 10-acre scenario: 4 acres out leaves an available block, a
    /// further 6 acres exhausts it, and rejecting the first lot restores
    /// 4 acres and reopens the block.
    #[test]
    fn test_block_exhaustion_and_reopen_cycle() {
        let mut parent = block(dec!(10));

        let mut first = propose(&mut parent, dec!(4)).unwrap();
        assert_eq!(parent.size, dec!(6));
        assert_eq!(parent.status, PropertyStatus::Available);

        let second = propose(&mut parent, dec!(6)).unwrap();
        assert_eq!(parent.size, dec!(0));
        assert_eq!(parent.status, PropertyStatus::Unavailable);

        reject(&mut parent, &mut first).unwrap();
        assert_eq!(parent.size, dec!(4));
        assert_eq!(parent.status, PropertyStatus::Available);
        assert_eq!(first.status, LotProposalStatus::Rejected);
        assert_eq!(second.status, LotProposalStatus::Proposed);
    }

    /// Size conservation: the block plus its pending lots always total
    /// the original acreage.
    #[test]
    fn test_size_conservation_across_proposals() {
        let mut parent = block(dec!(12.5));

        let lots = [dec!(3.25), dec!(4), dec!(1.125)]
            .into_iter()
            .map(|s| propose(&mut parent, s).unwrap())
            .collect::<Vec<_>>();

        let pending: Decimal = lots.iter().map(|l| l.size).sum();
        assert_eq!(parent.size + pending, dec!(12.5));
    }

    /// A confirmed lot can never be finalized again, so a second
    /// finalize call cannot create a second property row.
    #[test]
    fn test_finalize_is_rejected_once_confirmed() {
        let parent = block(dec!(10));
        let mut lot = lot_row(&parent, dec!(4));

        SubdivisionService::plan_confirmation(lot.status.clone().into()).unwrap();
        lot.status = LotProposalStatus::Confirmed;
        lot.decided_at = Some(Utc::now().into());

        let err = SubdivisionService::plan_confirmation(lot.status.clone().into()).unwrap_err();
        assert!(matches!(err, SubdivisionError::InvalidTransition { .. }));
    }

    /// Rejecting an already-decided lot must not move size again.
    #[test]
    fn test_reject_requires_pending_proposal() {
        let mut parent = block(dec!(10));
        let mut lot = propose(&mut parent, dec!(4)).unwrap();

        reject(&mut parent, &mut lot).unwrap();
        let size_after_first = parent.size;

        let err = reject(&mut parent, &mut lot).unwrap_err();
        assert!(matches!(err, SubdivisionError::InvalidTransition { .. }));
        assert_eq!(parent.size, size_after_first);
    }

    /// Proposing from an exhausted block is refused.
    #[test]
    fn test_exhausted_block_accepts_no_proposals() {
        let mut parent = block(dec!(5));
        propose(&mut parent, dec!(5)).unwrap();
        assert_eq!(parent.status, PropertyStatus::Unavailable);

        let err = propose(&mut parent, dec!(1)).unwrap_err();
        assert!(matches!(err, SubdivisionError::ParentNotAvailable(_)));
    }

    #[rstest]
    #[case::zero_lot(dec!(10), dec!(0))]
    #[case::negative_lot(dec!(10), dec!(-1))]
    #[case::oversize_lot(dec!(10), dec!(10.001))]
    fn test_bad_lot_sizes_leave_block_untouched(
        #[case] parent_size: Decimal,
        #[case] lot_size: Decimal,
    ) {
        let mut parent = block(parent_size);
        assert!(propose(&mut parent, lot_size).is_err());
        assert_eq!(parent.size, parent_size);
        assert_eq!(parent.status, PropertyStatus::Available);
    }

    fn acreage_strategy() -> impl Strategy<Value = Decimal> {
        // Thousandths of an acre, up to 1000 acres.
        (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 3))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// *For any* block and lot size within it, propose-then-reject
        /// returns the block to its exact original size.
        #[test]
        fn prop_propose_reject_round_trip(
            parent_size in acreage_strategy(),
            lot_size in acreage_strategy(),
        ) {
            prop_assume!(lot_size <= parent_size);

            let mut parent = block(parent_size);
            let mut lot = propose(&mut parent, lot_size).unwrap();
            reject(&mut parent, &mut lot).unwrap();

            prop_assert_eq!(parent.size, parent_size);
            prop_assert_eq!(parent.status.clone(), PropertyStatus::Available);
        }

        /// *For any* oversize request, the block row is left untouched.
        #[test]
        fn prop_oversize_request_changes_nothing(
            parent_size in acreage_strategy(),
            excess in acreage_strategy(),
        ) {
            let mut parent = block(parent_size);
            let request = parent_size + excess;

            let result = propose(&mut parent, request);
            prop_assert!(result.is_err());
            prop_assert_eq!(parent.size, parent_size);
        }
    }
}
