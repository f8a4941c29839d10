//! Property-based tests for payment allocation.
//!
//! Conservation: applied amounts plus overpayment must equal the incoming
//! payment exactly, and no installment may receive more than it is owed.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::allocation::allocate_payment;
use super::types::OutstandingInstallment;

/// Strategy for amounts in whole cents up to 100,000.00.
fn cents() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|c| Decimal::new(c, 2))
}

/// Strategy for a schedule of 1..10 installments with partial payments.
fn schedule() -> impl Strategy<Value = Vec<OutstandingInstallment>> {
    prop::collection::vec((cents(), 0u8..=100u8, 0u32..120u32), 1..10).prop_map(|rows| {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        rows.into_iter()
            .map(|(due, paid_pct, day_offset)| {
                let amount_paid = due * Decimal::from(paid_pct) / Decimal::ONE_HUNDRED;
                OutstandingInstallment {
                    id: Uuid::new_v4(),
                    due_date: start + chrono::Days::new(u64::from(day_offset)),
                    amount_due: due,
                    amount_paid,
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_allocation_conserves_amount(
        insts in schedule(),
        payment in cents(),
    ) {
        let outstanding: Decimal = insts.iter().map(OutstandingInstallment::remaining_due).sum();
        // Balance always at least covers the schedule; cap the payment at it.
        let balance = outstanding + Decimal::ONE_HUNDRED;
        let amount = payment.min(balance);

        let allocation = allocate_payment(amount, balance, &insts).unwrap();

        prop_assert_eq!(allocation.total(), amount);
    }

    #[test]
    fn prop_no_installment_overfilled(
        insts in schedule(),
        payment in cents(),
    ) {
        let outstanding: Decimal = insts.iter().map(OutstandingInstallment::remaining_due).sum();
        let balance = outstanding + Decimal::ONE_HUNDRED;
        let amount = payment.min(balance);

        let allocation = allocate_payment(amount, balance, &insts).unwrap();

        for application in &allocation.applications {
            let installment = insts
                .iter()
                .find(|i| i.id == application.installment_id)
                .unwrap();
            prop_assert!(application.amount <= installment.remaining_due());
            prop_assert!(application.amount > Decimal::ZERO);
        }
        prop_assert!(allocation.overpayment >= Decimal::ZERO);
    }
}
