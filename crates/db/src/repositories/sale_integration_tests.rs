//! Integration tests for the sales payment workflow.
//!
//! Builds installment schedules as `SaleRepository::record_installment_sale`
//! materializes them, then pushes payments through the same allocation
//! path `apply_payment` uses, checking oldest-first ordering, per-row
//! status transitions, and the ledger balance identity.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use terralot_core::sales::{
        allocate_payment, apply_balance_payment, AmortizationSchedule, OutstandingInstallment,
        PaymentPlanTerms, SalesError,
    };

    use crate::entities::installments;
    use crate::entities::sea_orm_active_enums::InstallmentStatus;

    fn schedule_rows(
        price: Decimal,
        terms: PaymentPlanTerms,
        deposit: Decimal,
    ) -> Vec<installments::Model> {
        let start = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let schedule = AmortizationSchedule::compute(price, terms, deposit, start).unwrap();
        let plan_id = Uuid::new_v4();
        schedule
            .installments
            .iter()
            .map(|scheduled| installments::Model {
                id: Uuid::new_v4(),
                installment_plan_id: plan_id,
                sequence: i32::try_from(scheduled.sequence).unwrap(),
                due_date: scheduled.due_date,
                amount_due: scheduled.amount_due,
                amount_paid: Decimal::ZERO,
                status: InstallmentStatus::Outstanding,
            })
            .collect()
    }

    /// Splits a payment across rows the way the repository does: allocate
    /// against the outstanding set, then write each application back onto
    /// its row with the settled status.
    fn pay(rows: &mut [installments::Model], balance: Decimal, amount: Decimal) -> Decimal {
        let outstanding: Vec<OutstandingInstallment> = rows
            .iter()
            .map(|row| OutstandingInstallment {
                id: row.id,
                due_date: row.due_date,
                amount_due: row.amount_due,
                amount_paid: row.amount_paid,
            })
            .collect();

        let allocation = allocate_payment(amount, balance, &outstanding).unwrap();
        for application in &allocation.applications {
            let row = rows
                .iter_mut()
                .find(|r| r.id == application.installment_id)
                .unwrap();
            row.amount_paid += application.amount;
            row.status = if application.settles {
                InstallmentStatus::Paid
            } else {
                InstallmentStatus::PartiallyPaid
            };
        }
        allocation.overpayment
    }

    fn no_interest_terms(months: u32) -> PaymentPlanTerms {
        PaymentPlanTerms {
            deposit_percentage: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            duration_months: months,
        }
    }

    /// A 2500 payment against three 1000 installments settles the first
    /// two, leaves 500 on the third, and produces no overpayment.
    #[test]
    fn test_payment_settles_installments_oldest_first() {
        let mut rows = schedule_rows(dec!(3000), no_interest_terms(3), Decimal::ZERO);
        assert!(rows.iter().all(|r| r.amount_due == dec!(1000)));

        let overpayment = pay(&mut rows, dec!(3000), dec!(2500));

        assert_eq!(overpayment, Decimal::ZERO);
        assert_eq!(rows[0].status, InstallmentStatus::Paid);
        assert_eq!(rows[1].status, InstallmentStatus::Paid);
        assert_eq!(rows[2].status, InstallmentStatus::PartiallyPaid);
        assert_eq!(rows[2].amount_paid, dec!(500));
    }

    /// A second payment resumes at the partially paid row rather than
    /// starting over.
    #[test]
    fn test_follow_up_payment_resumes_at_partial_row() {
        let mut rows = schedule_rows(dec!(3000), no_interest_terms(3), Decimal::ZERO);

        pay(&mut rows, dec!(3000), dec!(2500));
        let overpayment = pay(&mut rows, dec!(500), dec!(500));

        assert_eq!(overpayment, Decimal::ZERO);
        assert!(rows.iter().all(|r| r.status == InstallmentStatus::Paid));
        assert!(rows.iter().all(|r| r.amount_paid == r.amount_due));
    }

    /// Payments past the schedule but within the balance are carried as
    /// overpayment, not forced onto settled rows.
    #[test]
    fn test_excess_within_balance_becomes_overpayment() {
        let mut rows = schedule_rows(dec!(3000), no_interest_terms(3), Decimal::ZERO);

        let overpayment = pay(&mut rows, dec!(3500), dec!(3200));

        assert_eq!(overpayment, dec!(200));
        assert!(rows.iter().all(|r| r.status == InstallmentStatus::Paid));
    }

    /// Payments above the outstanding balance are refused before any row
    /// is touched.
    #[test]
    fn test_payment_above_balance_is_refused() {
        let rows = schedule_rows(dec!(3000), no_interest_terms(3), Decimal::ZERO);
        let outstanding: Vec<OutstandingInstallment> = rows
            .iter()
            .map(|row| OutstandingInstallment {
                id: row.id,
                due_date: row.due_date,
                amount_due: row.amount_due,
                amount_paid: row.amount_paid,
            })
            .collect();

        let err = allocate_payment(dec!(3000.01), dec!(3000), &outstanding).unwrap_err();
        assert!(matches!(err, SalesError::PaymentExceedsBalance { .. }));
    }

    /// Cash-sale balance payments keep paid + balance constant.
    #[test]
    fn test_balance_payment_preserves_ledger_identity() {
        let (paid, balance) = apply_balance_payment(dec!(1000), dec!(4000), dec!(1500)).unwrap();
        assert_eq!(paid, dec!(2500));
        assert_eq!(balance, dec!(2500));
        assert_eq!(paid + balance, dec!(5000));
    }

    fn money_strategy(max_cents: i64) -> impl Strategy<Value = Decimal> {
        (1i64..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// *For any* schedule and payment within the balance, the amount
        /// is fully accounted for: applications plus overpayment equal
        /// the payment, and no row is paid past its due.
        #[test]
        fn prop_payment_is_fully_accounted_for(
            price in money_strategy(10_000_000),
            months in 1u32..=48,
            payment in money_strategy(10_000_000),
        ) {
            let mut rows = schedule_rows(price, no_interest_terms(months), Decimal::ZERO);
            prop_assume!(payment <= price);

            let overpayment = pay(&mut rows, price, payment);

            let applied: Decimal = rows.iter().map(|r| r.amount_paid).sum();
            prop_assert_eq!(applied + overpayment, payment);
            prop_assert!(rows.iter().all(|r| r.amount_paid <= r.amount_due));
            prop_assert!(overpayment >= Decimal::ZERO);
        }

        /// *For any* split of a payment into two parts, paying in two
        /// steps settles the same rows as paying once.
        #[test]
        fn prop_split_payments_commute(
            price in money_strategy(1_000_000),
            months in 1u32..=24,
            first_cents in 1i64..1_000_000,
        ) {
            let first = Decimal::new(first_cents, 2);
            prop_assume!(first < price);
            let second = price - first;

            let mut split = schedule_rows(price, no_interest_terms(months), Decimal::ZERO);
            pay(&mut split, price, first);
            pay(&mut split, price - first, second);

            let mut lump = schedule_rows(price, no_interest_terms(months), Decimal::ZERO);
            pay(&mut lump, price, price);

            for (a, b) in split.iter().zip(lump.iter()) {
                prop_assert_eq!(a.amount_paid, b.amount_paid);
                prop_assert_eq!(a.status.clone(), b.status.clone());
            }
        }
    }
}
