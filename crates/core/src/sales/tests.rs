//! Sales ledger tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::allocation::allocate_payment;
use super::amortization::AmortizationSchedule;
use super::error::SalesError;
use super::types::{
    OutstandingInstallment, PaymentPlanTerms, SaleTerms, apply_balance_payment,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn installment(due: NaiveDate, amount_due: Decimal, amount_paid: Decimal) -> OutstandingInstallment {
    OutstandingInstallment {
        id: Uuid::new_v4(),
        due_date: due,
        amount_due,
        amount_paid,
    }
}

// ---------------------------------------------------------------------------
// Cash sale terms
// ---------------------------------------------------------------------------

#[test]
fn test_cash_terms_balance_identity() {
    let terms = SaleTerms::cash(dec!(1_000_000), dec!(50_000), dec!(300_000)).unwrap();
    assert_eq!(terms.total_payable, dec!(950_000));
    assert_eq!(terms.balance, dec!(650_000));
    assert_eq!(terms.total_payable - terms.amount_paid, terms.balance);
    assert!(!terms.is_settled());
}

#[test]
fn test_cash_terms_full_payment_settles() {
    let terms = SaleTerms::cash(dec!(500_000), dec!(0), dec!(500_000)).unwrap();
    assert!(terms.is_settled());
    assert_eq!(terms.balance, Decimal::ZERO);
}

#[test]
fn test_cash_terms_rejects_overshoot_and_negatives() {
    assert_eq!(
        SaleTerms::cash(dec!(100), dec!(0), dec!(101)).unwrap_err(),
        SalesError::AmountExceedsNetPrice {
            amount: dec!(101),
            net_price: dec!(100),
        }
    );
    assert_eq!(
        SaleTerms::cash(dec!(100), dec!(150), dec!(0)).unwrap_err(),
        SalesError::DiscountExceedsPrice {
            discount: dec!(150),
            price: dec!(100),
        }
    );
    assert_eq!(
        SaleTerms::cash(dec!(100), dec!(0), dec!(-1)).unwrap_err(),
        SalesError::NegativeAmount
    );
    assert_eq!(
        SaleTerms::cash(dec!(100), dec!(-1), dec!(0)).unwrap_err(),
        SalesError::NegativeDiscount
    );
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// The worked example from the feasibility record: price 1,000,000,
/// deposit 20%, interest 10%, 12 months. The deposit is quoted off the raw
/// price (200,000), not a discounted price - deliberately kept behavior.
#[test]
fn test_amortization_reference_figures() {
    let terms = PaymentPlanTerms {
        deposit_percentage: dec!(20),
        interest_rate: dec!(10),
        duration_months: 12,
    };
    let schedule = AmortizationSchedule::compute(
        dec!(1_000_000),
        terms,
        dec!(200_000),
        date(2026, 1, 15),
    )
    .unwrap();

    assert_eq!(schedule.required_deposit, dec!(200_000));
    assert_eq!(schedule.total_payable, dec!(1_100_000));
    assert_eq!(schedule.monthly_amount, dec!(75_000));
    assert_eq!(schedule.installments.len(), 12);
    assert_eq!(schedule.financed_balance(), dec!(900_000));
}

/// An uneven division must not leave sub-cent monthlies: the stored
/// schedule is cent-precision, so the final installment picks up the
/// rounding remainder and the schedule still sums to the financed balance.
#[test]
fn test_amortization_rounds_monthlies_to_cents() {
    let terms = PaymentPlanTerms {
        deposit_percentage: dec!(0),
        interest_rate: dec!(0),
        duration_months: 3,
    };
    let schedule =
        AmortizationSchedule::compute(dec!(1000), terms, dec!(0), date(2026, 1, 1)).unwrap();

    assert_eq!(schedule.monthly_amount, dec!(333.33));
    assert_eq!(schedule.monthly_amount, schedule.monthly_amount.round_dp(2));
    assert_eq!(schedule.installments[0].amount_due, dec!(333.33));
    assert_eq!(schedule.installments[1].amount_due, dec!(333.33));
    assert_eq!(schedule.installments[2].amount_due, dec!(333.34));
    assert_eq!(schedule.financed_balance(), dec!(1000));
}

#[test]
fn test_amortization_due_dates_are_calendar_months() {
    let terms = PaymentPlanTerms {
        deposit_percentage: dec!(0),
        interest_rate: dec!(0),
        duration_months: 3,
    };
    let schedule =
        AmortizationSchedule::compute(dec!(300), terms, dec!(0), date(2026, 1, 31)).unwrap();

    let due: Vec<NaiveDate> = schedule.installments.iter().map(|i| i.due_date).collect();
    // Day-of-month clamps at short months instead of spilling over.
    assert_eq!(due, vec![date(2026, 2, 28), date(2026, 3, 31), date(2026, 4, 30)]);
}

#[test]
fn test_amortization_zero_duration_creates_no_schedule() {
    let terms = PaymentPlanTerms {
        deposit_percentage: dec!(10),
        interest_rate: dec!(10),
        duration_months: 0,
    };
    let schedule =
        AmortizationSchedule::compute(dec!(1000), terms, dec!(100), date(2026, 6, 1)).unwrap();

    assert_eq!(schedule.monthly_amount, Decimal::ZERO);
    assert!(schedule.installments.is_empty());
}

#[test]
fn test_amortization_enforces_deposit_floor() {
    let terms = PaymentPlanTerms {
        deposit_percentage: dec!(20),
        interest_rate: dec!(10),
        duration_months: 12,
    };
    let err = AmortizationSchedule::compute(dec!(1_000_000), terms, dec!(150_000), date(2026, 1, 1))
        .unwrap_err();

    assert_eq!(
        err,
        SalesError::DepositBelowRequired {
            paid: dec!(150_000),
            required: dec!(200_000),
        }
    );
}

// ---------------------------------------------------------------------------
// FIFO allocation
// ---------------------------------------------------------------------------

/// Three installments of 1000 each, payment of 2500: the first two settle,
/// the third takes 500, and nothing spills into overpayment.
#[test]
fn test_fifo_split_across_installments() {
    let insts = vec![
        installment(date(2026, 2, 1), dec!(1000), dec!(0)),
        installment(date(2026, 3, 1), dec!(1000), dec!(0)),
        installment(date(2026, 4, 1), dec!(1000), dec!(0)),
    ];
    let allocation = allocate_payment(dec!(2500), dec!(3000), &insts).unwrap();

    assert_eq!(allocation.applications.len(), 3);
    assert_eq!(allocation.applications[0].installment_id, insts[0].id);
    assert_eq!(allocation.applications[0].amount, dec!(1000));
    assert!(allocation.applications[0].settles);
    assert_eq!(allocation.applications[1].amount, dec!(1000));
    assert!(allocation.applications[1].settles);
    assert_eq!(allocation.applications[2].amount, dec!(500));
    assert!(!allocation.applications[2].settles);
    assert_eq!(allocation.overpayment, Decimal::ZERO);
    assert_eq!(allocation.total(), dec!(2500));
}

#[test]
fn test_fifo_skips_settled_and_orders_by_due_date() {
    let paid_off = installment(date(2026, 2, 1), dec!(1000), dec!(1000));
    let later = installment(date(2026, 4, 1), dec!(1000), dec!(0));
    let earlier = installment(date(2026, 3, 1), dec!(1000), dec!(250));

    // Deliberately out of order on input.
    let allocation =
        allocate_payment(dec!(800), dec!(1750), &[later, paid_off, earlier]).unwrap();

    assert_eq!(allocation.applications.len(), 2);
    assert_eq!(allocation.applications[0].installment_id, earlier.id);
    assert_eq!(allocation.applications[0].amount, dec!(750));
    assert!(allocation.applications[0].settles);
    assert_eq!(allocation.applications[1].installment_id, later.id);
    assert_eq!(allocation.applications[1].amount, dec!(50));
}

#[test]
fn test_fifo_leftover_becomes_overpayment() {
    let insts = vec![installment(date(2026, 2, 1), dec!(1000), dec!(600))];
    // Balance covers more than the scheduled installments (e.g. the final
    // odd amount lives on the transaction, not the schedule).
    let allocation = allocate_payment(dec!(700), dec!(1100), &insts).unwrap();

    assert_eq!(allocation.applications.len(), 1);
    assert_eq!(allocation.applications[0].amount, dec!(400));
    assert_eq!(allocation.overpayment, dec!(300));
    assert_eq!(allocation.total(), dec!(700));
}

#[test]
fn test_payment_above_balance_is_rejected() {
    let insts = vec![installment(date(2026, 2, 1), dec!(1000), dec!(0))];
    let err = allocate_payment(dec!(1200), dec!(1000), &insts).unwrap_err();

    assert_eq!(
        err,
        SalesError::PaymentExceedsBalance {
            requested: dec!(1200),
            balance: dec!(1000),
        }
    );
}

#[test]
fn test_non_positive_payment_is_rejected() {
    assert_eq!(
        allocate_payment(dec!(0), dec!(1000), &[]).unwrap_err(),
        SalesError::NonPositivePayment
    );
    assert_eq!(
        allocate_payment(dec!(-5), dec!(1000), &[]).unwrap_err(),
        SalesError::NonPositivePayment
    );
}

// ---------------------------------------------------------------------------
// Balance payments
// ---------------------------------------------------------------------------

#[test]
fn test_balance_payment_exact_settlement_leaves_zero() {
    let (paid, balance) = apply_balance_payment(dec!(650_000), dec!(300_000), dec!(300_000)).unwrap();
    assert_eq!(paid, dec!(950_000));
    assert_eq!(balance, Decimal::ZERO);
}

#[test]
fn test_balance_payment_rejects_overshoot() {
    let err = apply_balance_payment(dec!(0), dec!(100), dec!(100.01)).unwrap_err();
    assert_eq!(
        err,
        SalesError::PaymentExceedsBalance {
            requested: dec!(100.01),
            balance: dec!(100),
        }
    );
}
