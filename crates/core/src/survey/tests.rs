//! Survey job ledger tests.

use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::SurveyError;
use super::service::SurveyService;
use super::types::{JobStatus, ServicePaymentStatus};

#[rstest]
#[case(JobStatus::Ongoing, JobStatus::Completed, true)]
#[case(JobStatus::Ongoing, JobStatus::Cancelled, true)]
#[case(JobStatus::Completed, JobStatus::Dispatched, true)]
#[case(JobStatus::Ongoing, JobStatus::Dispatched, false)]
#[case(JobStatus::Completed, JobStatus::Cancelled, false)]
#[case(JobStatus::Dispatched, JobStatus::Ongoing, false)]
#[case(JobStatus::Cancelled, JobStatus::Ongoing, false)]
fn test_transition_table(#[case] from: JobStatus, #[case] to: JobStatus, #[case] legal: bool) {
    assert_eq!(SurveyService::is_valid_transition(from, to), legal);
}

#[test]
fn test_complete_cancel_dispatch() {
    assert_eq!(
        SurveyService::complete(JobStatus::Ongoing),
        Ok(JobStatus::Completed)
    );
    assert_eq!(
        SurveyService::cancel(JobStatus::Ongoing),
        Ok(JobStatus::Cancelled)
    );
    assert_eq!(
        SurveyService::dispatch(JobStatus::Completed),
        Ok(JobStatus::Dispatched)
    );
    assert!(SurveyService::dispatch(JobStatus::Ongoing).is_err());
}

#[test]
fn test_partial_payment_keeps_ledger_identity() {
    let outcome = SurveyService::apply_payment(
        JobStatus::Ongoing,
        dec!(50_000),
        dec!(10_000),
        dec!(40_000),
        dec!(15_000),
    )
    .unwrap();

    assert_eq!(outcome.new_amount_paid, dec!(25_000));
    assert_eq!(outcome.new_balance, dec!(25_000));
    assert_eq!(outcome.new_status, ServicePaymentStatus::PartiallyPaid);
    assert_eq!(outcome.new_amount_paid + outcome.new_balance, dec!(50_000));
}

#[test]
fn test_exact_payment_settles_with_zero_residual() {
    let outcome = SurveyService::apply_payment(
        JobStatus::Completed,
        dec!(50_000),
        dec!(20_000),
        dec!(30_000),
        dec!(30_000),
    )
    .unwrap();

    assert_eq!(outcome.new_balance, Decimal::ZERO);
    assert_eq!(outcome.new_status, ServicePaymentStatus::Paid);
}

#[test]
fn test_payment_past_fee_is_refused() {
    let err = SurveyService::apply_payment(
        JobStatus::Ongoing,
        dec!(50_000),
        dec!(45_000),
        dec!(5_000),
        dec!(5_001),
    )
    .unwrap_err();

    assert_eq!(
        err,
        SurveyError::PaymentExceedsBalance {
            requested: dec!(5_001),
            balance: dec!(5_000),
        }
    );
}

#[rstest]
#[case(JobStatus::Dispatched)]
#[case(JobStatus::Cancelled)]
fn test_closed_jobs_refuse_payment(#[case] status: JobStatus) {
    let err =
        SurveyService::apply_payment(status, dec!(100), dec!(0), dec!(100), dec!(10)).unwrap_err();
    assert_eq!(err, SurveyError::JobNotPayable(status));
}

#[test]
fn test_corrupt_ledger_row_is_reported() {
    let err = SurveyService::apply_payment(
        JobStatus::Ongoing,
        dec!(100),
        dec!(30),
        dec!(80),
        dec!(10),
    )
    .unwrap_err();

    assert_eq!(
        err,
        SurveyError::LedgerOutOfBalance {
            fee: dec!(100),
            amount: dec!(30),
            balance: dec!(80),
        }
    );
}

#[test]
fn test_non_positive_payment_is_refused() {
    assert_eq!(
        SurveyService::apply_payment(JobStatus::Ongoing, dec!(100), dec!(0), dec!(100), dec!(0))
            .unwrap_err(),
        SurveyError::NonPositivePayment
    );
}
