//! Survey job transitions and payment application.
//!
//! The fee cap lives here, in the ledger logic itself, so no caller can
//! push a payment past the agreed fee regardless of what the form layer
//! checked.

use rust_decimal::Decimal;

use super::error::SurveyError;
use super::types::{JobPaymentOutcome, JobStatus, ServicePaymentStatus};

/// Stateless service for survey job transitions.
pub struct SurveyService;

impl SurveyService {
    /// Check if a job status transition is valid.
    ///
    /// Valid transitions:
    /// - Ongoing → Completed
    /// - Ongoing → Cancelled
    /// - Completed → Dispatched
    #[must_use]
    pub fn is_valid_transition(from: JobStatus, to: JobStatus) -> bool {
        matches!(
            (from, to),
            (JobStatus::Ongoing, JobStatus::Completed | JobStatus::Cancelled)
                | (JobStatus::Completed, JobStatus::Dispatched)
        )
    }

    /// Mark field work finished.
    pub fn complete(current: JobStatus) -> Result<JobStatus, SurveyError> {
        Self::transition(current, JobStatus::Completed)
    }

    /// Abandon the job.
    pub fn cancel(current: JobStatus) -> Result<JobStatus, SurveyError> {
        Self::transition(current, JobStatus::Cancelled)
    }

    /// Hand deliverables over to the client.
    pub fn dispatch(current: JobStatus) -> Result<JobStatus, SurveyError> {
        Self::transition(current, JobStatus::Dispatched)
    }

    fn transition(from: JobStatus, to: JobStatus) -> Result<JobStatus, SurveyError> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(SurveyError::InvalidTransition { from, to })
        }
    }

    /// Apply a payment to a job's fee ledger.
    ///
    /// Adds to the cumulative amount, subtracts from the balance, and
    /// derives the new settlement status. Refused while the job is
    /// dispatched or cancelled, when the payment is non-positive, or when
    /// it would push the amount received past the fee.
    ///
    /// The stored row must satisfy `amount + balance = fee` on the way in;
    /// anything else is corruption and is reported, not papered over.
    pub fn apply_payment(
        job_status: JobStatus,
        fee: Decimal,
        amount_paid: Decimal,
        balance: Decimal,
        payment: Decimal,
    ) -> Result<JobPaymentOutcome, SurveyError> {
        if !job_status.accepts_payment() {
            return Err(SurveyError::JobNotPayable(job_status));
        }
        if amount_paid + balance != fee {
            return Err(SurveyError::LedgerOutOfBalance {
                fee,
                amount: amount_paid,
                balance,
            });
        }
        if payment <= Decimal::ZERO {
            return Err(SurveyError::NonPositivePayment);
        }
        if payment > balance {
            return Err(SurveyError::PaymentExceedsBalance {
                requested: payment,
                balance,
            });
        }

        let new_balance = balance - payment;
        Ok(JobPaymentOutcome {
            new_amount_paid: amount_paid + payment,
            new_balance,
            new_status: if new_balance.is_zero() {
                ServicePaymentStatus::Paid
            } else {
                ServicePaymentStatus::PartiallyPaid
            },
        })
    }
}
