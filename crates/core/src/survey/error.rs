//! Survey ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::JobStatus;

/// Errors raised by survey job operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurveyError {
    /// The requested status change is not a legal transition.
    #[error("Invalid job status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: JobStatus,
        /// Requested status.
        to: JobStatus,
    },

    /// Payments are refused once the job is dispatched or cancelled.
    #[error("Job is {0} and no longer accepts payments")]
    JobNotPayable(JobStatus),

    /// Payments must be positive.
    #[error("Payment amount must be positive")]
    NonPositivePayment,

    /// A payment cannot push the amount received past the fee.
    #[error("Payment {requested} exceeds outstanding balance {balance}")]
    PaymentExceedsBalance {
        /// Payment requested.
        requested: Decimal,
        /// Balance still owed.
        balance: Decimal,
    },

    /// The stored ledger row no longer satisfies `amount + balance = fee`.
    #[error("Payment ledger out of balance: fee {fee}, amount {amount}, balance {balance}")]
    LedgerOutOfBalance {
        /// Fee agreed for the job.
        fee: Decimal,
        /// Amount recorded as received.
        amount: Decimal,
        /// Balance recorded as owed.
        balance: Decimal,
    },
}
