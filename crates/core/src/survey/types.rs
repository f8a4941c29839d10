//! Survey job domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a survey job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Field and office work in progress.
    Ongoing,
    /// Work done; deliverables awaiting collection.
    Completed,
    /// Deliverables handed over - terminal.
    Dispatched,
    /// Abandoned - terminal.
    Cancelled,
}

impl JobStatus {
    /// Returns true while the job may still accept payments.
    #[must_use]
    pub fn accepts_payment(&self) -> bool {
        matches!(self, Self::Ongoing | Self::Completed)
    }

    /// Returns true if no further status change is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Dispatched | Self::Cancelled)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ongoing => write!(f, "ongoing"),
            Self::Completed => write!(f, "completed"),
            Self::Dispatched => write!(f, "dispatched"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Settlement state of a job's fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServicePaymentStatus {
    /// Nothing received.
    Unpaid,
    /// Some amount received, less than the fee.
    PartiallyPaid,
    /// Fee fully received.
    Paid,
}

impl std::fmt::Display for ServicePaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unpaid => write!(f, "unpaid"),
            Self::PartiallyPaid => write!(f, "partially_paid"),
            Self::Paid => write!(f, "paid"),
        }
    }
}

/// The result of applying one payment to a job's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPaymentOutcome {
    /// Cumulative amount received after the payment.
    pub new_amount_paid: Decimal,
    /// Fee still owed after the payment.
    pub new_balance: Decimal,
    /// Derived status: `Paid` at zero balance, else `PartiallyPaid`.
    pub new_status: ServicePaymentStatus,
}
