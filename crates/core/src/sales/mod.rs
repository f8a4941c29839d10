//! Cash and installment sales ledger math.
//!
//! A sale produces a transaction whose governing invariant is
//! `balance = total_payable - total_amount_paid` after every mutation.
//! Installment sales additionally carry an amortization schedule; incoming
//! payments are applied to it oldest-first.

pub mod allocation;
pub mod amortization;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;
#[cfg(test)]
mod allocation_props;

pub use allocation::allocate_payment;
pub use amortization::AmortizationSchedule;
pub use error::SalesError;
pub use types::{
    InstallmentApplication, InstallmentStatus, OutstandingInstallment, PaymentAllocation,
    PaymentMode, PaymentPlanTerms, SaleTerms, ScheduledInstallment, apply_balance_payment,
};
