//! Sales ledger domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SalesError;

/// How a sale is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// Single payment settles the full (discounted) price up front or in
    /// free-form balance payments.
    Cash,
    /// A deposit followed by a fixed schedule of equal monthly payments.
    Installments,
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Installments => write!(f, "installments"),
        }
    }
}

/// Settlement state of a single scheduled installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Nothing applied yet.
    Outstanding,
    /// Some amount applied, less than the amount due.
    PartiallyPaid,
    /// Fully settled.
    Paid,
}

/// Terms of a reusable payment-plan template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlanTerms {
    /// Deposit required, as a percentage of the raw property price.
    pub deposit_percentage: Decimal,
    /// Simple annual interest rate, percent.
    pub interest_rate: Decimal,
    /// Number of monthly installments.
    pub duration_months: u32,
}

/// The opening state of a sale transaction ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleTerms {
    /// What the client owes in total (price less discount for cash sales,
    /// interest-loaded total for installment sales).
    pub total_payable: Decimal,
    /// Amount paid at creation.
    pub amount_paid: Decimal,
    /// Discount granted off the price.
    pub discount: Decimal,
    /// `total_payable - amount_paid`.
    pub balance: Decimal,
}

impl SaleTerms {
    /// Terms for a cash sale.
    ///
    /// # Errors
    ///
    /// * `NegativeAmount` / `NegativeDiscount` on negative inputs
    /// * `DiscountExceedsPrice` if the discount wipes out the price
    /// * `AmountExceedsNetPrice` if the payment overshoots what is owed
    pub fn cash(
        price: Decimal,
        discount: Decimal,
        amount_paid: Decimal,
    ) -> Result<Self, SalesError> {
        if amount_paid.is_sign_negative() {
            return Err(SalesError::NegativeAmount);
        }
        if discount.is_sign_negative() {
            return Err(SalesError::NegativeDiscount);
        }
        let net_price = price - discount;
        if net_price.is_sign_negative() {
            return Err(SalesError::DiscountExceedsPrice { discount, price });
        }
        if amount_paid > net_price {
            return Err(SalesError::AmountExceedsNetPrice {
                amount: amount_paid,
                net_price,
            });
        }

        Ok(Self {
            total_payable: net_price,
            amount_paid,
            discount,
            balance: net_price - amount_paid,
        })
    }

    /// Returns true when nothing is owed any more.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.balance.is_zero()
    }
}

/// Apply a free-form balance payment to a transaction ledger.
///
/// Returns the new `(total_amount_paid, balance)` pair. The payment must be
/// positive and must not exceed the outstanding balance.
pub fn apply_balance_payment(
    total_amount_paid: Decimal,
    balance: Decimal,
    payment: Decimal,
) -> Result<(Decimal, Decimal), SalesError> {
    if payment <= Decimal::ZERO {
        return Err(SalesError::NonPositivePayment);
    }
    if payment > balance {
        return Err(SalesError::PaymentExceedsBalance {
            requested: payment,
            balance,
        });
    }
    Ok((total_amount_paid + payment, balance - payment))
}

/// One future-dated installment produced by amortization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledInstallment {
    /// 1-based position in the schedule.
    pub sequence: u32,
    /// Due date, `start_date + sequence` calendar months.
    pub due_date: NaiveDate,
    /// Amount due.
    pub amount_due: Decimal,
}

/// An installment row as read back for payment application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutstandingInstallment {
    /// Installment row id.
    pub id: Uuid,
    /// Due date; allocation order follows this.
    pub due_date: NaiveDate,
    /// Amount due.
    pub amount_due: Decimal,
    /// Amount applied so far.
    pub amount_paid: Decimal,
}

impl OutstandingInstallment {
    /// Amount still owed on this installment.
    #[must_use]
    pub fn remaining_due(&self) -> Decimal {
        self.amount_due - self.amount_paid
    }
}

/// The amount applied to one installment by a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentApplication {
    /// Which installment receives the amount.
    pub installment_id: Uuid,
    /// Amount applied.
    pub amount: Decimal,
    /// True when the application settles the installment completely.
    pub settles: bool,
}

/// How an incoming payment splits across installments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentAllocation {
    /// Per-installment applications, oldest due date first.
    pub applications: Vec<InstallmentApplication>,
    /// Amount left after every installment is satisfied; recorded against
    /// the transaction as a balance overpayment rather than rejected.
    pub overpayment: Decimal,
}

impl PaymentAllocation {
    /// Total amount this allocation accounts for.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.applications.iter().map(|a| a.amount).sum::<Decimal>() + self.overpayment
    }
}
