//! Installment amortization.
//!
//! Simple interest, not compounding:
//! `total_payable = price * (1 + rate/100 * months/12)`.
//! The required deposit is computed off the raw price, not the discounted
//! price - the business has always quoted it that way, so changing it would
//! silently alter every live plan.

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::SalesError;
use super::types::{PaymentPlanTerms, ScheduledInstallment};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// A computed installment schedule for one sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmortizationSchedule {
    /// Minimum opening deposit, `price * deposit_percentage / 100`.
    pub required_deposit: Decimal,
    /// Interest-loaded total the client will pay.
    pub total_payable: Decimal,
    /// Monthly amount, `(total_payable - amount_paid) / duration` rounded
    /// down to cents; the final installment absorbs the remainder.
    pub monthly_amount: Decimal,
    /// Future-dated installments, one per month of the plan's duration.
    pub installments: Vec<ScheduledInstallment>,
}

impl AmortizationSchedule {
    /// Compute the schedule for a sale of `price` under `terms`, with
    /// `amount_paid` received up front, starting from `start_date`.
    ///
    /// A zero-month duration yields a zero monthly amount and an empty
    /// schedule rather than dividing by zero.
    ///
    /// # Errors
    ///
    /// * `NegativeAmount` if the opening payment is negative
    /// * `DepositBelowRequired` if it is below the plan's deposit
    /// * `AmountExceedsTotalPayable` if it overshoots the total
    /// * `ScheduleOutOfRange` if a due date leaves the calendar
    pub fn compute(
        price: Decimal,
        terms: PaymentPlanTerms,
        amount_paid: Decimal,
        start_date: NaiveDate,
    ) -> Result<Self, SalesError> {
        if amount_paid.is_sign_negative() {
            return Err(SalesError::NegativeAmount);
        }

        let required_deposit = (price * terms.deposit_percentage / Decimal::ONE_HUNDRED).round_dp(2);

        let years = Decimal::from(terms.duration_months) / MONTHS_PER_YEAR;
        let total_payable =
            (price * (Decimal::ONE + terms.interest_rate / Decimal::ONE_HUNDRED * years)).round_dp(2);

        if amount_paid < required_deposit {
            return Err(SalesError::DepositBelowRequired {
                paid: amount_paid,
                required: required_deposit,
            });
        }
        if amount_paid > total_payable {
            return Err(SalesError::AmountExceedsTotalPayable {
                amount: amount_paid,
                total_payable,
            });
        }

        let financed = total_payable - amount_paid;
        // Cent-precision monthlies, rounded toward zero so the rounding
        // shortfall lands on the final installment rather than going
        // negative. The stored schedule then sums to the financed balance
        // exactly, matching the NUMERIC(16,2) ledger columns.
        let monthly_amount = if terms.duration_months == 0 {
            Decimal::ZERO
        } else {
            (financed / Decimal::from(terms.duration_months))
                .round_dp_with_strategy(2, RoundingStrategy::ToZero)
        };

        let mut installments = Vec::with_capacity(terms.duration_months as usize);
        for sequence in 1..=terms.duration_months {
            // Calendar-month arithmetic, not 30-day increments. Chrono
            // clamps the day at short month ends (Jan 31 + 1 month = Feb 28).
            let due_date = start_date
                .checked_add_months(Months::new(sequence))
                .ok_or(SalesError::ScheduleOutOfRange)?;
            let amount_due = if sequence == terms.duration_months {
                financed - monthly_amount * Decimal::from(terms.duration_months - 1)
            } else {
                monthly_amount
            };
            installments.push(ScheduledInstallment {
                sequence,
                due_date,
                amount_due,
            });
        }

        Ok(Self {
            required_deposit,
            total_payable,
            monthly_amount,
            installments,
        })
    }

    /// Balance financed over the schedule.
    #[must_use]
    pub fn financed_balance(&self) -> Decimal {
        self.installments
            .iter()
            .map(|i| i.amount_due)
            .sum::<Decimal>()
    }
}
