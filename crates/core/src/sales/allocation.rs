//! FIFO payment allocation across installments.

use rust_decimal::Decimal;

use super::error::SalesError;
use super::types::{InstallmentApplication, OutstandingInstallment, PaymentAllocation};

/// Split an incoming payment across a transaction's installments,
/// oldest due date first.
///
/// The payment is applied greedily: each installment absorbs up to its
/// remaining due before the next one sees anything. Whatever is left after
/// every installment is satisfied comes back as `overpayment`, to be
/// recorded against the transaction itself rather than rejected.
///
/// Invariant: the applied amounts plus the overpayment equal `amount`
/// exactly - nothing is dropped or double-counted.
///
/// # Errors
///
/// * `NonPositivePayment` if `amount <= 0`
/// * `PaymentExceedsBalance` if `amount` exceeds the transaction balance
pub fn allocate_payment(
    amount: Decimal,
    balance: Decimal,
    installments: &[OutstandingInstallment],
) -> Result<PaymentAllocation, SalesError> {
    if amount <= Decimal::ZERO {
        return Err(SalesError::NonPositivePayment);
    }
    if amount > balance {
        return Err(SalesError::PaymentExceedsBalance {
            requested: amount,
            balance,
        });
    }

    let mut ordered: Vec<&OutstandingInstallment> = installments.iter().collect();
    ordered.sort_by_key(|i| (i.due_date, i.id));

    let mut remaining = amount;
    let mut applications = Vec::new();

    for installment in ordered {
        if remaining.is_zero() {
            break;
        }
        let due = installment.remaining_due();
        if due <= Decimal::ZERO {
            continue;
        }
        let applied = remaining.min(due);
        applications.push(InstallmentApplication {
            installment_id: installment.id,
            amount: applied,
            settles: applied == due,
        });
        remaining -= applied;
    }

    Ok(PaymentAllocation {
        applications,
        overpayment: remaining,
    })
}
