//! Sales ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by sales ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SalesError {
    /// Amount paid cannot be negative.
    #[error("Amount paid cannot be negative")]
    NegativeAmount,

    /// Discount cannot be negative.
    #[error("Discount cannot be negative")]
    NegativeDiscount,

    /// Discount cannot make the net price negative.
    #[error("Discount {discount} exceeds property price {price}")]
    DiscountExceedsPrice {
        /// Discount requested.
        discount: Decimal,
        /// Raw property price.
        price: Decimal,
    },

    /// Amount paid cannot exceed the price after discount.
    #[error("Amount paid {amount} exceeds net price {net_price}")]
    AmountExceedsNetPrice {
        /// Amount offered.
        amount: Decimal,
        /// Price after discount.
        net_price: Decimal,
    },

    /// The deposit actually paid is below what the plan requires.
    #[error("Deposit {paid} is below the required deposit {required}")]
    DepositBelowRequired {
        /// Deposit offered.
        paid: Decimal,
        /// Deposit the plan requires.
        required: Decimal,
    },

    /// The opening payment cannot exceed the interest-loaded total.
    #[error("Amount paid {amount} exceeds total payable {total_payable}")]
    AmountExceedsTotalPayable {
        /// Amount offered.
        amount: Decimal,
        /// Interest-loaded total.
        total_payable: Decimal,
    },

    /// Payments must be positive.
    #[error("Payment amount must be positive")]
    NonPositivePayment,

    /// A payment cannot exceed the transaction's remaining balance.
    #[error("Payment {requested} exceeds outstanding balance {balance}")]
    PaymentExceedsBalance {
        /// Payment requested.
        requested: Decimal,
        /// Balance still owed.
        balance: Decimal,
    },

    /// Schedule dates ran past the supported calendar range.
    #[error("Installment due date out of calendar range")]
    ScheduleOutOfRange,
}
