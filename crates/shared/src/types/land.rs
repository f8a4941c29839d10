//! Land size with tolerance-aware comparisons.
//!
//! CRITICAL: Never use floating-point for acreage calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.
//! Comparisons against zero use a fixed tolerance because surveyed
//! sizes are entered by hand and carved up repeatedly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether a block is fully subdivided.
/// A remainder within this many acres of zero counts as exhausted.
pub const SIZE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 3); // 0.001

/// A land size in acres.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct LandSize(pub Decimal);

impl LandSize {
    /// Creates a new land size.
    #[must_use]
    pub const fn new(acres: Decimal) -> Self {
        Self(acres)
    }

    /// Zero acres.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The raw decimal acreage.
    #[must_use]
    pub const fn acres(&self) -> Decimal {
        self.0
    }

    /// Returns true if the size is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns true if the size is positive (strictly greater than zero).
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if the size is exhausted, i.e. within
    /// [`SIZE_TOLERANCE`] of zero.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.0.abs() <= SIZE_TOLERANCE
    }

    /// Size remaining after carving out `carved`.
    #[must_use]
    pub fn minus(&self, carved: Self) -> Self {
        Self(self.0 - carved.0)
    }

    /// Size after returning `restored` acres.
    #[must_use]
    pub fn plus(&self, restored: Self) -> Self {
        Self(self.0 + restored.0)
    }
}

impl std::fmt::Display for LandSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} acres", self.0)
    }
}

impl From<Decimal> for LandSize {
    fn from(acres: Decimal) -> Self {
        Self(acres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tolerance_constant() {
        assert_eq!(SIZE_TOLERANCE, dec!(0.001));
    }

    #[test]
    fn test_exhausted_within_tolerance() {
        assert!(LandSize::new(dec!(0)).is_exhausted());
        assert!(LandSize::new(dec!(0.001)).is_exhausted());
        assert!(LandSize::new(dec!(0.0005)).is_exhausted());
        assert!(!LandSize::new(dec!(0.002)).is_exhausted());
        assert!(!LandSize::new(dec!(4)).is_exhausted());
    }

    #[test]
    fn test_minus_plus_round_trip() {
        let block = LandSize::new(dec!(10));
        let lot = LandSize::new(dec!(4));
        let remaining = block.minus(lot);
        assert_eq!(remaining, LandSize::new(dec!(6)));
        assert_eq!(remaining.plus(lot), block);
    }

    #[test]
    fn test_negative_detection() {
        assert!(LandSize::new(dec!(-1)).is_negative());
        assert!(!LandSize::new(dec!(0)).is_negative());
        assert!(!LandSize::new(dec!(1)).is_negative());
    }
}
