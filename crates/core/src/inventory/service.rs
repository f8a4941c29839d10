//! Property status transition rules.
//!
//! Every mutating operation elsewhere in the system depends on the current
//! property status. The legal transitions are centralized here so no call
//! path can bypass a check.

use super::error::InventoryError;
use super::types::PropertyStatus;

/// Stateless service guarding property status transitions.
pub struct InventoryService;

impl InventoryService {
    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Available → Booked (booking)
    /// - Available → Sold (cash or installment sale)
    /// - Available → Unavailable (block fully subdivided)
    /// - Booked → Available (booking released)
    /// - Booked → Sold (booked sale completes)
    /// - Unavailable → Available (a proposed lot was rejected)
    ///
    /// `Sold` is terminal.
    #[must_use]
    pub fn is_valid_transition(from: PropertyStatus, to: PropertyStatus) -> bool {
        matches!(
            (from, to),
            (
                PropertyStatus::Available,
                PropertyStatus::Booked | PropertyStatus::Sold | PropertyStatus::Unavailable
            ) | (
                PropertyStatus::Booked,
                PropertyStatus::Available | PropertyStatus::Sold
            ) | (PropertyStatus::Unavailable, PropertyStatus::Available)
        )
    }

    /// Transition to `Sold`, gated on the current status.
    pub fn mark_sold(current: PropertyStatus) -> Result<PropertyStatus, InventoryError> {
        if current.is_sellable() {
            Ok(PropertyStatus::Sold)
        } else {
            Err(InventoryError::NotSellable(current))
        }
    }

    /// Reserve an available property for a client.
    pub fn book(current: PropertyStatus) -> Result<PropertyStatus, InventoryError> {
        match current {
            PropertyStatus::Available => Ok(PropertyStatus::Booked),
            _ => Err(InventoryError::InvalidTransition {
                from: current,
                to: PropertyStatus::Booked,
            }),
        }
    }

    /// Release a booking back to the open market.
    pub fn release_booking(current: PropertyStatus) -> Result<PropertyStatus, InventoryError> {
        match current {
            PropertyStatus::Booked => Ok(PropertyStatus::Available),
            _ => Err(InventoryError::InvalidTransition {
                from: current,
                to: PropertyStatus::Available,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PropertyStatus::Available, PropertyStatus::Booked, true)]
    #[case(PropertyStatus::Available, PropertyStatus::Sold, true)]
    #[case(PropertyStatus::Available, PropertyStatus::Unavailable, true)]
    #[case(PropertyStatus::Booked, PropertyStatus::Available, true)]
    #[case(PropertyStatus::Booked, PropertyStatus::Sold, true)]
    #[case(PropertyStatus::Unavailable, PropertyStatus::Available, true)]
    #[case(PropertyStatus::Sold, PropertyStatus::Available, false)]
    #[case(PropertyStatus::Sold, PropertyStatus::Booked, false)]
    #[case(PropertyStatus::Unavailable, PropertyStatus::Sold, false)]
    #[case(PropertyStatus::Booked, PropertyStatus::Unavailable, false)]
    fn test_transition_table(
        #[case] from: PropertyStatus,
        #[case] to: PropertyStatus,
        #[case] legal: bool,
    ) {
        assert_eq!(InventoryService::is_valid_transition(from, to), legal);
    }

    #[test]
    fn test_mark_sold_from_available_and_booked() {
        assert_eq!(
            InventoryService::mark_sold(PropertyStatus::Available),
            Ok(PropertyStatus::Sold)
        );
        assert_eq!(
            InventoryService::mark_sold(PropertyStatus::Booked),
            Ok(PropertyStatus::Sold)
        );
    }

    #[test]
    fn test_mark_sold_rejected_when_not_sellable() {
        assert_eq!(
            InventoryService::mark_sold(PropertyStatus::Sold),
            Err(InventoryError::NotSellable(PropertyStatus::Sold))
        );
        assert_eq!(
            InventoryService::mark_sold(PropertyStatus::Unavailable),
            Err(InventoryError::NotSellable(PropertyStatus::Unavailable))
        );
    }

    #[test]
    fn test_book_and_release() {
        assert_eq!(
            InventoryService::book(PropertyStatus::Available),
            Ok(PropertyStatus::Booked)
        );
        assert_eq!(
            InventoryService::release_booking(PropertyStatus::Booked),
            Ok(PropertyStatus::Available)
        );
        assert!(InventoryService::book(PropertyStatus::Sold).is_err());
        assert!(InventoryService::release_booking(PropertyStatus::Available).is_err());
    }
}
