use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Non-negative stock quantity.
///
/// Arithmetic never mutates: `add` and `subtract` return new instances.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quantity(i64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn new(value: i64) -> DomainResult<Self> {
        if value < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn add(self, other: Quantity) -> DomainResult<Quantity> {
        self.0
            .checked_add(other.0)
            .map(Quantity)
            .ok_or_else(|| DomainError::validation("quantity overflow"))
    }

    pub fn subtract(self, other: Quantity) -> DomainResult<Quantity> {
        Quantity::new(self.0 - other.0).map_err(|_| {
            DomainError::validation("subtraction would result in a negative quantity")
        })
    }

    pub fn is_sufficient(self, required: Quantity) -> bool {
        self.0 >= required.0
    }
}

impl ValueObject for Quantity {}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn qty(v: i64) -> Quantity {
        Quantity::new(v).unwrap()
    }

    #[test]
    fn rejects_negative() {
        assert!(matches!(Quantity::new(-1), Err(DomainError::Validation(_))));
    }

    #[test]
    fn zero_is_valid() {
        assert!(qty(0).is_zero());
        assert_eq!(Quantity::ZERO, qty(0));
    }

    #[test]
    fn subtract_to_exactly_zero_is_allowed() {
        assert_eq!(qty(20).subtract(qty(20)).unwrap(), Quantity::ZERO);
    }

    #[test]
    fn subtract_below_zero_is_validation_error() {
        assert!(matches!(
            qty(5).subtract(qty(6)),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn arithmetic_leaves_operands_untouched() {
        let a = qty(10);
        let b = a.add(qty(5)).unwrap();
        assert_eq!(a.value(), 10);
        assert_eq!(b.value(), 15);
    }

    #[test]
    fn add_overflow_is_rejected() {
        assert!(qty(i64::MAX).add(qty(1)).is_err());
    }

    proptest! {
        #[test]
        fn add_matches_integer_addition(a in 0i64..1_000_000_000, b in 0i64..1_000_000_000) {
            prop_assert_eq!(qty(a).add(qty(b)).unwrap(), qty(a + b));
        }

        #[test]
        fn subtract_succeeds_iff_enough(a in 0i64..1_000_000, b in 0i64..1_000_000) {
            let result = qty(a).subtract(qty(b));
            if a >= b {
                prop_assert_eq!(result.unwrap(), qty(a - b));
            } else {
                prop_assert!(matches!(result, Err(DomainError::Validation(_))));
            }
        }

        #[test]
        fn is_sufficient_compares_magnitude(a in 0i64..1_000_000, b in 0i64..1_000_000) {
            prop_assert_eq!(qty(a).is_sufficient(qty(b)), a >= b);
        }
    }
}
