//! Raw asset quantity with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A raw asset quantity in the asset's smallest unit.
///
/// `Amount` carries no decimals; every `u128` value is a valid amount.
/// Arithmetic is checked and returns `None` instead of wrapping or
/// panicking, so callers decide which [`AmmError`](crate::error::AmmError)
/// a failure maps to.
///
/// # Examples
///
/// ```
/// use amm_swap::domain::Amount;
///
/// let reserve = Amount::new(1_000);
/// let deposit = Amount::new(500);
/// assert_eq!(reserve.checked_add(&deposit), Some(Amount::new(1_500)));
/// assert_eq!(deposit.checked_sub(&reserve), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw `u128` quantity.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw quantity.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` for the zero amount.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_max() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
        assert_eq!(Amount::MAX.get(), u128::MAX);
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn add_overflow_is_none() {
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
        assert_eq!(
            Amount::new(2).checked_add(&Amount::new(3)),
            Some(Amount::new(5))
        );
    }

    #[test]
    fn sub_underflow_is_none() {
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
        assert_eq!(Amount::new(7).checked_sub(&Amount::new(7)), Some(Amount::ZERO));
    }

    #[test]
    fn serializes_as_bare_number() {
        let Ok(json) = serde_json::to_string(&Amount::new(1_000)) else {
            panic!("serialize");
        };
        assert_eq!(json, "1000");
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(Amount::new(42).to_string(), "42");
    }
}
