//! Pool ownership shares.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Units of proportional ownership over a pool's reserves.
///
/// Kept distinct from [`Amount`](super::Amount) so a share count can never
/// be passed where an asset quantity is expected.
///
/// # Examples
///
/// ```
/// use amm_swap::domain::Shares;
///
/// let held = Shares::new(1_000);
/// assert_eq!(held.checked_sub(&Shares::new(400)), Some(Shares::new(600)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw share count.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw share count.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
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

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_constant() {
        assert!(Shares::ZERO.is_zero());
        assert_eq!(Shares::default(), Shares::ZERO);
    }

    #[test]
    fn checked_ops() {
        let a = Shares::new(300);
        assert_eq!(a.checked_add(&Shares::new(200)), Some(Shares::new(500)));
        assert_eq!(a.checked_sub(&Shares::new(301)), None);
        assert_eq!(Shares::new(u128::MAX).checked_add(&Shares::new(1)), None);
    }

    #[test]
    fn ordering() {
        assert!(Shares::new(1) < Shares::new(2));
    }
}
