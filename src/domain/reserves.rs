//! Snapshot of a pool's two reserves.

use core::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::{Amount, Side};

/// The quantities of both assets currently held by a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Reserves {
    a: Amount,
    b: Amount,
}

impl Reserves {
    /// The reserves of an empty pool.
    pub const EMPTY: Self = Self {
        a: Amount::ZERO,
        b: Amount::ZERO,
    };

    /// Creates a snapshot from both sides.
    pub const fn new(a: Amount, b: Amount) -> Self {
        Self { a, b }
    }

    /// Reserve of the first asset.
    pub const fn a(&self) -> Amount {
        self.a
    }

    /// Reserve of the second asset.
    pub const fn b(&self) -> Amount {
        self.b
    }

    /// Reserve on `side`.
    pub const fn get(&self, side: Side) -> Amount {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    /// Returns `(reserve_in, reserve_out)` for a trade entering on `side_in`.
    pub const fn oriented(&self, side_in: Side) -> (Amount, Amount) {
        match side_in {
            Side::A => (self.a, self.b),
            Side::B => (self.b, self.a),
        }
    }

    /// Returns a copy with `side` replaced by `amount`.
    pub const fn with(self, side: Side, amount: Amount) -> Self {
        match side {
            Side::A => Self { a: amount, ..self },
            Side::B => Self { b: amount, ..self },
        }
    }

    /// Returns `true` when both reserves are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.a.is_zero() && self.b.is_zero()
    }

    /// The constant-product invariant `k = a * b`, exact in 256 bits.
    #[must_use]
    pub fn product(&self) -> U256 {
        // Both factors are below 2^128, so the product fits.
        U256::from(self.a.get()) * U256::from(self.b.get())
    }
}

impl fmt::Display for Reserves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_follows_side() {
        let r = Reserves::new(Amount::new(10), Amount::new(20));
        assert_eq!(r.oriented(Side::A), (Amount::new(10), Amount::new(20)));
        assert_eq!(r.oriented(Side::B), (Amount::new(20), Amount::new(10)));
        assert_eq!(r.get(Side::B), Amount::new(20));
    }

    #[test]
    fn with_replaces_one_side() {
        let r = Reserves::new(Amount::new(1), Amount::new(2)).with(Side::B, Amount::new(9));
        assert_eq!(r, Reserves::new(Amount::new(1), Amount::new(9)));
    }

    #[test]
    fn product_does_not_overflow() {
        let r = Reserves::new(Amount::MAX, Amount::MAX);
        assert_eq!(r.product(), U256::from(u128::MAX) * U256::from(u128::MAX));
        assert!(Reserves::EMPTY.is_empty());
        assert_eq!(Reserves::default(), Reserves::EMPTY);
    }

    #[test]
    fn display() {
        let r = Reserves::new(Amount::new(1_000), Amount::new(1_500));
        assert_eq!(r.to_string(), "(1000, 1500)");
    }
}
