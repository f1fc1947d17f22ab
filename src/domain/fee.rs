//! Swap fee expressed as an exact fraction.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Basis-point denominator (10 000 = 100%).
const BPS_DENOMINATOR: u32 = 10_000;

/// The fraction of every swap input that stays in the pool as LP yield.
///
/// Stored as `numerator / denominator` so the pricing formulas stay in
/// integers.  A valid fee satisfies `denominator > 0` and
/// `numerator < denominator`; a zero numerator is a fee-free pool.
///
/// # Examples
///
/// ```
/// use amm_swap::domain::Fee;
///
/// let fee = Fee::STANDARD;
/// assert_eq!((fee.numerator(), fee.denominator()), (3, 1_000));
/// assert_eq!(fee.complement(), 997);
/// assert_eq!(Fee::from_basis_points(30), Ok(Fee::new(30, 10_000).expect("valid")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFee", into = "RawFee")]
pub struct Fee {
    numerator: u32,
    denominator: u32,
}

#[derive(Serialize, Deserialize)]
struct RawFee {
    numerator: u32,
    denominator: u32,
}

impl Fee {
    /// 0.3%, the classic constant-product fee.
    pub const STANDARD: Self = Self {
        numerator: 3,
        denominator: 1_000,
    };

    /// No fee.
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// Creates a fee of `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the denominator is zero or the
    /// fraction is not below 100%.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, AmmError> {
        let fee = Self {
            numerator,
            denominator,
        };
        fee.validate()?;
        Ok(fee)
    }

    /// Creates a fee from basis points (30 bp = 0.3%).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for 10 000 bp or more.
    pub fn from_basis_points(bps: u32) -> Result<Self, AmmError> {
        Self::new(bps, BPS_DENOMINATOR)
    }

    /// Re-checks the fee invariants.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Fee::new`].
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.denominator == 0 {
            return Err(AmmError::InvalidFee("fee denominator must be non-zero"));
        }
        if self.numerator >= self.denominator {
            return Err(AmmError::InvalidFee("fee must be below 100%"));
        }
        Ok(())
    }

    /// Returns the fee numerator.
    #[must_use]
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Returns the fee denominator.
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Returns `denominator - numerator`, the share of input that prices
    /// the trade.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        self.denominator - self.numerator
    }
}

impl Default for Fee {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<RawFee> for Fee {
    type Error = AmmError;

    fn try_from(raw: RawFee) -> Result<Self, Self::Error> {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl From<Fee> for RawFee {
    fn from(fee: Fee) -> Self {
        Self {
            numerator: fee.numerator,
            denominator: fee.denominator,
        }
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
