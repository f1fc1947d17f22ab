//! Exact spot price as a ratio of reserves.

use core::fmt;

use super::Amount;
use crate::error::AmmError;

/// Units of the quote asset per unit of the base asset, kept as an exact
/// ratio so no precision is lost until a caller asks for a float.
///
/// # Examples
///
/// ```
/// use amm_swap::domain::{Amount, Price};
///
/// let p = Price::new(Amount::new(2_000), Amount::new(1_000)).expect("non-zero base");
/// assert_eq!(p.to_f64(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Price {
    quote: Amount,
    base: Amount,
}

impl Price {
    /// Creates the ratio `quote / base`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `base` is zero.
    pub fn new(quote: Amount, base: Amount) -> Result<Self, AmmError> {
        if base.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        Ok(Self { quote, base })
    }

    /// Quote-side quantity (numerator).
    pub const fn quote(&self) -> Amount {
        self.quote
    }

    /// Base-side quantity (denominator).
    pub const fn base(&self) -> Amount {
        self.base
    }

    /// Lossy floating-point view, for display and analytics only.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.quote.get() as f64 / self.base.get() as f64
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.quote, self.base)
    }
}
