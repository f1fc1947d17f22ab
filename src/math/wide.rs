//! 256-bit intermediates for `u128` formulas.
//!
//! Products of two reserves or of a reserve and a scaled amount routinely
//! exceed `u128` for 18-decimal assets, so every multiply-then-divide in the
//! engine goes through [`U256`] and is narrowed back only at the end.

use primitive_types::U256;

use crate::domain::Rounding;
use crate::error::AmmError;

/// Narrows a 256-bit value back to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] labelled with `what` if `value` does not fit.
pub fn narrow(value: U256, what: &'static str) -> Result<u128, AmmError> {
    if value > U256::from(u128::MAX) {
        return Err(AmmError::Overflow(what));
    }
    Ok(value.as_u128())
}

/// Computes `a * b / denominator` with explicit rounding and no intermediate
/// overflow.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use amm_swap::domain::Rounding;
/// use amm_swap::math::mul_div;
///
/// assert_eq!(mul_div(u128::MAX, 4, 8, Rounding::Down), Ok(u128::MAX / 2));
/// assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
/// ```
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128, AmmError> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    // Two factors below 2^128 always fit in 256 bits.
    let product = U256::from(a) * U256::from(b);
    let denominator = U256::from(denominator);
    let quotient = product / denominator;
    let quotient = match rounding {
        Rounding::Down => quotient,
        Rounding::Up if !(product % denominator).is_zero() => quotient + U256::one(),
        Rounding::Up => quotient,
    };
    narrow(quotient, "mul_div quotient overflow")
}

/// Floor of the square root of `a * b`, exact for any two `u128` inputs.
///
/// The result always fits in `u128` because `sqrt(a * b) <= max(a, b)`.
#[must_use]
pub fn sqrt_product(a: u128, b: u128) -> u128 {
    let root = (U256::from(a) * U256::from(b)).integer_sqrt();
    // integer_sqrt of a value below 2^256 is below 2^128.
    root.low_u128()
}
