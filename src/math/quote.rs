//! Pure constant-product quote formulas.
//!
//! Both functions are free of state: they take the reserves explicitly, which
//! is what lets the engine prove that an executed swap moves exactly the
//! amounts a quote against the pre-swap reserves announced.
//!
//! # Exact-in (`get_amount_out`)
//!
//! ```text
//! in_with_fee = amount_in × (D − N)
//! amount_out  = ⌊ in_with_fee × reserve_out / (reserve_in × D + in_with_fee) ⌋
//! ```
//!
//! # Exact-out (`get_amount_in`)
//!
//! ```text
//! amount_in = ⌊ reserve_in × amount_out × D / ((reserve_out − amount_out) × (D − N)) ⌋ + 1
//! ```
//!
//! `N / D` is the [`Fee`].  Flooring the output and adding one to the input
//! both favour the pool.

use primitive_types::U256;

use super::wide::narrow;
use crate::domain::{Amount, Fee};
use crate::error::AmmError;

/// Output delivered for `amount_in` against `(reserve_in, reserve_out)`.
///
/// # Errors
///
/// - [`AmmError::InvalidAmount`] if `amount_in` or either reserve is zero.
/// - [`AmmError::Overflow`] if an intermediate exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use amm_swap::domain::{Amount, Fee};
/// use amm_swap::math::get_amount_out;
///
/// let out = get_amount_out(Amount::new(100), Amount::new(1_000), Amount::new(1_000), Fee::STANDARD);
/// assert_eq!(out, Ok(Amount::new(90)));
/// ```
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: Fee,
) -> Result<Amount, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::InvalidAmount("input amount must be positive"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InvalidAmount("reserves must be positive"));
    }

    let in_with_fee = U256::from(amount_in.get()) * U256::from(fee.complement());
    let numerator = in_with_fee
        .checked_mul(U256::from(reserve_out.get()))
        .ok_or(AmmError::Overflow("amount_out numerator overflow"))?;
    let denominator = (U256::from(reserve_in.get()) * U256::from(fee.denominator()))
        .checked_add(in_with_fee)
        .ok_or(AmmError::Overflow("amount_out denominator overflow"))?;

    // numerator / denominator < reserve_out, so it always narrows.
    let out = narrow(numerator / denominator, "amount_out overflow")?;
    Ok(Amount::new(out))
}

/// Input required to receive exactly `amount_out` from
/// `(reserve_in, reserve_out)`.
///
/// # Errors
///
/// - [`AmmError::InvalidAmount`] if `amount_out` is zero, either reserve is
///   zero, or `amount_out >= reserve_out` (a reserve can never be drained).
/// - [`AmmError::Overflow`] if the required input does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use amm_swap::domain::{Amount, Fee};
/// use amm_swap::math::get_amount_in;
///
/// let needed = get_amount_in(Amount::new(90), Amount::new(1_000), Amount::new(1_000), Fee::STANDARD);
/// assert_eq!(needed, Ok(Amount::new(100)));
/// ```
pub fn get_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: Fee,
) -> Result<Amount, AmmError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InvalidAmount("reserves must be positive"));
    }
    if amount_out.is_zero() {
        return Err(AmmError::InvalidAmount("output amount must be positive"));
    }
    if amount_out >= reserve_out {
        return Err(AmmError::InvalidAmount("output must be below the reserve"));
    }

    // reserve_in × amount_out < 2^256; the × D step can overflow.
    let numerator = (U256::from(reserve_in.get()) * U256::from(amount_out.get()))
        .checked_mul(U256::from(fee.denominator()))
        .ok_or(AmmError::Overflow("amount_in numerator overflow"))?;
    let remaining = reserve_out.get() - amount_out.get();
    let denominator = U256::from(remaining) * U256::from(fee.complement());

    let amount_in = (numerator / denominator)
        .checked_add(U256::one())
        .ok_or(AmmError::Overflow("amount_in overflow"))?;
    Ok(Amount::new(narrow(amount_in, "amount_in overflow")?))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn a(v: u128) -> Amount {
        Amount::new(v)
    }

    #[test]
    fn standard_swap_of_one_hundred() {
        // floor(100*997*1000 / (1000*1000 + 100*997)) = 90
        assert_eq!(
            get_amount_out(a(100), a(1_000), a(1_000), Fee::STANDARD),
            Ok(a(90))
        );
    }

    #[test]
    fn output_is_below_input_at_parity() {
        let Ok(out) = get_amount_out(a(100), a(1_000_000), a(1_000_000), Fee::STANDARD) else {
            panic!("expected Ok");
        };
        assert!(out < a(100));
        assert!(!out.is_zero());
    }

    #[test]
    fn zero_arguments_are_invalid() {
        for (amt, rin, rout) in [(0, 10, 10), (1, 0, 10), (1, 10, 0)] {
            let Err(AmmError::InvalidAmount(_)) =
                get_amount_out(a(amt), a(rin), a(rout), Fee::STANDARD)
            else {
                panic!("expected InvalidAmount for ({amt}, {rin}, {rout})");
            };
        }
    }

    #[test]
    fn tiny_input_can_round_to_zero() {
        assert_eq!(
            get_amount_out(a(1), a(1_000_000), a(1_000), Fee::STANDARD),
            Ok(Amount::ZERO)
        );
    }

    #[test]
    fn eighteen_decimal_reserves_do_not_overflow() {
        let ether = 1_000_000_000_000_000_000u128;
        let Ok(out) = get_amount_out(
            a(100 * ether),
            a(1_000 * ether),
            a(1_000 * ether),
            Fee::STANDARD,
        ) else {
            panic!("expected Ok");
        };
        assert!(out > a(90 * ether) && out < a(91 * ether));
    }

    #[test]
    fn amount_in_rounds_up() {
        // floor(1000*95*1000 / (905*997)) + 1 = 105 + 1
        assert_eq!(
            get_amount_in(a(95), a(1_000), a(1_000), Fee::STANDARD),
            Ok(a(106))
        );
    }

    #[test]
    fn amount_in_cannot_drain_reserve() {
        assert_eq!(
            get_amount_in(a(1_000), a(1_000), a(1_000), Fee::STANDARD),
            Err(AmmError::InvalidAmount("output must be below the reserve"))
        );
        assert!(get_amount_in(a(1_001), a(1_000), a(1_000), Fee::STANDARD).is_err());
    }

    #[test]
    fn amount_in_zero_reserve_or_output() {
        assert!(get_amount_in(a(1), a(0), a(1_000), Fee::STANDARD).is_err());
        assert!(get_amount_in(a(1), a(1_000), a(0), Fee::STANDARD).is_err());
        assert!(get_amount_in(a(0), a(1_000), a(1_000), Fee::STANDARD).is_err());
    }

    #[test]
    fn paying_the_quoted_input_delivers_the_output() {
        let Ok(needed) = get_amount_in(a(95), a(1_000), a(1_000), Fee::STANDARD) else {
            panic!("expected Ok");
        };
        let Ok(out) = get_amount_out(needed, a(1_000), a(1_000), Fee::STANDARD) else {
            panic!("expected Ok");
        };
        assert!(out >= a(95));
    }

    #[test]
    fn zero_fee_is_pure_constant_product() {
        // floor(100*1000 / (1000 + 100)) = 90
        assert_eq!(get_amount_out(a(100), a(1_000), a(1_000), Fee::ZERO), Ok(a(90)));
        // floor(1000*90 / 910) + 1 = 98 + 1
        assert_eq!(get_amount_in(a(90), a(1_000), a(1_000), Fee::ZERO), Ok(a(99)));
    }
}
