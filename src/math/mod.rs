//! Integer arithmetic behind the pool engine.
//!
//! - [`CheckedArithmetic`] lifts `Option`-returning newtype arithmetic into
//!   `Result`.
//! - [`mul_div`] / [`sqrt_product`] run through 256-bit intermediates.
//! - [`get_amount_out`] / [`get_amount_in`] are the pure swap quotes.
//!
//! # Rounding convention
//!
//! **Always round against the trader** (pool-favourable):
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, redemption, minted shares | [`Rounding::Down`](crate::domain::Rounding::Down) |
//! | Required swap input | up (`floor + 1`) |

mod checked;
mod quote;
mod wide;

pub use checked::CheckedArithmetic;
pub use quote::{get_amount_in, get_amount_out};
pub use wide::{mul_div, narrow, sqrt_product};
