//! Unified error type for the pool engine.
//!
//! Every fallible operation in the crate returns [`AmmError`].  The first six
//! variants are the caller-facing failure kinds of the engine; the remaining
//! ones guard settlement, construction and fixed-width arithmetic.  An
//! operation that fails leaves the pool exactly as it was before the call.
//! The one exception is [`AmmError::CustodyInconsistent`]: the pool's books
//! are intact but the custody is not, and the pool halts.

use thiserror::Error;

use crate::domain::{Amount, Shares};

/// Errors produced by the pool engine and its value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// A numeric input is zero or outside the range the formula accepts.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// The asset identity is not one of the pool's two assets, or a pair
    /// could not be formed from the given identities.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// A burn or redemption asked for more shares than the owner holds.
    #[error("insufficient shares: requested {requested}, available {available}")]
    InsufficientShares {
        /// Shares the caller tried to burn.
        requested: Shares,
        /// Shares the owner actually holds.
        available: Shares,
    },

    /// The computed result is below the caller's slippage floor.
    #[error("insufficient output: got {actual}, minimum {minimum}")]
    InsufficientOutput {
        /// Amount the operation would produce.
        actual: u128,
        /// Floor requested by the caller.
        minimum: u128,
    },

    /// An exact-output swap would need more input than the caller allowed.
    #[error("excessive input: requires {required}, maximum {maximum}")]
    ExcessiveInput {
        /// Input the pool would charge.
        required: Amount,
        /// Ceiling requested by the caller.
        maximum: Amount,
    },

    /// The operation requires existing liquidity.
    #[error("pool has no liquidity")]
    EmptyPool,

    /// The asset transfer collaborator could not move funds.
    #[error("transfer failed: {0}")]
    TransferFailed(String),

    /// A failed transfer batch could not be fully undone, so the custody no
    /// longer matches the pool's books.  The pool refuses further mutations.
    #[error("custody inconsistent: {0}")]
    CustodyInconsistent(String),

    /// A checked arithmetic step does not fit the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero in a checked helper.
    #[error("division by zero")]
    DivisionByZero,

    /// The fee fraction is malformed.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A pool configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;
