//! Construction of pool state from configuration.
//!
//! # Validation Contract
//!
//! Implementations **must** validate the configuration during construction.
//! A successfully constructed value is guaranteed to be in a valid initial
//! state; for a constant-product pool that means the empty state: zero
//! reserves, zero shares, an immutable pair and fee.

use crate::error::AmmError;

/// Builds a value from its configuration type.
///
/// There is no blanket implementation: every pairing of config and target is
/// written out so that validation stays specific to the target.
///
/// # Errors
///
/// Returns [`AmmError::InvalidConfiguration`] (or a more specific variant
/// such as [`AmmError::InvalidAsset`] or [`AmmError::InvalidFee`]) if the
/// configuration is invalid.
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Propagates the configuration's validation failure.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
