//! Configuration for a constant-product pool.

use serde::{Deserialize, Serialize};

use crate::domain::{AssetId, AssetPair, Fee};
use crate::error::AmmError;

/// Declarative blueprint of a pool: which two assets it trades and the fee
/// it keeps.
///
/// A pool always starts empty, so unlike a pre-seeded simulation config
/// there are no initial reserves here; liquidity arrives through
/// `add_liquidity`.
///
/// # Validation
///
/// - The pair is validated at [`AssetPair`] construction (distinct, non-null).
/// - The fee must be a proper fraction below 100%.
///
/// Deserialization runs the same checks, so a config read from a file is as
/// trustworthy as one built in code.
///
/// # Examples
///
/// ```
/// use amm_swap::config::PoolConfig;
/// use amm_swap::domain::{AssetId, Fee};
///
/// let cfg = PoolConfig::new(
///     AssetId::from_bytes([1u8; 32]),
///     AssetId::from_bytes([2u8; 32]),
///     Fee::STANDARD,
/// )
/// .expect("valid config");
/// assert_eq!(cfg.fee(), Fee::STANDARD);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    #[serde(flatten)]
    pair: AssetPair,
    #[serde(default)]
    fee: Fee,
}

impl PoolConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if the assets are equal or null.
    /// - [`AmmError::InvalidFee`] if the fee is malformed.
    pub fn new(asset_a: AssetId, asset_b: AssetId, fee: Fee) -> Result<Self, AmmError> {
        let config = Self {
            pair: AssetPair::new(asset_a, asset_b)?,
            fee,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration from an already validated pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee is malformed.
    pub fn from_pair(pair: AssetPair, fee: Fee) -> Result<Self, AmmError> {
        let config = Self { pair, fee };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PoolConfig::new`].
    pub fn validate(&self) -> Result<(), AmmError> {
        self.pair.validate()?;
        self.fee.validate()
    }

    /// Returns the asset pair.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        &self.pair
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee(&self) -> Fee {
        self.fee
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn id(byte: u8) -> AssetId {
        AssetId::from_bytes([byte; 32])
    }

    #[test]
    fn valid_config() {
        let Ok(cfg) = PoolConfig::new(id(1), id(2), Fee::STANDARD) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.pair().asset_a(), id(1));
        assert_eq!(cfg.pair().asset_b(), id(2));
    }

    #[test]
    fn identical_assets_rejected() {
        let Err(AmmError::InvalidAsset(_)) = PoolConfig::new(id(1), id(1), Fee::STANDARD) else {
            panic!("expected InvalidAsset");
        };
    }

    #[test]
    fn loads_from_json_with_default_fee() {
        let json = format!(r#"{{"asset_a":"{}","asset_b":"{}"}}"#, id(1), id(2));
        let Ok(cfg) = serde_json::from_str::<PoolConfig>(&json) else {
            panic!("expected config to parse");
        };
        assert_eq!(cfg.fee(), Fee::STANDARD);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn json_with_bad_fee_rejected() {
        let json = format!(
            r#"{{"asset_a":"{}","asset_b":"{}","fee":{{"numerator":10,"denominator":10}}}}"#,
            id(1),
            id(2)
        );
        assert!(serde_json::from_str::<PoolConfig>(&json).is_err());
    }

    #[test]
    fn json_round_trip() {
        let Ok(cfg) = PoolConfig::new(id(3), id(4), Fee::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(json) = serde_json::to_string(&cfg) else {
            panic!("serialize");
        };
        assert_eq!(serde_json::from_str::<PoolConfig>(&json).ok(), Some(cfg));
    }
}
