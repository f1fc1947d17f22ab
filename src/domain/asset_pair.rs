//! The two assets a pool trades, and which side of the pool an asset sits on.

use serde::{Deserialize, Serialize};

use super::AssetId;
use crate::error::AmmError;

/// One side of a two-asset pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The pool's first asset.
    A,
    /// The pool's second asset.
    B,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// An ordered pair of distinct, non-null assets.
///
/// Unlike a canonically sorted pair, the order given at construction is kept:
/// `asset_a` is whatever the pool creator named first, and reserves, quotes and
/// redemptions are reported in that order.
///
/// # Examples
///
/// ```
/// use amm_swap::domain::{AssetId, AssetPair, Side};
///
/// let tka = AssetId::from_bytes([2u8; 32]);
/// let tkb = AssetId::from_bytes([1u8; 32]);
/// let pair = AssetPair::new(tka, tkb).expect("distinct assets");
///
/// assert_eq!(pair.asset_a(), tka);
/// assert_eq!(pair.side_of(&tkb), Ok(Side::B));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPair", into = "RawPair")]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

#[derive(Serialize, Deserialize)]
struct RawPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates a pair, keeping the argument order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if either identity is null or both
    /// identities are equal.
    pub fn new(asset_a: AssetId, asset_b: AssetId) -> Result<Self, AmmError> {
        let pair = Self { asset_a, asset_b };
        pair.validate()?;
        Ok(pair)
    }

    /// Re-checks the pair invariants.
    ///
    /// # Errors
    ///
    /// Same conditions as [`AssetPair::new`].
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.asset_a.is_zero() || self.asset_b.is_zero() {
            return Err(AmmError::InvalidAsset("pool assets must be non-null"));
        }
        if self.asset_a == self.asset_b {
            return Err(AmmError::InvalidAsset("pool assets must be distinct"));
        }
        Ok(())
    }

    /// Returns the first asset.
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    /// Returns the second asset.
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    /// Returns the asset on `side`.
    #[must_use]
    pub const fn asset(&self, side: Side) -> AssetId {
        match side {
            Side::A => self.asset_a,
            Side::B => self.asset_b,
        }
    }

    /// Returns `true` if `asset` is one of the two pool assets.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Locates `asset` within the pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `asset` is not in the pair.
    pub fn side_of(&self, asset: &AssetId) -> Result<Side, AmmError> {
        if *asset == self.asset_a {
            Ok(Side::A)
        } else if *asset == self.asset_b {
            Ok(Side::B)
        } else {
            Err(AmmError::InvalidAsset("asset is not part of this pool"))
        }
    }
}

impl TryFrom<RawPair> for AssetPair {
    type Error = AmmError;

    fn try_from(raw: RawPair) -> Result<Self, Self::Error> {
        Self::new(raw.asset_a, raw.asset_b)
    }
}

impl From<AssetPair> for RawPair {
    fn from(pair: AssetPair) -> Self {
        Self {
            asset_a: pair.asset_a,
            asset_b: pair.asset_b,
        }
    }
}
