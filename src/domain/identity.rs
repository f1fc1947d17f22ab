//! Opaque 32-byte identities for assets and accounts.
//!
//! Both identities render as `0x`-prefixed lowercase hex and parse from the
//! same form (the prefix is optional).  Serde uses the hex string so
//! configuration files stay readable.
//!
//! [`AssetId`] names a tradable asset (token contract, mint, denom, ...).
//! [`AccountId`] is the opaque principal that owns shares and sends or
//! receives assets; the engine performs no authentication, the identity is
//! only a key.
//!
//! ```
//! use amm_swap::domain::AssetId;
//!
//! let usdc = AssetId::from_bytes([1u8; 32]);
//! assert!(!usdc.is_zero());
//! assert_eq!(usdc.to_string().len(), 66);
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AmmError;

macro_rules! byte_identity {
    ($name:ident, $what:literal) => {
        #[doc = concat!("Opaque 32-byte ", $what, ".")]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; 32]);

        impl $name {
            /// Wraps raw identity bytes.
            #[must_use]
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Returns the raw identity bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> [u8; 32] {
                self.0
            }

            /// The all-zero identity, treated as null.
            #[must_use]
            pub const fn zero() -> Self {
                Self([0u8; 32])
            }

            /// Returns `true` for the null identity.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({self})", stringify!($name))
            }
        }

        impl FromStr for $name {
            type Err = AmmError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(digits, &mut bytes).map_err(|_| {
                    AmmError::InvalidConfiguration(concat!($what, " must be 32 hex-encoded bytes"))
                })?;
                Ok(Self(bytes))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(de::Error::custom)
            }
        }
    };
}

byte_identity!(AssetId, "asset id");
byte_identity!(AccountId, "account id");
