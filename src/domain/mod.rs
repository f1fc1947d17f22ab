//! Value types of the pool domain.
//!
//! Identities, quantities, the fee fraction and reserve snapshots.  All of
//! them are small `Copy` newtypes with validated constructors, so an
//! invariant checked once at the edge holds everywhere downstream.

mod amount;
mod asset_pair;
mod fee;
mod identity;
mod price;
mod reserves;
mod rounding;
mod shares;

pub use amount::Amount;
pub use asset_pair::{AssetPair, Side};
pub use fee::Fee;
pub use identity::{AccountId, AssetId};
pub use price::Price;
pub use reserves::Reserves;
pub use rounding::Rounding;
pub use shares::Shares;
