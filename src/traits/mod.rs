//! Seams between the pool engine and the outside world.
//!
//! [`AssetTransfer`] is the injected collaborator that moves assets;
//! [`FromConfig`] builds pool state from a validated configuration.

mod asset_transfer;
mod from_config;

pub use asset_transfer::{AssetTransfer, TransferLeg};
pub use from_config::FromConfig;
