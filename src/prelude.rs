//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use amm_swap::prelude::*;
//! ```

pub use crate::config::PoolConfig;
pub use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, Fee, Price, Reserves, Rounding, Shares, Side,
};
pub use crate::error::{AmmError, Result};
pub use crate::ledger::{InMemoryAssets, ShareLedger};
pub use crate::math::{get_amount_in, get_amount_out, CheckedArithmetic};
pub use crate::pool::{Pool, PoolState, Transition};
pub use crate::traits::{AssetTransfer, FromConfig, TransferLeg};
