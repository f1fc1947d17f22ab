//! # amm-swap
//!
//! Constant-product engine for a two-asset exchange pool: reserves of two
//! fungible assets, proportional liquidity shares, and fee-charging swap
//! quotes under the `x · y = k` invariant.
//!
//! Asset movements are delegated to an injected
//! [`AssetTransfer`](traits::AssetTransfer) backend; every operation either
//! settles all of its transfers and commits, or leaves the pool untouched.
//!
//! # Quick Start
//!
//! ```rust
//! use amm_swap::prelude::*;
//!
//! let usdc = AssetId::from_bytes([1u8; 32]);
//! let weth = AssetId::from_bytes([2u8; 32]);
//! let custody = AccountId::from_bytes([0xee; 32]);
//! let lp = AccountId::from_bytes([0x01; 32]);
//! let trader = AccountId::from_bytes([0x02; 32]);
//!
//! // 1. An in-memory token ledger with funded, approved accounts
//! let assets = InMemoryAssets::new(custody);
//! for who in [lp, trader] {
//!     for asset in [usdc, weth] {
//!         assets.mint(asset, who, Amount::new(1_000_000)).expect("mint");
//!         assets.approve(asset, who, Amount::new(1_000_000));
//!     }
//! }
//!
//! // 2. A pool charging 0.3%
//! let config = PoolConfig::new(usdc, weth, Fee::STANDARD).expect("valid config");
//! let pool = Pool::new(&config, assets).expect("pool created");
//!
//! // 3. Seed liquidity, then trade against it
//! let shares = pool
//!     .add_liquidity(lp, Amount::new(1_000), Amount::new(1_000), Shares::ZERO)
//!     .expect("deposit");
//! assert_eq!(shares, Shares::new(1_000));
//!
//! let out = pool
//!     .swap(trader, usdc, Amount::new(100), Amount::new(90))
//!     .expect("swap");
//! assert_eq!(out, Amount::new(90));
//! assert_eq!(pool.reserves(), Reserves::new(Amount::new(1_100), Amount::new(910)));
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`AssetId`](domain::AssetId), [`Fee`](domain::Fee), etc. |
//! | [`math`]   | Checked arithmetic, 256-bit intermediates, swap quotes |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) blueprint |
//! | [`traits`] | [`AssetTransfer`](traits::AssetTransfer) boundary and [`FromConfig`](traits::FromConfig) |
//! | [`ledger`] | [`ShareLedger`](ledger::ShareLedger) and the [`InMemoryAssets`](ledger::InMemoryAssets) backend |
//! | [`pool`]   | [`PoolState`](pool::PoolState) transitions and the locked [`Pool`](pool::Pool) |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod traits;
