//! The lock-guarded pool that callers operate on.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{debug, error, info};

use super::state::{PoolState, Transition};
use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, AssetId, AssetPair, Fee, Price, Reserves, Shares};
use crate::error::AmmError;
use crate::math;
use crate::traits::{AssetTransfer, FromConfig};

/// A constant-product pool bound to an asset-transfer backend.
///
/// Every mutating call takes the write lock, plans against the current
/// state, settles the plan's transfers through `T`, and commits only if the
/// settlement succeeded.  Failed calls leave reserves and shares exactly as
/// they were.  Read-only calls take the read lock and may run concurrently
/// with each other.
///
/// If a failed settlement cannot be compensated, custody and books diverge.
/// The pool then halts: every later mutating call fails with
/// [`AmmError::CustodyInconsistent`] while reads keep working.
///
/// `T` must not call back into this pool while settling; the write lock is
/// held and the call would deadlock.
///
/// # Examples
///
/// ```
/// use amm_swap::config::PoolConfig;
/// use amm_swap::domain::{AccountId, Amount, AssetId, Fee, Shares};
/// use amm_swap::ledger::InMemoryAssets;
/// use amm_swap::pool::Pool;
///
/// let tka = AssetId::from_bytes([1u8; 32]);
/// let tkb = AssetId::from_bytes([2u8; 32]);
/// let custody = AccountId::from_bytes([0xee; 32]);
/// let lp = AccountId::from_bytes([0x01; 32]);
///
/// let assets = InMemoryAssets::new(custody);
/// for asset in [tka, tkb] {
///     assets.mint(asset, lp, Amount::new(10_000)).expect("mint");
///     assets.approve(asset, lp, Amount::new(10_000));
/// }
///
/// let cfg = PoolConfig::new(tka, tkb, Fee::STANDARD).expect("valid config");
/// let pool = Pool::new(&cfg, assets).expect("valid pool");
///
/// let shares = pool
///     .add_liquidity(lp, Amount::new(1_000), Amount::new(1_000), Shares::ZERO)
///     .expect("deposit");
/// assert_eq!(shares, Shares::new(1_000));
///
/// let out = pool.swap(lp, tka, Amount::new(100), Amount::new(90)).expect("swap");
/// assert_eq!(out, Amount::new(90));
/// ```
#[derive(Debug)]
pub struct Pool<T> {
    pair: AssetPair,
    fee: Fee,
    state: RwLock<PoolState>,
    halted: AtomicBool,
    transfers: T,
}

impl<T: AssetTransfer> Pool<T> {
    /// Creates an empty pool for `config`, moving assets through `transfers`.
    ///
    /// # Errors
    ///
    /// Propagates any validation error from the configuration.
    pub fn new(config: &PoolConfig, transfers: T) -> Result<Self, AmmError> {
        let state = PoolState::from_config(config)?;
        debug!(
            asset_a = %config.pair().asset_a(),
            asset_b = %config.pair().asset_b(),
            fee = %config.fee(),
            "pool created"
        );
        Ok(Self {
            pair: *config.pair(),
            fee: config.fee(),
            state: RwLock::new(state),
            halted: AtomicBool::new(false),
            transfers,
        })
    }

    /// Deposits up to `amount_a` / `amount_b` from `owner` and returns the
    /// shares minted.
    ///
    /// Only the ratio-matching part of the deposit is pulled from `owner`.
    ///
    /// # Errors
    ///
    /// See [`PoolState::plan_add_liquidity`]; additionally
    /// [`AmmError::TransferFailed`] if the deposit cannot be pulled.
    pub fn add_liquidity(
        &self,
        owner: AccountId,
        amount_a: Amount,
        amount_b: Amount,
        min_shares: Shares,
    ) -> Result<Shares, AmmError> {
        let deposit = self.transact("add_liquidity", |state| {
            state.plan_add_liquidity(owner, amount_a, amount_b, min_shares)
        })?;
        info!(
            %owner,
            amount_a = %deposit.amount_a(),
            amount_b = %deposit.amount_b(),
            shares = %deposit.shares(),
            "liquidity added"
        );
        Ok(deposit.shares())
    }

    /// Burns `shares` held by `owner` and pays out the proportional reserves.
    ///
    /// # Errors
    ///
    /// See [`PoolState::plan_remove_liquidity`]; additionally
    /// [`AmmError::TransferFailed`] if a payout cannot be pushed.
    pub fn remove_liquidity(
        &self,
        owner: AccountId,
        shares: Shares,
        min_amount_a: Amount,
        min_amount_b: Amount,
    ) -> Result<(Amount, Amount), AmmError> {
        let withdrawal = self.transact("remove_liquidity", |state| {
            state.plan_remove_liquidity(owner, shares, min_amount_a, min_amount_b)
        })?;
        info!(
            %owner,
            shares = %withdrawal.shares(),
            amount_a = %withdrawal.amount_a(),
            amount_b = %withdrawal.amount_b(),
            "liquidity removed"
        );
        Ok((withdrawal.amount_a(), withdrawal.amount_b()))
    }

    /// Sells exactly `amount_in` of `asset_in` and returns the output paid
    /// to `trader`.
    ///
    /// # Errors
    ///
    /// See [`PoolState::plan_swap`]; additionally
    /// [`AmmError::TransferFailed`] if either leg cannot be settled.
    pub fn swap(
        &self,
        trader: AccountId,
        asset_in: AssetId,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<Amount, AmmError> {
        let trade = self.transact("swap", |state| {
            state.plan_swap(trader, asset_in, amount_in, min_amount_out)
        })?;
        info!(
            %trader,
            asset_in = %trade.asset_in(),
            amount_in = %trade.amount_in(),
            amount_out = %trade.amount_out(),
            "swap executed"
        );
        Ok(trade.amount_out())
    }

    /// Buys exactly `amount_out` of the asset opposite `asset_in` and
    /// returns the input charged to `trader`.
    ///
    /// # Errors
    ///
    /// See [`PoolState::plan_swap_for_exact`]; additionally
    /// [`AmmError::TransferFailed`] if either leg cannot be settled.
    pub fn swap_for_exact(
        &self,
        trader: AccountId,
        asset_in: AssetId,
        amount_out: Amount,
        max_amount_in: Amount,
    ) -> Result<Amount, AmmError> {
        let trade = self.transact("swap_for_exact", |state| {
            state.plan_swap_for_exact(trader, asset_in, amount_out, max_amount_in)
        })?;
        info!(
            %trader,
            asset_in = %trade.asset_in(),
            amount_in = %trade.amount_in(),
            amount_out = %trade.amount_out(),
            "swap executed"
        );
        Ok(trade.amount_in())
    }

    /// Runs one plan / settle / commit cycle under the write lock.
    fn transact<P, F>(&self, operation: &'static str, plan: F) -> Result<P, AmmError>
    where
        P: Transition,
        F: FnOnce(&PoolState) -> Result<P, AmmError>,
    {
        let mut state = self.state.write();
        if self.halted.load(Ordering::Acquire) {
            return Err(AmmError::CustodyInconsistent(
                "pool halted after an uncompensated settlement".to_owned(),
            ));
        }
        let transition =
            plan(&state).inspect_err(|err| debug!(operation, error = %err, "operation rejected"))?;
        if let Err(err) = self.transfers.settle(&transition.legs()) {
            if matches!(err, AmmError::CustodyInconsistent(_)) {
                self.halted.store(true, Ordering::Release);
                error!(operation, error = %err, "custody diverged from books; pool halted");
            } else {
                debug!(operation, error = %err, "settlement failed");
            }
            return Err(err);
        }
        transition.commit(&mut state);
        debug_assert!(state.invariants_hold());
        Ok(transition)
    }
}

impl<T> Pool<T> {
    /// [`math::get_amount_out`] with this pool's fee.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAmount`] if any argument is zero.
    pub fn get_amount_out(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, AmmError> {
        math::get_amount_out(amount_in, reserve_in, reserve_out, self.fee)
    }

    /// [`math::get_amount_in`] with this pool's fee.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAmount`] if `amount_out` is zero or not below
    /// `reserve_out`, or a reserve is zero.
    pub fn get_amount_in(
        &self,
        amount_out: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, AmmError> {
        math::get_amount_in(amount_out, reserve_in, reserve_out, self.fee)
    }

    /// Exact-in quote against the live reserves.
    ///
    /// # Errors
    ///
    /// See [`PoolState::quote_out`].
    pub fn quote_out(&self, asset_in: &AssetId, amount_in: Amount) -> Result<Amount, AmmError> {
        self.state.read().quote_out(asset_in, amount_in)
    }

    /// Exact-out quote against the live reserves.
    ///
    /// # Errors
    ///
    /// See [`PoolState::quote_in`].
    pub fn quote_in(&self, asset_in: &AssetId, amount_out: Amount) -> Result<Amount, AmmError> {
        self.state.read().quote_in(asset_in, amount_out)
    }

    /// Marginal price of `base` in the other asset.
    ///
    /// # Errors
    ///
    /// See [`PoolState::spot_price`].
    pub fn spot_price(&self, base: &AssetId) -> Result<Price, AmmError> {
        self.state.read().spot_price(base)
    }

    /// Current reserves.
    pub fn reserves(&self) -> Reserves {
        self.state.read().reserves()
    }

    /// Shares held by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: &AccountId) -> Shares {
        self.state.read().balance_of(owner)
    }

    /// Total shares outstanding.
    #[must_use]
    pub fn total_shares(&self) -> Shares {
        self.state.read().total_shares()
    }

    /// A consistent copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> PoolState {
        self.state.read().clone()
    }

    /// The asset pair.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        &self.pair
    }

    /// First pool asset.
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.pair.asset_a()
    }

    /// Second pool asset.
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.pair.asset_b()
    }

    /// The swap fee.
    #[must_use]
    pub const fn fee(&self) -> Fee {
        self.fee
    }

    /// Returns `true` once an uncompensated settlement has halted the pool.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Acquire)
    }

    /// The transfer backend.
    #[must_use]
    pub const fn transfers(&self) -> &T {
        &self.transfers
    }
}
