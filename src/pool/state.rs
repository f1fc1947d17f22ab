//! Constant-product pool state and its transitions.
//!
//! The invariant is `x · y = k` over the two reserves.  Fees are charged on
//! the input side and never leave the pool, so `k` only grows across swaps.
//!
//! # Plan, settle, commit
//!
//! Every mutating operation is split into a pure *plan* computed against the
//! current state (all validation and all checked arithmetic happen here) and
//! an infallible *commit*.  Between the two, the engine settles the plan's
//! transfer legs.  A plan that fails, or a settlement that fails, therefore
//! leaves the state untouched.
//!
//! # Add liquidity
//!
//! 1. Empty pool: credit both amounts, mint `⌊√(a × b)⌋`.
//! 2. Otherwise: `b* = ⌊a × rB / rA⌋`; if `b* ≤ b` consume `(a, b*)`, else
//!    consume `(⌊b × rA / rB⌋, b)`.
//! 3. Mint `min(⌊a′ × T / rA⌋, ⌊b′ × T / rB⌋)` for the consumed `(a′, b′)`.
//!
//! # Remove liquidity
//!
//! `amount_x = ⌊s × r_x / T⌋` for both sides, rounding in favour of the pool.
//!
//! # Swap
//!
//! `amount_out = get_amount_out(amount_in, r_in, r_out)`; the full
//! `amount_in` joins `r_in`, `amount_out` leaves `r_out`.

use core::cmp;

use crate::config::PoolConfig;
use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, Fee, Price, Reserves, Rounding, Shares, Side,
};
use crate::error::AmmError;
use crate::ledger::{LedgerUpdate, ShareLedger};
use crate::math::{get_amount_in, get_amount_out, mul_div, sqrt_product, CheckedArithmetic};
use crate::traits::{FromConfig, TransferLeg};

/// A validated state change that can be settled and then committed.
pub trait Transition {
    /// The asset movements that must succeed before the change is committed.
    fn legs(&self) -> Vec<TransferLeg>;

    /// Applies the change.  Cannot fail: everything was checked while
    /// planning.
    fn commit(&self, state: &mut PoolState);
}

/// A planned liquidity deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deposit {
    pair: AssetPair,
    owner: AccountId,
    amount_a: Amount,
    amount_b: Amount,
    shares: Shares,
    reserves_after: Reserves,
    ledger: LedgerUpdate,
}

impl Deposit {
    /// Amount of asset A actually consumed.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Amount of asset B actually consumed.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }

    /// Shares minted to the owner.
    #[must_use]
    pub const fn shares(&self) -> Shares {
        self.shares
    }

    /// Reserves once committed.
    pub const fn reserves_after(&self) -> Reserves {
        self.reserves_after
    }
}

impl Transition for Deposit {
    fn legs(&self) -> Vec<TransferLeg> {
        vec![
            TransferLeg::In {
                asset: self.pair.asset_a(),
                from: self.owner,
                amount: self.amount_a,
            },
            TransferLeg::In {
                asset: self.pair.asset_b(),
                from: self.owner,
                amount: self.amount_b,
            },
        ]
    }

    fn commit(&self, state: &mut PoolState) {
        state.reserves = self.reserves_after;
        state.shares.apply(self.ledger);
    }
}

/// A planned redemption of shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    pair: AssetPair,
    owner: AccountId,
    shares: Shares,
    amount_a: Amount,
    amount_b: Amount,
    reserves_after: Reserves,
    ledger: LedgerUpdate,
}

impl Withdrawal {
    /// Shares burned.
    #[must_use]
    pub const fn shares(&self) -> Shares {
        self.shares
    }

    /// Amount of asset A paid out.
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Amount of asset B paid out.
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }

    /// Reserves once committed.
    pub const fn reserves_after(&self) -> Reserves {
        self.reserves_after
    }
}

impl Transition for Withdrawal {
    fn legs(&self) -> Vec<TransferLeg> {
        vec![
            TransferLeg::Out {
                asset: self.pair.asset_a(),
                to: self.owner,
                amount: self.amount_a,
            },
            TransferLeg::Out {
                asset: self.pair.asset_b(),
                to: self.owner,
                amount: self.amount_b,
            },
        ]
    }

    fn commit(&self, state: &mut PoolState) {
        state.reserves = self.reserves_after;
        state.shares.apply(self.ledger);
    }
}

/// A planned swap, exact-in or exact-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    trader: AccountId,
    asset_in: AssetId,
    asset_out: AssetId,
    amount_in: Amount,
    amount_out: Amount,
    reserves_after: Reserves,
}

impl Trade {
    /// Asset sold to the pool.
    #[must_use]
    pub const fn asset_in(&self) -> AssetId {
        self.asset_in
    }

    /// Asset bought from the pool.
    #[must_use]
    pub const fn asset_out(&self) -> AssetId {
        self.asset_out
    }

    /// Amount pulled from the trader.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Amount pushed to the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Reserves once committed.
    pub const fn reserves_after(&self) -> Reserves {
        self.reserves_after
    }
}

impl Transition for Trade {
    fn legs(&self) -> Vec<TransferLeg> {
        vec![
            TransferLeg::In {
                asset: self.asset_in,
                from: self.trader,
                amount: self.amount_in,
            },
            TransferLeg::Out {
                asset: self.asset_out,
                to: self.trader,
                amount: self.amount_out,
            },
        ]
    }

    fn commit(&self, state: &mut PoolState) {
        state.reserves = self.reserves_after;
    }
}

/// Reserves, shares and immutable parameters of one constant-product pool.
///
/// `PoolState` is plain data with no locking; [`Pool`](super::Pool) wraps it
/// in a lock and drives the plan / settle / commit cycle.  It is also what
/// [`Pool::snapshot`](super::Pool::snapshot) hands out, so callers can dry-run
/// a plan against a consistent copy.
///
/// # Examples
///
/// ```
/// use amm_swap::config::PoolConfig;
/// use amm_swap::domain::{AccountId, Amount, AssetId, Fee, Shares};
/// use amm_swap::pool::{PoolState, Transition};
/// use amm_swap::traits::FromConfig;
///
/// let tka = AssetId::from_bytes([1u8; 32]);
/// let tkb = AssetId::from_bytes([2u8; 32]);
/// let cfg = PoolConfig::new(tka, tkb, Fee::STANDARD).expect("valid");
/// let mut state = PoolState::from_config(&cfg).expect("valid");
///
/// let lp = AccountId::from_bytes([9u8; 32]);
/// let deposit = state
///     .plan_add_liquidity(lp, Amount::new(1_000), Amount::new(1_000), Shares::ZERO)
///     .expect("valid deposit");
/// deposit.commit(&mut state);
///
/// assert_eq!(state.total_shares(), Shares::new(1_000));
/// assert_eq!(state.quote_out(&tka, Amount::new(100)), Ok(Amount::new(90)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolState {
    pair: AssetPair,
    fee: Fee,
    reserves: Reserves,
    shares: ShareLedger,
}

impl FromConfig<PoolConfig> for PoolState {
    /// Creates an empty pool for the configured pair and fee.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            pair: *config.pair(),
            fee: config.fee(),
            reserves: Reserves::EMPTY,
            shares: ShareLedger::new(),
        })
    }
}

impl PoolState {
    /// The two pool assets.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        &self.pair
    }

    /// The swap fee.
    #[must_use]
    pub const fn fee(&self) -> Fee {
        self.fee
    }

    /// Current reserves.
    pub const fn reserves(&self) -> Reserves {
        self.reserves
    }

    /// Total shares outstanding.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.shares.total()
    }

    /// Shares held by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: &AccountId) -> Shares {
        self.shares.balance_of(owner)
    }

    /// The share ledger.
    #[must_use]
    pub const fn ledger(&self) -> &ShareLedger {
        &self.shares
    }

    /// Returns `true` when no shares are outstanding.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.shares.total().is_zero()
    }

    /// Checks the structural invariants: reserves and shares are either all
    /// zero or all positive, and the ledger sums to the total with no balance
    /// above it.
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let empty_a = self.reserves.a().is_zero();
        let empty_b = self.reserves.b().is_zero();
        let empty_shares = self.shares.total().is_zero();
        if empty_a != empty_b || empty_a != empty_shares {
            return false;
        }
        let total = self.shares.total();
        let mut sum: u128 = 0;
        for (_, balance) in self.shares.holders() {
            if balance.is_zero() || *balance > total {
                return false;
            }
            sum = match sum.checked_add(balance.get()) {
                Some(s) => s,
                None => return false,
            };
        }
        sum == total.get()
    }

    /// Output `amount_in` of `asset_in` would buy at the current reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not a pool asset.
    /// - [`AmmError::EmptyPool`] if the pool has no liquidity.
    /// - Any error of [`get_amount_out`].
    pub fn quote_out(&self, asset_in: &AssetId, amount_in: Amount) -> Result<Amount, AmmError> {
        let (reserve_in, reserve_out) = self.live_reserves(asset_in)?;
        get_amount_out(amount_in, reserve_in, reserve_out, self.fee)
    }

    /// Input of `asset_in` needed to buy exactly `amount_out` of the other
    /// asset at the current reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not a pool asset.
    /// - [`AmmError::EmptyPool`] if the pool has no liquidity.
    /// - Any error of [`get_amount_in`].
    pub fn quote_in(&self, asset_in: &AssetId, amount_out: Amount) -> Result<Amount, AmmError> {
        let (reserve_in, reserve_out) = self.live_reserves(asset_in)?;
        get_amount_in(amount_out, reserve_in, reserve_out, self.fee)
    }

    /// Marginal price of `base` in units of the other asset.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `base` is not a pool asset.
    /// - [`AmmError::EmptyPool`] if the pool has no liquidity.
    pub fn spot_price(&self, base: &AssetId) -> Result<Price, AmmError> {
        let (base_reserve, quote_reserve) = self.live_reserves(base)?;
        Price::new(quote_reserve, base_reserve)
    }

    /// Plans a deposit of up to `amount_a` / `amount_b` by `owner`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if either amount is zero.
    /// - [`AmmError::InsufficientOutput`] if fewer than `min_shares` (or no
    ///   shares at all) would be minted.
    /// - [`AmmError::Overflow`] if reserves or shares would overflow.
    pub fn plan_add_liquidity(
        &self,
        owner: AccountId,
        amount_a: Amount,
        amount_b: Amount,
        min_shares: Shares,
    ) -> Result<Deposit, AmmError> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InvalidAmount("deposit amounts must be positive"));
        }

        let total = self.shares.total();
        let (used_a, used_b, minted) = if total.is_zero() {
            let minted = sqrt_product(amount_a.get(), amount_b.get());
            (amount_a, amount_b, minted)
        } else {
            let (ra, rb) = (self.reserves.a().get(), self.reserves.b().get());
            let b_optimal = mul_div(amount_a.get(), rb, ra, Rounding::Down)?;
            let (used_a, used_b) = if b_optimal <= amount_b.get() {
                (amount_a.get(), b_optimal)
            } else {
                // b_optimal > amount_b implies a_optimal < amount_a.
                let a_optimal = mul_div(amount_b.get(), ra, rb, Rounding::Down)?;
                (a_optimal, amount_b.get())
            };
            let by_a = mul_div(used_a, total.get(), ra, Rounding::Down)?;
            let by_b = mul_div(used_b, total.get(), rb, Rounding::Down)?;
            (
                Amount::new(used_a),
                Amount::new(used_b),
                cmp::min(by_a, by_b),
            )
        };

        let minted = Shares::new(minted);
        if minted < min_shares || minted.is_zero() {
            return Err(AmmError::InsufficientOutput {
                actual: minted.get(),
                minimum: cmp::max(min_shares.get(), 1),
            });
        }

        let reserves_after = Reserves::new(
            self.reserves.a().safe_add(&used_a)?,
            self.reserves.b().safe_add(&used_b)?,
        );
        let ledger = self.shares.plan_mint(owner, minted)?;

        Ok(Deposit {
            pair: self.pair,
            owner,
            amount_a: used_a,
            amount_b: used_b,
            shares: minted,
            reserves_after,
            ledger,
        })
    }

    /// Plans the redemption of `shares` held by `owner`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `shares` is zero.
    /// - [`AmmError::InsufficientShares`] if `owner` holds fewer shares.
    /// - [`AmmError::InsufficientOutput`] if either side is below its
    ///   minimum or would pay out nothing.
    pub fn plan_remove_liquidity(
        &self,
        owner: AccountId,
        shares: Shares,
        min_amount_a: Amount,
        min_amount_b: Amount,
    ) -> Result<Withdrawal, AmmError> {
        if shares.is_zero() {
            return Err(AmmError::InvalidAmount("share amount must be positive"));
        }
        let ledger = self.shares.plan_burn(owner, shares)?;

        // plan_burn succeeded, so total >= shares > 0.
        let total = self.shares.total().get();
        let amount_a = Amount::new(mul_div(
            shares.get(),
            self.reserves.a().get(),
            total,
            Rounding::Down,
        )?);
        let amount_b = Amount::new(mul_div(
            shares.get(),
            self.reserves.b().get(),
            total,
            Rounding::Down,
        )?);

        for (actual, minimum) in [(amount_a, min_amount_a), (amount_b, min_amount_b)] {
            if actual < minimum || actual.is_zero() {
                return Err(AmmError::InsufficientOutput {
                    actual: actual.get(),
                    minimum: cmp::max(minimum.get(), 1),
                });
            }
        }

        let reserves_after = Reserves::new(
            self.reserves.a().safe_sub(&amount_a)?,
            self.reserves.b().safe_sub(&amount_b)?,
        );

        Ok(Withdrawal {
            pair: self.pair,
            owner,
            shares,
            amount_a,
            amount_b,
            reserves_after,
            ledger,
        })
    }

    /// Plans an exact-in swap of `amount_in` of `asset_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not a pool asset.
    /// - [`AmmError::EmptyPool`] if the pool has no liquidity.
    /// - [`AmmError::InvalidAmount`] if `amount_in` is zero.
    /// - [`AmmError::InsufficientOutput`] if the output is below
    ///   `min_amount_out` or rounds to zero.
    pub fn plan_swap(
        &self,
        trader: AccountId,
        asset_in: AssetId,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<Trade, AmmError> {
        let side_in = self.pair.side_of(&asset_in)?;
        let (reserve_in, reserve_out) = self.live_reserves(&asset_in)?;
        let amount_out = get_amount_out(amount_in, reserve_in, reserve_out, self.fee)?;

        if amount_out < min_amount_out || amount_out.is_zero() {
            return Err(AmmError::InsufficientOutput {
                actual: amount_out.get(),
                minimum: cmp::max(min_amount_out.get(), 1),
            });
        }

        self.trade(trader, side_in, amount_in, amount_out)
    }

    /// Plans an exact-out swap buying `amount_out` of the asset opposite
    /// `asset_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not a pool asset.
    /// - [`AmmError::EmptyPool`] if the pool has no liquidity.
    /// - [`AmmError::InvalidAmount`] if `amount_out` is zero or not below
    ///   the output reserve.
    /// - [`AmmError::ExcessiveInput`] if the required input exceeds
    ///   `max_amount_in`.
    pub fn plan_swap_for_exact(
        &self,
        trader: AccountId,
        asset_in: AssetId,
        amount_out: Amount,
        max_amount_in: Amount,
    ) -> Result<Trade, AmmError> {
        let side_in = self.pair.side_of(&asset_in)?;
        let (reserve_in, reserve_out) = self.live_reserves(&asset_in)?;
        let amount_in = get_amount_in(amount_out, reserve_in, reserve_out, self.fee)?;

        if amount_in > max_amount_in {
            return Err(AmmError::ExcessiveInput {
                required: amount_in,
                maximum: max_amount_in,
            });
        }

        self.trade(trader, side_in, amount_in, amount_out)
    }

    fn trade(
        &self,
        trader: AccountId,
        side_in: Side,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<Trade, AmmError> {
        let side_out = side_in.opposite();
        let reserves_after = self
            .reserves
            .with(side_in, self.reserves.get(side_in).safe_add(&amount_in)?)
            .with(side_out, self.reserves.get(side_out).safe_sub(&amount_out)?);

        Ok(Trade {
            trader,
            asset_in: self.pair.asset(side_in),
            asset_out: self.pair.asset(side_out),
            amount_in,
            amount_out,
            reserves_after,
        })
    }

    /// `(reserve_in, reserve_out)` for trades entering on `asset_in`,
    /// rejecting foreign assets and empty pools.
    fn live_reserves(&self, asset_in: &AssetId) -> Result<(Amount, Amount), AmmError> {
        let side_in = self.pair.side_of(asset_in)?;
        if self.is_empty() {
            return Err(AmmError::EmptyPool);
        }
        Ok(self.reserves.oriented(side_in))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const TKA: AssetId = AssetId::from_bytes([1u8; 32]);
    const TKB: AssetId = AssetId::from_bytes([2u8; 32]);
    const ALICE: AccountId = AccountId::from_bytes([0xa1; 32]);
    const BOB: AccountId = AccountId::from_bytes([0xb0; 32]);

    fn a(v: u128) -> Amount {
        Amount::new(v)
    }

    fn empty() -> PoolState {
        let Ok(cfg) = PoolConfig::new(TKA, TKB, Fee::STANDARD) else {
            panic!("valid config");
        };
        let Ok(state) = PoolState::from_config(&cfg) else {
            panic!("valid state");
        };
        state
    }

    fn seeded(ra: u128, rb: u128) -> PoolState {
        let mut state = empty();
        let Ok(deposit) = state.plan_add_liquidity(ALICE, a(ra), a(rb), Shares::ZERO) else {
            panic!("valid seed deposit");
        };
        deposit.commit(&mut state);
        state
    }

    #[test]
    fn new_state_is_empty() {
        let state = empty();
        assert!(state.is_empty());
        assert_eq!(state.reserves(), Reserves::EMPTY);
        assert!(state.invariants_hold());
    }

    #[test]
    fn initial_mint_is_geometric_mean() {
        let state = seeded(1_000, 1_000);
        assert_eq!(state.reserves(), Reserves::new(a(1_000), a(1_000)));
        assert_eq!(state.total_shares(), Shares::new(1_000));
        assert_eq!(state.balance_of(&ALICE), Shares::new(1_000));

        let uneven = seeded(1_000, 4_000);
        assert_eq!(uneven.total_shares(), Shares::new(2_000));
    }

    #[test]
    fn proportional_follow_up_deposit() {
        let state = seeded(1_000, 1_000);
        let Ok(deposit) = state.plan_add_liquidity(BOB, a(500), a(500), Shares::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!(deposit.shares(), Shares::new(500));
        assert_eq!(deposit.reserves_after(), Reserves::new(a(1_500), a(1_500)));
    }

    #[test]
    fn excess_b_is_not_consumed() {
        let state = seeded(1_000, 2_000);
        let Ok(deposit) = state.plan_add_liquidity(BOB, a(100), a(1_000), Shares::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!((deposit.amount_a(), deposit.amount_b()), (a(100), a(200)));
        assert_eq!(deposit.reserves_after(), Reserves::new(a(1_100), a(2_200)));
    }

    #[test]
    fn excess_a_is_not_consumed() {
        let state = seeded(1_000, 2_000);
        let Ok(deposit) = state.plan_add_liquidity(BOB, a(1_000), a(200), Shares::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!((deposit.amount_a(), deposit.amount_b()), (a(100), a(200)));
    }

    #[test]
    fn zero_deposit_amount_rejected() {
        let state = seeded(1_000, 1_000);
        let Err(AmmError::InvalidAmount(_)) =
            state.plan_add_liquidity(BOB, a(0), a(10), Shares::ZERO)
        else {
            panic!("expected InvalidAmount");
        };
        assert!(empty()
            .plan_add_liquidity(BOB, a(10), a(0), Shares::ZERO)
            .is_err());
    }

    #[test]
    fn min_shares_floor_enforced() {
        let state = seeded(1_000, 1_000);
        assert_eq!(
            state.plan_add_liquidity(BOB, a(500), a(500), Shares::new(501)),
            Err(AmmError::InsufficientOutput {
                actual: 500,
                minimum: 501
            })
        );
    }

    #[test]
    fn dust_deposit_that_mints_nothing_rejected() {
        let state = seeded(1_000_000, 1);
        // b_optimal = floor(1 * 1 / 1_000_000) = 0
        let Err(AmmError::InsufficientOutput { actual: 0, .. }) =
            state.plan_add_liquidity(BOB, a(1), a(1), Shares::ZERO)
        else {
            panic!("expected InsufficientOutput");
        };
    }

    #[test]
    fn redemption_is_proportional() {
        let state = seeded(1_000, 2_000);
        // total = floor(sqrt(2_000_000)) = 1414
        let Ok(w) = state.plan_remove_liquidity(ALICE, Shares::new(707), a(0), a(0)) else {
            panic!("expected Ok");
        };
        assert_eq!(w.amount_a(), a(500));
        assert_eq!(w.amount_b(), a(1_000));
    }

    #[test]
    fn redemption_beyond_balance_rejected() {
        let state = seeded(1_000, 1_000);
        assert_eq!(
            state.plan_remove_liquidity(BOB, Shares::new(1), a(0), a(0)),
            Err(AmmError::InsufficientShares {
                requested: Shares::new(1),
                available: Shares::ZERO
            })
        );
        assert!(matches!(
            state.plan_remove_liquidity(ALICE, Shares::ZERO, a(0), a(0)),
            Err(AmmError::InvalidAmount(_))
        ));
    }

    #[test]
    fn redemption_minimums_enforced() {
        let state = seeded(1_000, 1_000);
        assert_eq!(
            state.plan_remove_liquidity(ALICE, Shares::new(100), a(0), a(101)),
            Err(AmmError::InsufficientOutput {
                actual: 100,
                minimum: 101
            })
        );
    }

    #[test]
    fn full_exit_empties_pool() {
        let mut state = seeded(1_000, 1_000);
        let Ok(w) = state.plan_remove_liquidity(ALICE, Shares::new(1_000), a(0), a(0)) else {
            panic!("expected Ok");
        };
        w.commit(&mut state);
        assert!(state.is_empty());
        assert_eq!(state.reserves(), Reserves::EMPTY);
        assert!(state.invariants_hold());
    }

    #[test]
    fn swap_moves_reserves_by_quote() {
        let state = seeded(1_000, 1_000);
        let Ok(trade) = state.plan_swap(BOB, TKA, a(100), a(0)) else {
            panic!("expected Ok");
        };
        assert_eq!(trade.amount_out(), a(90));
        assert_eq!(trade.asset_out(), TKB);
        assert_eq!(trade.reserves_after(), Reserves::new(a(1_100), a(910)));
        assert!(trade.reserves_after().product() >= state.reserves().product());
    }

    #[test]
    fn swap_in_reverse_direction() {
        let state = seeded(1_000, 1_000);
        let Ok(trade) = state.plan_swap(BOB, TKB, a(100), a(0)) else {
            panic!("expected Ok");
        };
        assert_eq!(trade.asset_in(), TKB);
        assert_eq!(trade.reserves_after(), Reserves::new(a(910), a(1_100)));
    }

    #[test]
    fn swap_error_ordering() {
        let foreign = AssetId::from_bytes([3u8; 32]);
        assert!(matches!(
            empty().plan_swap(BOB, foreign, a(1), a(0)),
            Err(AmmError::InvalidAsset(_))
        ));
        assert_eq!(
            empty().plan_swap(BOB, TKA, a(1), a(0)),
            Err(AmmError::EmptyPool)
        );
        assert!(matches!(
            seeded(1_000, 1_000).plan_swap(BOB, TKA, a(0), a(0)),
            Err(AmmError::InvalidAmount(_))
        ));
    }

    #[test]
    fn swap_slippage_floor() {
        let state = seeded(1_000, 1_000);
        assert_eq!(
            state.plan_swap(BOB, TKA, a(100), a(91)),
            Err(AmmError::InsufficientOutput {
                actual: 90,
                minimum: 91
            })
        );
    }

    #[test]
    fn swap_for_exact_charges_quoted_input() {
        let state = seeded(1_000, 1_000);
        let Ok(trade) = state.plan_swap_for_exact(BOB, TKA, a(90), a(1_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(trade.amount_in(), a(100));
        assert_eq!(trade.amount_out(), a(90));
        assert_eq!(
            state.plan_swap_for_exact(BOB, TKA, a(90), a(99)),
            Err(AmmError::ExcessiveInput {
                required: a(100),
                maximum: a(99)
            })
        );
    }

    #[test]
    fn quotes_and_price_need_liquidity() {
        let state = empty();
        assert_eq!(state.quote_out(&TKA, a(10)), Err(AmmError::EmptyPool));
        assert_eq!(state.quote_in(&TKA, a(10)), Err(AmmError::EmptyPool));
        assert_eq!(state.spot_price(&TKA), Err(AmmError::EmptyPool));

        let seeded = seeded(1_000, 4_000);
        let Ok(price) = seeded.spot_price(&TKA) else {
            panic!("expected Ok");
        };
        assert_eq!((price.quote(), price.base()), (a(4_000), a(1_000)));
    }

    #[test]
    fn planning_never_mutates() {
        let state = seeded(1_000, 1_000);
        let before = state.clone();
        let _ = state.plan_swap(BOB, TKA, a(100), a(0));
        let _ = state.plan_add_liquidity(BOB, a(10), a(10), Shares::ZERO);
        let _ = state.plan_remove_liquidity(ALICE, Shares::new(10), a(0), a(0));
        assert_eq!(state, before);
    }

    #[test]
    fn legs_match_plan() {
        let state = seeded(1_000, 1_000);
        let Ok(trade) = state.plan_swap(BOB, TKB, a(100), a(0)) else {
            panic!("expected Ok");
        };
        assert_eq!(
            trade.legs(),
            vec![
                TransferLeg::In {
                    asset: TKB,
                    from: BOB,
                    amount: a(100)
                },
                TransferLeg::Out {
                    asset: TKA,
                    to: BOB,
                    amount: a(90)
                },
            ]
        );
    }
}
