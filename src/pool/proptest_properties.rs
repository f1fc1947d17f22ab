//! Property-based checks of the pool invariants.
//!
//! 1. **Invariant growth**: `x · y` never decreases across a swap.
//! 2. **Quote consistency**: a swap pays exactly what the quote promised.
//! 3. **Pool-favouring rounding**: buying back the output of an exact-out
//!    quote never yields less than requested, and a round trip A→B→A never
//!    returns more than was sold.
//! 4. **Proportional redemption**: withdrawing a fresh deposit never returns
//!    more than was put in.
//! 5. **Share conservation**: the ledger always sums to the total supply.

use proptest::prelude::*;

use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, AssetId, Fee, Shares};
use crate::math::{get_amount_in, get_amount_out};
use crate::pool::{PoolState, Transition};
use crate::traits::FromConfig;

const TKA: AssetId = AssetId::from_bytes([1u8; 32]);
const TKB: AssetId = AssetId::from_bytes([2u8; 32]);
const ALICE: AccountId = AccountId::from_bytes([0xa1; 32]);
const BOB: AccountId = AccountId::from_bytes([0xb0; 32]);

fn seeded(ra: u128, rb: u128) -> PoolState {
    let Ok(cfg) = PoolConfig::new(TKA, TKB, Fee::STANDARD) else {
        panic!("valid config");
    };
    let Ok(mut state) = PoolState::from_config(&cfg) else {
        panic!("valid state");
    };
    let Ok(deposit) =
        state.plan_add_liquidity(ALICE, Amount::new(ra), Amount::new(rb), Shares::ZERO)
    else {
        panic!("valid seed deposit");
    };
    deposit.commit(&mut state);
    state
}

fn reserve() -> impl Strategy<Value = u128> {
    1_000u128..=1_000_000_000_000_000_000_000
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn swap_never_shrinks_product(
        ra in reserve(),
        rb in reserve(),
        amount in 1u128..=1_000_000_000_000_000_000,
        a_to_b in any::<bool>(),
    ) {
        let mut state = seeded(ra, rb);
        let asset_in = if a_to_b { TKA } else { TKB };
        let k_before = state.reserves().product();
        if let Ok(trade) = state.plan_swap(BOB, asset_in, Amount::new(amount), Amount::ZERO) {
            trade.commit(&mut state);
            prop_assert!(state.reserves().product() >= k_before);
            prop_assert!(state.invariants_hold());
        }
    }

    #[test]
    fn swap_pays_the_quote(
        ra in reserve(),
        rb in reserve(),
        amount in 1u128..=1_000_000_000_000_000_000,
    ) {
        let state = seeded(ra, rb);
        let quoted = state.quote_out(&TKA, Amount::new(amount));
        let traded = state.plan_swap(BOB, TKA, Amount::new(amount), Amount::ZERO);
        match (quoted, traded) {
            (Ok(q), Ok(t)) => prop_assert_eq!(q, t.amount_out()),
            (Ok(q), Err(_)) => prop_assert!(q.is_zero()),
            (Err(qe), Err(te)) => prop_assert_eq!(qe, te),
            (Err(qe), Ok(_)) => prop_assert!(false, "quote failed but swap planned: {qe}"),
        }
    }

    #[test]
    fn exact_out_quote_covers_request(
        reserve_in in reserve(),
        reserve_out in reserve(),
        fraction in 1u128..1_000,
    ) {
        let wanted = reserve_out * fraction / 1_000;
        prop_assume!(wanted > 0);
        let (r_in, r_out) = (Amount::new(reserve_in), Amount::new(reserve_out));
        if let Ok(paid) = get_amount_in(Amount::new(wanted), r_in, r_out, Fee::STANDARD) {
            let Ok(received) = get_amount_out(paid, r_in, r_out, Fee::STANDARD) else {
                panic!("quoted input must be quotable");
            };
            prop_assert!(received.get() >= wanted);
        }
    }

    #[test]
    fn round_trip_never_profits(
        ra in reserve(),
        rb in reserve(),
        amount in 1u128..=1_000_000_000_000,
    ) {
        let mut state = seeded(ra, rb);
        let Ok(first) = state.plan_swap(BOB, TKA, Amount::new(amount), Amount::ZERO) else {
            return Ok(());
        };
        first.commit(&mut state);
        if let Ok(back) = state.plan_swap(BOB, TKB, first.amount_out(), Amount::ZERO) {
            prop_assert!(back.amount_out().get() <= amount);
        }
    }

    #[test]
    fn withdrawal_never_exceeds_deposit(
        ra in reserve(),
        rb in reserve(),
        deposit_a in 1u128..=1_000_000_000_000_000,
        deposit_b in 1u128..=1_000_000_000_000_000,
    ) {
        let mut state = seeded(ra, rb);
        let Ok(deposit) = state.plan_add_liquidity(
            BOB,
            Amount::new(deposit_a),
            Amount::new(deposit_b),
            Shares::ZERO,
        ) else {
            return Ok(());
        };
        prop_assert!(deposit.amount_a().get() <= deposit_a);
        prop_assert!(deposit.amount_b().get() <= deposit_b);
        deposit.commit(&mut state);

        let exit = state.plan_remove_liquidity(BOB, deposit.shares(), Amount::ZERO, Amount::ZERO);
        if let Ok(w) = exit {
            prop_assert!(w.amount_a() <= deposit.amount_a());
            prop_assert!(w.amount_b() <= deposit.amount_b());
        }
    }

    #[test]
    fn ledger_sums_to_total(
        ra in reserve(),
        rb in reserve(),
        ops in proptest::collection::vec((0u8..3, 1u128..=1_000_000_000), 1..20),
    ) {
        let mut state = seeded(ra, rb);
        for (kind, value) in ops {
            let amount = Amount::new(value);
            match kind {
                0 => {
                    if let Ok(d) = state.plan_add_liquidity(BOB, amount, amount, Shares::ZERO) {
                        d.commit(&mut state);
                    }
                }
                1 => {
                    let held = state.balance_of(&BOB).get();
                    let burn = Shares::new(value.min(held));
                    let exit = state.plan_remove_liquidity(BOB, burn, Amount::ZERO, Amount::ZERO);
                    if let Ok(w) = exit {
                        w.commit(&mut state);
                    }
                }
                _ => {
                    if let Ok(t) = state.plan_swap(BOB, TKB, amount, Amount::ZERO) {
                        t.commit(&mut state);
                    }
                }
            }
            prop_assert!(state.invariants_hold());
            let sum: u128 = state.ledger().holders().map(|(_, s)| s.get()).sum();
            prop_assert_eq!(sum, state.total_shares().get());
        }
    }
}
