//! The constant-product pool: plain state with plan/commit transitions and
//! the locked engine built on it.

mod engine;
mod state;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use engine::Pool;
pub use state::{Deposit, PoolState, Trade, Transition, Withdrawal};
