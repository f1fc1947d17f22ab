//! Pool configuration.
//!
//! [`PoolConfig`] is the declarative blueprint a host builds (or loads from
//! a file) before creating a [`Pool`](crate::pool::Pool).

mod pool_config;

pub use pool_config::PoolConfig;
