//! Bookkeeping components: pool shares and a reference asset ledger.

mod in_memory;
mod share_ledger;

pub use in_memory::InMemoryAssets;
pub use share_ledger::{LedgerUpdate, ShareLedger};
