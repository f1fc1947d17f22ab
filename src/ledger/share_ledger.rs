//! Ownership-share bookkeeping.

use std::collections::HashMap;

use crate::domain::{AccountId, Shares};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// A validated, not-yet-applied change to one owner's balance.
///
/// Produced by [`ShareLedger::plan_mint`] / [`ShareLedger::plan_burn`] and
/// consumed by [`ShareLedger::apply`], which cannot fail.  Splitting the two
/// lets the pool check every arithmetic step before it moves any asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerUpdate {
    owner: AccountId,
    balance: Shares,
    total: Shares,
}

impl LedgerUpdate {
    /// The owner whose balance changes.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// The owner's balance after the update.
    #[must_use]
    pub const fn balance(&self) -> Shares {
        self.balance
    }

    /// Total shares outstanding after the update.
    #[must_use]
    pub const fn total(&self) -> Shares {
        self.total
    }
}

/// Balances of pool shares per owner.
///
/// Zero balances are never stored, so [`ShareLedger::len`] counts actual
/// holders and the sum of all entries always equals
/// [`ShareLedger::total`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareLedger {
    balances: HashMap<AccountId, Shares>,
    total: Shares,
}

impl ShareLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares held by `owner` (zero if absent).
    #[must_use]
    pub fn balance_of(&self, owner: &AccountId) -> Shares {
        self.balances.get(owner).copied().unwrap_or(Shares::ZERO)
    }

    /// Total shares outstanding.
    #[must_use]
    pub const fn total(&self) -> Shares {
        self.total
    }

    /// Number of owners with a non-zero balance.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns `true` if no shares are outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Iterates over `(owner, balance)` for every holder, in no fixed order.
    pub fn holders(&self) -> impl Iterator<Item = (&AccountId, &Shares)> {
        self.balances.iter()
    }

    /// Credits `amount` shares to `owner`, returning the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the total would overflow.
    pub fn mint(&mut self, owner: AccountId, amount: Shares) -> Result<Shares, AmmError> {
        let update = self.plan_mint(owner, amount)?;
        self.apply(update);
        Ok(update.balance)
    }

    /// Debits `amount` shares from `owner`, returning the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `amount` exceeds the
    /// owner's balance.
    pub fn burn(&mut self, owner: AccountId, amount: Shares) -> Result<Shares, AmmError> {
        let update = self.plan_burn(owner, amount)?;
        self.apply(update);
        Ok(update.balance)
    }

    /// Validates a mint without applying it.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ShareLedger::mint`].
    pub fn plan_mint(&self, owner: AccountId, amount: Shares) -> Result<LedgerUpdate, AmmError> {
        // balance <= total, so a total that fits implies a balance that fits.
        let total = self.total.safe_add(&amount)?;
        let balance = self.balance_of(&owner).safe_add(&amount)?;
        Ok(LedgerUpdate {
            owner,
            balance,
            total,
        })
    }

    /// Validates a burn without applying it.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ShareLedger::burn`].
    pub fn plan_burn(&self, owner: AccountId, amount: Shares) -> Result<LedgerUpdate, AmmError> {
        let available = self.balance_of(&owner);
        let Some(balance) = available.checked_sub(&amount) else {
            return Err(AmmError::InsufficientShares {
                requested: amount,
                available,
            });
        };
        let total = self.total.safe_sub(&amount)?;
        Ok(LedgerUpdate {
            owner,
            balance,
            total,
        })
    }

    /// Applies a planned update.
    ///
    /// The update must have been planned against this ledger's current
    /// state; applying a stale update would break the sum invariant.
    pub fn apply(&mut self, update: LedgerUpdate) {
        if update.balance.is_zero() {
            self.balances.remove(&update.owner);
        } else {
            self.balances.insert(update.owner, update.balance);
        }
        self.total = update.total;
    }
}
