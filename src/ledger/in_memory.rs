//! In-memory balance and allowance ledger implementing [`AssetTransfer`].
//!
//! Models fungible assets the way token contracts do: every account has a
//! balance per asset, and the pool may only pull funds an owner has
//! approved beforehand.  The pool's own holdings live in a dedicated
//! custody account.  Useful for hosts that keep balances in process and
//! for exercising the engine end to end.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::trace;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::{AssetTransfer, TransferLeg};

type Key = (AssetId, AccountId);

#[derive(Debug, Default)]
struct Books {
    balances: HashMap<Key, Amount>,
    allowances: HashMap<Key, Amount>,
}

impl Books {
    fn balance(&self, key: &Key) -> Amount {
        self.balances.get(key).copied().unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, key: &Key) -> Amount {
        self.allowances.get(key).copied().unwrap_or(Amount::ZERO)
    }
}

/// Pending writes over borrowed books.  Only keys a batch touches are
/// copied; nothing reaches the books until [`Staged::publish`].
struct Staged<'a> {
    books: &'a Books,
    custodian: AccountId,
    balances: HashMap<Key, Amount>,
    allowances: HashMap<Key, Amount>,
}

impl<'a> Staged<'a> {
    fn new(books: &'a Books, custodian: AccountId) -> Self {
        Self {
            books,
            custodian,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    fn balance(&self, key: &Key) -> Amount {
        self.balances
            .get(key)
            .copied()
            .unwrap_or_else(|| self.books.balance(key))
    }

    fn allowance(&self, key: &Key) -> Amount {
        self.allowances
            .get(key)
            .copied()
            .unwrap_or_else(|| self.books.allowance(key))
    }

    fn debit(&mut self, key: Key, amount: Amount) -> Result<(), AmmError> {
        let remaining = self
            .balance(&key)
            .checked_sub(&amount)
            .ok_or_else(|| AmmError::TransferFailed(format!("insufficient balance of {}", key.0)))?;
        self.balances.insert(key, remaining);
        Ok(())
    }

    fn credit(&mut self, key: Key, amount: Amount) -> Result<(), AmmError> {
        let next = self
            .balance(&key)
            .checked_add(&amount)
            .ok_or_else(|| AmmError::TransferFailed(format!("balance overflow of {}", key.0)))?;
        self.balances.insert(key, next);
        Ok(())
    }

    fn spend_allowance(&mut self, key: Key, amount: Amount) -> Result<(), AmmError> {
        let remaining = self.allowance(&key).checked_sub(&amount).ok_or_else(|| {
            AmmError::TransferFailed(format!("insufficient allowance of {}", key.0))
        })?;
        self.allowances.insert(key, remaining);
        Ok(())
    }

    fn restore_allowance(&mut self, key: Key, amount: Amount) {
        let restored = self
            .allowance(&key)
            .checked_add(&amount)
            .unwrap_or(Amount::MAX);
        self.allowances.insert(key, restored);
    }

    fn pull(&mut self, asset: AssetId, from: AccountId, amount: Amount) -> Result<(), AmmError> {
        self.spend_allowance((asset, from), amount)?;
        self.debit((asset, from), amount)?;
        self.credit((asset, self.custodian), amount)
    }

    fn push(&mut self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), AmmError> {
        self.debit((asset, self.custodian), amount)?;
        self.credit((asset, to), amount)
    }

    fn refund(&mut self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), AmmError> {
        self.push(asset, to, amount)?;
        self.restore_allowance((asset, to), amount);
        Ok(())
    }

    fn reclaim(&mut self, asset: AssetId, from: AccountId, amount: Amount) -> Result<(), AmmError> {
        self.debit((asset, from), amount)?;
        self.credit((asset, self.custodian), amount)
    }

    fn apply(&mut self, leg: &TransferLeg) -> Result<(), AmmError> {
        match *leg {
            TransferLeg::In {
                asset,
                from,
                amount,
            } => self.pull(asset, from, amount),
            TransferLeg::Out { asset, to, amount } => self.push(asset, to, amount),
        }
    }

    fn into_writes(self) -> (HashMap<Key, Amount>, HashMap<Key, Amount>) {
        (self.balances, self.allowances)
    }
}

impl Books {
    /// Writes staged values back.
    fn publish(&mut self, writes: (HashMap<Key, Amount>, HashMap<Key, Amount>)) {
        let (balances, allowances) = writes;
        self.balances.extend(balances);
        self.allowances.extend(allowances);
    }
}

/// Thread-safe in-memory asset ledger with a single custody account.
///
/// # Examples
///
/// ```
/// use amm_swap::domain::{AccountId, Amount, AssetId};
/// use amm_swap::ledger::InMemoryAssets;
/// use amm_swap::traits::AssetTransfer;
///
/// let pool = AccountId::from_bytes([0xee; 32]);
/// let user = AccountId::from_bytes([1u8; 32]);
/// let usdc = AssetId::from_bytes([7u8; 32]);
///
/// let assets = InMemoryAssets::new(pool);
/// assets.mint(usdc, user, Amount::new(500)).expect("fits");
/// assets.approve(usdc, user, Amount::new(200));
///
/// assets.transfer_in(usdc, user, Amount::new(200)).expect("approved");
/// assert_eq!(assets.balance_of(usdc, pool), Amount::new(200));
/// assert!(assets.transfer_in(usdc, user, Amount::new(1)).is_err());
/// ```
#[derive(Debug)]
pub struct InMemoryAssets {
    custodian: AccountId,
    books: Mutex<Books>,
}

impl InMemoryAssets {
    /// Creates an empty ledger whose pool holdings live under `custodian`.
    #[must_use]
    pub fn new(custodian: AccountId) -> Self {
        Self {
            custodian,
            books: Mutex::new(Books::default()),
        }
    }

    /// The account holding the pool's assets.
    #[must_use]
    pub const fn custodian(&self) -> AccountId {
        self.custodian
    }

    /// Creates `amount` of `asset` out of thin air for `account`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would overflow.
    pub fn mint(
        &self,
        asset: AssetId,
        account: AccountId,
        amount: Amount,
    ) -> Result<Amount, AmmError> {
        let mut books = self.books.lock();
        let next = books.balance(&(asset, account)).safe_add(&amount)?;
        books.balances.insert((asset, account), next);
        Ok(next)
    }

    /// Sets how much of `asset` the pool may pull from `owner`.
    pub fn approve(&self, asset: AssetId, owner: AccountId, amount: Amount) {
        self.books.lock().allowances.insert((asset, owner), amount);
    }

    /// Balance of `asset` held by `account`.
    #[must_use]
    pub fn balance_of(&self, asset: AssetId, account: AccountId) -> Amount {
        self.books.lock().balance(&(asset, account))
    }

    /// Remaining allowance `owner` granted the pool for `asset`.
    #[must_use]
    pub fn allowance(&self, asset: AssetId, owner: AccountId) -> Amount {
        self.books.lock().allowance(&(asset, owner))
    }
}

impl InMemoryAssets {
    /// Runs `stage` against an overlay of the books and publishes its writes
    /// only if it succeeded.
    fn staged<F>(&self, stage: F) -> Result<(), AmmError>
    where
        F: FnOnce(&mut Staged<'_>) -> Result<(), AmmError>,
    {
        let mut books = self.books.lock();
        let writes = {
            let mut staged = Staged::new(&books, self.custodian);
            stage(&mut staged)?;
            staged.into_writes()
        };
        books.publish(writes);
        Ok(())
    }
}

impl AssetTransfer for InMemoryAssets {
    fn transfer_in(&self, asset: AssetId, from: AccountId, amount: Amount) -> Result<(), AmmError> {
        self.staged(|staged| staged.pull(asset, from, amount))
    }

    fn transfer_out(&self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), AmmError> {
        self.staged(|staged| staged.push(asset, to, amount))
    }

    fn refund_in(&self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), AmmError> {
        self.staged(|staged| staged.refund(asset, to, amount))
    }

    fn reclaim_out(
        &self,
        asset: AssetId,
        from: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.staged(|staged| staged.reclaim(asset, from, amount))
    }

    /// Stages the whole batch over the touched keys and publishes it only if
    /// every leg succeeded.
    fn settle(&self, legs: &[TransferLeg]) -> Result<(), AmmError> {
        self.staged(|staged| {
            for leg in legs {
                staged.apply(leg)?;
                trace!(%leg, "leg staged");
            }
            Ok(())
        })
    }
}
