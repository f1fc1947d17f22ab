//! The boundary through which a pool moves real assets.
//!
//! The engine never holds balances of its own: it asks an [`AssetTransfer`]
//! implementation to pull deposits and swap inputs from callers and to push
//! redemptions and swap outputs back out.  Every mutating pool operation
//! hands the collaborator one batch of [`TransferLeg`]s through
//! [`AssetTransfer::settle`] and only commits its own bookkeeping once the
//! whole batch has succeeded.
//!
//! # Compensation
//!
//! Undoing a leg is not the opposite transfer.  Reversing a pull must hand
//! the funds back *and* restore the approval it consumed; reversing a push
//! must recover the funds without any approval from the recipient.  The
//! trait therefore carries two dedicated operations, [`refund_in`] and
//! [`reclaim_out`], that the default `settle` uses and nothing else should.
//!
//! When an undo fails the custody no longer matches the pool's books.  That
//! is reported as [`AmmError::CustodyInconsistent`], never as an ordinary
//! [`AmmError::TransferFailed`].
//!
//! # Re-entrancy
//!
//! The pool holds its write lock while `settle` runs.  Implementations must
//! not call back into the same pool from inside a transfer.
//!
//! [`refund_in`]: AssetTransfer::refund_in
//! [`reclaim_out`]: AssetTransfer::reclaim_out

use core::fmt;

use tracing::{error, warn};

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::AmmError;

/// One movement of one asset between an account and the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferLeg {
    /// Pull `amount` of `asset` from `from` into the pool.
    In {
        /// Asset moved.
        asset: AssetId,
        /// Account debited.
        from: AccountId,
        /// Quantity moved.
        amount: Amount,
    },
    /// Push `amount` of `asset` from the pool to `to`.
    Out {
        /// Asset moved.
        asset: AssetId,
        /// Account credited.
        to: AccountId,
        /// Quantity moved.
        amount: Amount,
    },
}

impl fmt::Display for TransferLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In {
                asset,
                from,
                amount,
            } => write!(f, "in {amount} of {asset} from {from}"),
            Self::Out { asset, to, amount } => write!(f, "out {amount} of {asset} to {to}"),
        }
    }
}

/// Moves assets between accounts and a pool's custody.
///
/// Implementations report every ordinary failure (insufficient balance,
/// missing allowance, frozen account, ...) as [`AmmError::TransferFailed`].
pub trait AssetTransfer {
    /// Pulls `amount` of `asset` from `from` into the pool's custody.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`] if the funds cannot be moved.
    fn transfer_in(&self, asset: AssetId, from: AccountId, amount: Amount) -> Result<(), AmmError>;

    /// Pushes `amount` of `asset` from the pool's custody to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`] if the funds cannot be moved.
    fn transfer_out(&self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), AmmError>;

    /// Undoes a completed [`transfer_in`](Self::transfer_in): returns
    /// `amount` of `asset` from custody to `to` and restores any approval
    /// the pull consumed.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`] if the refund cannot be made.
    fn refund_in(&self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), AmmError>;

    /// Undoes a completed [`transfer_out`](Self::transfer_out): moves
    /// `amount` of `asset` from `from` back into custody.  Requires no
    /// approval from `from`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`] if the funds cannot be recovered.
    fn reclaim_out(
        &self,
        asset: AssetId,
        from: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Executes one leg.
    ///
    /// # Errors
    ///
    /// Propagates the failure of the underlying transfer.
    fn execute(&self, leg: &TransferLeg) -> Result<(), AmmError> {
        match *leg {
            TransferLeg::In {
                asset,
                from,
                amount,
            } => self.transfer_in(asset, from, amount),
            TransferLeg::Out { asset, to, amount } => self.transfer_out(asset, to, amount),
        }
    }

    /// Undoes one previously executed leg.
    ///
    /// # Errors
    ///
    /// Propagates the failure of [`refund_in`](Self::refund_in) or
    /// [`reclaim_out`](Self::reclaim_out).
    fn compensate(&self, leg: &TransferLeg) -> Result<(), AmmError> {
        match *leg {
            TransferLeg::In {
                asset,
                from,
                amount,
            } => self.refund_in(asset, from, amount),
            TransferLeg::Out { asset, to, amount } => self.reclaim_out(asset, to, amount),
        }
    }

    /// Executes `legs` as one unit: either all of them apply or none do.
    ///
    /// The default runs the legs in order and, when one fails, compensates
    /// the legs already applied in reverse order before returning the
    /// original error.  Implementations that can validate a whole batch up
    /// front should override this with a check-then-apply version.
    ///
    /// # Errors
    ///
    /// - The failing leg's error, normally [`AmmError::TransferFailed`],
    ///   once every applied leg has been compensated.
    /// - [`AmmError::CustodyInconsistent`] if a compensation itself failed.
    fn settle(&self, legs: &[TransferLeg]) -> Result<(), AmmError> {
        for (done, leg) in legs.iter().enumerate() {
            if let Err(err) = self.execute(leg) {
                warn!(%leg, error = %err, "transfer leg failed; compensating");
                let mut stranded = Vec::new();
                for applied in legs[..done].iter().rev() {
                    if let Err(undo_err) = self.compensate(applied) {
                        error!(leg = %applied, error = %undo_err, "compensation failed");
                        stranded.push(applied.to_string());
                    }
                }
                if !stranded.is_empty() {
                    return Err(AmmError::CustodyInconsistent(format!(
                        "{err}; could not undo {}",
                        stranded.join(", ")
                    )));
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

impl<T: AssetTransfer + ?Sized> AssetTransfer for &T {
    fn transfer_in(&self, asset: AssetId, from: AccountId, amount: Amount) -> Result<(), AmmError> {
        (**self).transfer_in(asset, from, amount)
    }

    fn transfer_out(&self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), AmmError> {
        (**self).transfer_out(asset, to, amount)
    }

    fn refund_in(&self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), AmmError> {
        (**self).refund_in(asset, to, amount)
    }

    fn reclaim_out(
        &self,
        asset: AssetId,
        from: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        (**self).reclaim_out(asset, from, amount)
    }

    fn settle(&self, legs: &[TransferLeg]) -> Result<(), AmmError> {
        (**self).settle(legs)
    }
}

impl<T: AssetTransfer + ?Sized> AssetTransfer for std::sync::Arc<T> {
    fn transfer_in(&self, asset: AssetId, from: AccountId, amount: Amount) -> Result<(), AmmError> {
        (**self).transfer_in(asset, from, amount)
    }

    fn transfer_out(&self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), AmmError> {
        (**self).transfer_out(asset, to, amount)
    }

    fn refund_in(&self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), AmmError> {
        (**self).refund_in(asset, to, amount)
    }

    fn reclaim_out(
        &self,
        asset: AssetId,
        from: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        (**self).reclaim_out(asset, from, amount)
    }

    fn settle(&self, legs: &[TransferLeg]) -> Result<(), AmmError> {
        (**self).settle(legs)
    }
}
