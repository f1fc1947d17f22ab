//! Explicit rounding direction for integer division.

/// Rounding direction for every division the engine performs.
///
/// The engine always rounds against the trader: outputs and redemptions
/// round [`Down`](Rounding::Down), required inputs round
/// [`Up`](Rounding::Up).
///
/// # Examples
///
/// ```
/// use amm_swap::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Towards positive infinity (ceiling).
    Up,
    /// Towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` for [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` for [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
