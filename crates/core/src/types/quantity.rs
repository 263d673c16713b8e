//! Positive line-item quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Zero or negative quantity.
    #[error("quantity must be at least 1 (got {0})")]
    NotPositive(i64),
    /// Larger than a line item can hold.
    #[error("quantity must be at most {max} (got {got})")]
    TooLarge {
        /// Maximum allowed quantity.
        max: u32,
        /// Requested quantity.
        got: i64,
    },
}

/// A quantity of one product, always at least 1.
///
/// ## Examples
///
/// ```
/// use gridshop_core::Quantity;
///
/// assert!(Quantity::new(3).is_ok());
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::try_from(-2_i64).is_err());
///
/// // The selector floor: decrementing 1 stays at 1.
/// assert_eq!(Quantity::ONE.decrement().get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit; the default for a fresh quantity selector.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity from a `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotPositive`] for zero.
    pub fn new(value: u32) -> Result<Self, QuantityError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(QuantityError::NotPositive(0))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add two quantities, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.get()).map(Self)
    }

    /// One more, saturating at `u32::MAX`.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One less, never going below 1.
    #[must_use]
    pub fn decrement(self) -> Self {
        NonZeroU32::new(self.get() - 1).map_or(Self::ONE, Self)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 1 {
            return Err(QuantityError::NotPositive(value));
        }
        let value = u32::try_from(value).map_err(|_| QuantityError::TooLarge {
            max: u32::MAX,
            got: value,
        })?;
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}
