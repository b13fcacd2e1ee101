//! Currency amounts as integer minor units.
//!
//! All monetary values in the library (hourly rates, reservation totals)
//! are non-negative amounts of a single implicit currency, held as whole
//! cents so arithmetic is exact.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-negative currency amount in minor units (cents).
///
/// # Examples
///
/// ```
/// use facilis::Money;
///
/// // 1000.00 expressed in cents
/// let rate = Money::try_from(100_000).unwrap();
/// assert_eq!(rate.minor_units(), 100_000);
/// assert_eq!(rate.to_string(), "1000.00");
///
/// // Negative amounts are rejected
/// assert!(Money::try_from(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Money = Money(0);

    /// Creates an amount from whole major units (e.g. `150` -> `150.00`).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMoneyError`] if `major` is negative or the amount
    /// overflows when scaled to minor units.
    ///
    /// # Examples
    ///
    /// ```
    /// use facilis::Money;
    ///
    /// let rate = Money::from_major(1000).unwrap();
    /// assert_eq!(rate.minor_units(), 100_000);
    /// ```
    pub fn from_major(major: i64) -> Result<Self, InvalidMoneyError> {
        let minor = major.checked_mul(100).ok_or(InvalidMoneyError {
            value: major,
            reason: "overflows when scaled to minor units".to_string(),
        })?;
        Self::try_from(minor)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Multiplies the amount by a non-negative factor, returning `None`
    /// on overflow.
    #[must_use]
    pub const fn checked_mul(self, factor: i64) -> Option<Self> {
        match self.0.checked_mul(factor) {
            Some(v) if v >= 0 => Some(Self(v)),
            _ => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl From<Money> for i64 {
    fn from(amount: Money) -> Self {
        amount.0
    }
}

impl TryFrom<i64> for Money {
    type Error = InvalidMoneyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            Err(InvalidMoneyError {
                value,
                reason: "amounts cannot be negative".to_string(),
            })
        } else {
            Ok(Self(value))
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Error type for invalid currency amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMoneyError {
    /// The invalid amount in minor units.
    pub value: i64,
    /// The reason the amount is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid amount {}: {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidMoneyError {}
