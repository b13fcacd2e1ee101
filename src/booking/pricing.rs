//! Reservation pricing.
//!
//! A reservation is billed per started hour with a one-hour minimum:
//! `total = max(1, ceil(duration / 1h)) * hourly_rate`. The total is
//! computed once at creation and never recomputed if the facility's rate
//! later changes.

use crate::error::{Error, Result};
use crate::money::Money;
use crate::reservation::TimeSlot;

/// Returns the number of billable hours for a slot.
///
/// Partial hours round up and every booking is billed at least one hour.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use facilis::TimeSlot;
/// use facilis::booking::billable_hours;
///
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// assert_eq!(billable_hours(&TimeSlot::new(t(9, 0), t(12, 0)).unwrap()), 3);
/// assert_eq!(billable_hours(&TimeSlot::new(t(9, 0), t(10, 30)).unwrap()), 2);
/// assert_eq!(billable_hours(&TimeSlot::new(t(9, 0), t(9, 15)).unwrap()), 1);
/// ```
#[must_use]
pub fn billable_hours(slot: &TimeSlot) -> i64 {
    // duration_minutes is at least 1 for any constructible slot
    ((slot.duration_minutes() + 59) / 60).max(1)
}

/// Computes the total amount for a slot at the given hourly rate.
///
/// # Errors
///
/// Returns [`Error::InvalidAmount`] if the multiplication overflows.
pub fn quote(slot: &TimeSlot, hourly_rate: Money) -> Result<Money> {
    let hours = billable_hours(slot);
    hourly_rate
        .checked_mul(hours)
        .ok_or_else(|| Error::InvalidAmount {
            value: hourly_rate.minor_units(),
            reason: format!("total for {hours} hours overflows"),
        })
}
