//! Reservation types: identifiers, statuses, time slots, and the stored
//! reservation record.
//!
//! A reservation books one facility for a half-open time slot
//! `[start_time, end_time)` on a single calendar date. Two reservations
//! conflict when their slots overlap and both are in an active status.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::facility::FacilityId;
use crate::money::Money;

/// Storage-assigned reservation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a reservation.
///
/// Transitions are monotonic: a reservation starts `pending` and never
/// re-enters it. `cancelled` and `completed` are terminal.
///
/// # Examples
///
/// ```
/// use facilis::ReservationStatus;
///
/// assert!(ReservationStatus::Pending.can_transition_to(ReservationStatus::Confirmed));
/// assert!(!ReservationStatus::Cancelled.can_transition_to(ReservationStatus::Pending));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Awaiting manager approval. Counts against availability.
    Pending,
    /// Approved. Counts against availability.
    Confirmed,
    /// Withdrawn before or after approval. Terminal.
    Cancelled,
    /// The event took place. Terminal.
    Completed,
}

impl ReservationStatus {
    /// Returns the status's canonical lowercase name, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStatusError`] if the string names no status.
    pub fn parse(s: &str) -> Result<Self, InvalidStatusError> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            "completed" => Ok(ReservationStatus::Completed),
            _ => Err(InvalidStatusError {
                value: s.to_string(),
            }),
        }
    }

    /// Returns `true` if `next` is a legal transition from this status.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                ReservationStatus::Pending,
                ReservationStatus::Confirmed | ReservationStatus::Cancelled
            ) | (
                ReservationStatus::Confirmed,
                ReservationStatus::Completed | ReservationStatus::Cancelled
            )
        )
    }

    /// Returns `true` if no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::Completed
        )
    }

    /// Returns `true` if the status counts against availability.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for unrecognized status strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatusError {
    /// The unrecognized input.
    pub value: String,
}

impl fmt::Display for InvalidStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid reservation status: {}", self.value)
    }
}

impl std::error::Error for InvalidStatusError {}

/// A half-open time interval `[start, end)` within one day.
///
/// The end must fall strictly after the start, so zero-length and
/// overnight slots cannot be constructed. Bounds are minute-granular:
/// slot times are persisted as `HH:MM`, so sub-minute bounds are
/// rejected rather than silently truncated.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use facilis::TimeSlot;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
///
/// let morning = TimeSlot::new(nine, noon).unwrap();
/// assert_eq!(morning.to_string(), "09:00-12:00");
///
/// // Back-to-back slots do not overlap
/// let two = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
/// let afternoon = TimeSlot::new(noon, two).unwrap();
/// assert!(!morning.overlaps(&afternoon));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    /// Creates a slot from its bounds.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSlotError`] unless `end` is strictly after
    /// `start` and both bounds fall on a whole minute.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, InvalidSlotError> {
        if start.second() != 0
            || start.nanosecond() != 0
            || end.second() != 0
            || end.nanosecond() != 0
        {
            return Err(InvalidSlotError {
                start,
                end,
                reason: "bounds must fall on a whole minute".to_string(),
            });
        }
        if end > start {
            Ok(Self { start, end })
        } else {
            Err(InvalidSlotError {
                start,
                end,
                reason: "end must be strictly after start".to_string(),
            })
        }
    }

    /// Returns the inclusive start of the slot.
    #[must_use]
    pub const fn start(self) -> NaiveTime {
        self.start
    }

    /// Returns the exclusive end of the slot.
    #[must_use]
    pub const fn end(self) -> NaiveTime {
        self.end
    }

    /// Returns `true` if two slots share any instant.
    ///
    /// Uses the half-open test `a.start < b.end && a.end > b.start`, so a
    /// slot ending exactly when another begins does not overlap it.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns the slot length in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_minutes()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Error type for invalid slot bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSlotError {
    /// The requested start time.
    pub start: NaiveTime,
    /// The requested end time.
    pub end: NaiveTime,
    /// The reason the bounds are invalid.
    pub reason: String,
}

impl fmt::Display for InvalidSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid time slot {}-{}: {}",
            self.start, self.end, self.reason
        )
    }
}

impl std::error::Error for InvalidSlotError {}

/// Error type for field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for the given field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A stored reservation, as returned by booking operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Storage-assigned identifier.
    pub id: ReservationId,
    /// The booked facility.
    pub facility_id: FacilityId,
    /// Name of the customer holding the booking.
    pub customer_name: String,
    /// Contact email, syntactically validated at creation.
    pub customer_email: String,
    /// Optional contact phone number.
    pub customer_phone: Option<String>,
    /// Free-text event description (wedding, conference, ...).
    pub event_type: String,
    /// The calendar date of the event.
    pub event_date: NaiveDate,
    /// The booked time slot on `event_date`.
    pub slot: TimeSlot,
    /// Number of guests attending.
    pub guests_count: u32,
    /// Optional free-text requirements captured at booking time.
    pub special_requirements: Option<String>,
    /// Derived price, fixed at creation time.
    pub total_amount: Money,
    /// Current lifecycle status.
    pub status: ReservationStatus,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation last changed status.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Returns `true` if the reservation counts against availability.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
