//! Error types for the facilis library.

use chrono::NaiveTime;
use thiserror::Error;

use crate::auth::Role;
use crate::reservation::ReservationStatus;

/// Convenient result type used throughout the library.
///
/// # Examples
///
/// ```
/// use facilis::{Error, Result};
///
/// fn lookup(found: bool) -> Result<u32> {
///     if found {
///         Ok(42)
///     } else {
///         Err(Error::NotFound {
///             resource: "reservation 42".to_string(),
///         })
///     }
/// }
///
/// assert!(lookup(true).is_ok());
/// assert!(lookup(false).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in facilis operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced resource does not exist or is not usable.
    #[error("not found: {resource}")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// A reservation's slot bounds are not a valid interval.
    #[error("invalid time range {start}-{end}: {reason}")]
    InvalidRange {
        /// The requested start time.
        start: NaiveTime,
        /// The requested end time.
        end: NaiveTime,
        /// The reason the bounds are invalid.
        reason: String,
    },

    /// The requested slot intersects an active reservation.
    #[error("time conflict: {details}")]
    TimeConflict {
        /// Details about the conflicting reservation.
        details: String,
    },

    /// The requested guest count exceeds the facility capacity.
    #[error("capacity exceeded: requested {requested} guests, facility holds {capacity}")]
    CapacityExceeded {
        /// The number of guests requested.
        requested: u32,
        /// The facility's maximum capacity.
        capacity: u32,
    },

    /// Request content failed validation.
    #[error("invalid input for '{field}': {message}")]
    InvalidInput {
        /// The field that failed validation.
        field: String,
        /// Description of the validation failure.
        message: String,
    },

    /// The requested status change is not a legal transition.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// The reservation's current status.
        from: ReservationStatus,
        /// The requested new status.
        to: ReservationStatus,
    },

    /// The caller's role does not satisfy the operation's requirement.
    #[error("permission denied: requires {required} or above, caller is {held}")]
    PermissionDenied {
        /// The minimum role the operation requires.
        required: Role,
        /// The role the caller holds.
        held: Role,
    },

    /// A currency amount was rejected or overflowed.
    #[error("invalid amount {value}: {reason}")]
    InvalidAmount {
        /// The offending amount in minor units.
        value: i64,
        /// The reason the amount is invalid.
        reason: String,
    },

    /// Database error from the underlying storage layer.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A stored JSON value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The database schema version is not supported by this build.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The schema version this build expects.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

// Additional conversions for better ergonomics
impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Error::InvalidInput {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<crate::reservation::InvalidSlotError> for Error {
    fn from(err: crate::reservation::InvalidSlotError) -> Self {
        Error::InvalidRange {
            start: err.start,
            end: err.end,
            reason: err.reason,
        }
    }
}

impl From<crate::money::InvalidMoneyError> for Error {
    fn from(err: crate::money::InvalidMoneyError) -> Self {
        Error::InvalidAmount {
            value: err.value,
            reason: err.reason,
        }
    }
}

impl Error {
    /// Returns `true` if this error indicates a missing resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use facilis::Error;
    ///
    /// let err = Error::NotFound {
    ///     resource: "facility 9".to_string(),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns `true` if this error indicates a booking-time conflict.
    ///
    /// # Examples
    ///
    /// ```
    /// use facilis::Error;
    ///
    /// let err = Error::TimeConflict {
    ///     details: "reservation 3 occupies 09:00-12:00".to_string(),
    /// };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Error::TimeConflict { .. })
    }

    /// Returns `true` if this error was caused by caller input.
    ///
    /// Covers content validation, range, and capacity failures, which a
    /// caller can repair by changing the request.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput { .. } | Error::InvalidRange { .. } | Error::CapacityExceeded { .. }
        )
    }
}
