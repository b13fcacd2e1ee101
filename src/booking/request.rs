//! Typed booking request and boundary validation.
//!
//! A [`ReservationRequest`] carries exactly the fields a caller may
//! supply; everything derived (price, status, timestamps) is computed by
//! the create flow and never accepted from the outside.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::facility::FacilityId;

/// Syntactic email check: local part, one `@`, dotted domain.
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).unwrap_or_else(|_| unreachable!()))
}

/// A request to book a facility, as submitted by a caller.
///
/// Field-content validation ([`validate_content`](Self::validate_content))
/// is separate from the structural checks (facility existence, time range,
/// conflicts, capacity) the create flow performs against storage, so the
/// flow can apply them in its documented order.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use facilis::{FacilityId, ReservationRequest};
///
/// let request = ReservationRequest {
///     facility_id: FacilityId::new(1),
///     customer_name: "Ada Lovelace".to_string(),
///     customer_email: "ada@example.com".to_string(),
///     customer_phone: None,
///     event_type: "wedding".to_string(),
///     event_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     guests_count: 20,
///     special_requirements: None,
/// };
/// assert!(request.validate_content().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// The facility to book.
    pub facility_id: FacilityId,
    /// Name of the customer making the booking.
    pub customer_name: String,
    /// Contact email address.
    pub customer_email: String,
    /// Optional contact phone number.
    pub customer_phone: Option<String>,
    /// Free-text event description (wedding, conference, ...).
    pub event_type: String,
    /// The calendar date of the event.
    pub event_date: NaiveDate,
    /// Requested slot start (inclusive).
    pub start_time: NaiveTime,
    /// Requested slot end (exclusive), same day.
    pub end_time: NaiveTime,
    /// Number of guests attending.
    pub guests_count: u32,
    /// Optional free-text requirements.
    pub special_requirements: Option<String>,
}

impl ReservationRequest {
    /// Validates the request's field content.
    ///
    /// Checks, in order: `customer_name` non-blank, `event_type`
    /// non-blank, `guests_count` at least 1, `customer_email`
    /// syntactically valid. Structural checks against storage are the
    /// create flow's responsibility and run before this one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming the first offending field.
    pub fn validate_content(&self) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(Error::InvalidInput {
                field: "customer_name".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.event_type.trim().is_empty() {
            return Err(Error::InvalidInput {
                field: "event_type".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.guests_count == 0 {
            return Err(Error::InvalidInput {
                field: "guests_count".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !email_regex().is_match(self.customer_email.trim()) {
            return Err(Error::InvalidInput {
                field: "customer_email".to_string(),
                message: format!("not a valid email address: {}", self.customer_email),
            });
        }
        Ok(())
    }
}
