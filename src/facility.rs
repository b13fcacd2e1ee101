//! Facility types: identifiers, kinds, statuses, and registration requests.
//!
//! Facilities are never hard-deleted; disabling one sets its status to
//! `inactive`, which hides it from booking without touching history.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::reservation::ValidationError;

/// Storage-assigned facility identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(i64);

impl FacilityId {
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

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of space a facility offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityKind {
    /// Banquet hall.
    Banquet,
    /// Meeting room.
    Meeting,
    /// Outdoor space.
    Outdoor,
    /// Conference room.
    Conference,
    /// Private dining room.
    Dining,
    /// Lounge area.
    Lounge,
    /// Anything the other kinds do not cover.
    Other,
}

impl FacilityKind {
    /// Returns the kind's canonical lowercase name, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FacilityKind::Banquet => "banquet",
            FacilityKind::Meeting => "meeting",
            FacilityKind::Outdoor => "outdoor",
            FacilityKind::Conference => "conference",
            FacilityKind::Dining => "dining",
            FacilityKind::Lounge => "lounge",
            FacilityKind::Other => "other",
        }
    }

    /// Parses a kind from its string representation.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the string names no kind.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_lowercase().as_str() {
            "banquet" => Ok(FacilityKind::Banquet),
            "meeting" => Ok(FacilityKind::Meeting),
            "outdoor" => Ok(FacilityKind::Outdoor),
            "conference" => Ok(FacilityKind::Conference),
            "dining" => Ok(FacilityKind::Dining),
            "lounge" => Ok(FacilityKind::Lounge),
            "other" => Ok(FacilityKind::Other),
            _ => Err(ValidationError::new(
                "kind",
                format!("unknown facility kind: {s}"),
            )),
        }
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a facility accepts new bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityStatus {
    /// Bookable.
    Active,
    /// Soft-disabled; existing reservations remain on record.
    Inactive,
}

impl FacilityStatus {
    /// Returns the status's canonical lowercase name, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FacilityStatus::Active => "active",
            FacilityStatus::Inactive => "inactive",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the string names no status.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_lowercase().as_str() {
            "active" => Ok(FacilityStatus::Active),
            "inactive" => Ok(FacilityStatus::Inactive),
            _ => Err(ValidationError::new(
                "status",
                format!("unknown facility status: {s}"),
            )),
        }
    }
}

impl fmt::Display for FacilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored facility, as returned by administration and lookup operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Storage-assigned identifier.
    pub id: FacilityId,
    /// Display name, unique in practice but not enforced.
    pub name: String,
    /// The kind of space.
    pub kind: FacilityKind,
    /// Maximum number of guests.
    pub capacity: u32,
    /// Price per started hour.
    pub hourly_rate: Money,
    /// Optional location note (floor, wing, address).
    pub location: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Amenity labels, persisted as a JSON array.
    pub amenities: Vec<String>,
    /// Whether the facility accepts new bookings.
    pub status: FacilityStatus,
    /// When the facility was registered.
    pub created_at: DateTime<Utc>,
}

impl Facility {
    /// Returns `true` if the facility accepts new bookings.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == FacilityStatus::Active
    }
}

/// A validated request to register a facility.
///
/// # Examples
///
/// ```
/// use facilis::{FacilityKind, Money, NewFacility};
///
/// let request = NewFacility::new(
///     "Grand Ballroom",
///     FacilityKind::Banquet,
///     200,
///     Money::from_major(500).unwrap(),
/// )
/// .unwrap()
/// .with_location("2nd floor, east wing")
/// .with_amenities(vec!["stage".to_string(), "sound system".to_string()]);
///
/// assert_eq!(request.name(), "Grand Ballroom");
/// assert_eq!(request.capacity(), 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewFacility {
    name: String,
    kind: FacilityKind,
    capacity: u32,
    hourly_rate: Money,
    location: Option<String>,
    description: Option<String>,
    amenities: Vec<String>,
}

impl NewFacility {
    /// Creates a registration request from the required fields.
    ///
    /// The name is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the name is empty after trimming
    /// or the capacity is zero.
    pub fn new(
        name: impl Into<String>,
        kind: FacilityKind,
        capacity: u32,
        hourly_rate: Money,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::new("name", "cannot be empty"));
        }
        if capacity == 0 {
            return Err(ValidationError::new("capacity", "must be at least 1"));
        }
        Ok(Self {
            name,
            kind,
            capacity,
            hourly_rate,
            location: None,
            description: None,
            amenities: Vec::new(),
        })
    }

    /// Sets the location note. Blank input clears it.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into().trim().to_string();
        self.location = if location.is_empty() {
            None
        } else {
            Some(location)
        };
        self
    }

    /// Sets the description. Blank input clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into().trim().to_string();
        self.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// Sets the amenity labels, trimming each and dropping blanks.
    #[must_use]
    pub fn with_amenities(mut self, amenities: Vec<String>) -> Self {
        self.amenities = amenities
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        self
    }

    /// Returns the facility name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the facility kind.
    #[must_use]
    pub const fn kind(&self) -> FacilityKind {
        self.kind
    }

    /// Returns the maximum guest count.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the price per started hour.
    #[must_use]
    pub const fn hourly_rate(&self) -> Money {
        self.hourly_rate
    }

    /// Returns the location note, if set.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the amenity labels.
    #[must_use]
    pub fn amenities(&self) -> &[String] {
        &self.amenities
    }
}
