//! Common test utilities for integration tests.

use chrono::{NaiveDate, NaiveTime};
use tempfile::TempDir;

use facilis::database::{Database, DatabaseConfig};
use facilis::{
    add_facility, AuthContext, Facility, FacilityId, FacilityKind, Money, NewFacility,
    ReservationRequest, Role,
};

/// Opens a fresh database in a temporary directory.
///
/// The `TempDir` must be kept alive for the database's lifetime.
#[allow(dead_code)]
pub fn open_temp_database() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let db = Database::open(DatabaseConfig::new(dir.path().join("test.db")))
        .expect("should open database");
    (dir, db)
}

#[allow(dead_code)]
pub fn employee() -> AuthContext {
    AuthContext::new(1, Role::Employee)
}

#[allow(dead_code)]
pub fn manager() -> AuthContext {
    AuthContext::new(2, Role::Manager)
}

#[allow(dead_code)]
pub fn admin() -> AuthContext {
    AuthContext::new(3, Role::Admin)
}

/// Registers an active facility through the public admin operation.
#[allow(dead_code)]
pub fn seed_facility(db: &Database, name: &str, capacity: u32, rate_major: i64) -> Facility {
    let request = NewFacility::new(
        name,
        FacilityKind::Banquet,
        capacity,
        Money::from_major(rate_major).expect("valid rate"),
    )
    .expect("valid facility");
    add_facility(db, &admin(), &request).expect("should register facility")
}

#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date literal")
}

#[allow(dead_code)]
pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid time literal")
}

/// Builds a well-formed booking request for the given slot.
#[allow(dead_code)]
pub fn request(
    facility_id: FacilityId,
    day: &str,
    start: &str,
    end: &str,
    guests: u32,
) -> ReservationRequest {
    ReservationRequest {
        facility_id,
        customer_name: "Ada Lovelace".to_string(),
        customer_email: "ada@example.com".to_string(),
        customer_phone: None,
        event_type: "conference".to_string(),
        event_date: date(day),
        start_time: time(start),
        end_time: time(end),
        guests_count: guests,
        special_requirements: None,
    }
}
