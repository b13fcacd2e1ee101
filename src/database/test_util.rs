//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple database
//! and booking test modules.

use chrono::{NaiveDate, NaiveTime, Utc};
use tempfile::tempdir;

use crate::booking::ReservationRequest;
use crate::database::{Database, DatabaseConfig};
use crate::facility::{FacilityId, FacilityKind, NewFacility};
use crate::money::Money;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Inserts an active meeting facility and returns its id.
///
/// The hourly rate is given in whole major units.
///
/// # Panics
///
/// Panics if the facility cannot be created. This is acceptable in test
/// code where we want to fail fast.
#[must_use]
pub fn seed_facility(db: &Database, name: &str, capacity: u32, rate_major: i64) -> FacilityId {
    let request = NewFacility::new(
        name,
        FacilityKind::Meeting,
        capacity,
        Money::from_major(rate_major).unwrap(),
    )
    .unwrap();
    Database::insert_facility(db.connection(), &request, Utc::now()).unwrap()
}

/// Builds a valid reservation request for the given facility and slot.
///
/// Uses placeholder customer details that pass content validation;
/// tests override individual fields as needed.
///
/// # Panics
///
/// Panics if the date or time strings do not parse. This is acceptable
/// in test code where we want to fail fast.
#[must_use]
pub fn sample_request(
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
        event_date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
        start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
        end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        guests_count: guests,
        special_requirements: None,
    }
}
