//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the facilis reservation system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the facilities table.
///
/// Facilities are soft-disabled through the status column rather than
/// deleted, so historical reservations always resolve their facility.
/// Amenities are stored as a JSON array of labels.
pub const CREATE_FACILITIES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS facilities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        kind TEXT NOT NULL,
        capacity INTEGER NOT NULL,
        hourly_rate_cents INTEGER NOT NULL,
        location TEXT,
        description TEXT,
        amenities TEXT NOT NULL DEFAULT '[]',
        status TEXT NOT NULL DEFAULT 'active',
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// `event_date` is stored as `YYYY-MM-DD` and the slot bounds as
/// zero-padded `HH:MM`, so lexicographic comparison in SQL matches
/// chronological order. Amounts are whole cents; timestamps are Unix
/// seconds.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        facility_id INTEGER NOT NULL REFERENCES facilities(id),
        customer_name TEXT NOT NULL,
        customer_email TEXT NOT NULL,
        customer_phone TEXT,
        event_type TEXT NOT NULL,
        event_date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        guests_count INTEGER NOT NULL,
        special_requirements TEXT,
        total_amount_cents INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )";

/// SQL statement to create an index on (`facility_id`, `event_date`).
///
/// This index speeds up the conflict check and the availability
/// projection, which always scope to one facility and date.
pub const CREATE_FACILITY_DATE_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_facility_date
    ON reservations(facility_id, event_date)";

/// SQL statement to create an index on the reservation status column.
///
/// This index speeds up pending-approval counts and status-filtered
/// reports.
pub const CREATE_RESERVATION_STATUS_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_status
    ON reservations(status)";

/// SQL statement to create an index on the facility status column.
pub const CREATE_FACILITY_STATUS_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_facilities_status
    ON facilities(status)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a facility.
pub const INSERT_FACILITY: &str = r"
    INSERT INTO facilities
    (name, kind, capacity, hourly_rate_cents, location, description, amenities, status, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

/// SQL statement to insert a reservation.
///
/// Runs inside the same immediate transaction as the conflict check.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (facility_id, customer_name, customer_email, customer_phone, event_type,
     event_date, start_time, end_time, guests_count, special_requirements,
     total_amount_cents, status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";
