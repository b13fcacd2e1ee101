//! Database layer for persistent storage of facilities and reservations.
//!
//! This module provides a `SQLite`-based storage layer for the booking
//! engine, including connection management, schema versioning, and the
//! row-level reads and writes the operation layer composes into
//! transactions.
//!
//! # Examples
//!
//! ```no_run
//! use facilis::database::{Database, DatabaseConfig};
//! use facilis::{FacilityKind, Money, NewFacility};
//! use chrono::Utc;
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/facilis.db");
//! let db = Database::open(config).unwrap();
//!
//! // Register a facility
//! let request = NewFacility::new(
//!     "Grand Ballroom",
//!     FacilityKind::Banquet,
//!     200,
//!     Money::from_major(500).unwrap(),
//! )
//! .unwrap();
//! let id = Database::insert_facility(db.connection(), &request, Utc::now()).unwrap();
//!
//! // List active facilities
//! let facilities = Database::list_active_facilities(db.connection()).unwrap();
//! for facility in facilities {
//!     println!("{}: {}", facility.id, facility.name);
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;

#[cfg(test)]
pub mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
