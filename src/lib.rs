#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # facilis
//!
//! A back-office library for facility reservations: conflict-checked
//! booking, per-hour pricing, lifecycle management, reporting, and
//! deterministic contract risk analysis, backed by embedded `SQLite`.
//!
//! ## Core Types
//!
//! - [`Facility`] and [`NewFacility`]: bookable spaces and their registration
//! - [`Reservation`], [`ReservationRequest`], and [`TimeSlot`]: bookings
//!   over half-open time intervals
//! - [`AuthContext`] and [`Role`]: the caller identity every operation checks
//! - [`Money`]: amounts in minor currency units
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```no_run
//! use chrono::{NaiveDate, NaiveTime};
//! use facilis::database::{Database, DatabaseConfig};
//! use facilis::{
//!     add_facility, create_reservation, AuthContext, FacilityKind, Money, NewFacility,
//!     ReservationRequest, Role,
//! };
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/facilis.db")).unwrap();
//!
//! let admin = AuthContext::new(1, Role::Admin);
//! let hall = NewFacility::new("Main Hall", FacilityKind::Banquet, 120, Money::from_major(250).unwrap()).unwrap();
//! let facility = add_facility(&db, &admin, &hall).unwrap();
//!
//! let clerk = AuthContext::new(2, Role::Employee);
//! let request = ReservationRequest {
//!     facility_id: facility.id,
//!     customer_name: "Grace Hopper".to_string(),
//!     customer_email: "grace@example.com".to_string(),
//!     customer_phone: None,
//!     event_type: "conference".to_string(),
//!     event_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//!     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!     end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
//!     guests_count: 80,
//!     special_requirements: None,
//! };
//! let reservation = create_reservation(&mut db, &clerk, &request).unwrap();
//! println!("booked for {}", reservation.total_amount);
//! ```

pub mod auth;
pub mod booking;
pub mod config;
pub mod database;
pub mod error;
pub mod facility;
pub mod logging;
pub mod money;
pub mod reservation;
pub mod risk;

// Re-export key types at crate root for convenience
pub use auth::{AuthContext, Role};
pub use booking::{
    add_facility, booked_slots, create_reservation, dashboard_summary, get_facility,
    list_active_facilities, reservation_report, set_facility_status, update_status,
    DashboardSummary, ReportFilter, ReportRow, ReservationRequest, ScheduleEntry,
};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use facility::{Facility, FacilityId, FacilityKind, FacilityStatus, NewFacility};
pub use logging::{init_logger, LogLevel, Logger};
pub use money::Money;
pub use reservation::{Reservation, ReservationId, ReservationStatus, TimeSlot};
pub use risk::{analyze, RiskCategory, RiskFinding, RiskLevel, RiskReport};
