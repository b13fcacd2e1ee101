//! Booking operations: reservation creation, status transitions,
//! availability, facility administration, and reporting.
//!
//! Every operation takes an [`AuthContext`](crate::auth::AuthContext)
//! and checks the caller's role before touching storage. Write paths
//! run inside an immediate transaction so concurrent callers serialize
//! on the storage engine; see [`create_reservation`] for the conflict
//! guarantee.

mod availability;
mod create;
mod facilities;
mod pricing;
#[cfg(all(test, feature = "property-tests"))]
mod proptests;
mod report;
mod request;
mod status;

pub use availability::booked_slots;
pub use create::create_reservation;
pub use facilities::{add_facility, get_facility, list_active_facilities, set_facility_status};
pub use pricing::{billable_hours, quote};
pub use report::{
    dashboard_summary, reservation_report, DashboardSummary, ReportFilter, ReportRow,
    ScheduleEntry,
};
pub use request::ReservationRequest;
pub use status::update_status;
