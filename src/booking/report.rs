//! Reservation reporting and dashboard metrics.
//!
//! The report filter is assembled as a clause list plus a parallel
//! parameter list in the storage layer; filter values are always bound,
//! never spliced into SQL text. The dashboard takes its reference date
//! as an argument so results are reproducible.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::auth::{AuthContext, Role};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::money::Money;
use crate::reservation::{Reservation, ReservationStatus, TimeSlot};

/// Optional bounds for the reservation report.
///
/// Date bounds are inclusive on `event_date`; an empty filter returns
/// every reservation.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use facilis::{ReportFilter, ReservationStatus};
///
/// let filter = ReportFilter::new()
///     .with_from_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .with_status(ReservationStatus::Confirmed);
/// assert!(filter.to_date.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Lower inclusive bound on `event_date`.
    pub from_date: Option<NaiveDate>,
    /// Upper inclusive bound on `event_date`.
    pub to_date: Option<NaiveDate>,
    /// Restrict to one lifecycle status.
    pub status: Option<ReservationStatus>,
}

impl ReportFilter {
    /// Creates an empty filter matching every reservation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lower inclusive date bound.
    #[must_use]
    pub const fn with_from_date(mut self, from: NaiveDate) -> Self {
        self.from_date = Some(from);
        self
    }

    /// Sets the upper inclusive date bound.
    #[must_use]
    pub const fn with_to_date(mut self, to: NaiveDate) -> Self {
        self.to_date = Some(to);
        self
    }

    /// Restricts the report to one status.
    #[must_use]
    pub const fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// One report row: a reservation joined with its facility name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// The reservation record.
    pub reservation: Reservation,
    /// Display name of the booked facility.
    pub facility_name: String,
}

/// One entry in the dashboard's schedule for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    /// Display name of the booked facility.
    pub facility_name: String,
    /// Name of the customer holding the booking.
    pub customer_name: String,
    /// Free-text event description.
    pub event_type: String,
    /// The booked time slot.
    pub slot: TimeSlot,
}

/// Aggregated metrics for the back-office dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Facilities currently accepting bookings.
    pub active_facilities: i64,
    /// Active (pending or confirmed) reservations on the reference date.
    pub today_reservations: i64,
    /// Pending reservations across all dates.
    pub pending_approvals: i64,
    /// Sum of confirmed reservation totals in the reference date's
    /// calendar month.
    pub monthly_revenue: Money,
    /// Confirmed reservations on the reference date, ordered by start.
    pub today_schedule: Vec<ScheduleEntry>,
}

/// Runs the filtered reservation report.
///
/// Requires [`Role::Manager`] or above. Rows join the facility name and
/// are ordered by event date, then start time.
///
/// # Errors
///
/// Returns [`Error::PermissionDenied`] for an insufficient role, or a
/// storage error if the query fails.
pub fn reservation_report(
    db: &Database,
    auth: &AuthContext,
    filter: &ReportFilter,
) -> Result<Vec<ReportRow>> {
    auth.require(Role::Manager)?;

    Database::filtered_report(db.connection(), filter)
}

/// Computes the dashboard metrics for the given reference date.
///
/// Requires [`Role::Manager`] or above. `today` is injected rather than
/// read from the ambient clock so callers and tests control the window;
/// `monthly_revenue` covers `today`'s calendar month.
///
/// # Errors
///
/// Returns [`Error::PermissionDenied`] for an insufficient role, or a
/// storage error if any query fails.
pub fn dashboard_summary(
    db: &Database,
    auth: &AuthContext,
    today: NaiveDate,
) -> Result<DashboardSummary> {
    auth.require(Role::Manager)?;

    let conn = db.connection();
    let (month_start, next_month) = month_bounds(today)?;

    Ok(DashboardSummary {
        active_facilities: Database::count_active_facilities(conn)?,
        today_reservations: Database::count_active_reservations_on(conn, today)?,
        pending_approvals: Database::count_pending_reservations(conn)?,
        monthly_revenue: Database::confirmed_revenue_between(conn, month_start, next_month)?,
        today_schedule: Database::day_schedule(conn, today)?,
    })
}

/// Returns the first day of `today`'s month and the first day of the
/// next month (exclusive upper bound).
fn month_bounds(today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let out_of_range = || Error::InvalidInput {
        field: "today".to_string(),
        message: format!("cannot compute month window for {today}"),
    };

    let start = today.with_day(1).ok_or_else(out_of_range)?;
    let next = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    }
    .ok_or_else(out_of_range)?;

    Ok((start, next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::create::create_reservation;
    use crate::booking::status::update_status;
    use crate::database::test_util::{create_test_database, sample_request, seed_facility};
    use crate::facility::FacilityStatus;

    fn manager() -> AuthContext {
        AuthContext::new(2, Role::Manager)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn month_bounds_mid_year() {
        let (start, next) = month_bounds(date("2024-01-15")).unwrap();
        assert_eq!(start, date("2024-01-01"));
        assert_eq!(next, date("2024-02-01"));
    }

    #[test]
    fn month_bounds_december_rolls_over() {
        let (start, next) = month_bounds(date("2024-12-31")).unwrap();
        assert_eq!(start, date("2024-12-01"));
        assert_eq!(next, date("2025-01-01"));
    }

    #[test]
    fn report_requires_manager() {
        let db = create_test_database();
        let err = reservation_report(
            &db,
            &AuthContext::new(1, Role::Employee),
            &ReportFilter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied { .. }));
    }

    #[test]
    fn report_filters_by_status_and_dates() {
        let mut db = create_test_database();
        let facility = seed_facility(&db, "Hall", 50, 1000);
        let employee = AuthContext::new(1, Role::Employee);

        let kept = create_reservation(
            &mut db,
            &employee,
            &sample_request(facility, "2024-01-10", "09:00", "10:00", 5),
        )
        .unwrap();
        create_reservation(
            &mut db,
            &employee,
            &sample_request(facility, "2024-01-20", "09:00", "10:00", 5),
        )
        .unwrap();
        create_reservation(
            &mut db,
            &employee,
            &sample_request(facility, "2024-02-10", "09:00", "10:00", 5),
        )
        .unwrap();
        update_status(&mut db, &manager(), kept.id, ReservationStatus::Confirmed).unwrap();

        let filter = ReportFilter::new()
            .with_from_date(date("2024-01-01"))
            .with_to_date(date("2024-01-31"))
            .with_status(ReservationStatus::Confirmed);
        let rows = reservation_report(&db, &manager(), &filter).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].reservation.id, kept.id);
        assert_eq!(rows[0].facility_name, "Hall");
    }

    #[test]
    fn dashboard_counts_and_revenue() {
        let mut db = create_test_database();
        let hall = seed_facility(&db, "Hall", 50, 1000);
        let terrace = seed_facility(&db, "Terrace", 80, 500);
        let employee = AuthContext::new(1, Role::Employee);

        // Confirmed today: 3h x 1000.00
        let a = create_reservation(
            &mut db,
            &employee,
            &sample_request(hall, "2024-01-10", "09:00", "12:00", 20),
        )
        .unwrap();
        update_status(&mut db, &manager(), a.id, ReservationStatus::Confirmed).unwrap();

        // Pending today on another facility
        create_reservation(
            &mut db,
            &employee,
            &sample_request(terrace, "2024-01-10", "10:00", "11:00", 10),
        )
        .unwrap();

        // Confirmed later the same month: 2h x 500.00
        let c = create_reservation(
            &mut db,
            &employee,
            &sample_request(terrace, "2024-01-25", "09:00", "11:00", 10),
        )
        .unwrap();
        update_status(&mut db, &manager(), c.id, ReservationStatus::Confirmed).unwrap();

        // Confirmed next month: excluded from revenue
        let d = create_reservation(
            &mut db,
            &employee,
            &sample_request(hall, "2024-02-05", "09:00", "11:00", 10),
        )
        .unwrap();
        update_status(&mut db, &manager(), d.id, ReservationStatus::Confirmed).unwrap();

        // An inactive facility no longer counts as active
        let closed = seed_facility(&db, "Closed Wing", 10, 100);
        Database::set_facility_status(db.connection(), closed, FacilityStatus::Inactive).unwrap();

        let summary = dashboard_summary(&db, &manager(), date("2024-01-10")).unwrap();
        assert_eq!(summary.active_facilities, 2);
        assert_eq!(summary.today_reservations, 2);
        assert_eq!(summary.pending_approvals, 1);
        assert_eq!(summary.monthly_revenue, Money::from_major(4000).unwrap());
        assert_eq!(summary.today_schedule.len(), 1);
        assert_eq!(summary.today_schedule[0].facility_name, "Hall");
    }

    #[test]
    fn dashboard_requires_manager() {
        let db = create_test_database();
        let err = dashboard_summary(&db, &AuthContext::new(1, Role::Employee), date("2024-01-10"))
            .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied { .. }));
    }
}
