//! Database CRUD operations for facilities and reservations.
//!
//! This module implements the storage-level reads and writes behind the
//! booking, administration, and reporting operations. Every function takes
//! a `&Connection` so callers can run several of them inside one
//! transaction; the booking layer owns the transaction boundaries.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::{params, params_from_iter, Connection};

use crate::booking::{ReportFilter, ReportRow, ReservationRequest, ScheduleEntry};
use crate::error::Result;
use crate::facility::{Facility, FacilityId, FacilityKind, FacilityStatus, NewFacility};
use crate::money::Money;
use crate::reservation::{
    Reservation, ReservationId, ReservationStatus, TimeSlot, ValidationError,
};

use super::connection::Database;
use super::schema::{INSERT_FACILITY, INSERT_RESERVATION};

/// Storage format for `event_date` columns.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format for slot bound columns. Zero-padded so lexicographic
/// comparison in SQL matches chronological order.
const TIME_FORMAT: &str = "%H:%M";

/// Converts a UTC timestamp to Unix epoch seconds for database storage.
pub(super) fn datetime_to_unix_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Converts Unix epoch seconds from the database to a UTC timestamp.
pub(super) fn unix_secs_to_datetime(secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::ToSqlConversionFailure(Box::new(ValidationError::new(
            "timestamp",
            format!("out of range: {secs}"),
        )))
    })
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn date_from_db(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn time_to_db(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn time_from_db(s: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Helper function to deserialize a facility from a database row.
///
/// Expects row fields in this order: id, name, kind, capacity,
/// `hourly_rate_cents`, location, description, amenities, status, `created_at`
fn row_to_facility(row: &rusqlite::Row<'_>) -> rusqlite::Result<Facility> {
    let kind_raw: String = row.get(2)?;
    let kind = FacilityKind::parse(&kind_raw)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let rate_cents: i64 = row.get(4)?;
    let hourly_rate = Money::try_from(rate_cents)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let amenities_raw: String = row.get(7)?;
    let amenities: Vec<String> = serde_json::from_str(&amenities_raw)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let status_raw: String = row.get(8)?;
    let status = FacilityStatus::parse(&status_raw)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Facility {
        id: FacilityId::new(row.get(0)?),
        name: row.get(1)?,
        kind,
        capacity: row.get(3)?,
        hourly_rate,
        location: row.get(5)?,
        description: row.get(6)?,
        amenities,
        status,
        created_at: unix_secs_to_datetime(row.get(9)?)?,
    })
}

/// Helper function to deserialize a reservation from a database row.
///
/// Expects row fields in this order: id, `facility_id`, `customer_name`,
/// `customer_email`, `customer_phone`, `event_type`, `event_date`,
/// `start_time`, `end_time`, `guests_count`, `special_requirements`,
/// `total_amount_cents`, status, `created_at`, `updated_at`
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let event_date = date_from_db(&row.get::<_, String>(6)?)?;
    let start = time_from_db(&row.get::<_, String>(7)?)?;
    let end = time_from_db(&row.get::<_, String>(8)?)?;
    let slot = TimeSlot::new(start, end)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let amount_cents: i64 = row.get(11)?;
    let total_amount = Money::try_from(amount_cents)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let status_raw: String = row.get(12)?;
    let status = ReservationStatus::parse(&status_raw)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Reservation {
        id: ReservationId::new(row.get(0)?),
        facility_id: FacilityId::new(row.get(1)?),
        customer_name: row.get(2)?,
        customer_email: row.get(3)?,
        customer_phone: row.get(4)?,
        event_type: row.get(5)?,
        event_date,
        slot,
        guests_count: row.get(9)?,
        special_requirements: row.get(10)?,
        total_amount,
        status,
        created_at: unix_secs_to_datetime(row.get(13)?)?,
        updated_at: unix_secs_to_datetime(row.get(14)?)?,
    })
}

// SQL statements for facility operations
const SELECT_FACILITY: &str = r"
    SELECT id, name, kind, capacity, hourly_rate_cents, location, description,
           amenities, status, created_at
    FROM facilities
    WHERE id = ?
";

const SELECT_ACTIVE_FACILITIES: &str = r"
    SELECT id, name, kind, capacity, hourly_rate_cents, location, description,
           amenities, status, created_at
    FROM facilities
    WHERE status = 'active'
    ORDER BY name
";

const UPDATE_FACILITY_STATUS: &str = r"
    UPDATE facilities
    SET status = ?
    WHERE id = ?
";

const COUNT_ACTIVE_FACILITIES: &str = r"
    SELECT COUNT(*) FROM facilities WHERE status = 'active'
";

// SQL statements for reservation operations
const SELECT_RESERVATION: &str = r"
    SELECT id, facility_id, customer_name, customer_email, customer_phone,
           event_type, event_date, start_time, end_time, guests_count,
           special_requirements, total_amount_cents, status, created_at, updated_at
    FROM reservations
    WHERE id = ?
";

const SELECT_CONFLICTING_RESERVATION: &str = r"
    SELECT id, facility_id, customer_name, customer_email, customer_phone,
           event_type, event_date, start_time, end_time, guests_count,
           special_requirements, total_amount_cents, status, created_at, updated_at
    FROM reservations
    WHERE facility_id = ? AND event_date = ?
      AND status IN ('pending', 'confirmed')
      AND start_time < ? AND end_time > ?
    ORDER BY start_time
    LIMIT 1
";

const SELECT_BOOKED_SLOTS: &str = r"
    SELECT start_time, end_time
    FROM reservations
    WHERE facility_id = ? AND event_date = ?
      AND status IN ('pending', 'confirmed')
    ORDER BY start_time
";

const UPDATE_RESERVATION_STATUS: &str = r"
    UPDATE reservations
    SET status = ?, updated_at = ?
    WHERE id = ?
";

const COUNT_ACTIVE_RESERVATIONS_ON_DATE: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE event_date = ? AND status IN ('pending', 'confirmed')
";

const COUNT_PENDING_RESERVATIONS: &str = r"
    SELECT COUNT(*) FROM reservations WHERE status = 'pending'
";

const SUM_CONFIRMED_REVENUE: &str = r"
    SELECT COALESCE(SUM(total_amount_cents), 0)
    FROM reservations
    WHERE status = 'confirmed' AND event_date >= ? AND event_date < ?
";

const SELECT_DAY_SCHEDULE: &str = r"
    SELECT f.name, r.customer_name, r.event_type, r.start_time, r.end_time
    FROM reservations r
    JOIN facilities f ON r.facility_id = f.id
    WHERE r.event_date = ? AND r.status = 'confirmed'
    ORDER BY r.start_time
";

const SELECT_REPORT_BASE: &str = r"
    SELECT r.id, r.facility_id, r.customer_name, r.customer_email, r.customer_phone,
           r.event_type, r.event_date, r.start_time, r.end_time, r.guests_count,
           r.special_requirements, r.total_amount_cents, r.status, r.created_at,
           r.updated_at, f.name
    FROM reservations r
    JOIN facilities f ON r.facility_id = f.id
";

impl Database {
    /// Inserts a facility and returns its storage-assigned id.
    ///
    /// New facilities always start active.
    ///
    /// # Errors
    ///
    /// Returns an error if the amenities cannot be encoded or the insert
    /// fails.
    pub fn insert_facility(
        conn: &Connection,
        facility: &NewFacility,
        created_at: DateTime<Utc>,
    ) -> Result<FacilityId> {
        let amenities = serde_json::to_string(facility.amenities())?;
        conn.execute(
            INSERT_FACILITY,
            params![
                facility.name(),
                facility.kind().as_str(),
                facility.capacity(),
                facility.hourly_rate().minor_units(),
                facility.location(),
                facility.description(),
                amenities,
                FacilityStatus::Active.as_str(),
                datetime_to_unix_secs(created_at),
            ],
        )?;
        Ok(FacilityId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a facility by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(facility))` if the facility exists
    /// - `Ok(None)` if the facility doesn't exist
    /// - `Err(_)` if a database error occurs
    pub fn get_facility(conn: &Connection, id: FacilityId) -> Result<Option<Facility>> {
        let mut stmt = conn.prepare_cached(SELECT_FACILITY)?;

        match stmt.query_row(params![id.value()], row_to_facility) {
            Ok(facility) => Ok(Some(facility)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all active facilities ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_active_facilities(conn: &Connection) -> Result<Vec<Facility>> {
        let mut stmt = conn.prepare(SELECT_ACTIVE_FACILITIES)?;
        let facilities = stmt
            .query_map([], row_to_facility)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(facilities)
    }

    /// Updates a facility's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// `true` if a facility row was updated, `false` if no facility has
    /// the given id.
    pub fn set_facility_status(
        conn: &Connection,
        id: FacilityId,
        status: FacilityStatus,
    ) -> Result<bool> {
        let rows = conn.execute(UPDATE_FACILITY_STATUS, params![status.as_str(), id.value()])?;
        Ok(rows > 0)
    }

    /// Counts facilities with status active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_active_facilities(conn: &Connection) -> Result<i64> {
        let count = conn.query_row(COUNT_ACTIVE_FACILITIES, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Inserts a reservation with status pending and returns its id.
    ///
    /// The caller supplies the validated slot, the derived total, and the
    /// creation timestamp; this function only performs the write. It is
    /// intended to run inside the same transaction as the conflict check.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_reservation(
        conn: &Connection,
        request: &ReservationRequest,
        slot: TimeSlot,
        total_amount: Money,
        timestamp: DateTime<Utc>,
    ) -> Result<ReservationId> {
        let mut stmt = conn.prepare_cached(INSERT_RESERVATION)?;
        stmt.execute(params![
            request.facility_id.value(),
            request.customer_name,
            request.customer_email,
            request.customer_phone,
            request.event_type,
            date_to_db(request.event_date),
            time_to_db(slot.start()),
            time_to_db(slot.end()),
            request.guests_count,
            request.special_requirements,
            total_amount.minor_units(),
            ReservationStatus::Pending.as_str(),
            datetime_to_unix_secs(timestamp),
            datetime_to_unix_secs(timestamp),
        ])?;
        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` if the reservation exists
    /// - `Ok(None)` if the reservation doesn't exist
    /// - `Err(_)` if a database error occurs
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let mut stmt = conn.prepare_cached(SELECT_RESERVATION)?;

        match stmt.query_row(params![id.value()], row_to_reservation) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Finds an active reservation whose slot overlaps the given one.
    ///
    /// Applies the half-open test `existing.start < new.end AND
    /// existing.end > new.start`, scoped to one facility and date and to
    /// status pending or confirmed. Returns the earliest match.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_conflicting_reservation(
        conn: &Connection,
        facility_id: FacilityId,
        event_date: NaiveDate,
        slot: &TimeSlot,
    ) -> Result<Option<Reservation>> {
        let mut stmt = conn.prepare_cached(SELECT_CONFLICTING_RESERVATION)?;

        match stmt.query_row(
            params![
                facility_id.value(),
                date_to_db(event_date),
                time_to_db(slot.end()),
                time_to_db(slot.start()),
            ],
            row_to_reservation,
        ) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists the booked slots for a facility and date, ordered by start.
    ///
    /// Only reservations with status pending or confirmed count; cancelled
    /// and completed ones release their slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_booked_slots(
        conn: &Connection,
        facility_id: FacilityId,
        event_date: NaiveDate,
    ) -> Result<Vec<TimeSlot>> {
        let mut stmt = conn.prepare_cached(SELECT_BOOKED_SLOTS)?;
        let slots = stmt
            .query_map(params![facility_id.value(), date_to_db(event_date)], |row| {
                let start = time_from_db(&row.get::<_, String>(0)?)?;
                let end = time_from_db(&row.get::<_, String>(1)?)?;
                TimeSlot::new(start, end)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(slots)
    }

    /// Updates a reservation's status and refreshes `updated_at`.
    ///
    /// Transition legality is the caller's responsibility; this function
    /// only performs the write.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// `true` if a reservation row was updated, `false` if no reservation
    /// has the given id.
    pub fn set_reservation_status(
        conn: &Connection,
        id: ReservationId,
        status: ReservationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let rows = conn.execute(
            UPDATE_RESERVATION_STATUS,
            params![
                status.as_str(),
                datetime_to_unix_secs(updated_at),
                id.value()
            ],
        )?;
        Ok(rows > 0)
    }

    /// Counts reservations on a date with status pending or confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_active_reservations_on(conn: &Connection, date: NaiveDate) -> Result<i64> {
        let count = conn.query_row(
            COUNT_ACTIVE_RESERVATIONS_ON_DATE,
            params![date_to_db(date)],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Counts reservations with status pending across all dates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_pending_reservations(conn: &Connection) -> Result<i64> {
        let count = conn.query_row(COUNT_PENDING_RESERVATIONS, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Sums the totals of confirmed reservations with
    /// `from <= event_date < to_exclusive`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn confirmed_revenue_between(
        conn: &Connection,
        from: NaiveDate,
        to_exclusive: NaiveDate,
    ) -> Result<Money> {
        let total: i64 = conn.query_row(
            SUM_CONFIRMED_REVENUE,
            params![date_to_db(from), date_to_db(to_exclusive)],
            |row| row.get(0),
        )?;
        Ok(Money::try_from(total)?)
    }

    /// Lists the confirmed reservations for a date with their facility
    /// names, ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn day_schedule(conn: &Connection, date: NaiveDate) -> Result<Vec<ScheduleEntry>> {
        let mut stmt = conn.prepare(SELECT_DAY_SCHEDULE)?;
        let entries = stmt
            .query_map(params![date_to_db(date)], |row| {
                let start = time_from_db(&row.get::<_, String>(3)?)?;
                let end = time_from_db(&row.get::<_, String>(4)?)?;
                let slot = TimeSlot::new(start, end)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
                Ok(ScheduleEntry {
                    facility_name: row.get(0)?,
                    customer_name: row.get(1)?,
                    event_type: row.get(2)?,
                    slot,
                })
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(entries)
    }

    /// Runs the filtered reservation report.
    ///
    /// The WHERE clause is assembled from a clause list and a parallel
    /// parameter list; filter values are always bound, never spliced into
    /// the SQL text. Rows join the facility name and are ordered by event
    /// date, then start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn filtered_report(conn: &Connection, filter: &ReportFilter) -> Result<Vec<ReportRow>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(from) = filter.from_date {
            clauses.push("r.event_date >= ?");
            values.push(date_to_db(from));
        }
        if let Some(to) = filter.to_date {
            clauses.push("r.event_date <= ?");
            values.push(date_to_db(to));
        }
        if let Some(status) = filter.status {
            clauses.push("r.status = ?");
            values.push(status.as_str().to_string());
        }

        let mut sql = String::from(SELECT_REPORT_BASE);
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY r.event_date, r.start_time");

        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                let reservation = row_to_reservation(row)?;
                let facility_name: String = row.get(15)?;
                Ok(ReportRow {
                    reservation,
                    facility_name,
                })
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rows)
    }
}
