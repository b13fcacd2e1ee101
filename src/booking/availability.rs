//! Availability projection for a facility and date.
//!
//! Returns the slots currently held by active (pending or confirmed)
//! reservations; callers invert these into free windows for rendering.
//! Purely a read, no invariant enforcement.

use chrono::NaiveDate;

use crate::auth::{AuthContext, Role};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::facility::FacilityId;
use crate::reservation::TimeSlot;

/// Lists the booked slots for a facility and date, ordered by start.
///
/// Requires [`Role::Employee`] or above. Cancelled and completed
/// reservations do not appear; their slots are free again. Inactive
/// facilities still report their existing bookings.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown facility,
/// [`Error::PermissionDenied`] for an insufficient role, or a storage
/// error if the query fails.
pub fn booked_slots(
    db: &Database,
    auth: &AuthContext,
    facility_id: FacilityId,
    date: NaiveDate,
) -> Result<Vec<TimeSlot>> {
    auth.require(Role::Employee)?;

    let conn = db.connection();
    if Database::get_facility(conn, facility_id)?.is_none() {
        return Err(Error::NotFound {
            resource: format!("facility {facility_id}"),
        });
    }

    Database::list_booked_slots(conn, facility_id, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::create::create_reservation;
    use crate::booking::status::update_status;
    use crate::database::test_util::{create_test_database, sample_request, seed_facility};
    use crate::reservation::ReservationStatus;
    use chrono::NaiveTime;

    fn employee() -> AuthContext {
        AuthContext::new(1, Role::Employee)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(
            NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn slots_ordered_by_start() {
        let mut db = create_test_database();
        let facility = seed_facility(&db, "Hall", 50, 100);
        for (start, end) in [("14:00", "16:00"), ("09:00", "12:00")] {
            let request = sample_request(facility, "2024-01-10", start, end, 10);
            create_reservation(&mut db, &employee(), &request).unwrap();
        }

        let slots = booked_slots(&db, &employee(), facility, date("2024-01-10")).unwrap();
        assert_eq!(slots, vec![slot("09:00", "12:00"), slot("14:00", "16:00")]);
    }

    #[test]
    fn cancelled_reservations_never_listed() {
        let mut db = create_test_database();
        let facility = seed_facility(&db, "Hall", 50, 100);
        let request = sample_request(facility, "2024-01-10", "09:00", "12:00", 10);
        let reservation = create_reservation(&mut db, &employee(), &request).unwrap();

        let manager = AuthContext::new(2, Role::Manager);
        update_status(&mut db, &manager, reservation.id, ReservationStatus::Cancelled).unwrap();

        let slots = booked_slots(&db, &employee(), facility, date("2024-01-10")).unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn empty_for_free_date() {
        let mut db = create_test_database();
        let facility = seed_facility(&db, "Hall", 50, 100);
        let request = sample_request(facility, "2024-01-10", "09:00", "12:00", 10);
        create_reservation(&mut db, &employee(), &request).unwrap();

        let slots = booked_slots(&db, &employee(), facility, date("2024-01-11")).unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn unknown_facility_fails_not_found() {
        let db = create_test_database();
        let err =
            booked_slots(&db, &employee(), FacilityId::new(99), date("2024-01-10")).unwrap_err();
        assert!(err.is_not_found());
    }
}
