//! Property-based tests for the booking flow.
//!
//! These run against a real on-disk database, so they are gated behind
//! the `property-tests` feature and use fewer cases than the pure
//! in-memory properties.

use chrono::NaiveTime;
use proptest::prelude::*;

use crate::auth::{AuthContext, Role};
use crate::booking::create::create_reservation;
use crate::booking::pricing::billable_hours;
use crate::database::test_util::{create_test_database, sample_request, seed_facility};
use crate::database::Database;
use crate::money::Money;
use crate::reservation::TimeSlot;

fn minute(m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap()
}

// (start, end) pairs on a quarter-hour grid, end strictly after start
fn slot_bounds() -> impl Strategy<Value = (u32, u32)> {
    (0u32..95).prop_flat_map(|s| (Just(s * 15), ((s + 1)..=95u32).prop_map(|e| e * 15)))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    // Whatever sequence of requests arrives, the stored active bookings
    // for one facility and date are pairwise non-overlapping.
    #[test]
    fn prop_stored_bookings_never_overlap(bounds in prop::collection::vec(slot_bounds(), 1..12)) {
        let mut db = create_test_database();
        let facility = seed_facility(&db, "Hall", 50, 100);
        let employee = AuthContext::new(1, Role::Employee);

        for (start, end) in bounds {
            let mut request = sample_request(facility, "2024-01-10", "09:00", "10:00", 5);
            request.start_time = minute(start);
            request.end_time = minute(end);
            // Conflicts are expected; only storage errors would be a bug
            let _ = create_reservation(&mut db, &employee, &request);
        }

        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let slots = Database::list_booked_slots(db.connection(), facility, date).unwrap();
        for (i, a) in slots.iter().enumerate() {
            for b in &slots[i + 1..] {
                prop_assert!(!a.overlaps(b), "stored slots {a} and {b} overlap");
            }
        }
    }

    // The stored total always equals billable hours times the hourly rate.
    #[test]
    fn prop_total_matches_hours_times_rate(
        (start, end) in slot_bounds(),
        rate_major in 1i64..=5_000,
    ) {
        let mut db = create_test_database();
        let facility = seed_facility(&db, "Hall", 50, rate_major);
        let employee = AuthContext::new(1, Role::Employee);

        let mut request = sample_request(facility, "2024-01-10", "09:00", "10:00", 5);
        request.start_time = minute(start);
        request.end_time = minute(end);

        let reservation = create_reservation(&mut db, &employee, &request).unwrap();
        let slot = TimeSlot::new(minute(start), minute(end)).unwrap();
        let expected = Money::from_major(rate_major)
            .unwrap()
            .checked_mul(billable_hours(&slot))
            .unwrap();
        prop_assert_eq!(reservation.total_amount, expected);
    }

    // A losing request writes nothing: after a guaranteed conflict the
    // booked-slot count is unchanged.
    #[test]
    fn prop_conflict_leaves_no_residue((start, end) in slot_bounds()) {
        let mut db = create_test_database();
        let facility = seed_facility(&db, "Hall", 50, 100);
        let employee = AuthContext::new(1, Role::Employee);

        let mut first = sample_request(facility, "2024-01-10", "09:00", "10:00", 5);
        first.start_time = minute(start);
        first.end_time = minute(end);
        create_reservation(&mut db, &employee, &first).unwrap();

        // The identical slot always conflicts with itself
        let err = create_reservation(&mut db, &employee, &first).unwrap_err();
        prop_assert!(err.is_conflict());

        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let slots = Database::list_booked_slots(db.connection(), facility, date).unwrap();
        prop_assert_eq!(slots.len(), 1);
    }
}
