//! Concurrent booking tests.
//!
//! Multiple threads race the check-then-insert create flow against one
//! database file, each through its own connection. The immediate write
//! transaction must serialize them: losers see the winner's committed
//! row and fail with a conflict instead of double-booking the slot.

mod common;

use std::thread;

use common::{date, employee, request, seed_facility};
use facilis::database::{Database, DatabaseConfig};
use facilis::{booked_slots, create_reservation, Error};

#[test]
fn racing_identical_slots_yield_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("race.db");

    let facility_id = {
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        seed_facility(&db, "Hall", 50, 1000).id
    };

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let path = path.clone();
            thread::spawn(move || {
                let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
                create_reservation(
                    &mut db,
                    &employee(),
                    &request(facility_id, "2024-01-10", "09:00", "12:00", 20),
                )
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one racer may win the slot");

    for result in &results {
        if let Err(err) = result {
            assert!(
                err.is_conflict() || matches!(err, Error::Database(_)),
                "loser failed with unexpected error: {err}"
            );
        }
    }

    // The store holds exactly one active booking for the slot
    let db = Database::open(DatabaseConfig::new(&path)).unwrap();
    let slots = booked_slots(&db, &employee(), facility_id, date("2024-01-10")).unwrap();
    assert_eq!(slots.len(), 1);
}

#[test]
fn racing_overlapping_slots_never_double_book() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overlap.db");

    let facility_id = {
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        seed_facility(&db, "Hall", 50, 1000).id
    };

    // Staggered 2-hour slots, each overlapping its neighbors by an hour:
    // 09-11, 10-12, 11-13, ...
    let handles: Vec<_> = (0u32..6)
        .map(|i| {
            let path = path.clone();
            thread::spawn(move || {
                let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
                let start = format!("{:02}:00", 9 + i);
                let end = format!("{:02}:00", 11 + i);
                create_reservation(
                    &mut db,
                    &employee(),
                    &request(facility_id, "2024-01-10", &start, &end, 10),
                )
            })
        })
        .collect();

    for handle in handles {
        // Conflicts are expected; panics are not
        let _ = handle.join().unwrap();
    }

    let db = Database::open(DatabaseConfig::new(&path)).unwrap();
    let slots = booked_slots(&db, &employee(), facility_id, date("2024-01-10")).unwrap();
    assert!(!slots.is_empty());
    for (i, a) in slots.iter().enumerate() {
        for b in &slots[i + 1..] {
            assert!(!a.overlaps(b), "stored slots {a} and {b} overlap");
        }
    }
}

#[test]
fn sequential_connections_share_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.db");

    let facility_id = {
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        seed_facility(&db, "Hall", 50, 1000).id
    };

    {
        let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
        create_reservation(
            &mut db,
            &employee(),
            &request(facility_id, "2024-01-10", "09:00", "12:00", 20),
        )
        .unwrap();
    }

    // A second connection sees the booking and rejects the overlap
    let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
    let err = create_reservation(
        &mut db,
        &employee(),
        &request(facility_id, "2024-01-10", "10:00", "11:00", 5),
    )
    .unwrap_err();
    assert!(err.is_conflict());
}
