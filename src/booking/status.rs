//! Reservation status transitions.
//!
//! Legal transitions: pending -> confirmed, pending -> cancelled,
//! confirmed -> completed, confirmed -> cancelled. Cancelled and
//! completed are terminal.

use chrono::Utc;
use rusqlite::TransactionBehavior;

use crate::auth::{AuthContext, Role};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId, ReservationStatus};

/// Moves a reservation to a new lifecycle status.
///
/// Requires [`Role::Manager`] or above. On success `updated_at` is
/// refreshed and the updated reservation returned. There are no
/// cascading effects: cancelling does not trigger refunds or
/// notifications.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown reservation,
/// [`Error::InvalidTransition`] when the state machine forbids the
/// change, [`Error::PermissionDenied`] for an insufficient role, or a
/// storage error if the transaction fails.
pub fn update_status(
    db: &mut Database,
    auth: &AuthContext,
    id: ReservationId,
    new_status: ReservationStatus,
) -> Result<Reservation> {
    auth.require(Role::Manager)?;

    let tx = db
        .connection_mut()
        .transaction_with_behavior(TransactionBehavior::Immediate)?;

    let current = Database::get_reservation(&tx, id)?.ok_or_else(|| Error::NotFound {
        resource: format!("reservation {id}"),
    })?;

    if !current.status.can_transition_to(new_status) {
        return Err(Error::InvalidTransition {
            from: current.status,
            to: new_status,
        });
    }

    Database::set_reservation_status(&tx, id, new_status, Utc::now())?;
    let updated = Database::get_reservation(&tx, id)?.ok_or_else(|| Error::NotFound {
        resource: format!("reservation {id}"),
    })?;

    tx.commit()?;

    log::debug!(
        "reservation {id} moved {} -> {new_status}",
        current.status
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::create::create_reservation;
    use crate::database::test_util::{create_test_database, sample_request, seed_facility};

    fn manager() -> AuthContext {
        AuthContext::new(2, Role::Manager)
    }

    fn pending_reservation(db: &mut Database) -> ReservationId {
        let facility = seed_facility(db, "Hall", 50, 1000);
        let request = sample_request(facility, "2024-01-10", "09:00", "12:00", 20);
        create_reservation(db, &AuthContext::new(1, Role::Employee), &request)
            .unwrap()
            .id
    }

    #[test]
    fn pending_to_confirmed() {
        let mut db = create_test_database();
        let id = pending_reservation(&mut db);

        let updated = update_status(&mut db, &manager(), id, ReservationStatus::Confirmed).unwrap();
        assert_eq!(updated.status, ReservationStatus::Confirmed);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn confirmed_cannot_return_to_pending() {
        let mut db = create_test_database();
        let id = pending_reservation(&mut db);
        update_status(&mut db, &manager(), id, ReservationStatus::Confirmed).unwrap();

        let err =
            update_status(&mut db, &manager(), id, ReservationStatus::Pending).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition {
                from: ReservationStatus::Confirmed,
                to: ReservationStatus::Pending,
            }
        ));
    }

    #[test]
    fn confirmed_to_cancelled() {
        let mut db = create_test_database();
        let id = pending_reservation(&mut db);
        update_status(&mut db, &manager(), id, ReservationStatus::Confirmed).unwrap();

        let updated = update_status(&mut db, &manager(), id, ReservationStatus::Cancelled).unwrap();
        assert_eq!(updated.status, ReservationStatus::Cancelled);
    }

    #[test]
    fn confirmed_to_completed() {
        let mut db = create_test_database();
        let id = pending_reservation(&mut db);
        update_status(&mut db, &manager(), id, ReservationStatus::Confirmed).unwrap();

        let updated = update_status(&mut db, &manager(), id, ReservationStatus::Completed).unwrap();
        assert_eq!(updated.status, ReservationStatus::Completed);
    }

    #[test]
    fn pending_cannot_complete_directly() {
        let mut db = create_test_database();
        let id = pending_reservation(&mut db);

        let err =
            update_status(&mut db, &manager(), id, ReservationStatus::Completed).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
    }

    #[test]
    fn terminal_states_reject_everything() {
        let mut db = create_test_database();
        let id = pending_reservation(&mut db);
        update_status(&mut db, &manager(), id, ReservationStatus::Cancelled).unwrap();

        for next in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
        ] {
            let err = update_status(&mut db, &manager(), id, next).unwrap_err();
            assert!(matches!(err, Error::InvalidTransition { .. }));
        }
    }

    #[test]
    fn unknown_reservation_fails_not_found() {
        let mut db = create_test_database();
        let err = update_status(
            &mut db,
            &manager(),
            ReservationId::new(404),
            ReservationStatus::Confirmed,
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn failed_transition_leaves_status_untouched() {
        let mut db = create_test_database();
        let id = pending_reservation(&mut db);

        update_status(&mut db, &manager(), id, ReservationStatus::Completed).unwrap_err();
        let stored = Database::get_reservation(db.connection(), id).unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Pending);
    }

    #[test]
    fn employee_may_not_change_status() {
        let mut db = create_test_database();
        let id = pending_reservation(&mut db);

        let err = update_status(
            &mut db,
            &AuthContext::new(1, Role::Employee),
            id,
            ReservationStatus::Confirmed,
        )
        .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied { .. }));
    }
}
