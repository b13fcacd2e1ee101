//! The atomic reservation-create flow.
//!
//! All checks and the insert run inside one immediate (write)
//! transaction, so two concurrent requests for overlapping slots cannot
//! both pass the conflict check: the storage engine serializes the
//! writers and the loser re-reads the winner's committed row.

use chrono::Utc;
use rusqlite::TransactionBehavior;

use crate::auth::{AuthContext, Role};
use crate::booking::pricing;
use crate::booking::request::ReservationRequest;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::facility::Facility;
use crate::reservation::{Reservation, TimeSlot};

/// Creates a reservation for the requested facility and slot.
///
/// Requires [`Role::Employee`] or above. The checks run in a fixed
/// order, first violation wins:
///
/// 1. the facility exists and is active, else [`Error::NotFound`];
/// 2. the end time falls strictly after the start, else
///    [`Error::InvalidRange`];
/// 3. no active reservation overlaps the slot, else
///    [`Error::TimeConflict`];
/// 4. the guest count fits the facility capacity, else
///    [`Error::CapacityExceeded`];
/// 5. the request content is well formed, else [`Error::InvalidInput`].
///
/// On success the reservation is stored with status pending and the
/// derived total (per-started-hour, one-hour minimum), and returned with
/// its storage-assigned id. Nothing is written on any failure.
///
/// # Errors
///
/// Returns the validation errors above, [`Error::PermissionDenied`] for
/// an insufficient role, or a storage error if the transaction fails;
/// storage failures roll the whole flow back.
pub fn create_reservation(
    db: &mut Database,
    auth: &AuthContext,
    request: &ReservationRequest,
) -> Result<Reservation> {
    auth.require(Role::Employee)?;

    let tx = db
        .connection_mut()
        .transaction_with_behavior(TransactionBehavior::Immediate)?;

    let facility = Database::get_facility(&tx, request.facility_id)?
        .filter(Facility::is_active)
        .ok_or_else(|| Error::NotFound {
            resource: format!("active facility {}", request.facility_id),
        })?;

    let slot = TimeSlot::new(request.start_time, request.end_time)?;

    if let Some(existing) =
        Database::find_conflicting_reservation(&tx, request.facility_id, request.event_date, &slot)?
    {
        return Err(Error::TimeConflict {
            details: format!(
                "reservation {} occupies {} on {}",
                existing.id, existing.slot, existing.event_date
            ),
        });
    }

    if request.guests_count > facility.capacity {
        return Err(Error::CapacityExceeded {
            requested: request.guests_count,
            capacity: facility.capacity,
        });
    }

    request.validate_content()?;

    let total_amount = pricing::quote(&slot, facility.hourly_rate)?;
    let now = Utc::now();
    let id = Database::insert_reservation(&tx, request, slot, total_amount, now)?;
    let reservation = Database::get_reservation(&tx, id)?.ok_or_else(|| Error::NotFound {
        resource: format!("reservation {id}"),
    })?;

    tx.commit()?;

    log::debug!(
        "created reservation {id} for facility {} on {} ({slot}), total {total_amount}",
        request.facility_id,
        request.event_date
    );

    Ok(reservation)
}
