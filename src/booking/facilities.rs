//! Facility administration operations.
//!
//! Registration and soft-disable require [`Role::Admin`]; reads are
//! open to [`Role::Employee`] and above. Facilities are never deleted,
//! so historical reservations always resolve their facility.

use chrono::Utc;

use crate::auth::{AuthContext, Role};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::facility::{Facility, FacilityId, FacilityStatus, NewFacility};

/// Registers a facility and returns the stored record.
///
/// New facilities always start active.
///
/// # Errors
///
/// Returns [`Error::PermissionDenied`] unless the caller is an admin,
/// or a storage error if the insert fails.
pub fn add_facility(db: &Database, auth: &AuthContext, request: &NewFacility) -> Result<Facility> {
    auth.require(Role::Admin)?;

    let conn = db.connection();
    let id = Database::insert_facility(conn, request, Utc::now())?;
    let facility = Database::get_facility(conn, id)?.ok_or_else(|| Error::NotFound {
        resource: format!("facility {id}"),
    })?;

    log::debug!("registered facility {id} ({})", facility.name);

    Ok(facility)
}

/// Enables or soft-disables a facility.
///
/// Disabling hides the facility from new bookings; existing
/// reservations are untouched.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown facility,
/// [`Error::PermissionDenied`] unless the caller is an admin, or a
/// storage error if the update fails.
pub fn set_facility_status(
    db: &Database,
    auth: &AuthContext,
    id: FacilityId,
    status: FacilityStatus,
) -> Result<Facility> {
    auth.require(Role::Admin)?;

    let conn = db.connection();
    if !Database::set_facility_status(conn, id, status)? {
        return Err(Error::NotFound {
            resource: format!("facility {id}"),
        });
    }
    let facility = Database::get_facility(conn, id)?.ok_or_else(|| Error::NotFound {
        resource: format!("facility {id}"),
    })?;

    log::debug!("facility {id} set to {status}");

    Ok(facility)
}

/// Retrieves a facility by id.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown facility,
/// [`Error::PermissionDenied`] for an insufficient role, or a storage
/// error if the query fails.
pub fn get_facility(db: &Database, auth: &AuthContext, id: FacilityId) -> Result<Facility> {
    auth.require(Role::Employee)?;

    Database::get_facility(db.connection(), id)?.ok_or_else(|| Error::NotFound {
        resource: format!("facility {id}"),
    })
}

/// Lists all active facilities ordered by name.
///
/// # Errors
///
/// Returns [`Error::PermissionDenied`] for an insufficient role, or a
/// storage error if the query fails.
pub fn list_active_facilities(db: &Database, auth: &AuthContext) -> Result<Vec<Facility>> {
    auth.require(Role::Employee)?;

    Database::list_active_facilities(db.connection())
}
