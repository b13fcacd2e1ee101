//! Caller identity and role gating.
//!
//! Every state-touching operation takes an [`AuthContext`] supplied by the
//! embedding application. There is no ambient or global identity; the
//! context is threaded explicitly so callers stay testable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Caller role, ordered by privilege.
///
/// Ordering is part of the contract: an operation requiring
/// [`Role::Manager`] also accepts [`Role::Admin`].
///
/// # Examples
///
/// ```
/// use facilis::Role;
///
/// assert!(Role::Admin > Role::Manager);
/// assert!(Role::Manager > Role::Employee);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Front-desk staff: may create reservations and read facilities.
    Employee,
    /// Approves and reports on reservations.
    Manager,
    /// Administers facilities.
    Admin,
}

impl Role {
    /// Returns the role's canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Parses a role from its string representation.
    ///
    /// # Errors
    ///
    /// Returns an error message if the string is not a valid role.
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The identity on whose behalf an operation runs.
///
/// # Examples
///
/// ```
/// use facilis::{AuthContext, Role};
///
/// let ctx = AuthContext::new(7, Role::Manager);
/// assert!(ctx.require(Role::Employee).is_ok());
/// assert!(ctx.require(Role::Admin).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    user_id: i64,
    role: Role,
}

impl AuthContext {
    /// Creates a context for the given user and role.
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns the caller's user id.
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Checks that the caller holds `required` or a more privileged role.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PermissionDenied`] naming both roles when the
    /// caller's role is insufficient.
    pub fn require(&self, required: Role) -> Result<()> {
        if self.role >= required {
            Ok(())
        } else {
            Err(Error::PermissionDenied {
                required,
                held: self.role,
            })
        }
    }
}
