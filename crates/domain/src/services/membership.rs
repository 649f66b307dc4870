//! Membership and authorization gate.
//!
//! Pure checks over a caller's (possibly absent) membership row. Callers
//! fetch the membership from storage and pass it in; nothing here has side
//! effects.

use uuid::Uuid;

use crate::error::DomainError;
use crate::models::home::HomeMembership;

/// Requires that the actor is a member of the home.
pub fn require_member(
    membership: Option<&HomeMembership>,
) -> Result<&HomeMembership, DomainError> {
    membership.ok_or_else(|| DomainError::Forbidden("Access denied to this home".to_string()))
}

/// Requires that the actor is an admin of the home.
pub fn require_admin(membership: Option<&HomeMembership>) -> Result<&HomeMembership, DomainError> {
    let membership = require_member(membership)?;
    if membership.role.is_admin() {
        Ok(membership)
    } else {
        Err(DomainError::Forbidden(
            "Only home admins can perform this action".to_string(),
        ))
    }
}

/// Requires admin role unless the actor targets themselves.
///
/// Self-actions (claiming a task, toggling one's own break mode, leaving a
/// home) bypass the admin requirement but never the membership requirement.
pub fn require_self_or_admin(
    actor_id: Uuid,
    target_id: Uuid,
    membership: Option<&HomeMembership>,
) -> Result<&HomeMembership, DomainError> {
    if actor_id == target_id {
        require_member(membership)
    } else {
        require_admin(membership)
    }
}
