//! Access policy: role-derived capabilities.
//!
//! Every guard decision in the stores is made here, once, instead of
//! being re-implemented per caller. All functions are pure.

use crate::models::registration::Registration;
use crate::models::user::{User, UserRole};

/// Hosts and admins can create registrations.
pub fn can_create_registration(user: &User) -> bool {
    matches!(user.role, UserRole::Host | UserRole::Admin)
}

/// Only admins can manage other users' accounts and roles.
pub fn can_manage_users(user: &User) -> bool {
    user.role == UserRole::Admin
}

/// Admins, or the host owning the registration, review its submissions.
pub fn can_approve_submission(user: &User, registration: &Registration) -> bool {
    match user.role {
        UserRole::Admin => true,
        UserRole::Host => user.id == registration.host_id,
        UserRole::Agent => false,
    }
}

/// Registration-level status transitions follow the same ownership rule
/// as submission review.
pub fn can_publish(user: &User, registration: &Registration) -> bool {
    can_approve_submission(user, registration)
}
