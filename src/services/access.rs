use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::database::models::FamilyMember;

use super::ServiceError;

pub const NOT_ENOUGH_PERMISSIONS: &str = "Not enough permissions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Superusers may touch anything; everyone else only what they own
pub fn check(caller: &CurrentUser, owner_id: Uuid) -> Access {
    if caller.is_superuser || caller.id == owner_id {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// Owner filter for list queries. `None` means unrestricted.
pub fn list_scope(caller: &CurrentUser) -> Option<Uuid> {
    if caller.is_superuser {
        None
    } else {
        Some(caller.id)
    }
}

pub fn ensure_can_access(caller: &CurrentUser, member: &FamilyMember) -> Result<(), ServiceError> {
    match check(caller, member.owner_id) {
        Access::Allow => Ok(()),
        Access::Deny => {
            tracing::warn!(
                "User {} denied access to familymember {} owned by {}",
                caller.id,
                member.id,
                member.owner_id
            );
            Err(ServiceError::Forbidden(NOT_ENOUGH_PERMISSIONS.to_string()))
        }
    }
}
