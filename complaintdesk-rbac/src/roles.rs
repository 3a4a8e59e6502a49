//! Role granting rules and permission string parsing

use complaintdesk_api_types::UserRole;

use crate::error::{RbacError, RbacResult};
use crate::models::{ActionType, ResourceType};

/// Parse an `action:resource` permission string
pub fn parse_permission_string(perm_str: &str) -> RbacResult<(ActionType, ResourceType)> {
    let Some((action, resource)) = perm_str.split_once(':') else {
        return Err(RbacError::invalid_config(format!(
            "Invalid permission format: '{}'. Expected 'action:resource'",
            perm_str
        )));
    };

    Ok((action.trim().parse()?, resource.trim().parse()?))
}

/// Whether `actor` may hand out `target` when creating or editing staff.
///
/// Field roles can be granted by anyone managing users; manager needs an
/// admin or manager; admin can only be granted by an admin.
pub fn can_grant(actor: UserRole, target: UserRole) -> bool {
    match target {
        UserRole::Technician | UserRole::CallAttendant | UserRole::Foreman => true,
        UserRole::Manager => matches!(actor, UserRole::Admin | UserRole::Manager),
        UserRole::Admin => actor == UserRole::Admin,
    }
}

/// Roles `actor` may hand out, in the order the user form lists them
pub fn assignable_roles(actor: UserRole) -> Vec<UserRole> {
    [
        UserRole::Technician,
        UserRole::CallAttendant,
        UserRole::Foreman,
        UserRole::Manager,
        UserRole::Admin,
    ]
    .into_iter()
    .filter(|target| can_grant(actor, *target))
    .collect()
}

/// Only admins and managers see the role editor
pub fn can_edit_roles(actor: UserRole) -> bool {
    matches!(actor, UserRole::Admin | UserRole::Manager)
}
