//! The role permission matrix

use complaintdesk_api_types::{Region, UserRole};
use serde::Serialize;

use crate::error::{RbacError, RbacResult};
use crate::models::{ActionSet, ActionType, ResourcePermissions, ResourceType};
use crate::regions::{RegionAccess, RegionSet};

/// Everything a single role is allowed to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePermissions {
    pub role: UserRole,
    pub resources: ResourcePermissions,
    pub can_assign_complaint: bool,
    pub can_set_high_priority: bool,
    pub accessible_regions: RegionAccess,
}

impl RolePermissions {
    pub fn allows(&self, resource: ResourceType, action: ActionType) -> bool {
        self.resources.allows(resource, action)
    }
}

/// Total role × resource × action table.
///
/// Holds exactly one row per role, stored in `UserRole::ALL` order. The
/// only ways to obtain one are [`PermissionMatrix::builtin`] and
/// [`PermissionMatrix::from_rows`], both of which uphold that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionMatrix {
    rows: Vec<RolePermissions>,
}

impl PermissionMatrix {
    /// Assemble a matrix, requiring exactly one row for every role
    pub fn from_rows(rows: impl IntoIterator<Item = RolePermissions>) -> RbacResult<Self> {
        let mut slots: [Option<RolePermissions>; 5] = Default::default();

        for row in rows {
            let slot = &mut slots[role_index(row.role)];
            if slot.is_some() {
                return Err(RbacError::invalid_config(format!(
                    "role '{}' is defined more than once",
                    row.role
                )));
            }
            *slot = Some(row);
        }

        let mut ordered = Vec::with_capacity(UserRole::ALL.len());
        for (role, slot) in UserRole::ALL.into_iter().zip(slots) {
            let row = slot.ok_or_else(|| {
                RbacError::invalid_config(format!("role '{}' has no permission entry", role))
            })?;
            ordered.push(row);
        }

        Ok(Self { rows: ordered })
    }

    /// The dashboard's built-in role table
    pub fn builtin() -> Self {
        let addis_only = RegionAccess::Only(RegionSet::single(Region::AddisAbaba));

        let rows = vec![
            RolePermissions {
                role: UserRole::Admin,
                resources: ResourcePermissions {
                    complaints: ActionSet::ALL,
                    users: ActionSet::ALL,
                    reports: ActionSet::ALL,
                    settings: ActionSet::ALL,
                },
                can_assign_complaint: true,
                can_set_high_priority: true,
                accessible_regions: RegionAccess::All,
            },
            RolePermissions {
                role: UserRole::Manager,
                resources: ResourcePermissions {
                    complaints: ActionSet::new(true, true, true, false),
                    users: ActionSet::new(true, true, true, false),
                    reports: ActionSet::new(true, true, false, false),
                    settings: ActionSet::READ_ONLY,
                },
                can_assign_complaint: true,
                can_set_high_priority: true,
                accessible_regions: RegionAccess::All,
            },
            RolePermissions {
                role: UserRole::Foreman,
                resources: ResourcePermissions {
                    complaints: ActionSet::new(true, true, true, false),
                    users: ActionSet::READ_ONLY,
                    reports: ActionSet::READ_ONLY,
                    settings: ActionSet::NONE,
                },
                can_assign_complaint: true,
                can_set_high_priority: true,
                accessible_regions: addis_only.clone(),
            },
            RolePermissions {
                role: UserRole::CallAttendant,
                resources: ResourcePermissions {
                    complaints: ActionSet::new(true, true, true, false),
                    users: ActionSet::NONE,
                    reports: ActionSet::NONE,
                    settings: ActionSet::NONE,
                },
                can_assign_complaint: false,
                can_set_high_priority: false,
                accessible_regions: RegionAccess::All,
            },
            RolePermissions {
                role: UserRole::Technician,
                resources: ResourcePermissions {
                    complaints: ActionSet::new(false, true, true, false),
                    users: ActionSet::NONE,
                    reports: ActionSet::NONE,
                    settings: ActionSet::NONE,
                },
                can_assign_complaint: false,
                can_set_high_priority: false,
                accessible_regions: addis_only,
            },
        ];

        Self { rows }
    }

    pub fn role(&self, role: UserRole) -> &RolePermissions {
        &self.rows[role_index(role)]
    }

    pub fn allows(&self, role: UserRole, resource: ResourceType, action: ActionType) -> bool {
        self.role(role).allows(resource, action)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RolePermissions> {
        self.rows.iter()
    }
}

impl Default for PermissionMatrix {
    fn default() -> Self {
        Self::builtin()
    }
}

fn role_index(role: UserRole) -> usize {
    match role {
        UserRole::Admin => 0,
        UserRole::Manager => 1,
        UserRole::Foreman => 2,
        UserRole::CallAttendant => 3,
        UserRole::Technician => 4,
    }
}
