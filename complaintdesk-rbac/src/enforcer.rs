//! Access decisions over the permission matrix
//!
//! Every method here is a pure read of the shared matrix. The enforcer is
//! cheap to clone and safe to share across threads; nothing in it is ever
//! mutated after construction.

use complaintdesk_api_types::{ComplaintPriority, RegionScoped, UserRole};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::RbacConfig;
use crate::error::{RbacError, RbacResult};
use crate::models::{ActionType, ResourceType};
use crate::permissions::{PermissionMatrix, RolePermissions};
use crate::regions::RegionAccess;
use crate::roles;

/// Access control engine
#[derive(Debug, Clone)]
pub struct AccessEnforcer {
    matrix: Arc<PermissionMatrix>,
    audit: bool,
}

impl AccessEnforcer {
    /// Create an enforcer over an already validated matrix
    pub fn new(matrix: PermissionMatrix) -> Self {
        Self {
            matrix: Arc::new(matrix),
            audit: false,
        }
    }

    /// Enforcer over the built-in role table
    pub fn builtin() -> Self {
        Self::new(PermissionMatrix::builtin())
    }

    /// Build and validate the matrix described by `config`
    pub fn from_config(config: &RbacConfig) -> RbacResult<Self> {
        let matrix = config.build_matrix()?;
        debug!("Permission matrix built for {} roles", UserRole::ALL.len());
        Ok(Self {
            matrix: Arc::new(matrix),
            audit: config.enable_audit_logging,
        })
    }

    /// Enable or disable debug logging of each decision
    pub fn with_audit_logging(mut self, enabled: bool) -> Self {
        self.audit = enabled;
        self
    }

    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    pub fn role_permissions(&self, role: UserRole) -> &RolePermissions {
        self.matrix.role(role)
    }

    /// Check if `role` may perform `action` on `resource`
    pub fn has_permission(&self, role: UserRole, resource: ResourceType, action: ActionType) -> bool {
        let allowed = self.matrix.allows(role, resource, action);
        if self.audit {
            debug!(
                role = role.as_str(),
                resource = resource.as_str(),
                action = action.as_str(),
                allowed,
                "Permission decision"
            );
        }
        allowed
    }

    /// Same as [`Self::has_permission`] for untrusted names.
    ///
    /// Unknown names are a caller bug and are returned as `InvalidArgument`
    /// rather than being read as "denied".
    pub fn has_permission_str(&self, role: &str, resource: &str, action: &str) -> RbacResult<bool> {
        let parsed = parse_role(role).and_then(|role| {
            let resource: ResourceType = resource.parse()?;
            let action: ActionType = action.parse()?;
            Ok((role, resource, action))
        });

        match parsed {
            Ok((role, resource, action)) => Ok(self.has_permission(role, resource, action)),
            Err(e) => {
                warn!("Rejected permission check: {}", e);
                Err(e)
            }
        }
    }

    /// Fail with `PermissionDenied` unless the permission is granted
    pub fn check(&self, role: UserRole, resource: ResourceType, action: ActionType) -> RbacResult<()> {
        if self.has_permission(role, resource, action) {
            Ok(())
        } else {
            Err(RbacError::permission_denied(
                role.as_str(),
                action.as_str(),
                resource.as_str(),
            ))
        }
    }

    pub fn accessible_regions(&self, role: UserRole) -> &RegionAccess {
        &self.matrix.role(role).accessible_regions
    }

    pub fn accessible_regions_str(&self, role: &str) -> RbacResult<&RegionAccess> {
        let role = parse_role(role).inspect_err(|e| warn!("Rejected region lookup: {}", e))?;
        Ok(self.accessible_regions(role))
    }

    /// Whether a record with this raw region value is visible to `role`.
    ///
    /// Never fails: missing or unknown regions are simply not visible to
    /// restricted roles.
    pub fn can_access_region(&self, role: UserRole, region: Option<&str>) -> bool {
        self.accessible_regions(role).allows(region)
    }

    /// Records visible to `role`, cloned, in their original order
    pub fn filter_by_region_access<T>(&self, role: UserRole, records: &[T]) -> Vec<T>
    where
        T: RegionScoped + Clone,
    {
        self.filter_refs(role, records).into_iter().cloned().collect()
    }

    /// Borrowing variant of [`Self::filter_by_region_access`]
    pub fn filter_refs<'a, T>(&self, role: UserRole, records: &'a [T]) -> Vec<&'a T>
    where
        T: RegionScoped,
    {
        let access = self.accessible_regions(role);
        let mut visible = Vec::with_capacity(records.len());
        let mut malformed = 0;

        for record in records {
            match record.region() {
                None => malformed += 1,
                region if access.allows(region) => visible.push(record),
                _ => {}
            }
        }

        if malformed > 0 {
            debug!("Excluded {} records without a usable region", malformed);
        }
        if self.audit {
            debug!(
                role = role.as_str(),
                total = records.len(),
                visible = visible.len(),
                "Region filter applied"
            );
        }

        visible
    }

    pub fn can_assign_complaint(&self, role: UserRole) -> bool {
        self.matrix.role(role).can_assign_complaint
    }

    pub fn can_set_high_priority(&self, role: UserRole) -> bool {
        self.matrix.role(role).can_set_high_priority
    }

    /// Priorities `role` may choose when filing a complaint
    pub fn available_priorities(&self, role: UserRole) -> Vec<ComplaintPriority> {
        if self.can_set_high_priority(role) {
            ComplaintPriority::ALL.to_vec()
        } else {
            vec![ComplaintPriority::Low, ComplaintPriority::Medium]
        }
    }

    /// Validate that `actor` may give a staff member the role `target`
    pub fn check_role_change(&self, actor: UserRole, target: UserRole) -> RbacResult<()> {
        self.check(actor, ResourceType::Users, ActionType::Update)?;
        if !roles::can_edit_roles(actor) || !roles::can_grant(actor, target) {
            return Err(RbacError::permission_denied(
                actor.as_str(),
                format!("grant role {}", target),
                ResourceType::Users.as_str(),
            ));
        }
        Ok(())
    }
}

impl Default for AccessEnforcer {
    fn default() -> Self {
        Self::builtin()
    }
}

fn parse_role(role: &str) -> RbacResult<UserRole> {
    Ok(role.parse::<UserRole>()?)
}

/// Return `PermissionDenied` from the enclosing function unless granted
#[macro_export]
macro_rules! require_permission {
    ($enforcer:expr, $role:expr, $resource:expr, $action:expr) => {
        $enforcer.check($role, $resource, $action)?
    };
}
