//! Session context for the logged-in staff member

use complaintdesk_api_types::{Region, RegionScoped, StaffUser, UserRole};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::enforcer::AccessEnforcer;
use crate::error::{RbacError, RbacResult};
use crate::models::{ActionType, ResourceType};
use crate::permissions::RolePermissions;

/// Identity established at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: UserRole,

    /// Home region, used as the default on new complaints
    pub region: Option<Region>,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            region: None,
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Build from a backend staff row. The row's role must be valid; an
    /// unusable region is dropped rather than rejected.
    pub fn from_staff(staff: &StaffUser) -> RbacResult<Self> {
        let role = staff.parsed_role()?;
        Ok(Self {
            id: staff.id_or_unknown().to_string(),
            name: staff.name.clone().unwrap_or_default(),
            role,
            region: staff.validated_region().ok(),
        })
    }
}

/// Authentication context for the dashboard.
///
/// The role is set once on login and cleared on logout. Page-level checks go
/// through here so they never have to pass the role around themselves.
#[derive(Debug, Clone)]
pub struct Session {
    enforcer: AccessEnforcer,
    user: Option<SessionUser>,
}

impl Session {
    pub fn new(enforcer: AccessEnforcer) -> Self {
        Self {
            enforcer,
            user: None,
        }
    }

    pub fn login(&mut self, user: SessionUser) -> RbacResult<()> {
        if let Some(current) = &self.user {
            return Err(RbacError::AlreadyAuthenticated {
                role: current.role.as_str().to_string(),
            });
        }
        info!(user_id = %user.id, role = user.role.as_str(), "User logged in");
        self.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) -> Option<SessionUser> {
        let user = self.user.take();
        if let Some(user) = &user {
            info!(user_id = %user.id, "User logged out");
        }
        user
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn role(&self) -> RbacResult<UserRole> {
        self.user
            .as_ref()
            .map(|user| user.role)
            .ok_or(RbacError::NotAuthenticated)
    }

    pub fn permissions(&self) -> RbacResult<&RolePermissions> {
        Ok(self.enforcer.role_permissions(self.role()?))
    }

    pub fn has_permission(&self, resource: ResourceType, action: ActionType) -> RbacResult<bool> {
        Ok(self.enforcer.has_permission(self.role()?, resource, action))
    }

    pub fn has_permission_str(&self, resource: &str, action: &str) -> RbacResult<bool> {
        let role = self.role()?;
        self.enforcer.has_permission_str(role.as_str(), resource, action)
    }

    /// Logged-out sessions see nothing
    pub fn can_access_region(&self, region: Option<&str>) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| self.enforcer.can_access_region(user.role, region))
    }

    pub fn filter_accessible<T>(&self, records: &[T]) -> Vec<T>
    where
        T: RegionScoped + Clone,
    {
        match &self.user {
            Some(user) => self.enforcer.filter_by_region_access(user.role, records),
            None => Vec::new(),
        }
    }

    pub fn enforcer(&self) -> &AccessEnforcer {
        &self.enforcer
    }
}
