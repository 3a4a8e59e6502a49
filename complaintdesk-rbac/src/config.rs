//! Configuration for RBAC system
//!
//! The role table can be replaced by a YAML file of the form:
//!
//! ```yaml
//! enable_audit_logging: true
//! roles:
//!   admin:
//!     permissions: ["create:complaints", "read:complaints"]
//!     can_assign_complaint: true
//!     can_set_high_priority: true
//!     accessible_regions: all
//!   technician:
//!     permissions: ["read:complaints"]
//!     accessible_regions: ["Addis Ababa"]
//! ```
//!
//! Every role must be listed. Anything a role's `permissions` does not grant
//! becomes an explicit `false` in the resulting matrix.

use complaintdesk_api_types::UserRole;
use complaintdesk_config::AccessConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{RbacError, RbacResult};
use crate::models::ResourcePermissions;
use crate::permissions::{PermissionMatrix, RolePermissions};
use crate::regions::{RegionAccess, RegionSet};
use crate::roles::parse_permission_string;

const ALL_REGIONS_KEYWORD: &str = "all";

/// Region access as written in configuration: `all` or a list of names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegionSpec {
    Keyword(String),
    List(Vec<String>),
}

impl RegionSpec {
    pub fn all() -> Self {
        Self::Keyword(ALL_REGIONS_KEYWORD.to_string())
    }

    fn to_access(&self) -> RbacResult<RegionAccess> {
        match self {
            Self::Keyword(word) if word == ALL_REGIONS_KEYWORD => Ok(RegionAccess::All),
            Self::Keyword(word) => Err(RbacError::invalid_config(format!(
                "accessible_regions must be '{}' or a list of regions, got '{}'",
                ALL_REGIONS_KEYWORD, word
            ))),
            Self::List(names) => Ok(RegionAccess::Only(RegionSet::from_names(names)?)),
        }
    }
}

impl From<&RegionAccess> for RegionSpec {
    fn from(access: &RegionAccess) -> Self {
        match access {
            RegionAccess::All => Self::all(),
            RegionAccess::Only(set) => {
                Self::List(set.iter().map(|region| region.as_str().to_string()).collect())
            }
        }
    }
}

/// Role definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Granted `action:resource` pairs
    #[serde(default)]
    pub permissions: Vec<String>,

    #[serde(default)]
    pub can_assign_complaint: bool,

    #[serde(default)]
    pub can_set_high_priority: bool,

    pub accessible_regions: RegionSpec,
}

impl RoleDefinition {
    fn to_role_permissions(&self, role: UserRole) -> RbacResult<RolePermissions> {
        let mut resources = ResourcePermissions::default();
        for perm in &self.permissions {
            let (action, resource) = parse_permission_string(perm).map_err(|e| {
                RbacError::invalid_config(format!("role '{}': {}", role, e))
            })?;
            resources.get_mut(resource).set(action, true);
        }

        let accessible_regions = self
            .accessible_regions
            .to_access()
            .map_err(|e| RbacError::invalid_config(format!("role '{}': {}", role, e)))?;

        Ok(RolePermissions {
            role,
            resources,
            can_assign_complaint: self.can_assign_complaint,
            can_set_high_priority: self.can_set_high_priority,
            accessible_regions,
        })
    }
}

impl From<&RolePermissions> for RoleDefinition {
    fn from(row: &RolePermissions) -> Self {
        Self {
            permissions: row.resources.to_permission_strings(),
            can_assign_complaint: row.can_assign_complaint,
            can_set_high_priority: row.can_set_high_priority,
            accessible_regions: RegionSpec::from(&row.accessible_regions),
        }
    }
}

/// RBAC configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RbacConfig {
    /// Log every access decision at debug level
    pub enable_audit_logging: bool,

    /// Role table keyed by role wire name
    pub roles: BTreeMap<String, RoleDefinition>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        let roles = PermissionMatrix::builtin()
            .iter()
            .map(|row| (row.role.as_str().to_string(), RoleDefinition::from(row)))
            .collect();

        Self {
            enable_audit_logging: false,
            roles,
        }
    }
}

impl RbacConfig {
    pub fn from_yaml_str(yaml: &str) -> RbacResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a role table file
    pub fn from_file(path: impl AsRef<Path>) -> RbacResult<Self> {
        let path = path.as_ref();
        debug!("Loading role table from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Resolve the `access` configuration domain
    pub fn from_access_config(access: &AccessConfig) -> RbacResult<Self> {
        let mut config = match &access.roles_file {
            Some(path) => {
                info!("Using role table from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.enable_audit_logging = access.enable_audit_logging;
        Ok(config)
    }

    /// Build and validate the total permission matrix
    pub fn build_matrix(&self) -> RbacResult<PermissionMatrix> {
        let rows = self
            .roles
            .iter()
            .map(|(name, definition)| {
                let role: UserRole = name
                    .parse()
                    .map_err(|e| RbacError::invalid_config(format!("roles: {}", e)))?;
                definition.to_role_permissions(role)
            })
            .collect::<RbacResult<Vec<_>>>()?;

        PermissionMatrix::from_rows(rows)
    }

    pub fn to_yaml(&self) -> RbacResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionType, ResourceType};
    use complaintdesk_api_types::Region;
    use std::io::Write;

    #[test]
    fn test_default_config_builds_builtin_matrix() {
        let config = RbacConfig::default();
        assert_eq!(config.roles.len(), 5);
        assert_eq!(config.build_matrix().unwrap(), PermissionMatrix::builtin());
    }

    #[test]
    fn test_yaml_round_trip_preserves_matrix() {
        let yaml = RbacConfig::default().to_yaml().unwrap();
        let parsed = RbacConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.build_matrix().unwrap(), PermissionMatrix::builtin());
    }

    #[test]
    fn test_missing_roles_section_falls_back_to_builtin() {
        let config = RbacConfig::from_yaml_str("enable_audit_logging: true\n").unwrap();
        assert!(config.enable_audit_logging);
        assert_eq!(config.build_matrix().unwrap(), PermissionMatrix::builtin());
    }

    fn full_yaml(technician_regions: &str) -> String {
        format!(
            r#"
roles:
  admin:
    permissions: ["create:users", "read:users", "update:users", "delete:users"]
    accessible_regions: all
  manager:
    permissions: ["read:reports"]
    accessible_regions: all
  foreman:
    permissions: ["read:complaints"]
    accessible_regions: ["Oromia", "Amhara", "Oromia"]
  call-attendant:
    permissions: []
    accessible_regions: all
  technician:
    permissions: ["read:complaints"]
    accessible_regions: {}
"#,
            technician_regions
        )
    }

    #[test]
    fn test_custom_table_is_total() {
        let config = RbacConfig::from_yaml_str(&full_yaml("[\"Sidama\"]")).unwrap();
        let matrix = config.build_matrix().unwrap();

        assert!(matrix.allows(UserRole::Admin, ResourceType::Users, ActionType::Delete));
        assert!(!matrix.allows(UserRole::Admin, ResourceType::Complaints, ActionType::Read));
        assert!(!matrix.allows(UserRole::CallAttendant, ResourceType::Complaints, ActionType::Read));

        let foreman = matrix.role(UserRole::Foreman);
        let regions = foreman.accessible_regions.regions().unwrap();
        assert_eq!(regions.len(), 2);
        assert!(regions.contains(Region::Oromia));
    }

    #[test]
    fn test_missing_role_is_rejected() {
        let yaml = r#"
roles:
  admin:
    permissions: []
    accessible_regions: all
"#;
        let err = RbacConfig::from_yaml_str(yaml).unwrap().build_matrix().unwrap_err();
        assert!(matches!(err, RbacError::InvalidConfig { .. }));
    }

    #[test]
    fn test_bad_entries_are_rejected() {
        for regions in ["[]", "[\"Atlantis\"]", "everywhere"] {
            let config = RbacConfig::from_yaml_str(&full_yaml(regions)).unwrap();
            let err = config.build_matrix().unwrap_err();
            assert!(
                matches!(err, RbacError::InvalidConfig { .. }),
                "expected config error for {}",
                regions
            );
        }

        let bad_perm = full_yaml("all").replace("read:reports", "read:notifications");
        let err = RbacConfig::from_yaml_str(&bad_perm)
            .unwrap()
            .build_matrix()
            .unwrap_err();
        assert!(err.to_string().contains("notifications"));

        let bad_role = full_yaml("all").replace("call-attendant:", "operator:");
        let err = RbacConfig::from_yaml_str(&bad_role)
            .unwrap()
            .build_matrix()
            .unwrap_err();
        assert!(err.to_string().contains("operator"));
    }

    #[test]
    fn test_from_access_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(full_yaml("[\"Harari\"]").as_bytes()).unwrap();

        let access = AccessConfig {
            enable_audit_logging: true,
            roles_file: Some(file.path().to_path_buf()),
        };
        let config = RbacConfig::from_access_config(&access).unwrap();
        assert!(config.enable_audit_logging);

        let matrix = config.build_matrix().unwrap();
        assert_eq!(
            matrix.role(UserRole::Technician).accessible_regions.expand(),
            vec![Region::Harari]
        );
    }
}
