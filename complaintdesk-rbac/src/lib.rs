//! Role-based access control for ComplaintDesk
//!
//! This crate answers two questions for every page of the dashboard:
//! - may this role perform an action on a resource
//! - which regions may this role see
//!
//! Both are read from a fixed, total permission matrix that is built once at
//! start-up (from the built-in table or a validated YAML file) and shared by
//! reference afterwards.

pub mod auth;
pub mod config;
pub mod enforcer;
pub mod error;
pub mod models;
pub mod permissions;
pub mod regions;
pub mod roles;

pub use auth::{Session, SessionUser};
pub use config::{RbacConfig, RegionSpec, RoleDefinition};
pub use enforcer::AccessEnforcer;
pub use error::{RbacError, RbacResult};
pub use models::{ActionSet, ActionType, ResourcePermissions, ResourceType};
pub use permissions::{PermissionMatrix, RolePermissions};
pub use regions::{RegionAccess, RegionSet};

/// Re-export commonly used types
pub use complaintdesk_api_types::{Region, RegionScoped, UserRole};
