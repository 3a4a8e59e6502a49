//! Error types for RBAC operations

use complaintdesk_api_types::ParseEnumError;
use thiserror::Error;

/// Result type for RBAC operations
pub type RbacResult<T> = Result<T, RbacError>;

/// RBAC-specific errors
#[derive(Error, Debug)]
pub enum RbacError {
    /// Role, resource, action or region name outside the fixed enumerations
    #[error("Invalid argument: unknown {kind} '{value}'")]
    InvalidArgument { kind: &'static str, value: String },

    /// Permission denied
    #[error("Permission denied: {role} may not {action} {resource}")]
    PermissionDenied {
        role: String,
        action: String,
        resource: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// No role has been established for the session
    #[error("No user is logged in")]
    NotAuthenticated,

    /// Login attempted while another role is active
    #[error("Session already authenticated as {role}")]
    AlreadyAuthenticated { role: String },

    /// Role table file could not be read
    #[error("Failed to read role table: {0}")]
    Io(#[from] std::io::Error),

    /// Role table file could not be parsed
    #[error("Failed to parse role table: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RbacError {
    /// Create a new invalid argument error
    pub fn invalid_argument(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidArgument {
            kind,
            value: value.into(),
        }
    }

    /// Create a new permission denied error
    pub fn permission_denied(
        role: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self::PermissionDenied {
            role: role.into(),
            action: action.into(),
            resource: resource.into(),
        }
    }

    /// Create a new invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Check if this is a permission denied error
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if this is a programming error in the caller's arguments
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl From<ParseEnumError> for RbacError {
    fn from(err: ParseEnumError) -> Self {
        Self::InvalidArgument {
            kind: err.kind,
            value: err.value,
        }
    }
}
