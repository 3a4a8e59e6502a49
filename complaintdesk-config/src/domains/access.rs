//! Access control configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigResult;
use crate::validation::Validatable;

/// Where the role table comes from and whether decisions are audited
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Log each permission decision at debug level
    #[serde(default = "crate::domains::utils::default_false")]
    pub enable_audit_logging: bool,

    /// YAML role table replacing the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles_file: Option<PathBuf>,
}

impl Validatable for AccessConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(path) = &self.roles_file {
            if path.as_os_str().is_empty() {
                return Err(self.validation_error("roles_file cannot be empty"));
            }
            if !path.is_file() {
                return Err(self.validation_error(format!(
                    "roles_file {} does not exist",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "access"
    }
}
