//! Configuration loading and environment variable handling

use crate::domains::access::AccessConfig;
use crate::domains::backend::BackendConfig;
use crate::domains::logging::{LogFormat, LogLevel, LoggingConfig};
use crate::domains::utils::serde_duration::parse_seconds;
use crate::domains::ComplaintDeskConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with the `COMPLAINTDESK` prefix
    pub fn new() -> Self {
        Self {
            prefix: "COMPLAINTDESK".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<ComplaintDeskConfig> {
        let content = std::fs::read_to_string(path)?;
        self.from_yaml_str(&content)
    }

    /// Parse YAML text, then apply environment overrides and validate
    pub fn from_yaml_str(&self, content: &str) -> ConfigResult<ComplaintDeskConfig> {
        let mut config: ComplaintDeskConfig = if content.trim().is_empty() {
            ComplaintDeskConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<ComplaintDeskConfig> {
        let mut config = ComplaintDeskConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load from a file when one is given, otherwise from the environment
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<ComplaintDeskConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    fn apply_env_overrides(&self, config: &mut ComplaintDeskConfig) -> ConfigResult<()> {
        self.apply_logging_overrides(&mut config.logging)?;
        self.apply_backend_overrides(&mut config.backend)?;
        self.apply_access_overrides(&mut config.access)?;
        Ok(())
    }

    fn apply_logging_overrides(&self, config: &mut LoggingConfig) -> ConfigResult<()> {
        if let Some(level) = self.get_env_var("LOG_LEVEL") {
            config.level = LogLevel::from_str(&level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", level)))?;
        }

        if let Some(format) = self.get_env_var("LOG_FORMAT") {
            config.format = LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    fn apply_backend_overrides(&self, config: &mut BackendConfig) -> ConfigResult<()> {
        if let Some(url) = self.get_env_var("BACKEND_URL") {
            config.url = url;
        }

        if let Some(timeout) = self.get_env_var("BACKEND_TIMEOUT") {
            let seconds = parse_seconds(&timeout).ok_or_else(|| {
                ConfigError::EnvError(format!("Invalid BACKEND_TIMEOUT: {}", timeout))
            })?;
            config.timeout = Duration::from_secs(seconds);
        }

        if let Some(user_agent) = self.get_env_var("BACKEND_USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(())
    }

    fn apply_access_overrides(&self, config: &mut AccessConfig) -> ConfigResult<()> {
        if let Some(audit) = self.get_env_var("AUDIT_LOGGING") {
            config.enable_audit_logging = audit
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid AUDIT_LOGGING: {}", e)))?;
        }

        if let Some(path) = self.get_env_var("ROLES_FILE") {
            config.roles_file = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, name)).ok()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
