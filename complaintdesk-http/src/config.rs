//! HTTP configuration

use complaintdesk_config::BackendConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Backend endpoint
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// Maximum number of redirects to follow
    pub max_redirects: u32,

    /// User agent string
    pub user_agent: String,

    /// Whether to verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        BackendConfig::default().into()
    }
}

impl From<BackendConfig> for HttpConfig {
    fn from(config: BackendConfig) -> Self {
        Self {
            base_url: config.url,
            timeout: config.timeout,
            max_redirects: config.max_redirects,
            user_agent: config.user_agent,
            verify_ssl: config.verify_ssl,
        }
    }
}
