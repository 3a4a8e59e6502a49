//! Spreadsheet backend connection configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigResult;
use crate::validation::{validate_http_url, validate_positive, validate_required_string, Validatable};

/// Where and how to reach the backend script (usually via the CORS proxy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Endpoint accepting `?action=...` requests
    pub url: String,

    /// Request timeout
    #[serde(with = "crate::domains::utils::serde_duration")]
    pub timeout: Duration,

    /// Maximum number of redirects to follow (the script host redirects once)
    pub max_redirects: u32,

    /// User agent string
    pub user_agent: String,

    /// Whether to verify SSL certificates
    #[serde(default = "crate::domains::utils::default_true")]
    pub verify_ssl: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:4000/api".to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 5,
            user_agent: format!("complaintdesk/{}", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
        }
    }
}

impl Validatable for BackendConfig {
    fn validate(&self) -> ConfigResult<()> {
        let url = validate_http_url(&self.url, "url", self.domain_name())?;
        validate_positive(self.timeout.as_secs(), "timeout", self.domain_name())?;
        validate_required_string(&self.user_agent, "user_agent", self.domain_name())?;

        if url.scheme() == "http"
            && !matches!(url.host_str(), Some("localhost") | Some("127.0.0.1"))
        {
            log::warn!("Backend URL {} is not using TLS", self.url);
        }
        if !self.verify_ssl {
            log::warn!("SSL verification is disabled for the backend");
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "backend"
    }
}
