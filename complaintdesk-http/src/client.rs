//! HTTP client implementation

use crate::config::HttpConfig;
use crate::errors::HttpError;
use crate::types::HttpMethod;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// HTTP client trait for making JSON requests
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    async fn call_http(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&JsonValue>,
    ) -> Result<JsonValue, HttpError>;
}

/// HTTP Manager for handling HTTP requests with mock support
#[derive(Debug, Clone)]
pub struct HttpManager {
    offline: bool,
    mocks: HashMap<String, JsonValue>,
    client: Client,
    config: HttpConfig,
}

impl HttpManager {
    /// Create a manager in online mode
    pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
        debug!(
            "Creating HttpManager with timeout: {}s",
            config.timeout.as_secs()
        );
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .redirect(reqwest::redirect::Policy::limited(
                config.max_redirects as usize,
            ))
            .build()?;

        Ok(Self {
            offline: false,
            mocks: HashMap::new(),
            client,
            config,
        })
    }

    /// Create a manager that only answers from registered mocks
    pub fn offline(config: HttpConfig) -> Result<Self, HttpError> {
        let mut manager = Self::new(config)?;
        manager.set_offline();
        Ok(manager)
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Set offline mode
    pub fn set_offline(&mut self) {
        self.offline = true;
        debug!("HttpManager set to offline mode");
    }

    /// Add a mock response, keyed by method and full URL
    pub fn add_mock(&mut self, method: HttpMethod, url: &str, response: JsonValue) {
        self.mocks.insert(mock_key(method, url), response);
        debug!("Added HTTP mock for {} {}", method, url);
    }

    /// Clear all mocks
    pub fn clear_mocks(&mut self) {
        self.mocks.clear();
        debug!("Cleared all HTTP mocks");
    }

    fn mock_response(&self, method: HttpMethod, url: &str) -> Result<JsonValue, HttpError> {
        self.mocks
            .get(&mock_key(method, url))
            .cloned()
            .ok_or_else(|| HttpError::NoMock {
                method: method.to_string(),
                url: url.to_string(),
            })
    }
}

fn mock_key(method: HttpMethod, url: &str) -> String {
    format!("{}:{}", method.as_str(), url)
}

#[async_trait::async_trait]
impl HttpClient for HttpManager {
    async fn call_http(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&JsonValue>,
    ) -> Result<JsonValue, HttpError> {
        if self.offline {
            debug!("Offline mode enabled, answering {} {} from mocks", method, url);
            return self.mock_response(method, url);
        }

        info!("Making HTTP request to: {}", url);
        let mut request = self.client.request(method.into(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("HTTP response received: {}", status);

        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        match serde_json::from_str(&text) {
            Ok(json) => Ok(json),
            Err(e) => {
                warn!("Backend response from {} is not JSON ({} bytes)", url, text.len());
                Err(HttpError::InvalidJson(e))
            }
        }
    }
}
