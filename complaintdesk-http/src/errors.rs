//! HTTP error types

/// Error type for backend operations
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Backend returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Backend rejected {action}: {message}")]
    Backend { action: String, message: String },

    #[error("No mock response available in offline mode for {method} {url}")]
    NoMock { method: String, url: String },
}
