//! Client for the spreadsheet backend behind the complaint dashboard
//!
//! The backend is a script endpoint that dispatches on an `action` query
//! parameter for reads and an `action` body field for writes. Reads return
//! bare JSON arrays of spreadsheet rows.

pub mod backend;
pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-export main types for convenience
pub use backend::BackendClient;
pub use client::{HttpClient, HttpManager};
pub use config::HttpConfig;
pub use errors::HttpError;
pub use types::{BackendAction, HttpMethod};
