//! Where list commands get their rows from

use anyhow::{Context, Result};
use complaintdesk_api_types::{parse_rows, Complaint, StaffUser};
use complaintdesk_config::ComplaintDeskConfig;
use complaintdesk_http::BackendClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A JSON export on disk, or the live backend
pub enum RowSource {
    File(PathBuf),
    Backend(BackendClient),
}

impl RowSource {
    pub fn new(input: Option<&PathBuf>, config: &ComplaintDeskConfig) -> Result<Self> {
        match input {
            Some(path) => Ok(RowSource::File(path.clone())),
            None => {
                let client = BackendClient::from_config(config.backend.clone().into())
                    .context("Failed to create backend client")?;
                Ok(RowSource::Backend(client))
            }
        }
    }

    pub async fn complaints(&self) -> Result<Vec<Complaint>> {
        match self {
            RowSource::File(path) => read_rows(path),
            RowSource::Backend(client) => client
                .get_complaints()
                .await
                .context("Failed to fetch complaints from backend"),
        }
    }

    pub async fn users(&self) -> Result<Vec<StaffUser>> {
        match self {
            RowSource::File(path) => read_rows(path),
            RowSource::Backend(client) => client
                .get_users()
                .await
                .context("Failed to fetch users from backend"),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            RowSource::File(path) => path.display().to_string(),
            RowSource::Backend(client) => client.client().config().base_url.clone(),
        }
    }
}

/// Rows from a JSON export. A document that is not an array yields no rows,
/// matching how backend responses are treated.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let rows = match document {
        Value::Array(rows) => rows,
        _ => {
            warn!("{} does not contain a JSON array, treating as empty", path.display());
            return Ok(Vec::new());
        }
    };

    let (records, skipped) = parse_rows(rows);
    if skipped > 0 {
        warn!(skipped, "Skipped rows that could not be parsed");
    }
    info!(rows = records.len(), "Loaded rows from {}", path.display());
    Ok(records)
}
