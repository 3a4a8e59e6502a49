//! Typed calls against the backend script

use complaintdesk_api_types::{parse_row, parse_rows, Complaint, StaffUser};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, warn};
use url::Url;

use crate::client::{HttpClient, HttpManager};
use crate::config::HttpConfig;
use crate::errors::HttpError;
use crate::types::{BackendAction, HttpMethod};

/// Backend facade over any [`HttpClient`]
#[derive(Debug, Clone)]
pub struct BackendClient<C = HttpManager> {
    client: C,
    base_url: Url,
}

impl BackendClient<HttpManager> {
    /// Build a client talking to the configured endpoint
    pub fn from_config(config: HttpConfig) -> Result<Self, HttpError> {
        let base_url = config.base_url.clone();
        Self::new(HttpManager::new(config)?, &base_url)
    }
}

impl<C: HttpClient> BackendClient<C> {
    pub fn new(client: C, base_url: &str) -> Result<Self, HttpError> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// URL for a read action, e.g. `.../api?action=getComplaints`
    pub fn action_url(&self, action: BackendAction, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("action", action.as_str());
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        url
    }

    /// Rows returned by a list action. Anything other than a JSON array is
    /// treated as an empty list.
    pub async fn fetch_rows(&self, action: BackendAction) -> Result<Vec<JsonValue>, HttpError> {
        let url = self.action_url(action, &[]);
        match self.client.call_http(HttpMethod::Get, url.as_str(), None).await? {
            JsonValue::Array(rows) => {
                debug!(action = action.as_str(), rows = rows.len(), "Fetched rows");
                Ok(rows)
            }
            other => {
                warn!(
                    action = action.as_str(),
                    "Backend returned {} instead of an array, treating as empty",
                    json_kind(&other)
                );
                Ok(Vec::new())
            }
        }
    }

    pub async fn get_complaints(&self) -> Result<Vec<Complaint>, HttpError> {
        self.fetch_typed(BackendAction::GetComplaints).await
    }

    pub async fn get_users(&self) -> Result<Vec<StaffUser>, HttpError> {
        self.fetch_typed(BackendAction::GetUsers).await
    }

    /// Single complaint by id. Older backends answer with the whole list, in
    /// which case the matching row is picked out.
    pub async fn get_complaint(&self, id: &str) -> Result<Option<Complaint>, HttpError> {
        let url = self.action_url(BackendAction::GetComplaint, &[("id", id)]);
        let response = self.client.call_http(HttpMethod::Get, url.as_str(), None).await?;

        let row = match response {
            JsonValue::Object(ref fields) if fields.contains_key("ID") || fields.contains_key("id") => {
                Some(response)
            }
            JsonValue::Array(rows) => rows.into_iter().find(|row| row_id(row) == Some(id)),
            _ => None,
        };

        row.map(parse_row).transpose().map_err(HttpError::from)
    }

    /// Send a write action. `fields` must be a JSON object; the `action` key
    /// is filled in here.
    pub async fn post_action(
        &self,
        action: BackendAction,
        fields: Map<String, JsonValue>,
    ) -> Result<JsonValue, HttpError> {
        let mut body = fields;
        body.insert("action".to_string(), JsonValue::from(action.as_str()));
        let body = JsonValue::Object(body);

        let response = self
            .client
            .call_http(action.method(), self.base_url.as_str(), Some(&body))
            .await?;

        if let Some(message) = response.get("error").and_then(JsonValue::as_str) {
            return Err(HttpError::Backend {
                action: action.as_str().to_string(),
                message: message.to_string(),
            });
        }
        Ok(response)
    }

    /// Returns the id assigned by the backend, when it reports one
    pub async fn create_complaint(
        &self,
        fields: Map<String, JsonValue>,
    ) -> Result<Option<String>, HttpError> {
        let response = self.post_action(BackendAction::CreateComplaint, fields).await?;
        Ok(row_id(&response).map(str::to_string))
    }

    pub async fn delete_complaint(&self, id: &str) -> Result<(), HttpError> {
        let mut fields = Map::new();
        fields.insert("id".to_string(), JsonValue::from(id));
        self.post_action(BackendAction::DeleteComplaint, fields).await?;
        Ok(())
    }

    async fn fetch_typed<T: DeserializeOwned>(&self, action: BackendAction) -> Result<Vec<T>, HttpError> {
        let rows = self.fetch_rows(action).await?;
        let (records, skipped) = parse_rows(rows);
        if skipped > 0 {
            warn!(action = action.as_str(), skipped, "Skipped rows that could not be parsed");
        }
        Ok(records)
    }
}

fn row_id(row: &JsonValue) -> Option<&str> {
    row.get("ID")
        .or_else(|| row.get("id"))
        .and_then(JsonValue::as_str)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
