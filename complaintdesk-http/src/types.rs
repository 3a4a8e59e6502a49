//! HTTP and backend action types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Methods the backend understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Actions dispatched by the backend script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendAction {
    GetComplaints,
    GetComplaint,
    GetUsers,
    CreateComplaint,
    DeleteComplaint,
}

impl BackendAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendAction::GetComplaints => "getComplaints",
            BackendAction::GetComplaint => "getComplaint",
            BackendAction::GetUsers => "getUsers",
            BackendAction::CreateComplaint => "createComplaint",
            BackendAction::DeleteComplaint => "deleteComplaint",
        }
    }

    /// Reads go in the query string, writes in a JSON body
    pub fn method(&self) -> HttpMethod {
        match self {
            BackendAction::GetComplaints | BackendAction::GetComplaint | BackendAction::GetUsers => {
                HttpMethod::Get
            }
            BackendAction::CreateComplaint | BackendAction::DeleteComplaint => HttpMethod::Post,
        }
    }
}

impl fmt::Display for BackendAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
