//! Error types for boundary parsing

use thiserror::Error;

/// A value outside one of the fixed enumerations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// A backend record whose region cannot be trusted.
///
/// These are never fatal: filters treat such records as inaccessible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    /// Region absent, null, or not a string
    #[error("Record {record_id} has no usable region")]
    MissingRegion { record_id: String },

    /// Region is a string but not one of the known regions
    #[error("Record {record_id} has unknown region '{region}'")]
    UnknownRegion { record_id: String, region: String },
}

impl MalformedRecord {
    pub fn record_id(&self) -> &str {
        match self {
            Self::MissingRegion { record_id } | Self::UnknownRegion { record_id, .. } => record_id,
        }
    }
}
