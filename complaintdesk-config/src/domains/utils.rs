//! Serde helpers shared by the configuration domains

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

/// Durations written as whole seconds: `30` or `"30s"`
pub mod serde_duration {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Seconds::deserialize(deserializer)? {
            Seconds::Number(secs) => Ok(Duration::from_secs(secs)),
            Seconds::Text(text) => parse_seconds(&text)
                .map(Duration::from_secs)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid duration '{}'", text))),
        }
    }

    pub(crate) fn parse_seconds(text: &str) -> Option<u64> {
        let text = text.trim();
        text.strip_suffix('s').unwrap_or(text).trim().parse().ok()
    }
}

pub fn default_true() -> bool {
    true
}

pub fn default_false() -> bool {
    false
}
