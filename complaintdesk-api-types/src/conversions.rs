//! Lenient conversions for spreadsheet-backed rows
//!
//! The backend stores everything in sheet cells, so a column that should be
//! text can come back as a number, a boolean, null, or be missing entirely.
//! These helpers never fail on odd cell values; they normalise what they can
//! and drop the rest to `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Text-ish cell: strings pass through, numbers and booleans are rendered,
/// anything else is treated as empty.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Region cell: only a JSON string is kept, verbatim. Numbers, nulls,
/// arrays and objects all become `None` so they can never match a region.
pub fn region_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Active flag: only an explicit boolean `false` deactivates
pub fn active_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(!matches!(value, Value::Bool(false)))
}

/// Parse the timestamp formats the sheet produces
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Deserialize one row. When a field arrives under both its sheet column
/// name (`Region`) and its camelCase name (`region`), the camelCase value is
/// kept, the same one [`RegionScoped`](crate::RegionScoped) reads from raw JSON.
pub fn parse_row<T: DeserializeOwned>(row: Value) -> serde_json::Result<T> {
    match row {
        Value::Object(mut fields) => {
            collapse_aliases(&mut fields);
            serde_json::from_value(Value::Object(fields))
        }
        other => serde_json::from_value(other),
    }
}

/// Deserialize a batch of rows, skipping any row that is not an object of the
/// expected shape. Returns the parsed rows in input order and the skip count.
pub fn parse_rows<T: DeserializeOwned>(rows: Vec<Value>) -> (Vec<T>, usize) {
    let mut parsed = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        if !row.is_object() {
            skipped += 1;
            continue;
        }
        match parse_row(row) {
            Ok(record) => parsed.push(record),
            Err(_) => skipped += 1,
        }
    }

    (parsed, skipped)
}

fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_camel_case(key: &str) -> bool {
    key.starts_with(|c: char| c.is_ascii_lowercase())
}

fn collapse_aliases(fields: &mut Map<String, Value>) {
    let camel: HashSet<String> = fields
        .keys()
        .filter(|key| is_camel_case(key))
        .map(|key| fold_key(key))
        .collect();

    let shadowed: Vec<String> = fields
        .keys()
        .filter(|key| !is_camel_case(key) && camel.contains(&fold_key(key)))
        .cloned()
        .collect();

    for key in shadowed {
        fields.remove(&key);
    }
}
