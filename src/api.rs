use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;

use crate::data::ModelRecord;

pub const MODELS_URL: &str = "https://openrouter.ai/api/v1/models";

/// Pulls the model catalogue from `url`. One attempt, no retry: callers own
/// their failure handling.
pub fn fetch_models(url: &str, timeout: Duration) -> Result<Vec<ModelRecord>> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("freemodels")
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .context("Failed to fetch model catalogue")?;

    if !response.status().is_success() {
        anyhow::bail!("Catalogue endpoint returned {}", response.status());
    }

    let payload: Value = response
        .json()
        .context("Failed to parse catalogue response")?;

    Ok(extract_records(payload))
}

/// The catalogue wraps its list in a `data` field. A missing or non-array
/// `data` is an empty catalogue, not an error; individual records that fail
/// to deserialize are kept as blank records rather than dropped.
pub fn extract_records(payload: Value) -> Vec<ModelRecord> {
    match payload.get("data").cloned() {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_records_happy_path() {
        let payload = json!({
            "data": [
                {"id": "a/one", "context_length": 1000},
                {"id": "b/two", "name": "Two"}
            ]
        });
        let records = extract_records(payload);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("a/one"));
        assert_eq!(records[1].name.as_deref(), Some("Two"));
    }

    #[test]
    fn test_extract_records_missing_data_field() {
        assert!(extract_records(json!({"models": []})).is_empty());
    }

    #[test]
    fn test_extract_records_non_array_data() {
        assert!(extract_records(json!({"data": "soon"})).is_empty());
    }

    #[test]
    fn test_extract_records_keeps_malformed_entries() {
        let payload = json!({"data": [42, {"id": "ok/one"}]});
        let records = extract_records(payload);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, None);
        assert_eq!(records[1].id.as_deref(), Some("ok/one"));
    }
}
