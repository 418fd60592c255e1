use anyhow::{Context, Result};
use serde_json::Value;
use std::thread;
use std::time::Duration;

/// Settings for the deployment health check. Defaults come from config;
/// CLI flags override per field.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub url: String,
    pub retries: u32,
    pub delay: Duration,
    pub timeout: Duration,
}

/// Polls `url` until it serves a usable catalogue or retries run out.
/// Validates deployment, not application logic: one reachable payload with
/// a non-empty `data` array counts as healthy.
pub fn run(options: &CheckOptions) -> Result<()> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("freemodels-check")
        .timeout(options.timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let mut last_error = None;

    for attempt in 1..=options.retries {
        match attempt_once(&client, &options.url) {
            Ok(count) => {
                println!(
                    "Health check passed on attempt {}: {} ({} models)",
                    attempt, options.url, count
                );
                return Ok(());
            }
            Err(err) => {
                eprintln!(
                    "Attempt {}/{} failed for {}: {}",
                    attempt, options.retries, options.url, err
                );
                last_error = Some(err);
                if attempt < options.retries {
                    thread::sleep(options.delay);
                }
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| anyhow::anyhow!("no attempts made"))
        .context(format!("Health check failed for {}", options.url)))
}

fn attempt_once(client: &reqwest::blocking::Client, url: &str) -> Result<usize> {
    let response = client.get(url).send().context("request failed")?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {}", response.status());
    }

    let payload: Value = response.json().context("body is not JSON")?;
    validate_payload(&payload)
}

/// The marker we require of a healthy deployment: a `data` array with at
/// least one entry.
pub fn validate_payload(payload: &Value) -> Result<usize> {
    match payload.get("data") {
        Some(Value::Array(entries)) if !entries.is_empty() => Ok(entries.len()),
        Some(Value::Array(_)) => anyhow::bail!("catalogue is empty"),
        _ => anyhow::bail!("payload has no data array"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_payload_accepts_populated_catalogue() {
        let payload = json!({"data": [{"id": "a/one"}]});
        assert_eq!(validate_payload(&payload).unwrap(), 1);
    }

    #[test]
    fn test_validate_payload_rejects_empty_catalogue() {
        assert!(validate_payload(&json!({"data": []})).is_err());
    }

    #[test]
    fn test_validate_payload_rejects_missing_data() {
        assert!(validate_payload(&json!({"status": "ok"})).is_err());
        assert!(validate_payload(&json!({"data": "none"})).is_err());
    }
}
