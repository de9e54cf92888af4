pub mod birdeye;
pub mod dexscreener;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::error::ProviderError;

/// Shared HTTP client for all providers. Connections are pooled by reqwest.
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("Failed to create HTTP client")
}

/// Turns a provider response into a typed payload, mapping every way the
/// response can be unusable onto a `ProviderError`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body: truncate(&body, 200),
        });
    }

    let body = response.text().await?;
    if body.trim().is_empty() {
        return Err(ProviderError::EmptyBody);
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
}

/// Providers send figures either as JSON numbers or as decimal strings.
pub fn figure(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_figure_accepts_numbers_and_strings() {
        assert_eq!(figure(Some(&json!(1000.5))), Some(1000.5));
        assert_eq!(figure(Some(&json!("1000.5"))), Some(1000.5));
        assert_eq!(figure(Some(&json!(" 42 "))), Some(42.0));
        assert_eq!(figure(Some(&json!("1,250.75"))), Some(1250.75));
    }

    #[test]
    fn test_figure_rejects_garbage() {
        assert_eq!(figure(None), None);
        assert_eq!(figure(Some(&json!(null))), None);
        assert_eq!(figure(Some(&json!("abc"))), None);
        assert_eq!(figure(Some(&json!({"usd": 1}))), None);
        assert_eq!(figure(Some(&json!("NaN"))), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
    }
}
