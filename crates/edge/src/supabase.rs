use async_trait::async_trait;
use common::PlatformConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error};

use crate::invoker::{FunctionInvoker, InvokeError, InvokeResponse};

pub const CLIENT_INFO: &str = concat!("ai-services-rs/", env!("CARGO_PKG_VERSION"));

/// HTTP client for Supabase Edge Functions.
///
/// Uses the HTTP client's default timeout; callers never override it.
#[derive(Debug, Clone)]
pub struct SupabaseFunctionsClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl SupabaseFunctionsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, InvokeError> {
        let base_url = base_url.into();
        let api_key = api_key.into();

        if api_key.trim().is_empty() {
            return Err(InvokeError::Configuration(
                "Supabase API key cannot be empty".to_string(),
            ));
        }
        if base_url.trim().is_empty() {
            return Err(InvokeError::Configuration(
                "Supabase URL cannot be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| InvokeError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    pub fn from_config(config: &PlatformConfig) -> Result<Self, InvokeError> {
        Self::new(config.supabase_url.clone(), config.api_key.clone())
    }

    pub fn function_url(&self, function: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url, function)
    }
}

#[async_trait]
impl FunctionInvoker for SupabaseFunctionsClient {
    async fn invoke(&self, function: &str, body: Value) -> Result<Value, InvokeError> {
        let start_time = Instant::now();
        let url = self.function_url(function);

        debug!(function = %function, "Invoking edge function");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .header("x-client-info", CLIENT_INFO)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(function = %function, "Edge function request failed: {}", e);
                InvokeError::Transport(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| InvokeError::Transport(e.to_string()))?;

        debug!(
            function = %function,
            status = status.as_u16(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Edge function responded"
        );

        if !status.is_success() {
            let message = error_message_from_body(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
            });
            error!(function = %function, status = status.as_u16(), "Edge function error: {}", message);
            return Err(InvokeError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        // Plain-text bodies are handed back as strings for salvage upstream
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => InvokeResponse::from_value(value),
            Err(_) => Ok(Value::String(text)),
        }
    }

    fn name(&self) -> &str {
        "supabase"
    }
}

/// Pull a human-readable message out of an error body:
/// `{"error": "..."}`, `{"error": {"message": "..."}}` or `{"message": "..."}`.
fn error_message_from_body(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;

    match value.get("error") {
        Some(Value::String(message)) if !message.is_empty() => return Some(message.clone()),
        Some(Value::Object(obj)) => {
            if let Some(message) = obj.get("message").and_then(Value::as_str) {
                return Some(message.to_string());
            }
        }
        _ => {}
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_is_rejected() {
        let err = SupabaseFunctionsClient::new("https://demo.supabase.co", "").unwrap_err();
        assert!(matches!(err, InvokeError::Configuration(_)));
    }

    #[test]
    fn test_function_url() {
        let client = SupabaseFunctionsClient::new("https://demo.supabase.co/", "key").unwrap();
        assert_eq!(
            client.function_url("policy-impact-simulation"),
            "https://demo.supabase.co/functions/v1/policy-impact-simulation"
        );
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message_from_body(r#"{"error":"OpenAI quota exceeded"}"#),
            Some("OpenAI quota exceeded".to_string())
        );
        assert_eq!(
            error_message_from_body(r#"{"error":{"message":"bad request"}}"#),
            Some("bad request".to_string())
        );
        assert_eq!(
            error_message_from_body(r#"{"message":"not found"}"#),
            Some("not found".to_string())
        );
        assert_eq!(error_message_from_body("<html>"), None);
    }
}
