//! Ollama client — the default local collaborator.
//!
//! Talks to the plain `/api/generate` endpoint with streaming disabled;
//! nothing here depends on Ollama specifically beyond that JSON shape.

use crate::{CompanionClient, CompanionError};
use anyhow::Result;
use reqwest::Client;
use serde_json::{json, Value};
use solace_core::CompanionConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn from_config(config: &CompanionConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait::async_trait]
impl CompanionClient for OllamaClient {
    async fn reply(&self, prompt: &str) -> Result<String, CompanionError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(CompanionError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CompanionError::Api(format!("{status}: {detail}")));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| CompanionError::Malformed(e.to_string()))?;

        value
            .get("response")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| CompanionError::Malformed("missing `response` field".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed_from_base_url() {
        let client =
            OllamaClient::new("http://localhost:11434/", "mistral", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[tokio::test]
    async fn test_unreachable_server_maps_to_unreachable() {
        // Nothing listens on this port
        let client =
            OllamaClient::new("http://127.0.0.1:9", "mistral", Duration::from_secs(1)).unwrap();
        let err = client.reply("hello").await.unwrap_err();
        assert!(matches!(err, CompanionError::Unreachable(_)));
    }
}
