//! Gemini client for the Google Generative Language API.
//!
//! Calls `models/{model}:generateContent` with the API key as a query
//! parameter. No streaming, no function calling; one prompt in, one text
//! completion out.

use crate::error::{AskDbError, Result};
use crate::llm::TextGenerator;
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// HTTP client for the Gemini text-generation endpoint.
///
/// Use [`GeminiClient::builder`] to construct instances; the base URL is
/// overridable so tests can point the client at a local stub server.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt.to_string() }],
            }],
        };

        debug!("[GEMINI] POST {} (prompt len={})", url, prompt.len());
        let start = Instant::now();

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AskDbError::Translation(format!("model request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!("[GEMINI] Request failed: status={} body={}", status, body);
            return Err(AskDbError::Translation(format!(
                "model service returned {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AskDbError::Translation(format!("malformed model response: {}", e)))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AskDbError::Translation("model returned no candidates".to_string()))?;

        debug!(
            "[GEMINI] Completion received: len={} took={:?}",
            text.len(),
            start.elapsed()
        );
        Ok(text)
    }
}

/// Builder for [`GeminiClient`].
#[derive(Debug, Default)]
pub struct GeminiClientBuilder {
    base_url: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl GeminiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the API base URL (primarily for tests against a stub server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<GeminiClient> {
        let api_key = match self.api_key {
            Some(key) if !key.is_empty() => key,
            _ => {
                return Err(AskDbError::Config(
                    "Gemini API key is required but was not provided".to_string(),
                ))
            }
        };

        let http_client = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| AskDbError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(GeminiClient {
            http_client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
        })
    }
}
