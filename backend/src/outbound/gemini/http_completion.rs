//! Reqwest-backed completion adapter for Gemini.
//!
//! Owns transport concerns only: request encoding, the per-request timeout,
//! status mapping, and response decoding. Each call sends exactly one request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{GenerateContentRequestDto, GenerateContentResponseDto};
use crate::domain::ports::{CompletionService, CompletionServiceError};

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum GeminiSetupError {
    #[error("model name does not form a valid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Where and how to reach the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiEndpoint {
    /// Scheme and host, for example `https://generativelanguage.googleapis.com`.
    pub base_url: Url,
    /// Model name such as `gemini-pro`.
    pub model: String,
    pub api_key: String,
}

impl GeminiEndpoint {
    fn generate_url(&self) -> Result<Url, url::ParseError> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(&path)
    }
}

/// Completion adapter issuing `generateContent` calls.
pub struct GeminiCompletionService {
    client: Client,
    url: Url,
    api_key: String,
}

impl GeminiCompletionService {
    /// Build the adapter with a client that enforces `timeout` per request.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiSetupError`] when the endpoint URL or the reqwest client
    /// cannot be built.
    pub fn new(endpoint: GeminiEndpoint, timeout: Duration) -> Result<Self, GeminiSetupError> {
        let url = endpoint.generate_url()?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            api_key: endpoint.api_key,
        })
    }
}

#[async_trait]
impl CompletionService for GeminiCompletionService {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionServiceError> {
        let response = self
            .client
            .post(self.url.clone())
            .query(&[("key", self.api_key.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&GenerateContentRequestDto::for_prompt(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        debug!(bytes = body.len(), "completion received");
        parse_text(body.as_ref())
    }
}

fn parse_text(body: &[u8]) -> Result<String, CompletionServiceError> {
    let decoded: GenerateContentResponseDto = serde_json::from_slice(body).map_err(|error| {
        CompletionServiceError::decode(format!("invalid generateContent payload: {error}"))
    })?;
    decoded.into_text().map_err(CompletionServiceError::decode)
}

// The request URL carries the API key, so it is stripped before the error is
// rendered anywhere.
fn map_transport_error(error: reqwest::Error) -> CompletionServiceError {
    let error = error.without_url();
    if error.is_timeout() {
        CompletionServiceError::timeout(error.to_string())
    } else {
        CompletionServiceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CompletionServiceError {
    let preview = body_preview(body);
    match status {
        StatusCode::TOO_MANY_REQUESTS => CompletionServiceError::rate_limited(preview),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CompletionServiceError::timeout(format!("status {}", status.as_u16()))
        }
        _ => CompletionServiceError::status(status.as_u16(), preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        preview.push_str("...");
    }
    preview
}
