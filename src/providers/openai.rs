use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{ChatMessage, CompletionRequest, CompletionResponse, Provider};

/// Public OpenAI API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default HTTP timeout for a single request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for OpenAI-compatible chat-completions APIs
#[derive(Clone)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL (empty means the public API)
    endpoint: String,
    /// Timeout the HTTP client was built with
    timeout: Duration,
}

/// Chat-completions request body
#[derive(Debug, Serialize)]
pub struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

/// Chat-completions response body
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
}

/// A single completion choice
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIMessage,
}

/// Message of a completion choice; content is null for some refusals
#[derive(Debug, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct OpenAIUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl std::fmt::Debug for OpenAI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAI")
            .field("endpoint", &self.api_url())
            .field("timeout", &self.timeout)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenAI {
    /// Create a new client with the default timeout
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new_with_timeout(api_key, endpoint, DEFAULT_TIMEOUT)
    }

    /// Create a new client whose HTTP transport uses the given timeout
    pub fn new_with_timeout(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: build_http_client(timeout),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// A copy of this client with its HTTP transport rebuilt for a new timeout
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self::new_with_timeout(self.api_key.clone(), self.endpoint.clone(), timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL of the chat-completions endpoint
    pub fn api_url(&self) -> String {
        let base = if self.endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.trim()
        };
        format!("{}/chat/completions", base.trim_end_matches('/'))
    }

    /// Send a chat-completions request and decode the reply
    pub async fn chat(&self, request: &CompletionRequest) -> Result<OpenAIResponse, ProviderError> {
        let body = OpenAIRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
        };

        let mut builder = self.client.post(self.api_url());
        if !self.api_key.trim().is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(classify_status(status, error_text));
        }

        response
            .json::<OpenAIResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    fn classify_send_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else if error.is_connect() {
            ProviderError::ConnectionError(error.to_string())
        } else {
            ProviderError::RequestFailed(error.to_string())
        }
    }
}

fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

fn classify_status(status: StatusCode, message: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl Provider for OpenAI {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let response = self.chat(&request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        let (prompt_tokens, completion_tokens) = match response.usage {
            Some(usage) => (Some(usage.prompt_tokens), Some(usage.completion_tokens)),
            None => (None, None),
        };

        Ok(CompletionResponse {
            content,
            prompt_tokens,
            completion_tokens,
        })
    }

    fn name(&self) -> &str {
        "openai"
    }
}
