/*!
 * Completion client with bounded retry.
 *
 * Wraps a `Provider` with the model name, a per-attempt timeout and a retry
 * policy. Transport failures are retried with a fixed delay; a reply without
 * content is a contract violation and is returned at once.
 */

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, warn};

use crate::errors::{ConfigError, ProviderError, TranslationError};
use crate::providers::{ChatMessage, CompletionRequest, Provider};

/// Default model for the OpenAI backend
pub const DEFAULT_MODEL: &str = "gpt-4.1-2025-04-14";

/// Default sampling temperature for translation requests
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default per-attempt timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// How often and how patiently failed requests are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Fixed pause between attempts
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Policy that never retries
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Total number of attempts, first one included
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

/// Client that sends chat requests to a provider and retries transport failures
///
/// Settings change only through `&mut self` or by-value methods, so they stay
/// fixed for as long as a request borrows the client.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    provider: Arc<dyn Provider>,
    model: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl CompletionClient {
    /// Create a client with default timeout and retry policy
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        self.set_timeout(timeout)?;
        Ok(self)
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry.retry_delay = retry_delay;
        self
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    /// Set the per-attempt timeout; zero is rejected
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<(), ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidSetting {
                name: "timeout",
                reason: "Timeout must be greater than 0".to_string(),
            });
        }
        self.timeout = timeout;
        Ok(())
    }

    pub fn set_max_retries(&mut self, max_retries: u32) {
        self.retry.max_retries = max_retries;
    }

    pub fn set_retry_delay(&mut self, retry_delay: Duration) {
        self.retry.retry_delay = retry_delay;
    }

    /// Swap the backend, e.g. after rebuilding its transport
    pub fn set_provider(&mut self, provider: Arc<dyn Provider>) {
        self.provider = provider;
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Send `messages` to the backend and return the generated text
    ///
    /// # Arguments
    /// * `model` - Model identifier passed to the backend
    /// * `messages` - Ordered system + user messages
    /// * `temperature` - Sampling temperature
    ///
    /// # Returns
    /// * `Ok(text)` on the first attempt that yields content
    /// * `EmptyResponse` as soon as an attempt yields no content
    /// * `CompletionFailed` once every attempt failed at the transport level
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, TranslationError> {
        let request = CompletionRequest::new(model, messages.to_vec(), temperature);
        let max_attempts = self.retry.max_attempts();
        let mut attempt = 1;

        loop {
            match self.attempt(request.clone()).await {
                Ok(response) => {
                    debug!(
                        "{} answered on attempt {}/{} (prompt tokens: {:?}, completion tokens: {:?})",
                        self.provider.name(),
                        attempt,
                        max_attempts,
                        response.prompt_tokens,
                        response.completion_tokens
                    );
                    return match response.content {
                        Some(content) if !content.is_empty() => Ok(content),
                        _ => Err(TranslationError::EmptyResponse {
                            model: model.to_string(),
                        }),
                    };
                }
                Err(e) if attempt < max_attempts => {
                    warn!(
                        "{} request failed: {} - attempt {}/{}, retrying in {:?}",
                        self.provider.name(),
                        e,
                        attempt,
                        max_attempts,
                        self.retry.retry_delay
                    );
                    attempt += 1;
                    if !self.retry.retry_delay.is_zero() {
                        tokio::time::sleep(self.retry.retry_delay).await;
                    }
                }
                Err(e) => {
                    error!(
                        "{} request failed after {} attempt(s): {}",
                        self.provider.name(),
                        max_attempts,
                        e
                    );
                    return Err(TranslationError::CompletionFailed {
                        attempts: max_attempts,
                        source: e,
                    });
                }
            }
        }
    }

    /// Complete with this client's configured model
    pub async fn complete_default(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, TranslationError> {
        self.complete(&self.model, messages, temperature).await
    }

    async fn attempt(
        &self,
        request: CompletionRequest,
    ) -> Result<crate::providers::CompletionResponse, ProviderError> {
        match tokio::time::timeout(self.timeout, self.provider.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        }
    }
}
