/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock provider that simulates different backend behaviors:
 * - `MockProvider::working()` - Answers every prompted key with a `[TRANSLATED]` tag
 * - `MockProvider::replying(text)` - Always answers with the same raw text
 * - `MockProvider::failing_first(n)` - Fails `n` times, then works
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::{CompletionRequest, CompletionResponse, Provider};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Tags every key found in the prompt with a `[TRANSLATED]` prefix
    Working,
    /// Always returns this exact text
    Fixed(String),
    /// Fails the first `failures` requests, then behaves like `Working`
    FailFirst { failures: usize },
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns a response without content
    Empty,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&CompletionRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(text.into()))
    }

    pub fn failing_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailFirst { failures })
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator used whenever the mock succeeds
    pub fn with_custom_response(mut self, generator: fn(&CompletionRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Build a tagged reply for every `- key: "text"` line of a prompt
    pub fn generate_tagged_response(prompt: &str) -> String {
        prompt
            .lines()
            .filter_map(|line| line.strip_prefix("- "))
            .filter_map(|rest| rest.split_once(": \""))
            .map(|(key, rest)| {
                let text = rest.rfind('"').map_or(rest, |end| &rest[..end]);
                format!("[KEY:{}][TRANSLATED] {}[/KEY]", key, text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn success(&self, request: &CompletionRequest) -> CompletionResponse {
        let prompt = request.user_content().unwrap_or_default();
        let text = match (&self.behavior, self.custom_response) {
            (_, Some(generator)) => generator(request),
            (MockBehavior::Fixed(text), None) => text.clone(),
            _ => Self::generate_tagged_response(prompt),
        };

        CompletionResponse {
            prompt_tokens: Some(prompt.len() as u64),
            completion_tokens: Some(text.len() as u64),
            content: Some(text),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working | MockBehavior::Fixed(_) => Ok(self.success(&request)),

            MockBehavior::FailFirst { failures } => {
                if count < *failures {
                    Err(ProviderError::ConnectionError(format!(
                        "Simulated connection failure (request #{})",
                        count + 1
                    )))
                } else {
                    Ok(self.success(&request))
                }
            }

            MockBehavior::Intermittent { fail_every } => {
                if *fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(self.success(&request))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Empty => Ok(CompletionResponse::default()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(self.success(&request))
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
