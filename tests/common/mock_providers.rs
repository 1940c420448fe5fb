/*!
 * Scripted providers for testing
 *
 * `ScriptedProvider` answers each call with the next scripted step and records
 * every request it receives, so tests can assert on prompts and call counts
 * without external API calls.
 */

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pollingo::errors::ProviderError;
use pollingo::providers::{CompletionRequest, CompletionResponse, Provider};

/// Type of transport error to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockErrorType {
    /// Authentication error (invalid API key)
    Auth,
    /// Connection error
    Connection,
    /// Rate limit error
    RateLimit,
    /// API error
    Api,
}

impl MockErrorType {
    fn to_error(self) -> ProviderError {
        match self {
            MockErrorType::Auth => ProviderError::AuthenticationError("invalid api key".to_string()),
            MockErrorType::Connection => ProviderError::ConnectionError("connection refused".to_string()),
            MockErrorType::RateLimit => ProviderError::RateLimitExceeded("slow down".to_string()),
            MockErrorType::Api => ProviderError::ApiError {
                status_code: 500,
                message: "internal error".to_string(),
            },
        }
    }
}

/// One scripted answer
#[derive(Debug, Clone)]
pub enum Step {
    /// Reply with this content
    Reply(String),
    /// Reply without content
    NoContent,
    /// Fail at the transport level
    Fail(MockErrorType),
}

/// Tracks calls made to a scripted provider
#[derive(Debug, Default)]
pub struct ApiCallTracker {
    /// Requests received, in order
    pub requests: Vec<CompletionRequest>,
}

/// Provider that plays back a script; the last step repeats once the script runs out
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    steps: Arc<Mutex<VecDeque<Step>>>,
    last: Step,
    tracker: Arc<Mutex<ApiCallTracker>>,
}

impl ScriptedProvider {
    pub fn new(steps: Vec<Step>) -> Self {
        let last = steps.last().cloned().unwrap_or(Step::NoContent);
        Self {
            steps: Arc::new(Mutex::new(steps.into())),
            last,
            tracker: Arc::new(Mutex::new(ApiCallTracker::default())),
        }
    }

    /// Always reply with `content`
    pub fn replying(content: &str) -> Self {
        Self::new(vec![Step::Reply(content.to_string())])
    }

    /// Fail `failures` times with `error`, then reply with `content`
    pub fn failing_then(failures: usize, error: MockErrorType, content: &str) -> Self {
        let mut steps = vec![Step::Fail(error); failures];
        steps.push(Step::Reply(content.to_string()));
        Self::new(steps)
    }

    pub fn call_count(&self) -> usize {
        self.tracker.lock().unwrap().requests.len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.tracker.lock().unwrap().requests.clone()
    }

    /// User message of the nth request
    pub fn user_message(&self, index: usize) -> String {
        self.requests()[index]
            .messages
            .last()
            .map(|message| message.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        self.tracker.lock().unwrap().requests.push(request);

        let step = self.steps.lock().unwrap().pop_front().unwrap_or_else(|| self.last.clone());
        match step {
            Step::Reply(content) => Ok(CompletionResponse {
                content: Some(content),
                ..CompletionResponse::default()
            }),
            Step::NoContent => Ok(CompletionResponse::default()),
            Step::Fail(error) => Err(error.to_error()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Provider whose reply depends on the prompt; prompts containing `marker`
/// are answered after `delay`, all others at once
#[derive(Debug, Clone)]
pub struct RoutedProvider {
    marker: String,
    delay: Duration,
    delayed_reply: String,
    immediate_reply: String,
}

impl RoutedProvider {
    pub fn new(marker: &str, delay: Duration, delayed_reply: &str, immediate_reply: &str) -> Self {
        Self {
            marker: marker.to_string(),
            delay,
            delayed_reply: delayed_reply.to_string(),
            immediate_reply: immediate_reply.to_string(),
        }
    }
}

#[async_trait]
impl Provider for RoutedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let prompt = request.user_content().unwrap_or_default();
        let content = if prompt.contains(&self.marker) {
            tokio::time::sleep(self.delay).await;
            self.delayed_reply.clone()
        } else {
            self.immediate_reply.clone()
        };

        Ok(CompletionResponse {
            content: Some(content),
            ..CompletionResponse::default()
        })
    }

    fn name(&self) -> &str {
        "routed"
    }
}
