/*!
 * Tests for the completion client and its retry policy
 */

use std::sync::Arc;
use std::time::Duration;

use pollingo::errors::{ErrorCategory, ProviderError, TranslationError};
use pollingo::providers::ChatMessage;
use pollingo::translation::client::{CompletionClient, DEFAULT_TEMPERATURE, RetryPolicy};

use crate::common::mock_providers::{MockErrorType, ScriptedProvider, Step};

fn messages() -> Vec<ChatMessage> {
    vec![ChatMessage::system("system prompt"), ChatMessage::user("user prompt")]
}

fn client(provider: &ScriptedProvider, max_retries: u32) -> CompletionClient {
    CompletionClient::new(Arc::new(provider.clone()), "gpt-test")
        .with_retry_policy(RetryPolicy::new(max_retries, Duration::ZERO))
}

#[tokio::test]
async fn test_complete_shouldSendModelMessagesAndTemperature() {
    let provider = ScriptedProvider::replying("[KEY:a]X[/KEY]");

    let text = client(&provider, 0)
        .complete("gpt-other", &messages(), 0.4)
        .await
        .unwrap();

    assert_eq!(text, "[KEY:a]X[/KEY]");
    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model, "gpt-other");
    assert_eq!(requests[0].messages, messages());
    assert!((requests[0].temperature - 0.4).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_completeDefault_shouldUseConfiguredModel() {
    let provider = ScriptedProvider::replying("ok");
    client(&provider, 0)
        .complete_default(&messages(), DEFAULT_TEMPERATURE)
        .await
        .unwrap();
    assert_eq!(provider.requests()[0].model, "gpt-test");
}

#[tokio::test]
async fn test_complete_withFailuresWithinBudget_shouldSucceedAfterExactlyNCalls() {
    for failures in 0..=3 {
        let provider = ScriptedProvider::failing_then(failures, MockErrorType::Connection, "done");

        let text = client(&provider, 3)
            .complete("m", &messages(), DEFAULT_TEMPERATURE)
            .await
            .unwrap();

        assert_eq!(text, "done");
        assert_eq!(provider.call_count(), failures + 1);
    }
}

#[tokio::test]
async fn test_complete_whenAlwaysFailing_shouldMakeRetriesPlusOneCalls() {
    for max_retries in [0u32, 1, 3] {
        let provider = ScriptedProvider::new(vec![Step::Fail(MockErrorType::Api)]);

        let error = client(&provider, max_retries)
            .complete("m", &messages(), DEFAULT_TEMPERATURE)
            .await
            .unwrap_err();

        assert_eq!(provider.call_count(), max_retries as usize + 1);
        assert_eq!(error.category(), ErrorCategory::Transport);
        match error {
            TranslationError::CompletionFailed { attempts, source } => {
                assert_eq!(attempts, max_retries + 1);
                assert!(matches!(source, ProviderError::ApiError { status_code: 500, .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_complete_shouldRetryAuthAndRateLimitErrors() {
    let provider = ScriptedProvider::new(vec![
        Step::Fail(MockErrorType::Auth),
        Step::Fail(MockErrorType::RateLimit),
        Step::Reply("ok".to_string()),
    ]);

    let text = client(&provider, 2)
        .complete("m", &messages(), DEFAULT_TEMPERATURE)
        .await
        .unwrap();

    assert_eq!(text, "ok");
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn test_complete_withNoContent_shouldFailWithoutRetry() {
    let provider = ScriptedProvider::new(vec![Step::NoContent, Step::Reply("late".to_string())]);

    let error = client(&provider, 3)
        .complete("m", &messages(), DEFAULT_TEMPERATURE)
        .await
        .unwrap_err();

    assert!(matches!(error, TranslationError::EmptyResponse { ref model } if model == "m"));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_complete_withEmptyString_shouldBeEmptyResponse() {
    let provider = ScriptedProvider::replying("");
    let error = client(&provider, 0)
        .complete("m", &messages(), DEFAULT_TEMPERATURE)
        .await
        .unwrap_err();
    assert!(matches!(error, TranslationError::EmptyResponse { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_complete_shouldWaitRetryDelayBetweenAttempts() {
    let provider = ScriptedProvider::failing_then(2, MockErrorType::Connection, "ok");
    let client = CompletionClient::new(Arc::new(provider.clone()), "m")
        .with_max_retries(2)
        .with_retry_delay(Duration::from_millis(1000));

    let started = tokio::time::Instant::now();
    client.complete("m", &messages(), DEFAULT_TEMPERATURE).await.unwrap();

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(2000));
    assert!(elapsed < Duration::from_millis(2100));
}

#[test]
fn test_setters_shouldUpdateSettings() {
    let provider = ScriptedProvider::replying("ok");
    let mut client = CompletionClient::new(Arc::new(provider), "m");

    client.set_model("gpt-4o");
    client.set_max_retries(5);
    client.set_retry_delay(Duration::from_millis(10));
    client.set_timeout(Duration::from_secs(3)).unwrap();

    assert_eq!(client.model(), "gpt-4o");
    assert_eq!(client.retry_policy(), RetryPolicy::new(5, Duration::from_millis(10)));
    assert_eq!(client.timeout(), Duration::from_secs(3));
    assert_eq!(client.retry_policy().max_attempts(), 6);
}
