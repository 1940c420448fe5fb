/*!
 * Tests for the fluent builder
 */

use std::sync::Arc;
use std::time::Duration;

use pollingo::app_config::{Config, TranslationProvider};
use pollingo::errors::{ConfigError, LanguageRole, TranslationError};
use pollingo::pollingo::{Pollingo, Translation};
use pollingo::translation::model::TranslatableString;

use crate::common::mock_providers::ScriptedProvider;

fn pollingo_with(provider: &ScriptedProvider) -> Pollingo {
    Pollingo::with_provider(Arc::new(provider.clone()), Some("gpt-test"))
        .unwrap()
        .retry_delay(Duration::ZERO)
}

#[test]
fn test_fromLanguage_withInvalidCode_shouldNameSourceRole() {
    let provider = ScriptedProvider::replying("");
    let error = pollingo_with(&provider).from_language("xx").unwrap_err();

    assert!(matches!(
        error,
        ConfigError::InvalidLanguageCode { role: LanguageRole::Source, ref code, .. } if code == "xx"
    ));
    assert!(error.to_string().starts_with("Invalid source language code: xx. Available languages: "));
}

#[test]
fn test_toLanguage_withInvalidCode_shouldNameTargetRole() {
    let provider = ScriptedProvider::replying("");
    let error = pollingo_with(&provider).to_language("nope").unwrap_err();
    assert!(matches!(error, ConfigError::InvalidLanguageCode { role: LanguageRole::Target, .. }));
}

#[test]
fn test_settings_outOfRange_shouldBeRejected() {
    let provider = ScriptedProvider::replying("");

    assert!(matches!(
        pollingo_with(&provider).timeout(Duration::ZERO).unwrap_err(),
        ConfigError::InvalidSetting { name: "timeout", .. }
    ));
    assert!(matches!(
        pollingo_with(&provider).temperature(-0.5).unwrap_err(),
        ConfigError::InvalidSetting { name: "temperature", .. }
    ));
    assert!(matches!(
        pollingo_with(&provider).max_concurrent_groups(0).unwrap_err(),
        ConfigError::InvalidSetting { name: "max_concurrent_groups", .. }
    ));
}

#[test]
fn test_group_withMixedInputs_shouldKeepContexts() {
    let provider = ScriptedProvider::replying("");
    let pollingo = pollingo_with(&provider).group(
        "buttons",
        [
            ("save", TranslatableString::with_context("Save", "Button label")),
            ("cancel", TranslatableString::from("Cancel")),
        ],
    );

    let group = pollingo.groups().get("buttons").unwrap();
    assert_eq!(group.get("save").unwrap().context(), Some("Button label"));
    assert_eq!(group.get("cancel").unwrap().context(), None);
}

#[tokio::test]
async fn test_translate_withText_shouldReturnTextVariant() {
    let provider = ScriptedProvider::replying("[KEY:text]Hallo[/KEY]");

    let result = pollingo_with(&provider)
        .to_language("de")
        .unwrap()
        .text("Hello")
        .translate()
        .await
        .unwrap();

    assert_eq!(result, Translation::Text("Hallo".to_string()));
    assert!(provider.user_message(0).contains("- text: \"Hello\""));
}

#[tokio::test]
async fn test_translate_shouldSendModelAndTemperature() {
    let provider = ScriptedProvider::replying("[KEY:a]A2[/KEY]");

    pollingo_with(&provider)
        .model("gpt-4o-mini")
        .temperature(0.7)
        .unwrap()
        .to_language("it")
        .unwrap()
        .group("g", [("a", "A")])
        .translate()
        .await
        .unwrap();

    let request = &provider.requests()[0];
    assert_eq!(request.model, "gpt-4o-mini");
    assert!((request.temperature - 0.7).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_contextAlias_shouldSetGlobalContext() {
    let provider = ScriptedProvider::replying("[KEY:a]A2[/KEY]");
    let pollingo = pollingo_with(&provider)
        .context("E-commerce checkout")
        .to_language("es")
        .unwrap()
        .group("g", [("a", "A")]);

    assert_eq!(pollingo.global_context(), Some("E-commerce checkout"));
    pollingo.translate_groups().await.unwrap();
    assert!(provider.user_message(0).contains("\nGlobal context: E-commerce checkout\n"));
}

#[tokio::test]
async fn test_translateText_withoutText_shouldFail() {
    let provider = ScriptedProvider::replying("");
    let error = pollingo_with(&provider)
        .to_language("fr")
        .unwrap()
        .translate_text()
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        TranslationError::Config(ConfigError::InvalidSetting { name: "text", .. })
    ));
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn test_fromConfig_shouldApplyLanguagesAndSettings() {
    let mut config = Config::default();
    config.translation.api_key = "sk-test".to_string();
    config.translation.model = "gpt-4o".to_string();
    config.translation.timeout_secs = 15;
    config.translation.max_retries = 1;
    config.translation.max_concurrent_groups = 3;
    config.source_language = "EN".to_string();
    config.target_language = "ja".to_string();
    config.global_context = Some("Game UI".to_string());

    let pollingo = Pollingo::from_config(&config).unwrap();

    assert_eq!(pollingo.source_language(), Some("en"));
    assert_eq!(pollingo.target_language(), Some("ja"));
    assert_eq!(pollingo.global_context(), Some("Game UI"));
    let client = pollingo.service().client();
    assert_eq!(client.model(), "gpt-4o");
    assert_eq!(client.timeout(), Duration::from_secs(15));
    assert_eq!(client.retry_policy().max_retries, 1);
    assert_eq!(pollingo.service().options.max_concurrent_groups, 3);
}

#[test]
fn test_fromConfig_withOpenAIAndNoKey_shouldFail() {
    let error = Pollingo::from_config(&Config::default()).unwrap_err();
    assert!(matches!(error, ConfigError::MissingCredential(_)));
}

#[test]
fn test_fromConfig_withLmStudio_shouldNotNeedKey() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::LMStudio;

    let pollingo = Pollingo::from_config(&config).unwrap();
    assert_eq!(pollingo.service().client().model(), "local-model");
    assert_eq!(pollingo.service().client().provider().name(), "openai");
}
