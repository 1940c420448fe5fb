/*!
 * Tests for application configuration functionality
 */

use std::collections::HashMap;
use std::time::Duration;

use pollingo::app_config::{Config, LogLevel, TranslationConfig, TranslationProvider};

use crate::common;

fn valid_config() -> Config {
    let mut config = Config::default();
    config.translation.api_key = "sk-test".to_string();
    config
}

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "fr");
    assert_eq!(config.global_context, None);
    assert_eq!(config.log_level, LogLevel::Info);

    let translation = &config.translation;
    assert_eq!(translation.provider, TranslationProvider::OpenAI);
    assert_eq!(translation.get_model(), "gpt-4.1-2025-04-14");
    assert_eq!(translation.timeout(), Duration::from_secs(120));
    assert_eq!(translation.max_retries, 3);
    assert_eq!(translation.retry_delay(), Duration::from_millis(1000));
    assert!((translation.temperature - 0.1).abs() < f32::EPSILON);
    assert_eq!(translation.max_concurrent_groups, 1);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = valid_config();
    assert!(config.validate().is_ok());

    // Invalid source language
    config.source_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.source_language = String::new();
    assert!(config.validate().is_ok(), "empty source lets the model detect it");
    config.source_language = "en".to_string();

    // Invalid target language
    config.target_language = String::new();
    assert!(config.validate().is_err());
    config.target_language = "fr".to_string();

    // Out-of-range settings
    config.translation.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.translation.timeout_secs = 30;

    config.translation.temperature = 2.5;
    assert!(config.validate().is_err());
    config.translation.temperature = 0.1;

    config.translation.max_concurrent_groups = 0;
    assert!(config.validate().is_err());
    config.translation.max_concurrent_groups = 2;

    config.translation.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.translation.endpoint = "ftp://example.com".to_string();
    assert!(config.validate().is_err());
    config.translation.endpoint = String::new();

    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withMissingApiKey_shouldDependOnProvider() {
    let mut config = Config::default();
    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("API key is required"));

    config.translation.provider = TranslationProvider::LMStudio;
    assert!(config.validate().is_ok());
}

#[test]
fn test_envOverrides_shouldReplaceKeyModelAndEndpoint() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("OPENAI_API_KEY", "sk-env"),
        ("OPENAI_MODEL", "gpt-4o-mini"),
        ("OPENAI_BASE_URL", "http://localhost:8080/v1"),
    ]);

    let mut config = Config::default();
    config.apply_overrides_from(|name| vars.get(name).map(|v| v.to_string()));

    assert_eq!(config.translation.api_key, "sk-env");
    assert_eq!(config.translation.get_model(), "gpt-4o-mini");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:8080/v1");
}

#[test]
fn test_envOverrides_withBlankValues_shouldKeepConfig() {
    let mut config = valid_config();
    config.apply_overrides_from(|_| Some("  ".to_string()));
    assert_eq!(config.translation.api_key, "sk-test");
    assert!(config.translation.model.is_empty());
}

#[test]
fn test_saveAndLoad_shouldPreserveSettings() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("pollingo.json");

    let mut config = valid_config();
    config.global_context = Some("Mobile banking app".to_string());
    config.translation.provider = TranslationProvider::LMStudio;
    config.translation.max_concurrent_groups = 4;
    config.log_level = LogLevel::Debug;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("new.json");

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config, Config::default());
    assert!(path.exists());
    assert_eq!(Config::load(&path).unwrap(), config);
}

#[test]
fn test_load_withPartialFile_shouldFillDefaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        temp_dir.path(),
        "partial.json",
        r#"{"target_language": "de", "translation": {"provider": "lmstudio", "model": "qwen"}}"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "de");
    assert_eq!(config.translation.provider, TranslationProvider::LMStudio);
    assert_eq!(config.translation.get_model(), "qwen");
    assert_eq!(config.translation.max_retries, 3);
}

#[test]
fn test_load_withInvalidJson_shouldReportPath() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json").unwrap();

    let error = Config::load(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_translationConfig_defaultModels_shouldFollowProvider() {
    let translation = TranslationConfig {
        provider: TranslationProvider::LMStudio,
        ..TranslationConfig::default()
    };
    assert_eq!(translation.get_model(), "local-model");
}
