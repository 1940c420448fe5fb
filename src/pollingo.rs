/*!
 * Fluent entry point for translating strings.
 *
 * ```no_run
 * # async fn run() -> Result<(), pollingo::TranslationError> {
 * use pollingo::Pollingo;
 *
 * let translated = Pollingo::make("sk-...", None)?
 *     .from_language("en")?
 *     .to_language("fr")?
 *     .group("messages", [("hello", "Hello"), ("welcome", "Welcome")])
 *     .translate_groups()
 *     .await?;
 * # Ok(())
 * # }
 * ```
 */

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::app_config::{Config, TranslationProvider};
use crate::errors::{ConfigError, LanguageRole, TranslationError};
use crate::language_utils::LanguageCatalog;
use crate::providers::Provider;
use crate::providers::openai::OpenAI;
use crate::translation::client::{CompletionClient, DEFAULT_MODEL};
use crate::translation::core::TranslationService;
use crate::translation::model::{GroupCollection, TranslatableString, TranslationGroup};

/// Result of a translation call
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// Translated groups, in the order they were added
    Groups(GroupCollection),
    /// Translated single text
    Text(String),
}

impl Translation {
    pub fn into_groups(self) -> Option<GroupCollection> {
        match self {
            Self::Groups(groups) => Some(groups),
            Self::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Groups(_) => None,
        }
    }
}

/// Builder-style translation request
#[derive(Debug, Clone)]
pub struct Pollingo {
    service: TranslationService,
    /// Default backend, kept so a timeout change can rebuild its HTTP client
    openai: Option<OpenAI>,
    source_language: Option<String>,
    target_language: Option<String>,
    global_context: Option<String>,
    text: Option<String>,
    groups: GroupCollection,
}

impl Pollingo {
    /// Create an instance backed by the public OpenAI API
    pub fn make(api_key: impl Into<String>, model: Option<&str>) -> Result<Self, ConfigError> {
        Self::make_with_endpoint(api_key, model, "")
    }

    /// Create an instance backed by an OpenAI-compatible API at `endpoint`
    pub fn make_with_endpoint(
        api_key: impl Into<String>,
        model: Option<&str>,
        endpoint: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(
                "an OpenAI API key is required".to_string(),
            ));
        }

        let openai = OpenAI::new(api_key, endpoint);
        let mut pollingo = Self::with_provider(Arc::new(openai.clone()), model)?;
        pollingo.openai = Some(openai);
        Ok(pollingo)
    }

    /// Create an instance around any completion backend
    pub fn with_provider(provider: Arc<dyn Provider>, model: Option<&str>) -> Result<Self, ConfigError> {
        let model = model.filter(|m| !m.trim().is_empty()).unwrap_or(DEFAULT_MODEL);
        let client = CompletionClient::new(provider, model);

        Ok(Self {
            service: TranslationService::new(client)?,
            openai: None,
            source_language: None,
            target_language: None,
            global_context: None,
            text: None,
            groups: GroupCollection::new(),
        })
    }

    /// Create an instance from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let translation = &config.translation;
        let model = translation.get_model();
        let endpoint = translation.get_endpoint();

        let mut pollingo = match translation.provider {
            TranslationProvider::OpenAI => {
                Self::make_with_endpoint(translation.api_key.clone(), Some(model.as_str()), endpoint)?
            }
            TranslationProvider::LMStudio => {
                let openai = OpenAI::new(translation.api_key.clone(), endpoint);
                let mut pollingo = Self::with_provider(Arc::new(openai.clone()), Some(model.as_str()))?;
                pollingo.openai = Some(openai);
                pollingo
            }
        };

        pollingo = pollingo
            .timeout(translation.timeout())?
            .max_retries(translation.max_retries)
            .retry_delay(translation.retry_delay())
            .temperature(translation.temperature)?
            .max_concurrent_groups(translation.max_concurrent_groups)?;

        if !config.source_language.trim().is_empty() {
            pollingo = pollingo.from_language(&config.source_language)?;
        }
        if !config.target_language.trim().is_empty() {
            pollingo = pollingo.to_language(&config.target_language)?;
        }
        if let Some(context) = config.global_context.as_deref() {
            pollingo = pollingo.with_global_context(context);
        }

        debug!(
            "Configured {} backend with model {}",
            translation.provider.display_name(),
            pollingo.service.client().model()
        );
        Ok(pollingo)
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.service.client_mut().set_model(model);
        self
    }

    /// Per-attempt timeout; also rebuilds the default backend's HTTP client
    pub fn timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        self.service.client_mut().set_timeout(timeout)?;

        if let Some(openai) = self.openai.as_ref() {
            let rebuilt = openai.with_timeout(timeout);
            self.service.client_mut().set_provider(Arc::new(rebuilt.clone()));
            self.openai = Some(rebuilt);
        }

        Ok(self)
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.service.client_mut().set_max_retries(max_retries);
        self
    }

    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.service.client_mut().set_retry_delay(retry_delay);
        self
    }

    /// Sampling temperature, between 0 and 2
    pub fn temperature(mut self, temperature: f32) -> Result<Self, ConfigError> {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidSetting {
                name: "temperature",
                reason: format!("{} is outside 0.0..=2.0", temperature),
            });
        }
        self.service.options.temperature = temperature;
        Ok(self)
    }

    /// Number of groups translated at the same time
    pub fn max_concurrent_groups(mut self, max_concurrent_groups: usize) -> Result<Self, ConfigError> {
        if max_concurrent_groups == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "max_concurrent_groups",
                reason: "at least one group must be processed at a time".to_string(),
            });
        }
        self.service.options.max_concurrent_groups = max_concurrent_groups;
        Ok(self)
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn from_language(mut self, code: &str) -> Result<Self, ConfigError> {
        let code = self.service.catalog().validate(code, LanguageRole::Source)?;
        self.source_language = Some(code);
        Ok(self)
    }

    pub fn to_language(mut self, code: &str) -> Result<Self, ConfigError> {
        let code = self.service.catalog().validate(code, LanguageRole::Target)?;
        self.target_language = Some(code);
        Ok(self)
    }

    pub fn with_global_context(mut self, context: impl Into<String>) -> Self {
        self.global_context = Some(context.into());
        self
    }

    /// Alias for [`Pollingo::with_global_context`]
    pub fn context(self, context: impl Into<String>) -> Self {
        self.with_global_context(context)
    }

    /// Translate a single text instead of groups
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a named group; strings are plain text or (text, context) pairs
    pub fn group<I, K, V>(mut self, name: impl Into<String>, strings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TranslatableString>,
    {
        self.groups.insert(TranslationGroup::from_entries(name, strings));
        self
    }

    /// Add an already built group, replacing any group with the same name
    pub fn add_group(mut self, group: TranslationGroup) -> Self {
        self.groups.insert(group);
        self
    }

    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    pub fn target_language(&self) -> Option<&str> {
        self.target_language.as_deref()
    }

    pub fn global_context(&self) -> Option<&str> {
        self.global_context.as_deref()
    }

    pub fn groups(&self) -> &GroupCollection {
        &self.groups
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Language catalog used for validation
    pub fn catalog(&self) -> &'static LanguageCatalog {
        self.service.catalog()
    }

    /// Run the translation
    ///
    /// Returns `Translation::Text` when a single text was set, otherwise
    /// `Translation::Groups`.
    pub async fn translate(&self) -> Result<Translation, TranslationError> {
        match self.text.as_deref() {
            Some(text) => {
                let target = self.require_target()?;
                let translated = self
                    .service
                    .translate_text(
                        text,
                        target,
                        self.source_language.as_deref(),
                        self.global_context.as_deref(),
                    )
                    .await?;
                Ok(Translation::Text(translated))
            }
            None => self.translate_groups().await.map(Translation::Groups),
        }
    }

    /// Translate the added groups
    pub async fn translate_groups(&self) -> Result<GroupCollection, TranslationError> {
        let target = self.require_target()?;
        self.service
            .translate(
                &self.groups,
                target,
                self.source_language.as_deref(),
                self.global_context.as_deref(),
            )
            .await
    }

    /// Translate the text set with [`Pollingo::text`]
    pub async fn translate_text(&self) -> Result<String, TranslationError> {
        let target = self.require_target()?;
        let text = self.text.as_deref().ok_or_else(|| ConfigError::InvalidSetting {
            name: "text",
            reason: "no text was set".to_string(),
        })?;

        self.service
            .translate_text(
                text,
                target,
                self.source_language.as_deref(),
                self.global_context.as_deref(),
            )
            .await
    }

    fn require_target(&self) -> Result<&str, ConfigError> {
        self.target_language
            .as_deref()
            .ok_or(ConfigError::MissingTargetLanguage)
    }
}
