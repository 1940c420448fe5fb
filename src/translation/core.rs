/*!
 * Core translation service implementation.
 *
 * `TranslationService` drives each group through prompt construction, the
 * completion client and the response parser, and assembles the translated
 * groups in input order. Any failing group fails the whole call.
 */

use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info};

use crate::errors::{ConfigError, TranslationError};
use crate::language_utils::LanguageCatalog;
use crate::translation::client::{CompletionClient, DEFAULT_TEMPERATURE};
use crate::translation::model::{GroupCollection, TranslatableString, TranslationGroup};
use crate::translation::parser::ResponseParser;
use crate::translation::prompts::PromptBuilder;

/// Group name used for single-text translation
pub const SINGLE_GROUP: &str = "single";

/// Key used for single-text translation
pub const SINGLE_KEY: &str = "text";

/// Translation options for customizing the translation process
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationOptions {
    /// Sampling temperature sent with every request
    pub temperature: f32,

    /// Groups translated at the same time; 1 means one after the other
    pub max_concurrent_groups: usize,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_concurrent_groups: 1,
        }
    }
}

/// Resolved display names for one translation call
#[derive(Debug, Clone, Copy)]
struct LanguagePair<'a> {
    target: &'a str,
    source: Option<&'a str>,
}

/// Main translation service
#[derive(Debug, Clone)]
pub struct TranslationService {
    client: CompletionClient,
    catalog: &'static LanguageCatalog,
    prompts: PromptBuilder,
    parser: ResponseParser,
    /// Translation options
    pub options: TranslationOptions,
}

impl TranslationService {
    /// Create a new translation service around a completion client
    pub fn new(client: CompletionClient) -> Result<Self, ConfigError> {
        Ok(Self {
            client,
            catalog: LanguageCatalog::global()?,
            prompts: PromptBuilder::new(),
            parser: ResponseParser::new(),
            options: TranslationOptions::default(),
        })
    }

    pub fn with_options(mut self, options: TranslationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn client(&self) -> &CompletionClient {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut CompletionClient {
        &mut self.client
    }

    pub fn catalog(&self) -> &'static LanguageCatalog {
        self.catalog
    }

    /// Translate every group into the target language
    ///
    /// # Arguments
    /// * `groups` - Groups to translate, in output order
    /// * `target_language` - Target language code
    /// * `source_language` - Source language code, if known
    /// * `global_context` - Hint applied to every string
    ///
    /// # Returns
    /// * The translated groups in input order, or the first error encountered
    pub async fn translate(
        &self,
        groups: &GroupCollection,
        target_language: &str,
        source_language: Option<&str>,
        global_context: Option<&str>,
    ) -> Result<GroupCollection, TranslationError> {
        let languages = LanguagePair {
            target: self.catalog.language_name(target_language)?,
            source: source_language
                .map(|code| self.catalog.language_name(code))
                .transpose()?,
        };

        info!(
            "Translating {} group(s) to {} with model {}",
            groups.len(),
            languages.target,
            self.client.model()
        );

        // Completion order varies; the first error drops the groups still in flight
        let mut translated: Vec<(usize, TranslationGroup)> = stream::iter(groups.iter().enumerate())
            .map(|(index, group)| async move {
                self.translate_group_with(group, languages, global_context)
                    .await
                    .map(|translated| (index, translated))
            })
            .buffer_unordered(self.options.max_concurrent_groups.max(1))
            .try_collect()
            .await?;

        translated.sort_by_key(|(index, _)| *index);
        Ok(translated.into_iter().map(|(_, group)| group).collect())
    }

    /// Translate one group, given language display names
    pub async fn translate_group(
        &self,
        group: &TranslationGroup,
        target_language_name: &str,
        source_language_name: Option<&str>,
        global_context: Option<&str>,
    ) -> Result<TranslationGroup, TranslationError> {
        let languages = LanguagePair {
            target: target_language_name,
            source: source_language_name,
        };
        self.translate_group_with(group, languages, global_context).await
    }

    /// Translate a bare string and return the translated text
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
        global_context: Option<&str>,
    ) -> Result<String, TranslationError> {
        let group = TranslationGroup::from_entries(SINGLE_GROUP, [(SINGLE_KEY, TranslatableString::new(text))]);
        let groups: GroupCollection = std::iter::once(group).collect();

        let translated = self
            .translate(&groups, target_language, source_language, global_context)
            .await?;

        translated
            .get(SINGLE_GROUP)
            .and_then(|group| group.get(SINGLE_KEY))
            .and_then(TranslatableString::translated_text)
            .map(str::to_string)
            .ok_or_else(|| TranslationError::MissingTranslation {
                key: SINGLE_KEY.to_string(),
                returned: Vec::new(),
                raw_response: String::new(),
            })
    }

    async fn translate_group_with(
        &self,
        group: &TranslationGroup,
        languages: LanguagePair<'_>,
        global_context: Option<&str>,
    ) -> Result<TranslationGroup, TranslationError> {
        if group.is_empty() {
            debug!("Group '{}' has no strings, skipping backend call", group.name());
            return Ok(group.clone());
        }

        let user_message =
            self.prompts
                .build_group_message(group, languages.target, languages.source, global_context);
        debug!(
            "Group '{}': {} string(s), prompt of {} bytes",
            group.name(),
            group.len(),
            user_message.len()
        );

        let messages = self.prompts.build_messages(user_message);
        let content = self
            .client
            .complete(self.client.model(), &messages, self.options.temperature)
            .await?;

        let translated = self.parser.parse_group(&content, group)?;
        info!(
            "Translated group '{}' ({} string(s)) to {}",
            group.name(),
            translated.len(),
            languages.target
        );

        Ok(translated)
    }
}
