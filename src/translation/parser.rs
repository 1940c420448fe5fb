/*!
 * Parsing of `[KEY:name]body[/KEY]` replies.
 *
 * Bodies are matched non-greedily up to the first following `[/KEY]`, so a
 * translation that itself contains the literal `[/KEY]` is cut short there.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TranslationError;
use crate::translation::model::TranslationGroup;

static KEY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\[KEY:([^\]]+)\](.*?)\[/KEY\]").expect("key tag pattern is valid")
});

/// Translations extracted from a reply, ordered like the requested keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTranslations {
    entries: Vec<(String, String)>,
}

impl ParsedTranslations {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, text)| text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, text)| (key.as_str(), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parser and validator for tagged translation replies
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Every tag in `raw`, in scan order; a repeated key keeps its last body
    pub fn extract(&self, raw: &str) -> Result<Vec<(String, String)>, TranslationError> {
        let mut tags: Vec<(String, String)> = Vec::new();

        for captures in KEY_TAG.captures_iter(raw) {
            let key = captures[1].to_string();
            let body = captures[2].to_string();
            match tags.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, slot)) => *slot = body,
                None => tags.push((key, body)),
            }
        }

        if tags.is_empty() {
            return Err(TranslationError::MalformedResponse {
                raw_response: raw.to_string(),
            });
        }

        Ok(tags)
    }

    /// Extract translations and check them against the expected key set
    ///
    /// Fails on the first expected key without a tag, then on the first
    /// returned key that was not expected.
    pub fn parse<S: AsRef<str>>(
        &self,
        raw: &str,
        expected_keys: &[S],
    ) -> Result<ParsedTranslations, TranslationError> {
        let mut tags = self.extract(raw)?;

        if let Some(missing) = expected_keys
            .iter()
            .map(AsRef::as_ref)
            .find(|key| !tags.iter().any(|(returned, _)| returned == key))
        {
            return Err(TranslationError::MissingTranslation {
                key: missing.to_string(),
                returned: tags.iter().map(|(key, _)| key.clone()).collect(),
                raw_response: raw.to_string(),
            });
        }

        if let Some((unexpected, _)) = tags
            .iter()
            .find(|(returned, _)| !expected_keys.iter().any(|key| key.as_ref() == returned))
        {
            return Err(TranslationError::UnexpectedTranslation {
                key: unexpected.clone(),
                expected: expected_keys.iter().map(|key| key.as_ref().to_string()).collect(),
                raw_response: raw.to_string(),
            });
        }

        // Reorder to the requested key order
        let mut entries = Vec::with_capacity(expected_keys.len());
        for key in expected_keys {
            if let Some(position) = tags.iter().position(|(returned, _)| returned == key.as_ref()) {
                entries.push(tags.swap_remove(position));
            }
        }

        debug!("Parsed {} translation(s) from a {}-byte reply", entries.len(), raw.len());
        Ok(ParsedTranslations { entries })
    }

    /// Parse a reply for `group`, attaching each translation to its original string
    pub fn parse_group(
        &self,
        raw: &str,
        group: &TranslationGroup,
    ) -> Result<TranslationGroup, TranslationError> {
        let keys: Vec<&str> = group.keys().collect();
        let parsed = self.parse(raw, &keys)?;

        let mut translated = TranslationGroup::new(group.name());
        for (key, original) in group.iter() {
            if let Some(text) = parsed.get(key) {
                translated.insert(key, original.with_translation(text));
            }
        }

        Ok(translated)
    }
}
