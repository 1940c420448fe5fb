/*!
 * Value types for translation input and output.
 *
 * - `TranslatableString`: immutable text + optional context + optional translation
 * - `TranslationGroup`: named, ordered set of keyed strings
 * - `GroupCollection`: ordered set of groups
 *
 * Ordering is always caller insertion order. Groups and collections serialize
 * as JSON objects mapping keys to the translated text (or the original text
 * when no translation is attached).
 */

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// A string to translate, with optional context and translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableString {
    text: String,
    context: Option<String>,
    translated_text: Option<String>,
}

impl TranslatableString {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
            translated_text: None,
        }
    }

    pub fn with_context(text: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: Some(context.into()),
            translated_text: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn translated_text(&self) -> Option<&str> {
        self.translated_text.as_deref()
    }

    /// A new value carrying `translated`; this value is left untouched
    pub fn with_translation(&self, translated: impl Into<String>) -> Self {
        Self {
            text: self.text.clone(),
            context: self.context.clone(),
            translated_text: Some(translated.into()),
        }
    }

    /// Translated text if present, otherwise the original text
    pub fn resolved_text(&self) -> &str {
        self.translated_text.as_deref().unwrap_or(&self.text)
    }
}

impl From<&str> for TranslatableString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TranslatableString {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<(&str, &str)> for TranslatableString {
    fn from((text, context): (&str, &str)) -> Self {
        Self::with_context(text, context)
    }
}

/// Input form of a string: plain text, or text with a context
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringInput {
    Plain(String),
    Detailed {
        text: String,
        #[serde(default)]
        context: Option<String>,
    },
}

impl From<StringInput> for TranslatableString {
    fn from(input: StringInput) -> Self {
        match input {
            StringInput::Plain(text) => Self::new(text),
            StringInput::Detailed { text, context: Some(context) } => Self::with_context(text, context),
            StringInput::Detailed { text, context: None } => Self::new(text),
        }
    }
}

/// A named, ordered mapping from key to string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationGroup {
    name: String,
    entries: Vec<(String, TranslatableString)>,
}

impl TranslationGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Build a group from (key, value) pairs; a repeated key keeps its first position
    pub fn from_entries<I, K, V>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<TranslatableString>,
    {
        let mut group = Self::new(name);
        for (key, value) in entries {
            group.insert(key, value);
        }
        group
    }

    /// Insert a string, replacing any existing value for the key in place
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<TranslatableString>,
    ) -> Option<TranslatableString> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&TranslatableString> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslatableString)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (key, resolved text) pairs in insertion order
    pub fn translations(&self) -> Vec<(&str, &str)> {
        self.iter()
            .map(|(key, value)| (key, value.resolved_text()))
            .collect()
    }
}

impl Serialize for TranslationGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value.resolved_text())?;
        }
        map.end()
    }
}

/// Ordered set of groups, keyed by group name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupCollection {
    groups: Vec<TranslationGroup>,
}

impl GroupCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, replacing any group with the same name in place
    pub fn insert(&mut self, group: TranslationGroup) -> Option<TranslationGroup> {
        match self.groups.iter_mut().find(|existing| existing.name == group.name) {
            Some(slot) => Some(std::mem::replace(slot, group)),
            None => {
                self.groups.push(group);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&TranslationGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationGroup> {
        self.groups.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(TranslationGroup::name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<TranslationGroup> for GroupCollection {
    fn from_iter<I: IntoIterator<Item = TranslationGroup>>(iter: I) -> Self {
        let mut collection = Self::new();
        for group in iter {
            collection.insert(group);
        }
        collection
    }
}

impl IntoIterator for GroupCollection {
    type Item = TranslationGroup;
    type IntoIter = std::vec::IntoIter<TranslationGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl Serialize for GroupCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(group.name(), group)?;
        }
        map.end()
    }
}
