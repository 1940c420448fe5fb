/*!
 * Prompt templates for keyed string translation.
 *
 * Rendering is pure: the same input always produces the same prompt, so a
 * retried request sends byte-identical messages.
 */

use crate::providers::ChatMessage;
use crate::translation::model::TranslationGroup;

/// System prompt sent with every translation request
pub const SYSTEM_PROMPT: &str = r#"You are a professional translator with expertise in multiple languages.
Your task is to translate text while preserving meaning and context.

Important rules to follow:
1. Always translate the text to the target language, never return it unchanged
2. Preserve the meaning and context of each string
3. Use appropriate translations based on context
4. Return translations using the following format for each key: [KEY:key_name]translated_text[/KEY]
5. Each key in the response must be exactly as provided in the input
6. Do not include any JSON format, Markdown or code block syntax in your response

Example request:
Translate to French:
- greeting: "Hello"
- action: "Save"

Example response:
[KEY:greeting]Bonjour[/KEY]
[KEY:action]Sauvegarder[/KEY]

IMPORTANT: Return ONLY the translations in this format, no other text, explanations, or JSON syntax."#;

/// Reply-format instructions appended to every user message
const FORMAT_INSTRUCTIONS: &str = "\n\nReturn the translations using the following format for each key:\
\n[KEY:key_name]translated_text[/KEY]\
\n\nExample:\
\n[KEY:greeting]Bonjour[/KEY]\
\n[KEY:action]Sauvegarder[/KEY]\
\n\nIMPORTANT: Return ONLY the translations in this format, no other text or explanations.";

/// One keyed string as it appears in a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptEntry<'a> {
    pub key: &'a str,
    pub text: &'a str,
    pub context: Option<&'a str>,
}

impl<'a> PromptEntry<'a> {
    pub fn new(key: &'a str, text: &'a str, context: Option<&'a str>) -> Self {
        Self { key, text, context }
    }

    /// Entries of a group, in insertion order
    pub fn from_group(group: &'a TranslationGroup) -> Vec<Self> {
        group
            .iter()
            .map(|(key, value)| Self::new(key, value.text(), value.context()))
            .collect()
    }
}

/// Builder for translation prompts
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// The fixed system instructions
    pub fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    /// Render entries as `- key: "text" (context: ...)` lines, each preceded by a newline
    pub fn format_strings(&self, entries: &[PromptEntry<'_>]) -> String {
        let mut formatted = String::new();

        for entry in entries {
            formatted.push_str(&format!("\n- {}: \"{}\"", entry.key, entry.text));
            if let Some(context) = non_empty(entry.context) {
                formatted.push_str(&format!(" (context: {})", context));
            }
        }

        formatted
    }

    /// Build the user message for one group of strings
    ///
    /// # Arguments
    /// * `entries` - Strings to translate, in the order they should be listed
    /// * `target_language` - Display name of the target language
    /// * `source_language` - Display name of the source language, if known
    /// * `global_context` - Hint applied to every string
    pub fn build_user_message(
        &self,
        entries: &[PromptEntry<'_>],
        target_language: &str,
        source_language: Option<&str>,
        global_context: Option<&str>,
    ) -> String {
        let mut message = String::from("Translate the following strings");

        if let Some(source) = non_empty(source_language) {
            message.push_str(&format!(" from {}", source));
        }

        message.push_str(&format!(" to {}:", target_language));

        if let Some(context) = non_empty(global_context) {
            message.push_str(&format!("\nGlobal context: {}", context));
        }

        message.push_str(&self.format_strings(entries));
        message.push_str(FORMAT_INSTRUCTIONS);

        message
    }

    /// Build the user message for a whole group
    pub fn build_group_message(
        &self,
        group: &TranslationGroup,
        target_language: &str,
        source_language: Option<&str>,
        global_context: Option<&str>,
    ) -> String {
        let entries = PromptEntry::from_group(group);
        self.build_user_message(&entries, target_language, source_language, global_context)
    }

    /// The ordered system + user message pair for a request
    pub fn build_messages(&self, user_message: impl Into<String>) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_prompt()),
            ChatMessage::user(user_message),
        ]
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
