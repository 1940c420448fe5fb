/*!
 * Translation pipeline for keyed string groups.
 *
 * - `model`: translatable strings, groups and group collections
 * - `prompts`: system prompt and user message rendering
 * - `client`: completion client with per-attempt timeout and bounded retry
 * - `parser`: extraction and validation of `[KEY:name]...[/KEY]` replies
 * - `core`: the service that runs groups through the pipeline
 */

// Re-export main types for easier usage
pub use self::client::{CompletionClient, RetryPolicy};
pub use self::core::{TranslationOptions, TranslationService};
pub use self::model::{GroupCollection, StringInput, TranslatableString, TranslationGroup};
pub use self::parser::{ParsedTranslations, ResponseParser};
pub use self::prompts::{PromptBuilder, PromptEntry, SYSTEM_PROMPT};

// Submodules
pub mod client;
pub mod core;
pub mod model;
pub mod parser;
pub mod prompts;
