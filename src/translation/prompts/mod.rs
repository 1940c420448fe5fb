/*!
 * Prompt construction for structured string translation.
 *
 * This module provides:
 * - The fixed system prompt describing the `[KEY:...]...[/KEY]` reply format
 * - The user message builder that renders a group of strings
 * - Assembly of the system + user message pair sent to a backend
 */

pub mod templates;

// Re-export main types
pub use templates::{PromptBuilder, PromptEntry, SYSTEM_PROMPT};
