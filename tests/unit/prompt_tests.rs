/*!
 * Tests for prompt rendering
 */

use pollingo::providers::Role;
use pollingo::translation::model::{TranslatableString, TranslationGroup};
use pollingo::translation::prompts::{PromptBuilder, PromptEntry, SYSTEM_PROMPT};

#[test]
fn test_formatStrings_shouldRenderOneLinePerEntry() {
    let entries = [
        PromptEntry::new("greeting", "Hello", None),
        PromptEntry::new("action", "Save", Some("Button label")),
    ];

    let formatted = PromptBuilder::new().format_strings(&entries);

    assert_eq!(
        formatted,
        "\n- greeting: \"Hello\"\n- action: \"Save\" (context: Button label)"
    );
}

#[test]
fn test_buildUserMessage_withoutSource_shouldOmitFromClause() {
    let entries = [PromptEntry::new("a", "A", None)];
    let message = PromptBuilder::new().build_user_message(&entries, "French", None, None);

    assert!(message.starts_with("Translate the following strings to French:\n- a: \"A\""));
    assert!(!message.contains(" from "));
}

#[test]
fn test_buildUserMessage_shouldAppendContextOnce() {
    let entries = [PromptEntry::new("save", "Save", Some("Button label"))];
    let message = PromptBuilder::new().build_user_message(&entries, "German", Some("English"), None);

    assert_eq!(message.matches("(context: Button label)").count(), 1);
}

#[test]
fn test_buildUserMessage_shouldBeDeterministic() {
    let group = TranslationGroup::from_entries(
        "ui",
        [
            ("save", TranslatableString::with_context("Save", "Button")),
            ("cancel", TranslatableString::new("Cancel")),
        ],
    );
    let builder = PromptBuilder::new();

    let first = builder.build_group_message(&group, "Spanish", Some("English"), Some("Settings screen"));
    let second = builder.build_group_message(&group, "Spanish", Some("English"), Some("Settings screen"));

    assert_eq!(first, second);
    let save = first.find("- save:").unwrap();
    let cancel = first.find("- cancel:").unwrap();
    assert!(save < cancel, "entries keep group order");
    assert!(first.contains("\nGlobal context: Settings screen\n"));
}

#[test]
fn test_buildMessages_shouldSendSystemThenUser() {
    let messages = PromptBuilder::new().build_messages("Translate the following strings to French:");

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[0].content, SYSTEM_PROMPT);
    assert_eq!(messages[1].role, Role::User);
}

#[test]
fn test_systemPrompt_shouldDescribeTagFormat() {
    assert!(SYSTEM_PROMPT.contains("[KEY:key_name]translated_text[/KEY]"));
    assert!(SYSTEM_PROMPT.contains("[KEY:greeting]Bonjour[/KEY]"));
}
