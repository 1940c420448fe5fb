use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::translation::model::{GroupCollection, StringInput, TranslatableString, TranslationGroup};

// @module: File utilities for string group documents

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for a translated document, e.g. messages.fr.json
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        target_language: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(target_language);
        output_filename.push_str(".json");

        output_dir.as_ref().join(output_filename)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Read a `{group: {key: string}}` document
    pub fn read_groups<P: AsRef<Path>>(path: P) -> Result<GroupCollection> {
        let content = Self::read_to_string(&path)?;
        Self::parse_groups(&content)
            .with_context(|| format!("Invalid string groups in {:?}", path.as_ref()))
    }

    /// Parse a `{group: {key: "text" | {"text": ..., "context": ...}}}` document
    ///
    /// Groups and keys keep their document order.
    pub fn parse_groups(json: &str) -> Result<GroupCollection> {
        let document: Map<String, Value> =
            serde_json::from_str(json).context("Expected a JSON object of groups")?;

        let mut groups = GroupCollection::new();
        for (name, strings) in document {
            let Value::Object(strings) = strings else {
                return Err(anyhow!("Group '{}' must be a JSON object", name));
            };

            let mut group = TranslationGroup::new(name.as_str());
            for (key, value) in strings {
                let input: StringInput = serde_json::from_value(value).with_context(|| {
                    format!(
                        "String '{}' in group '{}' must be text or {{\"text\", \"context\"}}",
                        key, name
                    )
                })?;
                group.insert(key, TranslatableString::from(input));
            }
            groups.insert(group);
        }

        Ok(groups)
    }

    /// Render translated groups as pretty JSON
    pub fn groups_to_json(groups: &GroupCollection) -> Result<String> {
        serde_json::to_string_pretty(groups).context("Failed to serialize translated groups")
    }
}
