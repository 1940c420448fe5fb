use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::pollingo::Pollingo;
use crate::translation::model::GroupCollection;

// @module: Application controller for command-line translation

/// Main application controller
pub struct Controller {
    // @field: Configured translation entry point
    pollingo: Pollingo,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let pollingo = Pollingo::from_config(&config)
            .context("Failed to set up translation backend")?;
        Ok(Self::with_pollingo(pollingo))
    }

    /// Create a controller around an already configured instance
    pub fn with_pollingo(pollingo: Pollingo) -> Self {
        Self { pollingo }
    }

    pub fn pollingo(&self) -> &Pollingo {
        &self.pollingo
    }

    /// Translate a single text
    pub async fn translate_text(&self, text: &str) -> Result<String> {
        let translated = self.pollingo.clone().text(text).translate_text().await?;
        Ok(translated)
    }

    /// Translate a collection of groups
    pub async fn translate_groups(&self, groups: GroupCollection) -> Result<GroupCollection> {
        let request = groups.into_iter().fold(self.pollingo.clone(), Pollingo::add_group);
        let translated = request.translate_groups().await?;
        Ok(translated)
    }

    /// Translate a JSON string-group document
    ///
    /// Returns the translated document. When `output` is set it is also
    /// written there; an existing directory receives `<stem>.<lang>.json`.
    pub async fn translate_file(&self, input_file: &Path, output: Option<&Path>) -> Result<String> {
        let groups = FileManager::read_groups(input_file)?;
        info!("Loaded {} group(s) from {:?}", groups.len(), input_file);

        let translated = self.translate_groups(groups).await?;
        let json = FileManager::groups_to_json(&translated)?;

        if let Some(output) = output {
            let output_file = self.resolve_output_path(input_file, output);
            FileManager::write_to_file(&output_file, &json)?;
            info!("Success: {:?}", output_file);
        }

        Ok(json)
    }

    fn resolve_output_path(&self, input_file: &Path, output: &Path) -> PathBuf {
        if FileManager::dir_exists(output) {
            let language = self.pollingo.target_language().unwrap_or("translated");
            FileManager::generate_output_path(input_file, output, language)
        } else {
            output.to_path_buf()
        }
    }
}
