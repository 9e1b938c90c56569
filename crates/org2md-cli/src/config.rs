//! Configuration file support for the org2md CLI
//!
//! Loads settings from an `_org2md.toml` configuration file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use org2md_core::ConvertOptions;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_org2md.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Attachment link configuration
    pub links: LinksConfig,
    /// Code fence configuration
    pub code: CodeConfig,
}

/// Attachment link configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// File extensions (without the dot) rendered as image embeds.
    /// Replaces the built-in set (png, jpg, jpeg, gif, bmp, svg).
    pub image_extensions: Option<Vec<String>>,
}

/// Code fence configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    /// Language tag for `#+begin_src` lines that carry none.
    /// An empty string keeps the bare fence.
    pub default_language: Option<String>,
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_org2md.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Turn the loaded configuration into pipeline options
    pub fn to_options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::default();
        if let Some(extensions) = &self.links.image_extensions {
            options.image_extensions = extensions.clone();
        }
        if let Some(language) = &self.code.default_language {
            if !language.is_empty() {
                options.default_language = Some(language.clone());
            }
        }
        options
    }
}
