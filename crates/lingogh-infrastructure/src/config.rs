//! Application configuration loading.
//!
//! A small optional `config.toml` with model overrides. A missing or empty
//! file yields the defaults; a file that exists but cannot be parsed is an
//! error so typos do not silently fall back.

use std::path::Path;

use lingogh_core::error::Result;
use serde::{Deserialize, Serialize};

use crate::paths::LingoghPaths;

/// Default chat / structured-output model.
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
/// Default image synthesis model.
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

/// User configuration (`~/.config/lingogh/config.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model used for chat turns and daily-plan generation
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    /// Model used for image synthesis
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chat_model: default_chat_model(),
            image_model: default_image_model(),
        }
    }
}

impl AppConfig {
    /// Loads the config from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(&content)?)
    }

    /// Loads the config from the default location.
    pub fn load_default() -> Result<Self> {
        Self::load(&LingoghPaths::config_file()?)
    }
}
