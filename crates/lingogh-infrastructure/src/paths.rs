//! Unified path management for Lingogh configuration and data.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/lingogh/           # Config directory
//! └── config.toml              # Model overrides
//!
//! ~/.local/share/lingogh/      # Data directory (or --data-dir override)
//! ├── plans/                   # Persisted daily plans, one file per key
//! └── images/                  # Generated PNGs
//! ```

use std::path::{Path, PathBuf};

use lingogh_core::error::{LingoghError, Result};

/// Directory name used beneath the platform config and data directories.
pub const APP_DIR: &str = "lingogh";

/// Resolves the directories Lingogh reads and writes.
#[derive(Debug, Clone)]
pub struct LingoghPaths {
    data_dir: PathBuf,
}

impl LingoghPaths {
    /// Uses `base` when given (tests, `--data-dir`), otherwise the platform
    /// data directory.
    ///
    /// # Errors
    ///
    /// Fails when no override is given and the platform data directory
    /// cannot be determined.
    pub fn new(base: Option<PathBuf>) -> Result<Self> {
        let data_dir = match base {
            Some(dir) => dir,
            None => dirs::data_dir()
                .ok_or_else(|| LingoghError::config("Cannot find data directory"))?
                .join(APP_DIR),
        };
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory holding one JSON file per persisted daily plan.
    pub fn plans_dir(&self) -> PathBuf {
        self.data_dir.join("plans")
    }

    /// Directory generated images are written to.
    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }

    /// Path to the optional configuration file.
    pub fn config_file() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join("config.toml"))
            .ok_or_else(|| LingoghError::config("Cannot find config directory"))
    }
}
