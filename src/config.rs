//! Configuration file support
//!
//! Loads settings from ~/.decor.toml (or %USERPROFILE%\.decor.toml on Windows)
//!
//! Example:
//! ```text
//! # decor configuration
//! block-per-line = false
//! default-syntax = "javascript"
//! code-block = "code_block"
//! class-prefix = "token"
//! cache = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decorate::{DEFAULT_CLASS_PREFIX, DEFAULT_CODE_BLOCK, DEFAULT_SYNTAX};
use crate::error::Result;

const CONFIG_FILE: &str = ".decor.toml";

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Tokenize each line on its own instead of the whole block
    pub block_per_line: bool,
    /// Grammar for blocks that name none
    pub default_syntax: String,
    /// Block kind eligible for highlighting
    pub code_block: String,
    /// Prefix of emitted class names
    pub class_prefix: String,
    /// Whether the block cache is enabled
    pub cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_per_line: false,
            default_syntax: DEFAULT_SYNTAX.to_string(),
            code_block: DEFAULT_CODE_BLOCK.to_string(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            cache: true,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Load configuration from the default location
    ///
    /// A missing file gives the defaults; an unreadable or invalid one is
    /// reported and also gives the defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    /// Load configuration from a file, falling back to the defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(Into::into)
            .and_then(|contents| Self::parse(&contents));
        match parsed {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring config file");
                Config::default()
            }
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save current configuration to the default location
    ///
    /// Returns the path written, or `None` when no home directory is known.
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(path) = Self::config_path() else {
            return Ok(None);
        };
        self.save_to(&path)?;
        Ok(Some(path))
    }

    /// Save current configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(format!("# decor configuration\n{}", toml::to_string(self)?))
    }
}
