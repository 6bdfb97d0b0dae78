//! Configuration management for gh-outbound

pub mod schema;

pub use schema::Config;

use crate::error::{OutboundError, OutboundResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File name of the license cache when no path is configured
pub const DEFAULT_CACHE_FILE: &str = ".gh-licensecheck_github_cache";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gh-outbound")
            .join("config.toml")
    }

    /// Directory holding the running executable
    ///
    /// Falls back to the current directory when it cannot be determined.
    pub fn tool_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Default license cache location, next to the executable
    pub fn default_cache_path() -> PathBuf {
        Self::tool_dir().join(DEFAULT_CACHE_FILE)
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> OutboundResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> OutboundResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| OutboundError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| OutboundError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
