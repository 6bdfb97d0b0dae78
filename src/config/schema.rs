//! Configuration schema for gh-outbound
//!
//! Configuration is stored at `~/.config/gh-outbound/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// License cache settings
    pub cache: CacheConfig,

    /// GitHub CLI settings
    pub github: GithubConfig,

    /// flict settings
    pub solver: SolverConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// License cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache file (defaults to `.gh-licensecheck_github_cache` next to the executable)
    pub path: Option<PathBuf>,

    /// Seconds to wait between GitHub lookups
    pub interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: None,
            interval_secs: 3,
        }
    }
}

/// GitHub CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// gh executable
    pub program: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            program: "gh".to_string(),
        }
    }
}

/// flict configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// flict executable, relative paths resolve against `working_dir`
    pub program: String,

    /// Directory flict runs in (defaults to the executable's directory)
    pub working_dir: Option<PathBuf>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            program: "./flict".to_string(),
            working_dir: None,
        }
    }
}
