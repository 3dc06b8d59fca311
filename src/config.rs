use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{CalverError, Result};
use crate::release::github::DEFAULT_API_URL;

/// Represents the complete configuration for calver-release.
///
/// Holds release behaviour defaults and the GitHub connection settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

/// Defaults for the release run, overridden by inputs and CLI flags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ReleaseConfig {
    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub draft: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Connection settings for the GitHub backend.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// `owner/repo`; `GITHUB_REPOSITORY` is used when unset
    #[serde(default)]
    pub repository: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
            repository: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `calver.toml` in current directory
/// 3. `.calver.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./calver.toml").exists() {
        fs::read_to_string("./calver.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".calver.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| CalverError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.release.dry_run);
        assert!(!config.release.draft);
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.repository, None);
        assert_eq!(config.github.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config("[release]\ndraft = true\n").unwrap();
        assert!(config.release.draft);
        assert!(!config.release.dry_run);
        assert_eq!(config.github, GitHubConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_config("[release\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
