use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Version;
use crate::error::{ChangelogError, Result};

/// Name of the project-level configuration file
pub const PROJECT_CONFIG_FILE: &str = "changelog.toml";

/// Name of the user-level configuration file inside the config directory
pub const USER_CONFIG_FILE: &str = "changelog-cli.toml";

/// Represents the complete configuration for changelog-cli.
///
/// Contains the changelog location, template settings and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_file")]
    pub file: PathBuf,

    #[serde(default)]
    pub template: TemplateConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Returns the default changelog path.
fn default_file() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

/// Returns the default changelog title.
fn default_title() -> String {
    "Changelog".to_string()
}

/// Returns the version stamped into a freshly created changelog.
fn default_initial_version() -> String {
    "0.0.1".to_string()
}

/// Settings used when a new changelog is created.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TemplateConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_initial_version")]
    pub initial_version: String,
}

impl TemplateConfig {
    /// The initial version, validated
    pub fn initial_version(&self) -> Result<Version> {
        Version::parse(&self.initial_version).map_err(|e| {
            ChangelogError::config(format!("template.initial_version: {}", e))
        })
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            title: default_title(),
            initial_version: default_initial_version(),
        }
    }
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Create a missing changelog without asking first
    #[serde(default)]
    pub auto_init: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file: default_file(),
            template: TemplateConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog.toml` in current directory
/// 3. `changelog-cli.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(PROJECT_CONFIG_FILE).exists() {
        PathBuf::from(PROJECT_CONFIG_FILE)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(USER_CONFIG_FILE);
        if user_config.exists() {
            user_config
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    load_config_file(&path)
}

/// Reads and parses a single configuration file.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        ChangelogError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| ChangelogError::config(format!("{}: {}", path.display(), e)))?;

    config.template.initial_version()?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.file, PathBuf::from("CHANGELOG.md"));
        assert_eq!(config.template.title, "Changelog");
        assert_eq!(
            config.template.initial_version().unwrap(),
            Version::new(0, 0, 1)
        );
        assert!(!config.behavior.auto_init);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[behavior]\nauto_init = true\n").unwrap();
        assert!(config.behavior.auto_init);
        assert_eq!(config.file, PathBuf::from("CHANGELOG.md"));
        assert_eq!(config.template, TemplateConfig::default());
    }

    #[test]
    fn test_invalid_initial_version() {
        let template = TemplateConfig {
            title: "Changelog".to_string(),
            initial_version: "one".to_string(),
        };
        let err = template.initial_version().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
