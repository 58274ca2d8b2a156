use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::domain::BumpStrategy;
use crate::error::{Result, SemtagError};

/// File name looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "semtag.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".semtag.toml";

/// Represents the complete configuration for git-semtag.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub bump: BumpConfig,

    #[serde(default)]
    pub prompt: PromptConfig,
}

/// How version tags are named.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TagsConfig {
    /// Prepended to the proposed version when a tag is created, and stripped
    /// before parsing existing tags.
    #[serde(default)]
    pub prefix: String,
}

/// Which field the bump engine increments.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct BumpConfig {
    #[serde(default)]
    pub strategy: BumpStrategy,
}

/// Interactive confirmation behavior.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct PromptConfig {
    /// Seconds to wait for an answer before treating the prompt as declined.
    /// Absent means wait forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl PromptConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semtag.toml` in current directory
/// 3. `.semtag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    if let Some(path) = config_path {
        return read_config(Path::new(path));
    }

    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return read_config(&local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(USER_CONFIG_FILE);
        if user.exists() {
            return read_config(&user);
        }
    }

    tracing::debug!("no configuration file found, using defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        SemtagError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&config_str).map_err(|e| {
        SemtagError::config(format!("Cannot parse '{}': {}", path.display(), e))
    })?;

    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
