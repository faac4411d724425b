//! Global configuration management
//!
//! Settings live in `~/.merkle-parts/config.toml`. The `MERKLE_PARTS_CONFIG`
//! environment variable points at an alternative file.

use crate::core::error::{MerkleError, Result};
use crate::proofs::DEFAULT_PARALLEL_THRESHOLD;
use crate::storage::DEFAULT_CHUNK_SIZE;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "MERKLE_PARTS_CONFIG";

/// Encodings accepted for `output.format`
pub const OUTPUT_FORMATS: &[&str] = &["json", "binary"];

/// Global configuration for merkle-parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Chunking and tree-building settings
    #[serde(default)]
    pub core: CoreConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Chunk size in bytes
    pub chunk_size: Option<usize>,
    /// Chunk count at which leaf hashing runs in parallel
    pub parallel_threshold: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default encoding for written parts: json or binary
    pub format: Option<String>,
}

/// Configuration value types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Number(i64),
    Boolean(bool),
}

impl ConfigValue {
    /// Parse command-line text into the most specific value type
    pub fn parse(text: &str) -> Self {
        if let Ok(num) = text.parse::<i64>() {
            return ConfigValue::Number(num);
        }
        match text.to_lowercase().as_str() {
            "true" | "yes" | "on" => ConfigValue::Boolean(true),
            "false" | "no" | "off" => ConfigValue::Boolean(false),
            _ => ConfigValue::String(text.to_string()),
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Configuration key for setting values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    CoreChunkSize,
    CoreParallelThreshold,
    OutputFormat,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::CoreChunkSize,
        ConfigKey::CoreParallelThreshold,
        ConfigKey::OutputFormat,
    ];

    pub fn from_str(key: &str) -> Option<Self> {
        match key {
            "core.chunk_size" => Some(ConfigKey::CoreChunkSize),
            "core.parallel_threshold" => Some(ConfigKey::CoreParallelThreshold),
            "output.format" => Some(ConfigKey::OutputFormat),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            ConfigKey::CoreChunkSize => "core.chunk_size",
            ConfigKey::CoreParallelThreshold => "core.parallel_threshold",
            ConfigKey::OutputFormat => "output.format",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConfigKey::CoreChunkSize => "Chunk size in bytes",
            ConfigKey::CoreParallelThreshold => "Chunk count for parallel leaf hashing",
            ConfigKey::OutputFormat => "Default part encoding (json or binary)",
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        toml::from_str(&content).map_err(|e| MerkleError::ConfigurationError {
            reason: format!("Failed to parse config {}: {}", config_path.display(), e),
        })
    }

    /// Save global configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| MerkleError::ConfigurationError {
                reason: format!("Failed to serialize config: {}", e),
            })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the path to the global configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let user_dirs = UserDirs::new().ok_or(MerkleError::HomeDirectoryNotFound)?;
        Ok(user_dirs
            .home_dir()
            .join(".merkle-parts")
            .join("config.toml"))
    }

    /// Get a configuration value
    pub fn get(&self, key: &ConfigKey) -> Option<ConfigValue> {
        match key {
            ConfigKey::CoreChunkSize => self.core.chunk_size.map(|n| ConfigValue::Number(n as i64)),
            ConfigKey::CoreParallelThreshold => self
                .core
                .parallel_threshold
                .map(|n| ConfigValue::Number(n as i64)),
            ConfigKey::OutputFormat => self.output.format.clone().map(ConfigValue::String),
        }
    }

    /// Set a configuration value
    pub fn set(&mut self, key: ConfigKey, value: ConfigValue) -> Result<()> {
        match key {
            ConfigKey::CoreChunkSize => {
                self.core.chunk_size = Some(positive_number(key, value)?);
            },
            ConfigKey::CoreParallelThreshold => {
                self.core.parallel_threshold = Some(positive_number(key, value)?);
            },
            ConfigKey::OutputFormat => match value {
                ConfigValue::String(format) if OUTPUT_FORMATS.contains(&format.as_str()) => {
                    self.output.format = Some(format);
                },
                _ => {
                    return Err(MerkleError::configuration(format!(
                        "{} must be one of: {}",
                        key.to_str(),
                        OUTPUT_FORMATS.join(", ")
                    )))
                },
            },
        }
        Ok(())
    }

    /// Unset a configuration value
    pub fn unset(&mut self, key: &ConfigKey) {
        match key {
            ConfigKey::CoreChunkSize => self.core.chunk_size = None,
            ConfigKey::CoreParallelThreshold => self.core.parallel_threshold = None,
            ConfigKey::OutputFormat => self.output.format = None,
        }
    }

    /// List all configuration values that are set
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = ConfigKey::ALL
            .iter()
            .filter_map(|key| {
                self.get(key)
                    .map(|value| (key.to_str().to_string(), value.to_string()))
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Effective chunk size
    pub fn chunk_size(&self) -> usize {
        self.core.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    /// Effective parallel hashing threshold
    pub fn parallel_threshold(&self) -> usize {
        self.core
            .parallel_threshold
            .unwrap_or(DEFAULT_PARALLEL_THRESHOLD)
    }

    /// Effective output format
    pub fn output_format(&self) -> &str {
        self.output.format.as_deref().unwrap_or("json")
    }
}

fn positive_number(key: ConfigKey, value: ConfigValue) -> Result<usize> {
    match value {
        ConfigValue::Number(n) if n > 0 => Ok(n as usize),
        _ => Err(MerkleError::configuration(format!(
            "{} must be a positive number",
            key.to_str()
        ))),
    }
}
