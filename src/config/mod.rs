//! Global configuration management for merkle_parts
//!
//! This module provides user-level defaults stored as TOML in
//! ~/.merkle-parts/config.toml

pub mod global_config;

// Re-export commonly used items
pub use global_config::{ConfigKey, ConfigValue, GlobalConfig, CONFIG_PATH_ENV, OUTPUT_FORMATS};
