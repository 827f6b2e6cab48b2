//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sqldeps.toml` in current directory
//! 4. `~/.config/sqldeps/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [cache]
//! dir = ".sqldeps_cache"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQLDEPS_CACHE_DIR` | Cache root directory |

use std::{env, fs, path::PathBuf};

use serde::Deserialize;

use crate::{
    cache::DEFAULT_CACHE_DIR,
    error::{AppResult, config_error}
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Cache root directory for persisted profiles
    pub dir: PathBuf
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_CACHE_DIR)
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sqldeps.toml)
    /// 3. Config file in home directory (~/.config/sqldeps/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        // Try to load from home directory config
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sqldeps")
                .join("config.toml");

            if home_config.exists() {
                let content = fs::read_to_string(&home_config)
                    .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
                config = toml::from_str(&content)
                    .map_err(|e| config_error(format!("Invalid config file: {}", e)))?;
            }
        }

        // Try to load from current directory config (overrides home config)
        let local_config = PathBuf::from(".sqldeps.toml");
        if local_config.exists() {
            let content = fs::read_to_string(&local_config)
                .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
            config = toml::from_str(&content)
                .map_err(|e| config_error(format!("Invalid config file: {}", e)))?;
        }

        // Override with environment variables
        if let Some(dir) = env::var_os("SQLDEPS_CACHE_DIR") {
            config.cache.dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}
