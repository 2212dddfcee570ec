//! Application configuration loading.
//!
//! Provides the [`Config`] struct read from an optional TOML file. Every
//! section and key is optional: environment variables and interactive
//! prompts fill whatever the file leaves out (see [`super::resolver`]).
//!
//! # Example
//!
//! ```no_run
//! use addon_cli::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init(0);
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// `[kv]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KvFileConfig {
    pub url: Option<String>,
}

/// `[s3]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct S3FileConfig {
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub bucket: Option<String>,
    pub region: Option<String>,
    /// Default presigned URL lifetime in seconds.
    pub presign_expires: Option<u64>,
}

/// `[sql]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SqlFileConfig {
    pub uri: Option<String>,
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub kv: KvFileConfig,

    #[serde(default)]
    pub s3: S3FileConfig,

    #[serde(default)]
    pub sql: SqlFileConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config = toml::from_str(content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Load the explicit path, or the default path when it exists.
    ///
    /// An explicit path must exist; a missing default yields an empty config.
    pub fn discover(explicit: Option<&Path>, default: PathBuf) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if default.is_file() => Self::load(default),
            None => Ok(Self::default()),
        }
    }
}
