//! Path utilities for addon-cli.
//!
//! Local state lives under `~/.addon-cli/`:
//! - `~/.addon-cli/config.toml` - optional defaults for every add-on

use std::path::PathBuf;

/// Returns the addon-cli home directory (`~/.addon-cli/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".addon-cli")
}

/// Returns the default config file path (`~/.addon-cli/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
