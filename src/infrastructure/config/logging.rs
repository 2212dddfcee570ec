//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Filter directive after applying `-v` flags.
    ///
    /// Zero keeps the configured level; each flag raises it one step
    /// from `info` to `trace`.
    #[must_use]
    pub fn effective_level(&self, verbosity: u8) -> &str {
        match verbosity {
            0 => &self.level,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` takes precedence over both the file and `-v` flags. Logs
    /// go to stderr so command output on stdout stays clean.
    pub fn init(&self, verbosity: u8) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.effective_level(verbosity)));

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };

        if let Err(e) = result {
            eprintln!("logging already initialized: {e}");
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.effective_level(0), "warn");
        assert_eq!(config.effective_level(1), "info");
        assert_eq!(config.effective_level(2), "debug");
        assert_eq!(config.effective_level(5), "trace");
    }

    #[test]
    fn configured_level_used_without_flags() {
        let config = LoggingConfig {
            level: "addon_cli=debug".into(),
            format: "json".into(),
        };
        assert_eq!(config.effective_level(0), "addon_cli=debug");
    }
}
