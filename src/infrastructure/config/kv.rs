//! Key-value store connection settings.

use url::Url;

use super::resolver::redact_url;
use crate::error::{ConfigError, Result};

/// Environment variable holding the key-value store URL.
pub const REDIS_URL_ENV: &str = "REDIS_URL";

/// Port Materia KV serves TLS on.
const MATERIA_TLS_PORT: &str = ":6379";
/// Port Materia KV serves plaintext on.
const MATERIA_PLAIN_PORT: &str = ":6378";

/// Validated key-value connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct KvSettings {
    url: String,
}

impl KvSettings {
    /// Validate a raw URL, applying the Materia KV port rewrite.
    pub fn new(raw: &str) -> Result<Self> {
        let url = rewrite_materia_tls(raw.trim());
        let parsed = Url::parse(&url).map_err(|e| ConfigError::InvalidValue {
            field: REDIS_URL_ENV,
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "redis" | "rediss" => Ok(Self { url }),
            other => Err(ConfigError::InvalidValue {
                field: REDIS_URL_ENV,
                reason: format!("unsupported scheme '{other}', expected redis:// or rediss://"),
            }
            .into()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL with the password masked, for logs and messages.
    #[must_use]
    pub fn redacted(&self) -> String {
        redact_url(&self.url)
    }
}

impl std::fmt::Debug for KvSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvSettings")
            .field("url", &self.redacted())
            .finish()
    }
}

/// Route `rediss://…:6379` to the plaintext port `redis://…:6378`.
///
/// Materia KV exposes TLS on 6379 and plaintext on 6378 for clients that
/// cannot negotiate its TLS endpoint.
#[must_use]
pub fn rewrite_materia_tls(url: &str) -> String {
    match url
        .strip_prefix("rediss://")
        .and_then(|rest| rest.strip_suffix(MATERIA_TLS_PORT))
    {
        Some(authority) => format!("redis://{authority}{MATERIA_PLAIN_PORT}"),
        None => url.to_string(),
    }
}
