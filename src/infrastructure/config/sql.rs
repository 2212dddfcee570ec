//! SQL connection settings.

use super::resolver::redact_url;
use crate::domain::Dialect;
use crate::error::{ConfigError, Result};

/// Validated SQL connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct SqlSettings {
    uri: String,
    dialect: Dialect,
}

impl SqlSettings {
    /// Detect the dialect of `uri` and check it against an explicit choice.
    pub fn new(uri: &str, requested: Option<Dialect>) -> Result<Self> {
        let uri = uri.trim().to_string();
        let dialect = Dialect::from_uri(&uri)?;

        if let Some(requested) = requested {
            if requested != dialect {
                return Err(ConfigError::InvalidValue {
                    field: "dialect",
                    reason: format!("{requested} was requested but the URI is for {dialect}"),
                }
                .into());
            }
        }

        Ok(Self { uri, dialect })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    #[must_use]
    pub fn redacted(&self) -> String {
        redact_url(&self.uri)
    }
}

impl std::fmt::Debug for SqlSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlSettings")
            .field("uri", &self.redacted())
            .field("dialect", &self.dialect)
            .finish()
    }
}
