//! Object storage connection settings.

use crate::domain::object::{validate_expiry, DEFAULT_PRESIGN_EXPIRES};
use crate::error::{ConfigError, Result};

pub const HOST_ENV: &str = "CELLAR_ADDON_HOST";
pub const KEY_ID_ENV: &str = "CELLAR_ADDON_KEY_ID";
pub const KEY_SECRET_ENV: &str = "CELLAR_ADDON_KEY_SECRET";
pub const REGION_ENV: &str = "CELLAR_ADDON_REGION";

/// Endpoint offered when none is configured.
pub const DEFAULT_ENDPOINT: &str = "cellar-fr-north-hds-c1.services.clever-cloud.com";

/// Region sent when none is configured; the provider ignores it.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Validated object storage settings.
#[derive(Clone, PartialEq, Eq)]
pub struct S3Settings {
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub region: String,
    pub presign_expires: u64,
}

/// Raw values gathered from flags, env, file and prompts.
#[derive(Debug, Clone, Default)]
pub struct S3Parts {
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub region: Option<String>,
    pub presign_expires: Option<u64>,
}

impl S3Settings {
    pub fn new(parts: S3Parts) -> Result<Self> {
        let endpoint = endpoint_url(parts.endpoint.trim());
        let access_key_id = required(parts.access_key_id, "access_key_id")?;
        let secret_access_key = required(parts.secret_access_key, "secret_access_key")?;
        let bucket = required(parts.bucket, "bucket")?;
        validate_bucket(&bucket)?;

        let presign_expires = match parts.presign_expires {
            Some(seconds) => validate_expiry(seconds).map_err(|e| ConfigError::InvalidValue {
                field: "presign_expires",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PRESIGN_EXPIRES,
        };

        Ok(Self {
            endpoint,
            access_key_id,
            secret_access_key,
            bucket,
            region: parts
                .region
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            presign_expires,
        })
    }
}

impl std::fmt::Debug for S3Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Settings")
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("presign_expires", &self.presign_expires)
            .finish()
    }
}

fn required(value: String, field: &'static str) -> Result<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    Ok(value)
}

/// Prefix a bare host with `https://`.
#[must_use]
pub fn endpoint_url(host: &str) -> String {
    let host = if host.is_empty() { DEFAULT_ENDPOINT } else { host };
    if host.contains("://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", host.trim_end_matches('/'))
    }
}

/// Check S3 bucket naming rules.
pub fn validate_bucket(bucket: &str) -> Result<()> {
    let invalid = |reason: &str| -> crate::error::Error {
        ConfigError::InvalidValue {
            field: "bucket",
            reason: format!("'{bucket}' {reason}"),
        }
        .into()
    };

    if !(3..=63).contains(&bucket.len()) {
        return Err(invalid("must be 3 to 63 characters long"));
    }
    if !bucket
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(invalid(
            "may only contain lowercase letters, digits, '.' and '-'",
        ));
    }
    let edge_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
    if !edge_ok(bucket.chars().next()) || !edge_ok(bucket.chars().last()) {
        return Err(invalid("must start and end with a letter or digit"));
    }
    Ok(())
}
