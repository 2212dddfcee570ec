use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("Unsupported database type. Only MySQL and PostgreSQL are supported (got scheme '{scheme}')")]
    UnsupportedDatabase { scheme: String },
}

/// Object storage errors surfaced to the operator.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Bucket '{bucket}' does not exist or access denied")]
    NoSuchBucket { bucket: String },

    #[error("File \"{key}\" does not exist in bucket \"{bucket}\"")]
    ObjectNotFound { key: String, bucket: String },

    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    #[error("failed to presign: {0}")]
    Presign(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("cancelled by user")]
    Cancelled,

    #[error("not interactive: cannot prompt for {what} (set {hint})")]
    NotInteractive { what: String, hint: String },

    #[error("{0}")]
    Validation(String),

    #[error("Todo with ID {id} not found")]
    TodoNotFound { id: i32 },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
                Error::Cancelled
            }
            dialoguer::Error::IO(io) => Error::Prompt(io.to_string()),
        }
    }
}

impl Error {
    /// True when the user backed out of an interactive prompt.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
