//! SQL dialects supported by the todo demo.

use std::fmt;

use crate::error::{ConfigError, Result};

/// Database flavour, detected from the connection URI scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    PostgreSql,
    MySql,
}

impl Dialect {
    /// Detect the dialect from a connection URI.
    pub fn from_uri(uri: &str) -> Result<Self> {
        let scheme = uri
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .unwrap_or_default()
            .to_ascii_lowercase();

        match scheme.as_str() {
            "postgresql" | "postgres" => Ok(Self::PostgreSql),
            "mysql" => Ok(Self::MySql),
            _ => Err(ConfigError::UnsupportedDatabase { scheme }.into()),
        }
    }

    /// Environment variable the hosting platform uses for this dialect.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::PostgreSql => "POSTGRESQL_ADDON_URI",
            Self::MySql => "MYSQL_ADDON_URI",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PostgreSql => "PostgreSQL",
            Self::MySql => "MySQL",
        }
    }

    /// `CREATE TABLE` statement for the todo table.
    #[must_use]
    pub const fn todo_schema(self) -> &'static str {
        match self {
            Self::PostgreSql => {
                "CREATE TABLE IF NOT EXISTS todos (
                    id SERIAL PRIMARY KEY,
                    task VARCHAR(255) NOT NULL,
                    completed BOOLEAN DEFAULT FALSE,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )"
            }
            Self::MySql => {
                "CREATE TABLE IF NOT EXISTS todos (
                    id INT AUTO_INCREMENT PRIMARY KEY,
                    task VARCHAR(255) NOT NULL,
                    completed BOOLEAN DEFAULT FALSE,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )"
            }
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
