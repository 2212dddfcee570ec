//! Key-value server replies, independent of the client crate.

use serde_json::{json, Map, Value};

/// A reply returned by the key-value server for a raw command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Nil,
    Integer(i64),
    Double(f64),
    Boolean(bool),
    /// `+OK` style acknowledgement.
    Okay,
    /// Simple status string such as `PONG`.
    Status(String),
    /// Bulk string payload, possibly binary.
    Bulk(Vec<u8>),
    Array(Vec<Reply>),
    Set(Vec<Reply>),
    Map(Vec<(Reply, Reply)>),
}

impl Reply {
    /// Build a bulk reply from text.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Bulk(value.into().into_bytes())
    }

    /// Convert the reply into a JSON value for structured output.
    ///
    /// Bulk strings that are not valid UTF-8 become an array of byte values.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Reply::Nil => Value::Null,
            Reply::Integer(n) => json!(n),
            Reply::Double(d) => json!(d),
            Reply::Boolean(b) => json!(b),
            Reply::Okay => json!("OK"),
            Reply::Status(s) => json!(s),
            Reply::Bulk(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => json!(text),
                Err(_) => json!(bytes),
            },
            Reply::Array(items) | Reply::Set(items) => {
                Value::Array(items.iter().map(Reply::to_json).collect())
            }
            Reply::Map(pairs) => {
                let mut map = Map::with_capacity(pairs.len());
                for (key, value) in pairs {
                    map.insert(key.map_key(), value.to_json());
                }
                Value::Object(map)
            }
        }
    }

    /// Render the reply for a terminal.
    ///
    /// Top-level text prints raw, scalars print as literals, and
    /// aggregates print as pretty JSON.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Reply::Okay => "OK".to_string(),
            Reply::Status(s) => s.clone(),
            Reply::Bulk(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => text.to_string(),
                Err(_) => self.to_json().to_string(),
            },
            Reply::Nil => "null".to_string(),
            Reply::Integer(n) => n.to_string(),
            Reply::Double(d) => d.to_string(),
            Reply::Boolean(b) => b.to_string(),
            Reply::Array(_) | Reply::Set(_) | Reply::Map(_) => {
                serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
            }
        }
    }

    fn map_key(&self) -> String {
        match self.to_json() {
            Value::String(s) => s,
            other => other.to_string(),
        }
    }
}
