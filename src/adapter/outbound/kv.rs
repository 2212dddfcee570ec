//! Redis-protocol key-value adapter.
//!
//! Sends raw commands over one multiplexed connection and maps the
//! client's value type onto [`Reply`].

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::Value;
use tracing::{debug, info};

use crate::domain::Reply;
use crate::error::Result;
use crate::infrastructure::config::kv::KvSettings;
use crate::port::KeyValueStore;

/// A connected key-value store.
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    /// Open a single multiplexed connection.
    pub async fn connect(settings: &KvSettings) -> Result<Self> {
        let client = redis::Client::open(settings.url())?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!(url = %settings.redacted(), "connected to key-value store");
        Ok(Self { conn })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn send(&self, command: &str, args: &[String]) -> Result<Reply> {
        let mut cmd = redis::cmd(command);
        for arg in args {
            cmd.arg(arg);
        }

        let mut conn = self.conn.clone();
        let value: Value = cmd.query_async(&mut conn).await?;
        debug!(command, "received reply");
        Ok(reply_from_value(value))
    }
}

/// Convert a client value into a [`Reply`].
pub fn reply_from_value(value: Value) -> Reply {
    match value {
        Value::Nil => Reply::Nil,
        Value::Int(n) => Reply::Integer(n),
        Value::BulkString(bytes) => Reply::Bulk(bytes),
        Value::SimpleString(s) => Reply::Status(s),
        Value::Okay => Reply::Okay,
        Value::Double(d) => Reply::Double(d),
        Value::Boolean(b) => Reply::Boolean(b),
        Value::VerbatimString { text, .. } => Reply::text(text),
        Value::Array(items) => Reply::Array(items.into_iter().map(reply_from_value).collect()),
        Value::Set(items) => Reply::Set(items.into_iter().map(reply_from_value).collect()),
        Value::Map(pairs) => Reply::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (reply_from_value(k), reply_from_value(v)))
                .collect(),
        ),
        Value::Attribute { data, .. } => reply_from_value(*data),
        Value::Push { data, .. } => Reply::Array(data.into_iter().map(reply_from_value).collect()),
        Value::ServerError(err) => Reply::Status(server_error_text(err.code(), err.details())),
        // Big numbers only exist with the client's `num-bigint` feature.
        other => Reply::Status(format!("{other:?}")),
    }
}

/// Render an error nested inside a reply the way the server sent it.
fn server_error_text(code: &str, details: Option<&str>) -> String {
    match details {
        Some(details) => format!("{code} {details}"),
        None => code.to_string(),
    }
}
