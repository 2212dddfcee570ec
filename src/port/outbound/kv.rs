//! Key-value store port.

use async_trait::async_trait;

use crate::domain::Reply;
use crate::error::Result;

/// A connection able to execute raw key-value commands.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Send `command` with `args` and return the server reply.
    ///
    /// The command name is passed as given; callers normalize case.
    async fn send(&self, command: &str, args: &[String]) -> Result<Reply>;
}
