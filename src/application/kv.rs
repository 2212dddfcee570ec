//! Raw key-value command passthrough.

use tracing::debug;

use crate::domain::Reply;
use crate::error::{Error, Result};
use crate::port::KeyValueStore;

/// Sends one raw command to a key-value store.
pub struct KvService<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> KvService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Upper-case `command` and send it with `args` untouched.
    pub async fn send(&self, command: &str, args: &[String]) -> Result<Reply> {
        let command = command.trim().to_ascii_uppercase();
        if command.is_empty() {
            return Err(Error::Validation("a command name is required".into()));
        }
        debug!(command = %command, args = args.len(), "sending key-value command");
        self.store.send(&command, args).await
    }
}
