//! SQL database ports.

use async_trait::async_trait;

use crate::domain::{Dialect, Task, Todo, TodoId, TodoStats};
use crate::error::Result;

/// Answers of the connectivity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    /// Value returned by `SELECT 1`.
    pub test: i64,
    /// Value returned by `SELECT VERSION()`.
    pub version: String,
}

/// A single-connection handle to a relational database.
#[async_trait]
pub trait Database: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Run `SELECT 1` and `SELECT VERSION()`.
    async fn server_info(&self) -> Result<ServerInfo>;

    /// Close the connection. Further calls fail.
    async fn close(&self);
}

/// Storage for the `todos` table.
#[async_trait]
pub trait TodoStore: Database {
    /// Create the table if it does not exist.
    async fn ensure_schema(&self) -> Result<()>;

    /// Insert a task and return its new id.
    async fn insert(&self, task: &Task) -> Result<TodoId>;

    /// All todos, newest first.
    async fn list(&self) -> Result<Vec<Todo>>;

    async fn find(&self, id: TodoId) -> Result<Option<Todo>>;

    async fn set_completed(&self, id: TodoId, completed: bool) -> Result<()>;

    async fn delete(&self, id: TodoId) -> Result<()>;

    async fn stats(&self) -> Result<TodoStats>;
}
