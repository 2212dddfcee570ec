//! Todo list use cases.

use tracing::info;

use crate::domain::{Task, Todo, TodoId, TodoStats};
use crate::error::{Error, Result};
use crate::port::TodoStore;

/// Todo operations over a [`TodoStore`].
pub struct TodoService<'a, S: TodoStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: TodoStore + ?Sized> TodoService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create the table when missing.
    pub async fn setup(&self) -> Result<()> {
        self.store.ensure_schema().await?;
        info!(dialect = %self.store.dialect(), "todo table ready");
        Ok(())
    }

    pub async fn add(&self, task: &Task) -> Result<TodoId> {
        let id = self.store.insert(task).await?;
        info!(id = %id, "added todo");
        Ok(id)
    }

    pub async fn list(&self) -> Result<Vec<Todo>> {
        self.store.list().await
    }

    async fn existing(&self, id: TodoId) -> Result<Todo> {
        self.store
            .find(id)
            .await?
            .ok_or(Error::TodoNotFound { id: id.get() })
    }

    /// Flip completion and return the todo in its new state.
    pub async fn toggle(&self, id: TodoId) -> Result<Todo> {
        let mut todo = self.existing(id).await?;
        todo.completed = !todo.completed;
        self.store.set_completed(id, todo.completed).await?;
        info!(id = %id, completed = todo.completed, "toggled todo");
        Ok(todo)
    }

    /// Delete and return the removed todo.
    pub async fn delete(&self, id: TodoId) -> Result<Todo> {
        let todo = self.existing(id).await?;
        self.store.delete(id).await?;
        info!(id = %id, "deleted todo");
        Ok(todo)
    }

    pub async fn stats(&self) -> Result<TodoStats> {
        self.store.stats().await
    }
}
