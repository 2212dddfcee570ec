//! MySQL and PostgreSQL adapter built on `sqlx`.
//!
//! The demo only ever needs one connection, so each pool is capped at one.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use crate::domain::{Dialect, Task, Todo, TodoId, TodoStats};
use crate::error::{Error, Result};
use crate::infrastructure::config::sql::SqlSettings;
use crate::port::{Database, ServerInfo, TodoStore};

const SELECT_TODOS: &str = "SELECT id, task, completed, created_at FROM todos";

enum Pool {
    Postgres(PgPool),
    MySql(MySqlPool),
}

/// A connected database of either dialect.
pub struct SqlDatabase {
    pool: Pool,
}

#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: i32,
    task: String,
    completed: Option<bool>,
    created_at: Option<NaiveDateTime>,
}

impl TodoRow {
    fn into_todo(self) -> Result<Todo> {
        Ok(Todo {
            id: TodoId::new(self.id)?,
            task: self.task,
            completed: self.completed.unwrap_or(false),
            created_at: self.created_at,
        })
    }
}

impl SqlDatabase {
    /// Open a single-connection pool for the settings' dialect.
    pub async fn connect(settings: &SqlSettings) -> Result<Self> {
        let pool = match settings.dialect() {
            Dialect::PostgreSql => Pool::Postgres(
                PgPoolOptions::new()
                    .max_connections(1)
                    .connect(settings.uri())
                    .await?,
            ),
            Dialect::MySql => Pool::MySql(
                MySqlPoolOptions::new()
                    .max_connections(1)
                    .connect(settings.uri())
                    .await?,
            ),
        };
        info!(
            dialect = %settings.dialect(),
            uri = %settings.redacted(),
            "connected to database"
        );
        Ok(Self { pool })
    }

    async fn count(&self, filter: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM todos{filter}");
        let count: i64 = match &self.pool {
            Pool::Postgres(pool) => sqlx::query_scalar(&sql).fetch_one(pool).await?,
            Pool::MySql(pool) => sqlx::query_scalar(&sql).fetch_one(pool).await?,
        };
        Ok(count)
    }
}

#[async_trait]
impl Database for SqlDatabase {
    fn dialect(&self) -> Dialect {
        match self.pool {
            Pool::Postgres(_) => Dialect::PostgreSql,
            Pool::MySql(_) => Dialect::MySql,
        }
    }

    async fn server_info(&self) -> Result<ServerInfo> {
        let info = match &self.pool {
            Pool::Postgres(pool) => {
                let test: i32 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
                let version: String = sqlx::query_scalar("SELECT VERSION()")
                    .fetch_one(pool)
                    .await?;
                ServerInfo {
                    test: i64::from(test),
                    version,
                }
            }
            Pool::MySql(pool) => {
                let test: i64 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
                let version: String = sqlx::query_scalar("SELECT VERSION()")
                    .fetch_one(pool)
                    .await?;
                ServerInfo { test, version }
            }
        };
        debug!(version = %info.version, "server answered");
        Ok(info)
    }

    async fn close(&self) {
        match &self.pool {
            Pool::Postgres(pool) => pool.close().await,
            Pool::MySql(pool) => pool.close().await,
        }
        debug!("database connection closed");
    }
}

#[async_trait]
impl TodoStore for SqlDatabase {
    async fn ensure_schema(&self) -> Result<()> {
        let schema = self.dialect().todo_schema();
        match &self.pool {
            Pool::Postgres(pool) => {
                sqlx::query(schema).execute(pool).await?;
            }
            Pool::MySql(pool) => {
                sqlx::query(schema).execute(pool).await?;
            }
        }
        Ok(())
    }

    async fn insert(&self, task: &Task) -> Result<TodoId> {
        let id = match &self.pool {
            Pool::Postgres(pool) => {
                sqlx::query_scalar::<_, i32>("INSERT INTO todos (task) VALUES ($1) RETURNING id")
                    .bind(task.as_str())
                    .fetch_one(pool)
                    .await?
            }
            Pool::MySql(pool) => {
                let result = sqlx::query("INSERT INTO todos (task) VALUES (?)")
                    .bind(task.as_str())
                    .execute(pool)
                    .await?;
                i32::try_from(result.last_insert_id()).map_err(|_| {
                    Error::Validation(format!(
                        "inserted id {} does not fit the todo id column",
                        result.last_insert_id()
                    ))
                })?
            }
        };
        debug!(id, "inserted todo");
        TodoId::new(id)
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let sql = format!("{SELECT_TODOS} ORDER BY created_at DESC, id DESC");
        let rows: Vec<TodoRow> = match &self.pool {
            Pool::Postgres(pool) => sqlx::query_as(&sql).fetch_all(pool).await?,
            Pool::MySql(pool) => sqlx::query_as(&sql).fetch_all(pool).await?,
        };
        rows.into_iter().map(TodoRow::into_todo).collect()
    }

    async fn find(&self, id: TodoId) -> Result<Option<Todo>> {
        let row: Option<TodoRow> = match &self.pool {
            Pool::Postgres(pool) => {
                sqlx::query_as(&format!("{SELECT_TODOS} WHERE id = $1"))
                    .bind(id.get())
                    .fetch_optional(pool)
                    .await?
            }
            Pool::MySql(pool) => {
                sqlx::query_as(&format!("{SELECT_TODOS} WHERE id = ?"))
                    .bind(id.get())
                    .fetch_optional(pool)
                    .await?
            }
        };
        row.map(TodoRow::into_todo).transpose()
    }

    async fn set_completed(&self, id: TodoId, completed: bool) -> Result<()> {
        match &self.pool {
            Pool::Postgres(pool) => {
                sqlx::query("UPDATE todos SET completed = $1 WHERE id = $2")
                    .bind(completed)
                    .bind(id.get())
                    .execute(pool)
                    .await?;
            }
            Pool::MySql(pool) => {
                sqlx::query("UPDATE todos SET completed = ? WHERE id = ?")
                    .bind(completed)
                    .bind(id.get())
                    .execute(pool)
                    .await?;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> Result<()> {
        match &self.pool {
            Pool::Postgres(pool) => {
                sqlx::query("DELETE FROM todos WHERE id = $1")
                    .bind(id.get())
                    .execute(pool)
                    .await?;
            }
            Pool::MySql(pool) => {
                sqlx::query("DELETE FROM todos WHERE id = ?")
                    .bind(id.get())
                    .execute(pool)
                    .await?;
            }
        }
        Ok(())
    }

    async fn stats(&self) -> Result<TodoStats> {
        let total = self.count("").await?;
        let completed = self.count(" WHERE completed = TRUE").await?;
        let pending = self
            .count(" WHERE completed = FALSE OR completed IS NULL")
            .await?;
        Ok(TodoStats {
            total,
            completed,
            pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_completed_reads_as_pending() {
        let todo = TodoRow {
            id: 3,
            task: "water plants".into(),
            completed: None,
            created_at: None,
        }
        .into_todo()
        .unwrap();
        assert!(!todo.completed);
        assert_eq!(todo.id.get(), 3);
    }

    #[test]
    fn non_positive_row_ids_are_rejected() {
        let row = TodoRow {
            id: 0,
            task: "ghost".into(),
            completed: Some(true),
            created_at: None,
        };
        assert!(row.into_todo().is_err());
    }
}
