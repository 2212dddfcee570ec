//! In-memory todo table.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::{Dialect, Task, Todo, TodoId, TodoStats};
use crate::error::{Error, Result};
use crate::port::{Database, ServerInfo, TodoStore};

#[derive(Default)]
struct Table {
    created: bool,
    next_id: i32,
    rows: Vec<Todo>,
}

/// A `todos` table held in memory.
///
/// Timestamps advance one minute per insert so ordering is deterministic.
/// Calls before [`TodoStore::ensure_schema`] fail like a missing table.
pub struct MemoryTodos {
    dialect: Dialect,
    table: Mutex<Table>,
    closed: AtomicBool,
}

impl MemoryTodos {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            table: Mutex::new(Table::default()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn with_table<T>(&self, f: impl FnOnce(&mut Table) -> Result<T>) -> Result<T> {
        if self.is_closed() {
            return Err(Error::Sql(sqlx::Error::PoolClosed));
        }
        let mut table = self
            .table
            .lock()
            .map_err(|_| Error::Validation("table poisoned".into()))?;
        if !table.created {
            return Err(Error::Validation("relation \"todos\" does not exist".into()));
        }
        f(&mut table)
    }
}

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

#[async_trait]
impl Database for MemoryTodos {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn server_info(&self) -> Result<ServerInfo> {
        if self.is_closed() {
            return Err(Error::Sql(sqlx::Error::PoolClosed));
        }
        Ok(ServerInfo {
            test: 1,
            version: format!("{} (memory)", self.dialect),
        })
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TodoStore for MemoryTodos {
    async fn ensure_schema(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Sql(sqlx::Error::PoolClosed));
        }
        let mut table = self
            .table
            .lock()
            .map_err(|_| Error::Validation("table poisoned".into()))?;
        table.created = true;
        Ok(())
    }

    async fn insert(&self, task: &Task) -> Result<TodoId> {
        self.with_table(|table| {
            table.next_id += 1;
            let id = TodoId::new(table.next_id)?;
            let created_at = epoch() + Duration::minutes(i64::from(table.next_id));
            table.rows.push(Todo {
                id,
                task: task.as_str().to_string(),
                completed: false,
                created_at: Some(created_at),
            });
            Ok(id)
        })
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        self.with_table(|table| {
            let mut rows = table.rows.clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(rows)
        })
    }

    async fn find(&self, id: TodoId) -> Result<Option<Todo>> {
        self.with_table(|table| Ok(table.rows.iter().find(|t| t.id == id).cloned()))
    }

    async fn set_completed(&self, id: TodoId, completed: bool) -> Result<()> {
        self.with_table(|table| {
            if let Some(row) = table.rows.iter_mut().find(|t| t.id == id) {
                row.completed = completed;
            }
            Ok(())
        })
    }

    async fn delete(&self, id: TodoId) -> Result<()> {
        self.with_table(|table| {
            table.rows.retain(|t| t.id != id);
            Ok(())
        })
    }

    async fn stats(&self) -> Result<TodoStats> {
        self.with_table(|table| {
            let total = table.rows.len() as i64;
            let completed = table.rows.iter().filter(|t| t.completed).count() as i64;
            Ok(TodoStats {
                total,
                completed,
                pending: total - completed,
            })
        })
    }
}
