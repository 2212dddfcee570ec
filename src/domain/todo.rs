//! Todo list records and argument validation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};

/// Longest task accepted by the `task VARCHAR(255)` column.
pub const MAX_TASK_LEN: usize = 255;

/// Primary key of a todo row.
///
/// Only positive values are valid; IDs come from `SERIAL` / `AUTO_INCREMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(i32);

impl TodoId {
    /// Wrap a raw database id.
    pub fn new(id: i32) -> Result<Self> {
        if id <= 0 {
            return Err(invalid_id());
        }
        Ok(Self(id))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl FromStr for TodoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let id: i32 = s.trim().parse().map_err(|_| invalid_id())?;
        Self::new(id)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn invalid_id() -> Error {
    Error::Validation("Please provide a valid todo ID".to_string())
}

/// Task text, trimmed and length-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task(String);

impl Task {
    /// Join CLI words with single spaces and validate the result.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let joined = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(joined)
    }

    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(Error::Validation(
                "Please provide a task description".to_string(),
            ));
        }
        let len = text.chars().count();
        if len > MAX_TASK_LEN {
            return Err(Error::Validation(format!(
                "task is {len} characters long; the limit is {MAX_TASK_LEN}"
            )));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A row of the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub task: String,
    pub completed: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl Todo {
    /// Status mark shown in listings.
    #[must_use]
    pub fn status_mark(&self) -> &'static str {
        if self.completed {
            "✓"
        } else {
            "○"
        }
    }

    #[must_use]
    pub fn status_text(&self) -> &'static str {
        if self.completed {
            "completed"
        } else {
            "pending"
        }
    }

    /// Render as `[<id>] <task> (<date>)`.
    #[must_use]
    pub fn describe(&self) -> String {
        let date = self
            .created_at
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        format!("[{}] {} ({})", self.id, self.task, date)
    }
}

/// Aggregate counts over the todo table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!("7".parse::<TodoId>().unwrap().get(), 7);
        assert_eq!(" 12 ".parse::<TodoId>().unwrap().get(), 12);
        assert!("0".parse::<TodoId>().is_err());
        assert!("-3".parse::<TodoId>().is_err());
        assert!("abc".parse::<TodoId>().is_err());
        assert!("".parse::<TodoId>().is_err());
        assert!("99999999999".parse::<TodoId>().is_err());
    }

    #[test]
    fn invalid_id_message_guides_the_user() {
        let err = "x".parse::<TodoId>().unwrap_err();
        assert_eq!(err.to_string(), "Please provide a valid todo ID");
    }

    #[test]
    fn task_words_are_joined_and_trimmed() {
        let task = Task::from_words(&["  buy", "milk  "]).unwrap();
        assert_eq!(task.as_str(), "buy milk");
    }

    #[test]
    fn empty_task_is_rejected() {
        assert!(Task::from_words::<&str>(&[]).is_err());
        assert!(Task::new("   ").is_err());
    }

    #[test]
    fn task_length_is_capped_in_characters() {
        assert!(Task::new("é".repeat(MAX_TASK_LEN)).is_ok());
        assert!(Task::new("a".repeat(MAX_TASK_LEN + 1)).is_err());
    }

    #[test]
    fn todo_describes_itself() {
        let created = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let todo = Todo {
            id: TodoId::new(4).unwrap(),
            task: "write docs".into(),
            completed: true,
            created_at: Some(created),
        };
        assert_eq!(todo.describe(), "[4] write docs (2024-03-09)");
        assert_eq!(todo.status_mark(), "✓");
        assert_eq!(todo.status_text(), "completed");
    }
}
