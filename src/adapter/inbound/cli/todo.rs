//! Handler for the `todo` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::{TodoAction, TodoArgs};
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sql::SqlDatabase;
use crate::application::TodoService;
use crate::domain::{Task, TodoId};
use crate::error::Result;
use crate::infrastructure::config::Resolver;
use crate::port::{Database, TodoStore};

/// Width of the rule under the list heading.
const RULE_WIDTH: usize = 50;

/// A todo action with its arguments already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoRequest {
    List,
    Add(Task),
    Toggle(TodoId),
    Delete(TodoId),
    Stats,
}

impl TodoRequest {
    /// Parse IDs and task text; nothing here touches the database.
    pub fn parse(action: Option<&TodoAction>) -> Result<Self> {
        Ok(match action {
            None | Some(TodoAction::List) => Self::List,
            Some(TodoAction::Add { task }) => Self::Add(Task::from_words(task)?),
            Some(TodoAction::Toggle { id }) => Self::Toggle(id.parse()?),
            Some(TodoAction::Delete { id }) => Self::Delete(id.parse()?),
            Some(TodoAction::Stats) => Self::Stats,
        })
    }
}

/// Execute the todo command.
pub async fn execute(args: &TodoArgs, resolver: &Resolver<'_>) -> Result<()> {
    let request = TodoRequest::parse(args.action.as_ref())?;
    let settings = resolver.sql(args.db.uri.clone(), args.db.dialect())?;
    let database = output::with_spinner(
        &format!("Connecting to {}…", settings.dialect()),
        &format!("Connected to {}", settings.dialect()),
        SqlDatabase::connect(&settings),
    )
    .await?;

    let result = perform(&database, &request).await;
    database.close().await;
    result
}

/// Ensure the table exists, then run `request`.
pub async fn perform<S: TodoStore + ?Sized>(store: &S, request: &TodoRequest) -> Result<()> {
    let service = TodoService::new(store);
    service.setup().await?;

    match request {
        TodoRequest::List => list(&service).await,
        TodoRequest::Add(task) => {
            let id = service.add(task).await?;
            output::success(&format!("Added todo: \"{task}\" (ID: {id})"));
            Ok(())
        }
        TodoRequest::Toggle(id) => {
            let todo = service.toggle(*id).await?;
            output::success(&format!(
                "Marked todo {id} as {}: \"{}\"",
                todo.status_text(),
                todo.task
            ));
            Ok(())
        }
        TodoRequest::Delete(id) => {
            service.delete(*id).await?;
            output::success(&format!("Deleted todo {id}"));
            Ok(())
        }
        TodoRequest::Stats => stats(&service).await,
    }
}

async fn list<S: TodoStore + ?Sized>(service: &TodoService<'_, S>) -> Result<()> {
    let todos = service.list().await?;

    output::section("Todo List");
    output::rule(RULE_WIDTH);

    if todos.is_empty() {
        output::note("No todos found. Add some with: addon todo add \"Your task\"");
        return Ok(());
    }

    for todo in &todos {
        output::item(
            "todo",
            &format!("{} {}", todo.status_mark(), todo.describe()),
            json!({
                "id": todo.id.get(),
                "task": todo.task,
                "completed": todo.completed,
                "created_at": todo.created_at.map(|ts| ts.to_string()),
            }),
        );
    }
    Ok(())
}

async fn stats<S: TodoStore + ?Sized>(service: &TodoService<'_, S>) -> Result<()> {
    let stats = service.stats().await?;
    let widths = [9, 9, 9];

    output::section("Todo Statistics");
    output::table_header(&[("Total", 9), ("Completed", 9), ("Pending", 9)]);
    output::table_separator(&widths);
    output::table_row(
        &[
            stats.total.to_string(),
            output::highlight(stats.completed),
            output::muted(stats.pending),
        ],
        &widths,
    );
    Ok(())
}
