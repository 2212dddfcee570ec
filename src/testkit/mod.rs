//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`prompt`] — [`ScriptedPrompter`](prompt::ScriptedPrompter), a
//!   [`Prompter`](crate::port::Prompter) that replays canned answers.
//! - [`kv`] — `MemoryKv`, an in-memory key-value store understanding a
//!   handful of string commands.
//! - [`object`] — `MemoryBucket`, an in-memory single-bucket object store.
//! - [`todo`] — `MemoryTodos`, an in-memory todo table.

pub mod kv;
pub mod object;
pub mod prompt;
pub mod todo;
