//! CLI module graph.

pub mod command;
pub mod interrupt;
pub mod kv;
pub mod output;
pub mod paths;
pub mod prompt;
pub mod run;
pub mod s3;
pub mod sql;
pub mod todo;
