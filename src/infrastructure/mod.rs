//! Infrastructure layer.
//!
//! Provides technical concerns that support the command handlers without
//! containing demo logic: configuration files, credential resolution and
//! logging.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, credential resolution and logging

pub mod config;
