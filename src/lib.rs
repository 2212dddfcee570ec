//! addon-cli - interactive demos for managed add-ons.
//!
//! The `addon` binary talks to three kinds of managed services, each
//! through one client crate:
//!
//! - a Redis-compatible key-value store (`redis`)
//! - an S3-compatible object bucket (`aws-sdk-s3`)
//! - a MySQL or PostgreSQL database (`sqlx`)
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - add-on agnostic types: replies, objects, todos, dialects
//! - [`port`] - traits the handlers depend on ([`port::KeyValueStore`],
//!   [`port::ObjectStore`], [`port::TodoStore`], [`port::Prompter`])
//! - [`application`] - the small use cases layered over the ports
//! - [`adapter`] - the command line (inbound) and the client crates (outbound)
//! - [`infrastructure`] - config file, credential resolution and logging
//! - [`error`] - error types for the crate
//!
//! # Features
//!
//! - `testkit` - in-memory port implementations for tests
//! - `integration-tests` - tests against live add-ons

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
