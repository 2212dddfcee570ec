//! Outbound adapters (driven side).
//!
//! - [`kv`] - Redis-protocol key-value store via the `redis` crate
//! - [`s3`] - S3-compatible bucket via `aws-sdk-s3`
//! - [`sql`] - PostgreSQL / MySQL via `sqlx`

pub mod kv;
pub mod s3;
pub mod sql;
