//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - the `addon` command line
//! - [`outbound`] - Redis, S3 and SQL clients behind the port traits

pub mod inbound;
pub mod outbound;
