//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the command handlers and the add-on client
//! crates. Outbound adapters implement them against Redis, S3 and SQL;
//! the `testkit` module implements them in memory.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │   Application services  │
//!                    └────────────┬────────────┘
//!     ┌───────────────────┬───────┴───────────┬──────────────────┐
//!     ▼                   ▼                   ▼                  ▼
//! ┌─────────┐      ┌─────────────┐      ┌───────────┐      ┌──────────┐
//! │ KvStore │      │ ObjectStore │      │ TodoStore │      │ Prompter │
//! └─────────┘      └─────────────┘      └───────────┘      └──────────┘
//! ```

pub mod outbound;

pub use outbound::kv::KeyValueStore;
pub use outbound::object::ObjectStore;
pub use outbound::prompt::Prompter;
pub use outbound::sql::{Database, ServerInfo, TodoStore};
