//! Application services (use cases).
//!
//! These services sit between the command handlers and the ports. They
//! hold the small amount of logic the demos have: argument normalization,
//! existence checks before object operations, and not-found handling for
//! todos. Rendering stays in the CLI adapter.

pub mod kv;
pub mod object;
pub mod todo;

pub use kv::KvService;
pub use object::ObjectService;
pub use todo::TodoService;
