//! Add-on agnostic domain types.

pub mod dialect;
pub mod object;
pub mod reply;
pub mod todo;

pub use dialect::Dialect;
pub use object::{Listing, ObjectInfo, ObjectSummary, StoredObject, Upload};
pub use reply::Reply;
pub use todo::{Task, Todo, TodoId, TodoStats};
