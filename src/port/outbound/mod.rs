//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the add-on services the demos talk to and the
//! terminal they ask questions on.

pub mod kv;
pub mod object;
pub mod prompt;
pub mod sql;
