//! Infrastructure configuration modules.

pub mod kv;
pub mod logging;
pub mod resolver;
pub mod s3;
pub mod settings;
pub mod sql;

pub use resolver::{EnvLookup, Resolver};
pub use settings::Config;
