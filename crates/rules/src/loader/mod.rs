//! Filesystem rule loader.
//!
//! Scans a rules directory for YAML documents, resolves `extends` chains
//! across files, and keeps the parsed documents in load order. The built-in
//! default rule table goes through the same path. Each document is read
//! twice: once as a loose [`RuleEnvelope`](crate::schema::RuleEnvelope),
//! then, after inheritance is merged in, as a typed `RuleDocument`.

mod core;
mod error;
mod extends;

#[cfg(test)]
mod tests;

pub use self::core::RuleLoader;
pub use self::error::{LoadResult, LoadStatus, Result, RuleError};
pub use self::extends::{deep_merge, ExtendsError};
