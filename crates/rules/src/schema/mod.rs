//! Rule document types.
//!
//! Every document is `apiVersion` / `kind` / `metadata` / `spec`. The loader
//! reads a [`RuleEnvelope`] first, merges `extends` parents, then parses the
//! full [`RuleDocument`]. A [`ThresholdRule`] compares one signal against one
//! threshold; a `ScoringConfig` sets the overall risk level boundaries.

mod document;
mod envelope;
mod kind;
mod metadata;
mod threshold;

pub use document::*;
pub use envelope::*;
pub use kind::*;
pub use metadata::*;
pub use threshold::*;
