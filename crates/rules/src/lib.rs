//! Threshold-rule engine for motion injury-risk screening.
//!
//! This crate provides:
//! - YAML rule documents (`ThresholdRule`, `ScoringConfig`) with `extends`
//!   inheritance and a built-in default rule table
//! - Validation with "did you mean" suggestions for column names
//! - Signal resolution against the engine's storage tables
//! - Contiguous risk-interval extraction and the generic rule evaluator
//! - Overall risk scoring and JSON / text reports

pub mod builtin;
pub mod evaluator;
pub mod intervals;
pub mod loader;
pub mod report;
pub mod schema;
pub mod scoring;
pub mod scoring_config;
pub mod signals;
pub mod validation;
