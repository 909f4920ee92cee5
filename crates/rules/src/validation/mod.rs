//! Rule validation with structured errors and suggestions.
//!
//! Checks threshold rules (signal shape, condition, window, companion) and
//! scoring configs. Returns a [`ValidationResult`] with errors (the rule
//! cannot be evaluated meaningfully) and warnings (advisory, e.g. a column
//! name outside the skeletal model's naming convention).

mod schema_checks;
mod threshold_checks;

pub mod fuzzy;
pub mod naming;

use crate::schema::*;
use serde::{Deserialize, Serialize};

// ── Result types ────────────────────────────────────────────────────

/// Errors mean the rule cannot be evaluated meaningfully; warnings are
/// advisory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted location, e.g. `spec.condition.threshold`.
    pub path: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationIssue::new(path, message));
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::new(path, message));
    }

    pub(crate) fn warn_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.warnings.push(ValidationIssue {
            suggestion: Some(suggestion.into()),
            ..ValidationIssue::new(path, message)
        });
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a parsed [`ThresholdRule`].
pub fn validate_rule(rule: &ThresholdRule) -> ValidationResult {
    let mut result = ValidationResult::new();
    schema_checks::validate_common_metadata(
        &rule.api_version,
        &rule.kind,
        RuleKind::ThresholdRule,
        &rule.metadata,
        &mut result,
    );
    threshold_checks::validate_threshold(rule, &mut result);
    result
}

/// Validate any [`RuleDocument`] variant, dispatching to the appropriate validator.
pub fn validate_document(doc: &RuleDocument) -> ValidationResult {
    match doc {
        RuleDocument::Threshold(rule) => validate_rule(rule),
        RuleDocument::ScoringConfig(rule) => {
            let mut result = ValidationResult::new();
            schema_checks::validate_scoring_config(rule, &mut result);
            result
        }
    }
}

/// Parse raw YAML (any kind) and validate. Parse failures become errors.
///
/// `extends` is not resolved, so child rules must be validated after loading.
pub fn validate_yaml(yaml: &str) -> ValidationResult {
    let parsed = serde_yaml::from_str::<RuleEnvelope>(yaml)
        .map_err(|e| format!("YAML parse error: {e}"))
        .and_then(|envelope| envelope.parse_full());
    match parsed {
        Ok(doc) => validate_document(&doc),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error("", e);
            result
        }
    }
}
