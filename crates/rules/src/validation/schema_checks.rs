//! Envelope-level checks shared by all kinds, plus ScoringConfig checks.

use super::fuzzy::is_kebab_case;
use super::ValidationResult;

use crate::schema::{CommonMetadata, RuleKind};
use crate::scoring_config::ScoringConfigRule;

// ── Common metadata validation ──────────────────────────────────────

pub(super) fn validate_common_metadata(
    api_version: &str,
    kind: &str,
    expected_kind: RuleKind,
    metadata: &CommonMetadata,
    result: &mut ValidationResult,
) {
    if api_version != "v1" {
        result.error(
            "apiVersion",
            format!("apiVersion must be 'v1', got '{}'", api_version),
        );
    }
    if kind != expected_kind.as_str() {
        result.error(
            "kind",
            format!("kind must be '{}', got '{}'", expected_kind, kind),
        );
    }
    if !is_kebab_case(&metadata.id) {
        result.error(
            "metadata.id",
            format!(
                "id must be kebab-case (lowercase alphanumeric + hyphens), got '{}'",
                metadata.id
            ),
        );
    }
    if metadata.name.trim().is_empty() {
        result.error("metadata.name", "name must not be empty");
    }
    if metadata.extends.as_deref() == Some(metadata.id.as_str()) {
        result.error("metadata.extends", "a rule cannot extend itself");
    }
}

// ── ScoringConfig validation ────────────────────────────────────────

pub(super) fn validate_scoring_config(rule: &ScoringConfigRule, result: &mut ValidationResult) {
    validate_common_metadata(
        &rule.api_version,
        &rule.kind,
        RuleKind::ScoringConfig,
        &rule.metadata,
        result,
    );

    let spec = &rule.spec;
    for (path, level) in [("spec.high", &spec.high), ("spec.moderate", &spec.moderate)] {
        if !level.duration.is_finite() || level.duration < 0.0 {
            result.error(
                format!("{path}.duration"),
                format!("duration must be a non-negative number, got {}", level.duration),
            );
        }
    }

    if spec.moderate.count > spec.high.count || spec.moderate.duration > spec.high.duration {
        result.error(
            "spec",
            format!(
                "moderate bounds must not exceed high bounds: moderate({}, {}s) high({}, {}s)",
                spec.moderate.count, spec.moderate.duration, spec.high.count, spec.high.duration
            ),
        );
    }
}
