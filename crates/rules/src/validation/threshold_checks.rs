//! ThresholdRule checks: signal shape, condition, window, refinements.

use super::fuzzy::fuzzy_match;
use super::naming::{is_known_column, known_columns, matches_known_column};
use super::ValidationResult;
use crate::schema::*;

pub(super) fn validate_threshold(rule: &ThresholdRule, result: &mut ValidationResult) {
    let spec = &rule.spec;

    if spec.risk_type.trim().is_empty() {
        result.error("spec.risk_type", "risk_type must not be empty");
    }
    if spec.rationale.trim().is_empty() {
        result.warn("spec.rationale", "rationale is empty; findings will carry no explanation");
    }

    validate_signal(&spec.signal, result);
    validate_condition(spec, result);

    if let Some(window) = &spec.window {
        validate_window(window, result);
    }
    if let Some(companion) = &spec.companion {
        validate_companion(companion, &spec.signal, result);
    }
    if spec.direction_labels.is_some() && spec.condition.operator != ComparisonOperator::AbsGt {
        result.warn(
            "spec.direction_labels",
            "direction labels only vary for abs_gt rules; other operators always pick the same label",
        );
    }
}

// ── Signal ──────────────────────────────────────────────────────────

fn validate_signal(signal: &Signal, result: &mut ValidationResult) {
    match &signal.source {
        SignalSource::Column(column) => {
            if column.trim().is_empty() {
                result.error("spec.signal.column", "column must not be empty");
            } else {
                check_column(signal.table, column, "spec.signal.column", result);
            }
        }
        SignalSource::MeanOf(fragments) => {
            check_fragments(signal.table, fragments, "spec.signal.mean_of", result);
        }
        SignalSource::Ratio {
            numerator,
            denominator,
        } => {
            check_fragments(signal.table, numerator, "spec.signal.ratio.numerator", result);
            check_fragments(signal.table, denominator, "spec.signal.ratio.denominator", result);
        }
        SignalSource::Lean { left, right } => {
            if signal.table != TableSource::Ik {
                result.error("spec.signal.table", "lean signals need marker positions from the ik table");
            }
            if left.trim().is_empty() || right.trim().is_empty() {
                result.error("spec.signal.lean", "left and right segment names must not be empty");
            } else if left == right {
                result.error("spec.signal.lean", format!("left and right are both '{left}'"));
            } else {
                for name in signal.referenced_names() {
                    check_column(TableSource::Ik, &name, "spec.signal.lean", result);
                }
            }
        }
    }

    if signal.to_degrees && signal.table != TableSource::Ik {
        result.warn(
            "spec.signal.to_degrees",
            format!("to_degrees on the {} table converts a non-angular quantity", signal.table),
        );
    }
    if signal.to_degrees && matches!(signal.source, SignalSource::Lean { .. }) {
        result.warn("spec.signal.to_degrees", "lean angles are already in degrees");
    }
}

fn check_column(table: TableSource, column: &str, path: &str, result: &mut ValidationResult) {
    if is_known_column(table, column) {
        return;
    }
    let known = known_columns(table);
    let candidates: Vec<&str> = known.iter().map(String::as_str).collect();
    let message = format!("'{column}' is not a known {table} column");
    match fuzzy_match(column, &candidates) {
        Some(s) => result.warn_with_suggestion(path, message, format!("Did you mean '{s}'?")),
        None => result.warn(path, message),
    }
}

fn check_fragments(table: TableSource, fragments: &[String], path: &str, result: &mut ValidationResult) {
    if fragments.is_empty() {
        result.error(path, "at least one column fragment is required");
        return;
    }
    for (i, fragment) in fragments.iter().enumerate() {
        if fragment.trim().is_empty() {
            result.error(format!("{path}[{i}]"), "fragment must not be empty");
        } else if !matches_known_column(table, fragment) {
            result.warn(
                format!("{path}[{i}]"),
                format!("'{fragment}' matches no known {table} column"),
            );
        }
    }
}

// ── Condition ───────────────────────────────────────────────────────

fn validate_condition(spec: &ThresholdSpec, result: &mut ValidationResult) {
    let condition = &spec.condition;

    if !condition.threshold.is_finite() {
        result.error(
            "spec.condition.threshold",
            format!("threshold must be a finite number, got {}", condition.threshold),
        );
    } else if condition.operator == ComparisonOperator::AbsGt && condition.threshold < 0.0 {
        result.error(
            "spec.condition.threshold",
            "abs_gt threshold must be non-negative; a negative bound flags every sample",
        );
    }

    if condition.unit.trim().is_empty() {
        result.warn("spec.condition.unit", "unit is empty");
    }

    if condition.scale != ThresholdScale::None && spec.signal.table == TableSource::SoActivation {
        result.warn(
            "spec.condition.scale",
            "activations are dimensionless; scaling by the subject is unusual",
        );
    }
}

// ── Refinements ─────────────────────────────────────────────────────

fn validate_window(window: &AnalysisWindow, result: &mut ValidationResult) {
    let in_range = |v: f64| (0.0..=1.0).contains(&v);
    if !in_range(window.start) || !in_range(window.end) || window.start >= window.end {
        result.error(
            "spec.window",
            format!(
                "window must satisfy 0 <= start < end <= 1, got [{}, {})",
                window.start, window.end
            ),
        );
    }
}

fn validate_companion(companion: &Companion, signal: &Signal, result: &mut ValidationResult) {
    match (&companion.column, &signal.source) {
        (Some(column), _) => {
            check_column(companion.table, column, "spec.companion.column", result);
        }
        (None, SignalSource::Column(_)) => {}
        (None, _) => result.error(
            "spec.companion.column",
            "column is required when the signal is not a single column",
        ),
    }
    if companion.label.trim().is_empty() {
        result.warn("spec.companion.label", "label is empty");
    }
}
