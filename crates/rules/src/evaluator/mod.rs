//! Generic threshold-rule evaluator.
//!
//! Every [`ThresholdRule`] goes through the same loop: resolve the signal,
//! restrict it to the rule's window, scale the threshold for the subject,
//! extract risk intervals, and turn each interval into a [`RiskFinding`].
//! Missing tables or columns skip the rule instead of failing the analysis.

mod findings;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::intervals::{find_risk_intervals, IntervalError};
use crate::schema::{ComparisonOperator, RiskCategory, ThresholdRule};
use crate::scoring::{summarize, Summary};
use crate::scoring_config::CompiledScoringConfig;
use crate::signals::{resolve_column, resolve_signal, MotionData, SignalError};

pub use findings::{CompanionPeak, RiskFinding};

// ── Inputs and outputs ──────────────────────────────────────────────

/// Subject parameters thresholds can be scaled by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub body_weight_kg: f64,
}

/// Summary statistics of a rule's signal over its evaluation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMetrics {
    pub rule_id: String,
    /// Statistics ignore NaN samples; `None` when every sample is NaN.
    pub max: Option<f64>,
    pub min: Option<f64>,
    /// Mean magnitude for `abs_gt` rules, signed mean otherwise.
    pub mean: Option<f64>,
    /// Effective threshold the signal was compared against.
    pub threshold: f64,
    /// Share of samples satisfying the rule predicate, in percent.
    pub time_above_threshold_pct: f64,
    pub samples: usize,
}

/// Result of evaluating one rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    Evaluated {
        findings: Vec<RiskFinding>,
        metrics: SignalMetrics,
    },
    /// Required data was not available.
    Skipped { reason: String },
}

/// A rule that could not be evaluated, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRule {
    pub rule_id: String,
    pub category: RiskCategory,
    pub reason: String,
}

/// Everything one analysis produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub findings: Vec<RiskFinding>,
    pub metrics: Vec<SignalMetrics>,
    pub skipped: Vec<SkippedRule>,
    pub summary: Summary,
}

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("rule '{rule_id}': {source}")]
    Signal {
        rule_id: String,
        #[source]
        source: SignalError,
    },

    #[error(transparent)]
    Interval(#[from] IntervalError),
}

// ── Rule evaluator ──────────────────────────────────────────────────

/// Evaluates threshold rules against engine output tables.
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Evaluate a single rule.
    ///
    /// Disabled rules are evaluated too; filtering is the caller's job.
    pub fn evaluate(
        rule: &ThresholdRule,
        data: &MotionData,
        subject: &Subject,
    ) -> Result<RuleOutcome, EvalError> {
        let spec = &rule.spec;

        let series = match resolve_signal(&spec.signal, data) {
            Ok(series) => series,
            Err(e) if e.is_missing_data() => {
                return Ok(RuleOutcome::Skipped {
                    reason: e.to_string(),
                })
            }
            Err(source) => {
                return Err(EvalError::Signal {
                    rule_id: rule.metadata.id.clone(),
                    source,
                })
            }
        };

        let range = match &spec.window {
            Some(w) => series.window_range(w.start, w.end),
            None => 0..series.len(),
        };
        if range.is_empty() {
            return Ok(RuleOutcome::Skipped {
                reason: format!("evaluation window holds no samples ({} in series)", series.len()),
            });
        }

        let threshold = rule.effective_threshold(subject.body_weight_kg);
        let operator = spec.condition.operator;
        let predicate = |v: f64| operator.matches(v, threshold);

        let values = &series.values()[range.clone()];
        let time = &series.time()[range.clone()];
        let intervals = find_risk_intervals(values, time, &predicate, operator.peak_policy())?;

        let companion = spec.companion.as_ref().and_then(|c| {
            let column = c.column.as_deref().or(findings::signal_column(&spec.signal))?;
            match resolve_column(data, c.table, column) {
                Ok(series) => Some((c, series)),
                Err(e) => {
                    debug!(rule_id = %rule.metadata.id, error = %e, "companion series unavailable");
                    None
                }
            }
        });

        let findings = intervals
            .into_iter()
            .map(|mut interval| {
                interval.start_index += range.start;
                interval.end_index += range.start;
                findings::build(rule, &series, interval, threshold, companion.as_ref())
            })
            .collect();

        let window = series.slice(range);
        let matching = values.iter().filter(|&&v| predicate(v)).count();
        let metrics = SignalMetrics {
            rule_id: rule.metadata.id.clone(),
            max: window.max(),
            min: window.min(),
            mean: match operator {
                ComparisonOperator::AbsGt => window.map(f64::abs).mean(),
                _ => window.mean(),
            },
            threshold,
            time_above_threshold_pct: matching as f64 / values.len() as f64 * 100.0,
            samples: values.len(),
        };

        Ok(RuleOutcome::Evaluated { findings, metrics })
    }

    /// Evaluate every rule and summarize.
    ///
    /// Findings keep rule order, then interval order within a rule.
    pub fn evaluate_all<'a>(
        rules: impl IntoIterator<Item = &'a ThresholdRule>,
        data: &MotionData,
        subject: &Subject,
        scoring: &CompiledScoringConfig,
    ) -> Result<Assessment, EvalError> {
        let mut findings = Vec::new();
        let mut metrics = Vec::new();
        let mut skipped = Vec::new();

        for rule in rules {
            match Self::evaluate(rule, data, subject)? {
                RuleOutcome::Evaluated {
                    findings: found,
                    metrics: m,
                } => {
                    debug!(rule_id = %rule.metadata.id, findings = found.len(), "rule evaluated");
                    findings.extend(found);
                    metrics.push(m);
                }
                RuleOutcome::Skipped { reason } => {
                    info!(rule_id = %rule.metadata.id, %reason, "rule skipped");
                    skipped.push(SkippedRule {
                        rule_id: rule.metadata.id.clone(),
                        category: rule.spec.category,
                        reason,
                    });
                }
            }
        }

        let summary = summarize(&findings, scoring);
        info!(
            findings = findings.len(),
            evaluated = metrics.len(),
            skipped = skipped.len(),
            level = %summary.overall_risk_level,
            "assessment complete"
        );

        Ok(Assessment {
            findings,
            metrics,
            skipped,
            summary,
        })
    }
}
